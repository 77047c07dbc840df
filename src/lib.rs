//! Royal Chase game logic.
//!
//! A two-player, turn-based capture game on a fixed 4×3 board. Each side
//! fields four pieces with distinct one-step movement rules; captured pieces
//! go to the capturing player's holding area, and capturing the opponent's
//! Royal wins the game.
//!
//! # Board Layout
//!
//! Cells are indexed row-major, rows 0-3, columns 0-2:
//!
//! ```text
//!    0  1  2     row 0  (Upper back rank)
//!    3  4  5     row 1
//!    6  7  8     row 2
//!    9 10 11     row 3  (Lower back rank)
//! ```
//!
//! Upper moves toward higher rows, Lower toward lower rows.
//!
//! # Driving the engine
//!
//! The crate contains no rendering. A frontend feeds cell-activation events
//! into [`Game::tap`] (or calls [`Game::select`] / [`Game::try_move`]
//! directly), then re-reads [`Game::snapshot`] and redraws:
//!
//! ```
//! use chase_core::{Game, Pos, TapOutcome};
//!
//! let mut game = Game::new();
//! // Upper selects its Advancer and pushes it one cell forward.
//! assert!(matches!(game.tap(Pos::from_row_col(1, 1)), TapOutcome::Selected(_)));
//! assert!(matches!(game.tap(Pos::from_row_col(2, 1)), TapOutcome::Moved(_)));
//! assert_eq!(game.turn(), 1);
//! ```

#[cfg(feature = "wasm")]
pub mod wasm;

use std::fmt;

use serde::Serialize;

/// Number of board rows.
pub const ROWS: u8 = 4;
/// Number of board columns.
pub const COLS: u8 = 3;
/// Total number of cells on the board.
pub const CELLS: usize = (ROWS * COLS) as usize;

/// Player identifier.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Player {
    Upper,
    Lower,
}

impl Player {
    /// Get the opponent player.
    #[inline]
    pub fn opponent(self) -> Player {
        match self {
            Player::Upper => Player::Lower,
            Player::Lower => Player::Upper,
        }
    }

    /// Row delta for this player's forward direction.
    ///
    /// Upper starts on rows 0-1 and advances toward row 3; Lower mirrors it.
    #[inline]
    pub fn forward(self) -> i8 {
        match self {
            Player::Upper => 1,
            Player::Lower => -1,
        }
    }

    /// Index for per-player tables (0 = Upper, 1 = Lower).
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Player::Upper => 0,
            Player::Lower => 1,
        }
    }
}

/// Position on the 4×3 board (0-11), row-major.
///
/// Layout:
/// ```text
///    0  1  2
///    3  4  5
///    6  7  8
///    9 10 11
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Pos(pub u8);

impl Pos {
    /// Create a position from row (0-3) and column (0-2).
    #[inline]
    pub fn from_row_col(row: u8, col: u8) -> Pos {
        debug_assert!(row < ROWS && col < COLS);
        Pos(row * COLS + col)
    }

    /// Get the row (0-3).
    #[inline]
    pub fn row(self) -> u8 {
        self.0 / COLS
    }

    /// Get the column (0-2).
    #[inline]
    pub fn col(self) -> u8 {
        self.0 % COLS
    }

    /// Check if this is a valid position (0-11).
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 < CELLS as u8
    }

    /// The position offset by (dr, dc), or None if it leaves the board.
    pub fn offset(self, dr: i8, dc: i8) -> Option<Pos> {
        let row = self.row() as i8 + dr;
        let col = self.col() as i8 + dc;
        if row < 0 || row >= ROWS as i8 || col < 0 || col >= COLS as i8 {
            return None;
        }
        Some(Pos::from_row_col(row as u8, col as u8))
    }

    /// Iterate over all 12 positions.
    pub fn all() -> impl Iterator<Item = Pos> {
        (0..CELLS as u8).map(Pos)
    }
}

/// Piece kind, determining the movement rule.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    /// Steps to any of the 8 adjacent cells. Capturing it ends the game.
    Royal,
    /// Steps to the 4 orthogonal neighbors.
    Runner,
    /// Steps to the 4 diagonal neighbors.
    Diagonal,
    /// Steps one cell straight forward (owner-dependent direction).
    Advancer,
}

impl PieceKind {
    /// Movement-shape check: can a piece of this kind, owned by `owner` and
    /// standing on `from`, step onto `to`?
    ///
    /// This is a pure function of (kind, owner, from, to). It knows nothing
    /// about occupancy; whether the destination holds a friendly piece is
    /// checked at move execution, not here.
    pub fn can_step(self, owner: Player, from: Pos, to: Pos) -> bool {
        if !from.is_valid() || !to.is_valid() {
            return false;
        }
        let dr = to.row() as i8 - from.row() as i8;
        let dc = to.col() as i8 - from.col() as i8;
        match self {
            PieceKind::Royal => (dr != 0 || dc != 0) && dr.abs() <= 1 && dc.abs() <= 1,
            PieceKind::Runner => dr.abs() + dc.abs() == 1,
            PieceKind::Diagonal => dr.abs() == 1 && dc.abs() == 1,
            PieceKind::Advancer => dr == owner.forward() && dc == 0,
        }
    }
}

/// A piece on the board or in a holding area.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
pub struct Piece {
    pub owner: Player,
    pub kind: PieceKind,
}

impl Piece {
    #[inline]
    pub fn new(owner: Player, kind: PieceKind) -> Piece {
        Piece { owner, kind }
    }
}

/// The 4×3 board: 12 cells, each holding at most one piece.
///
/// Board operations are pure data manipulation. Legality and turn order are
/// enforced by [`Game`]; the board itself never rejects a placement.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Board {
    cells: [Option<Piece>; CELLS],
}

impl Board {
    /// Create a board with no pieces on it.
    pub fn empty() -> Board {
        Board { cells: [None; CELLS] }
    }

    /// Create a board with the two mirrored starting formations.
    ///
    /// Each back rank holds Runner, Royal, Diagonal (from that player's left),
    /// with the Advancer one rank ahead of the Royal. The two formations are
    /// 180°-rotations of each other.
    pub fn starting_position() -> Board {
        use PieceKind::*;
        use Player::*;

        let layout: [(u8, u8, Player, PieceKind); 8] = [
            (0, 0, Upper, Runner),
            (0, 1, Upper, Royal),
            (0, 2, Upper, Diagonal),
            (1, 1, Upper, Advancer),
            (2, 1, Lower, Advancer),
            (3, 0, Lower, Diagonal),
            (3, 1, Lower, Royal),
            (3, 2, Lower, Runner),
        ];

        let mut board = Board::empty();
        for (row, col, owner, kind) in layout {
            board.set(Pos::from_row_col(row, col), Some(Piece::new(owner, kind)));
        }
        board
    }

    /// Get the piece at a position. Returns None for an empty cell, and also
    /// for out-of-range positions (callers pre-validate range where the
    /// distinction matters).
    #[inline]
    pub fn piece_at(&self, pos: Pos) -> Option<Piece> {
        if pos.is_valid() {
            self.cells[pos.0 as usize]
        } else {
            None
        }
    }

    /// Check if a cell is empty.
    #[inline]
    pub fn is_empty(&self, pos: Pos) -> bool {
        self.piece_at(pos).is_none()
    }

    /// Set or clear a cell's occupant.
    /// Does NOT validate - caller must ensure the placement is legal.
    #[inline]
    pub fn set(&mut self, pos: Pos, piece: Option<Piece>) {
        debug_assert!(pos.is_valid());
        self.cells[pos.0 as usize] = piece;
    }

    /// Move the piece at `from` onto `to` as a single unit, returning the
    /// piece that was displaced from `to`, if any.
    ///
    /// The source must be occupied; at no point are two cells holding the
    /// same piece.
    pub fn move_piece(&mut self, from: Pos, to: Pos) -> Option<Piece> {
        debug_assert!(from.is_valid() && to.is_valid());
        let mover = self.cells[from.0 as usize].take();
        debug_assert!(mover.is_some(), "move_piece from an empty cell");
        std::mem::replace(&mut self.cells[to.0 as usize], mover)
    }

    /// Iterate over all occupied cells as (position, piece) pairs.
    pub fn pieces(&self) -> impl Iterator<Item = (Pos, Piece)> + '_ {
        Pos::all().filter_map(|pos| self.piece_at(pos).map(|piece| (pos, piece)))
    }

    /// Count pieces on the board for a player.
    pub fn piece_count(&self, player: Player) -> usize {
        self.pieces().filter(|(_, p)| p.owner == player).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting_position()
    }
}

/// Per-player sink for captured opposing pieces.
///
/// Append-only: pieces enter on capture and never leave (there is no drop
/// rule in this game). At most 8 pieces can ever be captured.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(transparent)]
pub struct HoldingArea {
    pieces: Vec<Piece>,
}

impl HoldingArea {
    pub fn new() -> HoldingArea {
        HoldingArea { pieces: Vec::with_capacity(8) }
    }

    /// Record a captured piece.
    pub fn put(&mut self, piece: Piece) {
        self.pieces.push(piece);
    }

    /// Captured pieces in capture order.
    pub fn pieces(&self) -> &[Piece] {
        &self.pieces
    }

    pub fn len(&self) -> usize {
        self.pieces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }
}

/// Game lifecycle phase.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Phase {
    /// Moves are being accepted.
    Started,
    /// The winner captured the opposing Royal; all further operations are
    /// rejected.
    Ended { winner: Player },
}

/// Why a move attempt was rejected. No state changes on any of these.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveError {
    /// The game has already ended.
    GameOver,
    /// No source cell is selected.
    NoSelection,
    /// The target position is off the board.
    OutOfBounds,
    /// The selected piece's movement rule does not reach the target.
    IllegalStep,
    /// The target cell holds a piece of the moving player.
    OwnPieceAtTarget,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            MoveError::GameOver => "the game has ended",
            MoveError::NoSelection => "no cell is selected",
            MoveError::OutOfBounds => "target is off the board",
            MoveError::IllegalStep => "piece cannot reach the target",
            MoveError::OwnPieceAtTarget => "target holds the player's own piece",
        };
        f.write_str(msg)
    }
}

impl std::error::Error for MoveError {}

/// Result of a successful move.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct MoveOutcome {
    pub from: Pos,
    pub to: Pos,
    /// The opposing piece removed from the destination, if any.
    pub captured: Option<Piece>,
    /// Set when this move captured the Royal and ended the game.
    pub winner: Option<Player>,
}

/// What a cell-activation event did.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TapOutcome {
    /// The cell held the current player's piece and is now selected.
    Selected(Pos),
    /// A move from the selected cell was executed.
    Moved(MoveOutcome),
    /// A move was attempted but rejected; selection is unchanged.
    Rejected(MoveError),
    /// Nothing applicable happened (empty tap with no selection, or the
    /// game has ended).
    Ignored,
}

/// Render model for one board cell.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct CellView {
    pub row: u8,
    pub col: u8,
    pub piece: Option<Piece>,
    /// True for the currently selected cell (highlight hint).
    pub active: bool,
}

/// Everything a frontend needs to redraw the game.
#[derive(Clone, Debug, Serialize)]
pub struct GameSnapshot {
    /// All 12 cells in row-major order.
    pub cells: Vec<CellView>,
    /// Pieces Upper has captured, in capture order.
    pub upper_captured: Vec<Piece>,
    /// Pieces Lower has captured, in capture order.
    pub lower_captured: Vec<Piece>,
    pub turn: u32,
    pub current_player: Player,
    pub phase: Phase,
}

/// The turn/selection/capture state machine.
///
/// Exactly one external actor drives the game, one call at a time; every
/// operation is a finite synchronous state transition.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    holdings: [HoldingArea; 2],
    turn: u32,
    current: Player,
    selected: Option<Pos>,
    phase: Phase,
}

impl Game {
    /// Start a new game from the standard starting formations, Upper to move.
    pub fn new() -> Game {
        Game::with_position(Board::starting_position(), Player::Upper)
    }

    /// Start a game from an arbitrary position.
    pub fn with_position(board: Board, to_move: Player) -> Game {
        Game {
            board,
            holdings: [HoldingArea::new(), HoldingArea::new()],
            turn: 0,
            current: to_move,
            selected: None,
            phase: Phase::Started,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of completed turns.
    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The winning player, once the game has ended.
    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            Phase::Started => None,
            Phase::Ended { winner } => Some(winner),
        }
    }

    /// The currently selected (active) cell, if any.
    pub fn selected(&self) -> Option<Pos> {
        self.selected
    }

    /// Pieces the given player has captured.
    pub fn holding(&self, player: Player) -> &HoldingArea {
        &self.holdings[player.index()]
    }

    /// Select the cell at `pos` as the move source.
    ///
    /// Returns false as a benign no-op if the cell is empty, holds an
    /// opponent piece, or the game has ended; the current selection is left
    /// untouched in those cases. Selecting a second own-piece cell simply
    /// re-targets the selection.
    pub fn select(&mut self, pos: Pos) -> bool {
        if let Phase::Ended { .. } = self.phase {
            return false;
        }
        match self.board.piece_at(pos) {
            Some(piece) if piece.owner == self.current => {
                self.selected = Some(pos);
                true
            }
            _ => false,
        }
    }

    /// Attempt to move the selected piece onto `to`.
    ///
    /// On success the capture (if any) is routed into the mover's holding
    /// area, a Royal capture ends the game, and the turn advances. On error
    /// nothing changes: the selection stays, the turn does not advance.
    pub fn try_move(&mut self, to: Pos) -> Result<MoveOutcome, MoveError> {
        if let Phase::Ended { .. } = self.phase {
            return Err(MoveError::GameOver);
        }
        let from = self.selected.ok_or(MoveError::NoSelection)?;
        if !to.is_valid() {
            return Err(MoveError::OutOfBounds);
        }

        // The selection invariant guarantees an own piece at `from`.
        let piece = match self.board.piece_at(from) {
            Some(piece) => piece,
            None => {
                debug_assert!(false, "selected cell {from:?} is empty");
                return Err(MoveError::NoSelection);
            }
        };
        debug_assert!(piece.owner == self.current);

        if !piece.kind.can_step(piece.owner, from, to) {
            return Err(MoveError::IllegalStep);
        }
        // The shape rule alone would allow landing on a friendly piece;
        // reject that here before touching the board.
        if let Some(target) = self.board.piece_at(to) {
            if target.owner == piece.owner {
                return Err(MoveError::OwnPieceAtTarget);
            }
        }

        let captured = self.board.move_piece(from, to);
        let mut winner = None;
        if let Some(captured_piece) = captured {
            self.holdings[self.current.index()].put(captured_piece);
            if captured_piece.kind == PieceKind::Royal {
                winner = Some(self.current);
                self.phase = Phase::Ended { winner: self.current };
            }
        }

        let outcome = MoveOutcome { from, to, captured, winner };
        self.advance_turn();
        Ok(outcome)
    }

    /// Dispatch a cell-activation event (a click/tap on a board cell).
    ///
    /// If the cell holds the current player's own piece it becomes the
    /// selection; otherwise, with a selection active, the tap is treated as
    /// a move attempt onto that cell.
    pub fn tap(&mut self, pos: Pos) -> TapOutcome {
        if let Phase::Ended { .. } = self.phase {
            return TapOutcome::Ignored;
        }
        if matches!(self.board.piece_at(pos), Some(p) if p.owner == self.current) {
            self.select(pos);
            return TapOutcome::Selected(pos);
        }
        if self.selected.is_some() {
            return match self.try_move(pos) {
                Ok(outcome) => TapOutcome::Moved(outcome),
                Err(err) => TapOutcome::Rejected(err),
            };
        }
        TapOutcome::Ignored
    }

    /// Clear the selection and hand the turn to the opponent. Once the game
    /// has ended the turn counter and current player stay frozen.
    fn advance_turn(&mut self) {
        self.selected = None;
        if let Phase::Started = self.phase {
            self.turn += 1;
            self.current = self.current.opponent();
        }
    }

    /// Enumerate every (from, to) pair the current player could legally play.
    /// Empty once the game has ended.
    pub fn legal_moves(&self) -> Vec<(Pos, Pos)> {
        let mut moves = Vec::new();
        if let Phase::Ended { .. } = self.phase {
            return moves;
        }
        for (from, piece) in self.board.pieces() {
            if piece.owner != self.current {
                continue;
            }
            for to in Pos::all() {
                if !piece.kind.can_step(piece.owner, from, to) {
                    continue;
                }
                if matches!(self.board.piece_at(to), Some(t) if t.owner == piece.owner) {
                    continue;
                }
                moves.push((from, to));
            }
        }
        moves
    }

    /// Build the full render model for the presentation layer.
    pub fn snapshot(&self) -> GameSnapshot {
        let cells = Pos::all()
            .map(|pos| CellView {
                row: pos.row(),
                col: pos.col(),
                piece: self.board.piece_at(pos),
                active: self.selected == Some(pos),
            })
            .collect();

        GameSnapshot {
            cells,
            upper_captured: self.holdings[Player::Upper.index()].pieces.clone(),
            lower_captured: self.holdings[Player::Lower.index()].pieces.clone(),
            turn: self.turn,
            current_player: self.current,
            phase: self.phase,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
