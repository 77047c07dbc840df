//! WASM bindings for chase-core
//!
//! Provides a JavaScript-friendly API for the game logic. The frontend owns
//! all rendering; it feeds cell clicks into [`WasmGame::tap`] and redraws
//! from [`WasmGame::snapshot`].

use wasm_bindgen::prelude::*;

use crate::{Game, Phase, Player, Pos, TapOutcome, COLS, ROWS};

/// WASM-friendly wrapper around Game
#[wasm_bindgen]
pub struct WasmGame {
    inner: Game,
}

#[wasm_bindgen]
impl WasmGame {
    /// Start a new game from the standard starting formations
    #[wasm_bindgen(constructor)]
    pub fn new() -> WasmGame {
        WasmGame { inner: Game::new() }
    }

    /// Handle a click on the cell at (row, col).
    /// Returns "selected", "moved", "captured", "won", "rejected", or "ignored"
    pub fn tap(&mut self, row: u8, col: u8) -> String {
        if row >= ROWS || col >= COLS {
            return "ignored".to_string();
        }
        let outcome = self.inner.tap(Pos::from_row_col(row, col));
        match outcome {
            TapOutcome::Selected(_) => "selected",
            TapOutcome::Moved(m) if m.winner.is_some() => "won",
            TapOutcome::Moved(m) if m.captured.is_some() => "captured",
            TapOutcome::Moved(_) => "moved",
            TapOutcome::Rejected(_) => "rejected",
            TapOutcome::Ignored => "ignored",
        }
        .to_string()
    }

    /// Current player as "upper" or "lower"
    #[wasm_bindgen(js_name = currentPlayer)]
    pub fn current_player(&self) -> String {
        match self.inner.current_player() {
            Player::Upper => "upper".to_string(),
            Player::Lower => "lower".to_string(),
        }
    }

    /// Number of completed turns
    #[wasm_bindgen(js_name = turnCount)]
    pub fn turn_count(&self) -> u32 {
        self.inner.turn()
    }

    /// Check if the game is over
    #[wasm_bindgen(js_name = isGameOver)]
    pub fn is_game_over(&self) -> bool {
        matches!(self.inner.phase(), Phase::Ended { .. })
    }

    /// Get game result: "ongoing", "upper_wins", or "lower_wins"
    pub fn result(&self) -> String {
        match self.inner.winner() {
            Some(Player::Upper) => "upper_wins".to_string(),
            Some(Player::Lower) => "lower_wins".to_string(),
            None => "ongoing".to_string(),
        }
    }

    /// Full render model (cells, holding areas, status) as a JS object
    pub fn snapshot(&self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.snapshot()).unwrap()
    }

    /// Legal moves for the current player as a JSON array
    /// Each move is { from: [row, col], to: [row, col] }
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> JsValue {
        let moves: Vec<WasmMove> = self
            .inner
            .legal_moves()
            .into_iter()
            .map(|(from, to)| WasmMove {
                from: [from.row(), from.col()],
                to: [to.row(), to.col()],
            })
            .collect();
        serde_wasm_bindgen::to_value(&moves).unwrap()
    }
}

impl Default for WasmGame {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable move for JavaScript
#[derive(serde::Serialize)]
struct WasmMove {
    from: [u8; 2],
    to: [u8; 2],
}
