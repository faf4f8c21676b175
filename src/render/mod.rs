//! HTML rendering of the match board.
//!
//! A consumer of [`BoardView`]; the board itself never depends on it.

use handlebars::Handlebars;

use crate::board::BoardView;
use crate::errors::AppError;

const BOARD_TEMPLATE_NAME: &str = "board";
const BOARD_TEMPLATE: &str = include_str!("../../templates/board.hbs");

/// Renders board views into the console's table markup. Values are HTML-escaped.
pub struct BoardRenderer {
    registry: Handlebars<'static>,
}

impl BoardRenderer {
    pub fn new() -> Result<Self, AppError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        registry
            .register_template_string(BOARD_TEMPLATE_NAME, BOARD_TEMPLATE)
            .map_err(|e| AppError::Internal(format!("Invalid board template: {}", e)))?;
        Ok(Self { registry })
    }

    pub fn render(&self, view: &BoardView) -> Result<String, AppError> {
        self.registry
            .render(BOARD_TEMPLATE_NAME, view)
            .map_err(|e| AppError::Internal(format!("Failed to render board: {}", e)))
    }
}
