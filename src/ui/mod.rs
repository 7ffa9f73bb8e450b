pub mod layout;
mod menu;
mod quiz;
mod summary;

use crate::app::App;
use crate::models::AppState;
use ratatui::Frame;

pub use layout::{calculate_menu_chunks, calculate_quiz_chunks, calculate_summary_chunks};
pub use menu::{draw_generating, draw_menu};
pub use quiz::{draw_quiz, draw_restart_confirmation};
pub use summary::draw_summary;

/// Draw the screen for the app's current state.
pub fn draw(f: &mut Frame, app: &App) {
    match app.state {
        AppState::Menu => draw_menu(f, app),
        AppState::Generating => draw_generating(f, app),
        AppState::Quiz => draw_quiz(f, app),
        AppState::RestartConfirm => draw_restart_confirmation(f),
        AppState::Summary => draw_summary(f, &app.session),
    }
}
