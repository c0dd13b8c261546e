//! Menu visibility notifications
//!
//! The core only says what should be visible; wiring it to actual UI is the
//! collaborator's job.

use crate::sim::GamePhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MenuDirective {
    ShowTitle,
    HideTitle,
    ShowPauseMenu,
    HidePauseMenu,
    ShowVictory,
    ShowDefeat,
    /// Clear the win/loss message
    HideOutcome,
}

/// One-way receiver of menu directives
pub trait MenuSink {
    fn notify(&mut self, directive: MenuDirective);
}

impl MenuSink for Vec<MenuDirective> {
    fn notify(&mut self, directive: MenuDirective) {
        self.push(directive);
    }
}

/// Directives for a phase transition, in the order they should apply
pub fn directives_for(from: GamePhase, to: GamePhase) -> Vec<MenuDirective> {
    use GamePhase::*;
    use MenuDirective::*;

    match (from, to) {
        (Screensaver, Playing) => vec![HideTitle],
        (Playing, Paused) => vec![ShowPauseMenu],
        (Paused, Playing) => vec![HidePauseMenu],
        (_, Won) => vec![ShowVictory],
        (_, Lost) => vec![ShowDefeat],
        (Won | Lost, Screensaver) => vec![HideOutcome, ShowTitle],
        (_, Screensaver) => vec![ShowTitle],
        _ => Vec::new(),
    }
}
