use ratatui::Frame;

use crate::{session::Phase, App};

/// A UI Screen boundary: responsible for rendering one phase
pub trait Screen {
    fn render(&self, app: &mut App, f: &mut Frame);
}

/// Idle screen: the list editor
pub struct IdleScreen;

impl Screen for IdleScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        f.render_widget(&*app, f.area());
    }
}

/// Session screen: current exercise plus the countdown
pub struct SessionScreen;

impl Screen for SessionScreen {
    fn render(&self, app: &mut App, f: &mut Frame) {
        f.render_widget(&*app, f.area());
    }
}

/// Helper to construct the appropriate screen for the current phase
pub fn current_screen(phase: &Phase) -> Box<dyn Screen> {
    match phase {
        Phase::Idle => Box::new(IdleScreen),
        Phase::Running => Box::new(SessionScreen),
    }
}
