pub mod home;
pub mod lesson;
pub mod progress_bar;
pub mod theme;

use ratatui::Frame;

use crate::app::{App, AppScreen};

pub fn draw(frame: &mut Frame, app: &App) {
    match app.screen {
        AppScreen::Home => home::draw(frame, app),
        AppScreen::Lesson => lesson::draw(frame, app),
    }
}
