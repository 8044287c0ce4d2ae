use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::app::App;
use crate::ui::theme::THEME;

pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let badges = app.store.badges();
    let sound = if app.store.sound_enabled() { "on" } else { "off" };
    let header = vec![
        Line::from(Span::styled(
            "  ROBOLAB: learn how machines learn",
            Style::default()
                .fg(THEME.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!("  badges earned: {badges} of 6 · sound {sound}"),
            Style::default().fg(THEME.dim),
        )),
    ];
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let mut rows: Vec<Line> = Vec::new();
    for (i, plan) in app.lessons().iter().enumerate() {
        let done = app.store.is_completed(plan.id);
        let marker = if done { "★" } else { " " };
        let cursor = if i == app.selected { "▶" } else { " " };
        let style = if i == app.selected {
            Style::default()
                .fg(THEME.accent)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        rows.push(Line::from(vec![
            Span::raw(format!(" {cursor} ")),
            Span::styled(format!("{}. {}", plan.id, plan.title), style),
            Span::styled(format!("  {marker}"), Style::default().fg(THEME.good)),
        ]));
        rows.push(Line::from(Span::styled(
            format!("      {}", plan.tagline),
            Style::default().fg(THEME.dim),
        )));
    }
    frame.render_widget(
        Paragraph::new(rows).block(Block::bordered().title(" lessons ")),
        chunks[1],
    );

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "  ↑/↓ choose · Enter start · s sound · r reset progress · q quit",
            Style::default().fg(THEME.dim),
        ))),
        chunks[2],
    );
}
