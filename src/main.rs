mod app;
mod config;
mod content;
mod engine;
mod event;
mod session;
mod store;
mod ui;

use std::io;
use std::io::Write;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use app::{App, AppScreen};
use config::Config;
use event::{AppEvent, EventHandler};
use session::SoundCue;

#[derive(Parser)]
#[command(
    name = "robolab",
    version,
    about = "Terminal lessons that teach kids how machine learning works"
)]
struct Cli {
    #[arg(short, long, help = "Jump straight into a lesson (1-6)")]
    lesson: Option<u32>,

    #[arg(short, long, help = "Fix the simulation seed for reproducible runs")]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load().unwrap_or_default();
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    let mut app = App::with_config(config);
    if let Some(id) = cli.lesson {
        app.open_lesson_id(id);
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(Duration::from_millis(100));

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        match events.next()? {
            AppEvent::Key(key) => handle_key(app, key),
            AppEvent::Tick => app.on_tick(Instant::now()),
        }
        ring_cues(app);

        if app.should_quit {
            return Ok(());
        }
    }
}

/// The audio layer proper lives outside this crate; a terminal bell stands
/// in for positive cues when sound is enabled.
fn ring_cues(app: &mut App) {
    let cues = app.take_cues();
    if cues.is_empty() || !app.store.sound_enabled() {
        return;
    }
    if cues
        .iter()
        .any(|c| matches!(c, SoundCue::Correct | SoundCue::Celebrate))
    {
        print!("\x07");
        let _ = io::stdout().flush();
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }
    match app.screen {
        AppScreen::Home => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Enter => app.open_lesson(app.selected),
            KeyCode::Char('s') => app.toggle_sound(),
            KeyCode::Char('r') => app.reset_progress(),
            KeyCode::Char(c @ '1'..='6') => app.open_lesson(c as usize - '1' as usize),
            _ => {}
        },
        AppScreen::Lesson => {
            let now = Instant::now();
            match key.code {
                KeyCode::Esc => app.leave_lesson(),
                KeyCode::Enter => app.lesson_primary(now),
                KeyCode::Char(c @ '1'..='9') => {
                    app.lesson_choice(c as usize - '1' as usize, now);
                }
                _ => {}
            }
        }
    }
}
