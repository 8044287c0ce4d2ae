use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::app::App;
use crate::content::{QuizPlan, ResultsView};
use crate::engine::stats::{self, ConfusionMatrix};
use crate::session::activity::{
    PredictPhase, PredictStyle, StageKind, StageState, collect_done,
};
use crate::session::lesson::LessonSession;
use crate::session::screen::Screen;
use crate::ui::progress_bar::ProgressBar;
use crate::ui::theme::THEME;

pub fn draw(frame: &mut Frame, app: &App) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(frame.area());

    frame.render_widget(
        ProgressBar::new(
            session.plan.title,
            session.progress_percent() as f64 / 100.0,
        ),
        chunks[0],
    );

    let body = match session.screen {
        Screen::Intro => intro_body(session),
        Screen::Learn => learn_body(session),
        Screen::Precheck => quiz_body(session, &session.plan.precheck),
        Screen::Midcheck => match session.plan.midcheck {
            Some(ref quiz) => quiz_body(session, quiz),
            None => Vec::new(),
        },
        Screen::Activity => activity_body(session),
        Screen::Results => results_body(session),
        Screen::Reflection => reflection_body(session),
        Screen::Completion => completion_body(session),
    };
    frame.render_widget(Paragraph::new(body).wrap(Wrap { trim: false }), chunks[1]);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            footer_hint(session),
            Style::default().fg(THEME.dim),
        ))),
        chunks[2],
    );
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {text}"),
        Style::default()
            .fg(THEME.accent)
            .add_modifier(Modifier::BOLD),
    ))
}

fn plain(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::raw(format!("  {}", text.into())))
}

fn dim(text: impl Into<String>) -> Line<'static> {
    Line::from(Span::styled(
        format!("  {}", text.into()),
        Style::default().fg(THEME.dim),
    ))
}

fn feedback_line(text: &str, correct: bool) -> Line<'static> {
    let color = if correct { THEME.good } else { THEME.bad };
    Line::from(Span::styled(
        format!("  🤖 {text}"),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}

fn blank() -> Line<'static> {
    Line::from("")
}

fn intro_body(session: &LessonSession) -> Vec<Line<'static>> {
    let plan = session.plan;
    let mut lines = vec![
        blank(),
        heading(plan.title),
        blank(),
        plain(format!("🤖 {}", plan.intro)),
        blank(),
        plain("Learning goals:"),
    ];
    for goal in plan.goals {
        lines.push(plain(format!("  ✔ {goal}")));
    }
    lines
}

fn learn_body(session: &LessonSession) -> Vec<Line<'static>> {
    let plan = session.plan;
    let mut lines = vec![blank(), heading(plan.learn_title), blank()];
    for (i, (label, desc)) in plan.learn_steps.iter().enumerate() {
        lines.push(plain(format!("  {}. {label}: {desc}", i + 1)));
    }
    lines
}

fn quiz_body(session: &LessonSession, quiz: &QuizPlan) -> Vec<Line<'static>> {
    let mut lines = vec![blank(), heading("Quick check"), blank(), plain(quiz.question), blank()];
    if let Some(ref feedback) = session.feedback {
        if let Some(choice) = session.quiz_choice {
            let picked = quiz.options.get(choice).copied().unwrap_or("");
            lines.push(dim(format!("you answered: {picked}")));
        }
        lines.push(feedback_line(&feedback.text, feedback.correct));
    } else {
        for (i, option) in quiz.options.iter().enumerate() {
            lines.push(plain(format!("  [{}] {option}", i + 1)));
        }
    }
    lines
}

fn activity_body(session: &LessonSession) -> Vec<Line<'static>> {
    let stage = session.current_stage_plan();
    match (stage.kind, &session.activity.stage) {
        (StageKind::Classify { deck, .. }, StageState::Classify { .. }) => {
            let mut lines = vec![
                blank(),
                dim(format!(
                    "{}/{} items sorted",
                    session.stage_resolved(stage.label),
                    deck.len()
                )),
                blank(),
            ];
            if let Some(ref feedback) = session.feedback {
                lines.push(feedback_line(&feedback.text, feedback.correct));
            } else if let Some(item) = session.current_trial() {
                lines.push(heading(&format!("{}  {}", item.glyph, item.name)));
                lines.push(blank());
                lines.push(plain("Which group does it belong to?"));
                for (i, category) in session.plan.categories.iter().enumerate() {
                    lines.push(plain(format!(
                        "  [{}] {} {}",
                        i + 1,
                        category.glyph,
                        category.label
                    )));
                }
            }
            lines
        }
        (StageKind::Collect { goals }, StageState::Collect { counts }) => {
            let mut lines = vec![blank(), heading("Build the training set"), blank()];
            for (slot, &(cat, goal)) in goals.iter().enumerate() {
                let key = session
                    .plan
                    .categories
                    .iter()
                    .position(|c| c.id == cat)
                    .map(|p| p + 1)
                    .unwrap_or(slot + 1);
                let label = session.plan.category_label(cat);
                let count = counts.get(slot).copied().unwrap_or(0);
                lines.push(plain(format!("  {label}: {count}/{goal}   [{key}] add one")));
            }
            lines.push(blank());
            if collect_done(goals, counts) {
                lines.push(heading("All set! Press Enter to train the robot."));
            } else {
                lines.push(dim("Add examples until every goal is met."));
            }
            lines
        }
        (StageKind::Train { caption }, StageState::Train { percent }) => {
            let filled = (*percent as usize) / 5;
            vec![
                blank(),
                heading("🧠 Training"),
                blank(),
                plain(caption),
                blank(),
                plain(format!("[{}{}] {percent}%", "█".repeat(filled), "░".repeat(20 - filled))),
            ]
        }
        (
            StageKind::Predict { deck, style, .. },
            StageState::Predict { index, phase, guess },
        ) => predict_body(session, stage.label, deck.len(), *index, *phase, *guess, style),
        (StageKind::Review { caption }, StageState::Review) => {
            let mut lines = vec![blank(), plain(format!("🤖 {caption}")), blank()];
            lines.extend(record_summary(session, stage.label));
            lines
        }
        // batch predictions sit in review state with their results on screen
        (StageKind::Predict { .. }, StageState::Review) => {
            let mut lines = vec![blank(), heading("The robot's predictions"), blank()];
            lines.extend(record_summary(session, stage.label));
            lines
        }
        _ => Vec::new(),
    }
}

fn predict_body(
    session: &LessonSession,
    label: &'static str,
    deck_len: usize,
    index: usize,
    phase: PredictPhase,
    guess: Option<&'static str>,
    style: PredictStyle,
) -> Vec<Line<'static>> {
    let mut lines = vec![
        blank(),
        dim(format!("test {} of {}", (index + 1).min(deck_len), deck_len)),
        blank(),
    ];
    if let Some(item) = session.current_trial() {
        lines.push(heading(&format!("{}  {}", item.glyph, item.name)));
        lines.push(blank());
    }
    match phase {
        PredictPhase::Await => match style {
            PredictStyle::StudentFirst => {
                lines.push(plain("What will the robot predict?"));
                for (i, category) in session.plan.categories.iter().enumerate() {
                    lines.push(plain(format!(
                        "  [{}] {} {}",
                        i + 1,
                        category.glyph,
                        category.label
                    )));
                }
            }
            _ => lines.push(plain("Press Enter to run this test.")),
        },
        PredictPhase::Thinking => {
            lines.push(plain("🤖 The robot is thinking..."));
        }
        PredictPhase::Revealed => {
            if let Some(record) = session
                .records
                .iter()
                .rev()
                .find(|r| r.stage == label)
            {
                let verdict = if record.correct { "✓ correct" } else { "✗ wrong" };
                let color = if record.correct { THEME.good } else { THEME.bad };
                lines.push(Line::from(Span::styled(
                    format!(
                        "  Robot says: {} {verdict} (it's really {})",
                        session.plan.category_label(record.predicted),
                        session.plan.category_label(record.actual)
                    ),
                    Style::default().fg(color),
                )));
                if let Some(guess) = guess {
                    let matched = guess == record.predicted;
                    lines.push(dim(format!(
                        "Your guess: {} ({})",
                        session.plan.category_label(guess),
                        if matched { "you called it!" } else { "the robot surprised you" }
                    )));
                }
            }
            lines.push(blank());
            lines.push(dim("Press Enter for the next test."));
        }
    }
    lines
}

/// Per-item verdicts plus per-category accuracy for one stage's records.
fn record_summary(session: &LessonSession, label: &'static str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for record in session.records.iter().filter(|r| r.stage == label) {
        let (mark, color) = if record.correct {
            ("✓", THEME.good)
        } else {
            ("✗", THEME.bad)
        };
        lines.push(Line::from(Span::styled(
            format!(
                "  {mark} {} → {}",
                record.item,
                session.plan.category_label(record.predicted)
            ),
            Style::default().fg(color),
        )));
    }
    lines.push(blank());
    for category in session.plan.categories {
        let acc = stats::accuracy_for(&session.records, label, Some(category.id));
        lines.push(plain(format!("  {} accuracy: {acc}%", category.label)));
    }
    lines
}

fn results_body(session: &LessonSession) -> Vec<Line<'static>> {
    let plan = session.plan;
    let mut lines = vec![blank(), heading("Your results"), blank()];
    match plan.results {
        ResultsView::Score { show_robot } => {
            let total = session.counters.classified as usize;
            let correct = session.counters.correct as usize;
            let accuracy = stats::percent(correct, total);
            lines.push(plain(format!("You sorted {correct} of {total} correctly.")));
            lines.push(plain(format!("Your accuracy: {}", meter(accuracy))));
            if show_robot {
                let robot = stats::mimic_accuracy(session.counters.correct);
                lines.push(plain(format!("Robot accuracy: {}", meter(robot))));
            }
        }
        ResultsView::StagePair { first, second } => {
            for label in [first, second] {
                lines.push(heading(label));
                for category in plan.categories {
                    let acc = stats::accuracy_for(&session.records, label, Some(category.id));
                    lines.push(plain(format!("  {}: {}", category.label, meter(acc))));
                }
                lines.push(blank());
            }
        }
        ResultsView::Rounds(labels) => {
            for label in labels {
                let acc = stats::accuracy_for(&session.records, label, None);
                lines.push(plain(format!("{label}: {}", meter(acc))));
            }
        }
        ResultsView::Matrix { stage } => {
            let acc = stats::accuracy_for(&session.records, stage, None);
            lines.push(plain(format!("Robot accuracy on new data: {}", meter(acc))));
            lines.push(blank());
            lines.extend(matrix_lines(session, stage));
        }
    }
    lines.push(blank());
    lines.push(plain(format!("💡 {}", plan.insight)));
    lines
}

fn matrix_lines(session: &LessonSession, stage: &'static str) -> Vec<Line<'static>> {
    let labels = session.plan.category_ids();
    let matrix = ConfusionMatrix::from_records(&labels, &session.records, stage);
    let mut lines = vec![dim(format!(
        "confusion matrix over {} tests (rows: truth, columns: robot)",
        matrix.total()
    ))];
    let mut header = String::from("           ");
    for label in &matrix.labels {
        header.push_str(&format!("{label:>9}"));
    }
    lines.push(plain(header));
    for &actual in &matrix.labels {
        let mut text = format!("{actual:>9}  ");
        for &predicted in &matrix.labels {
            text.push_str(&format!("{:>9}", matrix.get(actual, predicted)));
        }
        lines.push(plain(text));
    }
    lines
}

fn reflection_body(session: &LessonSession) -> Vec<Line<'static>> {
    let reflect = session.plan.reflection;
    let mut lines = vec![blank(), heading(reflect.title), blank(), plain(reflect.prompt), blank()];
    for (i, option) in reflect.options.iter().enumerate() {
        let marker = if session.reflection_choice == Some(i) {
            "●"
        } else {
            "○"
        };
        lines.push(plain(format!("  {marker} [{}] {option}", i + 1)));
    }
    lines
}

fn completion_body(session: &LessonSession) -> Vec<Line<'static>> {
    let plan = session.plan;
    let date = chrono::Local::now().format("%B %e, %Y").to_string();
    vec![
        blank(),
        heading("🏆 Badge earned!"),
        blank(),
        plain(format!("🤖 {}", plan.completion_message)),
        blank(),
        plain(format!("Key takeaway: {}", plan.takeaway)),
        blank(),
        dim(format!("completed on {date}")),
    ]
}

fn meter(percent: u8) -> String {
    let filled = (percent as usize) / 10;
    format!("{:>3}% [{}{}]", percent, "█".repeat(filled), "░".repeat(10 - filled))
}

fn footer_hint(session: &LessonSession) -> String {
    let hint = match session.screen {
        Screen::Intro | Screen::Learn | Screen::Results => "Enter continue",
        Screen::Precheck | Screen::Midcheck => "1-9 answer",
        Screen::Activity => "1-9 choose · Enter continue",
        Screen::Reflection => "1-9 pick, then Enter finish",
        Screen::Completion => "Enter back to home",
    };
    format!("  [{}] {hint} · Esc leave lesson", session.screen.as_str())
}
