use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;

use crate::config::Config;
use crate::content::{self, LessonPlan};
use crate::session::SoundCue;
use crate::session::activity::StageKind;
use crate::session::lesson::{Delays, LessonSession};
use crate::session::screen::Screen;
use crate::store::progress::ProgressStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Home,
    Lesson,
}

/// Top-level application state: the home screen, the active lesson session
/// (if any), and the shared progress store.
pub struct App {
    pub screen: AppScreen,
    pub selected: usize,
    pub session: Option<LessonSession>,
    pub store: ProgressStore,
    pub config: Config,
    pub should_quit: bool,
    rng: SmallRng,
}

impl App {
    pub fn with_config(config: Config) -> Self {
        let store = ProgressStore::open();
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        Self {
            screen: AppScreen::Home,
            selected: 0,
            session: None,
            store,
            config,
            should_quit: false,
            rng,
        }
    }

    pub fn lessons(&self) -> &'static [LessonPlan] {
        content::all_lessons()
    }

    pub fn select_prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
        }
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.lessons().len() {
            self.selected += 1;
        }
    }

    pub fn open_lesson(&mut self, index: usize) {
        let lessons = content::all_lessons();
        let Some(plan) = lessons.get(index) else {
            return;
        };
        let delays = self.delays_for(plan);
        // each session forks its own generator so lessons replay
        // independently under a fixed seed
        let rng = SmallRng::from_rng(&mut self.rng).unwrap();
        self.session = Some(LessonSession::new(plan, delays, rng));
        self.screen = AppScreen::Lesson;
    }

    /// Jump straight into a lesson by id (the `--lesson` flag).
    pub fn open_lesson_id(&mut self, id: u32) {
        if let Some(index) = content::all_lessons().iter().position(|p| p.id == id) {
            self.selected = index;
            self.open_lesson(index);
        }
    }

    /// Abandon the active session. Its pending timers go with it; only
    /// completion was ever persisted.
    pub fn leave_lesson(&mut self) {
        self.session = None;
        self.screen = AppScreen::Home;
    }

    /// The Enter action, routed by the current lesson screen.
    pub fn lesson_primary(&mut self, now: Instant) {
        if self.session.as_ref().is_some_and(|s| s.is_finished()) {
            self.leave_lesson();
            return;
        }
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.screen {
            Screen::Intro => session.advance(Screen::Intro, now),
            Screen::Learn => session.advance(Screen::Learn, now),
            Screen::Activity => session.advance(Screen::Activity, now),
            Screen::Results => session.advance(Screen::Results, now),
            Screen::Reflection => {
                if session.reflection_choice.is_some() {
                    session.complete(&mut self.store);
                }
            }
            _ => {}
        }
    }

    /// A number key, routed by the current lesson screen: quiz answers,
    /// category choices, collect actions, reflection options.
    pub fn lesson_choice(&mut self, index: usize, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.screen {
            Screen::Precheck => session.answer_quiz(Screen::Precheck, index, now),
            Screen::Midcheck => session.answer_quiz(Screen::Midcheck, index, now),
            Screen::Reflection => session.reflect(index),
            Screen::Activity => {
                let Some(category) = session.plan.categories.get(index) else {
                    return;
                };
                let id = category.id;
                match session.current_stage_plan().kind {
                    StageKind::Collect { .. } => session.add_example(id),
                    _ => session.submit(id, now),
                }
            }
            _ => {}
        }
    }

    pub fn on_tick(&mut self, now: Instant) {
        if let Some(session) = self.session.as_mut() {
            session.poll(now);
        }
    }

    pub fn take_cues(&mut self) -> Vec<SoundCue> {
        match self.session.as_mut() {
            Some(session) => session.take_cues(),
            None => Vec::new(),
        }
    }

    pub fn toggle_sound(&mut self) {
        let enabled = self.store.sound_enabled();
        self.store.set_sound_enabled(!enabled);
    }

    pub fn reset_progress(&mut self) {
        self.store.reset();
    }

    fn delays_for(&self, plan: &LessonPlan) -> Delays {
        Delays {
            feedback: Duration::from_millis(
                self.config
                    .feedback_delay_ms
                    .unwrap_or(plan.activity.feedback_delay_ms),
            ),
            thinking: Duration::from_millis(
                self.config
                    .thinking_delay_ms
                    .unwrap_or(plan.activity.thinking_delay_ms),
            ),
            training_tick: Duration::from_millis(self.config.training_tick_ms),
        }
    }
}
