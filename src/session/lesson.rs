use std::time::{Duration, Instant};

use rand::rngs::SmallRng;

use crate::content::LessonPlan;
use crate::engine::model::ModelPolicy;
use crate::session::SoundCue;
use crate::session::activity::{
    ActivityState, PredictPhase, PredictStyle, StageKind, StagePlan, StageState, collect_done,
};
use crate::session::screen::Screen;
use crate::session::timer::{Task, TaskQueue};
use crate::session::trial::{Category, TrialItem, TrialRecord};
use crate::store::progress::ProgressStore;

/// How long quiz feedback stays on screen before the lesson moves on.
const QUIZ_FEEDBACK: Duration = Duration::from_millis(2000);

/// One increment of a simulated training run.
const TRAINING_STEP: u8 = 10;

/// Effective timer lengths for a session (plan defaults, possibly
/// overridden by config).
#[derive(Clone, Copy, Debug)]
pub struct Delays {
    pub feedback: Duration,
    pub thinking: Duration,
    pub training_tick: Duration,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScoreCounters {
    pub correct: u32,
    pub classified: u32,
}

/// Short-lived robot message shown after a submission.
#[derive(Clone, Debug)]
pub struct Feedback {
    pub text: String,
    pub correct: bool,
}

/// Per-lesson session state. Created when the learner opens a lesson and
/// dropped when they leave it; only the completion fact outlives it.
/// Dropping the session also drops its pending timers.
pub struct LessonSession {
    pub plan: &'static LessonPlan,
    pub screen: Screen,
    pub activity: ActivityState,
    pub counters: ScoreCounters,
    pub feedback: Option<Feedback>,
    pub records: Vec<TrialRecord>,
    pub quiz_choice: Option<usize>,
    pub reflection_choice: Option<usize>,
    delays: Delays,
    tasks: TaskQueue,
    rng: SmallRng,
    cues: Vec<SoundCue>,
    midcheck_item_done: bool,
    midchecks_fired: Vec<usize>,
    pending_stage: Option<usize>,
}

impl LessonSession {
    pub fn new(plan: &'static LessonPlan, delays: Delays, rng: SmallRng) -> Self {
        let first = plan.activity.stages[0];
        Self {
            plan,
            screen: Screen::Intro,
            activity: ActivityState {
                stage_index: 0,
                stage: first.initial_state(),
            },
            counters: ScoreCounters::default(),
            feedback: None,
            records: Vec::new(),
            quiz_choice: None,
            reflection_choice: None,
            delays,
            tasks: TaskQueue::new(),
            rng,
            cues: Vec::new(),
            midcheck_item_done: false,
            midchecks_fired: Vec::new(),
            pending_stage: None,
        }
    }

    /// Move to the next screen. Ignored when `from` no longer matches the
    /// current screen, so a stale trigger can never move the lesson.
    pub fn advance(&mut self, from: Screen, now: Instant) {
        if from != self.screen {
            return;
        }
        match self.screen {
            Screen::Intro => self.screen = Screen::Learn,
            Screen::Learn => self.screen = Screen::Precheck,
            Screen::Activity => self.advance_activity(now),
            Screen::Results => self.screen = Screen::Reflection,
            // quiz screens advance through their feedback timer; reflection
            // finishes through complete(); completion is terminal
            _ => {}
        }
    }

    /// Answer the precheck or midcheck question. A second answer while the
    /// feedback is still showing is ignored.
    pub fn answer_quiz(&mut self, from: Screen, option: usize, now: Instant) {
        if from != self.screen || self.feedback.is_some() {
            return;
        }
        let quiz = match self.screen {
            Screen::Precheck => self.plan.precheck,
            Screen::Midcheck => match self.plan.midcheck {
                Some(quiz) => quiz,
                None => return,
            },
            _ => return,
        };
        if option >= quiz.options.len() {
            return;
        }
        let correct = option == quiz.answer;
        self.quiz_choice = Some(option);
        self.feedback = Some(Feedback {
            text: if correct {
                quiz.correct_msg.to_string()
            } else {
                quiz.incorrect_msg.to_string()
            },
            correct,
        });
        self.cue(if correct {
            SoundCue::Correct
        } else {
            SoundCue::Click
        });
        self.tasks
            .schedule(now + QUIZ_FEEDBACK, Task::QuizAdvance { from: self.screen });
    }

    /// Resolve the current trial with the learner's choice. Ignored while
    /// feedback for the current item is pending (at most one resolved
    /// submission per item) and on stages that take no choice.
    pub fn submit(&mut self, choice: Category, now: Instant) {
        if self.screen != Screen::Activity || self.feedback.is_some() {
            return;
        }
        let stage_index = self.activity.stage_index;
        let stage = self.plan.activity.stages[stage_index];
        match stage.kind {
            StageKind::Classify { deck, .. } => {
                let index = match &self.activity.stage {
                    StageState::Classify { index } => *index,
                    _ => return,
                };
                let Some(item) = deck.get(index).copied() else {
                    return;
                };
                let correct = item.category == choice;
                self.counters.classified += 1;
                if correct {
                    self.counters.correct += 1;
                }
                let text = if correct {
                    format!(
                        "Yes! {} is {}. Great work!",
                        item.name,
                        self.plan.category_label(choice)
                    )
                } else {
                    format!(
                        "Hmm, {} is actually {}. Keep going!",
                        item.name,
                        self.plan.category_label(item.category)
                    )
                };
                self.records
                    .push(TrialRecord::learner(stage.label, item, choice));
                self.feedback = Some(Feedback { text, correct });
                self.cue(if correct {
                    SoundCue::Correct
                } else {
                    SoundCue::Click
                });
                self.tasks
                    .schedule(now + self.delays.feedback, Task::ClearFeedback { item: index });
            }
            StageKind::Predict {
                deck,
                style: PredictStyle::StudentFirst,
                ..
            } => {
                let index = match &self.activity.stage {
                    StageState::Predict {
                        index,
                        phase: PredictPhase::Await,
                        ..
                    } => *index,
                    _ => return,
                };
                if index >= deck.len() {
                    return;
                }
                self.activity.stage = StageState::Predict {
                    index,
                    phase: PredictPhase::Thinking,
                    guess: Some(choice),
                };
                self.cue(SoundCue::Click);
                self.tasks.schedule(
                    now + self.delays.thinking,
                    Task::RevealPrediction {
                        stage: stage_index,
                        item: index,
                    },
                );
            }
            _ => {}
        }
    }

    /// Add one training example during a collect stage. Saturates at the
    /// category's goal count.
    pub fn add_example(&mut self, category: Category) {
        if self.screen != Screen::Activity {
            return;
        }
        let stage = self.plan.activity.stages[self.activity.stage_index];
        let StageKind::Collect { goals } = stage.kind else {
            return;
        };
        let Some(slot) = goals.iter().position(|(cat, _)| *cat == category) else {
            return;
        };
        let goal = goals[slot].1;
        let mut added = false;
        if let StageState::Collect { counts } = &mut self.activity.stage {
            if counts[slot] < goal {
                counts[slot] += 1;
                added = true;
            }
        }
        if added {
            self.cue(SoundCue::Click);
        }
    }

    /// Pick a reflection option. Any choice is valid; `complete` finishes.
    pub fn reflect(&mut self, option: usize) {
        if self.screen != Screen::Reflection {
            return;
        }
        if option < self.plan.reflection.options.len() {
            self.reflection_choice = Some(option);
            self.cue(SoundCue::Click);
        }
    }

    /// Finish the lesson: persist completion and move to the final screen.
    /// This is the only place the progress store is written.
    pub fn complete(&mut self, store: &mut ProgressStore) {
        if self.screen != Screen::Reflection {
            return;
        }
        store.mark_completed(self.plan.id);
        self.cue(SoundCue::Celebrate);
        self.screen = Screen::Completion;
    }

    /// Fire every timer that has come due. Tasks that no longer match the
    /// current screen, stage, or item are dropped silently.
    pub fn poll(&mut self, now: Instant) {
        for task in self.tasks.pop_due(now) {
            self.handle_task(task, now);
        }
    }

    /// The "lesson finished" signal for the outer navigation layer.
    pub fn is_finished(&self) -> bool {
        self.screen == Screen::Completion
    }

    /// Integer 0-100; non-decreasing over the life of the session.
    pub fn progress_percent(&self) -> u8 {
        self.plan
            .progress
            .percent(self.screen, self.activity_fraction())
    }

    pub fn current_stage_plan(&self) -> StagePlan {
        self.plan.activity.stages[self.activity.stage_index]
    }

    /// The deck item currently on screen, if the stage shows one.
    pub fn current_trial(&self) -> Option<TrialItem> {
        let stage = self.current_stage_plan();
        match (stage.kind, &self.activity.stage) {
            (StageKind::Classify { deck, .. }, StageState::Classify { index }) => {
                deck.get(*index).copied()
            }
            (StageKind::Predict { deck, .. }, StageState::Predict { index, .. }) => {
                deck.get(*index).copied()
            }
            _ => None,
        }
    }

    /// Number of resolved trials recorded for a stage label.
    pub fn stage_resolved(&self, label: &str) -> usize {
        self.records.iter().filter(|r| r.stage == label).count()
    }

    /// Drain sound cues accumulated since the last call.
    pub fn take_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }

    #[cfg(test)]
    pub fn has_pending_tasks(&self) -> bool {
        !self.tasks.is_empty()
    }

    fn cue(&mut self, cue: SoundCue) {
        self.cues.push(cue);
    }

    /// Fraction of the activity's total work already done, weighing each
    /// stage by its unit count. Never decreases: records, collect counts
    /// and training percent only grow, and finished stages count in full.
    fn activity_fraction(&self) -> f64 {
        let stages = self.plan.activity.stages;
        let mut total = 0.0;
        let mut done = 0.0;
        for (i, stage) in stages.iter().enumerate() {
            let units = stage.units();
            total += units;
            if i < self.activity.stage_index {
                done += units;
            } else if i == self.activity.stage_index {
                done += self.stage_done_units(stage);
            }
        }
        if total <= 0.0 { 0.0 } else { (done / total).clamp(0.0, 1.0) }
    }

    fn stage_done_units(&self, stage: &StagePlan) -> f64 {
        match (stage.kind, &self.activity.stage) {
            (StageKind::Classify { .. }, _) | (StageKind::Predict { .. }, _) => {
                self.stage_resolved(stage.label) as f64
            }
            (StageKind::Collect { .. }, StageState::Collect { counts }) => {
                counts.iter().map(|c| *c as f64).sum()
            }
            (StageKind::Train { .. }, StageState::Train { percent }) => *percent as f64 / 100.0,
            _ => 0.0,
        }
    }

    fn advance_activity(&mut self, now: Instant) {
        let stage_index = self.activity.stage_index;
        let stage = self.plan.activity.stages[stage_index];
        match stage.kind {
            StageKind::Collect { goals } => {
                let ready = match &self.activity.stage {
                    StageState::Collect { counts } => collect_done(goals, counts),
                    _ => false,
                };
                if ready {
                    self.enter_stage(stage_index + 1, now);
                }
            }
            StageKind::Review { .. } => self.enter_stage(stage_index + 1, now),
            StageKind::Predict { deck, style, .. } => match style {
                // batch stages sit in review state once resolved
                PredictStyle::Batch => self.enter_stage(stage_index + 1, now),
                PredictStyle::Reveal => match &self.activity.stage {
                    StageState::Predict {
                        index,
                        phase: PredictPhase::Await,
                        ..
                    } => {
                        let index = *index;
                        if index < deck.len() {
                            self.activity.stage = StageState::Predict {
                                index,
                                phase: PredictPhase::Thinking,
                                guess: None,
                            };
                            self.cue(SoundCue::Click);
                            self.tasks.schedule(
                                now + self.delays.thinking,
                                Task::RevealPrediction {
                                    stage: stage_index,
                                    item: index,
                                },
                            );
                        }
                    }
                    StageState::Predict {
                        index,
                        phase: PredictPhase::Revealed,
                        ..
                    } => self.next_prediction(*index, deck.len(), now),
                    _ => {}
                },
                PredictStyle::StudentFirst => {
                    if let StageState::Predict {
                        index,
                        phase: PredictPhase::Revealed,
                        ..
                    } = &self.activity.stage
                    {
                        self.next_prediction(*index, deck.len(), now);
                    }
                }
            },
            // classify and train stages advance on their own timers
            _ => {}
        }
    }

    fn next_prediction(&mut self, index: usize, deck_len: usize, now: Instant) {
        let next = index + 1;
        if next >= deck_len {
            self.enter_stage(self.activity.stage_index + 1, now);
        } else {
            self.activity.stage = StageState::Predict {
                index: next,
                phase: PredictPhase::Await,
                guess: None,
            };
        }
    }

    fn enter_stage(&mut self, idx: usize, now: Instant) {
        // between-stage checks divert to the midcheck screen, once each
        if self.plan.midcheck_before_stage.contains(&idx)
            && self.plan.midcheck.is_some()
            && !self.midchecks_fired.contains(&idx)
        {
            self.midchecks_fired.push(idx);
            self.pending_stage = Some(idx);
            self.screen = Screen::Midcheck;
            return;
        }
        let stages = self.plan.activity.stages;
        if idx >= stages.len() {
            self.screen = Screen::Results;
            return;
        }
        self.activity.stage_index = idx;
        let stage = stages[idx];
        self.activity.stage = stage.initial_state();
        match stage.kind {
            StageKind::Train { .. } => {
                self.tasks.schedule(
                    now + self.delays.training_tick,
                    Task::TrainingTick { stage: idx },
                );
            }
            StageKind::Predict {
                deck,
                model,
                style: PredictStyle::Batch,
            } => self.resolve_batch(stage.label, deck, model),
            _ => {}
        }
    }

    fn resolve_batch(&mut self, label: &'static str, deck: &[TrialItem], model: ModelPolicy) {
        let options = self.plan.category_ids();
        for (i, item) in deck.iter().enumerate() {
            let predicted = model.predict(i, item, &options, &mut self.rng);
            self.records
                .push(TrialRecord::model(label, *item, predicted, None));
        }
    }

    fn handle_task(&mut self, task: Task, now: Instant) {
        match task {
            Task::ClearFeedback { item } => self.finish_classify_item(item, now),
            Task::QuizAdvance { from } => self.finish_quiz(from, now),
            Task::RevealPrediction { stage, item } => self.reveal_prediction(stage, item),
            Task::TrainingTick { stage } => self.training_tick(stage, now),
        }
    }

    fn finish_classify_item(&mut self, item: usize, now: Instant) {
        if self.screen != Screen::Activity {
            return;
        }
        let stage_index = self.activity.stage_index;
        let stage = self.plan.activity.stages[stage_index];
        let StageKind::Classify {
            deck,
            midcheck_after,
        } = stage.kind
        else {
            return;
        };
        let index = match &self.activity.stage {
            StageState::Classify { index } => *index,
            _ => return,
        };
        if index != item {
            return;
        }
        self.feedback = None;
        let next = index + 1;
        self.activity.stage = StageState::Classify { index: next };
        if let Some(threshold) = midcheck_after {
            if next == threshold && self.plan.midcheck.is_some() && !self.midcheck_item_done {
                self.midcheck_item_done = true;
                self.pending_stage = None;
                self.screen = Screen::Midcheck;
                return;
            }
        }
        if next >= deck.len() {
            self.enter_stage(stage_index + 1, now);
        }
    }

    fn finish_quiz(&mut self, from: Screen, now: Instant) {
        if self.screen != from {
            return;
        }
        self.feedback = None;
        self.quiz_choice = None;
        match from {
            Screen::Precheck => {
                self.screen = Screen::Activity;
                self.enter_stage(0, now);
            }
            Screen::Midcheck => {
                self.screen = Screen::Activity;
                if let Some(idx) = self.pending_stage.take() {
                    self.enter_stage(idx, now);
                }
            }
            _ => {}
        }
    }

    fn reveal_prediction(&mut self, stage: usize, item: usize) {
        if self.screen != Screen::Activity || self.activity.stage_index != stage {
            return;
        }
        let plan_stage = self.plan.activity.stages[stage];
        let StageKind::Predict { deck, model, .. } = plan_stage.kind else {
            return;
        };
        let (index, guess) = match &self.activity.stage {
            StageState::Predict {
                index,
                phase: PredictPhase::Thinking,
                guess,
            } => (*index, *guess),
            _ => return,
        };
        if index != item || index >= deck.len() {
            return;
        }
        let trial = deck[index];
        let options = self.plan.category_ids();
        let predicted = model.predict(index, &trial, &options, &mut self.rng);
        let record = TrialRecord::model(plan_stage.label, trial, predicted, guess);
        let correct = record.correct;
        self.records.push(record);
        self.activity.stage = StageState::Predict {
            index,
            phase: PredictPhase::Revealed,
            guess,
        };
        self.cue(if correct {
            SoundCue::Correct
        } else {
            SoundCue::Wrong
        });
    }

    fn training_tick(&mut self, stage: usize, now: Instant) {
        if self.screen != Screen::Activity || self.activity.stage_index != stage {
            return;
        }
        let percent = match &self.activity.stage {
            StageState::Train { percent } => *percent,
            _ => return,
        };
        let next = percent.saturating_add(TRAINING_STEP).min(100);
        self.activity.stage = StageState::Train { percent: next };
        if next >= 100 {
            self.enter_stage(stage + 1, now);
        } else {
            self.tasks.schedule(
                now + self.delays.training_tick,
                Task::TrainingTick { stage },
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use rand::SeedableRng;

    use super::*;
    use crate::content;
    use crate::engine::stats;
    use crate::store::progress::ProgressStore;

    fn delays() -> Delays {
        Delays {
            feedback: Duration::from_millis(1500),
            thinking: Duration::from_millis(1000),
            training_tick: Duration::from_millis(200),
        }
    }

    fn session(id: u32) -> LessonSession {
        let plan = content::lesson_by_id(id).unwrap();
        LessonSession::new(plan, delays(), SmallRng::seed_from_u64(7))
    }

    /// Walk intro -> learn -> precheck -> activity.
    fn open_activity(session: &mut LessonSession, t: &mut Instant) {
        session.advance(Screen::Intro, *t);
        session.advance(Screen::Learn, *t);
        session.answer_quiz(Screen::Precheck, session.plan.precheck.answer, *t);
        *t += QUIZ_FEEDBACK;
        session.poll(*t);
        assert_eq!(session.screen, Screen::Activity);
    }

    /// Submit a choice and let the feedback timer run out.
    fn classify(session: &mut LessonSession, choice: Category, t: &mut Instant) {
        session.submit(choice, *t);
        *t += delays().feedback;
        session.poll(*t);
    }

    /// Answer whatever quiz screen is showing and let it advance.
    fn pass_midcheck(session: &mut LessonSession, t: &mut Instant) {
        assert_eq!(session.screen, Screen::Midcheck);
        let answer = session.plan.midcheck.unwrap().answer;
        session.answer_quiz(Screen::Midcheck, answer, *t);
        *t += QUIZ_FEEDBACK;
        session.poll(*t);
    }

    /// Run a training stage to 100%.
    fn run_training(session: &mut LessonSession, t: &mut Instant) {
        for _ in 0..10 {
            *t += delays().training_tick;
            session.poll(*t);
        }
    }

    #[test]
    fn session_starts_at_intro_with_zero_progress() {
        let session = session(2);
        assert_eq!(session.screen, Screen::Intro);
        assert_eq!(session.progress_percent(), 0);
        assert_eq!(session.counters, ScoreCounters::default());
    }

    #[test]
    fn stale_advance_never_moves_the_screen() {
        let mut session = session(2);
        let t = Instant::now();
        session.advance(Screen::Results, t);
        session.advance(Screen::Activity, t);
        assert_eq!(session.screen, Screen::Intro);
    }

    #[test]
    fn double_submission_is_ignored_while_feedback_shows() {
        let mut session = session(2);
        let mut t = Instant::now();
        open_activity(&mut session, &mut t);

        session.submit("healthy", t);
        let records = session.records.len();
        let counters = session.counters;
        // second submission before the feedback delay elapses
        session.submit("treat", t + Duration::from_millis(200));
        assert_eq!(session.records.len(), records);
        assert_eq!(session.counters, counters);
    }

    #[test]
    fn feedback_timer_from_previous_item_cannot_skip_the_next_one() {
        let mut session = session(2);
        let mut t = Instant::now();
        open_activity(&mut session, &mut t);
        classify(&mut session, "healthy", &mut t);
        // a duplicate clear for item 0 arriving late must not advance item 1
        session.handle_task(Task::ClearFeedback { item: 0 }, t);
        assert!(matches!(
            session.activity.stage,
            StageState::Classify { index: 1 }
        ));
    }

    #[test]
    fn binary_lesson_perfect_run_reaches_completion() {
        let mut session = session(2);
        let mut t = Instant::now();
        let mut store = ProgressStore::in_memory();
        let deck = match session.plan.activity.stages[0].kind {
            StageKind::Classify { deck, .. } => deck,
            _ => unreachable!(),
        };
        assert_eq!(deck.len(), 12);

        let mut last_percent = session.progress_percent();
        open_activity(&mut session, &mut t);

        for item in deck {
            if session.screen == Screen::Midcheck {
                pass_midcheck(&mut session, &mut t);
            }
            classify(&mut session, item.category, &mut t);
            let percent = session.progress_percent();
            assert!(percent >= last_percent);
            last_percent = percent;
        }

        assert_eq!(session.counters.correct, 12);
        assert_eq!(session.counters.classified, 12);
        assert_eq!(stats::percent(session.counters.correct as usize, 12), 100);
        assert_eq!(session.screen, Screen::Results);

        session.advance(Screen::Results, t);
        session.reflect(2);
        session.complete(&mut store);
        assert!(session.is_finished());
        assert_eq!(session.progress_percent(), 100);
        assert!(store.is_completed(2));
    }

    #[test]
    fn counters_respect_the_deck_invariant() {
        let mut session = session(1);
        let mut t = Instant::now();
        open_activity(&mut session, &mut t);
        // answer everything with the same bin: some right, some wrong
        for _ in 0..10 {
            if session.screen == Screen::Midcheck {
                pass_midcheck(&mut session, &mut t);
            }
            classify(&mut session, "animals", &mut t);
            assert!(session.counters.correct <= session.counters.classified);
            assert!(session.counters.classified <= 10);
        }
        assert_eq!(session.counters.classified, 10);
        assert_eq!(session.counters.correct, 4);
        assert_eq!(session.screen, Screen::Results);
    }

    #[test]
    fn midcheck_interrupts_classification_once() {
        let mut session = session(2);
        let mut t = Instant::now();
        open_activity(&mut session, &mut t);
        for _ in 0..6 {
            classify(&mut session, "healthy", &mut t);
        }
        assert_eq!(session.screen, Screen::Midcheck);
        // progress shown on the midcheck matches the interrupted activity
        assert_eq!(session.progress_percent(), 20 + 4 * 6);
        pass_midcheck(&mut session, &mut t);
        assert_eq!(session.screen, Screen::Activity);
    }

    #[test]
    fn bias_lesson_shows_imbalance_then_convergence() {
        // aggregate over seeds; individual runs are noisy by design
        let plan = content::lesson_by_id(3).unwrap();
        let mut biased_circle = 0u32;
        let mut biased_triangle = 0u32;
        let mut fair_circle = 0u32;
        let mut fair_triangle = 0u32;
        for seed in 0..40 {
            let mut session = LessonSession::new(plan, delays(), SmallRng::seed_from_u64(seed));
            let mut t = Instant::now();
            let mut store = ProgressStore::in_memory();
            open_activity(&mut session, &mut t);

            for _ in 0..2 {
                // collect until every goal is met, then train
                loop {
                    let stage = session.current_stage_plan();
                    let StageKind::Collect { goals } = stage.kind else {
                        unreachable!()
                    };
                    let full = match &session.activity.stage {
                        StageState::Collect { counts } => collect_done(goals, counts),
                        _ => false,
                    };
                    if full {
                        break;
                    }
                    for &(cat, _) in goals {
                        session.add_example(cat);
                    }
                }
                session.advance(Screen::Activity, t);
                run_training(&mut session, &mut t);
                // batch predictions landed; move past the review
                session.advance(Screen::Activity, t);
            }
            assert_eq!(session.screen, Screen::Results);
            biased_circle += stats::accuracy_for(&session.records, "biased", Some("circle")) as u32;
            biased_triangle +=
                stats::accuracy_for(&session.records, "biased", Some("triangle")) as u32;
            fair_circle += stats::accuracy_for(&session.records, "fair", Some("circle")) as u32;
            fair_triangle +=
                stats::accuracy_for(&session.records, "fair", Some("triangle")) as u32;

            session.advance(Screen::Results, t);
            session.reflect(0);
            session.complete(&mut store);
            assert!(store.is_completed(3));
        }
        // 90% vs 30% success: circles must dominate triangles
        assert!(biased_circle > biased_triangle + 40 * 20);
        // 80% vs 80%: the gap closes
        let gap = (fair_circle as i64 - fair_triangle as i64).abs();
        assert!(gap < 40 * 20, "fair gap too large: {gap}");
    }

    #[test]
    fn detective_lesson_fires_between_round_checks() {
        let mut session = session(4);
        let mut t = Instant::now();
        open_activity(&mut session, &mut t);

        let mut midchecks = 0;
        for round in 0..3 {
            let stage = session.current_stage_plan();
            let StageKind::Collect { goals } = stage.kind else {
                panic!("round {round} should start with a collect stage");
            };
            for &(cat, goal) in goals {
                for _ in 0..goal {
                    session.add_example(cat);
                }
            }
            session.advance(Screen::Activity, t);
            run_training(&mut session, &mut t);
            session.advance(Screen::Activity, t);
            if session.screen == Screen::Midcheck {
                midchecks += 1;
                pass_midcheck(&mut session, &mut t);
            }
        }
        assert_eq!(midchecks, 2);
        assert_eq!(session.screen, Screen::Results);
        assert_eq!(session.stage_resolved("round-1"), 6);
        assert_eq!(session.stage_resolved("round-2"), 6);
        assert_eq!(session.stage_resolved("round-3"), 6);
    }

    #[test]
    fn evaluation_lesson_builds_a_full_confusion_matrix() {
        let mut session = session(5);
        let mut t = Instant::now();
        open_activity(&mut session, &mut t);

        // training phase: label all 12 weather cards
        let deck = match session.plan.activity.stages[0].kind {
            StageKind::Classify { deck, .. } => deck,
            _ => unreachable!(),
        };
        for item in deck {
            classify(&mut session, item.category, &mut t);
        }
        assert_eq!(session.counters.classified, 12);

        // testing phase: guess, wait for the model, step to the next item
        let test_deck = match session.plan.activity.stages[1].kind {
            StageKind::Predict { deck, .. } => deck,
            _ => unreachable!(),
        };
        for _ in 0..test_deck.len() {
            session.submit("sunny", t);
            assert!(matches!(
                session.activity.stage,
                StageState::Predict {
                    phase: PredictPhase::Thinking,
                    ..
                }
            ));
            t += delays().thinking;
            session.poll(t);
            assert!(matches!(
                session.activity.stage,
                StageState::Predict {
                    phase: PredictPhase::Revealed,
                    ..
                }
            ));
            session.advance(Screen::Activity, t);
        }
        assert_eq!(session.screen, Screen::Results);
        assert_eq!(session.stage_resolved("testing"), 6);

        let labels = session.plan.category_ids();
        let cm = stats::ConfusionMatrix::from_records(&labels, &session.records, "testing");
        assert_eq!(cm.total(), 6);
        // the scripted model gets 4 of 6 right
        assert_eq!(stats::accuracy_for(&session.records, "testing", None), 67);
        // every record carries the learner's guess
        assert!(
            session
                .records
                .iter()
                .filter(|r| r.stage == "testing")
                .all(|r| r.guess.is_some())
        );
    }

    #[test]
    fn adventure_lesson_improves_after_retraining() {
        let mut session = session(6);
        let mut t = Instant::now();
        open_activity(&mut session, &mut t);

        for stage_index in 0..session.plan.activity.stages.len() {
            assert_eq!(session.activity.stage_index, stage_index);
            let stage = session.plan.activity.stages[stage_index];
            match stage.kind {
                StageKind::Collect { goals } => {
                    for &(cat, goal) in goals {
                        for _ in 0..goal {
                            session.add_example(cat);
                        }
                    }
                    session.advance(Screen::Activity, t);
                }
                StageKind::Classify { deck, .. } => {
                    for item in deck {
                        classify(&mut session, item.category, &mut t);
                    }
                }
                StageKind::Train { .. } => run_training(&mut session, &mut t),
                StageKind::Predict { deck, .. } => {
                    for _ in 0..deck.len() {
                        session.advance(Screen::Activity, t); // run the test
                        t += delays().thinking;
                        session.poll(t);
                        session.advance(Screen::Activity, t); // next item
                    }
                }
                StageKind::Review { .. } => session.advance(Screen::Activity, t),
            }
            if session.screen == Screen::Results {
                break;
            }
        }
        assert_eq!(session.screen, Screen::Results);
        assert_eq!(stats::accuracy_for(&session.records, "test", None), 50);
        assert_eq!(stats::accuracy_for(&session.records, "retest", None), 100);
    }

    #[test]
    fn collect_saturates_at_the_goal() {
        let mut session = session(3);
        let mut t = Instant::now();
        open_activity(&mut session, &mut t);
        for _ in 0..20 {
            session.add_example("triangle");
        }
        match &session.activity.stage {
            StageState::Collect { counts } => assert_eq!(counts[1], 2),
            other => panic!("unexpected stage state {other:?}"),
        }
        // not every goal met yet, so the train action is refused
        session.advance(Screen::Activity, t);
        assert_eq!(session.activity.stage_index, 0);
    }

    #[test]
    fn leaving_a_lesson_drops_pending_timers() {
        let mut session = session(2);
        let mut t = Instant::now();
        open_activity(&mut session, &mut t);
        session.submit("healthy", t);
        assert!(session.has_pending_tasks());
        // navigating away = dropping the session; nothing to assert beyond
        // the drop compiling, but the queue going with it is the contract
        drop(session);
    }

    #[test]
    fn progress_is_monotonic_across_a_full_run() {
        let mut session = session(5);
        let mut t = Instant::now();
        let mut store = ProgressStore::in_memory();
        let mut last = session.progress_percent();
        let check = |s: &LessonSession, last: &mut u8| {
            let p = s.progress_percent();
            assert!(p >= *last, "progress went backward: {p} < {last}");
            *last = p;
        };

        session.advance(Screen::Intro, t);
        check(&session, &mut last);
        session.advance(Screen::Learn, t);
        check(&session, &mut last);
        session.answer_quiz(Screen::Precheck, 0, t);
        t += QUIZ_FEEDBACK;
        session.poll(t);
        check(&session, &mut last);

        let deck = match session.plan.activity.stages[0].kind {
            StageKind::Classify { deck, .. } => deck,
            _ => unreachable!(),
        };
        for item in deck {
            classify(&mut session, item.category, &mut t);
            check(&session, &mut last);
        }
        for _ in 0..6 {
            session.submit("rainy", t);
            t += delays().thinking;
            session.poll(t);
            check(&session, &mut last);
            session.advance(Screen::Activity, t);
        }
        session.advance(Screen::Results, t);
        check(&session, &mut last);
        session.reflect(1);
        session.complete(&mut store);
        check(&session, &mut last);
        assert_eq!(last, 100);
    }
}
