use crate::engine::model::ModelPolicy;
use crate::session::trial::{Category, TrialItem};

/// How a prediction stage presents the model's output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredictStyle {
    /// The whole deck is resolved the moment the stage is entered and the
    /// results stay on screen until the learner moves on.
    Batch,
    /// The learner runs one test at a time; a pending delay produces the
    /// model's answer.
    Reveal,
    /// The learner first guesses what the model will output, then a
    /// "thinking" delay produces the prediction.
    StudentFirst,
}

/// One step of a lesson's hands-on activity.
#[derive(Clone, Copy, Debug)]
pub enum StageKind {
    /// Present deck items one at a time; the learner picks a category for
    /// each. `midcheck_after` diverts to the midcheck screen once, after
    /// that many items have been resolved.
    Classify {
        deck: &'static [TrialItem],
        midcheck_after: Option<usize>,
    },
    /// Build a training set: the learner adds examples per category until
    /// every goal count is reached.
    Collect { goals: &'static [(Category, u32)] },
    /// A simulated training run driven by repeated timer ticks.
    Train { caption: &'static str },
    /// Model predictions over a deck.
    Predict {
        deck: &'static [TrialItem],
        model: ModelPolicy,
        style: PredictStyle,
    },
    /// A static beat in the narrative; waits for an explicit advance.
    Review { caption: &'static str },
}

#[derive(Clone, Copy, Debug)]
pub struct StagePlan {
    /// Groups this stage's trial records for end-of-lesson aggregates.
    pub label: &'static str,
    pub kind: StageKind,
}

#[derive(Clone, Copy, Debug)]
pub struct ActivityPlan {
    pub stages: &'static [StagePlan],
    /// How long classify feedback stays on screen.
    pub feedback_delay_ms: u64,
    /// How long the simulated model "thinks" before revealing a prediction.
    pub thinking_delay_ms: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredictPhase {
    Await,
    Thinking,
    Revealed,
}

/// Mutable state of the stage currently on screen.
#[derive(Clone, Debug)]
pub enum StageState {
    Classify { index: usize },
    Collect { counts: Vec<u32> },
    Train { percent: u8 },
    Predict {
        index: usize,
        phase: PredictPhase,
        guess: Option<Category>,
    },
    Review,
}

#[derive(Clone, Debug)]
pub struct ActivityState {
    pub stage_index: usize,
    pub stage: StageState,
}

impl StagePlan {
    /// Progress weight of this stage: one unit per item/example, one for
    /// a whole training run or review beat.
    pub fn units(&self) -> f64 {
        match self.kind {
            StageKind::Classify { deck, .. } => deck.len() as f64,
            StageKind::Collect { goals } => {
                goals.iter().map(|(_, n)| *n as f64).sum()
            }
            StageKind::Predict { deck, .. } => deck.len() as f64,
            StageKind::Train { .. } | StageKind::Review { .. } => 1.0,
        }
    }

    /// Initial state for entering this stage.
    pub fn initial_state(&self) -> StageState {
        match self.kind {
            StageKind::Classify { .. } => StageState::Classify { index: 0 },
            StageKind::Collect { goals } => StageState::Collect {
                counts: vec![0; goals.len()],
            },
            StageKind::Train { .. } => StageState::Train { percent: 0 },
            StageKind::Predict {
                style: PredictStyle::Batch,
                ..
            }
            | StageKind::Review { .. } => StageState::Review,
            StageKind::Predict { .. } => StageState::Predict {
                index: 0,
                phase: PredictPhase::Await,
                guess: None,
            },
        }
    }
}

/// True when every collect goal is met.
pub fn collect_done(goals: &[(Category, u32)], counts: &[u32]) -> bool {
    goals
        .iter()
        .zip(counts)
        .all(|((_, goal), count)| count >= goal)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DECK: [TrialItem; 2] = [
        TrialItem {
            name: "Cat",
            category: "animals",
            glyph: "🐱",
        },
        TrialItem {
            name: "Apple",
            category: "food",
            glyph: "🍎",
        },
    ];

    #[test]
    fn stage_units_count_items_and_goals() {
        let classify = StagePlan {
            label: "sorting",
            kind: StageKind::Classify {
                deck: &DECK,
                midcheck_after: None,
            },
        };
        assert_eq!(classify.units(), 2.0);

        let collect = StagePlan {
            label: "gather",
            kind: StageKind::Collect {
                goals: &[("circle", 6), ("triangle", 2)],
            },
        };
        assert_eq!(collect.units(), 8.0);

        let train = StagePlan {
            label: "gather",
            kind: StageKind::Train { caption: "..." },
        };
        assert_eq!(train.units(), 1.0);
    }

    #[test]
    fn batch_predict_enters_in_review_state() {
        let stage = StagePlan {
            label: "round-1",
            kind: StageKind::Predict {
                deck: &DECK,
                model: ModelPolicy::Scripted(&[]),
                style: PredictStyle::Batch,
            },
        };
        assert!(matches!(stage.initial_state(), StageState::Review));
    }

    #[test]
    fn collect_done_requires_every_goal() {
        let goals = [("circle", 2u32), ("triangle", 1u32)];
        assert!(!collect_done(&goals, &[2, 0]));
        assert!(!collect_done(&goals, &[1, 1]));
        assert!(collect_done(&goals, &[2, 1]));
    }
}
