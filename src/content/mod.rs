//! Static lesson content: everything that varies between lessons lives in a
//! `LessonPlan`, so one generic session engine runs all of them.

pub mod lessons;

use crate::session::activity::ActivityPlan;
use crate::session::screen::ProgressMap;
use crate::session::trial::Category;

#[derive(Clone, Copy, Debug)]
pub struct CategoryDef {
    pub id: Category,
    pub label: &'static str,
    pub glyph: &'static str,
}

/// A single-question check (precheck before the activity, midcheck inside it).
#[derive(Clone, Copy, Debug)]
pub struct QuizPlan {
    pub question: &'static str,
    pub options: &'static [&'static str],
    /// Index of the right answer in `options`.
    pub answer: usize,
    pub correct_msg: &'static str,
    pub incorrect_msg: &'static str,
}

/// The self-assessment shown before completion. There is no right answer;
/// any choice finishes the lesson.
#[derive(Clone, Copy, Debug)]
pub struct ReflectPlan {
    pub title: &'static str,
    pub prompt: &'static str,
    pub options: &'static [&'static str],
}

/// Which aggregate the results screen leads with.
#[derive(Clone, Copy, Debug)]
pub enum ResultsView {
    /// Learner score out of the deck, optionally next to the robot's
    /// derived accuracy.
    Score { show_robot: bool },
    /// Per-category accuracy of two stages side by side.
    StagePair {
        first: &'static str,
        second: &'static str,
    },
    /// Overall accuracy of each listed stage, in order.
    Rounds(&'static [&'static str]),
    /// Confusion matrix over one stage's records.
    Matrix { stage: &'static str },
}

#[derive(Clone, Copy, Debug)]
pub struct LessonPlan {
    pub id: u32,
    pub title: &'static str,
    pub tagline: &'static str,
    pub intro: &'static str,
    pub goals: &'static [&'static str],
    pub learn_title: &'static str,
    pub learn_steps: &'static [(&'static str, &'static str)],
    pub precheck: QuizPlan,
    pub midcheck: Option<QuizPlan>,
    /// Stage indexes that trigger the midcheck before they are entered
    /// (between-round checks). Each fires at most once.
    pub midcheck_before_stage: &'static [usize],
    pub reflection: ReflectPlan,
    pub categories: &'static [CategoryDef],
    pub activity: ActivityPlan,
    pub progress: ProgressMap,
    pub results: ResultsView,
    pub insight: &'static str,
    pub takeaway: &'static str,
    pub completion_message: &'static str,
}

impl LessonPlan {
    pub fn category_label(&self, id: Category) -> &'static str {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.label)
            .unwrap_or(id)
    }

    pub fn category_ids(&self) -> Vec<Category> {
        self.categories.iter().map(|c| c.id).collect()
    }
}

pub fn all_lessons() -> &'static [LessonPlan] {
    lessons::all()
}

#[allow(dead_code)] // Used by tests
pub fn lesson_by_id(id: u32) -> Option<&'static LessonPlan> {
    lessons::all().iter().find(|plan| plan.id == id)
}
