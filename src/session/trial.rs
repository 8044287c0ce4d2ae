/// Category identifier used in lesson content tables ("healthy", "circle", ...).
pub type Category = &'static str;

/// One exercise item drawn from a lesson's static content table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrialItem {
    pub name: &'static str,
    pub category: Category,
    pub glyph: &'static str,
}

/// The resolved outcome of one trial. Append-only: once created the stored
/// actual/predicted values never change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TrialRecord {
    /// Label of the activity stage that produced this record.
    pub stage: &'static str,
    pub item: &'static str,
    pub actual: Category,
    /// The learner's choice (classification trials) or the simulated
    /// model's output (prediction trials).
    pub predicted: Category,
    /// The learner's guess of the model output, when the lesson asks for one.
    pub guess: Option<Category>,
    pub correct: bool,
}

impl TrialRecord {
    /// A trial resolved by the learner's own choice.
    pub fn learner(stage: &'static str, item: TrialItem, choice: Category) -> Self {
        Self {
            stage,
            item: item.name,
            actual: item.category,
            predicted: choice,
            guess: None,
            correct: choice == item.category,
        }
    }

    /// A trial resolved by a simulated model prediction.
    pub fn model(
        stage: &'static str,
        item: TrialItem,
        predicted: Category,
        guess: Option<Category>,
    ) -> Self {
        Self {
            stage,
            item: item.name,
            actual: item.category,
            predicted,
            guess,
            correct: predicted == item.category,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const APPLE: TrialItem = TrialItem {
        name: "Apple",
        category: "healthy",
        glyph: "🍎",
    };

    #[test]
    fn learner_record_derives_correctness() {
        let hit = TrialRecord::learner("sorting", APPLE, "healthy");
        assert!(hit.correct);
        let miss = TrialRecord::learner("sorting", APPLE, "treat");
        assert!(!miss.correct);
        assert_eq!(miss.actual, "healthy");
        assert_eq!(miss.predicted, "treat");
    }

    #[test]
    fn model_record_keeps_guess() {
        let rec = TrialRecord::model("testing", APPLE, "treat", Some("healthy"));
        assert!(!rec.correct);
        assert_eq!(rec.guess, Some("healthy"));
    }
}
