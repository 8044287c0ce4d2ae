use crate::session::trial::{Category, TrialRecord};

/// Rounded percentage, 0 when the denominator is 0.
pub fn percent(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as u8
}

/// Accuracy over the records of one activity stage, optionally restricted
/// to a single true category.
pub fn accuracy_for(records: &[TrialRecord], stage: &str, category: Option<Category>) -> u8 {
    let mut correct = 0;
    let mut total = 0;
    for rec in records {
        if rec.stage != stage {
            continue;
        }
        if let Some(cat) = category {
            if rec.actual != cat {
                continue;
            }
        }
        total += 1;
        if rec.correct {
            correct += 1;
        }
    }
    percent(correct, total)
}

/// The robot's displayed accuracy in labeling lessons: it "learns" from the
/// learner's correct labels, clamped to a believable 50..=95 range.
pub fn mimic_accuracy(correct_labels: u32) -> u8 {
    (60 + correct_labels * 3).clamp(50, 95) as u8
}

/// Actual-vs-predicted counts over one stage's records, in category order.
#[derive(Clone, Debug)]
pub struct ConfusionMatrix {
    pub labels: Vec<Category>,
    pub counts: Vec<Vec<u32>>,
}

impl ConfusionMatrix {
    pub fn from_records(labels: &[Category], records: &[TrialRecord], stage: &str) -> Self {
        let mut counts = vec![vec![0u32; labels.len()]; labels.len()];
        for rec in records.iter().filter(|r| r.stage == stage) {
            let actual = labels.iter().position(|c| *c == rec.actual);
            let predicted = labels.iter().position(|c| *c == rec.predicted);
            if let (Some(a), Some(p)) = (actual, predicted) {
                counts[a][p] += 1;
            }
        }
        Self {
            labels: labels.to_vec(),
            counts,
        }
    }

    pub fn get(&self, actual: Category, predicted: Category) -> u32 {
        let a = self.labels.iter().position(|c| *c == actual);
        let p = self.labels.iter().position(|c| *c == predicted);
        match (a, p) {
            (Some(a), Some(p)) => self.counts[a][p],
            _ => 0,
        }
    }

    /// Sum of all cells; equals the number of records counted.
    pub fn total(&self) -> u32 {
        self.counts.iter().flatten().sum()
    }
}
