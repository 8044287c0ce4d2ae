use rand::Rng;
use rand::rngs::SmallRng;

use crate::session::trial::{Category, TrialItem};

/// A stand-in for a trained model. No learning happens anywhere in this
/// crate; predictions are either scripted per item or drawn with a
/// per-category success probability.
///
/// All randomness flows through the caller's generator so seeded sessions
/// replay identically.
#[derive(Clone, Copy, Debug)]
pub enum ModelPolicy {
    /// Fixed prediction per deck position. Positions past the end of the
    /// script fall back to the item's true category.
    Scripted(&'static [Category]),
    /// Per-trial correctness drawn independently with the success
    /// probability configured for the item's true category. Categories
    /// missing from the table always predict correctly.
    Stochastic(&'static [(Category, f64)]),
}

impl ModelPolicy {
    pub fn predict(
        &self,
        index: usize,
        item: &TrialItem,
        options: &[Category],
        rng: &mut SmallRng,
    ) -> Category {
        match self {
            ModelPolicy::Scripted(script) => {
                script.get(index).copied().unwrap_or(item.category)
            }
            ModelPolicy::Stochastic(table) => {
                let p = table
                    .iter()
                    .find(|(cat, _)| *cat == item.category)
                    .map(|(_, p)| *p)
                    .unwrap_or(1.0);
                if rng.gen_bool(p.clamp(0.0, 1.0)) {
                    item.category
                } else {
                    wrong_category(item.category, options, rng)
                }
            }
        }
    }
}

/// Pick a category other than `actual` from the option set. Falls back to
/// `actual` only when there is nothing else to pick (degenerate option set).
fn wrong_category(actual: Category, options: &[Category], rng: &mut SmallRng) -> Category {
    let others: Vec<Category> = options.iter().copied().filter(|c| *c != actual).collect();
    if others.is_empty() {
        actual
    } else {
        others[rng.gen_range(0..others.len())]
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    const CIRCLE: TrialItem = TrialItem {
        name: "Circle",
        category: "circle",
        glyph: "●",
    };
    const OPTIONS: [Category; 2] = ["circle", "triangle"];

    #[test]
    fn scripted_follows_the_script() {
        let model = ModelPolicy::Scripted(&["triangle", "circle"]);
        let mut rng = SmallRng::seed_from_u64(1);
        assert_eq!(model.predict(0, &CIRCLE, &OPTIONS, &mut rng), "triangle");
        assert_eq!(model.predict(1, &CIRCLE, &OPTIONS, &mut rng), "circle");
        // off-script positions answer correctly
        assert_eq!(model.predict(5, &CIRCLE, &OPTIONS, &mut rng), "circle");
    }

    #[test]
    fn certain_success_always_predicts_the_true_category() {
        let model = ModelPolicy::Stochastic(&[("circle", 1.0)]);
        let mut rng = SmallRng::seed_from_u64(7);
        for i in 0..20 {
            assert_eq!(model.predict(i, &CIRCLE, &OPTIONS, &mut rng), "circle");
        }
    }

    #[test]
    fn certain_failure_always_predicts_something_else() {
        let model = ModelPolicy::Stochastic(&[("circle", 0.0)]);
        let mut rng = SmallRng::seed_from_u64(7);
        for i in 0..20 {
            assert_eq!(model.predict(i, &CIRCLE, &OPTIONS, &mut rng), "triangle");
        }
    }

    #[test]
    fn unknown_category_defaults_to_correct() {
        let model = ModelPolicy::Stochastic(&[("triangle", 0.0)]);
        let mut rng = SmallRng::seed_from_u64(7);
        assert_eq!(model.predict(0, &CIRCLE, &OPTIONS, &mut rng), "circle");
    }

    #[test]
    fn same_seed_replays_the_same_predictions() {
        let model = ModelPolicy::Stochastic(&[("circle", 0.5)]);
        let run = |seed: u64| {
            let mut rng = SmallRng::seed_from_u64(seed);
            (0..32)
                .map(|i| model.predict(i, &CIRCLE, &OPTIONS, &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(42), run(42));
    }
}
