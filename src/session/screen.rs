/// A named stage in a lesson's forward-only narrative.
///
/// Every lesson walks the same outer order; `Midcheck` is an optional
/// detour entered from `Activity` and always returns to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Intro,
    Learn,
    Precheck,
    Activity,
    Midcheck,
    Results,
    Reflection,
    Completion,
}

impl Screen {
    pub fn as_str(self) -> &'static str {
        match self {
            Screen::Intro => "intro",
            Screen::Learn => "learn",
            Screen::Precheck => "precheck",
            Screen::Activity => "activity",
            Screen::Midcheck => "midcheck",
            Screen::Results => "results",
            Screen::Reflection => "reflection",
            Screen::Completion => "completion",
        }
    }
}

/// Per-lesson progress breakpoints. Inside the activity the percentage
/// interpolates from `activity_base` across `activity_span` as items are
/// processed; every other screen maps to a fixed value.
///
/// Plans must keep `results >= activity_base + activity_span` and
/// `reflection >= results` so the displayed percentage never moves backward.
/// Only `Completion` reports 100.
#[derive(Clone, Copy, Debug)]
pub struct ProgressMap {
    pub learn: u8,
    pub precheck: u8,
    pub activity_base: u8,
    pub activity_span: u8,
    pub results: u8,
    pub reflection: u8,
}

impl ProgressMap {
    pub fn percent(&self, screen: Screen, activity_fraction: f64) -> u8 {
        match screen {
            Screen::Intro => 0,
            Screen::Learn => self.learn,
            Screen::Precheck => self.precheck,
            Screen::Activity | Screen::Midcheck => {
                let f = activity_fraction.clamp(0.0, 1.0);
                (self.activity_base as f64 + self.activity_span as f64 * f).floor() as u8
            }
            Screen::Results => self.results,
            Screen::Reflection => self.reflection,
            Screen::Completion => 100,
        }
    }

    /// A map is well-formed when walking the lesson forward can never
    /// decrease the reported percentage.
    pub fn is_monotonic(&self) -> bool {
        let ceiling = self.activity_base.saturating_add(self.activity_span);
        self.learn <= self.precheck
            && self.precheck <= self.activity_base
            && ceiling <= self.results
            && self.results <= self.reflection
            && self.reflection < 100
    }
}
