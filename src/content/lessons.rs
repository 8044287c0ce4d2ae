//! The six lesson plans. All tables are static; sessions never mutate them.

use crate::content::{CategoryDef, LessonPlan, QuizPlan, ReflectPlan, ResultsView};
use crate::engine::model::ModelPolicy;
use crate::session::activity::{ActivityPlan, PredictStyle, StageKind, StagePlan};
use crate::session::screen::ProgressMap;
use crate::session::trial::TrialItem;

const fn item(name: &'static str, category: &'static str, glyph: &'static str) -> TrialItem {
    TrialItem {
        name,
        category,
        glyph,
    }
}

pub fn all() -> &'static [LessonPlan] {
    &LESSONS
}

// --- Lesson 1: Teach the Sorting Robot ---

static SORT_CATS: [CategoryDef; 3] = [
    CategoryDef {
        id: "animals",
        label: "Animals",
        glyph: "🐾",
    },
    CategoryDef {
        id: "food",
        label: "Food",
        glyph: "🍽",
    },
    CategoryDef {
        id: "toys",
        label: "Toys",
        glyph: "🎮",
    },
];

static SORT_ITEMS: [TrialItem; 10] = [
    item("Cat", "animals", "🐱"),
    item("Apple", "food", "🍎"),
    item("Toy Car", "toys", "🚗"),
    item("Dog", "animals", "🐶"),
    item("Pizza", "food", "🍕"),
    item("Teddy Bear", "toys", "🧸"),
    item("Frog", "animals", "🐸"),
    item("Cookie", "food", "🍪"),
    item("Ball", "toys", "⚽"),
    item("Horse", "animals", "🐴"),
];

static SORT_STAGES: [StagePlan; 1] = [StagePlan {
    label: "labeling",
    kind: StageKind::Classify {
        deck: &SORT_ITEMS,
        midcheck_after: Some(5),
    },
}];

// --- Lesson 2: Healthy or Treat? ---

static FOOD_CATS: [CategoryDef; 2] = [
    CategoryDef {
        id: "healthy",
        label: "Healthy",
        glyph: "🥗",
    },
    CategoryDef {
        id: "treat",
        label: "a Treat",
        glyph: "🍰",
    },
];

static FOOD_ITEMS: [TrialItem; 12] = [
    item("Apple", "healthy", "🍎"),
    item("Cookie", "treat", "🍪"),
    item("Carrot", "healthy", "🥕"),
    item("Cake", "treat", "🍰"),
    item("Salad", "healthy", "🥗"),
    item("Ice Cream", "treat", "🍨"),
    item("Cherry", "healthy", "🍒"),
    item("Candy", "treat", "🍬"),
    item("Orange", "healthy", "🍊"),
    item("Soda", "treat", "🥤"),
    item("Banana", "healthy", "🍌"),
    item("Donut", "treat", "🍩"),
];

static FOOD_STAGES: [StagePlan; 1] = [StagePlan {
    label: "sorting",
    kind: StageKind::Classify {
        deck: &FOOD_ITEMS,
        midcheck_after: Some(6),
    },
}];

// --- Lesson 3: Fair or Unfair AI? ---

static SHAPE_CATS: [CategoryDef; 2] = [
    CategoryDef {
        id: "circle",
        label: "Circle",
        glyph: "●",
    },
    CategoryDef {
        id: "triangle",
        label: "Triangle",
        glyph: "▲",
    },
];

static SHAPE_TEST: [TrialItem; 6] = [
    item("Shape 1", "circle", "●"),
    item("Shape 2", "triangle", "▲"),
    item("Shape 3", "circle", "●"),
    item("Shape 4", "triangle", "▲"),
    item("Shape 5", "circle", "●"),
    item("Shape 6", "triangle", "▲"),
];

static SHAPE_STAGES: [StagePlan; 6] = [
    StagePlan {
        label: "biased",
        kind: StageKind::Collect {
            goals: &[("circle", 6), ("triangle", 2)],
        },
    },
    StagePlan {
        label: "biased",
        kind: StageKind::Train {
            caption: "Training on lopsided data...",
        },
    },
    StagePlan {
        label: "biased",
        kind: StageKind::Predict {
            deck: &SHAPE_TEST,
            model: ModelPolicy::Stochastic(&[("circle", 0.9), ("triangle", 0.3)]),
            style: PredictStyle::Batch,
        },
    },
    StagePlan {
        label: "fair",
        kind: StageKind::Collect {
            goals: &[("circle", 4), ("triangle", 4)],
        },
    },
    StagePlan {
        label: "fair",
        kind: StageKind::Train {
            caption: "Training on balanced data...",
        },
    },
    StagePlan {
        label: "fair",
        kind: StageKind::Predict {
            deck: &SHAPE_TEST,
            model: ModelPolicy::Stochastic(&[("circle", 0.8), ("triangle", 0.8)]),
            style: PredictStyle::Batch,
        },
    },
];

// --- Lesson 4: The Data Detective ---

static PET_CATS: [CategoryDef; 2] = [
    CategoryDef {
        id: "cat",
        label: "Cat",
        glyph: "🐱",
    },
    CategoryDef {
        id: "dog",
        label: "Dog",
        glyph: "🐶",
    },
];

static PET_TEST: [TrialItem; 6] = [
    item("Pet 1", "cat", "🐱"),
    item("Pet 2", "dog", "🐶"),
    item("Pet 3", "cat", "🐱"),
    item("Pet 4", "dog", "🐶"),
    item("Pet 5", "cat", "🐱"),
    item("Pet 6", "dog", "🐶"),
];

static PET_STAGES: [StagePlan; 9] = [
    StagePlan {
        label: "round-1",
        kind: StageKind::Collect {
            goals: &[("cat", 3), ("dog", 2)],
        },
    },
    StagePlan {
        label: "round-1",
        kind: StageKind::Train {
            caption: "Training with just 5 examples...",
        },
    },
    StagePlan {
        label: "round-1",
        kind: StageKind::Predict {
            deck: &PET_TEST,
            model: ModelPolicy::Stochastic(&[("cat", 0.55), ("dog", 0.55)]),
            style: PredictStyle::Batch,
        },
    },
    StagePlan {
        label: "round-2",
        kind: StageKind::Collect {
            goals: &[("cat", 8), ("dog", 7)],
        },
    },
    StagePlan {
        label: "round-2",
        kind: StageKind::Train {
            caption: "Training with 15 examples...",
        },
    },
    StagePlan {
        label: "round-2",
        kind: StageKind::Predict {
            deck: &PET_TEST,
            model: ModelPolicy::Stochastic(&[("cat", 0.75), ("dog", 0.75)]),
            style: PredictStyle::Batch,
        },
    },
    StagePlan {
        label: "round-3",
        kind: StageKind::Collect {
            goals: &[("cat", 15), ("dog", 15)],
        },
    },
    StagePlan {
        label: "round-3",
        kind: StageKind::Train {
            caption: "Training with 30 examples...",
        },
    },
    StagePlan {
        label: "round-3",
        kind: StageKind::Predict {
            deck: &PET_TEST,
            model: ModelPolicy::Stochastic(&[("cat", 0.9), ("dog", 0.9)]),
            style: PredictStyle::Batch,
        },
    },
];

// --- Lesson 5: Test Your Robot's Brain ---

static WEATHER_CATS: [CategoryDef; 3] = [
    CategoryDef {
        id: "sunny",
        label: "Sunny",
        glyph: "☀",
    },
    CategoryDef {
        id: "rainy",
        label: "Rainy",
        glyph: "🌧",
    },
    CategoryDef {
        id: "snowy",
        label: "Snowy",
        glyph: "❄",
    },
];

static WEATHER_TRAIN: [TrialItem; 12] = [
    item("Bright Sun", "sunny", "☀"),
    item("Heavy Rain", "rainy", "🌧"),
    item("Snowfall", "snowy", "❄"),
    item("Clear Sky", "sunny", "🌤"),
    item("Drizzle", "rainy", "🌦"),
    item("Snow Storm", "snowy", "🌨"),
    item("Sunrise", "sunny", "🌅"),
    item("Umbrella Day", "rainy", "☔"),
    item("Freezing", "snowy", "🥶"),
    item("Hazy Sun", "sunny", "🌥"),
    item("Thunderstorm", "rainy", "⛈"),
    item("Snowy Peak", "snowy", "🏔"),
];

static WEATHER_TEST: [TrialItem; 6] = [
    item("Warm Day", "sunny", "☀"),
    item("Monsoon", "rainy", "🌧"),
    item("Frost", "snowy", "❄"),
    item("Golden Hour", "sunny", "🌇"),
    item("Wet Morning", "rainy", "💧"),
    item("Blizzard", "snowy", "🌬"),
];

// 4 of 6 right: wrong on Frost and Wet Morning, the robot's weak spots
static WEATHER_SCRIPT: [&str; 6] = ["sunny", "rainy", "sunny", "sunny", "sunny", "snowy"];

static WEATHER_STAGES: [StagePlan; 2] = [
    StagePlan {
        label: "training",
        kind: StageKind::Classify {
            deck: &WEATHER_TRAIN,
            midcheck_after: None,
        },
    },
    StagePlan {
        label: "testing",
        kind: StageKind::Predict {
            deck: &WEATHER_TEST,
            model: ModelPolicy::Scripted(&WEATHER_SCRIPT),
            style: PredictStyle::StudentFirst,
        },
    },
];

// --- Lesson 6: My ML Adventure ---

static VEHICLE_CATS: [CategoryDef; 2] = [
    CategoryDef {
        id: "two",
        label: "Two Wheels",
        glyph: "🚲",
    },
    CategoryDef {
        id: "four",
        label: "Four Wheels",
        glyph: "🚗",
    },
];

static VEHICLES: [TrialItem; 8] = [
    item("Sedan", "four", "🚗"),
    item("Truck", "four", "🚚"),
    item("Bicycle", "two", "🚲"),
    item("School Bus", "four", "🚌"),
    item("SUV", "four", "🚙"),
    item("Mountain Bike", "two", "🚵"),
    item("Van", "four", "🚐"),
    item("Scooter", "two", "🛴"),
];

static VEHICLE_TEST: [TrialItem; 4] = [
    item("Convertible", "four", "🚗"),
    item("BMX", "two", "🚲"),
    item("City Bus", "four", "🚌"),
    item("E-Scooter", "two", "🛴"),
];

// the half-trained robot calls everything four-wheeled
static VEHICLE_TEST_SCRIPT: [&str; 4] = ["four", "four", "four", "four"];
static VEHICLE_RETEST_SCRIPT: [&str; 4] = ["four", "two", "four", "two"];

static VEHICLE_STAGES: [StagePlan; 8] = [
    StagePlan {
        label: "gather",
        kind: StageKind::Collect {
            goals: &[("four", 5), ("two", 3)],
        },
    },
    StagePlan {
        label: "labeling",
        kind: StageKind::Classify {
            deck: &VEHICLES,
            midcheck_after: None,
        },
    },
    StagePlan {
        label: "train",
        kind: StageKind::Train {
            caption: "Training on your labeled vehicles...",
        },
    },
    StagePlan {
        label: "test",
        kind: StageKind::Predict {
            deck: &VEHICLE_TEST,
            model: ModelPolicy::Scripted(&VEHICLE_TEST_SCRIPT),
            style: PredictStyle::Reveal,
        },
    },
    StagePlan {
        label: "test",
        kind: StageKind::Review {
            caption: "Only half right! The robot needs more two-wheel examples.",
        },
    },
    StagePlan {
        label: "improve",
        kind: StageKind::Collect {
            goals: &[("four", 3), ("two", 1)],
        },
    },
    StagePlan {
        label: "retrain",
        kind: StageKind::Train {
            caption: "Retraining with the extra examples...",
        },
    },
    StagePlan {
        label: "retest",
        kind: StageKind::Predict {
            deck: &VEHICLE_TEST,
            model: ModelPolicy::Scripted(&VEHICLE_RETEST_SCRIPT),
            style: PredictStyle::Reveal,
        },
    },
];

static LESSONS: [LessonPlan; 6] = [
    LessonPlan {
        id: 1,
        title: "Teach the Sorting Robot",
        tagline: "Sort items into groups to teach a robot how to label data",
        intro: "Hi, I'm Robi! I can't tell a cat from a cookie yet. Sort these \
                things into the right bins and I'll learn from your labels!",
        goals: &[
            "Learn what labeling data means",
            "Sort items into Animals, Food and Toys",
            "See how your labels teach the robot",
        ],
        learn_title: "Watch: How Robots Learn from Labels",
        learn_steps: &[
            ("Look", "Examine each item"),
            ("Label", "Put it in the right group"),
            ("Learn", "The robot copies your choices"),
        ],
        precheck: QuizPlan {
            question: "What does it mean to label data?",
            options: &[
                "Drawing pictures of it",
                "Giving each example its right group name",
                "Deleting it",
            ],
            answer: 1,
            correct_msg: "That's it! A label tells the robot which group an example belongs to.",
            incorrect_msg: "Not quite! A label tells the robot which group an example belongs to.",
        },
        midcheck: Some(QuizPlan {
            question: "Halfway there! Why does the robot need your labels?",
            options: &[
                "It learns the groups from them",
                "It eats them",
                "It doesn't need them",
            ],
            answer: 0,
            correct_msg: "Exactly! Your labels are what the robot learns from.",
            incorrect_msg: "Remember: the robot learns its groups from your labels!",
        }),
        midcheck_before_stage: &[],
        reflection: ReflectPlan {
            title: "Reflect on Labeling",
            prompt: "How well do you understand labeling data?",
            options: &["Still learning", "Getting it!", "I totally get it!"],
        },
        categories: &SORT_CATS,
        activity: ActivityPlan {
            stages: &SORT_STAGES,
            feedback_delay_ms: 1800,
            thinking_delay_ms: 1000,
        },
        progress: ProgressMap {
            learn: 10,
            precheck: 20,
            activity_base: 20,
            activity_span: 40,
            results: 75,
            reflection: 90,
        },
        results: ResultsView::Score { show_robot: false },
        insight: "Every label you gave became a lesson for the robot. Good labels \
                  make good learners!",
        takeaway: "Machine learning starts with labeled examples!",
        completion_message: "You taught me to sort! Now I know what animals, food \
                             and toys look like because YOU labeled them.",
    },
    LessonPlan {
        id: 2,
        title: "Healthy or Treat?",
        tagline: "Sort foods into two groups to learn binary classification",
        intro: "Time to learn about binary classification! That means sorting \
                things into exactly TWO groups. Let's do it!",
        goals: &[
            "Understand what binary classification means",
            "Sort food into Healthy vs. Treat",
            "See how your labels help a bot learn two groups",
        ],
        learn_title: "Watch: What is Binary Classification?",
        learn_steps: &[
            ("Two Groups", "Pick one of two"),
            ("Examples", "Healthy or Treat"),
            ("Train", "Teach the model"),
        ],
        precheck: QuizPlan {
            question: "What does 'binary' mean?",
            options: &["Many choices", "Two choices", "No choices"],
            answer: 1,
            correct_msg: "That's right! Binary means two. Binary classification \
                          sorts things into exactly two groups.",
            incorrect_msg: "Not quite! Binary means two. Binary classification \
                            sorts things into exactly two groups.",
        },
        midcheck: Some(QuizPlan {
            question: "Halfway there! How many groups does binary classification use?",
            options: &["One group", "Exactly two groups", "As many as we want"],
            answer: 1,
            correct_msg: "Exactly! Binary means two groups. You're doing great!",
            incorrect_msg: "Remember, binary means two! We always sort into exactly \
                            two groups.",
        }),
        midcheck_before_stage: &[],
        reflection: ReflectPlan {
            title: "Reflect on Binary Classification",
            prompt: "How well do you understand sorting things into two groups?",
            options: &["Still learning", "Getting it!", "I totally get it!"],
        },
        categories: &FOOD_CATS,
        activity: ActivityPlan {
            stages: &FOOD_STAGES,
            feedback_delay_ms: 1800,
            thinking_delay_ms: 1000,
        },
        progress: ProgressMap {
            learn: 10,
            precheck: 20,
            activity_base: 20,
            activity_span: 48,
            results: 75,
            reflection: 90,
        },
        results: ResultsView::Score { show_robot: true },
        insight: "The bot learned from your labels! The more correct labels you \
                  give, the better it gets at telling the two groups apart.",
        takeaway: "Binary classification sorts things into exactly two groups!",
        completion_message: "You did it! Now I can sort food into Healthy and Treat \
                             because YOU taught me with binary classification!",
    },
    LessonPlan {
        id: 3,
        title: "Fair or Unfair AI?",
        tagline: "Discover what happens when AI training data is unbalanced",
        intro: "Let's talk about fairness. Sometimes AI can be unfair! It happens \
                when it doesn't learn from balanced data!",
        goals: &[
            "Understand what bias in AI means",
            "See how unbalanced data causes unfair predictions",
            "Learn why balanced training data matters",
        ],
        learn_title: "Watch: How Bias Sneaks into AI",
        learn_steps: &[
            ("Collect", "Gather training data"),
            ("Imbalance", "Unequal examples"),
            ("Train", "The AI learns patterns"),
            ("Bias", "Unfair predictions"),
        ],
        precheck: QuizPlan {
            question: "What happens if an AI only ever sees golden retrievers as 'dogs'?",
            options: &[
                "It recognizes every dog breed perfectly",
                "It might not recognize other breeds",
                "It stops working completely",
            ],
            answer: 1,
            correct_msg: "Exactly! If the AI only learns from one type, it struggles \
                          with the others. That's bias!",
            incorrect_msg: "Not quite! The AI would struggle with other breeds \
                            because it only ever saw golden retrievers.",
        },
        midcheck: None,
        midcheck_before_stage: &[],
        reflection: ReflectPlan {
            title: "Thinking About Fairness",
            prompt: "Why is it important for AI to be fair?",
            options: &[
                "So everyone is treated fairly",
                "So it makes better predictions",
                "Both reasons!",
            ],
        },
        categories: &SHAPE_CATS,
        activity: ActivityPlan {
            stages: &SHAPE_STAGES,
            feedback_delay_ms: 1500,
            thinking_delay_ms: 1000,
        },
        progress: ProgressMap {
            learn: 10,
            precheck: 20,
            activity_base: 25,
            activity_span: 50,
            results: 80,
            reflection: 90,
        },
        results: ResultsView::StagePair {
            first: "biased",
            second: "fair",
        },
        insight: "When training data is unbalanced, the AI gets biased! It does \
                  well on what it sees a lot and poorly on what it rarely sees.",
        takeaway: "AI can be biased if its training data isn't balanced and fair!",
        completion_message: "You discovered how bias works! Now you know why \
                             balanced, fair data matters so much.",
    },
    LessonPlan {
        id: 4,
        title: "The Data Detective",
        tagline: "Investigate why more data helps AI learn better",
        intro: "Detective, I have a mystery for you: why does my accuracy change \
                with the size of my training set? Let's investigate!",
        goals: &[
            "See how training-set size changes accuracy",
            "Run three rounds with more data each time",
            "Collect the evidence: more data, better learning",
        ],
        learn_title: "Watch: Why More Data Helps",
        learn_steps: &[
            ("Few Examples", "The AI guesses a lot"),
            ("More Data", "Patterns get clearer"),
            ("Accuracy", "Predictions improve"),
        ],
        precheck: QuizPlan {
            question: "The robot keeps mixing up cats and dogs. What's the FIRST \
                       thing a data detective checks?",
            options: &[
                "The robot's paint job",
                "How much training data it saw",
                "The weather",
            ],
            answer: 1,
            correct_msg: "Good instinct! Too little training data is the usual suspect.",
            incorrect_msg: "Look closer! Too little training data is the usual suspect.",
        },
        midcheck: Some(QuizPlan {
            question: "You just saw a round of predictions. Will MORE training data \
                       help the robot do better?",
            options: &[
                "Yes, more examples sharpen the patterns",
                "No, data doesn't matter",
                "Only luck matters",
            ],
            answer: 0,
            correct_msg: "Right! Watch the accuracy climb as the training set grows.",
            incorrect_msg: "Actually it will! Watch the accuracy climb as the \
                            training set grows.",
        }),
        midcheck_before_stage: &[3, 6],
        reflection: ReflectPlan {
            title: "Case Closed?",
            prompt: "What did the evidence show about training data?",
            options: &[
                "More good data means better accuracy",
                "Data size doesn't matter",
                "I need to investigate more",
            ],
        },
        categories: &PET_CATS,
        activity: ActivityPlan {
            stages: &PET_STAGES,
            feedback_delay_ms: 1500,
            thinking_delay_ms: 1000,
        },
        progress: ProgressMap {
            learn: 10,
            precheck: 20,
            activity_base: 25,
            activity_span: 55,
            results: 85,
            reflection: 93,
        },
        results: ResultsView::Rounds(&["round-1", "round-2", "round-3"]),
        insight: "Case closed: every round added data, and every round the robot's \
                  accuracy went up. More good examples make better patterns.",
        takeaway: "More and better data leads to higher accuracy!",
        completion_message: "Great detective work! You proved that feeding me more \
                             examples makes me a better learner.",
    },
    LessonPlan {
        id: 5,
        title: "Test Your Robot's Brain",
        tagline: "Test an AI with new data to see if it really learned",
        intro: "Welcome to the lab! First you'll train me on weather pictures, \
                then we'll TEST me on ones I've never seen. Think I'll pass?",
        goals: &[
            "Train the robot on weather examples",
            "Test it with brand-new data",
            "Read a confusion matrix",
        ],
        learn_title: "Watch: Training vs. Testing",
        learn_steps: &[
            ("Train", "Teach with examples"),
            ("Test", "Use NEW data"),
            ("Evaluate", "Check the accuracy"),
        ],
        precheck: QuizPlan {
            question: "Why do we test an AI with NEW data it never saw in training?",
            options: &[
                "To see if it really learned the pattern",
                "Because old data wears out",
                "To make the test harder for fun",
            ],
            answer: 0,
            correct_msg: "Exactly! Anyone can memorize. New data shows real learning.",
            incorrect_msg: "Think of it like a quiz: new questions show whether you \
                            really learned, not just memorized.",
        },
        midcheck: None,
        midcheck_before_stage: &[],
        reflection: ReflectPlan {
            title: "Reflect on Testing",
            prompt: "How confident are you about training vs. testing?",
            options: &["Still learning", "Getting it!", "I totally get it!"],
        },
        categories: &WEATHER_CATS,
        activity: ActivityPlan {
            stages: &WEATHER_STAGES,
            feedback_delay_ms: 1500,
            thinking_delay_ms: 1000,
        },
        progress: ProgressMap {
            learn: 10,
            precheck: 20,
            activity_base: 25,
            activity_span: 55,
            results: 85,
            reflection: 92,
        },
        results: ResultsView::Matrix { stage: "testing" },
        insight: "The confusion matrix shows WHERE the robot gets confused. The \
                  diagonal is right answers; everything else is a mix-up.",
        takeaway: "Testing with new data shows what a model really learned!",
        completion_message: "Lab session complete! You trained me, tested me on new \
                             data, and read my confusion matrix like a scientist.",
    },
    LessonPlan {
        id: 6,
        title: "My ML Adventure",
        tagline: "Go on a journey through the complete ML lifecycle",
        intro: "Pack your bags, we're going on the full machine-learning journey: \
                collect, label, train, test and improve!",
        goals: &[
            "Visit every stop of the ML lifecycle",
            "Collect and label a vehicle dataset",
            "Test the AI and improve it with more data",
        ],
        learn_title: "Watch: The ML Journey",
        learn_steps: &[
            ("Collect", "Gather examples"),
            ("Label", "Name each one"),
            ("Train", "Teach the model"),
            ("Test", "Check accuracy"),
            ("Improve", "Add data, try again"),
        ],
        precheck: QuizPlan {
            question: "What is the FIRST stop on any machine-learning journey?",
            options: &[
                "Collecting data",
                "Deploying to production",
                "Improving accuracy",
            ],
            answer: 0,
            correct_msg: "Exactly! Collecting data is always the first step.",
            incorrect_msg: "Not quite! We need data before we can do anything else!",
        },
        midcheck: None,
        midcheck_before_stage: &[],
        reflection: ReflectPlan {
            title: "Journey's End",
            prompt: "Which stop of the journey surprised you most?",
            options: &[
                "How much labeling matters",
                "How testing found the weak spot",
                "How retraining fixed it",
            ],
        },
        categories: &VEHICLE_CATS,
        activity: ActivityPlan {
            stages: &VEHICLE_STAGES,
            feedback_delay_ms: 1200,
            thinking_delay_ms: 1500,
        },
        progress: ProgressMap {
            learn: 10,
            precheck: 20,
            activity_base: 35,
            activity_span: 40,
            results: 80,
            reflection: 90,
        },
        results: ResultsView::StagePair {
            first: "test",
            second: "retest",
        },
        insight: "The first test caught the robot calling everything four-wheeled. \
                  More two-wheel examples and a retrain fixed it. That's the \
                  improve loop in action.",
        takeaway: "Machine learning is a cycle: collect, label, train, test, improve!",
        completion_message: "Adventure complete! You walked the whole ML lifecycle \
                             and earned your explorer badge.",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::activity::StageKind;

    #[test]
    fn six_lessons_with_unique_ids() {
        let lessons = all();
        assert_eq!(lessons.len(), 6);
        for (i, plan) in lessons.iter().enumerate() {
            assert_eq!(plan.id, i as u32 + 1);
        }
    }

    #[test]
    fn progress_maps_never_move_backward() {
        for plan in all() {
            assert!(plan.progress.is_monotonic(), "lesson {}", plan.id);
        }
    }

    #[test]
    fn quiz_answers_index_into_their_options() {
        for plan in all() {
            assert!(plan.precheck.answer < plan.precheck.options.len());
            if let Some(quiz) = plan.midcheck {
                assert!(quiz.answer < quiz.options.len());
            }
            assert!(!plan.reflection.options.is_empty());
        }
    }

    #[test]
    fn midcheck_triggers_require_a_midcheck_quiz() {
        for plan in all() {
            if !plan.midcheck_before_stage.is_empty() {
                assert!(plan.midcheck.is_some(), "lesson {}", plan.id);
            }
            for stage in plan.activity.stages {
                if let StageKind::Classify {
                    midcheck_after: Some(n),
                    deck,
                } = stage.kind
                {
                    assert!(plan.midcheck.is_some(), "lesson {}", plan.id);
                    assert!(n > 0 && n < deck.len(), "lesson {}", plan.id);
                }
            }
        }
    }

    #[test]
    fn every_deck_and_goal_uses_declared_categories() {
        for plan in all() {
            let ids = plan.category_ids();
            for stage in plan.activity.stages {
                match stage.kind {
                    StageKind::Classify { deck, .. } | StageKind::Predict { deck, .. } => {
                        for item in deck {
                            assert!(
                                ids.contains(&item.category),
                                "lesson {}: {} has unknown category {}",
                                plan.id,
                                item.name,
                                item.category
                            );
                        }
                    }
                    StageKind::Collect { goals } => {
                        for &(cat, goal) in goals {
                            assert!(ids.contains(&cat), "lesson {}", plan.id);
                            assert!(goal > 0, "lesson {}", plan.id);
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    #[test]
    fn scripted_predictions_cover_their_decks() {
        for plan in all() {
            for stage in plan.activity.stages {
                if let StageKind::Predict {
                    deck,
                    model: ModelPolicy::Scripted(script),
                    ..
                } = stage.kind
                {
                    assert_eq!(script.len(), deck.len(), "lesson {}", plan.id);
                }
            }
        }
    }

    #[test]
    fn delays_stay_in_the_intended_band() {
        for plan in all() {
            let ms = plan.activity.feedback_delay_ms;
            assert!((1200..=1800).contains(&ms), "lesson {}", plan.id);
        }
    }
}
