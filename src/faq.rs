//! Quick-question lookup table
//!
//! A static mapping from normalized question text to a canned answer. The
//! dialogue loop consults it before any network call: an exact match after
//! lower-casing and trimming answers the turn with zero latency and cost.

use crate::error::{FitbotError, Result};
use std::collections::HashMap;

/// A single canned question and its answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqEntry {
    /// Question as shown to the user
    pub question: String,
    /// Canned markdown answer
    pub answer: String,
}

/// Immutable FAQ lookup table
///
/// Keeps the insertion order of questions for display, and an index keyed by
/// the normalized question for lookups.
#[derive(Debug, Clone)]
pub struct FaqTable {
    entries: Vec<FaqEntry>,
    index: HashMap<String, usize>,
}

const BUILTIN_FAQ: &[(&str, &str)] = &[
    (
        "How to lose weight",
        "Losing weight effectively usually involves a combination of regular physical activity and a balanced, calorie-controlled diet. Focusing on whole foods, lean protein, and plenty of vegetables can be very helpful. What kind of physical activities do you enjoy, or are there any dietary approaches you're curious about? This will help me give more tailored suggestions for exercise or healthy eating habits.",
    ),
    (
        "Suggest a good workout for beginners",
        "Absolutely! For beginners, it's often best to start with full-body workouts 2-3 times a week to build a solid foundation. This could include bodyweight exercises like **Bodyweight Squats**, **Push-ups** (on knees if needed), **Lunges**, and **Planks**. Do you prefer to work out at home, or do you have access to gym equipment? And roughly how much time are you looking to dedicate per session?",
    ),
    (
        "What are some good abs exercises",
        "For targeting your abdominal muscles and strengthening your core, exercises like **Crunches**, **Leg Raises**, **Plank variations** (like forearm plank or side plank), and **Russian Twists** are effective. Remember, a strong core contributes to overall stability and posture! Are you looking to add these to an existing routine, or would you like ideas for a dedicated core workout?",
    ),
    (
        "How to eat healthier",
        "That's a great goal! Eating healthier generally means focusing on whole, unprocessed foods, increasing your intake of fruits and vegetables, choosing lean protein sources (like chicken, fish, beans, or tofu), incorporating healthy fats (like avocados or nuts), and ensuring you're well-hydrated. Are you interested in tips for meal planning, understanding macronutrients (proteins, carbs, fats), or perhaps some healthy snack ideas to get you started?",
    ),
    (
        "I have no motivation to exercise",
        "It's completely normal to feel a lack of motivation sometimes! Setting small, achievable goals can make a big difference, and even a 10-minute walk is a win. Finding an activity you genuinely enjoy is also key, as it makes exercise feel less like a chore. What kind of activities have you considered or enjoyed in the past, or what usually makes you feel unmotivated?",
    ),
    (
        "What to eat before a workout",
        "Fueling your body before a workout can help with energy and performance. Generally, having some easily digestible carbohydrates about 1-2 hours beforehand is a good idea. This could be something like a banana, a small bowl of oatmeal, or a piece of fruit. What kind of workout are you planning, and how long will it be? That can help refine the suggestion.",
    ),
    (
        "What to eat after a workout",
        "After a workout, it's beneficial to consume a combination of protein and carbohydrates within an hour or two to aid muscle recovery and replenish energy stores. Good options include Greek yogurt with berries, a protein shake with a banana, chicken breast with quinoa, or a tuna sandwich on whole-wheat bread. What are your main fitness goals, such as muscle building or endurance improvement?",
    ),
    (
        "Suggest some cardio exercises",
        "Certainly! Cardiovascular exercises, or 'cardio,' are great for heart health, endurance, and burning calories. Popular options include **Running** or **Jogging**, **Cycling** (indoors or outdoors), **Swimming**, **Brisk Walking**, using an **Elliptical Trainer**, or even **Dancing**. Are you looking for low-impact options, something you can do at home, or are you training for a specific endurance goal?",
    ),
];

impl FaqTable {
    /// Normalize user text into a lookup key
    ///
    /// # Examples
    ///
    /// ```
    /// use fitbot::faq::FaqTable;
    ///
    /// assert_eq!(FaqTable::normalize("  How To Lose Weight \n"), "how to lose weight");
    /// ```
    pub fn normalize(text: &str) -> String {
        text.trim().to_lowercase()
    }

    /// The built-in fitness FAQ table
    ///
    /// # Examples
    ///
    /// ```
    /// use fitbot::faq::FaqTable;
    ///
    /// let faq = FaqTable::builtin();
    /// assert!(faq.lookup("how to lose weight").is_some());
    /// ```
    pub fn builtin() -> Self {
        let mut entries = Vec::with_capacity(BUILTIN_FAQ.len());
        let mut index = HashMap::with_capacity(BUILTIN_FAQ.len());
        for (question, answer) in BUILTIN_FAQ {
            index.insert(Self::normalize(question), entries.len());
            entries.push(FaqEntry {
                question: (*question).to_string(),
                answer: (*answer).to_string(),
            });
        }
        Self { entries, index }
    }

    /// Build a table from arbitrary question/answer pairs
    ///
    /// # Errors
    ///
    /// Returns [`FitbotError::Faq`] if a question is blank or two questions
    /// normalize to the same key.
    pub fn from_entries<I, Q, A>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Q, A)>,
        Q: Into<String>,
        A: Into<String>,
    {
        let mut entries = Vec::new();
        let mut index = HashMap::new();

        for (question, answer) in pairs {
            let question = question.into();
            let key = Self::normalize(&question);
            if key.is_empty() {
                return Err(FitbotError::Faq("question cannot be empty".to_string()).into());
            }
            if index.contains_key(&key) {
                return Err(
                    FitbotError::Faq(format!("duplicate question: {}", question)).into(),
                );
            }
            index.insert(key, entries.len());
            entries.push(FaqEntry {
                question,
                answer: answer.into(),
            });
        }

        Ok(Self { entries, index })
    }

    /// Look up a canned answer for the given user text
    ///
    /// Matching is exact after normalization; there is no fuzzy matching.
    pub fn lookup(&self, text: &str) -> Option<&str> {
        self.index
            .get(&Self::normalize(text))
            .map(|&idx| self.entries[idx].answer.as_str())
    }

    /// Questions in display order
    pub fn questions(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.question.as_str())
    }

    /// Entries in display order
    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    /// Entry at a zero-based display position
    pub fn get(&self, position: usize) -> Option<&FaqEntry> {
        self.entries.get(position)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for FaqTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_error_contains;

    #[test]
    fn test_builtin_has_eight_entries() {
        let faq = FaqTable::builtin();
        assert_eq!(faq.len(), 8);
        assert!(!faq.is_empty());
    }

    #[test]
    fn test_lookup_exact_match() {
        let faq = FaqTable::builtin();
        let answer = faq.lookup("How to lose weight").unwrap();
        assert!(answer.starts_with("Losing weight effectively"));
    }

    #[test]
    fn test_lookup_normalizes_case_and_whitespace() {
        let faq = FaqTable::builtin();
        assert_eq!(
            faq.lookup("  HOW TO LOSE WEIGHT\t"),
            faq.lookup("how to lose weight")
        );
        assert!(faq.lookup("  HOW TO LOSE WEIGHT\t").is_some());
    }

    #[test]
    fn test_lookup_is_not_fuzzy() {
        let faq = FaqTable::builtin();
        assert!(faq.lookup("how to lose weight?").is_none());
        assert!(faq.lookup("how  to lose weight").is_none());
        assert!(faq.lookup("lose weight").is_none());
        assert!(faq.lookup("").is_none());
    }

    #[test]
    fn test_every_question_resolves_to_its_answer() {
        let faq = FaqTable::builtin();
        for entry in faq.entries() {
            assert_eq!(faq.lookup(&entry.question), Some(entry.answer.as_str()));
        }
    }

    #[test]
    fn test_questions_keep_display_order() {
        let faq = FaqTable::builtin();
        let questions: Vec<&str> = faq.questions().collect();
        assert_eq!(questions[0], "How to lose weight");
        assert_eq!(questions[7], "Suggest some cardio exercises");
        assert_eq!(faq.get(1).unwrap().question, questions[1]);
        assert!(faq.get(8).is_none());
    }

    #[test]
    fn test_from_entries() {
        let faq = FaqTable::from_entries([("Ping", "Pong"), ("Hello", "World")]).unwrap();
        assert_eq!(faq.lookup(" ping "), Some("Pong"));
        assert_eq!(faq.len(), 2);
    }

    #[test]
    fn test_from_entries_rejects_duplicates() {
        let result = FaqTable::from_entries([("Ping", "Pong"), ("  PING", "Again")]);
        assert_error_contains(result, "duplicate question");
    }

    #[test]
    fn test_from_entries_rejects_blank_question() {
        let result = FaqTable::from_entries([("   ", "Nothing")]);
        assert!(result.is_err());
    }
}
