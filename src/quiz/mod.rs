pub mod family;
pub mod wordle;

// Every quiz form in the hunt has the same number of questions
pub const FORM_SIZE: usize = 10;

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnswerKey {
    answers: Vec<String>,
}

impl AnswerKey {
    // The reference answers are assumed to be already trimmed and lowercased
    // by whoever authored the quiz; only the player's side gets normalized
    pub fn new(answers: Vec<String>) -> Self {
        assert_eq!(
            answers.len(),
            FORM_SIZE,
            "an answer key must hold exactly {} answers",
            FORM_SIZE
        );
        Self { answers }
    }

    pub fn expected(&self, index: usize) -> &str {
        &self.answers[index]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Mark {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct QuizConfig {
    pub answer_key: AnswerKey,
    pub success_message: String,
    pub failure_message: String,
}

impl QuizConfig {
    pub fn new(answer_key: AnswerKey, success_message: String, failure_message: String) -> Self {
        Self {
            answer_key,
            success_message,
            failure_message,
        }
    }
}

// Where the verdicts go. The bot renders them into a chat message, tests
// record them in memory. Setting a state replaces whatever was there before.
pub trait Feedback {
    fn set_field_state(&mut self, index: usize, mark: Mark);
    fn set_summary(&mut self, mark: Mark, message: &str);
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnswerChecker {
    config: QuizConfig,
}

impl AnswerChecker {
    pub fn new(config: QuizConfig) -> Self {
        Self { config }
    }

    pub fn check(&self, inputs: &[String], feedback: &mut impl Feedback) {
        let mut all_correct = true;
        for i in 0..FORM_SIZE {
            let normalized = inputs[i].trim().to_lowercase();
            let mark = if normalized == self.config.answer_key.expected(i) {
                Mark::Correct
            } else {
                all_correct = false;
                Mark::Incorrect
            };
            feedback.set_field_state(i, mark);
        }

        if all_correct {
            feedback.set_summary(Mark::Correct, &self.config.success_message);
        } else {
            feedback.set_summary(Mark::Incorrect, &self.config.failure_message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUCCESS: &str = "🎉 All answers are correct! Proceed to the next step!";
    const FAILURE: &str = "❌ Some answers are incorrect. Please review and try again!";

    struct RecordedFeedback {
        fields: Vec<Option<Mark>>,
        summary: Option<(Mark, String)>,
    }

    impl RecordedFeedback {
        fn new() -> Self {
            Self {
                fields: vec![None; FORM_SIZE],
                summary: None,
            }
        }
    }

    impl Feedback for RecordedFeedback {
        fn set_field_state(&mut self, index: usize, mark: Mark) {
            self.fields[index] = Some(mark);
        }

        fn set_summary(&mut self, mark: Mark, message: &str) {
            self.summary = Some((mark, message.to_string()));
        }
    }

    fn family_checker() -> AnswerChecker {
        let key = AnswerKey::new(
            [
                "rose", "chicago", "marie", "fishing", "july", "buddy", "italy", "doctor",
                "blue", "cabin",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        );
        AnswerChecker::new(QuizConfig::new(key, SUCCESS.to_string(), FAILURE.to_string()))
    }

    fn inputs(values: [&str; FORM_SIZE]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    fn all_correct_inputs() -> Vec<String> {
        inputs([
            "Rose", " Chicago", "Marie", "Fishing", "July", "Buddy", "Italy", "Doctor",
            "Blue", "Cabin",
        ])
    }

    #[test]
    fn all_matching_answers_pass_the_form() {
        let checker = family_checker();
        let mut feedback = RecordedFeedback::new();

        checker.check(&all_correct_inputs(), &mut feedback);

        assert!(feedback.fields.iter().all(|f| *f == Some(Mark::Correct)));
        assert_eq!(feedback.summary, Some((Mark::Correct, SUCCESS.to_string())));
    }

    #[test]
    fn one_wrong_answer_fails_the_whole_form() {
        let checker = family_checker();
        let mut feedback = RecordedFeedback::new();

        let mut answers = all_correct_inputs();
        answers[3] = "Hiking".to_string();
        checker.check(&answers, &mut feedback);

        assert_eq!(feedback.fields[3], Some(Mark::Incorrect));
        for (i, field) in feedback.fields.iter().enumerate() {
            if i != 3 {
                assert_eq!(*field, Some(Mark::Correct));
            }
        }
        assert_eq!(
            feedback.summary,
            Some((Mark::Incorrect, FAILURE.to_string()))
        );
    }

    #[test]
    fn answers_are_trimmed_and_lowercased_before_comparison() {
        let checker = family_checker();
        let mut feedback = RecordedFeedback::new();

        let mut answers = all_correct_inputs();
        answers[0] = "  rOSe ".to_string();
        checker.check(&answers, &mut feedback);

        assert_eq!(feedback.fields[0], Some(Mark::Correct));
        assert_eq!(feedback.summary, Some((Mark::Correct, SUCCESS.to_string())));
    }

    #[test]
    fn checking_twice_with_the_same_answers_gives_the_same_verdicts() {
        let checker = family_checker();
        let mut answers = all_correct_inputs();
        answers[7] = "Lawyer".to_string();

        let mut first = RecordedFeedback::new();
        checker.check(&answers, &mut first);
        let mut second = RecordedFeedback::new();
        checker.check(&answers, &mut second);

        assert_eq!(first.fields, second.fields);
        assert_eq!(first.summary, second.summary);
    }

    #[test]
    fn fixing_the_wrong_answer_flips_the_form_on_recheck() {
        let checker = family_checker();
        let mut answers = all_correct_inputs();
        answers[3] = "Hiking".to_string();

        let mut feedback = RecordedFeedback::new();
        checker.check(&answers, &mut feedback);
        assert_eq!(feedback.fields[3], Some(Mark::Incorrect));
        assert_eq!(
            feedback.summary,
            Some((Mark::Incorrect, FAILURE.to_string()))
        );

        answers[3] = "Fishing".to_string();
        checker.check(&answers, &mut feedback);
        assert_eq!(feedback.fields[3], Some(Mark::Correct));
        assert_eq!(feedback.summary, Some((Mark::Correct, SUCCESS.to_string())));
    }

    #[test]
    #[should_panic]
    fn an_answer_key_of_the_wrong_length_is_rejected() {
        AnswerKey::new(vec!["rose".to_string(); FORM_SIZE - 1]);
    }
}
