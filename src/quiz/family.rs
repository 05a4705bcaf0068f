use crate::quiz::{AnswerChecker, AnswerKey, Feedback, Mark, QuizConfig, FORM_SIZE};

// One page of the hunt: ten questions about the family, checked all at once.
// Solving a step unlocks the next one.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct QuizStep {
    pub title: String,
    pub prompts: Vec<String>,
    pub checker: AnswerChecker,
}

impl QuizStep {
    pub fn new(title: &str, prompts: [&str; FORM_SIZE], config: QuizConfig) -> Self {
        Self {
            title: title.to_string(),
            prompts: prompts.iter().map(|p| p.to_string()).collect(),
            checker: AnswerChecker::new(config),
        }
    }

    pub fn form_text(&self, answers: &[String]) -> String {
        let mut lines = vec![format!("{}\nYour answers so far:", self.title)];
        for (i, prompt) in self.prompts.iter().enumerate() {
            lines.push(format!("{}. {} -- \"{}\"", i + 1, prompt, answers[i]));
        }
        lines.join("\n")
    }
}

pub fn hunt_steps() -> Vec<QuizStep> {
    vec![
        QuizStep::new(
            "Step 1: How well do you know the family?",
            [
                "What is Mom's favorite flower?",
                "In which city was Dad born?",
                "What is Aunt Susan's middle name?",
                "What is Grandpa's favorite hobby?",
                "In which month is Grandma's birthday?",
                "What was the name of the family's first pet?",
                "Which country did the family immigrate from?",
                "What is Uncle Tom's profession?",
                "What is Cousin Sarah's favorite color?",
                "Where did the family spend last Christmas?",
            ],
            QuizConfig::new(
                AnswerKey::new(
                    [
                        "rose", "chicago", "marie", "fishing", "july", "buddy", "italy",
                        "doctor", "blue", "cabin",
                    ]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                ),
                "🎉 All answers are correct! Proceed to the next step!".to_string(),
                "❌ Some answers are incorrect. Please review and try again!".to_string(),
            ),
        ),
        QuizStep::new(
            "Step 2: Family travels and traditions",
            [
                "Which lake did the summer trips always go to?",
                "What dish does Grandma cook every Sunday?",
                "What board game does the family play on holidays?",
                "What was the make of Dad's first car?",
                "Which song does Mom sing on every road trip?",
                "What street was the old family house on?",
                "What does Grandpa call his workshop?",
                "Which baseball team does Uncle Tom root for?",
                "What flavor is the traditional birthday cake?",
                "What was the secret word for the treehouse?",
            ],
            QuizConfig::new(
                AnswerKey::new(
                    [
                        "michigan", "lasagna", "monopoly", "ford", "jolene", "maple", "den",
                        "cubs", "chocolate", "pineapple",
                    ]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                ),
                "🎉 Step two solved! One more step to go!".to_string(),
                "❌ Not quite -- some answers are wrong. Try again!".to_string(),
            ),
        ),
        QuizStep::new(
            "Step 3: The final step -- little family secrets",
            [
                "Who taught Mom to ride a bike?",
                "What instrument did Dad play in school?",
                "What was Cousin Sarah's imaginary friend called?",
                "Which holiday is Grandma's favorite?",
                "What did the first family dog bury in the yard?",
                "In which city was the honeymoon?",
                "What is Aunt Susan allergic to?",
                "What nickname did Grandpa earn in the navy?",
                "How many candles were on the cake at the last reunion?",
                "Where is the spare key hidden?",
            ],
            QuizConfig::new(
                AnswerKey::new(
                    [
                        "grandpa",
                        "trumpet",
                        "pip",
                        "easter",
                        "slipper",
                        "paris",
                        "strawberries",
                        "sparky",
                        "eighty",
                        "birdhouse",
                    ]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
                ),
                "🏆 You found all the answers! The hunt is complete!".to_string(),
                "❌ So close! Check your answers one more time!".to_string(),
            ),
        ),
    ]
}

// Collects the per-question verdicts and the summary into one chat message.
pub struct FormRender<'a> {
    prompts: &'a [String],
    answers: &'a [String],
    marks: Vec<Option<Mark>>,
    summary: Option<(Mark, String)>,
}

impl<'a> FormRender<'a> {
    pub fn new(prompts: &'a [String], answers: &'a [String]) -> Self {
        Self {
            prompts,
            answers,
            marks: vec![None; FORM_SIZE],
            summary: None,
        }
    }

    pub fn all_correct(&self) -> bool {
        matches!(self.summary, Some((Mark::Correct, _)))
    }

    pub fn into_message(self) -> String {
        let mut lines = Vec::new();
        for (i, mark) in self.marks.iter().enumerate() {
            let tag = match mark {
                Some(Mark::Correct) => "✅",
                Some(Mark::Incorrect) => "❌",
                None => continue,
            };
            lines.push(format!(
                "{} {}. {} -- \"{}\"",
                tag,
                i + 1,
                self.prompts[i],
                self.answers[i]
            ));
        }
        if let Some((_, message)) = self.summary {
            lines.push(String::new());
            lines.push(message);
        }
        lines.join("\n")
    }
}

impl Feedback for FormRender<'_> {
    fn set_field_state(&mut self, index: usize, mark: Mark) {
        self.marks[index] = Some(mark);
    }

    fn set_summary(&mut self, mark: Mark, message: &str) {
        self.summary = Some((mark, message.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_hunt_step_has_a_full_form() {
        let steps = hunt_steps();
        assert_eq!(steps.len(), 3);
        for step in &steps {
            assert_eq!(step.prompts.len(), FORM_SIZE);
            assert!(!step.title.is_empty());
        }
    }

    #[test]
    fn render_marks_each_question_and_appends_the_summary() {
        let steps = hunt_steps();
        let step = &steps[0];
        let answers: Vec<String> = [
            "Rose", "Chicago", "Marie", "Hiking", "July", "Buddy", "Italy", "Doctor",
            "Blue", "Cabin",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let mut render = FormRender::new(&step.prompts, &answers);
        step.checker.check(&answers, &mut render);

        assert!(!render.all_correct());
        let message = render.into_message();
        assert!(message.contains("✅ 1. What is Mom's favorite flower? -- \"Rose\""));
        assert!(message.contains("❌ 4. What is Grandpa's favorite hobby? -- \"Hiking\""));
        assert!(message.ends_with("❌ Some answers are incorrect. Please review and try again!"));
    }

    #[test]
    fn render_reports_success_when_the_whole_form_matches() {
        let steps = hunt_steps();
        let step = &steps[0];
        let answers: Vec<String> = [
            "rose", "chicago", "marie", "fishing", "july", "buddy", "italy", "doctor",
            "blue", "cabin",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let mut render = FormRender::new(&step.prompts, &answers);
        step.checker.check(&answers, &mut render);

        assert!(render.all_correct());
        assert!(render
            .into_message()
            .ends_with("🎉 All answers are correct! Proceed to the next step!"));
    }

    #[test]
    fn form_text_lists_the_questions_with_the_stored_answers() {
        let steps = hunt_steps();
        let step = &steps[0];
        let answers = vec!["Rose".to_string(); FORM_SIZE];

        let text = step.form_text(&answers);
        assert!(text.starts_with("Step 1"));
        assert!(text.contains("2. In which city was Dad born? -- \"Rose\""));
    }
}
