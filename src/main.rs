mod quiz;

use std::sync::Arc;

use dotenv::dotenv;
use log::debug;
use quiz::family::{FormRender, QuizStep};
use quiz::wordle::{self, WordleGame};
use quiz::FORM_SIZE;
use teloxide::{
    dispatching::dialogue::{serializer::Json, ErasedStorage, SqliteStorage, Storage},
    prelude::*,
    types::{ChatId, KeyboardButton, KeyboardMarkup},
};

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    ReceiveFullName,
    ReceiveGameChoice,
    FamilyQuizAnswering {
        step_index: usize,
        answers: Vec<String>,
    },
    FamilyQuizReview {
        step_index: usize,
        answers: Vec<String>,
    },
    FamilyQuizPickField {
        step_index: usize,
        answers: Vec<String>,
    },
    FamilyQuizEditField {
        step_index: usize,
        answers: Vec<String>,
        field_index: usize,
    },
    WordleGuessing {
        game: WordleGame,
    },
}

type UserInfoStorage = std::sync::Arc<ErasedStorage<State>>;

#[tokio::main]
async fn main() {
    dotenv().expect("Failed to load .env file");

    pretty_env_logger::init();
    log::info!("Starting family quiz bot...");

    let bot = Bot::from_env();

    println!("Establishing connection to the database...");
    let storage: UserInfoStorage = SqliteStorage::open("db.sqlite", Json)
        .await
        .expect("Failed to open the dialogue database")
        .erase();
    println!("Connection established");

    // The hunt steps are fixed at startup; every chat walks the same three
    let steps = Arc::new(quiz::family::hunt_steps());
    let steps_for_choice = steps.clone();
    let steps_for_answering = steps.clone();
    let steps_for_review = steps.clone();
    let steps_for_pick = steps.clone();
    let steps_for_edit = steps.clone();

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::ReceiveFullName].endpoint(receive_full_name))
            .branch(dptree::case![State::ReceiveGameChoice].endpoint(
                move |bot: Bot, dialogue: QuizDialogue, msg: Message| {
                    receive_game_choice(steps_for_choice.clone(), bot, dialogue, msg)
                },
            ))
            .branch(
                dptree::case![State::FamilyQuizAnswering { step_index, answers }].endpoint(
                    move |bot: Bot,
                          dialogue: QuizDialogue,
                          (step_index, answers): (usize, Vec<String>),
                          msg: Message| {
                        family_quiz_answering(
                            steps_for_answering.clone(),
                            bot,
                            dialogue,
                            (step_index, answers),
                            msg,
                        )
                    },
                ),
            )
            .branch(
                dptree::case![State::FamilyQuizReview { step_index, answers }].endpoint(
                    move |bot: Bot,
                          dialogue: QuizDialogue,
                          (step_index, answers): (usize, Vec<String>),
                          msg: Message| {
                        family_quiz_review(
                            steps_for_review.clone(),
                            bot,
                            dialogue,
                            (step_index, answers),
                            msg,
                        )
                    },
                ),
            )
            .branch(
                dptree::case![State::FamilyQuizPickField { step_index, answers }].endpoint(
                    move |bot: Bot,
                          dialogue: QuizDialogue,
                          (step_index, answers): (usize, Vec<String>),
                          msg: Message| {
                        family_quiz_pick_field(
                            steps_for_pick.clone(),
                            bot,
                            dialogue,
                            (step_index, answers),
                            msg,
                        )
                    },
                ),
            )
            .branch(
                dptree::case![State::FamilyQuizEditField {
                    step_index,
                    answers,
                    field_index
                }]
                .endpoint(
                    move |bot: Bot,
                          dialogue: QuizDialogue,
                          (step_index, answers, field_index): (usize, Vec<String>, usize),
                          msg: Message| {
                        family_quiz_edit_field(
                            steps_for_edit.clone(),
                            bot,
                            dialogue,
                            (step_index, answers, field_index),
                            msg,
                        )
                    },
                ),
            )
            .branch(dptree::case![State::WordleGuessing { game }].endpoint(wordle_guessing)),
    )
    .dependencies(dptree::deps![storage])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

const GREETING_TEXT: &str =
    "👋 Hi! I'm the family game night bot. Let's get to know each other -- what's your name?";
async fn start(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, GREETING_TEXT).await?;

    dialogue.update(State::ReceiveFullName).await?;
    Ok(())
}

const FAMILY_QUIZ_GAME: &str = "Start the family quiz hunt";
const WORDLE_GAME: &str = "Play a word-guessing round";
async fn receive_full_name(bot: Bot, dialogue: QuizDialogue, msg: Message) -> HandlerResult {
    match msg.text() {
        Some(full_name) => {
            bot.send_message(msg.chat.id, format!("Nice to meet you, {}!", full_name))
                .await?;
        }
        None => {
            bot.send_message(msg.chat.id, "Please send your name as text")
                .await?;
            return Ok(());
        }
    }

    bot.send_message(msg.chat.id, "What would you like to play?")
        .reply_markup(game_choice_keyboard())
        .await?;

    dialogue.update(State::ReceiveGameChoice).await?;
    Ok(())
}

fn game_choice_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(FAMILY_QUIZ_GAME),
        KeyboardButton::new(WORDLE_GAME),
    ]])
}

async fn receive_game_choice(
    steps: Arc<Vec<QuizStep>>,
    bot: Bot,
    dialogue: QuizDialogue,
    msg: Message,
) -> HandlerResult {
    match msg.text() {
        Some(FAMILY_QUIZ_GAME) => {
            let step = &steps[0];
            bot.send_message(
                msg.chat.id,
                format!(
                    "{}\nAnswer the questions one by one -- I'll check the whole form at the end.",
                    step.title
                ),
            )
            .await?;
            bot.send_message(msg.chat.id, format!("Question 1: {}", step.prompts[0]))
                .await?;

            dialogue
                .update(State::FamilyQuizAnswering {
                    step_index: 0,
                    answers: Vec::new(),
                })
                .await?;
        }
        Some(WORDLE_GAME) => {
            let game = WordleGame::with_random_secret();
            bot.send_message(
                msg.chat.id,
                format!(
                    "I picked a {}-letter word. You have {} attempts -- send me a guess!",
                    wordle::WORD_LENGTH,
                    wordle::MAX_ATTEMPTS
                ),
            )
            .await?;

            dialogue.update(State::WordleGuessing { game }).await?;
        }
        _ => {
            bot.send_message(msg.chat.id, "Please pick one of the options")
                .reply_markup(game_choice_keyboard())
                .await?;
        }
    }
    Ok(())
}

async fn family_quiz_answering(
    steps: Arc<Vec<QuizStep>>,
    bot: Bot,
    dialogue: QuizDialogue,
    (step_index, mut answers): (usize, Vec<String>),
    msg: Message,
) -> HandlerResult {
    let text = match msg.text() {
        Some(text) => text,
        None => {
            bot.send_message(msg.chat.id, "Please send your answer as text")
                .await?;
            return Ok(());
        }
    };

    let step = &steps[step_index];
    // Answers are stored exactly as typed; trimming and case-folding happen
    // only inside the checker
    answers.push(text.to_string());
    debug!(
        "Stored answer {}/{} for step {}",
        answers.len(),
        FORM_SIZE,
        step_index + 1
    );

    if answers.len() < FORM_SIZE {
        bot.send_message(
            msg.chat.id,
            format!(
                "Question {}: {}",
                answers.len() + 1,
                step.prompts[answers.len()]
            ),
        )
        .await?;

        dialogue
            .update(State::FamilyQuizAnswering { step_index, answers })
            .await?;
        return Ok(());
    }

    send_review(&bot, msg.chat.id, step, &answers).await?;
    dialogue
        .update(State::FamilyQuizReview { step_index, answers })
        .await?;
    Ok(())
}

const CHECK_ANSWERS: &str = "Check my answers";
const CHANGE_ANSWER: &str = "Change an answer";
fn review_keyboard() -> KeyboardMarkup {
    KeyboardMarkup::new(vec![vec![
        KeyboardButton::new(CHECK_ANSWERS),
        KeyboardButton::new(CHANGE_ANSWER),
    ]])
}

async fn send_review(
    bot: &Bot,
    chat_id: ChatId,
    step: &QuizStep,
    answers: &[String],
) -> HandlerResult {
    bot.send_message(chat_id, step.form_text(answers))
        .reply_markup(review_keyboard())
        .await?;
    Ok(())
}

async fn family_quiz_review(
    steps: Arc<Vec<QuizStep>>,
    bot: Bot,
    dialogue: QuizDialogue,
    (step_index, answers): (usize, Vec<String>),
    msg: Message,
) -> HandlerResult {
    let step = &steps[step_index];
    match msg.text() {
        Some(CHECK_ANSWERS) => {
            debug!("Checking the form for step {}", step_index + 1);
            let mut render = FormRender::new(&step.prompts, &answers);
            step.checker.check(&answers, &mut render);

            let solved = render.all_correct();
            bot.send_message(msg.chat.id, render.into_message()).await?;

            if !solved {
                bot.send_message(msg.chat.id, "You can fix an answer and check again")
                    .reply_markup(review_keyboard())
                    .await?;
                return Ok(());
            }

            let next_index = step_index + 1;
            if next_index < steps.len() {
                let next = &steps[next_index];
                bot.send_message(
                    msg.chat.id,
                    format!("{}\n\nQuestion 1: {}", next.title, next.prompts[0]),
                )
                .await?;

                dialogue
                    .update(State::FamilyQuizAnswering {
                        step_index: next_index,
                        answers: Vec::new(),
                    })
                    .await?;
            } else {
                bot.send_message(msg.chat.id, "What would you like to play next?")
                    .reply_markup(game_choice_keyboard())
                    .await?;

                dialogue.update(State::ReceiveGameChoice).await?;
            }
        }
        Some(CHANGE_ANSWER) => {
            bot.send_message(
                msg.chat.id,
                format!("Which answer do you want to change? Send a number from 1 to {}", FORM_SIZE),
            )
            .await?;

            dialogue
                .update(State::FamilyQuizPickField { step_index, answers })
                .await?;
        }
        _ => {
            bot.send_message(msg.chat.id, "Please pick one of the options")
                .reply_markup(review_keyboard())
                .await?;
        }
    }
    Ok(())
}

async fn family_quiz_pick_field(
    steps: Arc<Vec<QuizStep>>,
    bot: Bot,
    dialogue: QuizDialogue,
    (step_index, answers): (usize, Vec<String>),
    msg: Message,
) -> HandlerResult {
    let number = msg.text().and_then(|text| text.trim().parse::<usize>().ok());
    let number = match number {
        Some(number) if (1..=FORM_SIZE).contains(&number) => number,
        _ => {
            bot.send_message(
                msg.chat.id,
                format!("Please send a number from 1 to {}", FORM_SIZE),
            )
            .await?;
            return Ok(());
        }
    };

    let step = &steps[step_index];
    let field_index = number - 1;
    bot.send_message(
        msg.chat.id,
        format!(
            "Question {}: {}\nSend a new answer",
            number, step.prompts[field_index]
        ),
    )
    .await?;

    dialogue
        .update(State::FamilyQuizEditField {
            step_index,
            answers,
            field_index,
        })
        .await?;
    Ok(())
}

async fn family_quiz_edit_field(
    steps: Arc<Vec<QuizStep>>,
    bot: Bot,
    dialogue: QuizDialogue,
    (step_index, mut answers, field_index): (usize, Vec<String>, usize),
    msg: Message,
) -> HandlerResult {
    let text = match msg.text() {
        Some(text) => text,
        None => {
            bot.send_message(msg.chat.id, "Please send the new answer as text")
                .await?;
            return Ok(());
        }
    };

    answers[field_index] = text.to_string();

    let step = &steps[step_index];
    send_review(&bot, msg.chat.id, step, &answers).await?;
    dialogue
        .update(State::FamilyQuizReview { step_index, answers })
        .await?;
    Ok(())
}

async fn wordle_guessing(
    bot: Bot,
    dialogue: QuizDialogue,
    mut game: WordleGame,
    msg: Message,
) -> HandlerResult {
    let guess = match msg.text() {
        Some(text) => text,
        None => {
            bot.send_message(msg.chat.id, "Please send your guess as text")
                .await?;
            return Ok(());
        }
    };

    if !wordle::is_valid_guess(guess) {
        bot.send_message(
            msg.chat.id,
            format!("I need a single {}-letter word", wordle::WORD_LENGTH),
        )
        .await?;
        return Ok(());
    }

    let scores = game.submit(guess);
    bot.send_message(msg.chat.id, wordle::render_tiles(guess, &scores))
        .await?;

    if game.is_won() {
        bot.send_message(
            msg.chat.id,
            format!(
                "🎉 You got it in {} tries! What would you like to play next?",
                game.guesses.len()
            ),
        )
        .reply_markup(game_choice_keyboard())
        .await?;

        dialogue.update(State::ReceiveGameChoice).await?;
        return Ok(());
    }

    if game.is_over() {
        bot.send_message(
            msg.chat.id,
            format!(
                "Out of attempts! The word was \"{}\". What would you like to play next?",
                game.secret
            ),
        )
        .reply_markup(game_choice_keyboard())
        .await?;

        dialogue.update(State::ReceiveGameChoice).await?;
        return Ok(());
    }

    bot.send_message(
        msg.chat.id,
        format!("{} attempts left", game.attempts_left()),
    )
    .await?;

    dialogue.update(State::WordleGuessing { game }).await?;
    Ok(())
}
