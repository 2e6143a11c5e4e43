//! Interactive session: read a city, have the model confirm it, read a menu
//! choice, ask the chosen question and print the answer.

use std::future::Future;
use std::io::{BufRead, Write};
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use crate::client::GeminiClient;
use crate::config::CheckFailurePolicy;
use crate::error::{LlmError, SessionError};
use crate::prompt::{query_prompt, QUERY_TOPICS};
use crate::validator::check_city;

const CITY_NOT_FOUND: &str = "ERROR: City does not exist according to LLM.";
const EMPTY_CITY: &str = "ERROR: City name must not be empty.";
const NOT_A_NUMBER: &str = "ERROR: Invalid input type! Must be a number between 1 and 3! Try again.";
const INVALID_CHOICE: &str = "ERROR: Invalid choice! Try again.";

#[derive(Debug)]
enum State {
    AwaitCity,
    CityValidated(String),
    AwaitChoice(String),
    ChoiceValidated { choice: u8, prompt: String },
    AwaitFinalAnswer(String),
    Done(Outcome),
}

/// How the final exchange ended.
#[derive(Debug)]
pub enum Outcome {
    Answered(String),
    Failed(LlmError),
}

pub struct Session<'a, R, W, E> {
    client: &'a GeminiClient,
    on_check_error: CheckFailurePolicy,
    input: R,
    out: W,
    err: E,
}

impl<'a, R, W, E> Session<'a, R, W, E>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    pub fn new(
        client: &'a GeminiClient,
        on_check_error: CheckFailurePolicy,
        input: R,
        out: W,
        err: E,
    ) -> Self {
        Self {
            client,
            on_check_error,
            input,
            out,
            err,
        }
    }

    pub async fn run(mut self) -> Result<Outcome, SessionError> {
        let mut state = State::AwaitCity;
        loop {
            state = match state {
                State::AwaitCity => self.await_city().await?,
                State::CityValidated(city) => {
                    log::info!("city {city:?} accepted");
                    State::AwaitChoice(city)
                }
                State::AwaitChoice(city) => self.await_choice(city)?,
                State::ChoiceValidated { choice, prompt } => {
                    log::info!("menu choice {choice}: {prompt}");
                    State::AwaitFinalAnswer(prompt)
                }
                State::AwaitFinalAnswer(prompt) => self.final_answer(&prompt).await?,
                State::Done(outcome) => return Ok(outcome),
            };
        }
    }

    async fn await_city(&mut self) -> Result<State, SessionError> {
        self.prompt("Enter a city's name: ")?;
        let city = self.read_line()?;

        if city.is_empty() {
            writeln!(self.err, "{EMPTY_CITY}")?;
            return Ok(State::AwaitCity);
        }

        let checked = with_spinner("Checking city...", check_city(self.client, &city)).await;
        match checked {
            Ok(true) => Ok(State::CityValidated(city)),
            Ok(false) => {
                log::warn!("city {city:?} rejected by {}", self.client.model());
                writeln!(self.err, "{CITY_NOT_FOUND}")?;
                Ok(State::AwaitCity)
            }
            Err(e) => self.check_failed(&city, e),
        }
    }

    fn check_failed(&mut self, city: &str, e: LlmError) -> Result<State, SessionError> {
        log::error!("city check for {city:?} failed: {e}");
        match self.on_check_error {
            CheckFailurePolicy::Reprompt => {
                writeln!(self.err, "ERROR: Could not verify city: {e}")?;
                Ok(State::AwaitCity)
            }
            CheckFailurePolicy::Abort => {
                writeln!(self.err, "ERROR: Could not verify city: {e}")?;
                Err(SessionError::CheckFailed(e))
            }
            CheckFailurePolicy::Reject => {
                writeln!(self.err, "{CITY_NOT_FOUND}")?;
                Ok(State::AwaitCity)
            }
        }
    }

    fn await_choice(&mut self, city: String) -> Result<State, SessionError> {
        self.show_menu(&city)?;
        let line = self.read_line()?;

        let Ok(number) = line.parse::<i64>() else {
            log::warn!("non-numeric menu input {line:?}");
            writeln!(self.err, "{NOT_A_NUMBER}")?;
            return Ok(State::AwaitChoice(city));
        };

        let picked = u8::try_from(number)
            .ok()
            .and_then(|choice| query_prompt(choice, &city).map(|prompt| (choice, prompt)));
        match picked {
            Some((choice, prompt)) => Ok(State::ChoiceValidated { choice, prompt }),
            None => {
                log::warn!("menu choice {number} out of range");
                writeln!(self.err, "{INVALID_CHOICE}")?;
                Ok(State::AwaitChoice(city))
            }
        }
    }

    async fn final_answer(&mut self, prompt: &str) -> Result<State, SessionError> {
        match with_spinner("Waiting for the model...", self.client.ask(prompt)).await {
            Ok(text) => {
                let text = text.trim().to_string();
                writeln!(self.out, "LLM Response: {text}")?;
                log::info!("final answer printed");
                Ok(State::Done(Outcome::Answered(text)))
            }
            Err(e) => {
                log::error!("final request failed: {e}");
                writeln!(self.err, "Error: {e}")?;
                Ok(State::Done(Outcome::Failed(e)))
            }
        }
    }

    fn show_menu(&mut self, city: &str) -> Result<(), SessionError> {
        write!(self.out, "\n===== List of Query's ====\n")?;
        for number in QUERY_TOPICS.keys() {
            if let Some(question) = query_prompt(*number, city) {
                writeln!(self.out, "    {number}. {question}")?;
            }
        }
        self.prompt("Enter your choice (1-3): ")
    }

    fn prompt(&mut self, text: &str) -> Result<(), SessionError> {
        write!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<String, SessionError> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(SessionError::InputClosed);
        }
        Ok(line.trim().to_string())
    }
}

// Spinner on stderr while a request is in flight; hidden when stderr is not a terminal.
async fn with_spinner<T>(message: &'static str, fut: impl Future<Output = T>) -> T {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));

    let result = fut.await;
    spinner.finish_and_clear();
    result
}
