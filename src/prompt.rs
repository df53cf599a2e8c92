use anyhow::{Context, Result};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

use crate::ui::theme;

/// Terminal interaction the card workflow needs. Swapped for a scripted
/// implementation in tests.
pub trait Prompter {
    /// Free text, returned untrimmed. May be empty.
    fn input(&mut self, question: &str) -> Result<String>;
    /// Index into `items` of the entry the user picked. `items` is never empty.
    fn select(&mut self, question: &str, items: &[String]) -> Result<usize>;
    fn warn(&mut self, message: &str);
    fn say(&mut self, message: &str);
}

pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }
}

impl Prompter for TerminalPrompter {
    fn input(&mut self, question: &str) -> Result<String> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()
            .with_context(|| format!("Failed to read answer to '{question}'"))
    }

    fn select(&mut self, question: &str, items: &[String]) -> Result<usize> {
        Select::with_theme(&self.theme)
            .with_prompt(question)
            .items(items)
            .default(0)
            .interact()
            .with_context(|| format!("Failed to read choice for '{question}'"))
    }

    fn warn(&mut self, message: &str) {
        println!("{}", theme::warning(message));
    }

    fn say(&mut self, message: &str) {
        println!("{message}");
    }
}

/// Ask `question` until `accept` takes the trimmed answer. Each rejection
/// prints the returned warning and asks again.
pub fn ask_until<P, T>(
    prompter: &mut P,
    question: &str,
    mut accept: impl FnMut(&str) -> std::result::Result<T, String>,
) -> Result<T>
where
    P: Prompter + ?Sized,
{
    loop {
        let answer = prompter.input(question)?;
        match accept(answer.trim()) {
            Ok(value) => return Ok(value),
            Err(warning) => prompter.warn(&warning),
        }
    }
}

/// Acceptor for answers that must not be blank.
pub fn required(what: &str) -> impl FnMut(&str) -> std::result::Result<String, String> + '_ {
    move |answer| {
        if answer.is_empty() {
            Err(format!("{what} cannot be empty!"))
        } else {
            Ok(answer.to_string())
        }
    }
}
