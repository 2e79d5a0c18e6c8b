//! Yes/no confirmation prompts.

use std::io::{BufRead, Write};

use crate::error::Result;

pub const CONFLICT_TITLE: &str = "Conflict";
pub const CONFLICT_MESSAGE: &str =
    "This book has been modified by another user. Do you want to overwrite the changes?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAnswer {
    Yes,
    No,
}

/// Asks the user a binary question
pub trait ConfirmPrompt {
    fn ask(&mut self, title: &str, message: &str) -> Result<PromptAnswer>;
}

/// Always gives the same answer. Used when the decision is made up front
/// (flags or config) and for scripted hosts.
#[derive(Debug, Clone, Copy)]
pub struct FixedPrompt {
    answer: PromptAnswer,
    asked: usize,
}

impl FixedPrompt {
    pub fn new(answer: PromptAnswer) -> Self {
        Self { answer, asked: 0 }
    }

    /// Number of times the prompt was shown
    pub fn asked(&self) -> usize {
        self.asked
    }
}

impl ConfirmPrompt for FixedPrompt {
    fn ask(&mut self, _title: &str, _message: &str) -> Result<PromptAnswer> {
        self.asked += 1;
        Ok(self.answer)
    }
}

/// Line-oriented prompt over a reader/writer pair, e.g. stdin/stderr.
/// Only `y` or `yes` (any case) counts as yes; anything else, including
/// end of input, is no.
#[derive(Debug)]
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> ConfirmPrompt for LinePrompt<R, W> {
    fn ask(&mut self, title: &str, message: &str) -> Result<PromptAnswer> {
        write!(self.output, "{title}: {message} [y/N] ")?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        let answer = match line.trim().to_ascii_lowercase().as_str() {
            "y" | "yes" => PromptAnswer::Yes,
            _ => PromptAnswer::No,
        };
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answer_for(input: &str) -> PromptAnswer {
        let mut output = Vec::new();
        let mut prompt = LinePrompt::new(input.as_bytes(), &mut output);
        prompt.ask(CONFLICT_TITLE, CONFLICT_MESSAGE).expect("ask")
    }

    #[test]
    fn line_prompt_accepts_yes_variants() {
        assert_eq!(answer_for("y\n"), PromptAnswer::Yes);
        assert_eq!(answer_for(" YES \n"), PromptAnswer::Yes);
    }

    #[test]
    fn line_prompt_defaults_to_no() {
        assert_eq!(answer_for("n\n"), PromptAnswer::No);
        assert_eq!(answer_for("overwrite\n"), PromptAnswer::No);
        assert_eq!(answer_for(""), PromptAnswer::No);
    }

    #[test]
    fn line_prompt_writes_question() {
        let mut output = Vec::new();
        let mut prompt = LinePrompt::new("y\n".as_bytes(), &mut output);
        prompt.ask("Conflict", "Overwrite?").expect("ask");
        assert_eq!(String::from_utf8_lossy(&output), "Conflict: Overwrite? [y/N] ");
    }

    #[test]
    fn fixed_prompt_counts_questions() {
        let mut prompt = FixedPrompt::new(PromptAnswer::No);
        assert_eq!(prompt.ask("t", "m").expect("ask"), PromptAnswer::No);
        assert_eq!(prompt.asked(), 1);
    }
}
