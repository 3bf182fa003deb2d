use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};

/// Line-at-a-time questions to the user.
pub struct Prompt<R> {
    lines: Lines<R>,
}

impl Prompt<BufReader<Stdin>> {
    pub fn stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }
}

impl<R: AsyncBufRead + Unpin> Prompt<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }

    /// Prints `question` and waits for an answer. `None` once input is closed.
    pub async fn ask(&mut self, question: &str) -> Result<Option<String>> {
        print!("{question}");
        std::io::stdout().flush().context("could not write prompt")?;
        let line = self.lines.next_line().await.context("could not read input")?;
        Ok(line.map(|line| line.trim().to_owned()))
    }
}

/// Turns a 1-based menu choice into an index below `count`.
pub fn parse_choice(input: &str, count: usize) -> Option<usize> {
    let choice: usize = input.trim().parse().ok()?;
    (1..=count).contains(&choice).then(|| choice - 1)
}

/// What the user can do once every question has been seen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExamCommand {
    /// Both numbers are 1-based, as shown on screen.
    Answer { question: usize, option: usize },
    Show,
    Submit,
    Quit,
}

impl ExamCommand {
    pub fn parse(input: &str) -> Option<Self> {
        let words: Vec<&str> = input.split_whitespace().collect();
        match words.as_slice() {
            [question, option] => Some(Self::Answer {
                question: question.parse().ok()?,
                option: option.parse().ok()?,
            }),
            [word] => match word.to_ascii_lowercase().as_str() {
                "show" | "l" => Some(Self::Show),
                "submit" | "s" => Some(Self::Submit),
                "quit" | "q" => Some(Self::Quit),
                _ => None,
            },
            _ => None,
        }
    }
}
