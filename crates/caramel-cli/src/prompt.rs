//! Line-oriented user interaction.

use std::io::{self, Write};

/// Asks questions and reports messages to the user.
pub trait Prompter {
    /// Show `question` and read one answer line, trimmed.
    ///
    /// End of input reads as an empty answer.
    fn ask(&mut self, question: &str) -> io::Result<String>;

    /// Show a line of output.
    fn say(&mut self, message: &str) -> io::Result<()>;
}

/// Prompter on the process's stdin/stdout.
///
/// Each read goes through the shared stdin buffer, so several prompters
/// can take turns without losing input.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdioPrompter;

impl Prompter for StdioPrompter {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        let mut stdout = io::stdout().lock();
        write!(stdout, "{question}")?;
        stdout.flush()?;
        drop(stdout);

        let mut line = String::new();
        io::stdin().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(io::stdout().lock(), "{message}")
    }
}

/// Replays canned answers and records everything shown.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: std::collections::VecDeque<String>,
    pub transcript: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            transcript: Vec::new(),
        }
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn ask(&mut self, question: &str) -> io::Result<String> {
        self.transcript.push(question.to_string());
        Ok(self.answers.pop_front().unwrap_or_default())
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        self.transcript.push(message.to_string());
        Ok(())
    }
}
