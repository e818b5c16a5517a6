use std::fmt::Display;
use std::io::Write;
use std::ops::RangeInclusive;
use std::time::Duration;

use tokio_stream::{Stream, StreamExt};

use super::ConsoleError;
use crate::Amount;

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Line-oriented operator terminal.
///
/// Reads one line per prompt from `input` and writes everything to `out`.
/// Every `read_*` helper loops until it gets a usable answer, so a run of
/// bad input never grows the stack.
pub struct Terminal<S, W> {
    input: S,
    out: W,
    clear: bool,
    pace: Duration,
}

impl<S, W> Terminal<S, W>
where
    S: Stream<Item = String> + Unpin,
    W: Write,
{
    pub fn new(input: S, out: W, clear: bool, pace: Duration) -> Self {
        Self {
            input,
            out,
            clear,
            pace,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    pub fn say(&mut self, text: impl Display) -> Result<(), ConsoleError> {
        writeln!(self.out, "{text}")?;
        self.out.flush()?;
        Ok(())
    }

    pub fn clear(&mut self) -> Result<(), ConsoleError> {
        if self.clear {
            write!(self.out, "{CLEAR_SCREEN}")?;
            self.out.flush()?;
        }
        Ok(())
    }

    /// Cosmetic delay so status messages can be read before the screen clears.
    pub async fn pause(&self) {
        if !self.pace.is_zero() {
            tokio::time::sleep(self.pace).await;
        }
    }

    pub async fn read_line(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        write!(self.out, "{prompt}")?;
        self.out.flush()?;
        let line = self.input.next().await.ok_or(ConsoleError::InputClosed)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Read a menu option within `range`.
    pub async fn read_choice(
        &mut self,
        prompt: &str,
        range: RangeInclusive<usize>,
    ) -> Result<usize, ConsoleError> {
        loop {
            let line = self.read_line(prompt).await?;
            match first_token(&line).parse::<usize>() {
                Ok(choice) if range.contains(&choice) => return Ok(choice),
                _ => self.say("INVALID OPTION\nPLEASE ENTER A VALID OPTION\n")?,
            }
        }
    }

    pub async fn read_integer(&mut self, prompt: &str) -> Result<i64, ConsoleError> {
        loop {
            let line = self.read_line(prompt).await?;
            match first_token(&line).parse::<i64>() {
                Ok(value) => return Ok(value),
                Err(_) => self.say("INVALID OPTION\nPLEASE ENTER A VALID OPTION\n")?,
            }
        }
    }

    pub async fn read_amount(&mut self, prompt: &str) -> Result<Amount, ConsoleError> {
        loop {
            let line = self.read_line(prompt).await?;
            match first_token(&line).parse::<Amount>() {
                Ok(amount) => return Ok(amount),
                Err(_) => self.say("INVALID AMOUNT! PLEASE ENTER A VALID VALUE!\n")?,
            }
        }
    }

    /// Ask a yes/no question; only `Y` or `N` (any case) is accepted.
    pub async fn confirm(&mut self, prompt: &str) -> Result<bool, ConsoleError> {
        loop {
            let line = self.read_line(prompt).await?;
            match answer(&line) {
                Some('Y') => return Ok(true),
                Some('N') => return Ok(false),
                _ => self.say("INVALID INPUT\nPLEASE ENTER ONLY 'Y' OR 'N'\n")?,
            }
        }
    }

    /// Wait until the operator answers `Y`.
    pub async fn acknowledge(&mut self, prompt: &str) -> Result<(), ConsoleError> {
        loop {
            let line = self.read_line(prompt).await?;
            if answer(&line) == Some('Y') {
                return Ok(());
            }
            self.say("PLEASE ENTER 'Y' TO EXIT\n")?;
        }
    }
}

fn first_token(line: &str) -> &str {
    line.split_whitespace().next().unwrap_or("")
}

/// A single-character answer, case-folded. Longer words are not answers.
fn answer(line: &str) -> Option<char> {
    let mut chars = line.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c.to_ascii_uppercase()),
        _ => None,
    }
}
