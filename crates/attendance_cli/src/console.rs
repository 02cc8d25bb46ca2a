//! Line-oriented prompting over any reader/writer pair.
//!
//! # Invariants
//! - Invalid answers are re-asked at most `MAX_PROMPT_ATTEMPTS` times.
//! - End of input is reported as `None`, never as an error.

use std::io::{self, BufRead, Write};

pub const MAX_PROMPT_ATTEMPTS: usize = 3;

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, line: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", line.as_ref())
    }

    /// Prints `question` and reads one trimmed answer.
    pub fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks until `parse` accepts the answer or attempts run out.
    ///
    /// Each rejection prints `retry_hint`. Returns `None` on end of input or
    /// after the last failed attempt.
    pub fn ask_until<T, E>(
        &mut self,
        question: &str,
        retry_hint: &str,
        parse: impl Fn(&str) -> Result<T, E>,
    ) -> io::Result<Option<T>> {
        for _ in 0..MAX_PROMPT_ATTEMPTS {
            let Some(answer) = self.ask(question)? else {
                return Ok(None);
            };
            match parse(&answer) {
                Ok(value) => return Ok(Some(value)),
                Err(_) => self.say(retry_hint)?,
            }
        }
        Ok(None)
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }
}
