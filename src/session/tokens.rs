use std::{collections::VecDeque, io::BufRead, str::FromStr};

use anyhow::{Context, Result};

/// Splits console input into whitespace separated tokens, regardless of how
/// they are spread over lines.
pub struct TokenReader<R> {
    source: R,
    pending: VecDeque<String>,
}

impl<R> TokenReader<R>
where
    R: BufRead,
{
    pub fn new(source: R) -> Self {
        Self {
            source,
            pending: VecDeque::new(),
        }
    }

    pub fn next_token(&mut self) -> Result<String> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }
            let mut line = String::new();
            let read = self
                .source
                .read_line(&mut line)
                .context("Failed to read input")?;
            if read == 0 {
                anyhow::bail!("Input ended unexpectedly");
            }
            self.pending
                .extend(line.split_whitespace().map(ToOwned::to_owned));
        }
    }

    pub fn parse_next<T>(&mut self, what: &str) -> Result<T>
    where
        T: FromStr,
        T::Err: std::error::Error + Send + Sync + 'static,
    {
        let token = self.next_token()?;
        token
            .parse()
            .with_context(|| format!("`{token}` is not a valid {what}"))
    }
}
