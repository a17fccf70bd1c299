//! Line sources for the menu.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::Result;
use dialoguer::Input;

/// Something that can ask a question and return one line of input.
pub trait Prompt {
    /// Show `prompt` and read one line. `None` means end of input.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;
}

/// Interactive prompt backed by `dialoguer`.
#[derive(Debug, Default)]
pub struct TermPrompt;

impl Prompt for TermPrompt {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        let answer = Input::<String>::new().with_prompt(prompt).allow_empty(true).interact_text();

        match answer {
            Ok(line) => Ok(Some(line)),
            Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Plain line reader, for piped input and tests.
pub struct LinePrompt<R, W> {
    input: R,
    echo: W,
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, echo: W) -> Self {
        Self { input, echo }
    }
}

impl<R: BufRead, W: Write> Prompt for LinePrompt<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.echo, "{prompt}: ")?;
        self.echo.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// Pick the dialoguer prompt on a terminal, a plain stdin reader otherwise.
pub fn detect() -> Box<dyn Prompt> {
    if io::stdin().is_terminal() && console::user_attended() {
        Box::new(TermPrompt)
    } else {
        Box::new(LinePrompt::new(io::stdin().lock(), io::stdout()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_line_prompt_reads_lines_then_eof() {
        let mut echo = Vec::new();
        let mut prompt = LinePrompt::new(Cursor::new("michigan\r\n2\n"), &mut echo);

        assert_eq!(prompt.read_line("Region").unwrap().as_deref(), Some("michigan"));
        assert_eq!(prompt.read_line("Site").unwrap().as_deref(), Some("2"));
        assert_eq!(prompt.read_line("Site").unwrap(), None);

        assert_eq!(String::from_utf8(echo).unwrap(), "Region: Site: Site: ");
    }

    #[test]
    fn test_line_prompt_keeps_blank_line() {
        let mut prompt = LinePrompt::new(Cursor::new("\n"), io::sink());
        assert_eq!(prompt.read_line("Region").unwrap().as_deref(), Some(""));
    }
}
