//! Interactive overwrite confirmation.

use std::io::{self, BufRead, Stdout, StdinLock, Write};

use console::style;
use tracing::warn;

use cufe_core::scanner::{is_affirmative, ConfirmOverwrite};

/// Asks a yes/no question per file on a line-oriented terminal.
pub struct LinePrompt<R, W> {
    input: R,
    output: W,
}

impl LinePrompt<StdinLock<'static>, Stdout> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LinePrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, file_name: &str) -> io::Result<bool> {
        write!(
            self.output,
            "{} Data for '{}' already exists. Overwrite? (s/n): ",
            style("?").yellow(),
            file_name
        )?;
        self.output.flush()?;

        let mut answer = String::new();
        if self.input.read_line(&mut answer)? == 0 {
            // End of input counts as no.
            writeln!(self.output)?;
            return Ok(false);
        }
        Ok(is_affirmative(&answer))
    }
}

impl<R: BufRead, W: Write> ConfirmOverwrite for LinePrompt<R, W> {
    fn confirm_overwrite(&mut self, file_name: &str) -> bool {
        match self.ask(file_name) {
            Ok(answer) => answer,
            Err(e) => {
                warn!("Could not read answer for {}: {}", file_name, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str) -> LinePrompt<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn test_answers_are_read_in_order() {
        let mut p = prompt("s\nn\nyes\n");
        assert!(p.confirm_overwrite("a.pdf"));
        assert!(!p.confirm_overwrite("b.pdf"));
        assert!(p.confirm_overwrite("c.pdf"));

        let shown = String::from_utf8(p.output).unwrap();
        assert!(shown.contains("'a.pdf'"));
        assert!(shown.contains("'c.pdf'"));
    }

    #[test]
    fn test_end_of_input_declines() {
        let mut p = prompt("");
        assert!(!p.confirm_overwrite("a.pdf"));
    }
}
