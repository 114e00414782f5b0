//! Operator prompts: directory selection and retry confirmation.
//!
//! [`Prompter`] is generic over its input and output so the dialogs can be
//! driven from tests; [`Prompter::stdio`] is what the binary uses.

use std::io::{self, BufRead, Stdin, Stdout, Write};
use std::path::PathBuf;

use crate::delete::{Confirm, WaveReport};

/// Line-oriented question/answer dialog.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::BufReader<Stdin>, Stdout> {
    /// Prompter on the process's stdin/stdout.
    pub fn stdio() -> Self {
        Self::new(io::BufReader::new(io::stdin()), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Creates a prompter over arbitrary streams.
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Writes `question` and reads one trimmed line. `None` on end of input.
    pub fn ask_line(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks a Y/N question. Anything not starting with `y` is a no, and so is
    /// end of input.
    pub fn ask_yes_no(&mut self, question: &str) -> io::Result<bool> {
        Ok(self
            .ask_line(question)?
            .is_some_and(|answer| answer.to_lowercase().starts_with('y')))
    }

    /// Lets the operator pick the export directory.
    ///
    /// `preset` is offered first. With `auto_confirm` a non-empty preset is
    /// taken without asking. Returns `None` if input ends before a directory
    /// was confirmed.
    pub fn select_dir(
        &mut self,
        preset: Option<&str>,
        auto_confirm: bool,
    ) -> io::Result<Option<PathBuf>> {
        let mut candidate = preset.filter(|p| !p.is_empty()).map(str::to_string);
        if auto_confirm {
            if let Some(dir) = candidate {
                return Ok(Some(PathBuf::from(dir)));
            }
        }

        loop {
            let dir = match candidate.take() {
                Some(dir) => dir,
                None => match self.ask_line("Select a directory to scan (use . for current): ")? {
                    Some(dir) if !dir.is_empty() => dir,
                    Some(_) => continue,
                    None => return Ok(None),
                },
            };

            writeln!(self.output, "Selected directory: \"{dir}\"")?;
            if self.ask_yes_no("Is this correct? (Y/N): ")? {
                return Ok(Some(PathBuf::from(dir)));
            }
            writeln!(self.output, "Selected No, trying again.")?;
        }
    }
}

/// Asks the operator before every retry wave.
pub struct PromptConfirm<R, W> {
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    /// Wraps a prompter.
    pub fn new(prompter: Prompter<R, W>) -> Self {
        Self { prompter }
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, wave: usize, report: &WaveReport) -> bool {
        let pending = report.retry.summary();
        let question = format!(
            "Wave {wave}: {pending} still pending after rate limiting. Retry them? (Y/N): "
        );
        // An unreadable terminal means nobody can consent.
        self.prompter.ask_yes_no(&question).unwrap_or(false)
    }
}
