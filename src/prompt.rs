use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Blocking yes/no confirmation. Injected so the install flow can be
/// driven by a deterministic stub in tests instead of a real terminal.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str, default_yes: bool) -> Result<bool>;
}

impl<C: Confirm + ?Sized> Confirm for &mut C {
    fn confirm(&mut self, prompt: &str, default_yes: bool) -> Result<bool> {
        (**self).confirm(prompt, default_yes)
    }
}

/// Reads answers from stdin, re-prompting until the input parses.
/// An empty line takes the default.
pub struct TerminalConfirm;

impl Confirm for TerminalConfirm {
    fn confirm(&mut self, prompt: &str, default_yes: bool) -> Result<bool> {
        let suffix = if default_yes { "[Y/n]" } else { "[y/N]" };
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            print!("{} {} ", prompt, suffix.dimmed());
            io::stdout().flush().context("Failed to flush stdout")?;

            let line = match lines.next() {
                Some(line) => line.context("Failed to read confirmation input")?,
                // stdin closed, e.g. piped input ran out
                None => return Ok(default_yes),
            };

            if let Some(answer) = parse_answer(&line, default_yes) {
                return Ok(answer);
            }
            println!("{}", "Please answer y or n.".yellow());
        }
    }
}

/// Answers every prompt affirmatively (`--yes`).
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str, _default_yes: bool) -> Result<bool> {
        Ok(true)
    }
}

fn parse_answer(input: &str, default_yes: bool) -> Option<bool> {
    match input.trim().to_ascii_lowercase().as_str() {
        "" => Some(default_yes),
        "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}
