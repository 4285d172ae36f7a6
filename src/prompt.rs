use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use colored::Colorize;

use crate::models::Threshold;

/// Ask for a similarity threshold on stdin until a valid one is entered.
pub fn prompt_threshold() -> Result<Threshold> {
    let stdin = std::io::stdin();
    let stderr = std::io::stderr();
    prompt_threshold_from(&mut stdin.lock(), &mut stderr.lock())
}

/// Re-prompts on invalid input; fails if the input ends first.
pub fn prompt_threshold_from<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
) -> Result<Threshold> {
    let mut line = String::new();
    loop {
        write!(out, "Enter minimum similarity threshold (0-100): ")?;
        out.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            bail!("no threshold entered");
        }

        match line.parse::<Threshold>() {
            Ok(threshold) => return Ok(threshold),
            Err(e) => {
                tracing::debug!(input = line.trim(), "rejected threshold");
                writeln!(
                    out,
                    "{} {}. Please enter a number between 0 and 100",
                    "✗".red(),
                    e
                )?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_valid_threshold() {
        let mut input = "85\n".as_bytes();
        let mut out = Vec::new();
        let t = prompt_threshold_from(&mut input, &mut out).unwrap();
        assert_eq!(t.value(), 85);
    }

    #[test]
    fn test_reprompts_until_valid() {
        let mut input = "abc\n150\n 90% \n".as_bytes();
        let mut out = Vec::new();
        let t = prompt_threshold_from(&mut input, &mut out).unwrap();
        assert_eq!(t.value(), 90);

        let transcript = String::from_utf8(out).unwrap();
        assert_eq!(transcript.matches("Enter minimum similarity").count(), 3);
        assert_eq!(transcript.matches("between 0 and 100").count(), 4);
    }

    #[test]
    fn test_eof_aborts() {
        let mut input = "101\n".as_bytes();
        let mut out = Vec::new();
        assert!(prompt_threshold_from(&mut input, &mut out).is_err());
    }
}
