//! Confirmation gates
//!
//! Destructive actions (deleting an envelope, overwriting a started month)
//! ask before they happen. The question goes through a trait so the CLI can
//! prompt on stdin while `--yes` and tests answer automatically.

use std::io::{BufRead, Write};

/// Something that can answer a yes/no question
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Prompts on stdout and reads the answer from stdin
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} (yes/no): ", prompt);
        if std::io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match std::io::stdin().lock().read_line(&mut answer) {
            Ok(_) => is_yes(&answer),
            Err(_) => false,
        }
    }
}

/// Answers yes to everything (`--yes`)
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_yes() {
        assert!(is_yes("yes\n"));
        assert!(is_yes(" Y "));
        assert!(!is_yes("no"));
        assert!(!is_yes(""));
    }

    #[test]
    fn test_always_confirm() {
        assert!(AlwaysConfirm.confirm("Delete everything?"));
    }
}
