//! Password acceptability policy.
//!
//! A password is accepted when it is at least [`MIN_PASSWORD_LENGTH`] characters
//! long, is not a well-known weak password, and no run of consecutively
//! repeated characters (case-insensitive) covers more than 40% of it.

mod dictionary;

pub use dictionary::{WEAK_PASSWORDS, WEAK_PASSWORD_MAX_LENGTH};

use crate::config::{GOOD_PASSWORD_LENGTH, MAX_CONSECUTIVE_REPETITION, MIN_PASSWORD_LENGTH};
use serde::{Deserialize, Serialize};

/// Rating of a password against the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PasswordQuality {
    /// Rejected by the policy.
    Unacceptable,
    /// Accepted.
    Acceptable,
    /// Accepted and at least [`GOOD_PASSWORD_LENGTH`] characters long.
    Good,
}

/// Check whether a password is accepted by the policy.
pub fn is_accepted(password: &str) -> bool {
    let length = password.chars().count();
    if length < MIN_PASSWORD_LENGTH {
        return false;
    }

    let lower_case = password.to_lowercase();
    if length <= WEAK_PASSWORD_MAX_LENGTH && dictionary::is_weak(&lower_case) {
        return false;
    }

    // Each character of a run adds 1/length; a new character restarts the run.
    let step = 1.0 / length as f32;
    let mut repetition = step;
    let mut previous = None;
    for c in lower_case.chars() {
        if previous == Some(c) {
            repetition += step;
        } else {
            repetition = step;
        }
        if repetition > MAX_CONSECUTIVE_REPETITION {
            return false;
        }
        previous = Some(c);
    }

    true
}

/// Rate a password.
pub fn quality(password: &str) -> PasswordQuality {
    if !is_accepted(password) {
        return PasswordQuality::Unacceptable;
    }
    if has_good_length(password) {
        PasswordQuality::Good
    } else {
        PasswordQuality::Acceptable
    }
}

/// Check whether a password is accepted and rated good.
pub fn is_good(password: &str) -> bool {
    quality(password) == PasswordQuality::Good
}

fn has_good_length(password: &str) -> bool {
    password.chars().count() >= GOOD_PASSWORD_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_password_rejected() {
        assert!(!is_accepted(""));
        assert!(!is_accepted("x7#Kp2q"));
        assert!(is_accepted("x7#Kp2qZ"));
    }

    #[test]
    fn test_weak_password_rejected_case_insensitive() {
        assert_eq!(quality("12345678"), PasswordQuality::Unacceptable);
        assert!(!is_accepted("PassWord"));
        assert!(!is_accepted("QwertyUiop"));
    }

    #[test]
    fn test_weak_word_inside_longer_password_accepted() {
        assert!(is_accepted("password!2024"));
    }

    #[test]
    fn test_repeated_characters_rejected() {
        assert_eq!(quality("aaaaaaaaaaaaaaaa"), PasswordQuality::Unacceptable);
        // 4 of 10 is exactly 40%, 5 of 10 is over.
        assert!(is_accepted("aaaaB3c$d9"));
        assert!(!is_accepted("aaaaaB3c$d"));
    }

    #[test]
    fn test_repetition_ignores_case() {
        assert!(!is_accepted("aAaAaB3c$d"));
    }

    #[test]
    fn test_repetition_run_restarts() {
        // Runs of 3 never add up across different characters.
        assert!(is_accepted("aaabbbcccd"));
    }

    #[test]
    fn test_quality_levels() {
        assert_eq!(quality("Tr0ub4dor&3x"), PasswordQuality::Acceptable);
        assert_eq!(quality("x7#Kp2qZ"), PasswordQuality::Acceptable);
        assert_eq!(quality("cT9$wLq2!vRb8#Nz"), PasswordQuality::Good);
        assert!(is_good("cT9$wLq2!vRb8#Nz"));
        assert!(!is_good("Tr0ub4dor&3x"));
    }

    #[test]
    fn test_quality_serializes_by_name() {
        let json = serde_json::to_string(&quality("cT9$wLq2!vRb8#Nz")).unwrap();
        assert_eq!(json, "\"Good\"");

        let parsed: PasswordQuality = serde_json::from_str("\"Unacceptable\"").unwrap();
        assert_eq!(parsed, PasswordQuality::Unacceptable);
    }
}
