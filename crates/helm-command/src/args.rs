//! Parsed invocation arguments.

use crate::{CommandError, UnknownFlag};
use std::collections::BTreeSet;

/// The parsed arguments of one invocation.
///
/// Raw tokens are split into flags and positional arguments at dispatch
/// time, after the binding's declared flags are known. Created per
/// dispatch call; consumed and discarded.
///
/// # Flag Syntax
///
/// Leading tokens of the form `-abc` (all alphabetic) are flag tokens;
/// each character must be declared by the binding. The first
/// non-flag token ends flag parsing. A lone `--` also ends flag parsing
/// without being an argument.
///
/// # Example
///
/// ```
/// use helm_command::CommandArgs;
///
/// let raw: Vec<String> = ["-s", "Alice", "goodbye"]
///     .iter().map(|s| s.to_string()).collect();
/// let args = CommandArgs::parse(&raw, "s").unwrap();
///
/// assert!(args.has_flag('s'));
/// assert_eq!(args.len(), 2);
/// assert_eq!(args.string(0), Some("Alice"));
/// assert_eq!(args.joined(1), "goodbye");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArgs {
    tokens: Vec<String>,
    flags: BTreeSet<char>,
}

impl CommandArgs {
    /// Splits raw tokens into flags and positional arguments.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownFlag`] if a flag token carries a character not in
    /// `declared`.
    pub fn parse(raw: &[String], declared: &str) -> Result<Self, UnknownFlag> {
        let mut flags = BTreeSet::new();
        let mut rest = 0;

        for token in raw {
            if token == "--" {
                rest += 1;
                break;
            }
            let is_flag_token = token.len() > 1
                && token.starts_with('-')
                && token[1..].chars().all(|c| c.is_ascii_alphabetic());
            if !is_flag_token {
                break;
            }
            for c in token[1..].chars() {
                if !declared.contains(c) {
                    return Err(UnknownFlag(c));
                }
                flags.insert(c);
            }
            rest += 1;
        }

        Ok(Self {
            tokens: raw[rest..].to_vec(),
            flags,
        })
    }

    /// Number of positional arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if there are no positional arguments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the positional argument at `index`, if present.
    #[must_use]
    pub fn string(&self, index: usize) -> Option<&str> {
        self.tokens.get(index).map(String::as_str)
    }

    /// Parses the positional argument at `index` as an integer.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::NumberExpected`] if the token is absent or
    /// not a valid integer - the distinct numeric-parse failure of the
    /// dispatch taxonomy.
    pub fn integer(&self, index: usize) -> Result<i64, CommandError> {
        let token = self.string(index).unwrap_or_default();
        token
            .parse()
            .map_err(|_| CommandError::NumberExpected {
                token: token.to_string(),
            })
    }

    /// Joins the positional arguments from `from` onward with spaces.
    #[must_use]
    pub fn joined(&self, from: usize) -> String {
        if from >= self.tokens.len() {
            return String::new();
        }
        self.tokens[from..].join(" ")
    }

    /// Returns `true` if flag `c` was given.
    #[must_use]
    pub fn has_flag(&self, c: char) -> bool {
        self.flags.contains(&c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn no_flags() {
        let args = CommandArgs::parse(&raw(&["Alice", "spam"]), "").unwrap();
        assert_eq!(args.len(), 2);
        assert_eq!(args.string(0), Some("Alice"));
        assert_eq!(args.string(2), None);
    }

    #[test]
    fn declared_flags_are_consumed() {
        let args = CommandArgs::parse(&raw(&["-so", "Alice"]), "sox").unwrap();
        assert!(args.has_flag('s'));
        assert!(args.has_flag('o'));
        assert!(!args.has_flag('x'));
        assert_eq!(args.len(), 1);
    }

    #[test]
    fn undeclared_flag_rejected() {
        let err = CommandArgs::parse(&raw(&["-q", "Alice"]), "s").unwrap_err();
        assert_eq!(err, UnknownFlag('q'));
    }

    #[test]
    fn flag_parsing_stops_at_first_positional() {
        // "-5" is not alphabetic, so it is a positional argument, not a
        // flag token.
        let args = CommandArgs::parse(&raw(&["Alice", "-s"]), "s").unwrap();
        assert!(!args.has_flag('s'));
        assert_eq!(args.len(), 2);

        let args = CommandArgs::parse(&raw(&["-5"]), "").unwrap();
        assert_eq!(args.string(0), Some("-5"));
    }

    #[test]
    fn double_dash_ends_flags() {
        let args = CommandArgs::parse(&raw(&["--", "-s"]), "s").unwrap();
        assert!(!args.has_flag('s'));
        assert_eq!(args.len(), 1);
        assert_eq!(args.string(0), Some("-s"));
    }

    #[test]
    fn integer_parses() {
        let args = CommandArgs::parse(&raw(&["42", "-7"]), "").unwrap();
        assert_eq!(args.integer(0).unwrap(), 42);
        assert_eq!(args.integer(1).unwrap(), -7);
    }

    #[test]
    fn integer_failure_is_number_expected() {
        let args = CommandArgs::parse(&raw(&["Alice"]), "").unwrap();
        let err = args.integer(0).unwrap_err();
        assert_eq!(
            err,
            CommandError::NumberExpected {
                token: "Alice".into()
            }
        );

        // Absent token reports the same taxonomy entry.
        let err = args.integer(5).unwrap_err();
        assert!(matches!(err, CommandError::NumberExpected { .. }));
    }

    #[test]
    fn joined_tail() {
        let args = CommandArgs::parse(&raw(&["Alice", "come", "back"]), "").unwrap();
        assert_eq!(args.joined(1), "come back");
        assert_eq!(args.joined(3), "");
    }
}
