//! Command validation and argument quoting
//!
//! Commands are built by plain concatenation, so any shell metacharacter in
//! a caller-supplied name reaches the remote shell unchanged. That is the
//! default ([`ArgumentQuoting::Verbatim`]). [`ArgumentQuoting::Quoted`] is the
//! opt-in alternative that single-quotes every caller-supplied argument.

use std::borrow::Cow;

use crate::error::{PiRemoteError, Result};

/// How caller-supplied arguments are spliced into command strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ArgumentQuoting {
    /// Arguments are concatenated as-is
    #[default]
    Verbatim,

    /// Arguments are wrapped in single quotes
    Quoted,
}

impl ArgumentQuoting {
    /// Apply the policy to one argument
    ///
    /// Empty arguments are never quoted, so an attribute like `-p` with no
    /// value renders the same under both policies.
    pub fn apply<'a>(&self, argument: &'a str) -> Cow<'a, str> {
        match self {
            ArgumentQuoting::Quoted if !argument.is_empty() => {
                Cow::Owned(quote_argument(argument))
            }
            _ => Cow::Borrowed(argument),
        }
    }
}

/// Validate a command before execution
///
/// Rejects empty (whitespace-only) commands and commands longer than
/// `max_chars`. The command itself is never rewritten.
///
/// # Examples
/// ```
/// use pi_remote::ssh::sanitize::validate_command;
///
/// assert!(validate_command("ls -l", Some(1000)).is_ok());
/// assert!(validate_command("   ", None).is_err());
/// assert!(validate_command("a".repeat(100).as_str(), Some(50)).is_err());
/// ```
pub fn validate_command(command: &str, max_chars: Option<usize>) -> Result<()> {
    if command.trim().is_empty() {
        return Err(PiRemoteError::invalid_params("Command cannot be empty"));
    }

    if let Some(max) = max_chars {
        if command.len() > max {
            return Err(PiRemoteError::invalid_params(format!(
                "Command is too long (max {} characters, got {})",
                max,
                command.len()
            )));
        }
    }

    Ok(())
}

/// Escape a string for use inside a single-quoted shell string
///
/// `'word'` becomes `'"'"'word'"'"'`: end quote, literal quote via double
/// quotes, start quote again.
///
/// # Example
/// ```
/// use pi_remote::ssh::sanitize::escape_for_shell;
///
/// assert_eq!(escape_for_shell("it's"), "it'\"'\"'s");
/// ```
pub fn escape_for_shell(s: &str) -> String {
    s.replace('\'', "'\"'\"'")
}

/// Wrap an argument in single quotes, escaping embedded quotes
///
/// # Example
/// ```
/// use pi_remote::ssh::sanitize::quote_argument;
///
/// assert_eq!(quote_argument("my photos"), "'my photos'");
/// ```
pub fn quote_argument(argument: &str) -> String {
    format!("'{}'", escape_for_shell(argument))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_command_valid() {
        assert!(validate_command("ls -l", Some(1000)).is_ok());
    }

    #[test]
    fn test_validate_command_empty() {
        let result = validate_command("", Some(1000));
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_validate_command_whitespace_only() {
        let result = validate_command("   ", None);
        assert!(result.unwrap_err().to_string().contains("cannot be empty"));
    }

    #[test]
    fn test_validate_command_too_long() {
        let long_cmd = "a".repeat(100);
        let result = validate_command(&long_cmd, Some(50));
        assert!(result.unwrap_err().to_string().contains("too long"));
    }

    #[test]
    fn test_validate_command_exactly_at_limit() {
        let cmd = "a".repeat(50);
        assert!(validate_command(&cmd, Some(50)).is_ok());
    }

    #[test]
    fn test_escape_for_shell_no_quotes() {
        assert_eq!(escape_for_shell("ls -l"), "ls -l");
    }

    #[test]
    fn test_escape_for_shell_multiple_quotes() {
        assert_eq!(
            escape_for_shell("echo 'a' 'b'"),
            "echo '\"'\"'a'\"'\"' '\"'\"'b'\"'\"'"
        );
    }

    #[test]
    fn test_quote_argument_neutralises_metacharacters() {
        assert_eq!(quote_argument("x; reboot"), "'x; reboot'");
        assert_eq!(quote_argument("it's"), "'it'\"'\"'s'");
    }

    #[test]
    fn test_verbatim_passes_through() {
        let policy = ArgumentQuoting::Verbatim;
        assert_eq!(policy.apply("a b; c"), "a b; c");
    }

    #[test]
    fn test_quoted_leaves_empty_argument_alone() {
        let policy = ArgumentQuoting::Quoted;
        assert_eq!(policy.apply(""), "");
        assert_eq!(policy.apply("dir"), "'dir'");
    }
}
