//! Privileged command forms
//!
//! Which commands get a `sudo` prefix, and when. None of this talks to the
//! remote host: the elevated flag of a session is whatever the caller said at
//! `open` time.

/// Command sent by `Session::elevate`
pub const ELEVATE_COMMAND: &str = "sudo -i";

/// Shutdown always goes through sudo
pub const SHUTDOWN_COMMAND: &str = "sudo halt";

/// Prefix `command` with `sudo` when `superuser` is set
///
/// # Examples
///
/// ```
/// use pi_remote::ssh::elevation::privileged;
///
/// assert_eq!(privileged("kill 42", true), "sudo kill 42");
/// assert_eq!(privileged("kill 42", false), "kill 42");
/// ```
pub fn privileged(command: &str, superuser: bool) -> String {
    if superuser {
        format!("sudo {}", command)
    } else {
        command.to_string()
    }
}

/// Reboot command for a session with the given elevated flag
///
/// An elevated session issues the bare `reboot` and a non-elevated one
/// issues `sudo reboot`. This is the polarity the command set has always
/// had; callers that expect the opposite should not rely on it silently.
pub fn reboot_command(elevated: bool) -> &'static str {
    if elevated {
        "reboot"
    } else {
        "sudo reboot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_privileged_with_superuser() {
        assert_eq!(privileged("killall raspistill", true), "sudo killall raspistill");
    }

    #[test]
    fn test_privileged_without_superuser() {
        assert_eq!(privileged("killall raspistill", false), "killall raspistill");
    }

    #[test]
    fn test_reboot_uses_sudo_when_not_elevated() {
        assert_eq!(reboot_command(false), "sudo reboot");
    }

    #[test]
    fn test_reboot_is_bare_when_elevated() {
        assert_eq!(reboot_command(true), "reboot");
    }
}
