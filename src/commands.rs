//! Command string templates
//!
//! Every remote operation is one of these strings handed to
//! `Session::execute`. Building them is kept separate from running them so
//! the exact wire text can be checked without a connection.

use crate::attributes::AttributeSet;
use crate::ssh::elevation::privileged;
use crate::ssh::sanitize::ArgumentQuoting;

/// Printed by the existence probe when the directory exists
pub const DIR_EXISTS_SENTINEL: &str = "dirExists";

/// Printed by the content probe when the directory is empty or unreadable
pub const NO_CONTENT_SENTINEL: &str = "noContent";

pub const LIST_DIRECTORY_COMMAND: &str = "ls -l";

pub const LIST_PROCESSES_COMMAND: &str = "ps aux";

/// Default JPEG quality; the `-q` flag is left off at this value
pub const DEFAULT_QUALITY: u8 = 100;

pub const DEFAULT_TIMELAPSE_PREFIX: &str = "timelapse";

/// A raspistill timelapse run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timelapse {
    /// Milliseconds between frames
    pub interval_ms: u64,
    /// Total run time in milliseconds
    pub duration_ms: u64,
    /// Frames are written as `<prefix>%04d.jpg`
    pub prefix: String,
    pub quality: u8,
    /// Append ` &` so the remote shell does not wait for the run
    pub background: bool,
}

impl Timelapse {
    pub fn new(interval_ms: u64, duration_ms: u64) -> Self {
        Self {
            interval_ms,
            duration_ms,
            prefix: DEFAULT_TIMELAPSE_PREFIX.to_string(),
            quality: DEFAULT_QUALITY,
            background: false,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = quality;
        self
    }

    pub fn in_background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }
}

/// Builds command strings, applying one argument quoting policy throughout
#[derive(Debug, Clone, Copy, Default)]
pub struct CommandBuilder {
    quoting: ArgumentQuoting,
}

impl CommandBuilder {
    pub fn new(quoting: ArgumentQuoting) -> Self {
        Self { quoting }
    }

    pub fn quoting(&self) -> ArgumentQuoting {
        self.quoting
    }

    pub fn kill(&self, pid: u32, superuser: bool) -> String {
        privileged(&format!("kill {}", pid), superuser)
    }

    pub fn kill_all(&self, name: &str, superuser: bool) -> String {
        privileged(&format!("killall {}", self.quoting.apply(name)), superuser)
    }

    pub fn touch(&self, file_name: &str) -> String {
        format!("touch {}", self.quoting.apply(file_name))
    }

    pub fn change_directory(&self, dir: &str) -> String {
        format!("cd {}", self.quoting.apply(dir))
    }

    pub fn make_directory(&self, dir: &str, attributes: &AttributeSet) -> String {
        format!(
            "mkdir {}{}",
            self.quoting.apply(dir),
            attributes.render_with(self.quoting)
        )
    }

    pub fn rename(&self, dir: &str, new_name: &str) -> String {
        format!(
            "mv {} {}",
            self.quoting.apply(dir),
            self.quoting.apply(new_name)
        )
    }

    pub fn remove_recursive(&self, dir: &str) -> String {
        format!("rm -rf {}", self.quoting.apply(dir))
    }

    pub fn remove_empty(&self, dir: &str) -> String {
        format!("rmdir {}", self.quoting.apply(dir))
    }

    /// Prints [`DIR_EXISTS_SENTINEL`] iff `dir` is a directory
    pub fn directory_exists_probe(&self, dir: &str) -> String {
        format!(
            "if [ -d {} ]; then echo {}; fi",
            self.quoting.apply(dir),
            DIR_EXISTS_SENTINEL
        )
    }

    /// Prints [`NO_CONTENT_SENTINEL`] iff `ls -A dir` lists nothing
    pub fn has_content_probe(&self, dir: &str) -> String {
        format!(
            "if [ -z \"$(ls -A {} 2>/dev/null)\" ]; then echo {}; fi",
            self.quoting.apply(dir),
            NO_CONTENT_SENTINEL
        )
    }

    pub fn pidof(&self, process: &str) -> String {
        format!("pidof {}", self.quoting.apply(process))
    }

    pub fn take_picture(&self, file_name: &str) -> String {
        format!("raspistill -o {}", self.quoting.apply(file_name))
    }

    pub fn timelapse(&self, timelapse: &Timelapse) -> String {
        let output = format!("{}%04d.jpg", timelapse.prefix);
        let mut command = format!(
            "raspistill -o {} -t {} -tl {}",
            self.quoting.apply(&output),
            timelapse.duration_ms,
            timelapse.interval_ms
        );

        if timelapse.quality != DEFAULT_QUALITY {
            command.push_str(&format!(" -q {}", timelapse.quality));
        }
        if timelapse.background {
            command.push_str(" &");
        }

        command
    }
}
