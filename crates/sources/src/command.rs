//! External command producer

use rg_status_core::{require_argument, Producer, ProducerMetadata, Reading, Unavailable};
use std::process::{Command, Stdio};

/// First line of `sh -c <argument>` output
///
/// The exit status is ignored; only an empty first line counts as no value.
/// The command runs synchronously on the loop thread.
pub struct CommandSource {
    metadata: ProducerMetadata,
    shell: String,
}

impl CommandSource {
    pub fn new() -> Self {
        Self::with_shell("sh")
    }

    pub fn with_shell(shell: &str) -> Self {
        Self {
            metadata: ProducerMetadata::new(
                "run_command",
                "Command",
                "First line printed by a shell command",
                Some("command (echo foo)"),
            ),
            shell: shell.to_string(),
        }
    }
}

impl Default for CommandSource {
    fn default() -> Self {
        Self::new()
    }
}

/// First line of `output`, without the line terminator
pub fn first_line(output: &str) -> Option<&str> {
    output
        .lines()
        .next()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.is_empty())
}

impl Producer for CommandSource {
    fn metadata(&self) -> &ProducerMetadata {
        &self.metadata
    }

    fn produce(&mut self, argument: Option<&str>) -> Reading {
        let command = require_argument(argument)?;
        let output = Command::new(&self.shell)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| Unavailable::Command(format!("{}: {}", self.shell, e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        first_line(&stdout)
            .map(str::to_string)
            .ok_or_else(|| Unavailable::Command(format!("'{}' printed nothing", command)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line() {
        assert_eq!(first_line("42\n"), Some("42"));
        assert_eq!(first_line("a\r\nb\n"), Some("a"));
        assert_eq!(first_line(""), None);
        assert_eq!(first_line("\nsecond"), None);
    }

    #[test]
    fn test_runs_shell_command() {
        let mut source = CommandSource::new();
        assert_eq!(source.produce(Some("echo 57; echo ignored")).unwrap(), "57");
        assert!(matches!(source.produce(Some("true")), Err(Unavailable::Command(_))));
        assert!(matches!(source.produce(None), Err(Unavailable::MissingArgument)));
    }

    #[test]
    fn test_missing_shell() {
        let mut source = CommandSource::with_shell("/nonexistent/shell");
        assert!(matches!(source.produce(Some("echo hi")), Err(Unavailable::Command(_))));
    }
}
