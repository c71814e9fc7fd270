//! Canned remote operations
//!
//! Each operation renders one command with [`CommandBuilder`] and runs it
//! through [`Session::execute`]. Output is returned as the remote shell
//! produced it, whatever the exit code.
//!
//! [`CommandBuilder`]: crate::commands::CommandBuilder

use tracing::{debug, info};

use crate::attributes::AttributeSet;
use crate::commands::{
    Timelapse, DIR_EXISTS_SENTINEL, LIST_DIRECTORY_COMMAND, LIST_PROCESSES_COMMAND,
    NO_CONTENT_SENTINEL,
};
use crate::error::{PiRemoteError, Result};
use crate::session::Session;
use crate::ssh::command::CommandOutput;
use crate::ssh::elevation::{reboot_command, ELEVATE_COMMAND, SHUTDOWN_COMMAND};

impl Session {
    /// Run `sudo -i`
    ///
    /// Success is not checked and the elevated flag is left as it was.
    pub async fn elevate(&mut self) -> Result<CommandOutput> {
        self.execute(ELEVATE_COMMAND).await
    }

    /// `reboot` when the session is elevated, `sudo reboot` otherwise
    pub async fn reboot(&mut self) -> Result<CommandOutput> {
        let command = reboot_command(self.is_elevated());
        info!("Rebooting {} ({})", self.host(), command);
        self.execute(command).await
    }

    pub async fn shutdown(&mut self) -> Result<CommandOutput> {
        info!("Shutting down {}", self.host());
        self.execute(SHUTDOWN_COMMAND).await
    }

    /// Kill one process; `superuser` picks the sudo form regardless of the
    /// session's elevated flag
    pub async fn kill_process(&mut self, pid: u32, superuser: bool) -> Result<CommandOutput> {
        let command = self.commands.kill(pid, superuser);
        self.execute(&command).await
    }

    /// `killall` by process name; `superuser` works as in [`Self::kill_process`]
    pub async fn kill_all(&mut self, name: &str, superuser: bool) -> Result<CommandOutput> {
        let command = self.commands.kill_all(name, superuser);
        self.execute(&command).await
    }

    pub async fn create_file(&mut self, file_name: &str) -> Result<CommandOutput> {
        let command = self.commands.touch(file_name);
        self.execute(&command).await
    }

    /// Run `cd` on the remote host
    ///
    /// Each command gets its own remote shell, so the new working directory
    /// is gone by the next call.
    pub async fn change_directory(&mut self, dir: &str) -> Result<CommandOutput> {
        let command = self.commands.change_directory(dir);
        self.execute(&command).await
    }

    pub async fn make_directory(
        &mut self,
        dir: &str,
        attributes: &AttributeSet,
    ) -> Result<CommandOutput> {
        let command = self.commands.make_directory(dir, attributes);
        self.execute(&command).await
    }

    pub async fn rename_directory(&mut self, dir: &str, new_name: &str) -> Result<CommandOutput> {
        let command = self.commands.rename(dir, new_name);
        self.execute(&command).await
    }

    /// Remove a directory
    ///
    /// With `with_contents` this is `rm -rf`. Otherwise the directory is
    /// probed first and [`PiRemoteError::NotEmpty`] is returned, without
    /// sending `rmdir`, if it has anything in it.
    pub async fn remove_directory(
        &mut self,
        dir: &str,
        with_contents: bool,
    ) -> Result<CommandOutput> {
        if with_contents {
            let command = self.commands.remove_recursive(dir);
            return self.execute(&command).await;
        }

        if self.directory_has_content(dir).await? {
            return Err(PiRemoteError::NotEmpty(dir.to_string()));
        }

        let command = self.commands.remove_empty(dir);
        self.execute(&command).await
    }

    pub async fn directory_exists(&mut self, dir: &str) -> Result<bool> {
        let command = self.commands.directory_exists_probe(dir);
        let output = self.execute(&command).await?;
        let exists = output.matches_sentinel(DIR_EXISTS_SENTINEL);
        debug!("directory_exists({}) = {}", dir, exists);
        Ok(exists)
    }

    /// False only when the probe prints its `noContent` sentinel, which
    /// includes directories that do not exist
    pub async fn directory_has_content(&mut self, dir: &str) -> Result<bool> {
        let command = self.commands.has_content_probe(dir);
        let output = self.execute(&command).await?;
        let has_content = !output.matches_sentinel(NO_CONTENT_SENTINEL);
        debug!("directory_has_content({}) = {}", dir, has_content);
        Ok(has_content)
    }

    pub async fn list_directory(&mut self) -> Result<CommandOutput> {
        self.execute(LIST_DIRECTORY_COMMAND).await
    }

    pub async fn list_processes(&mut self) -> Result<CommandOutput> {
        self.execute(LIST_PROCESSES_COMMAND).await
    }

    pub async fn find_process_id(&mut self, process: &str) -> Result<CommandOutput> {
        let command = self.commands.pidof(process);
        self.execute(&command).await
    }

    pub async fn take_picture(&mut self, file_name: &str) -> Result<CommandOutput> {
        let command = self.commands.take_picture(file_name);
        self.execute(&command).await
    }

    pub async fn start_timelapse(&mut self, timelapse: &Timelapse) -> Result<CommandOutput> {
        let command = self.commands.timelapse(timelapse);
        info!("Starting timelapse on {}: {}", self.host(), command);
        self.execute(&command).await
    }

    /// Not implemented: stopping needs the pid of the background raspistill
    /// run to be tracked when it starts
    pub async fn stop_timelapse(&mut self, _pid: u32) -> Result<CommandOutput> {
        Err(PiRemoteError::NotImplemented("stop_timelapse"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ssh::config::SshConfig;
    use crate::ssh::sanitize::ArgumentQuoting;
    use crate::test_support::{session_with, RecordingTransport};

    const HAS_CONTENT_PROBE: &str =
        "if [ -z \"$(ls -A photos 2>/dev/null)\" ]; then echo noContent; fi";

    fn config() -> SshConfig {
        SshConfig::new("raspberrypi.local", "pi")
    }

    #[tokio::test]
    async fn test_reboot_not_elevated_uses_sudo() {
        let (mut session, log) = session_with(config(), RecordingTransport::new());
        session.reboot().await.unwrap();
        assert_eq!(log.commands(), vec!["sudo reboot"]);
    }

    #[tokio::test]
    async fn test_reboot_elevated_is_bare() {
        let (mut session, log) =
            session_with(config().with_elevated(true), RecordingTransport::new());
        session.reboot().await.unwrap();
        assert_eq!(log.commands(), vec!["reboot"]);
    }

    #[tokio::test]
    async fn test_shutdown_always_sudo() {
        let (mut session, log) =
            session_with(config().with_elevated(true), RecordingTransport::new());
        session.shutdown().await.unwrap();
        assert_eq!(log.commands(), vec!["sudo halt"]);
    }

    #[tokio::test]
    async fn test_elevate_does_not_change_flag() {
        let (mut session, log) = session_with(config(), RecordingTransport::new());
        session.elevate().await.unwrap();

        assert_eq!(log.commands(), vec!["sudo -i"]);
        assert!(!session.is_elevated());
    }

    #[tokio::test]
    async fn test_kill_flag_overrides_session_elevation() {
        let (mut session, log) =
            session_with(config().with_elevated(true), RecordingTransport::new());

        session.kill_process(42, true).await.unwrap();
        session.kill_process(42, false).await.unwrap();
        session.kill_all("raspistill", false).await.unwrap();

        assert_eq!(
            log.commands(),
            vec!["sudo kill 42", "kill 42", "killall raspistill"]
        );
    }

    #[tokio::test]
    async fn test_make_directory_with_empty_attributes() {
        let (mut session, log) = session_with(config(), RecordingTransport::new());
        session
            .make_directory("photos", &AttributeSet::new())
            .await
            .unwrap();
        assert_eq!(log.commands(), vec!["mkdir photos"]);
    }

    #[tokio::test]
    async fn test_make_directory_renders_attributes() {
        let (mut session, log) = session_with(config(), RecordingTransport::new());
        let attrs = AttributeSet::new().with("-p", "");
        session.make_directory("photos/2024", &attrs).await.unwrap();
        assert_eq!(log.commands(), vec!["mkdir photos/2024 -p "]);
    }

    #[tokio::test]
    async fn test_simple_wrappers() {
        let (mut session, log) = session_with(config(), RecordingTransport::new());

        session.create_file("notes.txt").await.unwrap();
        session.change_directory("photos").await.unwrap();
        session.rename_directory("photos", "archive").await.unwrap();
        session.list_directory().await.unwrap();
        session.list_processes().await.unwrap();
        session.find_process_id("raspistill").await.unwrap();
        session.take_picture("image.jpg").await.unwrap();

        assert_eq!(
            log.commands(),
            vec![
                "touch notes.txt",
                "cd photos",
                "mv photos archive",
                "ls -l",
                "ps aux",
                "pidof raspistill",
                "raspistill -o image.jpg",
            ]
        );
    }

    #[tokio::test]
    async fn test_find_process_id_returns_raw_output() {
        let transport = RecordingTransport::new().respond("pidof raspistill", "1234 5678\n");
        let (mut session, _log) = session_with(config(), transport);

        let output = session.find_process_id("raspistill").await.unwrap();
        assert_eq!(output.stdout, "1234 5678\n");
    }

    #[tokio::test]
    async fn test_remove_directory_with_contents_skips_probe() {
        let (mut session, log) = session_with(config(), RecordingTransport::new());
        session.remove_directory("photos", true).await.unwrap();
        assert_eq!(log.commands(), vec!["rm -rf photos"]);
    }

    #[tokio::test]
    async fn test_remove_empty_directory_probes_first() {
        let transport = RecordingTransport::new().respond(HAS_CONTENT_PROBE, "noContent\n");
        let (mut session, log) = session_with(config(), transport);

        session.remove_directory("photos", false).await.unwrap();

        assert_eq!(log.commands(), vec![HAS_CONTENT_PROBE, "rmdir photos"]);
    }

    #[tokio::test]
    async fn test_remove_non_empty_directory_fails_without_rmdir() {
        // No sentinel printed means the directory has content
        let (mut session, log) = session_with(config(), RecordingTransport::new());

        let result = session.remove_directory("photos", false).await;

        match result {
            Err(err @ PiRemoteError::NotEmpty(_)) => {
                assert!(err.to_string().contains("photos"));
            }
            other => panic!("expected NotEmpty, got {:?}", other),
        }
        assert_eq!(log.commands(), vec![HAS_CONTENT_PROBE]);
    }

    #[tokio::test]
    async fn test_directory_exists_parses_sentinel() {
        let transport = RecordingTransport::new()
            .respond("if [ -d photos ]; then echo dirExists; fi", " dirExists\n")
            .respond("if [ -d missing ]; then echo dirExists; fi", "");
        let (mut session, _log) = session_with(config(), transport);

        assert!(session.directory_exists("photos").await.unwrap());
        assert!(!session.directory_exists("missing").await.unwrap());
    }

    #[tokio::test]
    async fn test_directory_has_content_parses_sentinel() {
        let transport = RecordingTransport::new().respond(HAS_CONTENT_PROBE, "noContent\r\n");
        let (mut session, _log) = session_with(config(), transport);

        assert!(!session.directory_has_content("photos").await.unwrap());
    }

    #[tokio::test]
    async fn test_start_timelapse_command() {
        let (mut session, log) = session_with(config(), RecordingTransport::new());
        let timelapse = Timelapse::new(2000, 60000).with_quality(75).in_background(true);

        session.start_timelapse(&timelapse).await.unwrap();

        assert_eq!(
            log.commands(),
            vec!["raspistill -o timelapse%04d.jpg -t 60000 -tl 2000 -q 75 &"]
        );
    }

    #[tokio::test]
    async fn test_stop_timelapse_not_implemented() {
        let (mut session, log) = session_with(config(), RecordingTransport::new());

        let result = session.stop_timelapse(1234).await;

        assert!(matches!(
            result,
            Err(PiRemoteError::NotImplemented("stop_timelapse"))
        ));
        assert!(log.commands().is_empty());
    }

    #[tokio::test]
    async fn test_operations_on_closed_session_fail() {
        let (mut session, log) = session_with(config(), RecordingTransport::new());
        session.close().await;

        assert!(session.reboot().await.is_err());
        assert!(session.remove_directory("photos", false).await.is_err());
        assert!(log.commands().is_empty());
    }

    #[tokio::test]
    async fn test_quoted_session_quotes_arguments() {
        let config = config().with_argument_quoting(ArgumentQuoting::Quoted);
        let (mut session, log) = session_with(config, RecordingTransport::new());

        session.create_file("a b; reboot").await.unwrap();

        assert_eq!(log.commands(), vec!["touch 'a b; reboot'"]);
    }
}
