//! Opening the system notification-access settings

use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;

/// Opens the screen where the user grants notification access
pub trait SettingsLauncher: Send + Sync {
    /// Starts the settings screen without waiting for the user
    ///
    /// # Errors
    ///
    /// Returns an error if the settings screen could not be started
    fn open_notification_access_settings(&self) -> anyhow::Result<()>;
}

/// Launches the settings screen by running an external command
#[derive(Debug, Clone)]
pub struct CommandSettingsLauncher {
    program: String,
    args: Vec<String>,
}

impl CommandSettingsLauncher {
    /// Creates a launcher from a full command line
    ///
    /// Returns `None` for an empty command line.
    #[must_use]
    pub fn from_command(command: Vec<String>) -> Option<Self> {
        let mut parts = command.into_iter();
        let program = parts.next()?;
        Some(Self {
            program,
            args: parts.collect(),
        })
    }
}

impl SettingsLauncher for CommandSettingsLauncher {
    fn open_notification_access_settings(&self) -> anyhow::Result<()> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start '{}'", self.program))?;

        let program = self.program.clone();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => {
                    tracing::debug!("'{program}' exited successfully");
                }
                Ok(status) => tracing::warn!("'{program}' exited with {status}"),
                Err(e) => tracing::warn!("Failed to wait for '{program}': {e}"),
            }
        });

        Ok(())
    }
}
