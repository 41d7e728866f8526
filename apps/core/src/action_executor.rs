use std::process::{Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LaunchError {
    #[error("empty url")]
    EmptyUrl,
    #[error("unsupported url scheme: {0}")]
    UnsupportedScheme(String),
    #[error("launch failed: {0}")]
    LaunchFailed(String),
}

pub fn validate_open_target(url: &str) -> Result<&str, LaunchError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(LaunchError::EmptyUrl);
    }

    let lowered = trimmed.to_ascii_lowercase();
    if !(lowered.starts_with("https://") || lowered.starts_with("http://")) {
        let scheme = trimmed.split(':').next().unwrap_or(trimmed).to_string();
        return Err(LaunchError::UnsupportedScheme(scheme));
    }

    Ok(trimmed)
}

pub fn launch_open_target(url: &str) -> Result<(), LaunchError> {
    let target = validate_open_target(url)?;
    spawn_reaped(opener_command(target)).map(|_| ())
}

// A waiter thread reaps the opener once it exits.
fn spawn_reaped(mut command: Command) -> Result<JoinHandle<Option<ExitStatus>>, LaunchError> {
    let mut child = command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| LaunchError::LaunchFailed(e.to_string()))?;

    Ok(thread::spawn(move || match child.wait() {
        Ok(status) => {
            if !status.success() {
                tracing::warn!(%status, "opener exited with failure");
            }
            Some(status)
        }
        Err(error) => {
            tracing::warn!(%error, "failed to wait for opener");
            None
        }
    }))
}

// `cmd /C start` would split query strings on `&`.
#[cfg(target_os = "windows")]
fn opener_command(target: &str) -> Command {
    let mut command = Command::new("rundll32");
    command.arg("url.dll,FileProtocolHandler").arg(target);
    command
}

#[cfg(target_os = "macos")]
fn opener_command(target: &str) -> Command {
    let mut command = Command::new("open");
    command.arg(target);
    command
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn opener_command(target: &str) -> Command {
    let mut command = Command::new("xdg-open");
    command.arg(target);
    command
}
