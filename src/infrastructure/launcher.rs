//! Opens the application entry point when a notification is activated

use std::io;
use std::process::{Command, Stdio};

use tracing::{debug, warn};

use crate::domain::notification::TapAction;

/// Platform command that opens a URI or path
fn opener_command(target: &str) -> Command {
    #[cfg(target_os = "macos")]
    {
        let mut cmd = Command::new("open");
        cmd.arg(target);
        cmd
    }

    #[cfg(windows)]
    {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", "start", "", target]);
        cmd
    }

    #[cfg(not(any(target_os = "macos", windows)))]
    {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(target);
        cmd
    }
}

/// Carry out a tap action.
///
/// A desktop session has no navigation stack to clear, so `clear_stack`
/// only changes what gets logged.
pub fn launch(action: &TapAction) -> io::Result<()> {
    match action {
        TapAction::OpenApp {
            target,
            clear_stack,
        } => {
            debug!(%target, clear_stack, "opening application entry point");
            opener_command(target)
                .stdin(Stdio::null())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn()
                .map(|_| ())
                .inspect_err(|e| warn!(%target, error = %e, "failed to open application"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opener_passes_target_through() {
        let cmd = opener_command("school-admin://main");
        let args: Vec<_> = cmd.get_args().map(|a| a.to_string_lossy().to_string()).collect();
        assert_eq!(args.last().map(String::as_str), Some("school-admin://main"));
    }
}
