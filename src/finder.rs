use crate::statics;
use std::io;
use std::path::Path;
#[cfg(target_os = "macos")]
use std::process::Command;
use std::thread;
use std::time::Duration;

/// Post-save Finder integration. Injectable so the editor can be exercised in
/// tests without touching the real desktop shell.
pub trait FinderControl {
    /// Fire-and-forget request for Finder to drop its cached saved-search
    /// state. Only issued after a successful byte write.
    fn request_refresh(&self);

    /// Hide the file extension of the saved document, matching how Finder
    /// displays smart folders. Best effort; the caller logs failures and
    /// moves on.
    fn hide_extension(&self, path: &Path) -> io::Result<()>;
}

/// Drives Finder through `osascript`. A no-op off macOS.
pub struct ScriptedFinder;

impl FinderControl for ScriptedFinder {
    fn request_refresh(&self) {
        thread::spawn(|| {
            thread::sleep(Duration::from_millis(statics::FINDER_REFRESH_DELAY_MS));
            relaunch_finder();
        });
    }

    fn hide_extension(&self, path: &Path) -> io::Result<()> {
        set_extension_hidden(path)
    }
}

#[cfg(target_os = "macos")]
fn relaunch_finder() {
    let script = "tell application \"Finder\" to quit\ntell application \"Finder\" to activate";
    match Command::new("osascript").args(["-e", script]).output() {
        Ok(out) if !out.status.success() => {
            log::warn!(
                "Finder relaunch script failed: {}",
                String::from_utf8_lossy(&out.stderr).trim()
            );
        }
        Ok(_) => {}
        Err(e) => log::warn!("could not run osascript: {e}"),
    }
}

#[cfg(not(target_os = "macos"))]
fn relaunch_finder() {}

#[cfg(target_os = "macos")]
fn set_extension_hidden(path: &Path) -> io::Result<()> {
    let script = format!(
        "tell application \"Finder\" to set extension hidden of (POSIX file \"{}\" as alias) to true",
        applescript_escape(&path.to_string_lossy()),
    );
    let out = Command::new("osascript").args(["-e", &script]).output()?;
    if !out.status.success() {
        return Err(io::Error::other(
            String::from_utf8_lossy(&out.stderr).trim().to_string(),
        ));
    }
    Ok(())
}

#[cfg(not(target_os = "macos"))]
fn set_extension_hidden(_path: &Path) -> io::Result<()> {
    Ok(())
}

#[cfg(target_os = "macos")]
fn applescript_escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
