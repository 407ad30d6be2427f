//! Reminder sound playback
//!
//! Plays a user-supplied .wav/.ogg file with the platform's command-line
//! player:
//!   - macOS: afplay
//!   - Linux: paplay for .ogg (PulseAudio), aplay otherwise (ALSA)

use anyhow::{bail, Context, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

/// Pick the player command for a sound file
fn player_for(path: &Path, macos: bool) -> &'static str {
    if macos {
        return "afplay";
    }

    let is_ogg = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("ogg"));
    if is_ogg {
        "paplay"
    } else {
        "aplay"
    }
}

/// Play a sound file and wait for the player to finish
pub async fn play_file(path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("Sound file not found: {}", path.display());
    }

    let cmd = player_for(path, cfg!(target_os = "macos"));
    tracing::debug!("Playing sound: {} {}", cmd, path.display());

    let output = Command::new(cmd)
        .arg(path)
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .output()
        .await
        .with_context(|| format!("Failed to execute '{}'. Is it installed?", cmd))?;

    if !output.status.success() {
        bail!(
            "{} exited with {:?}: {}",
            cmd,
            output.status.code(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    Ok(())
}
