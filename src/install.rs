//! Settings file integration
//!
//! Writes the `statusLine` entry of a Claude Code settings file so that
//! Claude Code runs cstatus. Every other key in the file is kept.

use crate::cli::InstallArgs;
use cstatus_core::error::{CstatusError, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// The `statusLine` value Claude Code expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusLineSetting {
    #[serde(rename = "type")]
    pub kind: String,
    pub command: String,
    pub padding: u32,
}

impl StatusLineSetting {
    pub fn command(command: impl Into<String>) -> Self {
        Self {
            kind: "command".to_string(),
            command: command.into(),
            padding: 0,
        }
    }
}

/// `~/.claude/settings.json`
pub fn default_settings_path() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".claude").join("settings.json"))
        .ok_or_else(|| {
            CstatusError::InvalidArgument(
                "Could not determine the home directory; pass --settings".to_string(),
            )
        })
}

/// Path of the running executable
pub fn default_command() -> Result<String> {
    Ok(std::env::current_exe()?.to_string_lossy().into_owned())
}

/// Set `statusLine` in the settings file at `path`
///
/// The file and its parent directory are created when missing.
///
/// # Errors
///
/// Returns a `Settings` error if the existing file is not a JSON object,
/// and `Io` errors from reading or writing it.
pub fn install(path: &Path, command: &str) -> Result<()> {
    let mut settings = read_settings(path)?;
    let setting = serde_json::to_value(StatusLineSetting::command(command))?;
    settings.insert("statusLine".to_string(), setting);

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut contents = serde_json::to_string_pretty(&Value::Object(settings))?;
    contents.push('\n');
    fs::write(path, contents)?;

    debug!("Wrote statusLine to {}", path.display());
    Ok(())
}

fn read_settings(path: &Path) -> Result<Map<String, Value>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Map::new()),
        Err(e) => return Err(e.into()),
    };
    if raw.trim().is_empty() {
        return Ok(Map::new());
    }

    match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(CstatusError::Settings {
            file: path.to_path_buf(),
            error: "expected a JSON object".to_string(),
        }),
        Err(e) => Err(CstatusError::Settings {
            file: path.to_path_buf(),
            error: e.to_string(),
        }),
    }
}

/// Run the install command
pub fn run(args: &InstallArgs) -> Result<()> {
    let path = match &args.settings {
        Some(path) => path.clone(),
        None => default_settings_path()?,
    };
    let command = match &args.command {
        Some(command) => command.clone(),
        None => default_command()?,
    };

    install(&path, &command)?;
    let shown = path.display();
    println!("Configured statusLine in {shown} to run: {command}");
    Ok(())
}
