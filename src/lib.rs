use anyhow::{Result, anyhow};
use std::{
    path::{Path, PathBuf},
    time::Duration,
};

pub mod config;
pub mod database;
pub mod domain;
pub mod error;
pub mod library;
pub mod logging;
pub mod player;
pub mod web;

pub use config::Config;
pub use database::Database;
pub use error::PlayerError;
pub use library::Library;
pub use player::Player;

pub enum DurationStyle {
    Clean,
    Compact,
    CompactMillis,
}

pub fn get_readable_duration(duration: Duration, style: DurationStyle) -> String {
    let mut secs = duration.as_secs();
    let millis = duration.subsec_millis() / 10;
    let mins = secs / 60;
    secs %= 60;

    match style {
        DurationStyle::Clean => match mins {
            0 => format!("{secs:02}s"),
            _ => format!("{mins}m {secs:02}s"),
        },
        DurationStyle::Compact => format!("{mins}:{secs:02}"),
        DurationStyle::CompactMillis => format!("{mins}:{secs:02}.{millis:02}"),
    }
}

pub fn truncate_at_last_space(s: &str, limit: usize) -> String {
    if s.chars().count() <= limit {
        return s.to_string();
    }

    let byte_limit = s
        .char_indices()
        .map(|(i, _)| i)
        .nth(limit)
        .unwrap_or(s.len());

    let cut = match s[..byte_limit].rfind(' ') {
        Some(last_space) => last_space,
        None => s[..byte_limit]
            .char_indices()
            .map(|(i, _)| i)
            .last()
            .unwrap_or(0),
    };

    let mut truncated = s[..cut].to_string();
    truncated.push('…');
    truncated
}

pub fn expand_tilde<P: AsRef<Path>>(path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let path_str = path.to_string_lossy();

    if !path_str.starts_with('~') {
        return Ok(path.to_path_buf());
    }

    if path_str.starts_with("~/") || path_str.starts_with("~\\") {
        let home =
            dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory!"))?;
        return Ok(home.join(&path_str[2..]));
    }

    Err(anyhow!("Expected a path below the home directory: {path_str}"))
}
