use super::normalize::{DEFAULT_KEEP, escape};
use crate::domain::Track;
use anyhow::{Result, anyhow};
use std::path::{Path, PathBuf};

const WEB_CACHE_DIRECTORY: &str = "lollypop_web";
const UNKNOWN_COMPONENT: &str = "_";

pub fn default_cache_dir() -> Result<PathBuf> {
    let dir = dirs::cache_dir()
        .ok_or_else(|| anyhow!("Cache folder not present on system!"))?
        .join(WEB_CACHE_DIRECTORY);

    Ok(dir)
}

/// Local file a web track's content is downloaded to. Always lands below
/// `root`, whatever the tags hold.
pub fn web_cache_path(root: &Path, track: &Track) -> PathBuf {
    root.join(path_component(&track.artists.join(",")))
        .join(path_component(&track.album))
        .join(format!("{}.mp3", path_component(&track.title)))
}

fn path_component(text: &str) -> String {
    let escaped = escape(text, DEFAULT_KEEP);
    match escaped.as_str() {
        "" | "." | ".." => UNKNOWN_COMPONENT.to_string(),
        _ => escaped,
    }
}
