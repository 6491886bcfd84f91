use super::normalize::{DEFAULT_KEEP, escape};
use crate::domain::Track;

/// Artist and title to look lyrics up with. Radio streams carry both in
/// their title.
pub fn lyrics_terms(track: &Track, radio: bool) -> Option<(&str, &str)> {
    match radio {
        true => split_radio_title(&track.title),
        false => Some((track.primary_artist(), track.title.as_str())),
    }
}

/// Split a radio stream title of the form `"Artist - Title"`.
pub fn split_radio_title(name: &str) -> Option<(&str, &str)> {
    let mut parts = name.split(" - ");
    let artist = parts.next()?;
    let title = parts.next()?;
    Some((artist, title))
}

pub fn genius_lyrics_uri(artist: &str, title: &str) -> String {
    let slug = escape(&format!("{artist} {title}"), DEFAULT_KEEP).replace(' ', "-");
    format!("https://genius.com/{slug}-lyrics")
}

pub fn wikia_lyrics_uri(artist: &str, title: &str) -> String {
    format!(
        "https://lyrics.wikia.com/wiki/{}:{}",
        urlencoding::encode(artist),
        urlencoding::encode(title)
    )
}
