use super::{AlbumId, TrackId, TrackInfo};
use crate::get_readable_duration;
use std::{sync::Arc, time::Duration};

#[derive(Default, Clone, Debug, PartialEq)]
pub struct Track {
    pub id: TrackId,
    pub title: String,
    pub artists: Vec<String>,
    pub album_id: AlbumId,
    pub album: Arc<String>,
    pub album_artists: Vec<String>,
    pub disc_number: u32,
    pub track_number: Option<u32>,
    pub year: Option<u32>,
    pub duration: Duration,
    pub uri: String,
    pub lp_track_id: String,
}

impl Track {
    pub fn new(id: TrackId, title: impl Into<String>) -> Self {
        Track {
            id,
            title: title.into(),
            ..Default::default()
        }
    }

    /// First track artist, then first album artist, else empty.
    pub fn primary_artist(&self) -> &str {
        self.artists
            .first()
            .or_else(|| self.album_artists.first())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn is_http(&self) -> bool {
        self.uri.starts_with("http://") || self.uri.starts_with("https://")
    }

    /// Ordering key inside a disc. Untagged tracks sink to the bottom.
    pub(crate) fn sort_key(&self) -> (u32, TrackId) {
        (self.track_number.unwrap_or(u32::MAX), self.id)
    }
}

impl TrackInfo for Track {
    fn get_id(&self) -> TrackId {
        self.id
    }

    fn get_title(&self) -> &str {
        &self.title
    }

    fn get_artist(&self) -> &str {
        self.primary_artist()
    }

    fn get_album(&self) -> &str {
        &self.album
    }

    fn get_duration(&self) -> Duration {
        self.duration
    }

    fn get_duration_str(&self) -> String {
        get_readable_duration(self.duration, crate::DurationStyle::Compact)
    }
}
