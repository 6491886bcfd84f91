use super::{AlbumId, Track, TrackId};
use std::{sync::Arc, time::Duration};

#[derive(Default, Clone, Debug)]
pub struct Disc {
    pub id: i64,
    pub album_id: AlbumId,
    pub number: u32,
    pub name: String,
    pub year: Option<u32>,
    tracks: Vec<Arc<Track>>,
}

impl Disc {
    pub fn new(album_id: AlbumId, number: u32) -> Self {
        Disc {
            album_id,
            number,
            ..Default::default()
        }
    }

    pub fn push_track(&mut self, track: Arc<Track>) {
        self.tracks.push(track);
    }

    pub fn sort_tracks(&mut self) {
        self.tracks.sort_by_key(|t| t.sort_key());
    }

    pub fn tracks(&self) -> &[Arc<Track>] {
        &self.tracks
    }

    pub fn track_ids(&self) -> Vec<TrackId> {
        self.tracks.iter().map(|t| t.id).collect()
    }

    pub fn duration(&self) -> Duration {
        self.tracks.iter().map(|t| t.duration).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
