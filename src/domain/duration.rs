use super::AlbumId;
use anyhow::Result;
use std::{collections::HashMap, time::Duration};

/// Backing store for album durations: a keyed cache plus the slow path
/// used when an album has no tracks loaded.
pub trait DurationStore {
    fn cached_duration(&mut self, key: &str) -> Result<Option<Duration>>;
    fn cache_duration(&mut self, album_id: AlbumId, key: &str, duration: Duration) -> Result<()>;
    fn album_duration(
        &mut self,
        album_id: AlbumId,
        genre_ids: &[i64],
        artist_ids: &[i64],
    ) -> Result<Duration>;
}

#[derive(Default)]
pub struct MemoryDurationStore {
    entries: HashMap<String, (AlbumId, Duration)>,
    fallback: Duration,
    hits: usize,
}

impl MemoryDurationStore {
    pub fn set_fallback(&mut self, duration: Duration) {
        self.fallback = duration
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }
}

impl DurationStore for MemoryDurationStore {
    fn cached_duration(&mut self, key: &str) -> Result<Option<Duration>> {
        let found = self.entries.get(key).map(|(_, d)| *d);
        if found.is_some() {
            self.hits += 1;
        }
        Ok(found)
    }

    fn cache_duration(&mut self, album_id: AlbumId, key: &str, duration: Duration) -> Result<()> {
        self.entries.insert(key.to_string(), (album_id, duration));
        Ok(())
    }

    fn album_duration(&mut self, _: AlbumId, _: &[i64], _: &[i64]) -> Result<Duration> {
        Ok(self.fallback)
    }
}
