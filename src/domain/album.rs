use super::{AlbumId, Disc, DurationStore, Track, TrackId};
use anyhow::Result;
use std::{sync::Arc, time::Duration};
use tracing::debug;
use xxhash_rust::xxh3::xxh3_64;

#[derive(Default, Clone, Debug)]
pub struct Album {
    pub id: AlbumId,
    pub name: Arc<String>,
    pub artists: Vec<String>,
    pub artist_ids: Vec<i64>,
    pub genre_ids: Vec<i64>,
    pub year: Option<u32>,
    pub lp_album_id: String,
    discs: Vec<Disc>,
    // Explicit track selection, overrides the disc listing when set
    tracks: Option<Vec<Arc<Track>>>,
}

impl Album {
    pub fn new(id: AlbumId, name: &Arc<String>) -> Self {
        Album {
            id,
            name: Arc::clone(name),
            ..Default::default()
        }
    }

    /// File a collection track under its disc, creating the disc on demand.
    pub fn add_track(&mut self, track: Arc<Track>) {
        if self.year.is_none() {
            self.year = track.year
        }

        match self.discs.iter_mut().find(|d| d.number == track.disc_number) {
            Some(disc) => disc.push_track(track),
            None => {
                let mut disc = Disc::new(self.id, track.disc_number);
                disc.year = track.year;
                disc.push_track(track);
                self.discs.push(disc);
            }
        }
    }

    /// Attach stored disc metadata, keeping tracks already filed under it.
    pub fn add_disc(&mut self, disc: Disc) {
        match self.discs.iter_mut().find(|d| d.number == disc.number) {
            Some(existing) => {
                existing.id = disc.id;
                existing.name = disc.name;
                if disc.year.is_some() {
                    existing.year = disc.year;
                }
            }
            None => self.discs.push(disc),
        }
    }

    /// Sort discs by number, then every disc's tracks by track number.
    pub fn sort_discs(&mut self) {
        self.discs.sort_by_key(|d| d.number);
        for disc in self.discs.iter_mut() {
            disc.sort_tracks();
        }
    }

    pub fn discs(&self) -> &[Disc] {
        &self.discs
    }

    pub fn set_tracks(&mut self, tracks: Vec<Arc<Track>>) {
        self.tracks = Some(tracks);
    }

    pub fn append_track(&mut self, track: Arc<Track>) {
        self.tracks.get_or_insert_with(Vec::new).push(track);
    }

    pub fn remove_track(&mut self, track_id: TrackId) -> Option<Arc<Track>> {
        if self.tracks.is_none() {
            self.tracks = Some(self.disc_tracks());
        }

        let tracks = self.tracks.as_mut()?;
        let idx = tracks.iter().position(|t| t.id == track_id)?;
        Some(tracks.remove(idx))
    }

    pub fn get_tracks(&self) -> Vec<Arc<Track>> {
        match &self.tracks {
            Some(tracks) => tracks.clone(),
            None => self.disc_tracks(),
        }
    }

    pub fn get_track(&self, track_id: TrackId) -> Option<Arc<Track>> {
        self.get_tracks().into_iter().find(|t| t.id == track_id)
    }

    pub fn track_ids(&self) -> Vec<TrackId> {
        self.get_tracks().iter().map(|t| t.id).collect()
    }

    pub fn track_uris(&self) -> Vec<String> {
        self.get_tracks().iter().map(|t| t.uri.clone()).collect()
    }

    pub fn tracks_count(&self) -> usize {
        match &self.tracks {
            Some(tracks) => tracks.len(),
            None => self.discs.iter().map(|d| d.tracks().len()).sum(),
        }
    }

    /// Album duration, served from the duration cache when possible.
    ///
    /// With tracks loaded, the cache key covers the exact track set and a
    /// miss sums the track durations. Without tracks, the key covers the
    /// genre/artist filter and a miss asks the store.
    pub fn duration<S: DurationStore + ?Sized>(&self, store: &mut S) -> Result<Duration> {
        let tracks = self.get_tracks();
        let key = self.duration_key(&tracks);

        if let Some(duration) = store.cached_duration(&key)? {
            return Ok(duration);
        }

        let duration = match tracks.is_empty() {
            false => tracks.iter().map(|t| t.duration).sum(),
            true => store.album_duration(self.id, &self.genre_ids, &self.artist_ids)?,
        };

        debug!(album = %self.name, key = %key, ?duration, "Duration cache miss");
        store.cache_duration(self.id, &key, duration)?;
        Ok(duration)
    }

    fn duration_key(&self, tracks: &[Arc<Track>]) -> String {
        match tracks.is_empty() {
            false => {
                let mut lp_ids = tracks
                    .iter()
                    .map(|t| t.lp_track_id.as_str())
                    .collect::<Vec<_>>();
                lp_ids.sort_unstable();

                let track_hash = xxh3_64(format!("{lp_ids:?}").as_bytes());
                format!("{}-{track_hash:016x}", self.lp_album_id)
            }
            true => format!(
                "{}-{:?}-{:?}",
                self.lp_album_id, self.genre_ids, self.artist_ids
            ),
        }
    }

    fn disc_tracks(&self) -> Vec<Arc<Track>> {
        self.discs
            .iter()
            .flat_map(|d| d.tracks().iter().cloned())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MemoryDurationStore;

    fn track(id: TrackId, disc: u32, no: u32, secs: u64) -> Arc<Track> {
        Arc::new(Track {
            disc_number: disc,
            track_number: Some(no),
            duration: Duration::from_secs(secs),
            lp_track_id: format!("lp-{id}"),
            ..Track::new(id, format!("Track {id}"))
        })
    }

    fn album() -> Album {
        let mut album = Album::new(7, &Arc::new("Help!".to_string()));
        album.lp_album_id = "help".into();
        album.add_track(track(4, 2, 1, 60));
        album.add_track(track(2, 1, 2, 100));
        album.add_track(track(1, 1, 1, 120));
        album.add_track(track(3, 2, 0, 30));
        album.sort_discs();
        album
    }

    #[test]
    fn tracks_follow_disc_then_track_number() {
        let album = album();
        assert_eq!(album.discs().len(), 2);
        assert_eq!(album.discs()[0].number, 1);
        assert_eq!(album.track_ids(), vec![1, 2, 3, 4]);
        assert_eq!(album.tracks_count(), 4);
    }

    #[test]
    fn stored_disc_metadata_is_merged() {
        let mut album = album();
        let mut disc = Disc::new(7, 2);
        disc.id = 12;
        disc.name = "Bonus".into();
        album.add_disc(disc);

        assert_eq!(album.discs().len(), 2);
        assert_eq!(album.discs()[1].name, "Bonus");
        assert_eq!(album.discs()[1].id, 12);
        assert_eq!(album.discs()[1].track_ids(), vec![3, 4]);
    }

    #[test]
    fn explicit_track_selection_overrides_discs() {
        let mut album = album();
        album.set_tracks(vec![track(9, 1, 1, 10)]);
        assert_eq!(album.track_ids(), vec![9]);

        let mut album = self::album();
        let removed = album.remove_track(2).unwrap();
        assert_eq!(removed.id, 2);
        assert_eq!(album.track_ids(), vec![1, 3, 4]);
        assert!(album.get_track(2).is_none());
        assert!(album.remove_track(2).is_none());
    }

    #[test]
    fn duration_is_summed_then_cached() {
        let album = album();
        let mut store = MemoryDurationStore::default();

        assert_eq!(album.duration(&mut store).unwrap(), Duration::from_secs(310));
        assert_eq!(store.len(), 1);
        assert_eq!(store.hits(), 0);

        assert_eq!(album.duration(&mut store).unwrap(), Duration::from_secs(310));
        assert_eq!(store.len(), 1);
        assert_eq!(store.hits(), 1);
    }

    #[test]
    fn cache_key_depends_on_track_set() {
        let full = album();
        let mut partial = album();
        partial.remove_track(1);

        let mut store = MemoryDurationStore::default();
        assert_eq!(full.duration(&mut store).unwrap(), Duration::from_secs(310));
        assert_eq!(partial.duration(&mut store).unwrap(), Duration::from_secs(190));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn empty_album_asks_the_store() {
        let mut album = Album::new(3, &Arc::new("Live".to_string()));
        album.genre_ids = vec![1];
        album.artist_ids = vec![5];

        let mut store = MemoryDurationStore::default();
        store.set_fallback(Duration::from_secs(42));
        assert_eq!(album.duration(&mut store).unwrap(), Duration::from_secs(42));
        assert!(
            store
                .cached_duration(&format!("{}-[1]-[5]", album.lp_album_id))
                .unwrap()
                .is_some()
        );
    }
}
