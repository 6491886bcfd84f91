use crate::{
    database::Database,
    domain::{Album, AlbumId, Disc, DurationStore, Track, TrackId},
};
use anyhow::{Result, anyhow};
use indexmap::IndexMap;
use nohash_hasher::BuildNoHashHasher;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tracing::{debug, info};

pub type TrackMap = IndexMap<TrackId, Arc<Track>, BuildNoHashHasher<TrackId>>;

/// In-memory view of the collection: every track by id plus the albums
/// they assemble into.
#[derive(Default)]
pub struct Library {
    pub tracks: TrackMap,
    pub albums: Vec<Album>,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a library from loose tracks, deriving albums from the tracks'
    /// album ids and names.
    pub fn from_tracks(tracks: impl IntoIterator<Item = Track>) -> Self {
        let mut lib = Library::new();
        lib.collect_tracks(tracks);
        lib.build_albums(Vec::new(), Vec::new());
        lib
    }

    /// Build the library based on the current state of the database.
    pub fn load(db: &mut Database) -> Result<Self> {
        let mut lib = Library::new();

        lib.collect_tracks(db.get_all_tracks()?);
        lib.build_albums(db.get_albums()?, db.get_discs()?);

        info!(
            tracks = lib.tracks.len(),
            albums = lib.albums.len(),
            "Library loaded"
        );

        Ok(lib)
    }

    fn collect_tracks(&mut self, tracks: impl IntoIterator<Item = Track>) {
        self.tracks = tracks
            .into_iter()
            .map(|t| (t.id, Arc::new(t)))
            .collect();
    }

    fn build_albums(&mut self, stored: Vec<Album>, discs: Vec<Disc>) {
        self.albums = Vec::with_capacity(stored.len());
        let mut album_lookup: HashMap<AlbumId, usize> = HashMap::with_capacity(stored.len());

        for album in stored {
            album_lookup.insert(album.id, self.albums.len());
            self.albums.push(album);
        }

        // Assign each track to its album, creating albums the store never named
        for track in self.tracks.values() {
            let album_idx = match album_lookup.get(&track.album_id) {
                Some(&idx) => idx,
                None => {
                    let mut album = Album::new(track.album_id, &track.album);
                    album.artists = track.album_artists.clone();
                    let idx = self.albums.len();
                    self.albums.push(album);
                    album_lookup.insert(track.album_id, idx);
                    idx
                }
            };

            self.albums[album_idx].add_track(Arc::clone(track));
        }

        for disc in discs {
            match album_lookup.get(&disc.album_id) {
                Some(&idx) => self.albums[idx].add_disc(disc),
                None => debug!(album_id = disc.album_id, "Disc without album"),
            }
        }

        // Albums with no tracks have nothing to play
        self.albums.retain(|a| a.tracks_count() > 0);

        for album in self.albums.iter_mut() {
            album.sort_discs();
        }
        self.albums.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
    }

    pub fn contains(&self, id: TrackId) -> bool {
        self.tracks.contains_key(&id)
    }

    pub fn get_track_by_id(&self, id: TrackId) -> Option<&Arc<Track>> {
        self.tracks.get(&id)
    }

    pub fn get_all_tracks(&self) -> Vec<Arc<Track>> {
        self.tracks.values().cloned().collect()
    }

    pub fn get_all_albums(&self) -> &[Album] {
        &self.albums
    }

    pub fn get_album(&self, id: AlbumId) -> Option<&Album> {
        self.albums.iter().find(|a| a.id == id)
    }

    pub fn album_duration<S: DurationStore + ?Sized>(
        &self,
        album_id: AlbumId,
        store: &mut S,
    ) -> Result<Duration> {
        self.get_album(album_id)
            .ok_or_else(|| anyhow!("Album {album_id} not found"))?
            .duration(store)
    }
}
