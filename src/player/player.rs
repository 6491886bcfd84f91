use super::{PlaybackSnapshot, UserPlaylistPlayer};
use crate::{
    Library, PlayerError,
    domain::{ShuffleMode, Track, TrackId},
};
use std::sync::Arc;
use tracing::debug;

/// User playlist bound to the collection: ids are checked against the
/// library and navigation hands out full tracks.
pub struct Player {
    library: Arc<Library>,
    playlist: UserPlaylistPlayer,
    now_playing: Option<Arc<Track>>,
}

impl Player {
    pub fn new(library: Arc<Library>, mode: ShuffleMode) -> Self {
        Self::with_playlist(library, UserPlaylistPlayer::new(mode))
    }

    pub fn with_playlist(library: Arc<Library>, playlist: UserPlaylistPlayer) -> Self {
        Player {
            library,
            playlist,
            now_playing: None,
        }
    }

    pub fn set_user_playlist(
        &mut self,
        tracks: Vec<TrackId>,
        start_track: TrackId,
    ) -> Result<Arc<Track>, PlayerError> {
        if tracks.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }
        if let Some(&missing) = tracks.iter().find(|&&id| !self.library.contains(id)) {
            return Err(PlayerError::TrackNotFound(missing));
        }

        let start = self.lookup(start_track)?;
        self.playlist.set_user_playlist(tracks, start_track)?;
        self.now_playing = Some(Arc::clone(&start));

        Ok(start)
    }

    pub fn add_to_user_playlist(&mut self, track_id: TrackId) -> Result<(), PlayerError> {
        self.lookup(track_id)?;
        self.playlist.add_to_user_playlist(track_id);
        Ok(())
    }

    pub fn clear_user_playlist(&mut self) {
        self.playlist.clear_user_playlist();
    }

    pub fn next(&mut self) -> Option<Arc<Track>> {
        let id = self.playlist.next()?;
        self.play(id)
    }

    pub fn prev(&mut self) -> Option<Arc<Track>> {
        let id = self.playlist.prev()?;
        self.play(id)
    }

    pub fn set_shuffle_mode(&mut self, mode: ShuffleMode) -> bool {
        self.playlist.set_shuffle_mode(mode)
    }

    pub fn get_now_playing(&self) -> Option<Arc<Track>> {
        self.now_playing.clone()
    }

    pub fn playlist(&self) -> &UserPlaylistPlayer {
        &self.playlist
    }

    /// Tracks of the user playlist in playback order.
    pub fn get_queue(&self) -> Vec<Arc<Track>> {
        self.playlist
            .queue()
            .tracks()
            .iter()
            .filter_map(|&id| self.library.get_track_by_id(id).cloned())
            .collect()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        self.playlist.snapshot()
    }

    /// Restore a saved session, dropping ids the library no longer knows.
    pub fn restore(&mut self, mut snapshot: PlaybackSnapshot) {
        let current = snapshot
            .position
            .and_then(|p| snapshot.tracks.get(p).copied());

        snapshot.tracks.retain(|&id| self.library.contains(id));
        if let Some(backup) = snapshot.backup.as_mut() {
            backup.retain(|&id| self.library.contains(id));
        }
        snapshot.position = match current.and_then(|id| snapshot.tracks.iter().position(|&t| t == id)) {
            Some(p) => Some(p),
            None if snapshot.tracks.is_empty() => None,
            None => Some(0),
        };

        self.playlist.restore(snapshot);
        self.now_playing = self
            .playlist
            .queue()
            .current()
            .and_then(|id| self.library.get_track_by_id(id).cloned());
    }

    fn play(&mut self, id: TrackId) -> Option<Arc<Track>> {
        // Ids are validated on the way in, a miss means the library was swapped
        let track = self.library.get_track_by_id(id).cloned();
        if track.is_none() {
            debug!(id, "Queued track vanished from library");
        }
        self.now_playing = track.clone();
        track
    }

    fn lookup(&self, id: TrackId) -> Result<Arc<Track>, PlayerError> {
        self.library
            .get_track_by_id(id)
            .cloned()
            .ok_or(PlayerError::TrackNotFound(id))
    }
}
