use super::{PlaybackQueue, PlaybackSnapshot, ShuffleController, ShuffleState};
use crate::{
    PlayerError,
    domain::{AlbumId, ShuffleMode, TrackId},
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::info;

/// Playback facts shared by every play source.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct PlayerContext {
    /// Album driving playback, `None` while a user playlist plays
    pub album_id: Option<AlbumId>,
    /// Track handed to the audio backend last
    pub current_track: Option<TrackId>,
}

/// The user playlist: an explicit queue of track ids, optionally shuffled.
pub struct UserPlaylistPlayer {
    context: PlayerContext,
    queue: PlaybackQueue,
    shuffle: ShuffleController,
    rng: StdRng,
}

impl UserPlaylistPlayer {
    pub fn new(mode: ShuffleMode) -> Self {
        Self::with_rng(mode, StdRng::from_os_rng())
    }

    pub fn with_rng(mode: ShuffleMode, rng: StdRng) -> Self {
        UserPlaylistPlayer {
            context: PlayerContext::default(),
            queue: PlaybackQueue::new(),
            shuffle: ShuffleController::new(mode),
            rng,
        }
    }

    /// Make `tracks` the current playlist, starting at `track_id`.
    /// With a track shuffle active the new playlist is shuffled at once,
    /// `track_id` first.
    pub fn set_user_playlist(
        &mut self,
        tracks: Vec<TrackId>,
        track_id: TrackId,
    ) -> Result<(), PlayerError> {
        self.queue.set(tracks, track_id)?;
        self.shuffle.reset();

        self.context.album_id = None;
        self.context.current_track = Some(track_id);

        info!(len = self.queue.len(), start = track_id, "User playlist set");
        self.shuffle
            .apply(&mut self.queue, self.context.current_track, &mut self.rng);
        Ok(())
    }

    pub fn add_to_user_playlist(&mut self, track_id: TrackId) {
        self.queue.append(track_id);
        self.shuffle.track_appended(track_id);
    }

    pub fn clear_user_playlist(&mut self) {
        self.queue.clear();
        self.shuffle.reset();
    }

    pub fn next(&mut self) -> Option<TrackId> {
        let track_id = self.queue.advance()?;
        self.context.current_track = Some(track_id);
        Some(track_id)
    }

    pub fn prev(&mut self) -> Option<TrackId> {
        let track_id = self.queue.retreat()?;
        self.context.current_track = Some(track_id);
        Some(track_id)
    }

    /// Apply a shuffle setting change. Returns `true` if the order changed.
    pub fn set_shuffle_mode(&mut self, mode: ShuffleMode) -> bool {
        self.shuffle.set_mode(
            mode,
            &mut self.queue,
            self.context.current_track,
            &mut self.rng,
        )
    }

    pub fn shuffle_mode(&self) -> ShuffleMode {
        self.shuffle.mode()
    }

    pub fn shuffle_state(&self) -> &ShuffleState {
        self.shuffle.state()
    }

    pub fn queue(&self) -> &PlaybackQueue {
        &self.queue
    }

    pub fn context(&self) -> &PlayerContext {
        &self.context
    }

    pub fn is_active(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            shuffle: self.shuffle.mode(),
            tracks: self.queue.tracks().to_vec(),
            position: self.queue.position(),
            backup: self.shuffle.state().backup().map(<[TrackId]>::to_vec),
        }
    }

    /// Bring back a saved playlist exactly as it was, shuffled order and
    /// backup included. A backup only survives when the saved mode still
    /// shuffles tracks.
    pub fn restore(&mut self, snapshot: PlaybackSnapshot) {
        let position = snapshot.position.unwrap_or(0);
        self.context.current_track = snapshot.tracks.get(position).copied();

        self.queue.replace(snapshot.tracks, position);
        self.shuffle = ShuffleController::new(snapshot.shuffle);

        if let Some(backup) = snapshot.backup {
            self.shuffle.restore_backup(backup, &self.queue);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(mode: ShuffleMode) -> UserPlaylistPlayer {
        UserPlaylistPlayer::with_rng(mode, StdRng::seed_from_u64(11))
    }

    #[test]
    fn walks_the_queue_in_order() {
        let mut p = player(ShuffleMode::None);
        p.set_user_playlist(vec![10, 20, 30], 20).unwrap();

        assert_eq!(p.queue().position(), Some(1));
        assert_eq!(p.next(), Some(30));
        assert_eq!(p.queue().position(), Some(2));
        assert_eq!(p.next(), Some(10));
        assert_eq!(p.queue().position(), Some(0));
        assert_eq!(p.prev(), Some(30));
        assert_eq!(p.context().current_track, Some(30));
    }

    #[test]
    fn set_rejects_unknown_start() {
        let mut p = player(ShuffleMode::None);
        assert_eq!(
            p.set_user_playlist(vec![1, 2], 3),
            Err(PlayerError::StartTrackMissing(3))
        );
        assert!(!p.is_active());
    }

    #[test]
    fn set_clears_album_context() {
        let mut p = player(ShuffleMode::None);
        p.context.album_id = Some(4);
        p.set_user_playlist(vec![1], 1).unwrap();
        assert_eq!(p.context().album_id, None);
    }

    #[test]
    fn shuffled_set_starts_with_start_track() {
        let mut p = player(ShuffleMode::Tracks);
        p.set_user_playlist(vec![1, 2, 3, 4, 5, 6], 4).unwrap();

        assert_eq!(p.queue().current(), Some(4));
        assert_eq!(p.queue().position(), Some(0));
        assert_eq!(p.shuffle_state().backup(), Some(&[1, 2, 3, 4, 5, 6][..]));
    }

    #[test]
    fn shuffle_then_unshuffle_restores_order() {
        let mut p = player(ShuffleMode::None);
        p.set_user_playlist(vec![1, 2, 3, 4, 5, 6], 3).unwrap();

        assert!(p.set_shuffle_mode(ShuffleMode::Tracks));
        assert_eq!(p.queue().current(), Some(3));
        let playing = p.next().unwrap();

        assert!(p.set_shuffle_mode(ShuffleMode::None));
        assert_eq!(p.queue().tracks(), &[1, 2, 3, 4, 5, 6]);
        assert_eq!(p.queue().current(), Some(playing));
    }

    #[test]
    fn new_playlist_drops_old_backup() {
        let mut p = player(ShuffleMode::Tracks);
        p.set_user_playlist(vec![1, 2, 3], 1).unwrap();
        p.set_user_playlist(vec![7, 8, 9], 8).unwrap();
        assert_eq!(p.shuffle_state().backup(), Some(&[7, 8, 9][..]));

        p.set_shuffle_mode(ShuffleMode::None);
        assert_eq!(p.queue().tracks(), &[7, 8, 9]);
        assert_eq!(p.queue().current(), Some(8));
    }

    #[test]
    fn clear_forgets_shuffle() {
        let mut p = player(ShuffleMode::Tracks);
        p.set_user_playlist(vec![1, 2, 3], 1).unwrap();
        p.clear_user_playlist();

        assert!(!p.shuffle_state().is_shuffled());
        assert_eq!(p.next(), None);
        assert_eq!(p.prev(), None);
        assert!(!p.set_shuffle_mode(ShuffleMode::None));
    }

    #[test]
    fn add_then_play_added_track() {
        let mut p = player(ShuffleMode::None);
        p.add_to_user_playlist(5);
        p.add_to_user_playlist(6);
        assert_eq!(p.queue().current(), Some(5));
        assert_eq!(p.next(), Some(6));
    }

    #[test]
    fn snapshot_restores_shuffled_state() {
        let mut p = player(ShuffleMode::Tracks);
        p.set_user_playlist(vec![1, 2, 3, 4], 2).unwrap();
        p.next();
        let snapshot = p.snapshot();

        let mut restored = player(ShuffleMode::None);
        restored.restore(snapshot.clone());
        assert_eq!(restored.snapshot(), snapshot);
        assert_eq!(restored.shuffle_mode(), ShuffleMode::Tracks);

        restored.set_shuffle_mode(ShuffleMode::None);
        assert_eq!(restored.queue().tracks(), &[1, 2, 3, 4]);
        assert_eq!(restored.queue().current(), p.queue().current());
    }
}
