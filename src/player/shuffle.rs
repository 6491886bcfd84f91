use super::PlaybackQueue;
use crate::{
    PlayerError,
    domain::{ShuffleMode, TrackId},
};
use rand::{Rng, seq::SliceRandom};
use tracing::{debug, warn};

/// Whether the user playlist currently runs in shuffled order.
///
/// The pre-shuffle order only exists while shuffled, so a stale backup
/// cannot outlive the shuffle that produced it.
#[derive(Default, Debug, Clone, PartialEq)]
pub enum ShuffleState {
    #[default]
    Unshuffled,
    Shuffled {
        backup: Vec<TrackId>,
    },
}

impl ShuffleState {
    pub fn is_shuffled(&self) -> bool {
        matches!(self, ShuffleState::Shuffled { .. })
    }

    pub fn backup(&self) -> Option<&[TrackId]> {
        match self {
            ShuffleState::Shuffled { backup } => Some(backup),
            ShuffleState::Unshuffled => None,
        }
    }
}

#[derive(Default, Debug)]
pub struct ShuffleController {
    mode: ShuffleMode,
    state: ShuffleState,
}

impl ShuffleController {
    pub fn new(mode: ShuffleMode) -> Self {
        ShuffleController {
            mode,
            state: ShuffleState::Unshuffled,
        }
    }

    pub fn mode(&self) -> ShuffleMode {
        self.mode
    }

    pub fn state(&self) -> &ShuffleState {
        &self.state
    }

    /// Switch mode and bring the queue in line with it.
    /// Returns `true` when the queue order changed.
    pub fn set_mode<R: Rng + ?Sized>(
        &mut self,
        mode: ShuffleMode,
        queue: &mut PlaybackQueue,
        current: Option<TrackId>,
        rng: &mut R,
    ) -> bool {
        if mode == self.mode {
            return false;
        }

        debug!(from = %self.mode, to = %mode, "Shuffle mode changed");
        self.mode = mode;
        self.apply(queue, current, rng)
    }

    /// Shuffle or un-shuffle the queue according to the current mode.
    ///
    /// Track modes shuffle an unshuffled, non-empty queue. Every other mode
    /// (album shuffling never applies to a user playlist) restores the
    /// backup if there is one. Anything else is a no-op.
    pub fn apply<R: Rng + ?Sized>(
        &mut self,
        queue: &mut PlaybackQueue,
        current: Option<TrackId>,
        rng: &mut R,
    ) -> bool {
        match (self.mode.shuffles_tracks(), self.state.is_shuffled()) {
            (true, false) if !queue.is_empty() => {
                self.state = shuffle_queue(queue, rng);
                true
            }
            (false, true) => {
                if let ShuffleState::Shuffled { backup } = std::mem::take(&mut self.state) {
                    restore_queue(queue, backup, current);
                }
                true
            }
            _ => false,
        }
    }

    /// Forget the backup without touching the queue, used when the queue
    /// is replaced or cleared.
    pub(crate) fn reset(&mut self) {
        self.state = ShuffleState::Unshuffled;
    }

    /// Reattach a saved backup to an already shuffled queue.
    pub(crate) fn restore_backup(&mut self, backup: Vec<TrackId>, queue: &PlaybackQueue) {
        if self.mode.shuffles_tracks() && !queue.is_empty() {
            self.state = ShuffleState::Shuffled { backup };
        }
    }

    /// Keep an appended track in the backup so it survives un-shuffling.
    pub(crate) fn track_appended(&mut self, track: TrackId) {
        if let ShuffleState::Shuffled { backup } = &mut self.state {
            backup.push(track);
        }
    }
}

/// Pin the track under the cursor first, randomize the rest behind it.
/// Returns the shuffled state holding the original order.
fn shuffle_queue<R: Rng + ?Sized>(queue: &mut PlaybackQueue, rng: &mut R) -> ShuffleState {
    let position = queue.position().unwrap_or(0);
    let backup = queue.tracks().to_vec();

    let mut items = queue.take_items();
    let current = items.remove(position);
    items.shuffle(rng);
    items.insert(0, current);

    debug!(len = items.len(), pinned = current, "User playlist shuffled");
    queue.replace(items, 0);

    ShuffleState::Shuffled { backup }
}

/// Put the original order back and find the playing track in it.
/// A track missing from the backup sends the cursor to 0.
fn restore_queue(queue: &mut PlaybackQueue, backup: Vec<TrackId>, current: Option<TrackId>) {
    let position = match current.and_then(|id| backup.iter().position(|&t| t == id)) {
        Some(position) => position,
        None => {
            match current {
                Some(id) => warn!(err = %PlayerError::TrackNotFound(id), "Restoring user playlist from start"),
                None => warn!("Nothing playing, restoring user playlist from start"),
            }
            0
        }
    };

    debug!(len = backup.len(), position, "User playlist unshuffled");
    queue.replace(backup, position);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn setup(tracks: &[TrackId], start: TrackId) -> (PlaybackQueue, ShuffleController, StdRng) {
        let mut queue = PlaybackQueue::new();
        queue.set(tracks.to_vec(), start).unwrap();
        (queue, ShuffleController::default(), StdRng::seed_from_u64(7))
    }

    #[test]
    fn shuffle_pins_current_first() {
        let (mut queue, mut shuffle, mut rng) = setup(&[1, 2, 3, 4, 5, 6, 7, 8], 5);

        assert!(shuffle.set_mode(ShuffleMode::Tracks, &mut queue, Some(5), &mut rng));
        assert_eq!(queue.position(), Some(0));
        assert_eq!(queue.current(), Some(5));

        let mut sorted = queue.tracks().to_vec();
        sorted.sort();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(shuffle.state().backup(), Some(&[1, 2, 3, 4, 5, 6, 7, 8][..]));
    }

    #[test]
    fn unshuffle_restores_order_and_current() {
        let original = vec![10, 20, 30, 40, 50];
        let (mut queue, mut shuffle, mut rng) = setup(&original, 30);

        shuffle.set_mode(ShuffleMode::Tracks, &mut queue, Some(30), &mut rng);
        let playing = queue.advance().unwrap();

        assert!(shuffle.set_mode(ShuffleMode::None, &mut queue, Some(playing), &mut rng));
        assert_eq!(queue.tracks(), &original[..]);
        assert_eq!(queue.current(), Some(playing));
        assert_eq!(shuffle.state(), &ShuffleState::Unshuffled);
    }

    #[test]
    fn album_modes_unshuffle_user_playlist() {
        for mode in [ShuffleMode::Albums, ShuffleMode::AlbumsArtist] {
            let (mut queue, mut shuffle, mut rng) = setup(&[1, 2, 3, 4], 2);
            shuffle.set_mode(ShuffleMode::TracksArtist, &mut queue, Some(2), &mut rng);
            assert!(shuffle.state().is_shuffled());

            shuffle.set_mode(mode, &mut queue, Some(2), &mut rng);
            assert_eq!(queue.tracks(), &[1, 2, 3, 4]);
            assert_eq!(queue.position(), Some(1));
            assert!(!shuffle.state().is_shuffled());
        }
    }

    #[test]
    fn missing_current_track_restores_at_start() {
        let (mut queue, mut shuffle, mut rng) = setup(&[1, 2, 3], 3);
        shuffle.set_mode(ShuffleMode::Tracks, &mut queue, Some(3), &mut rng);

        shuffle.set_mode(ShuffleMode::None, &mut queue, Some(99), &mut rng);
        assert_eq!(queue.tracks(), &[1, 2, 3]);
        assert_eq!(queue.position(), Some(0));

        shuffle.set_mode(ShuffleMode::Tracks, &mut queue, None, &mut rng);
        shuffle.set_mode(ShuffleMode::None, &mut queue, None, &mut rng);
        assert_eq!(queue.position(), Some(0));
    }

    #[test]
    fn same_family_is_a_no_op() {
        let (mut queue, mut shuffle, mut rng) = setup(&[1, 2, 3, 4, 5], 1);
        shuffle.set_mode(ShuffleMode::Tracks, &mut queue, Some(1), &mut rng);
        let shuffled = queue.tracks().to_vec();

        assert!(!shuffle.set_mode(ShuffleMode::Tracks, &mut queue, Some(1), &mut rng));
        assert!(!shuffle.set_mode(ShuffleMode::TracksArtist, &mut queue, Some(1), &mut rng));
        assert_eq!(queue.tracks(), &shuffled[..]);
        assert_eq!(shuffle.state().backup(), Some(&[1, 2, 3, 4, 5][..]));

        let (mut queue, mut shuffle, mut rng) = setup(&[1, 2, 3], 2);
        assert!(!shuffle.set_mode(ShuffleMode::Albums, &mut queue, Some(2), &mut rng));
        assert_eq!(queue.tracks(), &[1, 2, 3]);
    }

    #[test]
    fn empty_queue_is_never_shuffled() {
        let mut queue = PlaybackQueue::new();
        let mut shuffle = ShuffleController::default();
        let mut rng = StdRng::seed_from_u64(1);

        assert!(!shuffle.set_mode(ShuffleMode::Tracks, &mut queue, None, &mut rng));
        assert!(!shuffle.state().is_shuffled());
        assert!(queue.is_empty());
    }

    #[test]
    fn appended_track_survives_unshuffle() {
        let (mut queue, mut shuffle, mut rng) = setup(&[1, 2, 3], 1);
        shuffle.set_mode(ShuffleMode::Tracks, &mut queue, Some(1), &mut rng);

        queue.append(4);
        shuffle.track_appended(4);

        shuffle.set_mode(ShuffleMode::None, &mut queue, Some(1), &mut rng);
        assert_eq!(queue.tracks(), &[1, 2, 3, 4]);
    }

    #[test]
    fn shuffle_moves_unpinned_tracks() {
        // The pinned track never moves, the rest must not stay in place forever
        let mut moved = false;
        for seed in 0..32 {
            let mut queue = PlaybackQueue::new();
            queue.set(vec![1, 2, 3, 4, 5, 6], 1).unwrap();
            let mut shuffle = ShuffleController::default();
            let mut rng = StdRng::seed_from_u64(seed);
            shuffle.set_mode(ShuffleMode::Tracks, &mut queue, Some(1), &mut rng);

            assert_eq!(queue.tracks()[0], 1);
            moved |= queue.tracks() != [1, 2, 3, 4, 5, 6];
        }
        assert!(moved);
    }
}
