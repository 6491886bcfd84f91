use crate::{PlayerError, domain::TrackId};

/// Ordered track ids with a circular cursor.
///
/// The cursor is `Some` exactly when the queue holds at least one track.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct PlaybackQueue {
    items: Vec<TrackId>,
    position: Option<usize>,
}

impl PlaybackQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the queue and put the cursor on the first `start_track`.
    /// The queue is left untouched when `start_track` is absent.
    pub fn set(&mut self, tracks: Vec<TrackId>, start_track: TrackId) -> Result<(), PlayerError> {
        if tracks.is_empty() {
            return Err(PlayerError::EmptyPlaylist);
        }

        let position = tracks
            .iter()
            .position(|&id| id == start_track)
            .ok_or(PlayerError::StartTrackMissing(start_track))?;

        self.items = tracks;
        self.position = Some(position);
        Ok(())
    }

    pub fn append(&mut self, track: TrackId) {
        self.items.push(track);
        if self.position.is_none() {
            self.position = Some(0);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.position = None;
    }

    pub fn advance(&mut self) -> Option<TrackId> {
        let position = self.position?;
        let next = match position + 1 >= self.items.len() {
            true => 0,
            false => position + 1,
        };
        self.position = Some(next);
        self.items.get(next).copied()
    }

    pub fn retreat(&mut self) -> Option<TrackId> {
        let position = self.position?;
        let prev = match position {
            0 => self.items.len() - 1,
            _ => position - 1,
        };
        self.position = Some(prev);
        self.items.get(prev).copied()
    }

    pub fn current(&self) -> Option<TrackId> {
        self.position.and_then(|p| self.items.get(p).copied())
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn tracks(&self) -> &[TrackId] {
        &self.items
    }

    pub fn index_of(&self, track: TrackId) -> Option<usize> {
        self.items.iter().position(|&id| id == track)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Swap in a reordered list. `position` is clamped into bounds.
    pub(crate) fn replace(&mut self, items: Vec<TrackId>, position: usize) {
        self.position = match items.is_empty() {
            true => None,
            false => Some(position.min(items.len() - 1)),
        };
        self.items = items;
    }

    pub(crate) fn take_items(&mut self) -> Vec<TrackId> {
        self.position = None;
        std::mem::take(&mut self.items)
    }
}
