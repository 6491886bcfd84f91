//! Error types raised by the playback engine

use crate::domain::TrackId;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PlayerError {
    /// The start track handed to `set_user_playlist` is not part of the playlist
    #[error("Start track {0} is not in the playlist")]
    StartTrackMissing(TrackId),

    /// A track id is unknown to the collection (or to the restored playlist)
    #[error("Track {0} not found")]
    TrackNotFound(TrackId),

    #[error("Playlist is empty")]
    EmptyPlaylist,
}
