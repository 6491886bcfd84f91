mod player;
mod queue;
mod shuffle;
mod snapshot;
mod user_playlist;

pub use player::Player;
pub use queue::PlaybackQueue;
pub use shuffle::{ShuffleController, ShuffleState};
pub use snapshot::PlaybackSnapshot;
pub use user_playlist::{PlayerContext, UserPlaylistPlayer};
