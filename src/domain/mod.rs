mod album;
mod disc;
mod duration;
mod shuffle_mode;
mod track;

pub use album::Album;
pub use disc::Disc;
pub use duration::{DurationStore, MemoryDurationStore};
pub use shuffle_mode::ShuffleMode;
pub use track::Track;

pub type TrackId = i64;
pub type AlbumId = i64;

pub trait TrackInfo {
    fn get_id(&self) -> TrackId;
    fn get_title(&self) -> &str;
    fn get_artist(&self) -> &str;
    fn get_album(&self) -> &str;
    fn get_duration(&self) -> std::time::Duration;
    fn get_duration_str(&self) -> String;
}
