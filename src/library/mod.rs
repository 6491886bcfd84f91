mod library;

pub use library::{Library, TrackMap};
