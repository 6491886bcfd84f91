use crate::domain::{ShuffleMode, TrackId};

/// Persistable state of the user playlist, stored as session key/values.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub shuffle: ShuffleMode,
    pub tracks: Vec<TrackId>,
    pub position: Option<usize>,
    pub backup: Option<Vec<TrackId>>,
}

impl PlaybackSnapshot {
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("playback_shuffle", self.shuffle.to_string()),
            ("playback_tracks", join_ids(&self.tracks)),
        ];

        if let Some(pos) = self.position {
            pairs.push(("playback_position", pos.to_string()));
        }

        if let Some(backup) = &self.backup {
            pairs.push(("playback_backup", join_ids(backup)));
        }

        pairs
    }

    pub fn from_values(values: Vec<(String, String)>) -> Self {
        let mut snapshot = PlaybackSnapshot::default();

        for (key, value) in values {
            match key.as_str() {
                "playback_shuffle" => snapshot.shuffle = value.parse().unwrap_or_default(),
                "playback_tracks" => snapshot.tracks = split_ids(&value),
                "playback_position" => snapshot.position = value.parse().ok(),
                "playback_backup" => snapshot.backup = Some(split_ids(&value)),
                _ => {}
            }
        }

        // A cursor past the end would break the queue invariant
        if snapshot.position.is_some_and(|p| p >= snapshot.tracks.len()) {
            snapshot.position = match snapshot.tracks.is_empty() {
                true => None,
                false => Some(0),
            };
        }

        snapshot
    }
}

fn join_ids(ids: &[TrackId]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

fn split_ids(value: &str) -> Vec<TrackId> {
    value
        .split(',')
        .filter_map(|id| id.trim().parse().ok())
        .collect()
}
