use rusqlite::{
    Result as RusqliteResult, ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, Value, ValueRef},
};
use serde::Deserialize;
use std::{fmt::Display, str::FromStr};

#[derive(Default, Debug, PartialEq, Eq, Copy, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShuffleMode {
    #[default]
    None = 0,
    Tracks = 1,
    TracksArtist = 2,
    Albums = 3,
    AlbumsArtist = 4,
}

impl ShuffleMode {
    /// Track shuffling is the only mode that reorders a user playlist.
    pub fn shuffles_tracks(&self) -> bool {
        matches!(self, ShuffleMode::Tracks | ShuffleMode::TracksArtist)
    }

    pub fn from_i64(value: i64) -> Self {
        match value {
            1 => Self::Tracks,
            2 => Self::TracksArtist,
            3 => Self::Albums,
            4 => Self::AlbumsArtist,
            _ => Self::None,
        }
    }

    pub fn to_i64(&self) -> i64 {
        *self as i64
    }
}

impl FromStr for ShuffleMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "none" | "" => Ok(Self::None),
            "tracks" => Ok(Self::Tracks),
            "tracks_artist" => Ok(Self::TracksArtist),
            "albums" => Ok(Self::Albums),
            "albums_artist" => Ok(Self::AlbumsArtist),
            other => Err(anyhow::anyhow!("Unknown shuffle mode: {other}")),
        }
    }
}

impl Display for ShuffleMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match *self {
            ShuffleMode::None => write!(f, "none"),
            ShuffleMode::Tracks => write!(f, "tracks"),
            ShuffleMode::TracksArtist => write!(f, "tracks_artist"),
            ShuffleMode::Albums => write!(f, "albums"),
            ShuffleMode::AlbumsArtist => write!(f, "albums_artist"),
        }
    }
}

impl FromSql for ShuffleMode {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value {
            ValueRef::Integer(i) => Ok(ShuffleMode::from_i64(i)),
            _ => Err(FromSqlError::InvalidType),
        }
    }
}

impl ToSql for ShuffleMode {
    fn to_sql(&self) -> RusqliteResult<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::Owned(Value::Integer(self.to_i64())))
    }
}
