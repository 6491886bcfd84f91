use super::{Database, queries::*};
use crate::domain::{AlbumId, DurationStore};
use anyhow::Result;
use rusqlite::{OptionalExtension, params, params_from_iter, types::Value};
use std::time::Duration;

impl DurationStore for Database {
    fn cached_duration(&mut self, key: &str) -> Result<Option<Duration>> {
        let ms: Option<i64> = self
            .conn
            .query_row(GET_CACHED_DURATION, [key], |r| r.get(0))
            .optional()?;
        Ok(ms.map(millis))
    }

    fn cache_duration(&mut self, album_id: AlbumId, key: &str, duration: Duration) -> Result<()> {
        self.conn.execute(
            SET_CACHED_DURATION,
            params![key, album_id, duration.as_millis() as i64],
        )?;
        Ok(())
    }

    fn album_duration(
        &mut self,
        album_id: AlbumId,
        genre_ids: &[i64],
        artist_ids: &[i64],
    ) -> Result<Duration> {
        let mut sql = String::from(SUM_ALBUM_DURATION);
        let mut values = vec![Value::Integer(album_id)];

        if !genre_ids.is_empty() {
            sql.push_str(&format!(
                " AND EXISTS (SELECT 1 FROM album_genres g WHERE g.album_id = t.album_id AND g.genre_id IN ({}))",
                placeholders(genre_ids.len())
            ));
            values.extend(genre_ids.iter().map(|&id| Value::Integer(id)));
        }

        if !artist_ids.is_empty() {
            sql.push_str(&format!(
                " AND EXISTS (SELECT 1 FROM track_artists ta WHERE ta.track_id = t.id AND ta.artist_id IN ({}))",
                placeholders(artist_ids.len())
            ));
            values.extend(artist_ids.iter().map(|&id| Value::Integer(id)));
        }

        let ms: i64 = self
            .conn
            .query_row(&sql, params_from_iter(values), |r| r.get(0))?;
        Ok(millis(ms))
    }
}

impl Database {
    /// Forget every cached duration for an album, after its tracks change.
    pub fn clear_cached_durations(&mut self, album_id: AlbumId) -> Result<()> {
        self.conn.execute(CLEAR_CACHED_DURATIONS, [album_id])?;
        Ok(())
    }
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(",")
}

fn millis(ms: i64) -> Duration {
    Duration::from_millis(ms.max(0) as u64)
}
