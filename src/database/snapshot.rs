use anyhow::Result;
use rusqlite::params;

use crate::{
    Database,
    database::queries::{
        CLEAR_PLAYBACK_SNAPSHOT, GET_PLAYBACK_SNAPSHOT, GET_SESSION_STATE, SET_SESSION_STATE,
    },
    player::PlaybackSnapshot,
};

impl Database {
    pub fn save_session_state(&mut self, key: &str, value: &str) -> Result<()> {
        self.conn.execute(SET_SESSION_STATE, params![key, value])?;
        Ok(())
    }

    pub fn get_session_state(&mut self, key: &str) -> Result<Option<String>> {
        match self.conn.query_row(GET_SESSION_STATE, params![key], |row| {
            row.get::<_, String>(0)
        }) {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the stored playback state. Optional keys absent from the
    /// snapshot are removed rather than left stale.
    pub fn save_playback_snapshot(&mut self, snapshot: &PlaybackSnapshot) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            tx.execute(CLEAR_PLAYBACK_SNAPSHOT, [])?;
            let mut stmt = tx.prepare(SET_SESSION_STATE)?;
            for (key, value) in snapshot.to_pairs() {
                stmt.execute(params![key, value])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    pub fn load_playback_snapshot(&mut self) -> Result<Option<PlaybackSnapshot>> {
        let mut stmt = self.conn.prepare(GET_PLAYBACK_SNAPSHOT)?;

        let values: Vec<(String, String)> = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .filter_map(Result::ok)
            .collect();

        if values.is_empty() {
            Ok(None)
        } else {
            Ok(Some(PlaybackSnapshot::from_values(values)))
        }
    }
}
