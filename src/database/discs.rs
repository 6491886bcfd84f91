use super::{Database, queries::*};
use crate::domain::{AlbumId, Disc, TrackId};
use anyhow::Result;
use rusqlite::{OptionalExtension, params};

pub type DiscId = i64;

impl Database {
    /// All disc rows, grouped by album and ordered by number.
    pub fn get_discs(&mut self) -> Result<Vec<Disc>> {
        let mut stmt = self.conn.prepare(GET_DISCS)?;
        let discs = stmt
            .query_map([], |row| {
                let mut disc = Disc::new(row.get("album_id")?, row.get("number")?);
                disc.id = row.get("id")?;
                disc.name = row.get("name")?;
                disc.year = row.get("year")?;
                Ok(disc)
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(discs)
    }

    pub fn get_disc_id(&mut self, album_id: AlbumId, number: u32) -> Result<Option<DiscId>> {
        let id = self
            .conn
            .query_row(GET_DISC_ID, params![album_id, number], |r| r.get(0))
            .optional()?;
        Ok(id)
    }

    pub fn get_disc_number(&mut self, disc_id: DiscId) -> Result<Option<u32>> {
        let number = self
            .conn
            .query_row(GET_DISC_NUMBER, [disc_id], |r| r.get(0))
            .optional()?;
        Ok(number)
    }

    pub fn get_disc_album_id(&mut self, disc_id: DiscId) -> Result<Option<AlbumId>> {
        let album_id = self
            .conn
            .query_row(GET_DISC_ALBUM_ID, [disc_id], |r| r.get(0))
            .optional()?;
        Ok(album_id)
    }

    pub fn get_disc_year(&mut self, disc_id: DiscId) -> Result<Option<u32>> {
        let year = self
            .conn
            .query_row(GET_DISC_YEAR, [disc_id], |r| r.get::<_, Option<u32>>(0))
            .optional()?;
        Ok(year.flatten())
    }

    pub fn set_disc_year(&mut self, disc_id: DiscId, year: Option<u32>) -> Result<()> {
        self.conn.execute(SET_DISC_YEAR, params![disc_id, year])?;
        Ok(())
    }

    /// Modification time of the disc, `0` when unknown.
    pub fn get_disc_timestamp(&mut self, disc_id: DiscId) -> Result<i64> {
        let timestamp = self
            .conn
            .query_row(GET_DISC_TIMESTAMP, [disc_id], |r| r.get(0))
            .optional()?;
        Ok(timestamp.unwrap_or(0))
    }

    pub fn set_disc_timestamp(&mut self, disc_id: DiscId, timestamp: i64) -> Result<()> {
        self.conn
            .execute(SET_DISC_TIMESTAMP, params![disc_id, timestamp])?;
        Ok(())
    }

    pub fn get_disc_tracks(&mut self, disc_id: DiscId) -> Result<Vec<TrackId>> {
        let mut stmt = self.conn.prepare(GET_DISC_TRACKS)?;
        let ids = stmt
            .query_map([disc_id], |r| r.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::seeded;

    #[test]
    fn discs_are_created_with_tracks() {
        let (mut db, _) = seeded();
        let discs = db.get_discs().unwrap();

        // Help! has two discs, Abbey Road one
        assert_eq!(discs.len(), 3);
        assert_eq!(discs[0].number, 1);
        assert_eq!(discs[1].number, 2);
        assert_eq!(discs[0].album_id, discs[1].album_id);
    }

    #[test]
    fn disc_lookups() {
        let (mut db, ids) = seeded();
        let album_id = db.get_discs().unwrap()[0].album_id;

        let disc_id = db.get_disc_id(album_id, 1).unwrap().unwrap();
        assert_eq!(db.get_disc_number(disc_id).unwrap(), Some(1));
        assert_eq!(db.get_disc_album_id(disc_id).unwrap(), Some(album_id));
        // Track number order: Help!, Dizzy Miss Lizzy
        assert_eq!(db.get_disc_tracks(disc_id).unwrap(), vec![ids[1], ids[2]]);

        assert_eq!(db.get_disc_id(album_id, 9).unwrap(), None);
        assert_eq!(db.get_disc_number(9999).unwrap(), None);
    }

    #[test]
    fn year_and_timestamp_updates() {
        let (mut db, _) = seeded();
        let disc_id = db.get_discs().unwrap()[0].id;

        assert_eq!(db.get_disc_year(disc_id).unwrap(), None);
        db.set_disc_year(disc_id, Some(1965)).unwrap();
        assert_eq!(db.get_disc_year(disc_id).unwrap(), Some(1965));

        assert_eq!(db.get_disc_timestamp(disc_id).unwrap(), 0);
        db.set_disc_timestamp(disc_id, 1_700_000_000).unwrap();
        assert_eq!(db.get_disc_timestamp(disc_id).unwrap(), 1_700_000_000);
    }
}
