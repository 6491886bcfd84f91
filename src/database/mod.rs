use anyhow::{Context, Result, anyhow};
use queries::*;
use rusqlite::{Connection, params};
use std::{
    collections::{HashMap, HashSet},
    fs,
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};
use tracing::{debug, warn};

mod discs;
mod durations;
pub mod queries;
mod snapshot;
mod tables;

pub use discs::DiscId;

use crate::domain::{Album, AlbumId, Track, TrackId};

const CONFIG_DIRECTORY: &str = "Lollypop";
const DATABASE_FILENAME: &str = "lollypop.db";

pub struct Database {
    conn: Connection,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        debug!(path = %path.display(), "Database opened");

        Self::init(conn)
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir()
            .ok_or_else(|| anyhow!("Config folder not present on system!"))?
            .join(CONFIG_DIRECTORY);

        Ok(dir.join(DATABASE_FILENAME))
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", "ON")?;

        let mut db = Database { conn };
        db.create_tables()?;

        Ok(db)
    }

    fn create_tables(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute_batch(tables::CREATE_TABLES)?;
        tx.commit()?;

        Ok(())
    }

    // =====================
    //   ARTISTS AND ALBUMS
    // =====================

    pub(crate) fn insert_artists(&mut self, artists: &HashSet<&str>) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut insert_artists = tx.prepare(INSERT_ARTIST)?;
            for artist in artists {
                insert_artists.execute(params![artist])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn get_artist_map_name_to_id(&self) -> Result<HashMap<String, i64>> {
        let artist_map = self
            .conn
            .prepare(GET_ARTIST_MAP)?
            .query_map([], |row| Ok((row.get("name")?, row.get("id")?)))?
            .collect::<Result<HashMap<_, _>, _>>()?;

        Ok(artist_map)
    }

    /// Insert an album with its artists and genres, returning the new id.
    pub fn insert_album(&mut self, album: &Album) -> Result<AlbumId> {
        self.insert_artists(&album.artists.iter().map(String::as_str).collect())?;
        let artist_map = self.get_artist_map_name_to_id()?;

        let tx = self.conn.transaction()?;
        let album_id = {
            tx.execute(
                INSERT_ALBUM,
                params![album.name.as_str(), album.year, &album.lp_album_id],
            )?;
            let album_id = tx.last_insert_rowid();

            let mut insert_artist = tx.prepare(INSERT_ALBUM_ARTIST)?;
            for (position, name) in album.artists.iter().enumerate() {
                if let Some(artist_id) = artist_map.get(name) {
                    insert_artist.execute(params![album_id, artist_id, position as i64])?;
                }
            }

            let mut insert_genre = tx.prepare(INSERT_ALBUM_GENRE)?;
            for genre_id in &album.genre_ids {
                insert_genre.execute(params![album_id, genre_id])?;
            }

            album_id
        };
        tx.commit()?;

        Ok(album_id)
    }

    /// Album metadata only, tracks are attached by the library.
    pub fn get_albums(&mut self) -> Result<Vec<Album>> {
        let mut artists: HashMap<AlbumId, Vec<(i64, String)>> = HashMap::new();
        {
            let mut stmt = self.conn.prepare(GET_ALBUM_ARTISTS)?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, AlbumId>(0)?, row.get(1)?, row.get(2)?))
            })?;
            for row in rows {
                let (album_id, artist_id, name) = row?;
                artists.entry(album_id).or_default().push((artist_id, name));
            }
        }

        let mut genres: HashMap<AlbumId, Vec<i64>> = HashMap::new();
        {
            let mut stmt = self.conn.prepare(GET_ALBUM_GENRES)?;
            let rows = stmt.query_map([], |row| Ok((row.get::<_, AlbumId>(0)?, row.get(1)?)))?;
            for row in rows {
                let (album_id, genre_id) = row?;
                genres.entry(album_id).or_default().push(genre_id);
            }
        }

        let mut stmt = self.conn.prepare(GET_ALBUMS)?;
        let albums = stmt
            .query_map([], |row| {
                let id: AlbumId = row.get("id")?;
                let name: String = row.get("name")?;

                let mut album = Album::new(id, &Arc::new(name));
                album.year = row.get("year")?;
                album.lp_album_id = row.get("lp_album_id")?;
                Ok(album)
            })?
            .collect::<Result<Vec<_>, _>>()?
            .into_iter()
            .map(|mut album| {
                if let Some(list) = artists.remove(&album.id) {
                    (album.artist_ids, album.artists) = list.into_iter().unzip();
                }
                album.genre_ids = genres.remove(&album.id).unwrap_or_default();
                album
            })
            .collect();

        Ok(albums)
    }

    // ===================
    //   TRACK OPERATIONS
    // ===================

    /// Insert tracks (ids are assigned by the store) along with their
    /// artists and discs. Returns the new ids in input order.
    pub fn insert_tracks(&mut self, tracks: &[Track]) -> Result<Vec<TrackId>> {
        let artist_cache = tracks
            .iter()
            .flat_map(|t| t.artists.iter().map(String::as_str))
            .collect::<HashSet<_>>();

        // ORDER IS IMPORTANT HERE
        self.insert_artists(&artist_cache)?;
        let artist_map = self.get_artist_map_name_to_id()?;

        let mut ids = Vec::with_capacity(tracks.len());
        let tx = self.conn.transaction()?;
        {
            let mut insert_track = tx.prepare_cached(INSERT_TRACK)?;
            let mut insert_artist = tx.prepare_cached(INSERT_TRACK_ARTIST)?;
            let mut insert_disc = tx.prepare_cached(INSERT_DISC)?;

            for track in tracks {
                insert_track.execute(params![
                    &track.title,
                    track.album_id,
                    track.disc_number,
                    track.track_number,
                    track.year,
                    track.duration.as_millis() as i64,
                    &track.uri,
                    &track.lp_track_id,
                ])?;
                let track_id = tx.last_insert_rowid();

                for (position, name) in track.artists.iter().enumerate() {
                    match artist_map.get(name) {
                        Some(artist_id) => {
                            insert_artist.execute(params![track_id, artist_id, position as i64])?;
                        }
                        None => warn!(track = %track.title, artist = %name, "Skipping unknown artist"),
                    }
                }

                insert_disc.execute(params![track.album_id, track.disc_number, track.year])?;
                ids.push(track_id);
            }
        }
        tx.commit()?;

        Ok(ids)
    }

    pub fn get_all_tracks(&mut self) -> Result<Vec<Track>> {
        let mut artists: HashMap<TrackId, Vec<String>> = HashMap::new();
        {
            let mut stmt = self.conn.prepare(GET_TRACK_ARTISTS)?;
            let rows = stmt.query_map([], |row| Ok((row.get::<_, TrackId>(0)?, row.get(1)?)))?;
            for row in rows {
                let (track_id, name) = row?;
                artists.entry(track_id).or_default().push(name);
            }
        }

        let album_artists: HashMap<AlbumId, Vec<String>> = self
            .get_albums()?
            .into_iter()
            .map(|a| (a.id, a.artists))
            .collect();

        let mut album_names: HashMap<String, Arc<String>> = HashMap::new();

        let mut stmt = self.conn.prepare(GET_ALL_TRACKS)?;
        let tracks = stmt
            .query_map([], |row| {
                let id: TrackId = row.get("id")?;
                let album_id: AlbumId = row.get("album_id")?;
                let album_name: String = row.get("album")?;
                let duration: i64 = row.get("duration")?;

                Ok(Track {
                    id,
                    title: row.get("name")?,
                    artists: artists.remove(&id).unwrap_or_default(),
                    album_id,
                    album: Arc::clone(
                        album_names
                            .entry(album_name.clone())
                            .or_insert_with(|| Arc::new(album_name)),
                    ),
                    album_artists: album_artists.get(&album_id).cloned().unwrap_or_default(),
                    disc_number: row.get("disc_number")?,
                    track_number: row.get("track_number")?,
                    year: row.get("year")?,
                    duration: Duration::from_millis(duration.max(0) as u64),
                    uri: row.get("uri")?,
                    lp_track_id: row.get("lp_track_id")?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(tracks)
    }

    pub fn set_track_uri(&mut self, id: TrackId, uri: &str) -> Result<()> {
        let updated = self.conn.execute(SET_TRACK_URI, params![id, uri])?;
        if updated == 0 {
            return Err(anyhow!("Track {id} not found"));
        }
        Ok(())
    }

    pub fn get_track_uri(&mut self, id: TrackId) -> Result<String> {
        let output = self.conn.query_row(GET_TRACK_URI, [id], |r| r.get(0))?;
        Ok(output)
    }

    pub fn delete_tracks(&mut self, to_delete: &[TrackId]) -> Result<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare(DELETE_TRACK)?;
            for id in to_delete {
                stmt.execute([id])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Two albums: "Help!" (two discs) and "Abbey Road".
    pub(crate) fn seeded() -> (Database, Vec<TrackId>) {
        let mut db = Database::open_in_memory().unwrap();

        let mut help = Album::new(0, &Arc::new("Help!".to_string()));
        help.artists = vec!["The Beatles".into()];
        help.genre_ids = vec![1];
        help.lp_album_id = "lp-help".into();
        help.year = Some(1965);
        let help_id = db.insert_album(&help).unwrap();

        let mut abbey = Album::new(0, &Arc::new("Abbey Road".to_string()));
        abbey.artists = vec!["The Beatles".into()];
        abbey.genre_ids = vec![2];
        let abbey_id = db.insert_album(&abbey).unwrap();

        let track = |title: &str, album_id, disc, no, secs, artists: &[&str]| Track {
            album_id,
            disc_number: disc,
            track_number: Some(no),
            duration: Duration::from_secs(secs),
            artists: artists.iter().map(|a| a.to_string()).collect(),
            lp_track_id: format!("lp-{title}"),
            ..Track::new(0, title)
        };

        let ids = db
            .insert_tracks(&[
                track("Yesterday", help_id, 2, 1, 125, &["The Beatles"]),
                track("Help!", help_id, 1, 1, 138, &["The Beatles"]),
                track("Dizzy Miss Lizzy", help_id, 1, 2, 174, &["The Beatles", "Larry Williams"]),
                track("Something", abbey_id, 1, 2, 182, &["The Beatles"]),
                track("Come Together", abbey_id, 1, 1, 259, &["The Beatles"]),
            ])
            .unwrap();

        (db, ids)
    }

    #[test]
    fn tracks_round_trip_with_artists() {
        let (mut db, ids) = seeded();
        let tracks = db.get_all_tracks().unwrap();
        assert_eq!(tracks.len(), 5);

        let dizzy = tracks.iter().find(|t| t.id == ids[2]).unwrap();
        assert_eq!(dizzy.artists, vec!["The Beatles", "Larry Williams"]);
        assert_eq!(dizzy.album.as_str(), "Help!");
        assert_eq!(dizzy.album_artists, vec!["The Beatles"]);
        assert_eq!(dizzy.duration, Duration::from_secs(174));
        assert_eq!(dizzy.lp_track_id, "lp-Dizzy Miss Lizzy");
    }

    #[test]
    fn albums_carry_artists_and_genres() {
        let (mut db, _) = seeded();
        let albums = db.get_albums().unwrap();

        assert_eq!(albums.len(), 2);
        assert_eq!(albums[0].name.as_str(), "Abbey Road");
        let help = &albums[1];
        assert_eq!(help.artists, vec!["The Beatles"]);
        assert_eq!(help.artist_ids.len(), 1);
        assert_eq!(help.genre_ids, vec![1]);
        assert_eq!(help.year, Some(1965));
        assert_eq!(help.lp_album_id, "lp-help");
    }

    #[test]
    fn track_uri_updates() {
        let (mut db, ids) = seeded();
        db.set_track_uri(ids[0], "https://www.youtube.com/watch?v=abc")
            .unwrap();
        assert_eq!(
            db.get_track_uri(ids[0]).unwrap(),
            "https://www.youtube.com/watch?v=abc"
        );
        assert!(db.set_track_uri(9999, "x").is_err());
    }

    #[test]
    fn deleted_tracks_are_gone() {
        let (mut db, ids) = seeded();
        db.delete_tracks(&ids[..2]).unwrap();
        assert_eq!(db.get_all_tracks().unwrap().len(), 3);
    }

    #[test]
    fn open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(DATABASE_FILENAME);

        Database::open(&path).unwrap();
        assert!(path.exists());
    }
}
