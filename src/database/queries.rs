pub const GET_ALL_TRACKS: &str = "
    SELECT
        t.id,
        t.name,
        t.album_id,
        t.disc_number,
        t.track_number,
        t.year,
        t.duration,
        t.uri,
        t.lp_track_id,
        a.name as album
    FROM tracks t
    INNER JOIN albums a ON a.id = t.album_id
    ORDER BY
        album ASC,
        disc_number ASC,
        track_number ASC
";

pub const INSERT_TRACK: &str = "
    INSERT INTO tracks (
        name,
        album_id,
        disc_number,
        track_number,
        year,
        duration,
        uri,
        lp_track_id
    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
";

pub const INSERT_ARTIST: &str = "
    INSERT OR IGNORE INTO artists (
    name
) VALUES (?1)
";

pub const GET_ARTIST_MAP: &str = "
    SELECT id, name FROM artists
";

pub const INSERT_TRACK_ARTIST: &str = "
    INSERT OR IGNORE INTO track_artists (track_id, artist_id, position)
    VALUES (?1, ?2, ?3)
";

pub const GET_TRACK_ARTISTS: &str = "
    SELECT ta.track_id, ar.name
    FROM track_artists ta
    INNER JOIN artists ar ON ar.id = ta.artist_id
    ORDER BY ta.track_id, ta.position
";

pub const INSERT_ALBUM: &str = "
    INSERT INTO albums (name, year, lp_album_id)
    VALUES (?1, ?2, ?3)
";

pub const GET_ALBUMS: &str = "
    SELECT id, name, year, lp_album_id
    FROM albums
    ORDER BY name
";

pub const INSERT_ALBUM_ARTIST: &str = "
    INSERT OR IGNORE INTO album_artists (album_id, artist_id, position)
    VALUES (?1, ?2, ?3)
";

pub const GET_ALBUM_ARTISTS: &str = "
    SELECT aa.album_id, aa.artist_id, ar.name
    FROM album_artists aa
    INNER JOIN artists ar ON ar.id = aa.artist_id
    ORDER BY aa.album_id, aa.position
";

pub const INSERT_ALBUM_GENRE: &str = "
    INSERT OR IGNORE INTO album_genres (album_id, genre_id)
    VALUES (?1, ?2)
";

pub const GET_ALBUM_GENRES: &str = "
    SELECT album_id, genre_id FROM album_genres
    ORDER BY album_id, genre_id
";

pub const SET_TRACK_URI: &str = "
    UPDATE tracks SET uri = ?2 WHERE id = ?1
";

pub const GET_TRACK_URI: &str = "
    SELECT uri FROM tracks WHERE id = ?
";

pub const DELETE_TRACK: &str = "
    DELETE FROM tracks WHERE id = ?
";

// =========
//   DISCS
// =========

pub const INSERT_DISC: &str = "
    INSERT OR IGNORE INTO discs (album_id, number, year)
    VALUES (?1, ?2, ?3)
";

pub const GET_DISCS: &str = "
    SELECT id, album_id, number, name, year
    FROM discs
    ORDER BY album_id, number
";

pub const GET_DISC_NUMBER: &str = "
    SELECT number FROM discs WHERE id = ?
";

pub const GET_DISC_ALBUM_ID: &str = "
    SELECT album_id FROM discs WHERE id = ?
";

pub const GET_DISC_YEAR: &str = "
    SELECT year FROM discs WHERE id = ?
";

pub const GET_DISC_TIMESTAMP: &str = "
    SELECT timestamp FROM discs WHERE id = ?
";

pub const GET_DISC_ID: &str = "
    SELECT id FROM discs WHERE album_id = ?1 AND number = ?2
";

pub const SET_DISC_YEAR: &str = "
    UPDATE discs SET year = ?2 WHERE id = ?1
";

pub const SET_DISC_TIMESTAMP: &str = "
    UPDATE discs SET timestamp = ?2 WHERE id = ?1
";

pub const GET_DISC_TRACKS: &str = "
    SELECT t.id
    FROM tracks t
    INNER JOIN discs d ON d.album_id = t.album_id AND d.number = t.disc_number
    WHERE d.id = ?
    ORDER BY t.track_number, t.id
";

// =============
//   DURATIONS
// =============

pub const GET_CACHED_DURATION: &str = "
    SELECT duration FROM duration_cache WHERE album_hash = ?
";

pub const SET_CACHED_DURATION: &str = "
    INSERT OR REPLACE INTO duration_cache (album_hash, album_id, duration)
    VALUES (?1, ?2, ?3)
";

pub const CLEAR_CACHED_DURATIONS: &str = "
    DELETE FROM duration_cache WHERE album_id = ?
";

// Filters are appended at runtime, see `Database::album_duration`
pub const SUM_ALBUM_DURATION: &str = "
    SELECT COALESCE(SUM(t.duration), 0)
    FROM tracks t
    WHERE t.album_id = ?
";

// ===========
//   SESSION
// ===========

pub const GET_SESSION_STATE: &str = "
    SELECT value FROM session_state WHERE key = ?
";

pub const SET_SESSION_STATE: &str = "
    INSERT OR REPLACE INTO session_state (key, value)
    VALUES (?1, ?2)
";

pub const GET_PLAYBACK_SNAPSHOT: &str = "
    SELECT key, value FROM session_state WHERE key GLOB 'playback_*'
";

pub const CLEAR_PLAYBACK_SNAPSHOT: &str = "
    DELETE FROM session_state WHERE key GLOB 'playback_*'
";
