pub const CREATE_TABLES: &str = r"
    CREATE TABLE IF NOT EXISTS artists(
        id INTEGER PRIMARY KEY,
        name TEXT UNIQUE NOT NULL
    );

    CREATE TABLE IF NOT EXISTS albums(
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        year INTEGER,
        lp_album_id TEXT NOT NULL DEFAULT ''
    );

    CREATE TABLE IF NOT EXISTS album_artists(
        album_id INTEGER NOT NULL,
        artist_id INTEGER NOT NULL,
        position INTEGER NOT NULL,
        FOREIGN KEY(album_id) REFERENCES albums(id) ON DELETE CASCADE,
        FOREIGN KEY(artist_id) REFERENCES artists(id),
        UNIQUE (album_id, artist_id)
    );

    CREATE TABLE IF NOT EXISTS album_genres(
        album_id INTEGER NOT NULL,
        genre_id INTEGER NOT NULL,
        FOREIGN KEY(album_id) REFERENCES albums(id) ON DELETE CASCADE,
        UNIQUE (album_id, genre_id)
    );

    CREATE TABLE IF NOT EXISTS discs(
        id INTEGER PRIMARY KEY,
        album_id INTEGER NOT NULL,
        number INTEGER NOT NULL,
        name TEXT NOT NULL DEFAULT '',
        year INTEGER,
        timestamp INTEGER NOT NULL DEFAULT 0,
        FOREIGN KEY(album_id) REFERENCES albums(id) ON DELETE CASCADE,
        UNIQUE (album_id, number)
    );

    CREATE TABLE IF NOT EXISTS tracks(
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        album_id INTEGER NOT NULL,
        disc_number INTEGER NOT NULL DEFAULT 0,
        track_number INTEGER,
        year INTEGER,
        duration INTEGER NOT NULL DEFAULT 0,
        uri TEXT NOT NULL DEFAULT '',
        lp_track_id TEXT NOT NULL DEFAULT '',
        FOREIGN KEY(album_id) REFERENCES albums(id) ON DELETE CASCADE
    );

    CREATE TABLE IF NOT EXISTS track_artists(
        track_id INTEGER NOT NULL,
        artist_id INTEGER NOT NULL,
        position INTEGER NOT NULL,
        FOREIGN KEY(track_id) REFERENCES tracks(id) ON DELETE CASCADE,
        FOREIGN KEY(artist_id) REFERENCES artists(id),
        UNIQUE (track_id, artist_id)
    );

    CREATE TABLE IF NOT EXISTS duration_cache(
        album_hash TEXT PRIMARY KEY,
        album_id INTEGER NOT NULL,
        duration INTEGER NOT NULL
    );

    CREATE TABLE IF NOT EXISTS session_state(
        key TEXT PRIMARY KEY,
        value TEXT NOT NULL
    );
";
