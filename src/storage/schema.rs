use rusqlite::Connection;

pub mod tables {
    pub const ALL_TRACKS: &str = "all_tracks";
    pub const SOURCE_PRIORITY: &str = "source_priority";
    pub const TRACK_PAIRS: &str = "track_pairs";

    pub const ALL_TABLES: &[&str] = &[ALL_TRACKS, SOURCE_PRIORITY, TRACK_PAIRS];
}

pub mod columns {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const ARTIST: &str = "artist";
    pub const LINK: &str = "link";
    pub const RANK: &str = "rank";
    pub const ALBUM_URL: &str = "album_url";
    pub const SOURCE: &str = "source";
    pub const PRIORITY: &str = "priority";
    pub const HI_ID: &str = "hi_id";
    pub const LO_ID: &str = "lo_id";
    pub const LO_SOURCE: &str = "lo_source";
}

// every run starts from scratch
const SCHEMA: &str = r#"
DROP TABLE IF EXISTS track_pairs;
DROP TABLE IF EXISTS all_tracks;
DROP TABLE IF EXISTS source_priority;

CREATE TABLE all_tracks (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    artist TEXT NOT NULL,
    link TEXT NOT NULL,
    rank INTEGER NOT NULL,
    album_url TEXT NOT NULL,
    source TEXT NOT NULL
);

CREATE TABLE source_priority (
    source TEXT PRIMARY KEY,
    priority INTEGER NOT NULL
);

CREATE TABLE track_pairs (
    hi_id INTEGER NOT NULL,
    lo_id INTEGER NOT NULL,
    lo_source TEXT NOT NULL,
    PRIMARY KEY (hi_id, lo_id)
);
"#;

pub fn init(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA)
}
