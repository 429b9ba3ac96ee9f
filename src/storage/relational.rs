//! Reconciliation materialized in SQLite with trigram similarity.
//!
//! All tracks go into one table. Every pair of tracks from different sources
//! whose `name || artist` similarity exceeds the threshold is recorded with
//! the higher-priority track on the `hi` side. Tracks that never sit on the
//! `lo` side of a pair represent their song; the `lo` sources they absorbed
//! become additional sources.

use std::path::PathBuf;

use log::{debug, info};
use rusqlite::{Transaction, params};

use crate::{
    domain::{
        priority::PRIORITY_TABLE,
        track::{GoldTrack, Track, TrackSource},
    },
    reconcile::{Reconciler, error::ReconcileError, finalize, trigram},
    storage::{
        db,
        schema::{columns::*, tables::*},
    },
};

#[derive(Debug, Clone)]
pub struct RelationalReconciler {
    /// where to keep the working database, in memory when unset
    path: Option<PathBuf>,
    threshold: f64,
}

impl Default for RelationalReconciler {
    fn default() -> Self {
        Self {
            path: None,
            threshold: trigram::DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl RelationalReconciler {
    pub fn new(path: Option<PathBuf>, threshold: f64) -> Self {
        Self { path, threshold }
    }

    fn insert_priorities(tx: &Transaction) -> Result<(), rusqlite::Error> {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {SOURCE_PRIORITY} ({SOURCE}, {PRIORITY}) VALUES (?1, ?2)"
        ))?;
        for (source, priority) in PRIORITY_TABLE {
            stmt.execute(params![source.token(), priority])?;
        }
        Ok(())
    }

    fn insert_tracks(
        tx: &Transaction,
        source: TrackSource,
        tracks: &[Track],
    ) -> Result<(), rusqlite::Error> {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {ALL_TRACKS} ({NAME}, {ARTIST}, {LINK}, {RANK}, {ALBUM_URL}, {SOURCE})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)"
        ))?;
        for track in tracks {
            stmt.execute(params![
                track.name,
                track.artist,
                track.link,
                track.rank,
                track.album_url,
                source.token()
            ])?;
        }
        Ok(())
    }

    fn pair_tracks(&self, tx: &Transaction) -> Result<usize, rusqlite::Error> {
        tx.execute(
            &format!(
                "INSERT INTO {TRACK_PAIRS} ({HI_ID}, {LO_ID}, {LO_SOURCE})
                 SELECT hi.{ID}, lo.{ID}, lo.{SOURCE}
                 FROM {ALL_TRACKS} hi
                 JOIN {SOURCE_PRIORITY} hp ON hp.{SOURCE} = hi.{SOURCE}
                 JOIN {ALL_TRACKS} lo ON lo.{SOURCE} != hi.{SOURCE}
                 JOIN {SOURCE_PRIORITY} lp ON lp.{SOURCE} = lo.{SOURCE}
                 WHERE hp.{PRIORITY} > lp.{PRIORITY}
                   AND similarity(hi.{NAME} || hi.{ARTIST}, lo.{NAME} || lo.{ARTIST}) > ?1"
            ),
            params![self.threshold],
        )
    }

    fn select_gold(tx: &Transaction) -> Result<Vec<GoldTrack>, rusqlite::Error> {
        let mut stmt = tx.prepare(&format!(
            "SELECT t.{NAME}, t.{ARTIST}, t.{LINK}, t.{RANK}, t.{ALBUM_URL}, t.{SOURCE},
                    (SELECT group_concat(DISTINCT p.{LO_SOURCE})
                       FROM {TRACK_PAIRS} p WHERE p.{HI_ID} = t.{ID})
             FROM {ALL_TRACKS} t
             JOIN {SOURCE_PRIORITY} sp ON sp.{SOURCE} = t.{SOURCE}
             WHERE NOT EXISTS (SELECT 1 FROM {TRACK_PAIRS} p WHERE p.{LO_ID} = t.{ID})
             ORDER BY t.{RANK}, sp.{PRIORITY} DESC, t.{ID}"
        ))?;

        let gold = stmt
            .query_map([], |row| {
                let source: String = row.get(5)?;
                let additional: Option<String> = row.get(6)?;

                let mut gold = GoldTrack::new(Track {
                    name: row.get(0)?,
                    artist: row.get(1)?,
                    link: row.get(2)?,
                    rank: row.get(3)?,
                    album_url: row.get(4)?,
                    source: TrackSource::from_token(&source),
                });
                for token in additional.iter().flat_map(|s| s.split(',')) {
                    gold.add_source(TrackSource::from_token(token));
                }
                Ok(gold)
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(gold)
    }
}

impl Reconciler for RelationalReconciler {
    fn reconcile(
        &self,
        sound_cloud: &[Track],
        spotify: &[Track],
        apple_music: &[Track],
    ) -> Result<Vec<GoldTrack>, ReconcileError> {
        let mut conn = db::open(self.path.as_deref())?;
        let tx = conn.transaction()?;

        Self::insert_priorities(&tx)?;
        Self::insert_tracks(&tx, TrackSource::SoundCloud, sound_cloud)?;
        Self::insert_tracks(&tx, TrackSource::Spotify, spotify)?;
        Self::insert_tracks(&tx, TrackSource::AppleMusic, apple_music)?;

        let pairs = self.pair_tracks(&tx)?;
        debug!("{pairs} track pairs above similarity {}", self.threshold);

        let mut gold = Self::select_gold(&tx)?;
        tx.commit()?;

        finalize(&mut gold);

        info!(
            "reconciled {} SoundCloud, {} Spotify, {} Apple Music tracks into {} gold tracks (relational)",
            sound_cloud.len(),
            spotify.len(),
            apple_music.len(),
            gold.len()
        );
        Ok(gold)
    }
}
