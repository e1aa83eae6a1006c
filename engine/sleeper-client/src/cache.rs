//! Daily JSON snapshots of league data
//!
//! Each fetch result is stored as `{dir}/{kind}/{key}_{yymmdd}.json`. A file
//! written today is reused instead of calling the wrapped source again, so
//! repeated runs on the same day hit the network once.

use crate::config::CacheConfig;
use crate::error::{Result, SleeperError};
use crate::models::stat_key;
use chrono::{Local, NaiveDate};
use lineup_optimizer::{ProjectionEntry, WeekWindow};
use player_registry::{LeagueUser, Player, PlayerDirectory, Roster};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use trade_engine::{LeagueDataSource, ScoringVariant};

/// A data source wrapper that snapshots every result to disk for the day
#[derive(Debug)]
pub struct SnapshotCache<S> {
    inner: S,
    config: CacheConfig,
    stamp: String,
}

impl<S: LeagueDataSource> SnapshotCache<S> {
    pub fn new(inner: S, config: CacheConfig) -> Self {
        Self::for_date(inner, config, Local::now().date_naive())
    }

    /// Cache keyed to a fixed day instead of today
    pub fn for_date(inner: S, config: CacheConfig, date: NaiveDate) -> Self {
        Self { inner, config, stamp: date.format("%y%m%d").to_string() }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Path of the snapshot for `kind`/`key` on the cache's day
    pub fn snapshot_path(&self, kind: &str, key: &str) -> PathBuf {
        self.config.dir.join(kind).join(format!("{}_{}.json", key, self.stamp))
    }

    async fn cached<T, F, Fut>(&self, kind: &str, key: &str, fetch: F) -> anyhow::Result<T>
    where
        T: Serialize + DeserializeOwned + Send + Sync,
        F: FnOnce() -> Fut + Send,
        Fut: Future<Output = anyhow::Result<T>> + Send,
    {
        if !self.config.enabled {
            return fetch().await;
        }

        let path = self.snapshot_path(kind, key);
        if let Some(value) = read_snapshot(&path).await? {
            debug!("Using cached {} from {}", kind, path.display());
            return Ok(value);
        }

        let value = fetch().await?;
        write_snapshot(&path, &value).await?;
        info!("Cached {} to {}", kind, path.display());
        Ok(value)
    }
}

async fn read_snapshot<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(SleeperError::Io(e)),
    };
    serde_json::from_slice(&bytes)
        .map(Some)
        .map_err(|e| SleeperError::Cache { path: path.to_path_buf(), message: e.to_string() })
}

async fn write_snapshot<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let bytes = serde_json::to_vec(value)
        .map_err(|e| SleeperError::Cache { path: path.to_path_buf(), message: e.to_string() })?;
    // Readers only ever see a complete snapshot or none at all
    let partial = partial_path(path);
    tokio::fs::write(&partial, bytes).await?;
    tokio::fs::rename(&partial, path).await?;
    Ok(())
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

#[async_trait::async_trait]
impl<S: LeagueDataSource> LeagueDataSource for SnapshotCache<S> {
    async fn fetch_users(&self, league_id: &str) -> anyhow::Result<Vec<LeagueUser>> {
        self.cached("users", league_id, || self.inner.fetch_users(league_id)).await
    }

    async fn fetch_rosters(&self, league_id: &str) -> anyhow::Result<Vec<Roster>> {
        self.cached("rosters", league_id, || self.inner.fetch_rosters(league_id)).await
    }

    async fn fetch_all_players(&self) -> anyhow::Result<PlayerDirectory> {
        let players: Vec<Player> = self
            .cached("players", "nfl", || async move {
                let directory = self.inner.fetch_all_players().await?;
                Ok::<_, anyhow::Error>(directory.players().cloned().collect())
            })
            .await?;
        Ok(PlayerDirectory::from_players(players))
    }

    async fn fetch_projections(
        &self,
        season: u32,
        window: WeekWindow,
        variant: ScoringVariant,
    ) -> anyhow::Result<Vec<ProjectionEntry>> {
        let key = format!("{}_{}_{}-{}", season, stat_key(variant), window.first, window.last);
        self.cached("projections", &key, || self.inner.fetch_projections(season, window, variant)).await
    }
}
