//! Disk cache of fetched season results
//!
//! Historical tournaments never change, so their results are written to
//! JSON files and served from disk on later runs. The in-progress split is
//! refetched by passing `force_fetch` through the `MatchSource` call.

use crate::error::{LeagueError, Result};
use crate::source::leaguepedia::MatchSource;
use crate::types::MatchRecord;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Caching wrapper around any match source
pub struct CachedSource<S> {
    inner: S,
    dir: PathBuf,
}

impl<S> CachedSource<S> {
    pub fn new(inner: S, dir: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            dir: dir.into(),
        }
    }

    fn cache_path(&self, tournament: &str) -> PathBuf {
        // Tournament names may contain path separators ("Group A/B")
        let safe: String = tournament
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.dir.join(format!("{safe}.json"))
    }

    fn read_cached(&self, path: &Path) -> Result<Vec<MatchRecord>> {
        let raw = std::fs::read_to_string(path).map_err(|e| LeagueError::CacheIo {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            LeagueError::CacheIo {
                path: path.display().to_string(),
                message: format!("corrupt cache entry: {e}"),
            }
            .into()
        })
    }

    fn write_cached(&self, path: &Path, results: &[MatchRecord]) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| LeagueError::CacheIo {
                path: parent.display().to_string(),
                message: e.to_string(),
            })?;
        }
        let raw = serde_json::to_string(results)?;
        std::fs::write(path, raw).map_err(|e| {
            LeagueError::CacheIo {
                path: path.display().to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }
}

#[async_trait]
impl<S: MatchSource> MatchSource for CachedSource<S> {
    async fn list_tournaments(
        &self,
        regions: &[String],
        start_year: i32,
        stop_date: NaiveDate,
    ) -> Result<Vec<String>> {
        // The schedule itself is cheap and changes as events are announced;
        // always go to the source.
        self.inner
            .list_tournaments(regions, start_year, stop_date)
            .await
    }

    async fn season_results(
        &self,
        tournament: &str,
        force_fetch: bool,
    ) -> Result<Vec<MatchRecord>> {
        let path = self.cache_path(tournament);
        if !force_fetch && path.is_file() {
            debug!(tournament, "using cached results");
            return self.read_cached(&path);
        }

        let results = self.inner.season_results(tournament, force_fetch).await?;
        self.write_cached(&path, &results)?;
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        fetches: AtomicUsize,
    }

    impl CountingSource {
        fn new() -> Self {
            Self {
                fetches: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl MatchSource for CountingSource {
        async fn list_tournaments(
            &self,
            _regions: &[String],
            _start_year: i32,
            _stop_date: NaiveDate,
        ) -> Result<Vec<String>> {
            Ok(vec!["LCS 2020 Spring".to_string()])
        }

        async fn season_results(
            &self,
            _tournament: &str,
            _force_fetch: bool,
        ) -> Result<Vec<MatchRecord>> {
            self.fetches.fetch_add(1, Ordering::SeqCst);
            Ok(vec![MatchRecord {
                side1: "C9".to_string(),
                side2: "TL".to_string(),
                side1_score: Some(2),
                side2_score: Some(0),
                date: None,
                best_of: Some(3),
                round: Some("Week 1".to_string()),
            }])
        }
    }

    fn temp_cache_dir(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("league-elo-cache-{tag}-{}", std::process::id()))
    }

    #[tokio::test]
    async fn test_second_read_hits_cache() {
        let dir = temp_cache_dir("hit");
        let _ = std::fs::remove_dir_all(&dir);
        let source = CachedSource::new(CountingSource::new(), &dir);

        let first = source.season_results("LCS 2020 Spring", false).await.unwrap();
        let second = source.season_results("LCS 2020 Spring", false).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(source.inner.fetches.load(Ordering::SeqCst), 1);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_force_fetch_bypasses_cache() {
        let dir = temp_cache_dir("force");
        let _ = std::fs::remove_dir_all(&dir);
        let source = CachedSource::new(CountingSource::new(), &dir);

        source.season_results("LCS 2020 Spring", false).await.unwrap();
        source.season_results("LCS 2020 Spring", true).await.unwrap();
        assert_eq!(source.inner.fetches.load(Ordering::SeqCst), 2);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_cache_path_sanitizes_separators() {
        let source = CachedSource::new(CountingSource::new(), "/tmp/cache");
        let path = source.cache_path("LEC 2020 Spring Group A/B");
        assert!(path.to_string_lossy().ends_with("LEC 2020 Spring Group A_B.json"));
    }
}
