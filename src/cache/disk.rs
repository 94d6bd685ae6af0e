// Persistent cache backed by the platform cache directory.
// Same entry shape as the in-memory cache, serialized to JSON files. Every
// failure here is non-fatal: reads yield None, writes no-op, and the session
// degrades to "no persistence".

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Serialize, de::DeserializeOwned};
use tracing::warn;

use super::memory::CacheEntry;
use crate::error::Result;

/// Default TTL for persisted entries: 10 minutes.
pub const DEFAULT_DISK_TTL: Duration = Duration::from_secs(10 * 60);

/// File-backed key/value cache with lazy TTL expiry.
///
/// Constructed against the user's cache directory; when that directory
/// cannot be resolved the cache is disabled and every operation silently
/// no-ops.
#[derive(Debug, Clone)]
pub struct DiskCache {
    root: Option<PathBuf>,
    default_ttl: Duration,
}

impl DiskCache {
    /// Cache rooted at the platform cache dir (~/.cache/<app> on Linux).
    pub fn new(app_name: &str) -> Self {
        let root = ProjectDirs::from("", "", app_name).map(|dirs| dirs.cache_dir().to_path_buf());
        if root.is_none() {
            warn!("no cache directory available, persistent cache disabled");
        }
        Self {
            root,
            default_ttl: DEFAULT_DISK_TTL,
        }
    }

    /// Cache rooted at an explicit directory.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            default_ttl: DEFAULT_DISK_TTL,
        }
    }

    /// A cache that stores nothing and returns nothing.
    pub fn disabled() -> Self {
        Self {
            root: None,
            default_ttl: DEFAULT_DISK_TTL,
        }
    }

    pub fn with_default_ttl(mut self, ttl: Duration) -> Self {
        self.default_ttl = ttl;
        self
    }

    fn path_for(&self, key: &str) -> Option<PathBuf> {
        self.root
            .as_ref()
            .map(|root| root.join(format!("{}.json", sanitize_key(key))))
    }

    /// Get a value if present and fresh; an expired file is removed.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.path_for(key)?;
        match read_entry(&path) {
            Ok(Some(entry)) if entry.is_fresh() => Some(entry.data),
            Ok(Some(_)) => {
                if let Err(err) = fs::remove_file(&path) {
                    warn!(key, error = %err, "failed to evict expired cache file");
                }
                None
            }
            Ok(None) => None,
            Err(err) => {
                warn!(key, error = %err, "failed to read cache file");
                None
            }
        }
    }

    /// Store a value under the default TTL. Serialization and IO failures
    /// are logged and swallowed.
    pub fn set<T: Serialize>(&self, key: &str, data: &T) {
        self.set_with_ttl(key, data, self.default_ttl);
    }

    pub fn set_with_ttl<T: Serialize>(&self, key: &str, data: &T, ttl: Duration) {
        let Some(path) = self.path_for(key) else {
            return;
        };
        if let Err(err) = write_entry(&path, data, ttl) {
            warn!(key, error = %err, "failed to write cache file");
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.get::<serde_json::Value>(key).is_some()
    }

    pub fn delete(&self, key: &str) {
        let Some(path) = self.path_for(key) else {
            return;
        };
        if path.exists()
            && let Err(err) = fs::remove_file(&path)
        {
            warn!(key, error = %err, "failed to delete cache file");
        }
    }

    /// Remove every entry under the cache root.
    pub fn clear(&self) {
        let Some(root) = self.root.as_ref() else {
            return;
        };
        let Ok(listing) = fs::read_dir(root) else {
            return;
        };
        for file in listing.flatten() {
            let path = file.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Err(err) = fs::remove_file(&path)
            {
                warn!(error = %err, "failed to clear cache file");
            }
        }
    }
}

fn read_entry<T: DeserializeOwned>(path: &Path) -> Result<Option<CacheEntry<T>>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path)?;
    let entry: CacheEntry<T> = serde_json::from_str(&contents)?;
    Ok(Some(entry))
}

fn write_entry<T: Serialize>(path: &Path, data: &T, ttl: Duration) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let entry = CacheEntry::new(data, ttl);
    let json = serde_json::to_string_pretty(&entry)?;

    // Write atomically via temp file
    let temp_path = path.with_extension("tmp");
    let mut file = fs::File::create(&temp_path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;
    fs::rename(&temp_path, path)?;

    Ok(())
}

/// Sanitize a key for use as a filename.
fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            _ => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
    struct TestData {
        name: String,
        value: i32,
    }

    #[test]
    fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let cache = DiskCache::at(temp_dir.path());

        let data = TestData {
            name: "test".to_string(),
            value: 42,
        };
        cache.set("repos", &data);

        assert_eq!(cache.get::<TestData>("repos"), Some(data));
        assert!(cache.has("repos"));
    }

    #[test]
    fn test_expired_entry_is_absent_and_evicted() {
        let temp_dir = TempDir::new().unwrap();
        let cache = DiskCache::at(temp_dir.path());

        cache.set_with_ttl("k", &"v", Duration::ZERO);
        // Zero TTL: any elapsed time at all is past expiry.
        std::thread::sleep(Duration::from_millis(5));

        assert_eq!(cache.get::<String>("k"), None);
        assert!(!temp_dir.path().join("k.json").exists());
    }

    #[test]
    fn test_disabled_cache_noops() {
        let cache = DiskCache::disabled();
        cache.set("k", &1);
        assert_eq!(cache.get::<i32>("k"), None);
        assert!(!cache.has("k"));
        cache.delete("k");
        cache.clear();
    }

    #[test]
    fn test_corrupt_file_reads_as_absent() {
        let temp_dir = TempDir::new().unwrap();
        let cache = DiskCache::at(temp_dir.path());

        fs::write(temp_dir.path().join("bad.json"), "not json").unwrap();
        assert_eq!(cache.get::<TestData>("bad"), None);
    }

    #[test]
    fn test_delete_and_clear() {
        let temp_dir = TempDir::new().unwrap();
        let cache = DiskCache::at(temp_dir.path());

        cache.set("a", &1);
        cache.set("b", &2);
        cache.delete("a");
        assert_eq!(cache.get::<i32>("a"), None);
        assert_eq!(cache.get::<i32>("b"), Some(2));

        cache.clear();
        assert_eq!(cache.get::<i32>("b"), None);
    }

    #[test]
    fn test_key_sanitization() {
        let temp_dir = TempDir::new().unwrap();
        let cache = DiskCache::at(temp_dir.path());

        cache.set("stats/my-repo", &7);
        assert_eq!(cache.get::<i32>("stats/my-repo"), Some(7));
        assert!(temp_dir.path().join("stats_my-repo.json").exists());
    }
}
