use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;
use crate::exercises;

/// Cache version tag; bump to invalidate previously cached shells
pub const CACHE_VERSION: &str = "blok-shell-v1";

/// Fixed manifest of asset paths making up the app shell
pub const SHELL_ASSETS: &[&str] = &["bodyweight.json", "core.json"];

/// Asset served when a requested path cannot be resolved at all
pub const SHELL_ROOT: &str = "bodyweight.json";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheManifest {
    pub version: String,
    pub assets: Vec<String>,
}

/// Cache-first file store for a fixed manifest of assets. Completely
/// separate from session state: it only guarantees that the last
/// successfully cached copy of each asset stays readable when the source
/// goes away.
#[derive(Debug, Clone)]
pub struct AssetCache {
    source: PathBuf,
    root: PathBuf,
    version: String,
}

impl AssetCache {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(source: P, root: Q) -> Self {
        Self::with_version(source, root, CACHE_VERSION)
    }

    pub fn with_version<P: AsRef<Path>, Q: AsRef<Path>>(source: P, root: Q, version: &str) -> Self {
        Self {
            source: source.as_ref().to_path_buf(),
            root: root.as_ref().to_path_buf(),
            version: version.to_string(),
        }
    }

    fn cache_dir(&self) -> PathBuf {
        self.root.join(&self.version)
    }

    /// Copies every manifest asset from the source into the versioned cache
    /// and records the manifest alongside them. Fails if any asset cannot be
    /// read from the source.
    pub fn install(&self, manifest: &[&str]) -> io::Result<()> {
        for rel in manifest {
            let data = fs::read(self.source.join(rel))?;
            let dest = self.cache_dir().join(rel);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(dest, data)?;
        }

        let doc = CacheManifest {
            version: self.version.clone(),
            assets: manifest.iter().map(|rel| rel.to_string()).collect(),
        };
        let data = serde_json::to_vec_pretty(&doc).unwrap_or_default();
        fs::write(self.cache_dir().join("manifest.json"), data)
    }

    /// Deletes sibling caches left behind by other versions
    pub fn activate(&self) -> io::Result<()> {
        let current: OsString = self.version.clone().into();
        for entry in fs::read_dir(&self.root)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() && entry.file_name() != current {
                fs::remove_dir_all(entry.path())?;
            }
        }
        Ok(())
    }

    /// Resolves an asset cache-first: cached copy, then the source (back-
    /// filling the cache best-effort), then the cached shell root. Errors
    /// only when all three miss.
    pub fn fetch(&self, rel: &str) -> io::Result<Vec<u8>> {
        if let Ok(data) = fs::read(self.cache_dir().join(rel)) {
            return Ok(data);
        }

        match fs::read(self.source.join(rel)) {
            Ok(data) => {
                let dest = self.cache_dir().join(rel);
                if let Some(parent) = dest.parent() {
                    let _ = fs::create_dir_all(parent);
                }
                let _ = fs::write(dest, &data);
                Ok(data)
            }
            Err(err) => fs::read(self.cache_dir().join(SHELL_ROOT)).map_err(|_| err),
        }
    }

    /// Manifest recorded by the last successful install, if readable
    pub fn manifest(&self) -> Option<CacheManifest> {
        let data = fs::read(self.cache_dir().join("manifest.json")).ok()?;
        serde_json::from_slice(&data).ok()
    }
}

/// Mirrors the embedded preset assets into the on-disk shell cache so they
/// stay available to other tooling even when this build's payload changes.
/// Called best-effort at startup; callers ignore the result.
pub fn warm_shell_cache() -> io::Result<()> {
    let Some(root) = AppDirs::cache_root() else {
        return Ok(());
    };

    // The embedded payload plays the role of the network origin
    let source = root.join("pkg");
    for rel in SHELL_ASSETS {
        if let Some(bytes) = exercises::preset_file(rel) {
            let dest = source.join(rel);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(dest, bytes)?;
        }
    }

    let cache = AssetCache::new(source, root.join("shell"));
    cache.install(SHELL_ASSETS)?;
    cache.activate()
}
