use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    /// Versioned slot holding the raw exercise list text
    pub fn list_path() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            let state_dir = PathBuf::from(home)
                .join(".local")
                .join("state")
                .join("blok");
            Some(state_dir.join("exercises_v1.txt"))
        } else {
            ProjectDirs::from("", "", "blok")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("exercises_v1.txt"))
        }
    }

    /// Root directory for the offline shell cache
    pub fn cache_root() -> Option<PathBuf> {
        if let Ok(home) = std::env::var("HOME") {
            Some(PathBuf::from(home).join(".cache").join("blok"))
        } else {
            ProjectDirs::from("", "", "blok").map(|proj_dirs| proj_dirs.cache_dir().to_path_buf())
        }
    }
}
