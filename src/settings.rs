// The one value that survives restarts: the chosen canvas resolution.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Error;
use crate::params::{Resolution, DEFAULT_RESOLUTION};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub resolution: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self { resolution: DEFAULT_RESOLUTION }
    }
}

impl Settings {
    /// Stored value, snapped to an allowed size.
    pub fn resolution(&self) -> Resolution {
        Resolution::or_default(self.resolution)
    }
}

/// `<data dir>/settings.json`, if the platform has a data dir.
pub fn default_path() -> Option<PathBuf> {
    let proj = ProjectDirs::from("com", "reaction-diffusion", "ReactionDiffusion")?;
    Some(proj.data_local_dir().join("settings.json"))
}

/// Missing or unreadable settings fall back to defaults.
pub fn load(path: &Path) -> Settings {
    if let Ok(s) = fs::read_to_string(path) {
        if let Ok(v) = serde_json::from_str::<Settings>(&s) {
            return v;
        }
        debug!(path = %path.display(), "ignoring unreadable settings");
    }
    Settings::default()
}

/// Write to a temp file next to `path`, then rename over it. Readers see
/// either the old file or the new one, never a partial write.
pub fn save(path: &Path, settings: &Settings) -> Result<(), Error> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(settings)?;
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}
