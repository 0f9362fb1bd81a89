use std::{
    env, fs,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::{error::AppError, profile::Profiles};

/// Directory under the platform config root holding the store
const APP_DIR: &str = "git-me";
/// Profiles file name
const PROFILES_FILE: &str = "profiles.json";

/// Gets the path to the profiles file
///
/// Windows uses `%APPDATA%` (falling back to `<home>\AppData\Roaming`),
/// every other platform uses `<home>/.config`.
pub fn default_profiles_path() -> Result<PathBuf, AppError> {
    let home_dir: PathBuf = dirs::home_dir().ok_or(AppError::NoHomeDir)?;
    let appdata = env::var_os("APPDATA").filter(|value| !value.is_empty());
    let config_root = config_root(cfg!(windows), &home_dir, appdata.map(PathBuf::from));
    Ok(config_root.join(APP_DIR).join(PROFILES_FILE))
}

fn config_root(windows: bool, home_dir: &Path, appdata: Option<PathBuf>) -> PathBuf {
    if windows {
        appdata.unwrap_or_else(|| home_dir.join("AppData").join("Roaming"))
    } else {
        home_dir.join(".config")
    }
}

/// JSON-file backed profile store.
///
/// No locking: two concurrent invocations race and the last writer wins.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the platform default location
    pub fn open_default() -> Result<Self, AppError> {
        Ok(Self::new(default_profiles_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads profiles from the JSON file
    ///
    /// A missing file is seeded with the default profiles, which are written
    /// out before returning. A file that exists but does not parse is an
    /// error and is left as is.
    pub fn load(&self) -> Result<Profiles, AppError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "profile store missing, seeding defaults");
            let profiles = Profiles::defaults();
            self.save(&profiles)?;
            return Ok(profiles);
        }

        let file_contents: String = fs::read_to_string(&self.path)?;
        let profiles: Profiles = serde_json::from_str(&file_contents)?;
        debug!(path = %self.path.display(), count = profiles.len(), "loaded profiles");
        Ok(profiles)
    }

    /// Saves profiles to the JSON file, creating parent directories
    ///
    /// # Arguments
    /// * `profiles` - Profiles to save, replacing any previous content
    pub fn save(&self, profiles: &Profiles) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut json: String = serde_json::to_string_pretty(profiles)?;
        json.push('\n');
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), count = profiles.len(), "saved profiles");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::profile::Profile;

    fn store_in(dir: &TempDir) -> ProfileStore {
        ProfileStore::new(dir.path().join("nested").join("git-me").join(PROFILES_FILE))
    }

    #[test]
    fn load_seeds_and_persists_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let first = store.load().unwrap();
        assert_eq!(first.keys(), vec!["personal", "work"]);
        assert!(store.path().exists());

        let second = store.load().unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn save_of_load_keeps_bytes() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut profiles = store.load().unwrap();
        profiles.upsert("oss", Profile::new("Jane Doe", "jane@oss.dev"));
        store.save(&profiles).unwrap();

        let before = fs::read(store.path()).unwrap();
        store.save(&store.load().unwrap()).unwrap();
        let after = fs::read(store.path()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn accepts_hand_written_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(
            store.path(),
            r#"{"work":{"name":"Alice","email":"a@x.com"}}"#,
        )
        .unwrap();

        let profiles = store.load().unwrap();
        assert_eq!(profiles.get("work"), Some(&Profile::new("Alice", "a@x.com")));
        assert!(profiles.get("personal").is_none());
    }

    #[test]
    fn malformed_file_is_an_error_and_not_replaced() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{ not json").unwrap();

        assert!(matches!(store.load(), Err(AppError::SerdeJson(_))));
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "{ not json");
    }

    #[test]
    fn config_root_per_platform() {
        let home = Path::new("/home/jane");
        assert_eq!(
            config_root(false, home, Some(PathBuf::from("/ignored"))),
            home.join(".config")
        );
        assert_eq!(
            config_root(true, home, Some(PathBuf::from("/appdata"))),
            PathBuf::from("/appdata")
        );
        assert_eq!(
            config_root(true, home, None),
            home.join("AppData").join("Roaming")
        );
    }
}
