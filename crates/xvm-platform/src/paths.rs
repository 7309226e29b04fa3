use std::path::{Path, PathBuf};
use thiserror::Error;

const ROOT_DIR: &str = ".xvm";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum XvmPathsError {
    #[error("Could not determine home directory")]
    HomeDirUnavailable,
}

/// Per-user store layout rooted at `~/.xvm`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XvmPaths {
    pub home: PathBuf,
    pub root: PathBuf,
    pub stash: PathBuf,
    pub bin: PathBuf,
    pub data: PathBuf,
}

impl XvmPaths {
    /// Build the store layout under the current user's home directory.
    ///
    /// # Errors
    /// Returns an error when the home directory cannot be determined.
    pub fn new() -> Result<Self, XvmPathsError> {
        let home = dirs::home_dir().ok_or(XvmPathsError::HomeDirUnavailable)?;
        Ok(Self::from_home(home))
    }

    #[must_use]
    pub fn from_home(home: impl Into<PathBuf>) -> Self {
        let home = home.into();
        let root = home.join(ROOT_DIR);
        Self {
            stash: root.join("sdk"),
            bin: root.join("bin"),
            data: root.join("data"),
            root,
            home,
        }
    }

    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.json")
    }

    #[must_use]
    pub fn sdk_stash(&self, sdk: &str) -> PathBuf {
        self.stash.join(sdk)
    }

    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Ensure the store directories exist on disk.
    ///
    /// # Errors
    /// Returns an error if any directory cannot be created.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.stash)?;
        std::fs::create_dir_all(&self.bin)?;
        std::fs::create_dir_all(&self.data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::XvmPaths;

    #[test]
    fn layout_is_rooted_in_home() {
        let paths = XvmPaths::from_home("/home/dev");

        assert_eq!(paths.root, Path::new("/home/dev/.xvm"));
        assert_eq!(paths.stash, Path::new("/home/dev/.xvm/sdk"));
        assert_eq!(paths.bin, Path::new("/home/dev/.xvm/bin"));
        assert_eq!(paths.data, Path::new("/home/dev/.xvm/data"));
        assert_eq!(paths.config_file(), Path::new("/home/dev/.xvm/config.json"));
        assert_eq!(paths.sdk_stash("go"), Path::new("/home/dev/.xvm/sdk/go"));
    }

    #[test]
    fn ensure_dirs_creates_store_directories() {
        let home = tempfile::tempdir().expect("temp home should be created");
        let paths = XvmPaths::from_home(home.path());

        paths
            .ensure_dirs()
            .expect("ensure_dirs should create store directories");

        assert!(paths.stash.is_dir());
        assert!(paths.bin.is_dir());
        assert!(paths.data.is_dir());
        assert!(!paths.config_file().exists());
    }
}
