use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::shells::ShellType;

#[derive(Error, Debug)]
pub enum ShellConfigError {
    #[error("{context} [{}]: {source}", .path.display())]
    Io {
        context: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{context}: {details}")]
    Command {
        context: &'static str,
        details: String,
    },
}

impl ShellConfigError {
    pub(crate) fn io(context: &'static str, path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            context,
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn command(context: &'static str, details: impl Into<String>) -> Self {
        Self::Command {
            context,
            details: details.into(),
        }
    }
}

/// A shell rc file and its current contents. A missing file reads as empty.
pub struct ShellConfig {
    pub shell_type: ShellType,
    pub config_path: PathBuf,
    pub content: String,
}

impl ShellConfig {
    pub fn load(shell_type: ShellType, config_path: PathBuf) -> Result<Self, ShellConfigError> {
        let content = if config_path.exists() {
            fs::read_to_string(&config_path)
                .map_err(|e| ShellConfigError::io("failed to read rc file", &config_path, e))?
        } else {
            String::new()
        };

        Ok(Self {
            shell_type,
            config_path,
            content,
        })
    }

    /// Paths the file does not mention anywhere yet.
    #[must_use]
    pub fn missing_paths(&self, paths: &[String]) -> Vec<String> {
        paths
            .iter()
            .filter(|path| !self.content.contains(path.as_str()))
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn add_paths(&self, paths: &[String]) -> ShellConfigEdit {
        let missing = self.missing_paths(paths);
        if missing.is_empty() {
            return ShellConfigEdit {
                original: self.content.clone(),
                modified: self.content.clone(),
                changes: Vec::new(),
            };
        }

        let line = self.shell_type.path_line(&missing);
        ShellConfigEdit {
            original: self.content.clone(),
            modified: format!("{}\n{line}\n", self.content),
            changes: missing,
        }
    }

    pub fn apply_edit(&mut self, edit: &ShellConfigEdit) -> Result<(), ShellConfigError> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ShellConfigError::io("failed to create dir", parent, e))?;
        }

        fs::write(&self.config_path, &edit.modified)
            .map_err(|e| ShellConfigError::io("failed to write rc file", &self.config_path, e))?;
        self.content.clone_from(&edit.modified);

        Ok(())
    }
}

/// Pending rc file change; `changes` lists the paths being added.
pub struct ShellConfigEdit {
    pub original: String,
    pub modified: String,
    pub changes: Vec<String>,
}

impl ShellConfigEdit {
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_config(shell_type: ShellType, content: &str) -> ShellConfig {
        ShellConfig {
            shell_type,
            config_path: PathBuf::from("/test/.bashrc"),
            content: content.to_string(),
        }
    }

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_missing_paths_skips_mentioned() {
        let config = create_test_config(
            ShellType::Bash,
            "export PATH=\"/home/dev/.xvm/bin:$PATH\"\n",
        );

        let missing = config.missing_paths(&paths(&["/home/dev/.xvm/bin", "/home/dev/go/bin"]));

        assert_eq!(missing, vec!["/home/dev/go/bin"]);
    }

    #[test]
    fn test_add_paths_appends_line() {
        let config = create_test_config(ShellType::Bash, "# My bashrc");

        let edit = config.add_paths(&paths(&["/home/dev/.xvm/bin"]));

        assert!(edit.has_changes());
        assert_eq!(
            edit.modified,
            "# My bashrc\nexport PATH=\"/home/dev/.xvm/bin:$PATH\"\n"
        );
    }

    #[test]
    fn test_add_paths_uses_shell_syntax() {
        let config = create_test_config(ShellType::Fish, "");

        let edit = config.add_paths(&paths(&["/a", "/b"]));

        assert!(edit.modified.contains("set -gx PATH /a /b $PATH"));
    }

    #[test]
    fn test_add_paths_no_change_when_all_present() {
        let config = create_test_config(ShellType::Zsh, "export PATH=\"/a:/b:$PATH\"");

        let edit = config.add_paths(&paths(&["/a", "/b"]));

        assert!(!edit.has_changes());
        assert_eq!(edit.modified, edit.original);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().expect("create temp dir");

        let config = ShellConfig::load(ShellType::Zsh, dir.path().join(".zshrc"))
            .expect("missing rc file should load");

        assert!(config.content.is_empty());
    }
}
