use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the default data directory under the user's Documents folder
pub const DEFAULT_DATA_DIRECTORY_NAME: &str = "Gratitude Tracker";

/// DataConnection resolves where each user's files live under a base directory
#[derive(Clone, Debug)]
pub struct DataConnection {
    base_directory: PathBuf,
}

impl DataConnection {
    /// Create a new connection rooted at `base_directory`, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .with_context(|| format!("Failed to create data directory {}", base_path.display()))?;
            info!("Created data directory: {}", base_path.display());
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// The default data directory: ~/Documents/Gratitude Tracker, falling back
    /// to the home directory when there is no Documents folder
    pub fn default_data_directory() -> Result<PathBuf> {
        let parent = dirs::document_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
        Ok(parent.join(DEFAULT_DATA_DIRECTORY_NAME))
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Map a user ID to a directory name that is safe on every filesystem.
    /// Letters, digits, '-' and '_' are kept; everything else becomes '_'.
    pub fn safe_directory_name(user_id: &str) -> String {
        user_id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }

    pub fn user_directory(&self, user_id: &str) -> PathBuf {
        self.base_directory.join(Self::safe_directory_name(user_id))
    }

    pub fn gratitudes_file_path(&self, user_id: &str) -> PathBuf {
        self.user_directory(user_id).join("gratitudes.json")
    }

    pub fn users_file_path(&self) -> PathBuf {
        self.base_directory.join("users.yaml")
    }

    /// Write a file atomically: write a temp file next to it, then rename
    pub fn write_atomic(&self, path: &Path, contents: &str) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory {}", parent.display()))?;
            }
        }

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, contents)
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;
        fs::rename(&temp_path, path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        Ok(())
    }
}
