/// Test utilities for storage tests.
///
/// Every test gets its own temporary data directory, removed when the
/// `TestEnvironment` is dropped, even if the test panics.
use anyhow::Result;
use std::path::PathBuf;
use tempfile::TempDir;

use super::connection::DataConnection;
use super::gratitude_repository::GratitudeRepository;
use super::user_repository::UserRepository;

/// RAII test environment that cleans up on drop
pub struct TestEnvironment {
    /// Kept alive so the directory survives until drop
    _temp_dir: TempDir,
    pub connection: DataConnection,
    pub base_path: PathBuf,
}

impl TestEnvironment {
    pub async fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = DataConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }

    pub fn base_directory(&self) -> &std::path::Path {
        &self.base_path
    }
}

/// All file repositories over one test environment
pub struct RepositoryTestHelper {
    pub env: TestEnvironment,
    pub gratitude_repo: GratitudeRepository,
    pub user_repo: UserRepository,
}

impl RepositoryTestHelper {
    pub async fn new() -> Result<Self> {
        let env = TestEnvironment::new().await?;

        let gratitude_repo = GratitudeRepository::new(env.connection.clone());
        let user_repo = UserRepository::new(env.connection.clone());

        Ok(RepositoryTestHelper {
            env,
            gratitude_repo,
            user_repo,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_environment_cleanup() -> Result<()> {
        let base_path;

        {
            let env = TestEnvironment::new().await?;
            base_path = env.base_directory().to_path_buf();
            assert!(base_path.exists());

            std::fs::write(base_path.join("test_file.txt"), "test data")?;
        }

        assert!(!base_path.exists());
        Ok(())
    }
}
