//! Testing utilities for settings
//!
//! Provides an isolated temporary directory and environment variable
//! overrides that are restored on drop.

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment helper
///
/// Tests that touch environment variables should run under
/// `#[serial]` since the process environment is shared.
pub struct TestEnv {
	temp_dir: TempDir,
	original_env: HashMap<String, Option<String>>,
}

impl TestEnv {
	/// Create a new test environment
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_conf::settings::testing::TestEnv;
	///
	/// let test_env = TestEnv::new().unwrap();
	/// assert!(test_env.path().exists());
	/// ```
	pub fn new() -> std::io::Result<Self> {
		Ok(Self {
			temp_dir: TempDir::new()?,
			original_env: HashMap::new(),
		})
	}

	/// Get the temporary directory path
	pub fn path(&self) -> &Path {
		self.temp_dir.path()
	}

	/// Set an environment variable for this test
	pub fn set_var(&mut self, key: impl Into<String>, value: impl Into<String>) {
		let key = key.into();
		self.remember(&key);

		// SAFETY: Setting environment variables is unsafe in multi-threaded programs.
		// TestEnv is designed for use in tests with #[serial] to ensure exclusive access.
		unsafe {
			env::set_var(&key, value.into());
		}
	}

	/// Remove an environment variable for this test
	pub fn remove_var(&mut self, key: impl Into<String>) {
		let key = key.into();
		self.remember(&key);

		// SAFETY: Removing environment variables is unsafe in multi-threaded programs.
		// TestEnv is designed for use in tests with #[serial] to ensure exclusive access.
		unsafe {
			env::remove_var(&key);
		}
	}

	fn remember(&mut self, key: &str) {
		if !self.original_env.contains_key(key) {
			self.original_env.insert(key.to_string(), env::var(key).ok());
		}
	}

	/// Create a config file (TOML) in the temporary directory
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_conf::settings::testing::TestEnv;
	///
	/// let test_env = TestEnv::new().unwrap();
	/// let config = test_env
	///     .create_config_file("app.toml", "[negotiation]\nmode = \"strict\"")
	///     .unwrap();
	/// assert!(config.exists());
	/// ```
	pub fn create_config_file(&self, filename: &str, content: &str) -> std::io::Result<PathBuf> {
		let config_path = self.temp_dir.path().join(filename);
		std::fs::write(&config_path, content)?;
		Ok(config_path)
	}
}

impl Drop for TestEnv {
	fn drop(&mut self) {
		// Restore original environment variables
		for (key, original) in &self.original_env {
			// SAFETY: Restoring environment variables is unsafe in multi-threaded programs.
			// TestEnv is designed for use in tests with #[serial] to ensure exclusive access.
			unsafe {
				match original {
					Some(val) => env::set_var(key, val),
					None => env::remove_var(key),
				}
			}
		}
	}
}
