//! Navigation seam.
//!
//! The binding never touches a real browser history. It talks to a
//! [`Navigator`], which reports the current path and accepts push and
//! replace requests.

use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// How a navigation affects the history stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
	/// Adds a new history entry.
	Push,
	/// Overwrites the current history entry.
	Replace,
}

/// Error returned by a [`Navigator`] that refuses a path.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavigationError {
	/// The navigator refused the path.
	#[error("Navigation rejected: {0}")]
	Rejected(String),
}

/// Host router abstraction.
pub trait Navigator: Send + Sync {
	/// Returns the current location path.
	fn current_path(&self) -> String;

	/// Navigates to `path`.
	fn navigate(&self, path: &str, mode: NavigationMode) -> Result<(), NavigationError>;
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
	fn current_path(&self) -> String {
		(**self).current_path()
	}

	fn navigate(&self, path: &str, mode: NavigationMode) -> Result<(), NavigationError> {
		(**self).navigate(path, mode)
	}
}

#[derive(Debug)]
struct History {
	entries: Vec<String>,
	index: usize,
}

/// In-process history stack.
///
/// Only absolute paths are accepted.
#[derive(Debug)]
pub struct MemoryNavigator {
	history: RwLock<History>,
}

impl MemoryNavigator {
	/// Creates a history whose only entry is `initial`.
	pub fn new(initial: impl Into<String>) -> Self {
		Self {
			history: RwLock::new(History {
				entries: vec![initial.into()],
				index: 0,
			}),
		}
	}

	/// Returns every entry, oldest first.
	pub fn entries(&self) -> Vec<String> {
		self.history.read().entries.clone()
	}

	/// Returns the number of entries.
	pub fn len(&self) -> usize {
		self.history.read().entries.len()
	}

	/// Always `false`; a history has at least one entry.
	pub fn is_empty(&self) -> bool {
		false
	}

	/// Moves one entry back. Returns `false` at the oldest entry.
	pub fn back(&self) -> bool {
		let mut history = self.history.write();
		if history.index == 0 {
			return false;
		}
		history.index -= 1;
		true
	}

	/// Moves one entry forward. Returns `false` at the newest entry.
	pub fn forward(&self) -> bool {
		let mut history = self.history.write();
		if history.index + 1 >= history.entries.len() {
			return false;
		}
		history.index += 1;
		true
	}
}

impl Default for MemoryNavigator {
	fn default() -> Self {
		Self::new("/")
	}
}

impl Navigator for MemoryNavigator {
	fn current_path(&self) -> String {
		let history = self.history.read();
		history.entries[history.index].clone()
	}

	fn navigate(&self, path: &str, mode: NavigationMode) -> Result<(), NavigationError> {
		if !path.starts_with('/') {
			return Err(NavigationError::Rejected(format!(
				"path must be absolute: {}",
				path
			)));
		}

		let mut history = self.history.write();
		match mode {
			NavigationMode::Push => {
				let keep = history.index + 1;
				history.entries.truncate(keep);
				history.entries.push(path.to_string());
				history.index = keep;
			}
			NavigationMode::Replace => {
				let index = history.index;
				history.entries[index] = path.to_string();
			}
		}
		Ok(())
	}
}
