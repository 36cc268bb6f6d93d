//! Serialized application of draft updates.

use std::collections::VecDeque;
use std::fmt;

use parking_lot::Mutex;

type Command = Box<dyn FnOnce() + Send>;

/// Outcome of [`UpdateQueue::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
	/// The command ran on the calling thread, along with anything queued
	/// while it ran.
	Applied,
	/// A drain was already running; the command will run after the commands
	/// ahead of it.
	Queued,
}

#[derive(Default)]
struct QueueState {
	pending: VecDeque<Command>,
	draining: bool,
}

/// FIFO command queue with a single drainer at a time.
///
/// The first submitter drains the queue on its own thread. Commands submitted
/// while a drain is running, from inside a command or from another thread,
/// are appended and run by that drainer in submission order. A command is
/// never dropped. The lock is not held while a command runs.
#[derive(Default)]
pub struct UpdateQueue {
	state: Mutex<QueueState>,
}

impl UpdateQueue {
	/// Creates an empty queue.
	pub fn new() -> Self {
		Self::default()
	}

	/// Enqueues `command` and drains the queue unless a drain is running.
	pub fn submit<F>(&self, command: F) -> Submission
	where
		F: FnOnce() + Send + 'static,
	{
		{
			let mut state = self.state.lock();
			state.pending.push_back(Box::new(command));
			if state.draining {
				tracing::debug!(pending = state.pending.len(), "update queued behind running command");
				return Submission::Queued;
			}
			state.draining = true;
		}

		let _guard = DrainGuard { queue: self };
		let mut applied = 0usize;
		loop {
			let next = {
				let mut state = self.state.lock();
				match state.pending.pop_front() {
					Some(command) => command,
					None => {
						state.draining = false;
						break;
					}
				}
			};
			next();
			applied += 1;
		}
		tracing::debug!(applied, "update queue drained");

		Submission::Applied
	}

	/// Returns the number of commands waiting to run.
	pub fn pending(&self) -> usize {
		self.state.lock().pending.len()
	}

	/// Returns whether a drain is in progress.
	pub fn is_draining(&self) -> bool {
		self.state.lock().draining
	}
}

impl fmt::Debug for UpdateQueue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = self.state.lock();
		f.debug_struct("UpdateQueue")
			.field("pending", &state.pending.len())
			.field("draining", &state.draining)
			.finish()
	}
}

/// Releases the drain flag when a command panics.
///
/// Commands still pending stay queued for the next submitter.
struct DrainGuard<'a> {
	queue: &'a UpdateQueue,
}

impl Drop for DrainGuard<'_> {
	fn drop(&mut self) {
		if std::thread::panicking() {
			self.queue.state.lock().draining = false;
		}
	}
}
