//! URL-synchronized parameter draft.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use route_segments_codec::ParamsObject;

use crate::codecs::PathCodec;
use crate::config::{BindingConfig, ConfigError};
use crate::navigation::{NavigationMode, Navigator};
use crate::queue::{Submission, UpdateQueue};

/// Type alias for change subscribers.
pub type Subscriber = Arc<dyn Fn(&ParamsObject) + Send + Sync>;

type MergeFn = Box<dyn FnOnce(&ParamsObject) -> ParamsObject + Send>;

/// Handle returned by [`ParamsBinding::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// A change to the draft.
pub enum ParamsUpdate {
	/// Replaces the whole draft. Absent and empty values are dropped.
	Replace(ParamsObject),
	/// Derives a patch from the current draft and merges it. Absent and empty
	/// values in the patch delete their key.
	Merge(MergeFn),
}

impl ParamsUpdate {
	/// Creates a [`ParamsUpdate::Merge`] from a closure.
	pub fn merge<F>(patch: F) -> Self
	where
		F: FnOnce(&ParamsObject) -> ParamsObject + Send + 'static,
	{
		Self::Merge(Box::new(patch))
	}
}

impl From<ParamsObject> for ParamsUpdate {
	fn from(params: ParamsObject) -> Self {
		Self::Replace(params)
	}
}

impl fmt::Debug for ParamsUpdate {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Replace(params) => f.debug_tuple("Replace").field(params).finish(),
			Self::Merge(_) => f.debug_tuple("Merge").finish_non_exhaustive(),
		}
	}
}

struct Shared<C> {
	codec: C,
	config: BindingConfig,
	location: RwLock<String>,
	draft: RwLock<ParamsObject>,
	subscribers: RwLock<Vec<(SubscriptionId, Subscriber)>>,
	next_subscription: AtomicU64,
}

impl<C: PathCodec> Shared<C> {
	fn parse_draft(&self, path: &str) -> ParamsObject {
		match self.codec.parse(path) {
			Ok(params) => self.codec.normalize(params),
			Err(err) => {
				tracing::warn!(path, error = %err, "failed to parse parameters from location");
				self.codec.normalize(ParamsObject::new())
			}
		}
	}

	fn apply(&self, update: ParamsUpdate) {
		let current = self.draft.read().clone();
		let next = match update {
			ParamsUpdate::Replace(params) => params.present(),
			ParamsUpdate::Merge(patch) => {
				let patch = patch(&current);
				let mut merged = current;
				for (key, value) in patch {
					match value.filter(|value| !value.is_empty()) {
						Some(value) => {
							merged.insert(key, Some(value));
						}
						None => {
							merged.remove(&key);
						}
					}
				}
				merged
			}
		};

		let next: ParamsObject = next
			.into_iter()
			.map(|(key, value)| (key, value.map(|value| self.config.truncate(&value))))
			.collect();
		let next = self.codec.normalize(next);

		*self.draft.write() = next.clone();
		tracing::debug!(params = next.len(), "draft updated");
		self.notify(&next);
	}

	fn relocate(&self, path: String) {
		if *self.location.read() == path {
			return;
		}
		let next = self.parse_draft(&path);
		tracing::debug!(path = %path, "location changed");
		*self.location.write() = path;
		*self.draft.write() = next.clone();
		self.notify(&next);
	}

	fn notify(&self, params: &ParamsObject) {
		let subscribers: Vec<Subscriber> = self
			.subscribers
			.read()
			.iter()
			.map(|(_, subscriber)| Arc::clone(subscriber))
			.collect();
		for subscriber in subscribers {
			subscriber(params);
		}
	}
}

/// Parameter state kept in sync with the location of a [`Navigator`].
///
/// The draft is parsed from the location on creation and on [`sync`]. It is
/// edited with [`set_params`] without navigating, and written back with
/// [`push_url`] or [`replace_url`]. Every edit goes through an
/// [`UpdateQueue`], so edits issued while another is being applied, for
/// instance from a subscriber, run afterwards in order.
///
/// [`sync`]: ParamsBinding::sync
/// [`set_params`]: ParamsBinding::set_params
/// [`push_url`]: ParamsBinding::push_url
/// [`replace_url`]: ParamsBinding::replace_url
///
/// # Examples
///
/// ```
/// use route_segments_binding::{KeyListCodec, MemoryNavigator, Navigator, ParamsBinding};
/// use route_segments_codec::ParamsObject;
/// use std::sync::Arc;
///
/// let navigator = Arc::new(MemoryNavigator::new("/mall/brand/nvidia/query/rtx%205090"));
/// let binding = ParamsBinding::new(KeyListCodec::new(["query"]), Arc::clone(&navigator));
/// assert_eq!(binding.params().get("query"), Some("rtx 5090"));
///
/// binding.set_params(ParamsObject::from_present([("query", "rtx 4080")]));
/// binding.replace_url();
/// assert_eq!(navigator.current_path(), "/mall/brand/nvidia/query/rtx%204080");
/// ```
pub struct ParamsBinding<C, N>
where
	C: PathCodec + 'static,
	N: Navigator,
{
	shared: Arc<Shared<C>>,
	navigator: N,
	queue: Arc<UpdateQueue>,
}

impl<C, N> ParamsBinding<C, N>
where
	C: PathCodec + 'static,
	N: Navigator,
{
	/// Creates a binding with the default configuration.
	pub fn new(codec: C, navigator: N) -> Self {
		Self::build(codec, navigator, BindingConfig::default())
	}

	/// Creates a binding with `config`.
	///
	/// # Errors
	///
	/// Returns [`ConfigError::Invalid`] if `config` does not validate.
	pub fn with_config(codec: C, navigator: N, config: BindingConfig) -> Result<Self, ConfigError> {
		config.validate()?;
		Ok(Self::build(codec, navigator, config))
	}

	fn build(codec: C, navigator: N, config: BindingConfig) -> Self {
		let location = navigator.current_path();
		let shared = Shared {
			codec,
			config,
			location: RwLock::new(String::new()),
			draft: RwLock::new(ParamsObject::new()),
			subscribers: RwLock::new(Vec::new()),
			next_subscription: AtomicU64::new(0),
		};
		*shared.draft.write() = shared.parse_draft(&location);
		*shared.location.write() = location;

		Self {
			shared: Arc::new(shared),
			navigator,
			queue: Arc::new(UpdateQueue::new()),
		}
	}

	/// Routes updates through `queue`, which may be shared with other
	/// bindings.
	pub fn with_queue(mut self, queue: Arc<UpdateQueue>) -> Self {
		self.queue = queue;
		self
	}

	/// Returns a snapshot of the draft.
	pub fn params(&self) -> ParamsObject {
		self.shared.draft.read().clone()
	}

	/// Returns the location the draft was last parsed from.
	pub fn location(&self) -> String {
		self.shared.location.read().clone()
	}

	/// Returns the binding configuration.
	pub fn config(&self) -> &BindingConfig {
		&self.shared.config
	}

	/// Returns the path codec.
	pub fn codec(&self) -> &C {
		&self.shared.codec
	}

	/// Returns the navigator.
	pub fn navigator(&self) -> &N {
		&self.navigator
	}

	/// Returns the update queue, which may be shared with other bindings.
	pub fn queue(&self) -> &Arc<UpdateQueue> {
		&self.queue
	}

	/// Updates the draft without navigating.
	///
	/// Values longer than the configured maximum are truncated.
	pub fn set_params(&self, update: impl Into<ParamsUpdate>) -> Submission {
		let update = update.into();
		let shared = Arc::clone(&self.shared);
		self.queue.submit(move || shared.apply(update))
	}

	/// Navigates to the path built from the draft, adding a history entry.
	pub fn push_url(&self) {
		self.navigate(NavigationMode::Push);
	}

	/// Navigates to the path built from the draft, replacing the current entry.
	pub fn replace_url(&self) {
		self.navigate(NavigationMode::Replace);
	}

	/// Re-reads the navigator's location and re-parses the draft if it moved.
	pub fn sync(&self) -> Submission {
		let path = self.navigator.current_path();
		let shared = Arc::clone(&self.shared);
		self.queue.submit(move || shared.relocate(path))
	}

	/// Registers a callback run after every draft change.
	pub fn subscribe<F>(&self, subscriber: F) -> SubscriptionId
	where
		F: Fn(&ParamsObject) + Send + Sync + 'static,
	{
		let id = SubscriptionId(self.shared.next_subscription.fetch_add(1, Ordering::Relaxed));
		let subscriber: Subscriber = Arc::new(subscriber);
		self.shared.subscribers.write().push((id, subscriber));
		id
	}

	/// Removes a subscriber. Returns `false` if it was not registered.
	pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
		let mut subscribers = self.shared.subscribers.write();
		let before = subscribers.len();
		subscribers.retain(|(existing, _)| *existing != id);
		subscribers.len() != before
	}

	fn navigate(&self, mode: NavigationMode) {
		let params = self.params();
		let current = self.location();

		let path = match self.shared.codec.build(&current, &params) {
			Ok(path) => path,
			Err(err) => {
				tracing::error!(error = %err, ?mode, "failed to build path for navigation");
				return;
			}
		};

		match self.navigator.navigate(&path, mode) {
			Ok(()) => {
				tracing::debug!(path = %path, ?mode, "navigated");
				self.sync();
			}
			Err(err) => {
				tracing::error!(path = %path, error = %err, ?mode, "navigation failed");
			}
		}
	}
}

impl<C, N> fmt::Debug for ParamsBinding<C, N>
where
	C: PathCodec + 'static,
	N: Navigator,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ParamsBinding")
			.field("location", &*self.shared.location.read())
			.field("params", &*self.shared.draft.read())
			.field("queue", &self.queue)
			.finish_non_exhaustive()
	}
}
