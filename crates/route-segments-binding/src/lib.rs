//! URL-synchronized parameter state.
//!
//! A [`ParamsBinding`] keeps a parameter draft derived from the current
//! location of a [`Navigator`]. The draft is read and written through a
//! [`PathCodec`]:
//!
//! - [`KeyListCodec`] - managed `key/value` pairs anywhere in the path
//! - [`TemplateCodec`] - a `{placeholder}` route template
//! - [`BaseUrlCodec`] - `name/value` pairs below a base URL
//!
//! Draft edits are serialized by an [`UpdateQueue`]. Navigation failures are
//! logged with `tracing` and do not propagate.

mod binding;
mod codecs;
mod config;
mod navigation;
mod queue;

pub use binding::{ParamsBinding, ParamsUpdate, Subscriber, SubscriptionId};
pub use codecs::{BaseUrlCodec, KeyListCodec, PathCodec, TemplateCodec};
pub use config::{
	BindingConfig, ConfigError, DEFAULT_MAX_PARAM_VALUE_LENGTH, DEFAULT_TRUNCATION_MARKER,
};
pub use navigation::{MemoryNavigator, NavigationError, NavigationMode, Navigator};
pub use queue::{Submission, UpdateQueue};
