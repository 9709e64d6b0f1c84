//! Navigation-changed notifications.
//!
//! Listeners are registered under a dispatch uid. Connecting a second
//! listener with the same uid replaces the first, so a screen can re-attach
//! its renderer without being notified twice.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::event::NavigationEvent;

/// Receives navigation events.
///
/// Implemented for every `Fn(&NavigationEvent) + Send + Sync` closure.
pub trait NavigationListener: Send + Sync {
	/// Called after the stack changed.
	fn on_navigate(&self, event: &NavigationEvent);
}

impl<F> NavigationListener for F
where
	F: Fn(&NavigationEvent) + Send + Sync,
{
	fn on_navigate(&self, event: &NavigationEvent) {
		self(event)
	}
}

struct Receiver {
	dispatch_uid: String,
	listener: Arc<dyn NavigationListener>,
}

/// Ordered set of listeners.
///
/// Clones share the same listener list.
#[derive(Clone, Default)]
pub struct NavigationSignal {
	receivers: Arc<RwLock<Vec<Receiver>>>,
}

impl NavigationSignal {
	/// Creates a signal without listeners.
	pub fn new() -> Self {
		Self::default()
	}

	/// Connects a listener, replacing any listener with the same uid.
	///
	/// Returns `true` if a listener was replaced.
	pub fn connect<L>(&self, dispatch_uid: impl Into<String>, listener: L) -> bool
	where
		L: NavigationListener + 'static,
	{
		let dispatch_uid = dispatch_uid.into();
		let mut receivers = self.receivers.write();
		let original_len = receivers.len();
		receivers.retain(|r| r.dispatch_uid != dispatch_uid);
		let replaced = receivers.len() < original_len;

		tracing::trace!(dispatch_uid = %dispatch_uid, replaced, "connected navigation listener");
		receivers.push(Receiver {
			dispatch_uid,
			listener: Arc::new(listener),
		});
		replaced
	}

	/// Disconnects the listener registered under `dispatch_uid`.
	pub fn disconnect(&self, dispatch_uid: &str) -> bool {
		let mut receivers = self.receivers.write();
		let original_len = receivers.len();
		receivers.retain(|r| r.dispatch_uid != dispatch_uid);
		receivers.len() < original_len
	}

	/// Disconnects every listener.
	pub fn disconnect_all(&self) {
		self.receivers.write().clear();
	}

	/// Whether any listener is connected.
	pub fn has_listeners(&self) -> bool {
		!self.receivers.read().is_empty()
	}

	/// Number of connected listeners.
	pub fn receivers_count(&self) -> usize {
		self.receivers.read().len()
	}

	/// Delivers an event to every listener in connection order.
	///
	/// The listener list is snapshotted first, so listeners may connect or
	/// disconnect while being notified. A panicking listener is logged and
	/// skipped; the remaining listeners still run.
	pub fn send(&self, event: &NavigationEvent) {
		let listeners: Vec<(String, Arc<dyn NavigationListener>)> = self
			.receivers
			.read()
			.iter()
			.map(|r| (r.dispatch_uid.clone(), Arc::clone(&r.listener)))
			.collect();

		for (dispatch_uid, listener) in listeners {
			let outcome = catch_unwind(AssertUnwindSafe(|| listener.on_navigate(event)));
			if outcome.is_err() {
				tracing::warn!(
					dispatch_uid = %dispatch_uid,
					route = %event.current.key(),
					"navigation listener panicked"
				);
			}
		}
	}
}

impl std::fmt::Debug for NavigationSignal {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let uids: Vec<String> = self
			.receivers
			.read()
			.iter()
			.map(|r| r.dispatch_uid.clone())
			.collect();
		f.debug_struct("NavigationSignal")
			.field("receivers", &uids)
			.finish()
	}
}
