//! Thread-safe navigator handle.

use std::sync::Arc;

use parking_lot::Mutex;
use waypoint_routes::RawParams;

use crate::error::Result;
use crate::event::BackStackEntry;
use crate::navigator::Navigator;
use crate::options::NavOptions;
use crate::signal::NavigationListener;

/// A [`Navigator`] shared between threads.
///
/// Every operation takes the lock for its whole duration and returns owned
/// snapshots, so callers never observe a half-applied change. Listeners run
/// while the lock is held and must not call back into the same handle.
#[derive(Debug, Clone)]
pub struct SharedNavigator {
	inner: Arc<Mutex<Navigator>>,
}

impl SharedNavigator {
	/// Wraps a started navigator.
	pub fn new(navigator: Navigator) -> Self {
		Self {
			inner: Arc::new(Mutex::new(navigator)),
		}
	}

	/// Runs `f` with exclusive access to the navigator.
	pub fn with<R>(&self, f: impl FnOnce(&mut Navigator) -> R) -> R {
		f(&mut self.inner.lock())
	}

	/// See [`Navigator::navigate`].
	pub fn navigate(&self, key: &str, args: &RawParams) -> Result<BackStackEntry> {
		self.inner.lock().navigate(key, args).cloned()
	}

	/// See [`Navigator::navigate_uri`].
	pub fn navigate_uri(&self, uri: &str) -> Result<BackStackEntry> {
		self.inner.lock().navigate_uri(uri).cloned()
	}

	/// See [`Navigator::navigate_path`].
	pub fn navigate_path(&self, path: &str) -> Result<BackStackEntry> {
		self.inner.lock().navigate_path(path).cloned()
	}

	/// See [`Navigator::navigate_with`].
	pub fn navigate_with(
		&self,
		key: &str,
		args: &RawParams,
		options: &NavOptions,
	) -> Result<BackStackEntry> {
		self.inner.lock().navigate_with(key, args, options).cloned()
	}

	/// See [`Navigator::replace`].
	pub fn replace(&self, key: &str, args: &RawParams) -> Result<BackStackEntry> {
		self.inner.lock().replace(key, args).cloned()
	}

	/// See [`Navigator::go_back`].
	pub fn go_back(&self) -> Result<Option<BackStackEntry>> {
		self.inner.lock().go_back()
	}

	/// See [`Navigator::pop_to`].
	pub fn pop_to(&self, key: &str, inclusive: bool) -> Result<BackStackEntry> {
		self.inner.lock().pop_to(key, inclusive).cloned()
	}

	/// See [`Navigator::reset`].
	pub fn reset(&self, key: &str, args: &RawParams) -> Result<BackStackEntry> {
		self.inner.lock().reset(key, args).cloned()
	}

	/// Snapshot of the top entry.
	pub fn current(&self) -> BackStackEntry {
		self.inner.lock().current().clone()
	}

	/// See [`Navigator::depth`].
	pub fn depth(&self) -> usize {
		self.inner.lock().depth()
	}

	/// See [`Navigator::can_go_back`].
	pub fn can_go_back(&self) -> bool {
		self.inner.lock().can_go_back()
	}

	/// Snapshot of all entries from the root to the top.
	pub fn entries(&self) -> Vec<BackStackEntry> {
		self.inner.lock().entries().cloned().collect()
	}

	/// See [`Navigator::version`].
	pub fn version(&self) -> u64 {
		self.inner.lock().version()
	}

	/// See [`Navigator::connect`].
	pub fn connect<L>(&self, dispatch_uid: impl Into<String>, listener: L) -> bool
	where
		L: NavigationListener + 'static,
	{
		self.inner.lock().connect(dispatch_uid, listener)
	}

	/// See [`Navigator::disconnect`].
	pub fn disconnect(&self, dispatch_uid: &str) -> bool {
		self.inner.lock().disconnect(dispatch_uid)
	}
}

impl From<Navigator> for SharedNavigator {
	fn from(navigator: Navigator) -> Self {
		Self::new(navigator)
	}
}
