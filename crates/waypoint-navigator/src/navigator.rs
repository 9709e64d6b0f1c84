//! The back-stack navigator.
//!
//! A [`Navigator`] owns an ordered stack of resolved route entries. The root
//! entry is kept apart from the pushed entries, so the stack can never be
//! empty and [`Navigator::current`] always has an answer.
//!
//! Every operation resolves its destination before touching the stack. A
//! failure therefore leaves the stack, the version and the listeners
//! untouched.

use std::sync::Arc;

use waypoint_routes::{RawParams, ResolvedRoute, RouteRegistry};

use crate::error::{NavigationError, Result};
use crate::event::{BackStackEntry, NavigationAction, NavigationEvent};
use crate::options::{BackPolicy, NavOptions, NavigatorConfig};
use crate::signal::{NavigationListener, NavigationSignal};

/// Builds a [`Navigator`] and starts it on its root route.
///
/// ```
/// use waypoint_navigator::{BackPolicy, NavigatorBuilder};
/// use waypoint_routes::{RouteDefinition, RouteRegistry};
///
/// let registry = RouteRegistry::from_definitions([
///     RouteDefinition::builder("main-screen", "main-screen").build().unwrap(),
/// ])
/// .unwrap();
///
/// let navigator = NavigatorBuilder::new(registry)
///     .back_policy(BackPolicy::Ignore)
///     .start("main-screen")
///     .unwrap();
/// assert_eq!(navigator.current().key(), "main-screen");
/// ```
#[derive(Debug)]
pub struct NavigatorBuilder {
	registry: Arc<RouteRegistry>,
	config: NavigatorConfig,
	signal: NavigationSignal,
}

impl NavigatorBuilder {
	/// Creates a builder over a registry.
	pub fn new(registry: impl Into<Arc<RouteRegistry>>) -> Self {
		Self {
			registry: registry.into(),
			config: NavigatorConfig::default(),
			signal: NavigationSignal::new(),
		}
	}

	/// Replaces the whole configuration.
	pub fn config(mut self, config: NavigatorConfig) -> Self {
		self.config = config;
		self
	}

	/// Sets the back policy.
	pub fn back_policy(mut self, back_policy: BackPolicy) -> Self {
		self.config.back_policy = back_policy;
		self
	}

	/// Connects a listener before start, so it also sees the start event.
	pub fn listener<L>(self, dispatch_uid: impl Into<String>, listener: L) -> Self
	where
		L: NavigationListener + 'static,
	{
		self.signal.connect(dispatch_uid, listener);
		self
	}

	/// Resolves `initial_key` without arguments and makes it the root entry.
	///
	/// # Errors
	///
	/// Returns [`NavigationError::UnknownRoute`] if the key is not registered
	/// and [`NavigationError::Resolve`] if the route has a required
	/// parameter.
	pub fn start(self, initial_key: &str) -> Result<Navigator> {
		let route = resolve_key(&self.registry, initial_key, &RawParams::new())?;
		let navigator = Navigator {
			registry: self.registry,
			config: self.config,
			signal: self.signal,
			root: BackStackEntry::new(0, route),
			stack: Vec::new(),
			version: 0,
			next_id: 1,
		};
		navigator.notify(NavigationAction::Start);
		Ok(navigator)
	}
}

/// Stack of resolved route entries with a fixed root.
#[derive(Debug)]
pub struct Navigator {
	registry: Arc<RouteRegistry>,
	config: NavigatorConfig,
	signal: NavigationSignal,
	root: BackStackEntry,
	stack: Vec<BackStackEntry>,
	version: u64,
	next_id: u64,
}

impl Navigator {
	/// Shorthand for [`NavigatorBuilder::new`].
	pub fn builder(registry: impl Into<Arc<RouteRegistry>>) -> NavigatorBuilder {
		NavigatorBuilder::new(registry)
	}

	/// Resolves `key` with `args` and pushes it.
	///
	/// # Errors
	///
	/// Returns [`NavigationError::UnknownRoute`] for an unregistered key and
	/// [`NavigationError::Resolve`] when the arguments do not resolve.
	pub fn navigate(&mut self, key: &str, args: &RawParams) -> Result<&BackStackEntry> {
		let route = resolve_key(&self.registry, key, args)?;
		Ok(self.push(route))
	}

	/// Handles an external URI such as `https://example.com/12666`.
	///
	/// # Errors
	///
	/// Returns [`NavigationError::UnresolvedDeepLink`] when no deep-link
	/// pattern matches and [`NavigationError::Resolve`] when the captured
	/// values do not resolve.
	pub fn navigate_uri(&mut self, uri: &str) -> Result<&BackStackEntry> {
		let route = match self.registry.match_external_uri(uri) {
			Some(matched) => matched.resolve()?,
			None => {
				tracing::warn!(uri, "no route handles deep link");
				return Err(NavigationError::UnresolvedDeepLink(uri.to_string()));
			}
		};
		Ok(self.push(route))
	}

	/// Navigates to an application path such as `detail-screen/Alice`.
	///
	/// # Errors
	///
	/// Returns [`NavigationError::UnmatchedPath`] when no template matches
	/// and [`NavigationError::Resolve`] when the captured values do not
	/// resolve.
	pub fn navigate_path(&mut self, path: &str) -> Result<&BackStackEntry> {
		let route = match self.registry.match_path(path) {
			Some(matched) => matched.resolve()?,
			None => return Err(NavigationError::UnmatchedPath(path.to_string())),
		};
		Ok(self.push(route))
	}

	/// Navigates with stack options.
	///
	/// [`NavOptions::pop_up_to`] is applied first; a key that is not on the
	/// stack pops nothing. Then the destination is pushed, or replaces the
	/// top entry when [`NavOptions::launch_single_top`] is set and the top
	/// already shows `key`. Listeners receive a single event.
	///
	/// # Errors
	///
	/// Same as [`Navigator::navigate`].
	pub fn navigate_with(
		&mut self,
		key: &str,
		args: &RawParams,
		options: &NavOptions,
	) -> Result<&BackStackEntry> {
		let route = resolve_key(&self.registry, key, args)?;

		if let Some(pop) = &options.pop_up_to {
			match self.find(&pop.key) {
				Some(position) => {
					let keep = Self::keep_len(position, pop.inclusive);
					self.stack.truncate(keep);
				}
				None => {
					tracing::trace!(key = %pop.key, "pop_up_to target is not on the stack");
				}
			}
		}

		if options.launch_single_top && self.current().key() == key {
			let entry = self.next_entry(route);
			*self.top_mut() = entry;
			return Ok(self.commit(NavigationAction::Replace));
		}
		Ok(self.push(route))
	}

	/// Resolves `key` with `args` and swaps it for the top entry.
	///
	/// On a single-entry stack the root is replaced.
	///
	/// # Errors
	///
	/// Same as [`Navigator::navigate`].
	pub fn replace(&mut self, key: &str, args: &RawParams) -> Result<&BackStackEntry> {
		let route = resolve_key(&self.registry, key, args)?;
		let entry = self.next_entry(route);
		*self.top_mut() = entry;
		Ok(self.commit(NavigationAction::Replace))
	}

	/// Pops the top entry and returns it.
	///
	/// With only the root left, the configured [`BackPolicy`] decides:
	/// `Reject` fails, `Ignore` returns `Ok(None)` without any change.
	///
	/// # Errors
	///
	/// Returns [`NavigationError::EmptyStack`] on the root under
	/// [`BackPolicy::Reject`].
	pub fn go_back(&mut self) -> Result<Option<BackStackEntry>> {
		match self.stack.pop() {
			Some(popped) => {
				self.commit(NavigationAction::Pop);
				Ok(Some(popped))
			}
			None => match self.config.back_policy {
				BackPolicy::Reject => {
					tracing::warn!(route = %self.root.key(), "back pressed on the root entry");
					Err(NavigationError::EmptyStack)
				}
				BackPolicy::Ignore => {
					tracing::debug!(route = %self.root.key(), "ignoring back on the root entry");
					Ok(None)
				}
			},
		}
	}

	/// Pops every entry above the most recent entry for `key`, and that
	/// entry too when `inclusive`. The root entry is never popped.
	///
	/// Listeners are notified only if something was popped.
	///
	/// # Errors
	///
	/// Returns [`NavigationError::UnknownRoute`] if no entry on the stack
	/// has `key`.
	pub fn pop_to(&mut self, key: &str, inclusive: bool) -> Result<&BackStackEntry> {
		let position = self
			.find(key)
			.ok_or_else(|| NavigationError::UnknownRoute(key.to_string()))?;
		let keep = Self::keep_len(position, inclusive);
		if keep == self.stack.len() {
			return Ok(self.current());
		}
		self.stack.truncate(keep);
		Ok(self.commit(NavigationAction::Pop))
	}

	/// Clears the stack and starts over from `key` as the new root.
	///
	/// # Errors
	///
	/// Same as [`Navigator::navigate`].
	pub fn reset(&mut self, key: &str, args: &RawParams) -> Result<&BackStackEntry> {
		let route = resolve_key(&self.registry, key, args)?;
		self.root = self.next_entry(route);
		self.stack.clear();
		Ok(self.commit(NavigationAction::Reset))
	}

	/// The entry on top of the stack.
	pub fn current(&self) -> &BackStackEntry {
		self.stack.last().unwrap_or(&self.root)
	}

	/// Number of entries, root included.
	pub fn depth(&self) -> usize {
		self.stack.len() + 1
	}

	/// Whether `go_back` would pop an entry.
	pub fn can_go_back(&self) -> bool {
		!self.stack.is_empty()
	}

	/// Entries from the root to the top.
	pub fn entries(&self) -> impl Iterator<Item = &BackStackEntry> {
		std::iter::once(&self.root).chain(self.stack.iter())
	}

	/// Counter bumped by every successful change.
	pub fn version(&self) -> u64 {
		self.version
	}

	/// Active configuration.
	pub fn config(&self) -> &NavigatorConfig {
		&self.config
	}

	/// The registry routes are resolved against.
	pub fn registry(&self) -> &Arc<RouteRegistry> {
		&self.registry
	}

	/// The listener set.
	pub fn signal(&self) -> &NavigationSignal {
		&self.signal
	}

	/// Connects a listener; see [`NavigationSignal::connect`].
	pub fn connect<L>(&self, dispatch_uid: impl Into<String>, listener: L) -> bool
	where
		L: NavigationListener + 'static,
	{
		self.signal.connect(dispatch_uid, listener)
	}

	/// Disconnects a listener; see [`NavigationSignal::disconnect`].
	pub fn disconnect(&self, dispatch_uid: &str) -> bool {
		self.signal.disconnect(dispatch_uid)
	}

	/// Builds the application path for `key` with `args`.
	///
	/// # Errors
	///
	/// Returns [`NavigationError::Reverse`] for an unknown key or a missing
	/// path value.
	pub fn path_for(&self, key: &str, args: &RawParams) -> Result<String> {
		Ok(self.registry.reverse(key, args)?)
	}

	/// Application path of the current entry.
	///
	/// # Errors
	///
	/// See [`Navigator::path_for`].
	pub fn current_path(&self) -> Result<String> {
		let current = self.current();
		self.path_for(current.key(), &current.arguments().to_raw())
	}

	// Index into `entries()` of the most recent entry for `key`.
	fn find(&self, key: &str) -> Option<usize> {
		match self.stack.iter().rposition(|entry| entry.key() == key) {
			Some(index) => Some(index + 1),
			None if self.root.key() == key => Some(0),
			None => None,
		}
	}

	// Pushed entries that survive popping up to `position`.
	fn keep_len(position: usize, inclusive: bool) -> usize {
		match position {
			0 => 0,
			position if inclusive => position - 1,
			position => position,
		}
	}

	fn next_entry(&mut self, route: ResolvedRoute) -> BackStackEntry {
		let id = self.next_id;
		self.next_id += 1;
		BackStackEntry::new(id, route)
	}

	fn top_mut(&mut self) -> &mut BackStackEntry {
		match self.stack.last_mut() {
			Some(entry) => entry,
			None => &mut self.root,
		}
	}

	fn push(&mut self, route: ResolvedRoute) -> &BackStackEntry {
		let entry = self.next_entry(route);
		self.stack.push(entry);
		self.commit(NavigationAction::Push)
	}

	fn commit(&mut self, action: NavigationAction) -> &BackStackEntry {
		self.version += 1;
		self.notify(action);
		self.current()
	}

	fn notify(&self, action: NavigationAction) {
		let current = self.current();
		tracing::debug!(
			action = %action,
			route = %current.key(),
			arguments = %current.arguments(),
			depth = self.depth(),
			version = self.version,
			"navigation changed"
		);
		if self.signal.has_listeners() {
			self.signal.send(&NavigationEvent {
				action,
				current: current.clone(),
				depth: self.depth(),
				version: self.version,
			});
		}
	}
}

fn resolve_key(registry: &RouteRegistry, key: &str, args: &RawParams) -> Result<ResolvedRoute> {
	let definition = registry
		.get(key)
		.ok_or_else(|| NavigationError::UnknownRoute(key.to_string()))?;
	Ok(definition.resolve(args)?)
}
