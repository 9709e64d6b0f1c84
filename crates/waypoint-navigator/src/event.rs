//! Back-stack entries and navigation events.

use std::fmt;

use waypoint_routes::{FromArgument, ResolvedRoute, RouteArguments};

/// One entry on the back stack.
#[derive(Debug, Clone, PartialEq)]
pub struct BackStackEntry {
	id: u64,
	route: ResolvedRoute,
}

impl BackStackEntry {
	pub(crate) fn new(id: u64, route: ResolvedRoute) -> Self {
		Self { id, route }
	}

	/// Identifier unique within one navigator.
	pub fn id(&self) -> u64 {
		self.id
	}

	/// The resolved route shown by this entry.
	pub fn route(&self) -> &ResolvedRoute {
		&self.route
	}

	/// Route key.
	pub fn key(&self) -> &str {
		self.route.key()
	}

	/// Resolved arguments.
	pub fn arguments(&self) -> &RouteArguments {
		self.route.arguments()
	}

	/// Reads one argument as a Rust type, `None` if absent or of another kind.
	pub fn arg<T: FromArgument>(&self, name: &str) -> Option<T> {
		self.route.arg(name).ok()
	}
}

impl fmt::Display for BackStackEntry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{} {}", self.id, self.route)
	}
}

/// The kind of stack change that produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationAction {
	/// The navigator was created with its root entry.
	Start,
	/// An entry was pushed.
	Push,
	/// One or more entries were popped.
	Pop,
	/// The top entry was swapped for another.
	Replace,
	/// The whole stack was replaced by a new root.
	Reset,
}

impl NavigationAction {
	/// Lowercase action name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Start => "start",
			Self::Push => "push",
			Self::Pop => "pop",
			Self::Replace => "replace",
			Self::Reset => "reset",
		}
	}
}

impl fmt::Display for NavigationAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Sent to listeners after every successful stack change.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationEvent {
	/// What happened.
	pub action: NavigationAction,
	/// The entry on top of the stack afterwards.
	pub current: BackStackEntry,
	/// Stack depth afterwards, root included.
	pub depth: usize,
	/// Stack version afterwards.
	pub version: u64,
}
