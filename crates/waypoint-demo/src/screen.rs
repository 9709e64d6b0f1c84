//! Screen rendering.
//!
//! The renderer is connected to the navigator as a listener and redraws the
//! top entry after every stack change.

use std::io::Write;

use colored::Colorize;
use parking_lot::Mutex;
use waypoint_navigator::{BackStackEntry, NavigationEvent};

/// Text content of the screen for an entry.
pub fn render(entry: &BackStackEntry) -> String {
	let argument = |name: &str| {
		entry
			.arguments()
			.get(name)
			.map(ToString::to_string)
			.unwrap_or_else(|| "null".to_string())
	};

	match entry.key() {
		"main-screen" => "[ text field ]  [ To detail screen ]  [ To detail (works with deepLink) ]"
			.to_string(),
		"detail-screen" => format!("Hello {}", argument("name")),
		"detail-screen-deeplink" => format!("The id is {}", argument("id")),
		other if entry.arguments().is_empty() => other.to_string(),
		other => format!("{} {}", other, entry.arguments()),
	}
}

/// A listener that writes each new screen to `out`.
///
/// Write failures are logged and otherwise ignored, since a listener has no
/// caller to report them to.
pub fn renderer<W>(out: W) -> impl Fn(&NavigationEvent) + Send + Sync + 'static
where
	W: Write + Send + 'static,
{
	let out = Mutex::new(out);
	move |event: &NavigationEvent| {
		let title = format!("{} ({}, depth {})", event.current.key(), event.action, event.depth);
		let mut out = out.lock();
		let written = writeln!(out, "{}", title.bold())
			.and_then(|()| writeln!(out, "  {}", render(&event.current)))
			.and_then(|()| out.flush());
		if let Err(err) = written {
			tracing::warn!(error = %err, "failed to draw screen");
		}
	}
}
