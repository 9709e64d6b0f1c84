//! The demo application state and command handling.

use std::io::Write;

use colored::Colorize;
use waypoint_navigator::{NavigationError, Navigator};
use waypoint_routes::RawParams;

use crate::command::{Command, HELP};

/// Key of the route behind the "To detail screen" button.
pub const DETAIL_ROUTE: &str = "detail-screen";

/// Key of the route behind the "To detail (works with deepLink)" button.
pub const DEEP_LINK_ROUTE: &str = "detail-screen-deeplink";

/// Whether the command loop continues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
	/// Read the next command.
	Continue,
	/// Stop.
	Quit,
}

/// Main screen state plus the navigator.
///
/// Screens are drawn by the listener connected to the navigator; `out`
/// receives everything else (stack listings, help, error messages).
pub struct App<W> {
	navigator: Navigator,
	text: String,
	out: W,
}

impl<W: Write> App<W> {
	/// Creates the app around a started navigator.
	pub fn new(navigator: Navigator, out: W) -> Self {
		Self {
			navigator,
			text: String::new(),
			out,
		}
	}

	/// The navigator.
	pub fn navigator(&self) -> &Navigator {
		&self.navigator
	}

	/// Current text field content.
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Parses and runs one input line. Bad input and failed navigation are
	/// reported to `out` and do not stop the loop.
	///
	/// # Errors
	///
	/// Only fails when `out` cannot be written.
	pub fn run_line(&mut self, line: &str) -> anyhow::Result<Flow> {
		match line.parse::<Command>() {
			Ok(command) => self.execute(command),
			Err(crate::command::CommandError::Empty) => Ok(Flow::Continue),
			Err(err) => {
				writeln!(self.out, "{} {}", "error:".red(), err)?;
				Ok(Flow::Continue)
			}
		}
	}

	/// Runs a command.
	///
	/// # Errors
	///
	/// Only fails when `out` cannot be written.
	pub fn execute(&mut self, command: Command) -> anyhow::Result<Flow> {
		let outcome = match command {
			Command::Type(text) => {
				self.text = text;
				Ok(())
			}
			Command::Detail => self.press_detail(),
			Command::DeepLink => self
				.navigator
				.navigate(DEEP_LINK_ROUTE, &RawParams::new())
				.map(drop),
			Command::Open(uri) => self.navigator.navigate_uri(&uri).map(drop),
			Command::Go(path) => self.navigator.navigate_path(&path).map(drop),
			Command::Back => self.navigator.go_back().map(drop),
			Command::Stack => {
				self.print_stack()?;
				Ok(())
			}
			Command::Help => {
				writeln!(self.out, "{}", HELP)?;
				Ok(())
			}
			Command::Quit => return Ok(Flow::Quit),
		};

		if let Err(err) = outcome {
			tracing::debug!(error = %err, "command failed");
			writeln!(self.out, "{} {}", "error:".red(), err)?;
		}
		Ok(Flow::Continue)
	}

	// Builds the path from the text field like a route string with the
	// argument appended, so an empty field falls back to the default name.
	fn press_detail(&mut self) -> Result<(), NavigationError> {
		let mut args = RawParams::new();
		if !self.text.is_empty() {
			args.insert("name".to_string(), self.text.clone());
		}
		let path = self.navigator.path_for(DETAIL_ROUTE, &args)?;
		self.navigator.navigate_path(&path).map(drop)
	}

	fn print_stack(&mut self) -> std::io::Result<()> {
		let depth = self.navigator.depth();
		for (index, entry) in self.navigator.entries().enumerate() {
			let marker = if index + 1 == depth { "*" } else { " " };
			writeln!(
				self.out,
				"{} {} {} {}",
				marker,
				index,
				entry.key(),
				entry.arguments()
			)?;
		}
		Ok(())
	}
}
