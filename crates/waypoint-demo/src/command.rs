//! Demo commands.
//!
//! Each command stands in for one user interaction with the screens: typing
//! into the text field, pressing a button, pressing back, or the system
//! delivering a deep link.

use std::str::FromStr;

use thiserror::Error;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
	/// Replace the text field content. An empty text clears it.
	Type(String),
	/// Press "To detail screen".
	Detail,
	/// Press "To detail (works with deepLink)".
	DeepLink,
	/// Deliver an external URI.
	Open(String),
	/// Navigate to an application path.
	Go(String),
	/// Press back.
	Back,
	/// Print the back stack.
	Stack,
	/// Print the command list.
	Help,
	/// Leave the demo.
	Quit,
}

/// Error returned for input that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
	/// The line was blank.
	#[error("empty command")]
	Empty,
	/// The first word names no command.
	#[error("unknown command '{0}', type 'help' for a list")]
	Unknown(String),
	/// The command needs an argument.
	#[error("'{command}' needs {argument}")]
	MissingArgument {
		/// Command name.
		command: &'static str,
		/// What is missing.
		argument: &'static str,
	},
}

/// Usage text printed by `help`.
pub const HELP: &str = "\
commands:
  type <text>   set the text field (empty to clear)
  detail        press \"To detail screen\"
  deeplink      press \"To detail (works with deepLink)\"
  open <uri>    deliver a deep link, e.g. open https://example.com/12666
  go <path>     navigate to a path, e.g. go detail-screen/Alice
  back          press back
  stack         show the back stack
  help          show this list
  quit          leave";

impl FromStr for Command {
	type Err = CommandError;

	fn from_str(line: &str) -> Result<Self, Self::Err> {
		let line = line.trim();
		if line.is_empty() {
			return Err(CommandError::Empty);
		}
		let (name, rest) = match line.split_once(char::is_whitespace) {
			Some((name, rest)) => (name, rest.trim()),
			None => (line, ""),
		};

		let required = |command: &'static str, argument: &'static str| {
			if rest.is_empty() {
				Err(CommandError::MissingArgument { command, argument })
			} else {
				Ok(rest.to_string())
			}
		};

		match name.to_ascii_lowercase().as_str() {
			"type" => Ok(Self::Type(rest.to_string())),
			"detail" => Ok(Self::Detail),
			"deeplink" => Ok(Self::DeepLink),
			"open" => required("open", "a URI").map(Self::Open),
			"go" => required("go", "a path").map(Self::Go),
			"back" => Ok(Self::Back),
			"stack" => Ok(Self::Stack),
			"help" | "?" => Ok(Self::Help),
			"quit" | "exit" => Ok(Self::Quit),
			_ => Err(CommandError::Unknown(name.to_string())),
		}
	}
}
