//! Waypoint demo
//!
//! ## Usage
//!
//! ```bash
//! waypoint-demo                                  # interactive
//! waypoint-demo "type Alice" detail back stack   # scripted
//! waypoint-demo "open https://example.com/12666"
//! waypoint-demo --config routes.toml -vv
//! ```

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use waypoint_demo::{App, Flow, init_tracing, load_settings, screen};

#[derive(Parser)]
#[command(name = "waypoint-demo")]
#[command(about = "Navigate between screens and open deep links from the terminal", long_about = None)]
#[command(version)]
struct Cli {
	/// Route table to load instead of the built-in one
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Verbosity level (can be repeated)
	#[arg(short, long, action = clap::ArgAction::Count)]
	verbose: u8,

	/// Commands to run instead of reading stdin, one per argument
	#[arg(value_name = "COMMAND")]
	commands: Vec<String>,
}

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let settings = load_settings(cli.config.as_deref()).context("failed to load settings")?;
	init_tracing(&settings.log_filter, cli.verbose);
	tracing::info!(
		start_route = %settings.start_route,
		back_policy = %settings.back_policy,
		routes = settings.routes.len(),
		"settings loaded"
	);

	let navigator = settings
		.navigator_builder()?
		.listener("renderer", screen::renderer(io::stdout()))
		.start(&settings.start_route)
		.context("failed to start navigator")?;
	let mut app = App::new(navigator, io::stdout());

	if !cli.commands.is_empty() {
		for line in &cli.commands {
			if app.run_line(line)? == Flow::Quit {
				break;
			}
		}
		return Ok(());
	}

	println!("{}", "Type 'help' for commands.".dimmed());
	let stdin = io::stdin();
	let mut lines = stdin.lock().lines();
	loop {
		print!("> ");
		io::stdout().flush()?;
		let Some(line) = lines.next() else {
			break;
		};
		if app.run_line(&line?)? == Flow::Quit {
			break;
		}
	}
	Ok(())
}
