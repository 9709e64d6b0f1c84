//! Scripted demo sessions
//!
//! Runs command scripts against the built-in route table and checks the
//! screens drawn by the renderer.

use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use rstest::*;
use waypoint_conf::Settings;
use waypoint_demo::{App, DEFAULT_ROUTES, Flow, screen};

#[derive(Clone, Default)]
struct Screen(Arc<Mutex<Vec<u8>>>);

impl Screen {
	fn text(&self) -> String {
		String::from_utf8(self.0.lock().clone()).unwrap()
	}
}

impl Write for Screen {
	fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
		self.0.lock().write(buf)
	}

	fn flush(&mut self) -> std::io::Result<()> {
		Ok(())
	}
}

fn session(script: &[&str]) -> (App<Vec<u8>>, Screen) {
	let screen = Screen::default();
	let navigator = Settings::from_toml_str(DEFAULT_ROUTES)
		.unwrap()
		.navigator_builder()
		.unwrap()
		.listener("renderer", screen::renderer(screen.clone()))
		.start("main-screen")
		.unwrap();
	let mut app = App::new(navigator, Vec::new());
	for line in script {
		if app.run_line(line).unwrap() == Flow::Quit {
			break;
		}
	}
	(app, screen)
}

#[rstest]
#[case(&["type Alice", "detail"], "Hello Alice")]
#[case(&["detail"], "Hello Test")]
#[case(&["type Alice", "type", "detail"], "Hello Test")]
#[case(&["deeplink"], "The id is -1")]
#[case(&["open https://example.com/12666"], "The id is 12666")]
#[case(&["open https://example.com/"], "The id is -1")]
#[case(&["go detail-screen/Bob"], "Hello Bob")]
fn test_screen_after_script(#[case] script: &[&str], #[case] expected: &str) {
	let (_, screen) = session(script);
	let last = screen.text().lines().last().unwrap_or_default().to_string();
	assert_eq!(last.trim(), expected);
}

#[rstest]
fn test_start_screen_is_drawn() {
	let (_, screen) = session(&[]);
	assert!(screen.text().contains("main-screen (start, depth 1)"));
}

#[rstest]
fn test_back_returns_to_previous_screen() {
	let (app, screen) = session(&["type Alice", "detail", "deeplink", "back"]);

	assert_eq!(app.navigator().depth(), 2);
	assert_eq!(screen.text().lines().last().unwrap().trim(), "Hello Alice");
}

#[rstest]
fn test_quit_stops_script() {
	let (app, _) = session(&["detail", "quit", "deeplink"]);
	assert_eq!(app.navigator().current().key(), "detail-screen");
}

#[rstest]
fn test_failed_commands_draw_nothing() {
	let (app, screen) = session(&["back", "open https://example.org/1", "go nowhere"]);

	assert_eq!(app.navigator().depth(), 1);
	assert_eq!(screen.text().lines().count(), 2);
}
