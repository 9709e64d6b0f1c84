//! Navigator integration tests
//!
//! Drives the demo route table through the public navigator API and checks
//! the resulting stack and the events seen by a rendering listener.

use std::sync::Arc;

use parking_lot::Mutex;
use rstest::*;
use waypoint_navigator::{
	BackPolicy, NavigationAction, NavigationError, NavigationEvent, Navigator, NavigatorBuilder,
};
use waypoint_routes::{ParamSpec, ParamType, ParamValue, RawParams, RouteDefinition, RouteRegistry};

type EventLog = Arc<Mutex<Vec<NavigationEvent>>>;

fn args(pairs: &[(&str, &str)]) -> RawParams {
	pairs
		.iter()
		.map(|(k, v)| (k.to_string(), v.to_string()))
		.collect()
}

#[fixture]
fn registry() -> Arc<RouteRegistry> {
	Arc::new(
		RouteRegistry::from_definitions([
			RouteDefinition::builder("main-screen", "main-screen")
				.build()
				.unwrap(),
			RouteDefinition::builder("detail-screen", "detail-screen/:name")
				.param(
					"name",
					ParamSpec::new(ParamType::String)
						.default_value("Test")
						.nullable(),
				)
				.build()
				.unwrap(),
			RouteDefinition::builder("detail-screen-deeplink", "detail-screen-deeplink")
				.deep_link("https://example.com/{id}")
				.param("id", ParamSpec::new(ParamType::Int).default_value(-1))
				.build()
				.unwrap(),
		])
		.unwrap(),
	)
}

#[fixture]
fn recorded(registry: Arc<RouteRegistry>) -> (Navigator, EventLog) {
	let log: EventLog = Arc::new(Mutex::new(Vec::new()));
	let sink = Arc::clone(&log);
	let navigator = NavigatorBuilder::new(registry)
		.listener("recorder", move |event: &NavigationEvent| {
			sink.lock().push(event.clone())
		})
		.start("main-screen")
		.unwrap();
	(navigator, log)
}

// ============================================================================
// Navigation by key
// ============================================================================

#[rstest]
fn test_detail_with_name(recorded: (Navigator, EventLog)) {
	let (mut navigator, _) = recorded;

	let current = navigator
		.navigate("detail-screen", &args(&[("name", "Alice")]))
		.unwrap();

	assert_eq!(current.key(), "detail-screen");
	assert_eq!(current.arguments().get("name"), Some(&ParamValue::from("Alice")));
}

#[rstest]
fn test_detail_without_arguments_uses_default(recorded: (Navigator, EventLog)) {
	let (mut navigator, _) = recorded;

	let current = navigator.navigate("detail-screen", &RawParams::new()).unwrap();

	assert_eq!(current.arguments().get("name"), Some(&ParamValue::from("Test")));
}

#[rstest]
fn test_arguments_are_resolved_not_raw(recorded: (Navigator, EventLog)) {
	let (mut navigator, _) = recorded;

	navigator
		.navigate("detail-screen-deeplink", &args(&[("id", "0x10"), ("extra", "1")]))
		.unwrap();

	let arguments = navigator.current().arguments();
	assert_eq!(arguments.get("id"), Some(&ParamValue::Int(16)));
	assert!(!arguments.contains("extra"));
}

// ============================================================================
// Deep links
// ============================================================================

#[rstest]
#[case("https://example.com/12666", 12666)]
#[case("https://example.com/", -1)]
fn test_deep_link_entry(recorded: (Navigator, EventLog), #[case] uri: &str, #[case] id: i32) {
	let (mut navigator, log) = recorded;

	navigator.navigate_uri(uri).unwrap();

	let current = navigator.current();
	assert_eq!(current.key(), "detail-screen-deeplink");
	assert_eq!(current.arguments().get("id"), Some(&ParamValue::Int(id)));
	let last = log.lock().last().cloned().unwrap();
	assert_eq!(last.action, NavigationAction::Push);
	assert_eq!(last.current.arg::<i32>("id"), Some(id));
}

#[rstest]
#[case("https://example.org/12666")]
#[case("ftp://example.com/1")]
#[case("example.com/1")]
fn test_unresolved_deep_link(recorded: (Navigator, EventLog), #[case] uri: &str) {
	let (mut navigator, log) = recorded;

	let err = navigator.navigate_uri(uri).unwrap_err();

	assert_eq!(err, NavigationError::UnresolvedDeepLink(uri.to_string()));
	assert_eq!(navigator.depth(), 1);
	assert_eq!(log.lock().len(), 1);
}

#[rstest]
fn test_deep_link_with_non_numeric_id_is_unresolved(recorded: (Navigator, EventLog)) {
	let (mut navigator, log) = recorded;

	let err = navigator.navigate_uri("https://example.com/abc").unwrap_err();

	assert_eq!(
		err,
		NavigationError::UnresolvedDeepLink("https://example.com/abc".to_string())
	);
	assert_eq!(navigator.depth(), 1);
	assert_eq!(log.lock().len(), 1);
}

#[rstest]
fn test_non_numeric_id_by_key_uses_default(recorded: (Navigator, EventLog)) {
	let (mut navigator, _) = recorded;

	let entry = navigator
		.navigate("detail-screen-deeplink", &args(&[("id", "abc")]))
		.unwrap();

	assert_eq!(entry.arguments().get("id"), Some(&ParamValue::Int(-1)));
}

// ============================================================================
// Back navigation
// ============================================================================

#[rstest]
fn test_go_back_returns_to_prior_top(recorded: (Navigator, EventLog)) {
	// Arrange
	let (mut navigator, log) = recorded;
	navigator
		.navigate("detail-screen", &args(&[("name", "Alice")]))
		.unwrap();
	navigator.navigate_uri("https://example.com/3").unwrap();

	// Act
	let popped = navigator.go_back().unwrap().unwrap();

	// Assert
	assert_eq!(popped.key(), "detail-screen-deeplink");
	assert_eq!(navigator.current().arg::<String>("name"), Some("Alice".to_string()));
	let actions: Vec<NavigationAction> = log.lock().iter().map(|e| e.action).collect();
	assert_eq!(
		actions,
		vec![
			NavigationAction::Start,
			NavigationAction::Push,
			NavigationAction::Push,
			NavigationAction::Pop,
		]
	);
}

#[rstest]
#[case(BackPolicy::Reject)]
#[case(BackPolicy::Ignore)]
fn test_back_on_root_is_consistent(registry: Arc<RouteRegistry>, #[case] policy: BackPolicy) {
	let mut navigator = NavigatorBuilder::new(registry)
		.back_policy(policy)
		.start("main-screen")
		.unwrap();

	let outcomes: Vec<_> = (0..4).map(|_| navigator.go_back()).collect();

	let expected = match policy {
		BackPolicy::Reject => Err(NavigationError::EmptyStack),
		BackPolicy::Ignore => Ok(None),
	};
	assert!(outcomes.iter().all(|outcome| *outcome == expected));
	assert_eq!(navigator.depth(), 1);
	assert_eq!(navigator.current().key(), "main-screen");
}

#[rstest]
fn test_events_carry_depth_and_version(recorded: (Navigator, EventLog)) {
	let (mut navigator, log) = recorded;
	navigator.navigate("detail-screen", &RawParams::new()).unwrap();
	navigator.go_back().unwrap();

	let log = log.lock();
	let summary: Vec<(usize, u64)> = log.iter().map(|e| (e.depth, e.version)).collect();
	assert_eq!(summary, vec![(1, 0), (2, 1), (1, 2)]);
}
