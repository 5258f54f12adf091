use crate::ErrorLocation;

#[track_caller]
fn capture() -> ErrorLocation {
    ErrorLocation::caller()
}

/// **VALUE**: Verifies that a captured location points at this test file.
///
/// **WHY THIS MATTERS**: Every error in the coordination core carries one of these.
/// A location that points into the constructor instead of the failing call site
/// makes a position-timeout or catalog-parse log line useless.
///
/// **BUG THIS CATCHES**: Would catch `#[track_caller]` being dropped from a helper,
/// which silently moves every reported location into the helper's body.
#[test]
fn given_track_caller_helper_when_capturing_then_reports_call_site() {
    // GIVEN / WHEN: Capturing through a #[track_caller] helper
    let location = capture();
    let expected_line = line!() - 1;

    // THEN: File and line are the caller's
    assert!(location.file.ends_with("error_location.rs"));
    assert_eq!(location.line, expected_line);
    assert!(location.column > 0);
}

/// **VALUE**: Verifies the bracketed `[file:line:column]` display format.
///
/// **BUG THIS CATCHES**: Would catch a Display change that drops a component or the
/// brackets the log grep patterns depend on.
#[test]
fn given_error_location_when_formatted_then_produces_bracketed_triplet() {
    // GIVEN: A fixed location
    let location = ErrorLocation {
        file: "backend/safety-core/src/position/mod.rs",
        line: 42,
        column: 7,
    };

    // WHEN: Formatting
    let formatted = location.to_string();

    // THEN: Bracketed file:line:column
    assert_eq!(formatted, "[backend/safety-core/src/position/mod.rs:42:7]");
}

#[test]
fn given_two_call_sites_when_capturing_then_lines_differ() {
    let first = capture();
    let second = capture();

    assert_eq!(first.file, second.file);
    assert_eq!(first.line + 1, second.line);
}
