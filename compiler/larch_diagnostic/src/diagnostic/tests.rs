use super::*;

#[test]
fn diagnostic_builder() {
    let diag = Diagnostic::error(ErrorCode::E3006)
        .with_message("expression is not constant")
        .with_label(Span::new(0, 5), "here")
        .with_note("only elaboration-time values may appear here");

    assert_eq!(diag.code, ErrorCode::E3006);
    assert_eq!(diag.message, "expression is not constant");
    assert!(diag.is_error());
    assert_eq!(diag.labels.len(), 1);
    assert!(diag.labels[0].is_primary);
    assert_eq!(diag.notes.len(), 1);
}

#[test]
fn secondary_labels_are_not_primary() {
    let diag = Diagnostic::error(ErrorCode::E2002)
        .with_label(Span::new(10, 12), "not found")
        .with_secondary_label(Span::new(0, 4), "searched in this scope");

    assert_eq!(diag.labels.len(), 2);
    assert!(diag.labels[0].is_primary);
    assert!(!diag.labels[1].is_primary);
    assert_eq!(diag.primary_span(), Some(Span::new(10, 12)));
}

#[test]
fn primary_span_skips_secondary() {
    let diag = Diagnostic::warning(ErrorCode::E1001)
        .with_secondary_label(Span::new(1, 2), "context");
    assert_eq!(diag.primary_span(), None);
    assert!(!diag.is_error());
}

#[test]
fn add_note_in_place() {
    let mut diag = Diagnostic::error(ErrorCode::E3001).with_message("too deep");
    diag.add_note("first").add_note("second");
    assert_eq!(diag.notes, vec!["first".to_owned(), "second".to_owned()]);
}

#[test]
fn diagnostic_display() {
    let diag = Diagnostic::error(ErrorCode::E3002)
        .with_message("step limit exceeded")
        .with_label(Span::new(4, 9), "while executing this statement")
        .with_note("the limit is configurable");

    let output = diag.to_string();
    assert!(output.contains("error"));
    assert!(output.contains("E3002"));
    assert!(output.contains("step limit exceeded"));
    assert!(output.contains("4..9"));
    assert!(output.contains("= note: the limit is configurable"));
}

#[test]
fn severity_display_is_lowercase() {
    assert_eq!(Severity::Error.to_string(), "error");
    assert_eq!(Severity::Warning.to_string(), "warning");
    assert_eq!(Severity::Note.to_string(), "note");
    assert_eq!(Severity::Help.to_string(), "help");
}
