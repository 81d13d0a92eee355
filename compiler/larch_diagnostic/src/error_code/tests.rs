use super::*;

#[test]
fn error_code_display() {
    assert_eq!(ErrorCode::E1001.to_string(), "E1001");
    assert_eq!(ErrorCode::E3002.as_str(), "E3002");
}

#[test]
fn eval_error_codes() {
    for code in [
        ErrorCode::E3001,
        ErrorCode::E3002,
        ErrorCode::E3003,
        ErrorCode::E3004,
        ErrorCode::E3005,
        ErrorCode::E3006,
    ] {
        assert!(code.is_eval_error());
        assert!(!code.is_parser_error());
        assert!(!code.is_internal_error());
    }
}

#[test]
fn phase_predicates_are_disjoint() {
    assert!(ErrorCode::E0001.is_lexer_error());
    assert!(ErrorCode::E1002.is_parser_error());
    assert!(ErrorCode::E2001.is_elab_error());
    assert!(ErrorCode::E9001.is_internal_error());

    assert!(!ErrorCode::E0001.is_eval_error());
    assert!(!ErrorCode::E9001.is_elab_error());
}

#[test]
fn descriptions_are_nonempty() {
    for code in [
        ErrorCode::E0001,
        ErrorCode::E1001,
        ErrorCode::E2002,
        ErrorCode::E3003,
        ErrorCode::E9001,
    ] {
        assert!(!code.description().is_empty());
    }
}
