use costest_core::errors::{
    ConfigError, CostestErrorCode, EstimateError, InputError, MappingError,
};

#[test]
fn error_codes_per_subsystem() {
    let config = ConfigError::ValidationFailed {
        field: "min_samples".into(),
        message: "must be at least 1".into(),
    };
    assert_eq!(config.error_code(), "CONFIG_ERROR");

    let input = InputError::InvalidItemCode { raw: "x".into() };
    assert_eq!(input.error_code(), "MALFORMED_INPUT");

    let conflict = MappingError::StaticConflict {
        replacement_code: "401-11526".into(),
        first_memo: "25-10".into(),
        second_memo: "25-11".into(),
    };
    assert_eq!(conflict.error_code(), "MAPPING_CONFLICT");
}

#[test]
fn coded_string_prefixes_code() {
    let input = InputError::UnknownDistrict { raw: "GOTHAM".into() };
    assert_eq!(
        input.coded_string(),
        "[MALFORMED_INPUT] unknown district \"GOTHAM\""
    );
}

#[test]
fn estimate_error_wraps_subsystems() {
    let err: EstimateError = InputError::InvalidItemCode { raw: "bad".into() }.into();
    assert_eq!(err.error_code(), "MALFORMED_INPUT");

    let wrapped = err.for_item("bad", "CATEGORY_MIX");
    assert_eq!(wrapped.error_code(), "ESTIMATE_ERROR");
    let message = wrapped.to_string();
    assert!(message.contains("Item bad failed in tier CATEGORY_MIX"));
    assert!(std::error::Error::source(&wrapped).is_some());
}

#[test]
fn overlay_row_error_keeps_input_code() {
    let err = MappingError::OverlayRow {
        memo_id: "DM-1".into(),
        source: InputError::InvalidItemCode { raw: "zz".into() },
    };
    assert_eq!(err.error_code(), "MALFORMED_INPUT");
    assert!(err.to_string().contains("DM-1"));
}

#[test]
fn aliased_keys_message_names_both_keys() {
    let err = ConfigError::AliasedKeys {
        table: "recency_steps",
        first: "12M".into(),
        second: "STATE-12M".into(),
        resolved: "STATE-12M".into(),
    };
    assert_eq!(err.error_code(), "CONFIG_ERROR");
    assert_eq!(
        err.to_string(),
        "recency_steps keys \"12M\" and \"STATE-12M\" both resolve to STATE-12M"
    );
}
