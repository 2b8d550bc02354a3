//! Unit tests for the MessageBird Verify client

use reqwest::StatusCode;
use tfa_core::services::{SessionStatus, VerifyOptions};

use crate::verify::mask_recipient;
use crate::verify::messagebird::{
    parse_error_body, CreateVerifyRequest, MessageBirdConfig, VerifyObject, DEFAULT_ENDPOINT,
};

#[test]
fn test_config_defaults() {
    let config = MessageBirdConfig::new("live_key");
    assert_eq!(config.access_key, "live_key");
    assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(config.request_timeout_secs, 30);
}

#[test]
fn test_mask_recipient() {
    assert_eq!(mask_recipient("+61412345678"), "+*******5678");
    assert_eq!(mask_recipient("0412345678"), "******5678");
    assert_eq!(mask_recipient("123"), "***");
}

#[test]
fn test_mask_recipient_multibyte_contact() {
    // Contacts are caller-supplied strings, not guaranteed ASCII
    assert_eq!(mask_recipient("+4917ü234"), "+****ü234");
    assert_eq!(mask_recipient("ü234"), "****");
    assert_eq!(mask_recipient("01234ü67ü9"), "******67ü9");
}

#[test]
fn test_parse_error_body_uses_first_description_verbatim() {
    let body = r#"{"errors":[{"code":10,"description":"The token is invalid.","parameter":"token"}]}"#;
    let error = parse_error_body(StatusCode::UNPROCESSABLE_ENTITY, body);
    assert_eq!(error.message, "The token is invalid.");
}

#[test]
fn test_parse_error_body_with_multiple_errors_keeps_first() {
    let body = r#"{"errors":[{"description":"The token has expired."},{"description":"second"}]}"#;
    let error = parse_error_body(StatusCode::UNPROCESSABLE_ENTITY, body);
    assert_eq!(error.message, "The token has expired.");
}

#[test]
fn test_parse_error_body_falls_back_on_unparseable_body() {
    let error = parse_error_body(StatusCode::BAD_GATEWAY, "<html>Bad Gateway</html>");
    assert_eq!(error.message, "Verify request failed with status 502 Bad Gateway");
}

#[test]
fn test_verify_object_deserializes() {
    let object: VerifyObject =
        serde_json::from_str(r#"{"id":"4e213b01155d1e35a9d9571v00162985","status":"sent"}"#)
            .unwrap();
    assert_eq!(object.id, "4e213b01155d1e35a9d9571v00162985");
    assert_eq!(object.status, SessionStatus::Sent);
}

#[test]
fn test_verify_object_tolerates_unknown_status() {
    let object: VerifyObject =
        serde_json::from_str(r#"{"id":"abc","status":"buffered"}"#).unwrap();
    assert_eq!(object.status, SessionStatus::Unknown);
}

#[test]
fn test_create_request_flattens_options() {
    let options = VerifyOptions {
        originator: Some("AcmeCorp".to_string()),
        token_length: Some(6),
        ..Default::default()
    };
    let request = CreateVerifyRequest {
        recipient: "+61412345678",
        options: &options,
    };
    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["recipient"], "+61412345678");
    assert_eq!(json["originator"], "AcmeCorp");
    assert_eq!(json["tokenLength"], 6);
    assert!(json.get("timeout").is_none());
}
