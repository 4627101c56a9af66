//! Tests for typed messages
//!
//! These tests verify:
//! - Builders and required-header validation per variant
//! - Encode/decode of every variant, with and without passwords
//! - Embedded resources and notification descriptors
//! - Error kind to `-ERROR` mapping

use gntp::message::Reply;
use gntp::{
    Config, ErrorResponse, GntpError, HashAlgorithm, Message, MessageType, Notify, OkResponse,
    Register, Subscribe,
};
use proptest::prelude::*;

// =============================================================================
// Register
// =============================================================================

#[test]
fn test_register_new_defaults() {
    let register = Register::new("App");

    assert_eq!(register.headers.get("Application-Name"), Some("App"));
    assert_eq!(register.headers.get("Notifications-Count"), Some("0"));
    assert!(register.validate().is_ok());
}

#[test]
fn test_register_add_notification_updates_count() {
    let mut register = Register::new("App");
    register.add_notification("One", true);
    register.add_notification("Two", false);

    assert_eq!(register.headers.get("Notifications-Count"), Some("2"));
    assert_eq!(register.notifications[0].headers.get("Notification-Enabled"), Some("True"));
    assert_eq!(register.notifications[1].headers.get("Notification-Enabled"), Some("False"));
}

#[test]
fn test_register_with_empty_defaults_enables_all() {
    let register = Register::with_notifications("App", &["A", "B"], &[]);
    assert!(register.notifications.iter().all(|n| n.enabled()));
}

#[test]
fn test_register_round_trip_with_notifications() {
    let register = Register::with_notifications("Test", &["Alert", "Warning"], &["Alert"]);
    let decoded = Register::decode(&register.encode().unwrap(), None).unwrap();

    assert_eq!(decoded.headers, register.headers);
    assert_eq!(decoded.notifications, register.notifications);
    assert_eq!(decoded.notifications[0].name(), Some("Alert"));
    assert!(decoded.notifications[0].enabled());
    assert_eq!(decoded.notifications[1].name(), Some("Warning"));
    assert!(!decoded.notifications[1].enabled());
}

#[test]
fn test_register_missing_notification_name() {
    let mut register = Register::new("App");
    register.add_notification("Named", true);
    register.notifications[0].headers.remove("Notification-Name");

    let err = register.encode().unwrap_err();
    assert_eq!(
        err,
        GntpError::Parse("Missing Notification Header: Notification-Name".to_string())
    );
}

#[test]
fn test_register_missing_application_name() {
    let mut register = Register::new("App");
    register.headers.remove("Application-Name");

    let err = register.validate().unwrap_err();
    assert_eq!(
        err,
        GntpError::Parse("Missing Registration Header: Application-Name".to_string())
    );
}

#[test]
fn test_register_with_icon_resource() {
    let icon: Vec<u8> = (0..64u8).chain(b"\r\n\r\n".iter().copied()).collect();

    let mut register = Register::with_notifications("App", &["Alert"], &["Alert"]);
    let url = register.add_resource(icon.clone());
    register.add_header("Application-Icon", &url);

    let decoded = Register::decode(&register.encode().unwrap(), None).unwrap();

    assert_eq!(decoded.notifications.len(), 1);
    assert_eq!(decoded.resources.len(), 1);
    let resource = decoded.resources.values().next().unwrap();
    assert_eq!(&resource.data[..], &icon[..]);
    assert_eq!(decoded.headers.get("Application-Icon"), Some(url.as_str()));
}

// =============================================================================
// Notify
// =============================================================================

#[test]
fn test_notify_round_trip_without_password() {
    let notify = Notify::new("Test", "Alert", "Hi");
    let encoded = notify.encode().unwrap();

    assert!(encoded.starts_with(b"GNTP/1.0 NOTIFY NONE\r\n"));
    assert!(encoded.ends_with(b"\r\n\r\n"));

    let decoded = Notify::decode(&encoded, None).unwrap();
    assert_eq!(decoded.headers.get("Application-Name"), Some("Test"));
    assert_eq!(decoded.headers.get("Notification-Name"), Some("Alert"));
    assert_eq!(decoded.headers.get("Notification-Title"), Some("Hi"));
    assert_eq!(decoded, notify);
}

#[test]
fn test_notify_missing_title() {
    let mut notify = Notify::new("Test", "Alert", "Hi");
    notify.headers.remove("Notification-Title");

    let err = notify.validate().unwrap_err();
    assert_eq!(
        err,
        GntpError::Parse("Missing Notification Header: Notification-Title".to_string())
    );
}

#[test]
fn test_notify_decode_missing_title() {
    let raw = b"GNTP/1.0 NOTIFY NONE\r\nApplication-Name: Test\r\nNotification-Name: Alert\r\n\r\n";
    let err = Notify::decode(raw, None).unwrap_err();
    assert!(matches!(err, GntpError::Parse(msg) if msg.ends_with("Notification-Title")));
}

#[test]
fn test_notify_optional_headers() {
    let mut notify = Notify::new("Test", "Alert", "Hi");
    notify.set_text("Body");
    notify.set_sticky(true);
    notify.set_priority(-2).unwrap();

    let decoded = Notify::decode(&notify.encode().unwrap(), None).unwrap();
    assert_eq!(decoded.headers.get("Notification-Text"), Some("Body"));
    assert_eq!(decoded.headers.get("Notification-Sticky"), Some("True"));
    assert_eq!(decoded.headers.get("Notification-Priority"), Some("-2"));
}

#[test]
fn test_notify_priority_out_of_range() {
    let mut notify = Notify::new("Test", "Alert", "Hi");
    assert!(matches!(notify.set_priority(3), Err(GntpError::Parse(_))));
    assert!(notify.headers.get("Notification-Priority").is_none());
}

#[test]
fn test_notify_with_password() {
    let mut notify = Notify::new("Test", "Alert", "Hi");
    notify.set_password(Some("hunter2"), HashAlgorithm::Md5);
    let encoded = notify.encode().unwrap();

    assert!(Notify::decode(&encoded, Some("hunter2")).is_ok());
    assert!(matches!(Notify::decode(&encoded, Some("wrong")), Err(GntpError::Auth(_))));
    assert!(matches!(Notify::decode(&encoded, None), Err(GntpError::Auth(_))));
}

#[test]
fn test_notify_unexpected_password() {
    let encoded = Notify::new("Test", "Alert", "Hi").encode().unwrap();
    assert!(matches!(Notify::decode(&encoded, Some("hunter2")), Err(GntpError::Auth(_))));
}

#[test]
fn test_notify_decoder_rejects_other_type() {
    let encoded = Register::new("App").encode().unwrap();
    assert!(matches!(Notify::decode(&encoded, None), Err(GntpError::Parse(_))));
}

#[test]
fn test_notify_truncated_resource() {
    let mut notify = Notify::new("Test", "Alert", "Hi");
    notify.add_resource(vec![7u8; 32]);
    let encoded = notify.encode().unwrap();

    // Drop the trailing blank line, the CRLF after the payload, and one payload byte
    let truncated = &encoded[..encoded.len() - 5];
    assert!(matches!(
        Notify::decode(truncated, None),
        Err(GntpError::Parse(msg)) if msg.starts_with("INVALID_DATA_LENGTH")
    ));
}

// =============================================================================
// Subscribe
// =============================================================================

#[test]
fn test_subscribe_round_trip_with_password() {
    let mut subscribe = Subscribe::new("0f8e3530-7a29-11df-93f2-0800200c9a66", "Laptop");
    subscribe.set_port(23053);
    subscribe.set_password(Some("secret"), HashAlgorithm::Md5);

    let decoded = Subscribe::decode(&subscribe.encode().unwrap(), Some("secret")).unwrap();
    assert_eq!(decoded.headers, subscribe.headers);
    assert_eq!(decoded.headers.get("Subscriber-Port"), Some("23053"));
}

#[test]
fn test_subscribe_missing_name() {
    let mut subscribe = Subscribe::new("id", "name");
    subscribe.headers.remove("Subscriber-Name");
    assert_eq!(
        subscribe.encode().unwrap_err(),
        GntpError::Parse("Missing Subscription Header: Subscriber-Name".to_string())
    );
}

// =============================================================================
// Responses
// =============================================================================

#[test]
fn test_ok_round_trip() {
    let ok = OkResponse::new("NOTIFY");
    let decoded = OkResponse::decode(&ok.encode().unwrap()).unwrap();

    assert_eq!(decoded.action(), Some("NOTIFY"));
    assert_eq!(decoded.reply(), Reply::Accepted("NOTIFY"));
}

#[test]
fn test_error_round_trip() {
    let error = ErrorResponse::new(402, "Not authorized");
    let decoded = ErrorResponse::decode(&error.encode().unwrap()).unwrap();

    assert_eq!(decoded.error(), ("402", "Not authorized"));
    assert_eq!(decoded.code(), Some(402));
    assert_eq!(
        decoded.reply(),
        Reply::Rejected {
            code: "402",
            description: "Not authorized"
        }
    );
}

#[test]
fn test_error_kinds_map_to_responses() {
    let parse = GntpError::Parse("x".to_string()).to_error_response();
    assert_eq!(parse.error(), ("500", "Error parsing the message"));

    let auth = GntpError::Auth("x".to_string()).to_error_response();
    assert_eq!(auth.error(), ("400", "Error with authorization"));

    let unsupported = GntpError::Unsupported("x".to_string()).to_error_response();
    assert_eq!(unsupported.error(), ("500", "Currently unsupported"));
    assert!(unsupported.encode().is_ok());
}

// =============================================================================
// Shared behaviour
// =============================================================================

#[test]
fn test_apply_config_sets_version_and_origin() {
    let config = Config::builder()
        .protocol_version("1.1")
        .machine_name("host-a")
        .build();

    let mut notify = Notify::new("Test", "Alert", "Hi");
    notify.apply_config(&config);
    let encoded = notify.encode().unwrap();

    assert!(encoded.starts_with(b"GNTP/1.1 NOTIFY NONE\r\n"));
    let decoded = Notify::decode(&encoded, None).unwrap();
    assert_eq!(decoded.info.version, "1.1");
    assert_eq!(decoded.headers.get("Origin-Machine-Name"), Some("host-a"));
}

#[test]
fn test_message_enum_accessors() {
    let message: Message = Subscribe::new("id", "name").into();

    assert_eq!(message.message_type(), MessageType::Subscribe);
    assert_eq!(message.headers().get("Subscriber-ID"), Some("id"));
    assert!(message.reply().is_none());
    assert!(message.validate().is_ok());
}

#[test]
fn test_register_header_cannot_forge_descriptor() {
    let mut register = Register::with_notifications("App", &["A"], &[]);
    register.add_header("X-Note", "a\r\n\r\nNotification-Name: Ghost");

    assert_eq!(
        register.encode().unwrap_err(),
        GntpError::Parse("INVALID_HEADER_VALUE Message Header: X-Note".to_string())
    );
}

#[test]
fn test_register_descriptor_name_cannot_add_lines() {
    let mut register = Register::new("App");
    register.add_notification("A\r\nNotification-Enabled: True", false);

    assert!(matches!(
        register.encode(),
        Err(GntpError::Parse(msg)) if msg.starts_with("INVALID_HEADER_VALUE Notification")
    ));
}

#[test]
fn test_notify_text_cannot_override_headers() {
    let mut notify = Notify::new("Test", "Alert", "Hi");
    notify.set_text("hello\r\nNotification-Title: forged");

    assert!(matches!(notify.encode(), Err(GntpError::Parse(_))));
}

#[test]
fn test_notify_padded_value_rejected() {
    let mut notify = Notify::new("Test", "Alert", "Hi");
    notify.add_header("X-Pad", "  padded  ");
    assert!(matches!(notify.encode(), Err(GntpError::Parse(_))));

    notify.add_header("X-Pad", "padded");
    let decoded = Notify::decode(&notify.encode().unwrap(), None).unwrap();
    assert_eq!(decoded.headers, notify.headers);
}

#[test]
fn test_notify_invalid_header_name_rejected() {
    let mut notify = Notify::new("Test", "Alert", "Hi");
    notify.add_header("Not A Key", "value");
    assert!(matches!(
        notify.encode(),
        Err(GntpError::Parse(msg)) if msg.starts_with("INVALID_HEADER_NAME")
    ));
}

#[test]
fn test_resource_header_checked_on_encode() {
    let mut notify = Notify::new("Test", "Alert", "Hi");
    notify.add_resource(vec![1u8, 2, 3]);
    for resource in notify.resources.values_mut() {
        resource.headers.insert("Identifier", "x\r\nLength: 0");
    }

    assert!(matches!(
        notify.encode(),
        Err(GntpError::Parse(msg)) if msg.starts_with("INVALID_HEADER_VALUE Resource")
    ));
}

#[test]
fn test_set_password_with_uses_configured_algorithm() {
    let config = Config::builder().hash_algorithm(HashAlgorithm::Sha256).build();

    let mut register = Register::new("App");
    register.set_password_with(&config, Some("hunter2"));
    assert_eq!(register.info.key_hash_algorithm_id(), Some("SHA256"));

    register.set_password_with(&config, None);
    assert!(register.info.key_hash.is_none());
}

fn header_key() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z][A-Za-z0-9_-]{0,20}",
        "(?s).{0,12}",
    ]
}

fn header_value() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ -~]{0,30}",
        "[ a-z:\t\r\n]{0,12}",
        "(?s).{0,30}",
    ]
}

proptest! {
    #[test]
    fn prop_notify_headers_round_trip(
        extra in prop::collection::btree_map(header_key(), header_value(), 0..8)
    ) {
        let mut notify = Notify::new("Test", "Alert", "Hi");
        for (key, value) in &extra {
            notify.add_header(key.as_str(), value);
        }

        match notify.encode() {
            Ok(raw) => {
                let decoded = Notify::decode(&raw, None).unwrap();
                prop_assert_eq!(decoded.headers, notify.headers);
            }
            Err(err) => prop_assert!(matches!(err, GntpError::Parse(_))),
        }
    }
}
