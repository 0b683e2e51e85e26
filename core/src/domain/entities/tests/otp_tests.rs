use chrono::{TimeZone, Utc};

use crate::domain::entities::otp::{Channel, IssuedOtp};
use crate::errors::OtpError;

#[test]
fn test_channel_parsing_is_case_insensitive() {
    assert_eq!("EMAIL".parse::<Channel>().unwrap(), Channel::Email);
    assert_eq!("sms".parse::<Channel>().unwrap(), Channel::Sms);
    assert_eq!(" WhatsApp ".parse::<Channel>().unwrap(), Channel::Whatsapp);
}

#[test]
fn test_unknown_channel_is_rejected() {
    let err = "telegram".parse::<Channel>().unwrap_err();
    assert_eq!(
        err,
        OtpError::UnsupportedChannel {
            channel: "telegram".to_string()
        }
    );
}

#[test]
fn test_channel_serializes_lowercase() {
    assert_eq!(serde_json::to_value(Channel::Whatsapp).unwrap(), "whatsapp");
    assert_eq!(Channel::Sms.to_string(), "sms");
    assert!(Channel::Sms.uses_phone());
    assert!(!Channel::Email.uses_phone());
}

#[test]
fn test_issued_otp_epoch() {
    let issued = IssuedOtp {
        identifier: "a@b.co".to_string(),
        code: "123456".to_string(),
        expires_at: Utc.timestamp_opt(1_700_000_300, 0).unwrap(),
    };
    assert_eq!(issued.expires_at_epoch(), 1_700_000_300);
}
