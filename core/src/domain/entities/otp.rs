//! One-time code entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::OtpError;

/// Delivery channel for a one-time code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Email,
    Sms,
    Whatsapp,
}

impl Channel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Channel::Email => "email",
            Channel::Sms => "sms",
            Channel::Whatsapp => "whatsapp",
        }
    }

    /// Whether the identifier for this channel is a phone number
    pub fn uses_phone(&self) -> bool {
        matches!(self, Channel::Sms | Channel::Whatsapp)
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Channel {
    type Err = OtpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "email" => Ok(Channel::Email),
            "sms" => Ok(Channel::Sms),
            "whatsapp" => Ok(Channel::Whatsapp),
            _ => Err(OtpError::UnsupportedChannel {
                channel: s.to_string(),
            }),
        }
    }
}

/// A freshly issued code, handed to the dispatcher and never persisted in clear
#[derive(Debug, Clone)]
pub struct IssuedOtp {
    pub identifier: String,
    pub code: String,
    pub expires_at: DateTime<Utc>,
}

impl IssuedOtp {
    /// Expiry as unix seconds
    pub fn expires_at_epoch(&self) -> i64 {
        self.expires_at.timestamp()
    }
}
