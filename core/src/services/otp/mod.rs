//! One-time code lifecycle over a shared key-value cache
//!
//! - numeric code generation from the OS CSPRNG
//! - issue with resend cooldown, verify with attempt counting and expiry
//! - a facade that validates identifiers and hands codes to the dispatcher

mod code_generator;
mod config;
mod service;
mod store;
mod traits;
mod types;


pub use code_generator::{generate_numeric_code, MAX_SUPPORTED_LENGTH};
pub use config::OtpServiceConfig;
pub use service::OtpService;
pub use store::{format_attempts_key, format_code_key, format_cooldown_key, hash_code, OtpStore};
pub use traits::KeyValueCache;
pub use types::VerifyOutcome;
