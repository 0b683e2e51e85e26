pub mod document;
pub mod otp;

pub use document::*;
pub use otp::*;
