//! Domain entities representing core business objects.

pub mod document;
pub mod otp;
pub mod patient;

#[cfg(test)]
mod tests;

pub use document::{Document, DocumentStats, NewDocument};
pub use otp::{Channel, IssuedOtp};
pub use patient::Patient;
