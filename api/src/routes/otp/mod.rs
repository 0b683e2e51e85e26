//! One-time code endpoints

pub mod generate;
pub mod verify;
