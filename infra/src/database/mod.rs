//! Database module - MySQL implementations using SQLx
//!
//! Tables follow the existing clinic schema: `document_document` and
//! `patient_patient`.

pub mod connection;
pub mod mysql;

#[cfg(test)]
mod tests;

pub use connection::DatabasePool;
pub use mysql::{MySqlDocumentRepository, MySqlPatientRepository};
