//! Repository interfaces for persisted entities.

pub mod document;
pub mod patient;

pub use document::{DocumentRepository, MockDocumentRepository};
pub use patient::{MockPatientRepository, PatientRepository};
