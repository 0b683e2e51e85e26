//! MySQL repository implementations

pub mod document_repository;
pub mod patient_repository;

pub use document_repository::MySqlDocumentRepository;
pub use patient_repository::MySqlPatientRepository;
