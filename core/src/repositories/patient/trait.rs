//! Patient lookup trait. Patients are managed elsewhere; this service only reads them.

use async_trait::async_trait;

use crate::domain::entities::patient::Patient;
use crate::errors::DomainError;

#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Find a patient by id
    async fn find_by_id(&self, id: i64) -> Result<Option<Patient>, DomainError>;
}
