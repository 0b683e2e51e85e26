//! Mock implementation of PatientRepository for testing

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::entities::patient::Patient;
use crate::errors::DomainError;

use super::trait_::PatientRepository;

/// In-memory patient repository for testing
pub struct MockPatientRepository {
    patients: Arc<RwLock<HashMap<i64, Patient>>>,
}

impl MockPatientRepository {
    pub fn new() -> Self {
        Self {
            patients: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Seed a patient with placeholder details
    pub async fn insert(&self, id: i64) -> Patient {
        let patient = Patient {
            id,
            doctor_id: 1,
            full_name: format!("Patient {}", id),
            mobile_number: format!("+9198000{:05}", id),
        };
        self.patients.write().await.insert(id, patient.clone());
        patient
    }
}

impl Default for MockPatientRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PatientRepository for MockPatientRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Patient>, DomainError> {
        let patients = self.patients.read().await;
        Ok(patients.get(&id).cloned())
    }
}
