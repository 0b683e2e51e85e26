//! MySQL implementation of the PatientRepository trait (read-only).

use async_trait::async_trait;
use sqlx::{MySqlPool, Row};

use pms_core::domain::entities::patient::Patient;
use pms_core::errors::DomainError;
use pms_core::repositories::PatientRepository;

pub struct MySqlPatientRepository {
    pool: MySqlPool,
}

impl MySqlPatientRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PatientRepository for MySqlPatientRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Patient>, DomainError> {
        let query = r#"
            SELECT id, doctor_id, full_name, mobile_number
            FROM patient_patient
            WHERE id = ?
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::internal("Failed to find patient", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let patient = Patient {
            id: row
                .try_get("id")
                .map_err(|e| DomainError::internal("Failed to get id", e))?,
            doctor_id: row
                .try_get("doctor_id")
                .map_err(|e| DomainError::internal("Failed to get doctor_id", e))?,
            full_name: row
                .try_get("full_name")
                .map_err(|e| DomainError::internal("Failed to get full_name", e))?,
            mobile_number: row
                .try_get("mobile_number")
                .map_err(|e| DomainError::internal("Failed to get mobile_number", e))?,
        };

        Ok(Some(patient))
    }
}
