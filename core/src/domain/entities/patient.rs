//! Patient entity (read-only in this service)

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: i64,
    /// Treating doctor
    pub doctor_id: i64,
    pub full_name: String,
    pub mobile_number: String,
}
