//! Route handlers
//!
//! Handlers are generic over the cache and repository implementations so
//! tests can run the full HTTP surface on in-memory backends.

pub mod documents;
pub mod health;
pub mod otp;

use std::sync::Arc;

use pms_core::repositories::{DocumentRepository, PatientRepository};
use pms_core::services::{DocumentService, KeyValueCache, OtpService};

/// Application state that holds shared services
pub struct AppState<C, D, P>
where
    C: KeyValueCache,
    D: DocumentRepository,
    P: PatientRepository,
{
    pub otp_service: Arc<OtpService<C>>,
    pub document_service: Arc<DocumentService<D, P>>,
}

impl<C, D, P> AppState<C, D, P>
where
    C: KeyValueCache,
    D: DocumentRepository,
    P: PatientRepository,
{
    pub fn new(otp_service: Arc<OtpService<C>>, document_service: Arc<DocumentService<D, P>>) -> Self {
        Self {
            otp_service,
            document_service,
        }
    }
}
