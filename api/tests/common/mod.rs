//! Shared fixtures for handler tests: in-memory cache and repositories,
//! a recording outbox and a fake storage signer.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::web;
use async_trait::async_trait;
use pms_api::{configure_routes, AppState};
use pms_core::repositories::{MockDocumentRepository, MockPatientRepository};
use pms_core::services::document::{SignRequest, StorageSigner};
use pms_core::services::{
    DeliveryDispatcher, DispatcherConfig, DocumentService, MailSender, MessageSender, OtpService,
    OtpServiceConfig, OtpStore, UploadConfig,
};
use pms_infra::MemoryCache;

pub type TestState = AppState<MemoryCache, MockDocumentRepository, MockPatientRepository>;

/// Records every message handed to a transport
#[derive(Clone, Default)]
pub struct Outbox {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

impl Outbox {
    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    /// Digits of the last message delivered to `to`
    pub fn last_code_for(&self, to: &str) -> Option<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(recipient, _)| recipient == to)
            .map(|(_, body)| body.chars().filter(|c| c.is_ascii_digit()).collect())
    }

    fn record(&self, to: &str, body: &str) -> usize {
        let mut sent = self.sent.lock().unwrap();
        sent.push((to.to_string(), body.to_string()));
        sent.len()
    }
}

#[async_trait]
impl MailSender for Outbox {
    async fn send_mail(&self, _from: &str, to: &str, _subject: &str, body: &str) -> Result<(), String> {
        self.record(to, body);
        Ok(())
    }
}

#[async_trait]
impl MessageSender for Outbox {
    async fn send_message(&self, to: &str, body: &str) -> Result<String, String> {
        let n = self.record(to, body);
        Ok(format!("SM{}", n))
    }
}

/// Produces predictable URLs and reports every object as present
#[derive(Clone, Default)]
pub struct FakeSigner {
    requests: Arc<Mutex<Vec<SignRequest>>>,
}

impl FakeSigner {
    pub fn requests(&self) -> Vec<SignRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageSigner for FakeSigner {
    async fn sign_url(&self, request: SignRequest) -> Result<String, String> {
        let url = format!(
            "https://storage.test/{}/{}?method={}&expires={}",
            request.bucket,
            request.object_key,
            request.method.as_str(),
            request.expires_in
        );
        self.requests.lock().unwrap().push(request);
        Ok(url)
    }

    async fn object_exists(&self, _bucket: &str, _object_key: &str) -> Result<bool, String> {
        Ok(true)
    }
}

pub struct Fixture {
    pub state: web::Data<TestState>,
    pub outbox: Outbox,
    pub signer: FakeSigner,
    pub documents: Arc<MockDocumentRepository>,
    pub patients: Arc<MockPatientRepository>,
}

pub fn fixture() -> Fixture {
    fixture_with(Some("clinic-docs"), Some("noreply@clinic.test"))
}

pub fn fixture_with(bucket: Option<&str>, from_email: Option<&str>) -> Fixture {
    let outbox = Outbox::default();
    let signer = FakeSigner::default();
    let documents = Arc::new(MockDocumentRepository::new());
    let patients = Arc::new(MockPatientRepository::new());

    let dispatcher_config = DispatcherConfig {
        from_email: from_email.map(str::to_string),
        ..DispatcherConfig::default()
    };
    let dispatcher = Arc::new(DeliveryDispatcher::new(
        dispatcher_config,
        Arc::new(outbox.clone()),
        Arc::new(outbox.clone()),
        Arc::new(outbox.clone()),
    ));
    let store = OtpStore::new(Arc::new(MemoryCache::new()), OtpServiceConfig::default());
    let otp_service = Arc::new(OtpService::new(store, dispatcher));

    let upload_config = UploadConfig {
        bucket: bucket.map(str::to_string),
        ..UploadConfig::default()
    };
    let document_service = Arc::new(DocumentService::new(
        documents.clone(),
        patients.clone(),
        Arc::new(signer.clone()),
        upload_config,
    ));

    Fixture {
        state: web::Data::new(AppState::new(otp_service, document_service)),
        outbox,
        signer,
        documents,
        patients,
    }
}

/// `configure_routes` instantiated for the in-memory fixtures
pub fn routes(cfg: &mut web::ServiceConfig) {
    configure_routes::<MemoryCache, MockDocumentRepository, MockPatientRepository>(cfg);
}
