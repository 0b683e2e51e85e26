//! Mock collaborators shared by the service tests

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::time::{Duration, Instant};

use crate::services::delivery::{MailSender, MessageSender};
use crate::services::document::{SignRequest, StorageSigner};
use crate::services::otp::KeyValueCache;

/// In-memory cache honouring expiry on tokio's (pausable) clock
pub struct MockCache {
    pub entries: Arc<Mutex<HashMap<String, (String, Option<Instant>)>>>,
    pub should_fail: bool,
    /// Writes to keys containing this fragment fail
    pub failing_writes: Option<String>,
}

impl MockCache {
    pub fn new(should_fail: bool) -> Self {
        Self {
            entries: Arc::new(Mutex::new(HashMap::new())),
            should_fail,
            failing_writes: None,
        }
    }

    pub fn failing_writes_to(fragment: &str) -> Self {
        Self {
            failing_writes: Some(fragment.to_string()),
            ..Self::new(false)
        }
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.live(&mut self.entries.lock().unwrap(), key)
    }

    fn live(
        &self,
        entries: &mut HashMap<String, (String, Option<Instant>)>,
        key: &str,
    ) -> Option<String> {
        let expired = matches!(entries.get(key), Some((_, Some(at))) if *at <= Instant::now());
        if expired {
            entries.remove(key);
        }
        entries.get(key).map(|(value, _)| value.clone())
    }

    fn check(&self) -> Result<(), String> {
        if self.should_fail {
            Err("Cache service error".to_string())
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl KeyValueCache for MockCache {
    async fn get(&self, key: &str) -> Result<Option<String>, String> {
        self.check()?;
        Ok(self.live(&mut self.entries.lock().unwrap(), key))
    }

    async fn set_with_expiry(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<(), String> {
        self.check()?;
        if matches!(&self.failing_writes, Some(fragment) if key.contains(fragment.as_str())) {
            return Err("ERR invalid expire time in 'setex' command".to_string());
        }
        let at = Instant::now() + Duration::from_secs(ttl_seconds);
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), Some(at)));
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), String> {
        self.check()?;
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, String> {
        self.check()?;
        Ok(self.live(&mut self.entries.lock().unwrap(), key).is_some())
    }

    async fn ttl(&self, key: &str) -> Result<Option<i64>, String> {
        self.check()?;
        let mut entries = self.entries.lock().unwrap();
        if self.live(&mut entries, key).is_none() {
            return Ok(None);
        }
        Ok(entries.get(key).and_then(|(_, at)| {
            at.map(|at| at.saturating_duration_since(Instant::now()).as_secs() as i64)
        }))
    }

    async fn increment(&self, key: &str) -> Result<i64, String> {
        self.check()?;
        let mut entries = self.entries.lock().unwrap();
        let current = self.live(&mut entries, key);
        let next = current
            .as_deref()
            .map(|v| v.parse::<i64>().map_err(|e| e.to_string()))
            .transpose()?
            .unwrap_or(0)
            + 1;
        let expiry = entries.get(key).and_then(|(_, at)| *at);
        entries.insert(key.to_string(), (next.to_string(), expiry));
        Ok(next)
    }

    async fn expire(&self, key: &str, ttl_seconds: u64) -> Result<bool, String> {
        self.check()?;
        let mut entries = self.entries.lock().unwrap();
        if self.live(&mut entries, key).is_none() {
            return Ok(false);
        }
        if let Some(entry) = entries.get_mut(key) {
            entry.1 = Some(Instant::now() + Duration::from_secs(ttl_seconds));
        }
        Ok(true)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

pub struct MockMailSender {
    pub sent: Arc<Mutex<Vec<SentMail>>>,
    pub should_fail: bool,
}

impl MockMailSender {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailSender for MockMailSender {
    async fn send_mail(&self, from: &str, to: &str, subject: &str, body: &str) -> Result<(), String> {
        if self.should_fail {
            return Err("SMTP relay unavailable".to_string());
        }
        self.sent.lock().unwrap().push(SentMail {
            from: from.to_string(),
            to: to.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
        });
        Ok(())
    }
}

pub struct MockMessageSender {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub should_fail: bool,
}

impl MockMessageSender {
    pub fn new(should_fail: bool) -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageSender for MockMessageSender {
    async fn send_message(&self, to: &str, body: &str) -> Result<String, String> {
        if self.should_fail {
            return Err("provider rejected message".to_string());
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((to.to_string(), body.to_string()));
        Ok(format!("mock-msg-{}", sent.len()))
    }
}

/// Signer producing fake URLs; existence answers come from `existing`
pub struct MockStorageSigner {
    pub requests: Arc<Mutex<Vec<SignRequest>>>,
    pub existing: Arc<Mutex<Vec<String>>>,
    pub should_fail: bool,
}

impl MockStorageSigner {
    pub fn new(should_fail: bool) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            existing: Arc::new(Mutex::new(Vec::new())),
            should_fail,
        }
    }

    pub fn mark_existing(&self, object_key: &str) {
        self.existing.lock().unwrap().push(object_key.to_string());
    }

    pub fn requests(&self) -> Vec<SignRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl StorageSigner for MockStorageSigner {
    async fn sign_url(&self, request: SignRequest) -> Result<String, String> {
        if self.should_fail {
            return Err("signing key unavailable".to_string());
        }
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

    async fn object_exists(&self, _bucket: &str, object_key: &str) -> Result<bool, String> {
        if self.should_fail {
            return Err("storage unavailable".to_string());
        }
        Ok(self.existing.lock().unwrap().iter().any(|k| k == object_key))
    }
}
