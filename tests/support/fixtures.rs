//! In-memory provider and key fixtures.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use crypto_box::aead::OsRng;
use crypto_box::SecretKey;

use sealpost::core::api::Provider;
use sealpost::core::domain::{Repo, RepoPublicKey, SealedSecret, WorkflowDispatch};
use sealpost::core::seal;
use sealpost::error::{ApiError, Result};

/// A fresh recipient key pair: secret key plus base64 public key.
pub fn keypair() -> (SecretKey, String) {
    let secret = SecretKey::generate(&mut OsRng);
    let public = seal::encode_public_key(&secret.public_key());
    (secret, public)
}

/// The standard test repository.
pub fn acme_infra() -> Repo {
    Repo::new("acme", "infra").expect("valid repo")
}

/// One call made against [`MockStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    PublicKey,
    PutSecret(String),
    Dispatch(String),
}

/// In-memory secret store and workflow endpoint.
///
/// Holds a real key pair so tests can open what was uploaded.
pub struct MockStore {
    secret_key: RefCell<SecretKey>,
    key_id: RefCell<String>,
    calls: RefCell<Vec<Call>>,
    secrets: RefCell<BTreeMap<String, SealedSecret>>,
    dispatches: RefCell<Vec<(String, WorkflowDispatch)>>,
    fail_key_fetch: Cell<Option<u16>>,
    fail_secret: RefCell<Option<String>>,
    fail_dispatch: Cell<Option<u16>>,
    broken_key: Cell<bool>,
}

impl MockStore {
    pub fn new(key_id: &str) -> Self {
        Self {
            secret_key: RefCell::new(SecretKey::generate(&mut OsRng)),
            key_id: RefCell::new(key_id.to_string()),
            calls: RefCell::new(Vec::new()),
            secrets: RefCell::new(BTreeMap::new()),
            dispatches: RefCell::new(Vec::new()),
            fail_key_fetch: Cell::new(None),
            fail_secret: RefCell::new(None),
            fail_dispatch: Cell::new(None),
            broken_key: Cell::new(false),
        }
    }

    /// Make every key fetch fail with `status`.
    pub fn fail_key_fetch(&self, status: u16) {
        self.fail_key_fetch.set(Some(status));
    }

    /// Make the upload of `name` fail with a 500.
    pub fn fail_secret(&self, name: &str) {
        *self.fail_secret.borrow_mut() = Some(name.to_string());
    }

    /// Make dispatch answer `status` instead of succeeding.
    pub fn fail_dispatch(&self, status: u16) {
        self.fail_dispatch.set(Some(status));
    }

    /// Hand out a key that is not valid base64.
    pub fn break_key(&self) {
        self.broken_key.set(true);
    }

    /// Replace the key pair, as the remote does on rotation.
    pub fn rotate(&self, key_id: &str) {
        *self.secret_key.borrow_mut() = SecretKey::generate(&mut OsRng);
        *self.key_id.borrow_mut() = key_id.to_string();
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    /// Number of upload calls recorded.
    pub fn uploads(&self) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::PutSecret(_)))
            .count()
    }

    /// Stored sealed value for `name`.
    pub fn stored(&self, name: &str) -> Option<SealedSecret> {
        self.secrets.borrow().get(name).cloned()
    }

    /// Open the stored value for `name` with the current key.
    pub fn opened(&self, name: &str) -> Option<String> {
        let sealed = self.stored(name)?;
        let plain = seal::open(&self.secret_key.borrow(), &sealed.encrypted_value).ok()?;
        String::from_utf8(plain).ok()
    }

    pub fn dispatches(&self) -> Vec<(String, WorkflowDispatch)> {
        self.dispatches.borrow().clone()
    }
}

impl Provider for MockStore {
    fn public_key(&self, _repo: &Repo) -> Result<RepoPublicKey> {
        self.calls.borrow_mut().push(Call::PublicKey);

        if let Some(status) = self.fail_key_fetch.get() {
            return Err(ApiError::Remote {
                status,
                body: "key fetch failed".to_string(),
            }
            .into());
        }
        if self.broken_key.get() {
            return Ok(RepoPublicKey::new(self.key_id.borrow().as_str(), "%%%"));
        }

        let public = seal::encode_public_key(&self.secret_key.borrow().public_key());
        Ok(RepoPublicKey::new(self.key_id.borrow().as_str(), public))
    }

    fn put_secret(&self, _repo: &Repo, name: &str, sealed: &SealedSecret) -> Result<()> {
        self.calls.borrow_mut().push(Call::PutSecret(name.to_string()));

        if self.fail_secret.borrow().as_deref() == Some(name) {
            return Err(ApiError::Remote {
                status: 500,
                body: "upload failed".to_string(),
            }
            .into());
        }

        self.secrets
            .borrow_mut()
            .insert(name.to_string(), sealed.clone());
        Ok(())
    }

    fn dispatch_workflow(
        &self,
        _repo: &Repo,
        workflow_id: &str,
        request: &WorkflowDispatch,
    ) -> Result<()> {
        self.calls
            .borrow_mut()
            .push(Call::Dispatch(workflow_id.to_string()));

        if let Some(status) = self.fail_dispatch.get() {
            return Err(ApiError::Remote {
                status,
                body: "dispatch rejected".to_string(),
            }
            .into());
        }

        self.dispatches
            .borrow_mut()
            .push((workflow_id.to_string(), request.clone()));
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}
