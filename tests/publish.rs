//! Secret publishing against an in-memory store.

mod support;
use support::*;

use sealpost::core::domain::Secret;
use sealpost::core::publish::publish_secret;
use sealpost::error::{ApiError, Error, SealError};

#[test]
fn test_publish_stores_value_under_key_id() {
    let store = MockStore::new("k1");
    let secret = Secret::new("SSH_PASSWORD", "p@ss").unwrap();

    publish_secret(&store, &acme_infra(), &secret).unwrap();

    let stored = store.stored("SSH_PASSWORD").unwrap();
    assert_eq!(stored.key_id, "k1");
    assert_ne!(stored.encrypted_value, "p@ss");
    assert_eq!(store.opened("SSH_PASSWORD").as_deref(), Some("p@ss"));
    assert_eq!(
        store.calls(),
        vec![Call::PublicKey, Call::PutSecret("SSH_PASSWORD".to_string())]
    );
}

#[test]
fn test_key_fetch_failure_uploads_nothing() {
    let store = MockStore::new("k1");
    store.fail_key_fetch(404);
    let secret = Secret::new("SSH_PASSWORD", "p@ss").unwrap();

    let err = publish_secret(&store, &acme_infra(), &secret).unwrap_err();

    assert!(matches!(
        err,
        Error::Api(ApiError::Remote { status: 404, .. })
    ));
    assert_eq!(store.uploads(), 0);
}

#[test]
fn test_malformed_key_uploads_nothing() {
    let store = MockStore::new("k1");
    store.break_key();
    let secret = Secret::new("SSH_PASSWORD", "p@ss").unwrap();

    let err = publish_secret(&store, &acme_infra(), &secret).unwrap_err();

    assert!(matches!(err, Error::Seal(SealError::InvalidKeyFormat(_))));
    assert_eq!(store.uploads(), 0);
}

#[test]
fn test_upload_failure_is_reported() {
    let store = MockStore::new("k1");
    store.fail_secret("SSH_PASSWORD");
    let secret = Secret::new("SSH_PASSWORD", "p@ss").unwrap();

    let err = publish_secret(&store, &acme_infra(), &secret).unwrap_err();

    assert!(matches!(err, Error::Api(ApiError::Remote { status: 500, .. })));
    assert!(store.stored("SSH_PASSWORD").is_none());
}

#[test]
fn test_republish_replaces_value() {
    let store = MockStore::new("k1");
    let repo = acme_infra();

    publish_secret(&store, &repo, &Secret::new("AWS_SECRET_KEY", "old").unwrap()).unwrap();
    publish_secret(&store, &repo, &Secret::new("AWS_SECRET_KEY", "new").unwrap()).unwrap();

    assert_eq!(store.opened("AWS_SECRET_KEY").as_deref(), Some("new"));
}

#[test]
fn test_key_fetched_fresh_after_rotation() {
    let store = MockStore::new("k1");
    let repo = acme_infra();

    publish_secret(&store, &repo, &Secret::new("A", "1").unwrap()).unwrap();
    store.rotate("k2");
    publish_secret(&store, &repo, &Secret::new("B", "2").unwrap()).unwrap();

    assert_eq!(store.stored("A").unwrap().key_id, "k1");
    assert_eq!(store.stored("B").unwrap().key_id, "k2");
    assert_eq!(store.opened("B").as_deref(), Some("2"));
}
