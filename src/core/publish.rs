//! Secret publishing protocol.
//!
//! ```text
//! FetchKey ──> Seal ──> Upload
//! ```
//!
//! Linear, no retries. Any failure stops the sequence: a failed key fetch
//! means nothing is sealed, a failed seal means nothing is uploaded. The key
//! is fetched fresh for every secret so a value is always uploaded with the
//! id of the key that sealed it.

use tracing::{debug, info};

use crate::core::api::Provider;
use crate::core::domain::{Repo, SealedSecret, Secret};
use crate::core::seal;
use crate::error::Result;

/// Seal `secret` with the repository's current key and upload it,
/// replacing any previous value under the same name.
///
/// # Errors
///
/// Returns `ApiError` if the key fetch or upload fails, or `SealError` if
/// the fetched key is malformed.
pub fn publish_secret<P: Provider>(provider: &P, repo: &Repo, secret: &Secret) -> Result<()> {
    debug!(repo = %repo, secret = secret.name(), "publishing secret");

    let key = provider.public_key(repo)?;

    let encrypted_value = seal::seal(&key.key, secret.expose().as_bytes())?;
    debug!(secret = secret.name(), key_id = %key.key_id, "sealed");

    let sealed = SealedSecret {
        encrypted_value,
        key_id: key.key_id,
    };
    provider.put_secret(repo, secret.name(), &sealed)?;

    info!(repo = %repo, secret = secret.name(), "secret published");
    Ok(())
}
