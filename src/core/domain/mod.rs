//! Domain types.

mod dispatch;
mod public_key;
mod repo;
mod secret;
mod submission;

pub use dispatch::WorkflowDispatch;
pub use public_key::RepoPublicKey;
pub use repo::Repo;
pub use secret::{SealedSecret, Secret};
pub use submission::Submission;
