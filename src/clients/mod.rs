//! Typed clients over the record actors.
//!
//! Each client wraps a [`ResourceClient`](resource_store::ResourceClient) and implements
//! [`ActorClient`](resource_store::ActorClient). Clients whose records point at other
//! records check those references before forwarding a write.

pub mod experience_client;
pub mod message_client;
pub mod profile_client;
pub mod project_client;
pub mod skill_client;
pub mod technology_client;

pub use experience_client::*;
pub use message_client::*;
pub use profile_client::*;
pub use project_client::*;
pub use skill_client::*;
pub use technology_client::*;

use crate::error::{FieldErrors, PortfolioError};
use crate::model::{Profile, ProfileId};
use resource_store::ResourceClient;

pub(crate) fn missing_pk(id: u32) -> String {
    format!("Invalid pk \"{id}\" - object does not exist.")
}

/// Records a `user` error when the owning profile does not exist.
pub(crate) async fn check_owner(
    profiles: &ResourceClient<Profile>,
    owner: ProfileId,
    errors: &mut FieldErrors,
) -> Result<(), PortfolioError> {
    if profiles.get(owner).await?.is_none() {
        errors.add("user", missing_pk(owner.0));
    }
    Ok(())
}
