//! Stored record types and their create/update payloads.

pub mod contact_message;
pub mod experience;
pub mod ids;
pub mod profile;
pub mod project;
pub mod skill;
pub mod technology;

pub use contact_message::*;
pub use experience::*;
pub use ids::*;
pub use profile::*;
pub use project::*;
pub use skill::*;
pub use technology::*;

/// Selects the records owned by one profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OwnedBy(pub ProfileId);
