//! Type-safe identifiers.
//!
//! Every stored record gets a `u32` newtype so a project id can never be passed where a
//! profile id is expected. On the wire they are plain integers.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

macro_rules! record_ids {
    ($($name:ident => $label:literal),* $(,)?) => {
        paste::paste! {
            $(
                #[doc = "Type-safe identifier for " $label " records."]
                #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
                #[serde(transparent)]
                pub struct [<$name Id>](pub u32);

                impl From<u32> for [<$name Id>] {
                    fn from(id: u32) -> Self {
                        Self(id)
                    }
                }

                impl Display for [<$name Id>] {
                    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                        write!(f, "{}_{}", $label, self.0)
                    }
                }
            )*
        }
    };
}

record_ids! {
    Account => "account",
    Profile => "profile",
    Technology => "technology",
    Project => "project",
    Skill => "skill",
    Experience => "experience",
    Message => "message",
}
