//! Declarative permission table.
//!
//! Every resource and operation pair has exactly one entry. [`authorize`] is the only
//! place the table is read.

use crate::api::auth::Caller;
use crate::api::error::ApiError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Profile,
    Technologies,
    Projects,
    Skills,
    Experience,
    Messages,
}

impl Resource {
    pub const ALL: [Resource; 6] = [
        Resource::Profile,
        Resource::Technologies,
        Resource::Projects,
        Resource::Skills,
        Resource::Experience,
        Resource::Messages,
    ];

    /// Path segment under the API prefix.
    pub fn path(self) -> &'static str {
        match self {
            Resource::Profile => "profile",
            Resource::Technologies => "technologies",
            Resource::Projects => "projects",
            Resource::Skills => "skills",
            Resource::Experience => "experience",
            Resource::Messages => "messages",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Retrieve,
    Create,
    Update,
    PartialUpdate,
    Destroy,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::List,
        Operation::Retrieve,
        Operation::Create,
        Operation::Update,
        Operation::PartialUpdate,
        Operation::Destroy,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Anyone,
    Authenticated,
}

use Access::{Anyone, Authenticated};
use Operation::{Create, Destroy, List, PartialUpdate, Retrieve, Update};

macro_rules! read_open {
    ($resource:expr) => {
        [
            ($resource, List, Anyone),
            ($resource, Retrieve, Anyone),
            ($resource, Create, Authenticated),
            ($resource, Update, Authenticated),
            ($resource, PartialUpdate, Authenticated),
            ($resource, Destroy, Authenticated),
        ]
    };
}

const PROFILE: [(Resource, Operation, Access); 6] = read_open!(Resource::Profile);
const TECHNOLOGIES: [(Resource, Operation, Access); 6] = read_open!(Resource::Technologies);
const PROJECTS: [(Resource, Operation, Access); 6] = read_open!(Resource::Projects);
const SKILLS: [(Resource, Operation, Access); 6] = read_open!(Resource::Skills);
const EXPERIENCE: [(Resource, Operation, Access); 6] = read_open!(Resource::Experience);
/// Visitors may submit messages but not read them.
const MESSAGES: [(Resource, Operation, Access); 6] = [
    (Resource::Messages, List, Authenticated),
    (Resource::Messages, Retrieve, Authenticated),
    (Resource::Messages, Create, Anyone),
    (Resource::Messages, Update, Authenticated),
    (Resource::Messages, PartialUpdate, Authenticated),
    (Resource::Messages, Destroy, Authenticated),
];

pub const POLICY: [&[(Resource, Operation, Access)]; 6] =
    [&PROFILE, &TECHNOLOGIES, &PROJECTS, &SKILLS, &EXPERIENCE, &MESSAGES];

/// Required access for a pair. Pairs missing from the table need authentication.
pub fn required_access(resource: Resource, operation: Operation) -> Access {
    POLICY
        .iter()
        .flat_map(|rules| rules.iter())
        .find(|(r, o, _)| *r == resource && *o == operation)
        .map(|(_, _, access)| *access)
        .unwrap_or(Authenticated)
}

pub fn authorize(resource: Resource, operation: Operation, caller: &Caller) -> Result<(), ApiError> {
    match required_access(resource, operation) {
        Anyone => Ok(()),
        Authenticated if caller.is_authenticated() => Ok(()),
        Authenticated => {
            tracing::debug!(%resource, ?operation, "Rejected anonymous caller");
            Err(ApiError::not_authenticated())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AccountId;

    #[test]
    fn test_table_covers_every_pair_exactly_once() {
        for resource in Resource::ALL {
            for operation in Operation::ALL {
                let count = POLICY
                    .iter()
                    .flat_map(|rules| rules.iter())
                    .filter(|(r, o, _)| *r == resource && *o == operation)
                    .count();
                assert_eq!(count, 1, "{resource} {operation:?}");
            }
        }
    }

    #[test]
    fn test_messages_accept_anonymous_submissions_only() {
        let anonymous = Caller::Anonymous;
        assert!(authorize(Resource::Messages, Create, &anonymous).is_ok());
        for operation in [List, Retrieve, Update, PartialUpdate, Destroy] {
            assert!(authorize(Resource::Messages, operation, &anonymous).is_err());
        }
    }

    #[test]
    fn test_content_reads_are_open_and_writes_are_not() {
        let anonymous = Caller::Anonymous;
        let owner = Caller::Account(AccountId(1));
        for resource in Resource::ALL.into_iter().filter(|r| *r != Resource::Messages) {
            assert!(authorize(resource, List, &anonymous).is_ok());
            assert!(authorize(resource, Retrieve, &anonymous).is_ok());
            for operation in [Create, Update, PartialUpdate, Destroy] {
                let err = authorize(resource, operation, &anonymous).unwrap_err();
                assert_eq!(err.code(), "NOT_AUTHENTICATED");
                assert!(authorize(resource, operation, &owner).is_ok());
            }
        }
    }
}
