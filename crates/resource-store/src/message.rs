//! # Generic Messages
//!
//! Request types exchanged between `ResourceClient` and `ResourceActor`.

use crate::error::StoreError;
use crate::record::Record;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel used by actors.
pub type Response<T> = oneshot::Sender<Result<T, StoreError>>;

/// Message sent to a `ResourceActor`.
///
/// The variants cover the lifecycle of a stored resource: `Create`, `Get`, `List`,
/// `Update`, `Delete`, bulk `DeleteWhere`, plus `Action` for record-specific mutations.
/// Payload types come from the [`Record`] associated types, so a project payload can never
/// reach the skill actor.
#[derive(Debug)]
pub enum ResourceRequest<T: Record> {
    Create {
        params: T::Create,
        respond_to: Response<T>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        filter: Option<T::Filter>,
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<()>,
    },
    DeleteWhere {
        filter: T::Filter,
        respond_to: Response<usize>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}
