//! # Record Trait
//!
//! The `Record` trait is the contract every stored resource (profile, project, skill, …)
//! implements to be managed by the generic `ResourceActor`. It names the associated types
//! for ids, create/update payloads, list filters, actions, injected context and errors, and
//! provides lifecycle hooks (`on_create`, `on_update`, `on_delete`, `handle_action`).
//!
//! Three synchronous hooks shape the collection as a whole rather than a single record:
//!
//! - [`Record::check_unique`] runs against every other stored record before a create or an
//!   update is committed, so uniqueness constraints hold without any locking.
//! - [`Record::matches`] decides membership for filtered `list` and `delete_where` requests.
//! - [`Record::ordering`] is the default ordering of `list` results. Records that compare
//!   equal keep id order.
//!
//! All provided methods default to "no constraint": everything is unique, every filter
//! matches and every record compares equal.

use async_trait::async_trait;
use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any stored resource must implement to be managed by `ResourceActor`.
///
/// The trait is `#[async_trait]` so hooks may call other actors through clients carried
/// in `Context`. The context is handed to `ResourceActor::run`, not to the constructor,
/// which lets actors be created first and wired afterwards.
#[async_trait]
pub trait Record: Clone + Send + Sync + 'static {
    /// The unique identifier for this record.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new record.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing record.
    type Update: Send + Sync + Debug;

    /// Selection criteria for `list` and `delete_where`. Use [`NoFilter`] when unused.
    type Filter: Send + Sync + Debug;

    /// Record-specific operations that do not fit CRUD. Use [`NoAction`] when unused.
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// The error type for this record. One enum covers every operation of the actor.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Construct the full record from the ID and payload.
    /// This is called synchronously before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Rejects `self` if it collides with `other` on a unique key.
    fn check_unique(&self, _other: &Self) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Whether this record is selected by `filter`.
    fn matches(&self, _filter: &Self::Filter) -> bool {
        true
    }

    /// Default ordering of `list` results.
    fn ordering(&self, _other: &Self) -> Ordering {
        Ordering::Equal
    }

    // --- Lifecycle Hooks (Async) ---

    /// Called after the record is built and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update. The actor calls this on a copy and only commits it on success.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the record is removed. Cascades live here.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom record-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

/// Filter type for records that are only ever listed in full.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoFilter {}

/// Action type for records without custom actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoAction {}
