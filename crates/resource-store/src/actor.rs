//! # Generic Actor Server
//!
//! `ResourceActor` owns the records of one resource type and processes requests for them
//! one at a time. Sequential processing is what makes uniqueness checks and cascades
//! consistent without any lock around the store.

use crate::client::ResourceClient;
use crate::error::StoreError;
use crate::message::ResourceRequest;
use crate::record::Record;
use std::collections::BTreeMap;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The generic actor that manages a collection of records.
///
/// # Usage Pattern
///
/// 1.  **Create**: Call `ResourceActor::new()` to get the `actor` (server) and `client`.
/// 2.  **Wire**: Pass dependencies (other clients) into `actor.run(context)`.
/// 3.  **Run**: Spawn the run loop in a background task.
///
/// ```rust
/// use async_trait::async_trait;
/// use resource_store::{NoAction, NoFilter, Record, ResourceActor};
///
/// #[derive(Clone, Debug)]
/// struct Note { id: u32, text: String }
/// #[derive(Debug)] struct NoteCreate { text: String }
/// #[derive(Debug)] struct NoteUpdate;
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl Record for Note {
///     type Id = u32;
///     type Create = NoteCreate;
///     type Update = NoteUpdate;
///     type Filter = NoFilter;
///     type Action = NoAction;
///     type ActionResult = ();
///     type Context = ();
///     type Error = NoteError;
///
///     fn from_create_params(id: u32, params: NoteCreate) -> Result<Self, NoteError> {
///         Ok(Self { id, text: params.text })
///     }
///     async fn on_update(&mut self, _: NoteUpdate, _: &()) -> Result<(), NoteError> { Ok(()) }
///     async fn handle_action(&mut self, action: NoAction, _: &()) -> Result<(), NoteError> {
///         match action {}
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (actor, client) = ResourceActor::<Note>::new(10);
///     tokio::spawn(actor.run(()));
///
///     let note = client.create(NoteCreate { text: "hello".into() }).await.unwrap();
///     assert_eq!(note.id, 1);
///     assert_eq!(client.list(None).await.unwrap().len(), 1);
/// }
/// ```
///
/// # Implementation Details
///
/// The actor keeps a `BTreeMap` from id to record and a `u32` counter (`next_id`).
///
/// * **Create**: takes the next id, builds the record with `from_create_params`, checks it
///   against every stored record with `check_unique`, runs `on_create`, stores it and
///   returns the stored record. A failed create still consumes its id.
/// * **Get**: returns a clone of the record, or `None`.
/// * **List**: clones every record selected by the filter in id order, then stable-sorts
///   them with `ordering`.
/// * **Update**: runs `on_update` on a copy, re-checks uniqueness against the other
///   records and only then replaces the stored record. A rejected update leaves the
///   record untouched.
/// * **Delete**: runs `on_delete` (cascades) and removes the record.
/// * **DeleteWhere**: deletes every record selected by the filter and returns the count.
/// * **Action**: runs `handle_action` on the stored record.
pub struct ResourceActor<T: Record> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id: u32,
}

impl<T: Record> ResourceActor<T> {
    /// Creates a new `ResourceActor` and its associated `ResourceClient`.
    ///
    /// `buffer_size` is the capacity of the request channel. When it is full, client calls
    /// wait for space.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id: 1,
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs the actor's event loop until every client has been dropped.
    ///
    /// `context` is handed to every record hook.
    pub async fn run(mut self, context: T::Context) {
        // Extract just the type name (e.g., "Project" instead of "portfolio_backend::model::project::Project")
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    let result = self.create(params, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, size = self.store.len(), "Created"),
                        Err(e) => warn!(entity_type, error = %e, "Create failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    let found = item.is_some();
                    debug!(entity_type, %id, found, "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { filter, respond_to } => {
                    let items = self.list(filter.as_ref());
                    debug!(entity_type, ?filter, count = items.len(), "List");
                    let _ = respond_to.send(Ok(items));
                }
                ResourceRequest::Update {
                    id,
                    update,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let result = self.update(&id, update, &context).await;
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Updated"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Delete { id, respond_to } => {
                    debug!(entity_type, %id, "Delete");
                    let result = self.delete(&id, &context).await;
                    match &result {
                        Ok(()) => info!(entity_type, %id, size = self.store.len(), "Deleted"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::DeleteWhere { filter, respond_to } => {
                    debug!(entity_type, ?filter, "DeleteWhere");
                    let result = self.delete_where(&filter, &context).await;
                    match &result {
                        Ok(count) => info!(entity_type, count, size = self.store.len(), "Deleted matching"),
                        Err(e) => warn!(entity_type, error = %e, "DeleteWhere failed"),
                    }
                    let _ = respond_to.send(result);
                }
                ResourceRequest::Action {
                    id,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %id, ?action, "Action");
                    if let Some(item) = self.store.get_mut(&id) {
                        let result = item
                            .handle_action(action, &context)
                            .await
                            .map_err(|e| StoreError::Rejected(Box::new(e)));
                        match &result {
                            Ok(_) => info!(entity_type, %id, "Action ok"),
                            Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                        }
                        let _ = respond_to.send(result);
                    } else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(StoreError::NotFound(id.to_string())));
                    }
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }

    async fn create(&mut self, params: T::Create, context: &T::Context) -> Result<T, StoreError> {
        let id = T::Id::from(self.next_id);
        self.next_id += 1;

        let mut item = T::from_create_params(id.clone(), params).map_err(rejected)?;
        self.check_unique(&item, None)?;
        item.on_create(context).await.map_err(rejected)?;
        self.store.insert(id, item.clone());
        Ok(item)
    }

    fn list(&self, filter: Option<&T::Filter>) -> Vec<T> {
        let mut items: Vec<T> = self
            .store
            .values()
            .filter(|item| filter.map_or(true, |f| item.matches(f)))
            .cloned()
            .collect();
        items.sort_by(|a, b| a.ordering(b));
        items
    }

    async fn update(
        &mut self,
        id: &T::Id,
        update: T::Update,
        context: &T::Context,
    ) -> Result<T, StoreError> {
        let mut candidate = self
            .store
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        candidate.on_update(update, context).await.map_err(rejected)?;
        self.check_unique(&candidate, Some(id))?;
        self.store.insert(id.clone(), candidate.clone());
        Ok(candidate)
    }

    async fn delete(&mut self, id: &T::Id, context: &T::Context) -> Result<(), StoreError> {
        let item = self
            .store
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        item.on_delete(context).await.map_err(rejected)?;
        self.store.remove(id);
        Ok(())
    }

    async fn delete_where(
        &mut self,
        filter: &T::Filter,
        context: &T::Context,
    ) -> Result<usize, StoreError> {
        let ids: Vec<T::Id> = self
            .store
            .iter()
            .filter(|(_, item)| item.matches(filter))
            .map(|(id, _)| id.clone())
            .collect();
        for id in &ids {
            self.delete(id, context).await?;
        }
        Ok(ids.len())
    }

    fn check_unique(&self, candidate: &T, skip: Option<&T::Id>) -> Result<(), StoreError> {
        self.store
            .iter()
            .filter(|(id, _)| Some(*id) != skip)
            .try_for_each(|(_, existing)| candidate.check_unique(existing))
            .map_err(rejected)
    }
}

fn rejected<E: std::error::Error + Send + Sync + 'static>(e: E) -> StoreError {
    StoreError::Rejected(Box::new(e))
}
