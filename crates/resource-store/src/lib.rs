//! # Resource Store
//!
//! Building blocks for an in-process record store built on the **Actor Model**: one
//! `ResourceActor` per resource type owns its records and serves CRUD requests from
//! cloneable `ResourceClient`s over Tokio channels.
//!
//! ## Layers
//!
//! 1. **Record Layer** ([`Record`]) - the stored type, its payloads and its hooks
//! 2. **Runtime Layer** ([`ResourceActor`]) - sequential request processing over the store
//! 3. **Interface Layer** ([`ResourceClient`], [`ActorClient`]) - typed async access
//!
//! A record type writes its rules once (construction, uniqueness, filtering, ordering,
//! cascades) and the actor applies them to every request.
//!
//! ## Context Injection
//!
//! Dependencies are injected when the actor starts, through `run(context)`, not when it is
//! constructed. All actors can be created first and then started with the clients of the
//! actors they depend on:
//!
//! ```rust,ignore
//! let (profile_actor, profiles) = ResourceActor::<Profile>::new(32);
//! let (project_actor, projects) = ResourceActor::<Project>::new(32);
//!
//! tokio::spawn(project_actor.run(()));
//! // Deleting a profile cascades to its projects through the injected client.
//! tokio::spawn(profile_actor.run(ProfileContext { projects: projects.clone() }));
//! ```
//!
//! Keep the dependency graph acyclic. An actor awaiting another actor that awaits it back
//! deadlocks, and a cycle of held clients keeps every channel open at shutdown.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task
//! - Requests are processed **sequentially** within an actor, so there is no lock on the store
//! - Different actors run in parallel
//!
//! ## Testing
//!
//! The [`mock`] module provides `MockClient`, which answers a real `ResourceClient` from
//! scripted expectations so client logic can be tested without spawning actors.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod error;
pub mod message;
pub mod mock;
pub mod record;

// Re-export core types for convenience
pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use error::StoreError;
pub use message::{ResourceRequest, Response};
pub use record::{NoAction, NoFilter, Record};
