//! # Portfolio Backend
//!
//! The backend of a personal portfolio site: a profile, projects, skills, work experience,
//! technologies and contact messages, served as JSON CRUD resources over HTTP.
//!
//! ## Layers
//!
//! Requests flow top to bottom:
//!
//! 1. **[`api`]**: routing under a common prefix, HTTP Basic authentication, the
//!    declarative permission table ([`api::policy`]) and one generic CRUD viewset per
//!    resource.
//! 2. **[`transfer`]**: explicit field lists that read and validate JSON bodies and
//!    render records, including the computed `profile_photo`.
//! 3. **[`clients`]**: typed clients that check references (owning profile, linked
//!    technologies, account) before forwarding writes.
//! 4. **Record actors** ([`profile_actor`], [`project_actor`], ...): one
//!    `resource_store::ResourceActor` per entity, holding the records and enforcing
//!    uniqueness, ordering and cascades.
//!
//! [`lifecycle::PortfolioSystem`] spawns and wires the actors; [`api::serve`] runs the
//! server until Ctrl-C.
//!
//! ## Permissions
//!
//! Reads of profile, projects, skills, experience and technologies are open. Every write
//! needs an authenticated caller, except that anyone may submit a contact message.
//! Reading or managing messages needs authentication.
//!
//! ## Running
//!
//! ```bash
//! PORTFOLIO_ADMIN_USERNAME=admin PORTFOLIO_ADMIN_PASSWORD=secret RUST_LOG=info cargo run
//! ```
//!
//! See [`config::Config`] for every `PORTFOLIO_*` variable.

pub mod accounts;
pub mod api;
pub mod clients;
pub mod config;
pub mod error;
pub mod experience_actor;
pub mod lifecycle;
pub mod message_actor;
pub mod model;
pub mod profile_actor;
pub mod project_actor;
pub mod skill_actor;
pub mod technology_actor;
pub mod transfer;
