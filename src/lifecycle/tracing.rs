//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global subscriber. Levels come from `RUST_LOG`, the
//! crate/module prefix is hidden (`with_target(false)`) because actors log an
//! `entity_type` field instead.
//!
//! ```bash
//! RUST_LOG=info cargo run
//! # Full payloads at every client call
//! RUST_LOG=debug cargo run
//! # HTTP request spans from tower-http
//! RUST_LOG=info,tower_http=debug cargo run
//! ```
//!
//! With `RUST_LOG=info` a profile delete shows its cascade:
//!
//! ```text
//! INFO Deleted matching entity_type="Project" count=2 size=0
//! INFO Deleted matching entity_type="Skill" count=3 size=0
//! INFO Deleted matching entity_type="Experience" count=1 size=0
//! INFO Cascaded profile delete owner=profile_1 projects=2 skills=3 experiences=1
//! INFO Deleted entity_type="Profile" id=profile_1 size=0
//! ```
//!
//! `LogFormat::Json` switches to one JSON object per line for log collectors.

use crate::config::LogFormat;
use tracing_subscriber::EnvFilter;

pub fn setup_tracing(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false);

    match format {
        LogFormat::Compact => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
}
