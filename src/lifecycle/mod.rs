//! Process lifecycle: starting and stopping the actors, and logging setup.

pub mod portfolio_system;
pub mod tracing;

pub use portfolio_system::{PortfolioClients, PortfolioSystem};
pub use self::tracing::setup_tracing;
