//! End-to-end checks for the book and order services.
//!
//! [`fixtures::reset_state`] puts both services into a known state and
//! [`scenario::run_order_lifecycle`] walks one order through
//! create, stock check, status update, delete and listing. Each check
//! fails fast with a [`ScenarioError`] naming the step.

pub mod config;
pub mod errors;
pub mod fixtures;
pub mod scenario;

pub use config::E2eConfig;
pub use errors::{ScenarioError, Step};
pub use fixtures::{reset_state, BookFixture};
pub use scenario::{run_order_lifecycle, run_suite, LifecycleParams, LifecycleReport};
