//! Asynchronous session processing
//!
//! Settles independent sessions concurrently. The settlement engine itself is
//! synchronous and stateless; these components only fan sessions out to tokio
//! tasks and gather their outcomes.
//!
//! - **AsyncSessionStore**: Thread-safe outcome storage using DashMap
//! - **BatchProcessor**: Spawns one task per session and collects outcomes in order

pub mod batch_processor;
pub mod session_store;

pub use batch_processor::BatchProcessor;
pub use session_store::{AsyncSessionStore, SessionOutcome};
