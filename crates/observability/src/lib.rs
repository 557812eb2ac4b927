//! Process-wide logging setup shared by the cattery binaries and tests.

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use self::tracing::{init, init_for_tests};
