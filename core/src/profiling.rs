//! Profiling utilities for placeholder rendering and batch execution
//!
//! Integrates with the puffin profiler when the "profiling" feature is enabled.

/// Re-export puffin macros for convenience
#[cfg(feature = "profiling")]
pub use puffin::{profile_function, profile_scope};

/// Profiling scope for a named operation.
#[macro_export]
macro_rules! bulk_profile_scope {
    ($category:literal, $operation:literal) => {
        #[cfg(feature = "profiling")]
        ::puffin::profile_scope!($category, $operation);
    };
}
