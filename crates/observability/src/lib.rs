//! Process-wide logging setup for the admin binary.

/// Initialize process-wide tracing.
///
/// Safe to call multiple times; later calls are no-ops.
pub fn init() {
    tracing::init();
}

/// Subscriber configuration (filter, JSON formatter).
pub mod tracing;
