//! Tracing and logging (shared setup).

/// Initialize process-wide observability (tracing/logging), falling back to
/// `default_filter` when `RUST_LOG` is unset.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init_with_default(default_filter: &str) {
    tracing::init(default_filter);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
