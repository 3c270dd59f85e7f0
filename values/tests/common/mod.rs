//! Shared helpers for the array integration tests.

#![allow(dead_code)]

use ordarray_values::{ArrayValue, Key};

/// Routes `tracing` output to the test harness. Safe to call from every test.
pub fn init_test_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Snapshot of an array's entries in iteration order.
pub fn entries<V: Clone>(array: &ArrayValue<V>) -> Vec<(Key, V)> {
    array.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
}

pub fn ikey(n: i64) -> Key {
    Key::Int(n)
}

pub fn skey(s: &str) -> Key {
    Key::from(s)
}
