// ============================================================
// Infrastructure Layer
// ============================================================
// Small host-facing helpers used by the other layers:
//
//   cpu.rs           — logical processor counts with headroom
//   clock.rs         — local-time strings for file names/output
//   history_store.rs — companion {name}_history.pkl files

/// Logical CPU counts
pub mod cpu;

/// Timestamp formatting
pub mod clock;

/// Training history persistence
pub mod history_store;
