// ============================================================
// Application Layer
// ============================================================
// Workflows that tie the other layers together. No drawing,
// audio, or serialisation code lives here, only the order in
// which those pieces are called.

/// Load a cached model or fit, persist, and chart a new one
pub mod load_or_fit;

pub use load_or_fit::{FitData, ModelPersistence, PersistenceConfig};
