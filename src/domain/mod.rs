// ============================================================
// Domain Layer
// ============================================================
// Plain Rust types and traits describing what a training run
// produces and what the persistence helper needs from a model.
//
// Rules for this layer:
//   - NO burn framework types allowed here
//   - NO file I/O
//   - Only plain structs, enums, and traits
//
// The burn-specific adapter lives in the ml layer and only
// implements the traits declared here.

/// Per-epoch metric series plus run parameters
pub mod history;

/// Artifact formats, artifact paths, and the save contract
pub mod artifact;

/// Seams for chart display and audio alerts
pub mod traits;
