// ============================================================
// ML Layer (Burn)
// ============================================================
// All burn-specific code lives here. The rest of the library
// only sees the Artifact trait and plain load/fit closures.
//
//   burn_artifact.rs — BurnArtifact (save via CompactRecorder)
//                      and burn_loader (matching load function)

/// Burn module adapter for load-or-fit caching
pub mod burn_artifact;

pub use burn_artifact::{burn_loader, BurnArtifact};
