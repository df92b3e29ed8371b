// ============================================================
// Timer Layer
// ============================================================
//   stopwatch.rs — start/stop wall-clock timing with printed
//                  start, end, and elapsed lines
//   alert.rs     — ordered chain of audio players used to
//                  signal that a long task has finished

/// Start/stop timer for long-running tasks
pub mod stopwatch;

/// Completion sound players and the fallback chain
pub mod alert;

pub use alert::{AlertChain, AlertSounds};
pub use stopwatch::{Stopwatch, StopwatchConfig};
