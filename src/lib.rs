//! ptmlib: helpers for machine-learning experiment drivers.
//!
//! - [`CpuCount`]: how many worker processes to use
//! - [`Stopwatch`]: time a long task and play a sound when it ends
//! - [`ChartRenderer`]: PNG line charts of training history, shown in a
//!   window when built with the `gui` feature
//! - [`ModelPersistence`]: load a cached model, or fit, save and chart it
//!
//! ```no_run
//! use ptmlib::{FitData, ModelPersistence, PersistenceConfig, TrainingHistory};
//! # use ptmlib::{Artifact, ArtifactPath};
//! # struct Model;
//! # impl Artifact for Model {
//! #     fn save(&self, _: &ArtifactPath) -> anyhow::Result<()> { Ok(()) }
//! # }
//! let inputs = vec![0.0_f64; 16];
//! let mut cache = ModelPersistence::new(PersistenceConfig {
//!     epochs: 5,
//!     ..PersistenceConfig::default()
//! });
//!
//! let (model, history) = cache.load_or_fit(
//!     Model,
//!     "baseline",
//!     FitData::new(&inputs),
//!     |_path| Ok(Model),
//!     |model, _data, epochs| {
//!         let mut history = TrainingHistory::new().with_param("epochs", epochs);
//!         for e in 0..epochs {
//!             history.push_epoch([("loss", 1.0 / (e + 1) as f64)]);
//!         }
//!         Ok((model, history))
//!     },
//! )?;
//! # Ok::<(), ptmlib::PtmError>(())
//! ```

pub mod application;
pub mod charts;
pub mod domain;
pub mod error;
pub mod infra;
pub mod ml;
pub mod timer;

pub use application::{FitData, ModelPersistence, PersistenceConfig};
pub use charts::{default_viewer, ChartRenderer, FigureSize, LogViewer, NullViewer};
#[cfg(feature = "gui")]
pub use charts::WindowViewer;
pub use domain::artifact::{Artifact, ArtifactFormat, ArtifactPath};
pub use domain::history::TrainingHistory;
pub use domain::traits::{AlertPlayer, ChartViewer};
pub use error::{PtmError, Result};
pub use infra::cpu::CpuCount;
pub use infra::history_store::HistoryStore;
pub use ml::{burn_loader, BurnArtifact};
pub use timer::{AlertChain, AlertSounds, Stopwatch, StopwatchConfig};
