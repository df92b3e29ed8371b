// ============================================================
// ML — Burn Artifact Adapter
// ============================================================
// Lets any burn Module take part in load-or-fit caching.
//
//   save → CompactRecorder writes {base_dir}/{name}.mpk.gz
//          (MessagePack, gzip, half precision)
//   load → burn_loader() restores the record into a freshly
//          initialised module of the same architecture
//
// Only ArtifactFormat::Compact is supported. The recorder sets
// the file extension itself, so artifact names must not contain
// a dot.

use anyhow::{bail, Context};
use burn::{module::Module, record::CompactRecorder, tensor::backend::Backend};

use crate::domain::artifact::{Artifact, ArtifactFormat, ArtifactPath};
use crate::error::PtmError;

/// A burn module plus the device it lives on
#[derive(Debug)]
pub struct BurnArtifact<B: Backend, M: Module<B>> {
    module: M,
    device: B::Device,
}

impl<B: Backend, M: Module<B>> BurnArtifact<B, M> {
    pub fn new(module: M, device: B::Device) -> Self {
        Self { module, device }
    }

    pub fn module(&self) -> &M {
        &self.module
    }

    pub fn device(&self) -> &B::Device {
        &self.device
    }

    /// Unwrap the module, e.g. to run inference after a load
    pub fn into_module(self) -> M {
        self.module
    }
}

/// Both save and load reject anything but Compact, and names
/// the recorder would mangle.
fn check_target(target: &ArtifactPath) -> anyhow::Result<()> {
    if target.format() != ArtifactFormat::Compact {
        return Err(PtmError::UnsupportedFormat {
            format: target.format(),
            path:   target.path().to_path_buf(),
        }
        .into());
    }
    if target.name().contains('.') {
        bail!("artifact name '{}' must not contain '.'", target.name());
    }
    Ok(())
}

impl<B: Backend, M: Module<B>> Artifact for BurnArtifact<B, M> {
    fn save(&self, target: &ArtifactPath) -> anyhow::Result<()> {
        check_target(target)?;

        // stem path: the recorder appends .mpk.gz itself
        self.module
            .clone()
            .save_file(target.stem_path(), &CompactRecorder::new())
            .with_context(|| format!("Failed to save model to '{}'", target.path().display()))?;

        tracing::debug!("Saved burn module to '{}'", target.path().display());
        Ok(())
    }
}

/// Build a load function for `ModelPersistence::load_or_fit`.
///
/// `template` must have the same architecture as the saved
/// module; its weights are replaced by the recorded ones.
pub fn burn_loader<B: Backend, M: Module<B>>(
    template: M,
    device:   B::Device,
) -> impl FnOnce(&ArtifactPath) -> anyhow::Result<BurnArtifact<B, M>> {
    move |target: &ArtifactPath| {
        check_target(target)?;

        let module = template
            .load_file(target.stem_path(), &CompactRecorder::new(), &device)
            .with_context(|| {
                format!(
                    "Cannot load model '{}'. Does the architecture match the saved one?",
                    target.path().display()
                )
            })?;

        tracing::info!("Loaded burn module from '{}'", target.path().display());
        Ok(BurnArtifact::new(module, device))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;
    use burn::nn::{Linear, LinearConfig};

    type TestBackend = NdArray;

    fn weights(linear: &Linear<TestBackend>) -> Vec<f32> {
        linear.weight.val().into_data().to_vec::<f32>().unwrap()
    }

    #[test]
    fn test_save_then_load_restores_weights() {
        let dir    = tempfile::tempdir().unwrap();
        let device: <TestBackend as Backend>::Device = Default::default();
        let target = ArtifactPath::for_name(dir.path(), "linear", ArtifactFormat::Compact);

        let trained: Linear<TestBackend> = LinearConfig::new(4, 3).init(&device);
        let expected = weights(&trained);
        BurnArtifact::new(trained, device.clone()).save(&target).unwrap();
        assert!(target.exists(), "expected {}", target.path().display());

        let fresh: Linear<TestBackend> = LinearConfig::new(4, 3).init(&device);
        let loaded = burn_loader(fresh, device.clone())(&target).unwrap();
        assert_eq!(loaded.device(), &device);
        assert_eq!(weights(loaded.module()).len(), expected.len());
        let actual = weights(&loaded.into_module());

        // half-precision record: compare with a tolerance
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(&expected) {
            assert!((a - e).abs() < 1e-2, "{a} vs {e}");
        }
    }

    #[test]
    fn test_directory_format_is_rejected() {
        let dir    = tempfile::tempdir().unwrap();
        let device: <TestBackend as Backend>::Device = Default::default();
        let target = ArtifactPath::for_name(dir.path(), "linear", ArtifactFormat::Directory);

        let linear: Linear<TestBackend> = LinearConfig::new(2, 2).init(&device);
        let err = BurnArtifact::new(linear, device).save(&target).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PtmError>(),
            Some(PtmError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_dotted_names_are_rejected() {
        let dir    = tempfile::tempdir().unwrap();
        let device: <TestBackend as Backend>::Device = Default::default();
        let target = ArtifactPath::for_name(dir.path(), "model.v2", ArtifactFormat::Compact);

        let linear: Linear<TestBackend> = LinearConfig::new(2, 2).init(&device);
        assert!(BurnArtifact::new(linear, device).save(&target).is_err());
    }
}
