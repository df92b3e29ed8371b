// ============================================================
// Domain — Artifacts
// ============================================================
// An artifact is a trained model persisted on disk. Its path is
// derived from a caller-chosen name and a format:
//
//   Compact   → {base_dir}/{name}.mpk.gz   (burn CompactRecorder)
//   Directory → {base_dir}/{name}          (saved-model directory)
//
// The path is the whole cache key: there is no content hash or
// version stamp, so reusing a name after changing training code
// or data silently reuses the stale artifact.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Extension written by burn's compact recorder
pub const COMPACT_EXTENSION: &str = "mpk.gz";

/// On-disk layout of a saved model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArtifactFormat {
    /// Single compressed record file
    #[default]
    Compact,
    /// Bare name, usually a directory managed by the saver
    Directory,
}

impl ArtifactFormat {
    /// Map a free-form format tag to a format.
    /// Only the directory-style tags are recognised; anything else
    /// falls back to the compact file.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "dir" | "directory" | "saved_model" | "tf_saved_model" => Self::Directory,
            _ => Self::Compact,
        }
    }

    /// File extension including the leading dot, or "" for directories
    pub fn extension(self) -> String {
        match self {
            Self::Compact   => format!(".{COMPACT_EXTENSION}"),
            Self::Directory => String::new(),
        }
    }
}

impl FromStr for ArtifactFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compact   => write!(f, "compact"),
            Self::Directory => write!(f, "directory"),
        }
    }
}

/// Where an artifact for a given name lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPath {
    base_dir: PathBuf,
    name:     String,
    format:   ArtifactFormat,
    path:     PathBuf,
}

impl ArtifactPath {
    pub fn for_name(
        base_dir: impl AsRef<Path>,
        name:     impl Into<String>,
        format:   ArtifactFormat,
    ) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let name     = name.into();
        let path     = base_dir.join(format!("{name}{}", format.extension()));
        Self { base_dir, name, format, path }
    }

    /// The caller-supplied name, without extension
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format(&self) -> ArtifactFormat {
        self.format
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// `{base_dir}/{name}` with no extension; savers that append
    /// their own extension should write here
    pub fn stem_path(&self) -> PathBuf {
        self.base_dir.join(&self.name)
    }

    /// Full path including the format's extension
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

/// A trained model that knows how to write itself to disk.
///
/// Loading is not part of the trait: the persistence helper takes
/// a separate load function so callers can rebuild the model with
/// whatever configuration or device they need.
pub trait Artifact {
    fn save(&self, target: &ArtifactPath) -> anyhow::Result<()>;
}
