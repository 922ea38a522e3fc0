//! dashgate-core: job spec building and status normalization for an
//! external adaptive-bitrate transcoding pipeline.
//!
//! Everything in this crate is pure: it decomposes input keys, resolves
//! quality labels to presets, assembles [`JobRequest`]s in the pipeline's
//! wire shape, and classifies raw job records into [`JobStatus`]. Talking to
//! the pipeline is left to the caller.

pub mod error;
pub mod format;
pub mod job;
pub mod path;
pub mod profiles;
pub mod status;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use format::OutputFormat;
pub use job::{build, build_audio_only, EncodeOptions, JobRequest, OutputSpec, PlaylistSpec};
pub use path::{decompose, InputReference};
pub use profiles::{ProfileOverrides, ProfileRegistry, QualityProfile, DEFAULT_LABELS};
pub use status::{normalize, normalize_job, JobStatus, PipelineJob};
