//! Job status normalization.
//!
//! The pipeline owns the real job state machine. This module only classifies
//! a snapshot of it into [`JobStatus`] and, for finished jobs, derives where
//! the manifest was written. Anything outside the known vocabulary is an
//! error rather than a pass-through.

use serde::Deserialize;
use std::fmt;

use crate::error::{Error, Result};
use crate::format::OutputFormat;

/// Client-facing status of a transcoding job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobStatus {
    Submitted,
    Progressing,
    /// Finished; the manifest is at `manifest_path` relative to the bucket.
    Complete { manifest_path: String },
    Canceled,
    Error,
}

impl JobStatus {
    /// Status name as exposed to clients (identical to the pipeline's).
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Submitted => "Submitted",
            JobStatus::Progressing => "Progressing",
            JobStatus::Complete { .. } => "Complete",
            JobStatus::Canceled => "Canceled",
            JobStatus::Error => "Error",
        }
    }

    pub fn manifest_path(&self) -> Option<&str> {
        match self {
            JobStatus::Complete { manifest_path } => Some(manifest_path),
            _ => None,
        }
    }

    /// Whether the pipeline will not move this job any further.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobStatus::Complete { .. } | JobStatus::Canceled | JobStatus::Error
        )
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw job record as returned by the pipeline's read-job call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PipelineJob {
    pub id: Option<String>,
    pub status: Option<String>,
    pub output_key_prefix: Option<String>,
    pub playlists: Option<Vec<PipelinePlaylist>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct PipelinePlaylist {
    pub name: Option<String>,
    pub format: Option<String>,
}

/// `{"Job": {...}}` wrapper used by both the create and read responses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct JobEnvelope {
    pub job: Option<PipelineJob>,
}

/// Classify a raw status, deriving a DASH manifest path when complete.
pub fn normalize(
    raw_status: &str,
    playlist_name: Option<&str>,
    output_prefix: Option<&str>,
) -> Result<JobStatus> {
    normalize_with_format(raw_status, playlist_name, output_prefix, OutputFormat::Dash)
}

/// Classify a raw status, using `format` to pick the manifest extension.
pub fn normalize_with_format(
    raw_status: &str,
    playlist_name: Option<&str>,
    output_prefix: Option<&str>,
    format: OutputFormat,
) -> Result<JobStatus> {
    match raw_status {
        "Submitted" => Ok(JobStatus::Submitted),
        "Progressing" => Ok(JobStatus::Progressing),
        "Canceled" => Ok(JobStatus::Canceled),
        "Error" => Ok(JobStatus::Error),
        "Complete" => {
            let (Some(name), Some(prefix)) = (playlist_name, output_prefix) else {
                return Err(Error::inconsistent(
                    "job is Complete but the record has no playlist name or output prefix",
                ));
            };
            Ok(JobStatus::Complete {
                manifest_path: format!("{prefix}{name}.{}", format.manifest_extension()),
            })
        }
        other => Err(Error::UnknownStatus {
            raw: other.to_string(),
        }),
    }
}

/// Classify a full job record. The first playlist determines both the
/// manifest name and, through its `Format`, the manifest extension.
pub fn normalize_job(job: &PipelineJob) -> Result<JobStatus> {
    let Some(raw_status) = job.status.as_deref() else {
        return Err(Error::inconsistent("job record has no Status"));
    };

    let playlist = job.playlists.as_ref().and_then(|p| p.first());
    let playlist_name = playlist.and_then(|p| p.name.as_deref());

    let format = match playlist.and_then(|p| p.format.as_deref()) {
        None => OutputFormat::Dash,
        Some(raw) => match OutputFormat::from_playlist_format(raw) {
            Some(format) => format,
            // Only a finished job needs the format to be meaningful.
            None if raw_status == "Complete" => {
                return Err(Error::inconsistent(format!(
                    "job is Complete with unsupported playlist format {raw:?}"
                )));
            }
            None => OutputFormat::Dash,
        },
    };

    normalize_with_format(
        raw_status,
        playlist_name,
        job.output_key_prefix.as_deref(),
        format,
    )
}
