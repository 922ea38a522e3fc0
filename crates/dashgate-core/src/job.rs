//! Transcoding job requests and the builder that assembles them.
//!
//! The structs here serialize to the exact JSON shape the pipeline expects
//! (`PipelineId`, `Input`, `OutputKeyPrefix`, `Outputs`, `Playlists`).
//! Building is deterministic: identical arguments always yield an identical
//! [`JobRequest`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::format::OutputFormat;
use crate::path::{decompose, InputReference};
use crate::profiles::{ProfileRegistry, DEFAULT_LABELS};

/// Segment length of every rendition, in seconds.
pub const SEGMENT_DURATION_SECS: u32 = 3;

/// A complete job request, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobRequest {
    pub pipeline_id: String,
    pub input: JobInput,
    pub output_key_prefix: String,
    pub outputs: Vec<OutputSpec>,
    pub playlists: Vec<PlaylistSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct JobInput {
    pub key: String,
}

/// One rendition written by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct OutputSpec {
    pub key: String,
    pub preset_id: String,
    #[serde(with = "segment_duration")]
    pub segment_duration: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_pattern: Option<String>,
}

/// The manifest tying all renditions of a job together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PlaylistSpec {
    pub format: String,
    pub name: String,
    pub output_keys: Vec<String>,
}

impl JobRequest {
    /// Keys of every output, in build order.
    pub fn output_keys(&self) -> impl Iterator<Item = &str> {
        self.outputs.iter().map(|o| o.key.as_str())
    }
}

/// Caller-selectable knobs for a video job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    pub include_audio: bool,
    pub labels: Vec<String>,
    pub format: OutputFormat,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            include_audio: true,
            labels: DEFAULT_LABELS.iter().map(|l| l.to_string()).collect(),
            format: OutputFormat::default(),
        }
    }
}

/// Build a video job for `input_key`.
///
/// One output per recognized label, in the caller's order; labels the
/// registry does not know are skipped. The first video output carries the
/// thumbnail directive. When `include_audio` is set, an audio rendition is
/// appended last.
pub fn build(
    registry: &ProfileRegistry,
    pipeline_id: &str,
    input_key: &str,
    options: &EncodeOptions,
) -> Result<JobRequest> {
    let input = decompose(input_key)?;
    let format = options.format;

    let mut outputs: Vec<OutputSpec> = Vec::with_capacity(options.labels.len() + 1);
    for label in &options.labels {
        let Some(preset) = registry.resolve(format, label) else {
            tracing::debug!(%format, label = %label, "Ignoring unknown quality label");
            continue;
        };

        let thumbnail_pattern = outputs.is_empty().then(|| thumbnail_pattern(&input, format));
        outputs.push(OutputSpec {
            key: format!("{}-{}/{}", format.directory_prefix(), label, input.base_name),
            preset_id: preset.to_string(),
            segment_duration: SEGMENT_DURATION_SECS,
            thumbnail_pattern,
        });
    }

    if outputs.is_empty() && !options.include_audio {
        return Err(Error::EmptyOutput(format!(
            "none of the requested profiles {:?} are known and audio is excluded",
            options.labels
        )));
    }

    if options.include_audio {
        outputs.push(audio_output(&input, format));
    }

    Ok(assemble(pipeline_id, input_key, &input, format, outputs))
}

/// Build a job that only extracts the audio track of `input_key`.
pub fn build_audio_only(
    pipeline_id: &str,
    input_key: &str,
    format: OutputFormat,
) -> Result<JobRequest> {
    let input = decompose(input_key)?;
    let outputs = vec![audio_output(&input, format)];
    Ok(assemble(pipeline_id, input_key, &input, format, outputs))
}

fn thumbnail_pattern(input: &InputReference, format: OutputFormat) -> String {
    format!(
        "thumbnails/{}{}_{{count}}",
        input.base_name,
        format.thumbnail_infix()
    )
}

fn audio_output(input: &InputReference, format: OutputFormat) -> OutputSpec {
    OutputSpec {
        key: format!("{}-audio/{}", format.directory_prefix(), input.base_name),
        preset_id: format.audio_preset().to_string(),
        segment_duration: SEGMENT_DURATION_SECS,
        thumbnail_pattern: None,
    }
}

fn assemble(
    pipeline_id: &str,
    input_key: &str,
    input: &InputReference,
    format: OutputFormat,
    outputs: Vec<OutputSpec>,
) -> JobRequest {
    let mut request = JobRequest {
        pipeline_id: pipeline_id.to_string(),
        input: JobInput {
            key: input_key.to_string(),
        },
        output_key_prefix: input.output_key_prefix(),
        outputs,
        playlists: Vec::with_capacity(1),
    };

    let playlist = PlaylistSpec {
        format: format.playlist_format().to_string(),
        name: input.base_name.clone(),
        output_keys: request.output_keys().map(String::from).collect(),
    };
    request.playlists.push(playlist);

    request
}

/// The pipeline wants `SegmentDuration` as a decimal string.
mod segment_duration {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u32, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u32),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) => Ok(n),
            Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}
