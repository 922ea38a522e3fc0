use crate::pipeline;
use crate::server::error::{ApiError, ErrorBody};
use crate::server::AppContext;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use dashgate_core::{job, EncodeOptions, OutputFormat, DEFAULT_LABELS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub fn api_routes() -> Router<AppContext> {
    Router::new()
        .route("/upload/encode", post(encode))
        .route("/upload/encode/audio", post(encode_audio))
        .route("/upload/encode/status/:job_id", get(encode_status))
        .route("/profiles", get(get_profiles))
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct IndexResponse {
    pub status: String,
}

/// API liveness probe
#[utoipa::path(
    get,
    path = "/api",
    tag = "health",
    responses((status = 200, description = "API is up", body = IndexResponse))
)]
pub async fn index() -> Json<IndexResponse> {
    Json(IndexResponse {
        status: "OK".to_string(),
    })
}

/// Request body for starting a video transcoding job
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EncodeRequest {
    /// Storage key of a previously uploaded file
    #[serde(default)]
    pub input: Option<String>,
    /// Whether the input has an audio track (default: true)
    #[serde(default)]
    pub has_audio: Option<bool>,
    /// Quality labels to produce, in order (default: 720p, 480p, 360p)
    #[serde(default)]
    pub resolutions: Option<Vec<String>>,
    /// Output format (default: configured pipeline default)
    #[serde(default)]
    #[schema(value_type = Option<super::openapi::OutputFormatSchema>)]
    pub format: Option<OutputFormat>,
}

/// Request body for starting an audio-only job
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EncodeAudioRequest {
    /// Storage key of a previously uploaded file
    #[serde(default)]
    pub input: Option<String>,
    /// Output format (default: configured pipeline default)
    #[serde(default)]
    #[schema(value_type = Option<super::openapi::OutputFormatSchema>)]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EncodeResponse {
    pub status: String,
    /// Identifier to poll the job status with
    pub job_id: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobStatusResponse {
    pub status: String,
    /// One of Submitted, Progressing, Complete, Canceled, Error
    pub job_status: String,
    /// Manifest key, present only when the job is Complete
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<String>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProfilesResponse {
    pub dash: BTreeMap<String, String>,
    pub hls: BTreeMap<String, String>,
}

fn require_input(input: Option<String>) -> Result<String, ApiError> {
    match input {
        Some(input) if !input.trim().is_empty() => Ok(input),
        _ => Err(ApiError::bad_request("No input path specified")),
    }
}

fn parse_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| ApiError::bad_request(rejection.body_text()))
}

/// Start a video transcoding job for an uploaded file
#[utoipa::path(
    post,
    path = "/api/upload/encode",
    tag = "encode",
    request_body = EncodeRequest,
    responses(
        (status = 200, description = "Job submitted", body = EncodeResponse),
        (status = 400, description = "Missing or invalid input", body = ErrorBody),
        (status = 500, description = "Pipeline rejected the job", body = ErrorBody)
    )
)]
pub async fn encode(
    State(ctx): State<AppContext>,
    payload: Result<Json<EncodeRequest>, JsonRejection>,
) -> Result<Json<EncodeResponse>, ApiError> {
    let payload = parse_body(payload)?;
    let input = require_input(payload.input)?;

    let options = EncodeOptions {
        include_audio: payload.has_audio.unwrap_or(true),
        labels: payload
            .resolutions
            .unwrap_or_else(|| DEFAULT_LABELS.iter().map(|l| l.to_string()).collect()),
        format: payload
            .format
            .unwrap_or(ctx.config.pipeline.default_format),
    };

    let request = job::build(&ctx.profiles, &ctx.config.pipeline.id, &input, &options)?;
    let job_id = ctx.pipeline.submit(&request).await?;

    Ok(Json(EncodeResponse {
        status: "OK".to_string(),
        job_id,
    }))
}

/// Start a job that only extracts the audio track of an uploaded file
#[utoipa::path(
    post,
    path = "/api/upload/encode/audio",
    tag = "encode",
    request_body = EncodeAudioRequest,
    responses(
        (status = 200, description = "Job submitted", body = EncodeResponse),
        (status = 400, description = "Missing or invalid input", body = ErrorBody),
        (status = 500, description = "Pipeline rejected the job", body = ErrorBody)
    )
)]
pub async fn encode_audio(
    State(ctx): State<AppContext>,
    payload: Result<Json<EncodeAudioRequest>, JsonRejection>,
) -> Result<Json<EncodeResponse>, ApiError> {
    let payload = parse_body(payload)?;
    let input = require_input(payload.input)?;
    let format = payload
        .format
        .unwrap_or(ctx.config.pipeline.default_format);

    let request = job::build_audio_only(&ctx.config.pipeline.id, &input, format)?;
    let job_id = ctx.pipeline.submit(&request).await?;

    Ok(Json(EncodeResponse {
        status: "OK".to_string(),
        job_id,
    }))
}

/// Poll the status of a transcoding job
#[utoipa::path(
    get,
    path = "/api/upload/encode/status/{job_id}",
    tag = "encode",
    params(("job_id" = String, Path, description = "Job ID returned by the encode call")),
    responses(
        (status = 200, description = "Current job status", body = JobStatusResponse),
        (status = 500, description = "Status could not be determined", body = ErrorBody)
    )
)]
pub async fn encode_status(
    State(ctx): State<AppContext>,
    Path(job_id): Path<String>,
) -> Result<Json<JobStatusResponse>, ApiError> {
    let status = pipeline::job_status(ctx.pipeline.as_ref(), &job_id).await?;

    Ok(Json(JobStatusResponse {
        status: "OK".to_string(),
        job_status: status.as_str().to_string(),
        manifest: status.manifest_path().map(String::from),
    }))
}

/// List the quality labels accepted for each output format
#[utoipa::path(
    get,
    path = "/api/profiles",
    tag = "encode",
    responses((status = 200, description = "Label to preset mapping per format", body = ProfilesResponse))
)]
pub async fn get_profiles(State(ctx): State<AppContext>) -> Json<ProfilesResponse> {
    Json(ProfilesResponse {
        dash: ctx.profiles.presets(OutputFormat::Dash).clone(),
        hls: ctx.profiles.presets(OutputFormat::Hls).clone(),
    })
}
