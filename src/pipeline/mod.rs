mod client;

pub use client::{HttpPipelineClient, TranscodePipeline};

use dashgate_core::{normalize_job, Error, JobStatus, Result};

/// Read a job from the pipeline and classify its current status.
///
/// The id is checked before any pipeline call, whichever adapter is plugged in.
pub async fn job_status(pipeline: &dyn TranscodePipeline, job_id: &str) -> Result<JobStatus> {
    validate_job_id(job_id)?;

    let job = pipeline.read_job(job_id).await?;
    let status = normalize_job(&job)?;

    tracing::debug!(
        job_id = %job_id,
        status = %status,
        terminal = status.is_terminal(),
        "Normalized job status"
    );
    Ok(status)
}

/// Job ids are opaque but must be safe to place in a URL path segment
pub(crate) fn validate_job_id(job_id: &str) -> Result<()> {
    if job_id.is_empty() {
        return Err(Error::invalid_input("Job ID is empty"));
    }
    if !job_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(Error::invalid_input(format!(
            "Job ID contains invalid characters: {:?}",
            job_id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn job_id_validation() {
        assert!(validate_job_id("1425499219935-zlw7xq").is_ok());
        assert!(validate_job_id("job_1").is_ok());
        assert_matches!(validate_job_id(""), Err(Error::InvalidInput(_)));
        assert_matches!(validate_job_id("../etc"), Err(Error::InvalidInput(_)));
        assert_matches!(validate_job_id("a.b"), Err(Error::InvalidInput(_)));
        assert_matches!(validate_job_id("a b"), Err(Error::InvalidInput(_)));
    }
}
