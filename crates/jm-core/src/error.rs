use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("job #{index} could not be decoded: {source}")]
    MalformedJob {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error("job {job_id}: invalid {field}: {reason}")]
    InvalidField {
        job_id: String,
        field: &'static str,
        reason: String,
    },
    #[error("invalid matching config: {0}")]
    InvalidConfig(String),
}
