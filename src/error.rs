// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed failures for argument resolution and every upstream call stage
// role: errors
// outputs: FeedError (Display text is the exact diagnostic written to stdout) and ErrorKind
// invariants: Display strings are consumed downstream verbatim; only Usage leads to a non-zero exit
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use thiserror::Error;

/// Coarse classification used for logging and exit decisions.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ErrorKind {
  Argument,
  Transport,
  UpstreamHttp,
  UpstreamLogical,
  NotFound,
  Internal,
}

#[derive(Debug, Error)]
pub enum FeedError {
  #[error("{0}")]
  Usage(String),

  #[error("Failed to reach {endpoint}: {source}")]
  Transport {
    endpoint: String,
    #[source]
    source: ureq::Error,
  },

  #[error("Failed to fetch data. HTTP Status code: {0}")]
  ListStatus(u16),

  #[error("No data found or error in the response.")]
  ListRejected,

  #[error("Failed to fetch data from the first API. Status code: {0}")]
  LookupStatus(u16),

  #[error("No job found with jobIdNumber {0}")]
  JobNotFound(i64),

  #[error("Failed to fetch data from the second API. Status code: {0}")]
  LogsStatus(u16),

  #[error("Failed to retrieve logs from the second API.")]
  LogsRejected,

  #[error("Failed to restart job {job_id}{}", status_suffix(.status))]
  RestartFailed { job_id: i64, status: Option<u16> },

  #[error("Failed to fetch events. Status code: {status}\n{}: {body}", response_label(.json))]
  CalendarStatus { status: u16, body: String, json: bool },

  #[error("Failed to encode table: {0}")]
  Encode(#[from] serde_json::Error),
}

fn status_suffix(status: &Option<u16>) -> String {
  match status {
    Some(code) => format!(". Status code: {code}"),
    None => String::new(),
  }
}

fn response_label(json: &bool) -> &'static str {
  if *json {
    "Error response"
  } else {
    "Error response (not JSON)"
  }
}

impl FeedError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      FeedError::Usage(_) => ErrorKind::Argument,
      FeedError::Transport { .. } => ErrorKind::Transport,
      FeedError::ListStatus(_)
      | FeedError::LookupStatus(_)
      | FeedError::LogsStatus(_)
      | FeedError::CalendarStatus { .. } => ErrorKind::UpstreamHttp,
      FeedError::RestartFailed { status: Some(_), .. } => ErrorKind::UpstreamHttp,
      FeedError::ListRejected | FeedError::LogsRejected | FeedError::RestartFailed { status: None, .. } => {
        ErrorKind::UpstreamLogical
      }
      FeedError::JobNotFound(_) => ErrorKind::NotFound,
      FeedError::Encode(_) => ErrorKind::Internal,
    }
  }
}
