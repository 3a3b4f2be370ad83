// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Define the table rows emitted to the bot (jobs, job detail, calendar views, notices)
// role: model/types
// outputs: Serializable structs whose field names are the column headers the bot renders
// invariants: Field names and their order are a wire contract; values absent upstream are "N/A", never missing keys
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::Serialize;
use serde_json::Value;

/// One failed job in the listing window.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct JobRow {
  #[serde(rename = "JobID")]
  pub job_id: Value,
  #[serde(rename = "JobName")]
  pub job_name: Value,
  #[serde(rename = "JobNode")]
  pub job_node: Value,
  #[serde(rename = "StartTime")]
  pub start_time: String,
  #[serde(rename = "EndTime")]
  pub end_time: String,
}

/// Either the sanitized log or the size advisory, never both.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogBody {
  Log(String),
  Message(String),
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct JobLogRecord {
  #[serde(rename = "Job_Name")]
  pub job_name: Value,
  #[serde(rename = "job_Id")]
  pub job_id: i64,
  #[serde(rename = "Node_Name")]
  pub node_name: Value,
  #[serde(flatten)]
  pub body: LogBody,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RestartRecord {
  #[serde(rename = "Job_Name")]
  pub job_name: Value,
  #[serde(rename = "job_Id")]
  pub job_id: i64,
  #[serde(rename = "Node_Name")]
  pub node_name: Value,
  #[serde(rename = "Restart_Status")]
  pub restart_status: String,
}

/// Calendar view keyed by organizer.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SubjectRow {
  #[serde(rename = "Requested_Meetings_subject")]
  pub subject: String,
  #[serde(rename = "Meeting_Time")]
  pub meeting_time: String,
  pub organizer_email: Option<String>,
}

/// Calendar view keyed by attendees (semicolon-joined).
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct AttendeeRow {
  #[serde(rename = "Requested_Meetings_subject")]
  pub subject: String,
  pub attendees_emails: String,
}

/// Job identified by a lookup on the listing endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedJob {
  pub job_id: i64,
  /// Node id exactly as the listing returned it (echoed in the restart body).
  pub node_id: Value,
  /// Node id rendered for the URL path.
  pub node_segment: String,
  pub title: Value,
  pub node_name: Value,
}
