// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Job-scheduler modes: failed-job listing, log fetch and restart for a single job
// role: processing/jobs
// inputs: SchedulerApi backend, TimeWindow, job zone or job id
// outputs: Frames for the emitter, or a FeedError naming the failed stage
// side_effects: Upstream calls through the SchedulerApi seam only
// invariants:
// - missing/null row fields become "N/A"; a bad timestamp downgrades only its own field
// - ID modes make no per-node call unless a listing row matches the job id and carries a node id
// - logs over LOG_LINE_LIMIT lines are replaced by an advisory, never truncated
// errors: One FeedError per failing stage; nothing is retried
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono_tz::Tz;
use serde_json::{Value, json};

use crate::error::FeedError;
use crate::ext::serde_json::{JsonFetch, NOT_AVAILABLE};
use crate::http::ApiReply;
use crate::model::{JobLogRecord, JobRow, LogBody, MatchedJob, RestartRecord};
use crate::render::{Frame, Tag};
use crate::scheduler_api::{JobQuery, SchedulerApi, restart_body};
use crate::util::{format_in_zone, line_count, sanitize_log};
use crate::window::{LISTING_FORMAT, LOOKUP_FORMAT, TimeWindow};

pub const LOG_LINE_LIMIT: usize = 100;
pub const NO_FAILED_JOBS: &str = "No jobs failed in the given time configuration";
pub const RESTARTED: &str = "restarted successfully";

/// Rows of a successful listing (`flag == "success"`, `data[0].totalData`).
fn listed_rows(reply: &ApiReply) -> Option<Vec<Value>> {
  if !reply.flagged_success() {
    return None;
  }
  reply.json()?.fetch("data.0.totalData").to::<Vec<Value>>()
}

fn zoned_or_na(row: &Value, key: &str, zone: Tz) -> String {
  row
    .fetch(key)
    .to::<String>()
    .and_then(|raw| format_in_zone(&raw, zone, LISTING_FORMAT))
    .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn job_row(row: &Value, zone: Tz) -> JobRow {
  JobRow {
    job_id: row.fetch("job_name").or_na(),
    job_name: row.fetch("job_title").or_na(),
    job_node: row.fetch("nodeName").or_na(),
    start_time: zoned_or_na(row, "startTime", zone),
    end_time: zoned_or_na(row, "endTime", zone),
  }
}

fn same_job(value: &Value, job_id: i64) -> bool {
  match value {
    Value::Number(n) => n.as_i64() == Some(job_id) || n.as_f64() == Some(job_id as f64),
    Value::String(s) => s.trim() == job_id.to_string(),
    _ => false,
  }
}

fn is_zero(value: &Value) -> bool {
  value.as_f64() == Some(0.0)
}

/// First row whose `job_name` is `job_id`; a match without a usable node id counts as no match.
pub fn find_job(rows: &[Value], job_id: i64) -> Option<MatchedJob> {
  let row = rows.iter().find(|row| row.fetch("job_name").value().is_some_and(|v| same_job(v, job_id)))?;

  let node_id = row.fetch("nodeId").value().filter(|v| !is_zero(v))?.clone();
  let node_segment = row.fetch("nodeId").as_segment()?;

  Some(MatchedJob {
    job_id,
    node_id,
    node_segment,
    title: row.fetch("job_title").or_na(),
    node_name: row.fetch("nodeName").or_na(),
  })
}

/// Size-advisory policy: oversized logs point to the console instead of being shown.
pub fn log_body(job_id: i64, text: &str) -> LogBody {
  if line_count(text) > LOG_LINE_LIMIT {
    LogBody::Message(format!(
      "The log is too large to view Please open the Job {job_id} to view the logs."
    ))
  } else {
    LogBody::Log(sanitize_log(text))
  }
}

/// Failed jobs inside `window`, timestamps rendered in `zone`.
pub fn failed_jobs(api: &dyn SchedulerApi, window: &TimeWindow, zone: Tz) -> Result<Vec<Frame>, FeedError> {
  let (start_date, end_date) = window.render(LISTING_FORMAT);
  let query = JobQuery { global_search: String::new(), start_date, end_date };

  let reply = api.list_failed_jobs(&query)?;
  if !reply.is_ok() {
    return Err(FeedError::ListStatus(reply.status));
  }
  let rows = listed_rows(&reply).ok_or(FeedError::ListRejected)?;

  let jobs: Vec<JobRow> = rows.iter().map(|row| job_row(row, zone)).collect();
  tracing::info!(count = jobs.len(), zone = %window.zone, "failed jobs listed");

  let frame = Frame::table(Tag::FailedJobs, &jobs, || json!({ "message": NO_FAILED_JOBS }))?;
  Ok(vec![frame])
}

fn lookup(api: &dyn SchedulerApi, job_id: i64, window: &TimeWindow) -> Result<MatchedJob, FeedError> {
  let (since, until) = window.render(LOOKUP_FORMAT);
  tracing::debug!(job_id, %since, %until, "looking up job");

  // The console sends only the end date for ID searches.
  let query = JobQuery { global_search: job_id.to_string(), start_date: String::new(), end_date: until };

  let reply = api.list_failed_jobs(&query)?;
  if !reply.is_ok() {
    return Err(FeedError::LookupStatus(reply.status));
  }
  let rows = listed_rows(&reply).ok_or(FeedError::ListRejected)?;

  find_job(&rows, job_id).ok_or(FeedError::JobNotFound(job_id))
}

pub fn job_log(api: &dyn SchedulerApi, job_id: i64, window: &TimeWindow) -> Result<Vec<Frame>, FeedError> {
  let job = lookup(api, job_id, window)?;

  let reply = api.node_logs(job.job_id, &job.node_segment)?;
  if !reply.is_ok() {
    return Err(FeedError::LogsStatus(reply.status));
  }
  if !reply.flagged_success() {
    return Err(FeedError::LogsRejected);
  }
  let text = reply
    .json()
    .and_then(|v| v.fetch("data").to::<String>())
    .ok_or(FeedError::LogsRejected)?;

  tracing::info!(job_id, lines = line_count(&text), "log fetched");

  let record = JobLogRecord {
    job_name: job.title,
    job_id: job.job_id,
    node_name: job.node_name,
    body: log_body(job.job_id, &text),
  };

  Ok(vec![Frame::table(Tag::Table, &[record], || json!({}))?])
}

pub fn restart_job(api: &dyn SchedulerApi, job_id: i64, window: &TimeWindow) -> Result<Vec<Frame>, FeedError> {
  let job = lookup(api, job_id, window)?;

  let body = restart_body(job.job_id, &job.node_id);
  let reply = api.restart_node(job.job_id, &job.node_segment, &body)?;

  if !reply.is_ok() {
    return Err(FeedError::RestartFailed { job_id, status: Some(reply.status) });
  }
  if !reply.flagged_success() {
    return Err(FeedError::RestartFailed { job_id, status: None });
  }

  tracing::info!(job_id, node = %job.node_segment, "restart accepted");

  let record = RestartRecord {
    job_name: job.title,
    job_id: job.job_id,
    node_name: job.node_name,
    restart_status: RESTARTED.to_string(),
  };

  Ok(vec![Frame::table(Tag::Table, &[record], || json!({}))?])
}
