use jsonschema::validator_for;
use test_support::{cmd_bin, frames, mock_call, read_schema};

fn compile_schema(name: &str) -> jsonschema::Validator {
  let schema = read_schema(name);
  validator_for(&schema).expect("compile schema")
}

fn payloads(cmd: &mut assert_cmd::Command) -> Vec<(String, serde_json::Value)> {
  let out = cmd.output().unwrap();
  assert!(out.status.success());
  frames(&String::from_utf8(out.stdout).unwrap())
    .into_iter()
    .map(|(tag, payload)| (tag, serde_json::from_str(&payload).expect("payload is JSON")))
    .collect()
}

#[test]
fn failed_jobs_table_conforms_to_schema() {
  let compiled = compile_schema("failed_jobs.schema.json");

  for fixture in ["jobs/failed_listing.json", "jobs/empty_listing.json"] {
    let mut cmd = cmd_bin("ctable-jobs");
    mock_call(&mut cmd, "JOBS", fixture, None);
    cmd.args(["tok", "1", "twelveHours"]);

    for (_, v) in payloads(&mut cmd) {
      compiled.validate(&v).expect("schema validation failed for failed-jobs table");
    }
  }
}

#[test]
fn job_log_record_conforms_to_schema() {
  let compiled = compile_schema("job_log.schema.json");

  for logs in ["jobs/logs_small.json", "jobs/logs_large.json"] {
    let mut cmd = cmd_bin("ctable-jobs");
    mock_call(&mut cmd, "JOBS", "jobs/lookup_match.json", None);
    mock_call(&mut cmd, "LOGS", logs, None);
    cmd.args(["tok", "2", "4711"]);

    let out = payloads(&mut cmd);
    assert_eq!(out.len(), 1);
    compiled.validate(&out[0].1).expect("schema validation failed for job log");
  }
}

#[test]
fn calendar_views_conform_to_schemas() {
  let subjects = compile_schema("calendar_subjects.schema.json");
  let attendees = compile_schema("calendar_attendees.schema.json");

  let mut cmd = cmd_bin("ctable-calendar");
  mock_call(&mut cmd, "CALENDAR", "calendar/events.json", None);
  cmd.args(["tok", "2025-05-01T00:00:00", "2025-05-02T00:00:00", "ops@example.com", "3"]);

  let out = payloads(&mut cmd);
  assert_eq!(out.len(), 2);
  subjects.validate(&out[0].1).expect("subjects view");
  attendees.validate(&out[1].1).expect("attendees view");
  assert!(!subjects.is_valid(&out[1].1));
}
