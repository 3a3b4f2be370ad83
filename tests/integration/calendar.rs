use predicates::prelude::*;
use test_support::{cmd_bin, frames, mock_call};

const START: &str = "2025-05-01T00:00:00";
const END: &str = "2025-05-02T00:00:00";

#[test]
fn both_views_skip_canceled_meetings() {
  let mut cmd = cmd_bin("ctable-calendar");
  mock_call(&mut cmd, "CALENDAR", "calendar/events.json", None);
  let out = cmd.args(["tok", START, END, "ops@example.com", "3"]).output().unwrap();
  assert!(out.status.success());

  let stdout = String::from_utf8(out.stdout).unwrap();
  assert!(!stdout.contains("Team Sync"));
  insta::assert_snapshot!(stdout.trim_end(), @r#"
  ##gbStart##copilot_ctable1_data##splitKeyValue##[{"Requested_Meetings_subject":"Sprint Planning","Meeting_Time":"May 1st 09:00-10:00","organizer_email":"lead@example.com"},{"Requested_Meetings_subject":"Vendor Call","Meeting_Time":"May 1st 20:00-20:45","organizer_email":"ops@example.com"}]##gbEnd##
  ##gbStart##copilot_ctable2_data##splitKeyValue##[{"Requested_Meetings_subject":"Sprint Planning","attendees_emails":"a@example.com;b@example.com"},{"Requested_Meetings_subject":"Vendor Call","attendees_emails":"c@example.com"}]##gbEnd##
  "#);
}

#[test]
fn display_zone_moves_meetings_across_midnight() {
  let mut cmd = cmd_bin("ctable-calendar");
  mock_call(&mut cmd, "CALENDAR", "calendar/events.json", None);
  let out = cmd
    .args(["tok", START, END, "ops@example.com", "1", "Asia/Kolkata"])
    .output()
    .unwrap();

  let parsed = frames(&String::from_utf8(out.stdout).unwrap());
  assert_eq!(parsed.len(), 1);
  assert_eq!(parsed[0].0, "copilot_ctable1_data");

  let rows: serde_json::Value = serde_json::from_str(&parsed[0].1).unwrap();
  assert_eq!(rows[0]["Meeting_Time"], "May 1st 14:30-15:30");
  assert_eq!(rows[1]["Meeting_Time"], "May 2nd 01:30-02:15");
}

#[test]
fn only_canceled_meetings_yield_notice() {
  let mut cmd = cmd_bin("ctable-calendar");
  mock_call(&mut cmd, "CALENDAR", "calendar/only_canceled.json", None);
  cmd
    .args(["tok", START, END, "ops@example.com", "2"])
    .assert()
    .success()
    .stdout("##gbStart##copilot_ctable_data##splitKeyValue##[{\"Meetings\":\"No meetings available in the specified date (2025-05-01)\"}]##gbEnd##\n");
}

#[test]
fn wrong_choice_needs_no_upstream() {
  // No mock configured: any request would go to an unreachable base URL.
  let mut cmd = cmd_bin("ctable-calendar");
  cmd
    .args(["tok", START, END, "ops@example.com", "9", "--base-url", "http://127.0.0.1:9"])
    .assert()
    .success()
    .stdout("##gbStart##copilot_ctable_data##splitKeyValue##[{\"Meetings\":\"Wrong Choice\"}]##gbEnd##\n");
}

#[test]
fn http_failure_echoes_error_body() {
  let mut cmd = cmd_bin("ctable-calendar");
  mock_call(&mut cmd, "CALENDAR", "calendar/unauthorized.json", Some(401));
  cmd
    .args(["tok", START, END, "ops@example.com", "1"])
    .assert()
    .success()
    .stdout(predicate::str::starts_with("Failed to fetch events. Status code: 401\nError response: "))
    .stdout(predicate::str::contains("InvalidAuthenticationToken"))
    .stdout(predicate::str::contains("##gbStart##").not());
}

#[test]
fn non_json_failure_body_is_labelled() {
  let mut cmd = cmd_bin("ctable-calendar");
  mock_call(&mut cmd, "CALENDAR", "calendar/gateway_error.txt", Some(502));
  cmd
    .args(["tok", START, END, "ops@example.com", "1"])
    .assert()
    .success()
    .stdout("Failed to fetch events. Status code: 502\nError response (not JSON): Bad Gateway\n");
}
