use predicates::prelude::*;

#[test]
fn missing_positionals_are_rejected_by_clap() {
  let mut cmd = test_support::cmd_bin("ctable-jobs");
  cmd.arg("tok").assert().code(2).stdout(predicate::str::is_empty());

  let mut cmd = test_support::cmd_bin("ctable-calendar");
  cmd.args(["tok", "2025-05-01"]).assert().code(2).stdout(predicate::str::is_empty());
}

#[test]
fn unknown_period_is_a_usage_error() {
  let mut cmd = test_support::cmd_bin("ctable-jobs");
  cmd
    .args(["tok", "1", "oneWeek"])
    .assert()
    .failure()
    .stdout(predicate::str::is_empty())
    .stderr(predicate::str::contains("Invalid time period"))
    .stderr(predicate::str::contains("fifteenMinutes"));
}

#[test]
fn missing_period_and_bad_job_id() {
  let mut cmd = test_support::cmd_bin("ctable-jobs");
  cmd
    .args(["tok", "1"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Usage: ctable-jobs <login_token> 1 <TIME>"));

  let mut cmd = test_support::cmd_bin("ctable-jobs");
  cmd
    .args(["tok", "2", "forty-two"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("job id must be an integer"));
}

#[test]
fn calendar_validates_range_and_timezone() {
  let mut cmd = test_support::cmd_bin("ctable-calendar");
  cmd
    .args(["tok", "yesterday", "2025-05-02T00:00:00", "ops@example.com", "1"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("start must be an ISO-8601 datetime"));

  let mut cmd = test_support::cmd_bin("ctable-calendar");
  cmd
    .args(["tok", "2025-05-01T00:00:00", "2025-05-02T00:00:00", "ops@example.com", "1", "Mars/Base"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown timezone"));
}
