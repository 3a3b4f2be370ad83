//! test-support: helpers shared by the ctable-bridge integration tests.
//!
//! Add as a dev-dependency in the top-level `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test_support = { path = "tests/support", features = ["serde"] }
//! ```
//!
//! Then in tests:
//! ```rust,ignore
//! use test_support::{cmd_bin, mock_call, frames};
//!
//! let mut cmd = cmd_bin("ctable-jobs");
//! mock_call(&mut cmd, "JOBS", "jobs/failed_listing.json", None);
//! let out = cmd.args(["tok", "1", "oneHour"]).output().unwrap();
//! let parsed = frames(&String::from_utf8_lossy(&out.stdout));
//! ```

use once_cell::sync::Lazy;
use tracing_subscriber::{fmt, EnvFilter};

use std::path::{Path, PathBuf};

pub const FRAME_START: &str = "##gbStart##";
pub const FRAME_SPLIT: &str = "##splitKeyValue##";
pub const FRAME_END: &str = "##gbEnd##";

/// Upstream calls the binaries can be pointed at canned responses for.
pub const MOCK_CALLS: [&str; 4] = ["JOBS", "LOGS", "RESTART", "CALENDAR"];

/// Initialize `tracing` once, honoring `RUST_LOG` and writing via the test writer.
///
/// Safe to call from multiple tests; only the first call configures the global subscriber.
pub fn init_tracing() {
    static INIT: Lazy<()> = Lazy::new(|| {
        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new("warn,test=info"))
            .unwrap();
        // with_test_writer() causes logs to appear alongside failing tests only (cargo/nextest)
        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
    Lazy::force(&INIT);
}

/// Return the path to the repository's `tests/fixtures` directory.
///
/// Uses the package directory (where `Cargo.toml` lives), so it's stable regardless
/// of the runner's working directory (cargo vs nextest).
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/support has a parent")
        .join("fixtures")
}

/// Path to `tests/schemas`.
pub fn schemas_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/support has a parent")
        .join("schemas")
}

/// Read a UTF-8 text fixture into a string.
pub fn read_fixture_text<P: AsRef<Path>>(rel_path: P) -> String {
    let path = fixtures_dir().join(rel_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {e}", path.display()))
}

/// Deserialize a JSON fixture into `T` (enable `serde` feature).
#[cfg(feature = "serde")]
pub fn read_fixture_json<T, P>(rel_path: P) -> T
where
    T: serde::de::DeserializeOwned,
    P: AsRef<Path>,
{
    let path = fixtures_dir().join(rel_path);
    let file = std::fs::File::open(&path)
        .unwrap_or_else(|e| panic!("failed to open fixture {}: {e}", path.display()));
    serde_json::from_reader::<_, T>(file)
        .unwrap_or_else(|e| panic!("failed to parse JSON fixture {}: {e}", path.display()))
}

/// Read a JSON schema from `tests/schemas` (enable `serde` feature).
#[cfg(feature = "serde")]
pub fn read_schema(name: &str) -> serde_json::Value {
    let path = schemas_dir().join(name);
    let data = std::fs::read(&path)
        .unwrap_or_else(|e| panic!("failed to read schema {}: {e}", path.display()));
    serde_json::from_slice(&data).expect("valid schema JSON")
}

/// Run a binary target with `assert_cmd`, returning the ready-to-run `Command`.
///
/// Inherited mock variables are cleared so each test states its own upstream.
pub fn cmd_bin(bin: &str) -> assert_cmd::Command {
    init_tracing();
    let mut cmd = assert_cmd::Command::cargo_bin(bin).expect("binary target not found");
    for call in MOCK_CALLS {
        cmd.env_remove(format!("CTB_TEST_{call}_JSON"));
        cmd.env_remove(format!("CTB_TEST_{call}_STATUS"));
    }
    cmd.env_remove("CTB_LOG");
    cmd
}

/// Serve `fixture` (relative to `tests/fixtures`) as the body of `call`, optionally with a status.
pub fn mock_call(cmd: &mut assert_cmd::Command, call: &str, fixture: &str, status: Option<u16>) {
    cmd.env(format!("CTB_TEST_{call}_JSON"), read_fixture_text(fixture));
    if let Some(code) = status {
        cmd.env(format!("CTB_TEST_{call}_STATUS"), code.to_string());
    }
}

/// Answer `call` with a bare status and no body.
pub fn mock_status(cmd: &mut assert_cmd::Command, call: &str, status: u16) {
    cmd.env(format!("CTB_TEST_{call}_STATUS"), status.to_string());
}

/// Split stdout into `(tag, payload)` pairs, one per wire line; non-frame lines are skipped.
pub fn frames(stdout: &str) -> Vec<(String, String)> {
    stdout
        .lines()
        .filter_map(|line| {
            let inner = line.strip_prefix(FRAME_START)?.strip_suffix(FRAME_END)?;
            let (tag, payload) = inner.split_once(FRAME_SPLIT)?;
            Some((tag.to_string(), payload.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frames_splits_tag_and_payload() {
        let out = "##gbStart##copilot_ctable_data##splitKeyValue##[{\"a\":1}]##gbEnd##\nplain diagnostic\n";
        assert_eq!(
            frames(out),
            vec![("copilot_ctable_data".to_string(), "[{\"a\":1}]".to_string())]
        );
    }
}
