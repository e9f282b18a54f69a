// Path: crates/cli/tests/replay.rs

use nodestat_cli::{load_config, replay, ReplayOptions};
use nodestat_types::app::LagClass;
use std::io::{BufRead, BufReader, Write};
use tempfile::NamedTempFile;

const LOG: &str = r#"{"at_ms": 0, "type": "token_set", "token": "abc"}
{"at_ms": 0, "type": "session_started"}
{"at_ms": 0, "type": "status_update", "param": {"block_height": 100, "generator_block_height": 130, "generator_url": "https://testnet.example.org"}}
{"at_ms": 3000, "type": "status_update", "param": {"block_height": 120, "generator_block_height": 130, "generator_url": "https://testnet.example.org"}}
this line is not an event
{"at_ms": 4000, "type": "request_failed", "http_status": 401, "code": "CH009"}
"#;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn replays_a_recorded_log_from_disk() {
    let config_file = write_temp(
        r#"
test_net_url = "testnet.example.org"

[sampler]
sample_ttl_ms = 60000
"#,
    );
    let config = load_config(Some(config_file.path())).unwrap();
    assert_eq!(config.sampler.max_samples, 60);

    let log_file = write_temp(LOG);
    let input = BufReader::new(std::fs::File::open(log_file.path()).unwrap());
    let mut out = Vec::new();
    let outcome = replay(
        &config,
        input,
        &mut out,
        ReplayOptions {
            every: true,
            strict: false,
        },
    )
    .unwrap();

    assert_eq!(outcome.applied, 5);
    assert_eq!(outcome.skipped, 1);

    let lines: Vec<serde_json::Value> = out
        .as_slice()
        .lines()
        .map(|l| serde_json::from_str(&l.unwrap()).unwrap())
        .collect();
    assert_eq!(lines.len(), 5);

    let after_second_update = &lines[3]["status"];
    assert_eq!(after_second_update["replication_lag"], 10);
    assert_eq!(after_second_update["on_test_net"], true);
    let eta = after_second_update["sync_estimates"]["replica_lag_seconds"]
        .as_f64()
        .unwrap();
    assert!((eta - 1.5).abs() < 1e-9);

    let last = &outcome.last;
    assert_eq!(last.status.replication_lag_class, Some(LagClass::Red));
    assert_eq!(last.session.client_token, "");
    assert!(!last.session.valid_token);
    assert!(last.session.require_client_token);
}

#[test]
fn missing_config_uses_defaults_and_bad_config_is_rejected() {
    let config = load_config(None).unwrap();
    assert_eq!(config.test_net_url, "testnet.chain.com");

    let bad = write_temp("[sampler]\nmax_samples = 1\n");
    let err = load_config(Some(bad.path())).unwrap_err();
    assert!(err.to_string().contains("invalid config"));
}
