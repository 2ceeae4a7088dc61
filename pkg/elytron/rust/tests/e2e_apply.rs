// Unless explicitly stated otherwise all files in this repository are licensed
// under the Apache License Version 2.0.
// This product includes software developed at Datadog (https://www.datadoghq.com/).
// Copyright 2026-present Datadog, Inc.

//! E2E tests running the elytron-apply binary

use std::fs;
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const CHANGESET: &str = include_str!("../testdata/changeset.yaml");
const STANDALONE: &str = include_str!("../testdata/standalone.xml");

fn elytron_apply(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_elytron-apply"))
        .args(args)
        .env_remove("WILDFLY_PASSWORD")
        .output()
        .expect("Failed to run elytron-apply")
}

fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write test file");
    path
}

fn apply_offline(changeset: &Path, config: &Path) -> Output {
    elytron_apply(&[
        "--changeset",
        changeset.to_str().expect("Non UTF-8 path"),
        "offline",
        "--config",
        config.to_str().expect("Non UTF-8 path"),
    ])
}

#[test]
fn test_offline_changeset() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let changeset = write(dir.path(), "changeset.yaml", CHANGESET);
    let config = write(dir.path(), "standalone.xml", STANDALONE);

    let output = apply_offline(&changeset, &config);
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let xml = fs::read_to_string(&config).expect("Failed to read config");
    for expected in [
        r#"<key-store name="httpsKS">"#,
        r#"<file path="https.p12" relative-to="jboss.server.config.dir"/>"#,
        r#"<key-manager name="httpsKM" algorithm="SunX509" key-store="httpsKS">"#,
        r#"<trust-manager name="httpsTM" algorithm="PKIX" key-store="httpsKS"/>"#,
        r#"<server-ssl-context name="httpsSSC" protocols="TLSv1.2 TLSv1.3" need-client-auth="true" key-manager="httpsKM" trust-manager="httpsTM"/>"#,
        r#"<client-ssl-context name="httpsCSC" trust-manager="httpsTM"/>"#,
        r#"<server-ssl-context name="applicationSSC" key-manager="applicationKM"/>"#,
    ] {
        assert!(xml.contains(expected), "missing {expected} in {xml}");
    }
    let trust_managers = xml.find("<trust-managers>").expect("No trust-managers");
    let key_managers = xml.find("</key-managers>").expect("No key-managers");
    let server_contexts = xml.find("<server-ssl-contexts>").expect("No server-ssl-contexts");
    assert!(key_managers < trust_managers && trust_managers < server_contexts);
}

#[test]
fn test_second_run_fails_without_changes() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let changeset = write(dir.path(), "changeset.yaml", CHANGESET);
    let config = write(dir.path(), "standalone.xml", STANDALONE);

    assert!(apply_offline(&changeset, &config).status.success());
    let after_first = fs::read_to_string(&config).expect("Failed to read config");

    let output = apply_offline(&changeset, &config);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("failed to add key-store httpsKS (1 of 5)"),
        "stderr: {stderr}"
    );
    assert!(stderr.contains("already exists"), "stderr: {stderr}");
    assert_eq!(
        fs::read_to_string(&config).expect("Failed to read config"),
        after_first
    );
}

#[test]
fn test_invalid_changeset_is_rejected() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = write(dir.path(), "standalone.xml", STANDALONE);
    let tests = vec![
        (
            "unknown field",
            "commands:\n  - trust-manager:\n      name: tm\n      algorithm: PKIX\n      keystore: ks\n",
            "failed to parse changeset",
        ),
        (
            "missing required field",
            "commands:\n  - key-manager:\n      name: km\n      algorithm: SunX509\n",
            "invalid changeset entry 1",
        ),
    ];
    for (name, yaml, message) in tests {
        let changeset = write(dir.path(), "changeset.yaml", yaml);
        let output = apply_offline(&changeset, &config);
        assert!(!output.status.success(), "test case '{name}'");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains(message), "test case '{name}': {stderr}");
        assert_eq!(
            fs::read_to_string(&config).expect("Failed to read config"),
            STANDALONE,
            "test case '{name}'"
        );
    }
}

#[test]
fn test_online_unreachable_server() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let changeset = write(dir.path(), "changeset.yaml", CHANGESET);
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
        listener.local_addr().expect("No local address").port()
    };

    let output = elytron_apply(&[
        "--changeset",
        changeset.to_str().expect("Non UTF-8 path"),
        "online",
        "--host",
        "127.0.0.1",
        "--port",
        &port.to_string(),
        "--timeout-secs",
        "2",
    ]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("failed to add key-store httpsKS (1 of 5)"),
        "stderr: {stderr}"
    );
}
