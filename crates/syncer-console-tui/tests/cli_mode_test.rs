use std::io::Write;
use std::process::Command;

#[test]
fn cli_mode_with_bootstrap_and_dry_run_works() {
    let binary_path = env!("CARGO_BIN_EXE_syncer-console");

    let mut bootstrap = tempfile::NamedTempFile::new().expect("temp bootstrap file");
    write!(
        bootstrap,
        r#"{{
            "accounts": [
                {{
                    "id": 1,
                    "owner": "admin",
                    "account_config": {{
                        "host": "127.0.0.1",
                        "user": "root",
                        "password": "pw",
                        "port": 3306,
                        "account_name": "local"
                    }}
                }}
            ],
            "syncerJobs": [],
            "error": null,
            "message": null
        }}"#
    )
    .expect("write bootstrap state");

    let output = Command::new(binary_path)
        .arg("--bootstrap")
        .arg(bootstrap.path())
        .arg("--dry-run")
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to start syncer-console binary");

    assert!(
        output.status.success(),
        "Process exited with non-zero status: {}\nStdout: {}\nStderr: {}",
        output.status,
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn cli_mode_rejects_malformed_bootstrap() {
    let binary_path = env!("CARGO_BIN_EXE_syncer-console");

    let mut bootstrap = tempfile::NamedTempFile::new().expect("temp bootstrap file");
    write!(bootstrap, "not json").expect("write bootstrap state");

    let output = Command::new(binary_path)
        .arg("--bootstrap")
        .arg(bootstrap.path())
        .arg("--dry-run")
        .output()
        .expect("Failed to start syncer-console binary");

    assert!(!output.status.success());
}
