use std::path::Path;
use std::process::{Command, Output};

fn ptrmap(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ptrmap"))
        .current_dir(dir)
        .arg("--no-banner")
        .args(args)
        .output()
        .unwrap()
}

fn is_empty_dir(dir: &Path) -> bool {
    std::fs::read_dir(dir).unwrap().next().is_none()
}

#[test]
fn invalid_cidr_exits_with_status_one_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let output = ptrmap(dir.path(), &["html", "999.999.999.999/24", "10.0.0.0/24", "127.0.0.1"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(!dir.path().join("subnet_network.html").exists());
    assert!(is_empty_dir(dir.path()));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid CIDR range format"), "stderr was: {stderr}");
}

#[test]
fn reversed_range_exits_with_status_one_and_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let images = dir.path().join("images");
    let output = ptrmap(
        dir.path(),
        &["png", "10.0.1.0/24", "10.0.0.0/24", "-d", images.to_str().unwrap()],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(is_empty_dir(dir.path()));
}

#[test]
fn zero_width_is_rejected_before_any_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let output = ptrmap(dir.path(), &["png", "10.0.0.0/30", "10.0.0.0/30", "--width", "0"]);

    // clap usage errors exit with 2
    assert_eq!(output.status.code(), Some(2));
    assert!(is_empty_dir(dir.path()));
}
