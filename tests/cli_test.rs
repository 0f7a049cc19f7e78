use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_command(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_revealkit"))
        .arg("--dir")
        .arg(dir)
        .args(args)
        .env_remove("REVEALKIT_OUTPUT")
        .output()
        .expect("Failed to execute command")
}

#[test]
fn test_init_and_export_commands() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let data_dir = temp_dir.path().join("talk");

    let output = run_command(&data_dir, &["init", "demo", "--config"]);
    assert!(
        output.status.success(),
        "init failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(data_dir.join("config.yml").is_file());
    assert!(data_dir.join("slides/01-intro.md").is_file());
    assert!(!data_dir.join("index.html.tmpl").exists());

    let out_dir = temp_dir.path().join("site");
    let output = run_command(
        &data_dir,
        &["export", "--output", out_dir.to_str().unwrap()],
    );
    assert!(
        output.status.success(),
        "export failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let index = fs::read_to_string(out_dir.join("index.html")).unwrap();
    assert!(index.contains("<title>Demo presentation</title>"));

    // Without --output the export lands in the data directory.
    let output = run_command(&data_dir, &["export"]);
    assert!(output.status.success());
    assert!(data_dir.join("build/index.html").is_file());
}

#[test]
fn test_init_keeps_existing_files_unless_overwrite() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let data_dir = temp_dir.path();
    fs::write(data_dir.join("slides.md"), "# Mine").unwrap();

    let output = run_command(data_dir, &["init"]);
    assert!(output.status.success());
    assert_eq!(fs::read_to_string(data_dir.join("slides.md")).unwrap(), "# Mine");

    let output = run_command(data_dir, &["init", "--overwrite", "--html"]);
    assert!(output.status.success());
    assert_ne!(fs::read_to_string(data_dir.join("slides.md")).unwrap(), "# Mine");
    assert!(data_dir.join("index.html.tmpl").is_file());
}

#[test]
fn test_errors_exit_with_status_one() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");

    let output = run_command(temp_dir.path(), &["init", "fancy"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error: Unsupported preset name: fancy"));

    let output = run_command(temp_dir.path(), &["export", "--format", "pdf"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unsupported format: pdf"));

    let missing = temp_dir.path().join("missing");
    let output = run_command(&missing, &["export"]);
    assert_eq!(output.status.code(), Some(1));
}
