use revealkit::{GenerateOptions, Preset, Project, SlideError, export};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn count_files_with_pattern(dir: &Path, pattern: &str) -> usize {
    let glob_pattern = format!("{}/{}", dir.to_string_lossy(), pattern);
    glob::glob(&glob_pattern)
        .expect("Failed to read glob pattern")
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .count()
}

/// Relative path and contents of every file below `dir`.
fn snapshot(dir: &Path) -> BTreeMap<PathBuf, Vec<u8>> {
    let glob_pattern = format!("{}/**/*", dir.to_string_lossy());
    glob::glob(&glob_pattern)
        .expect("Failed to read glob pattern")
        .filter_map(Result::ok)
        .filter(|p| p.is_file())
        .map(|p| {
            let content = fs::read(&p).expect("Failed to read exported file");
            (p.strip_prefix(dir).unwrap().to_path_buf(), content)
        })
        .collect()
}

fn demo_project(root: &Path) -> Project {
    let data_dir = root.join("talk");
    let options = GenerateOptions {
        generate_config: true,
        ..GenerateOptions::default()
    };
    Preset::new("demo")
        .expect("Failed to load preset")
        .generate(&data_dir, &options)
        .expect("Failed to generate preset");
    Project::open(&data_dir).expect("Failed to open project")
}

#[test]
fn test_export_writes_self_contained_index() {
    init_logger();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let project = demo_project(temp_dir.path());
    let output = temp_dir.path().join("out");

    let written = export(&project, &output, "html").expect("Export failed");
    assert!(written.contains(&output.join("index.html")));
    assert!(written.contains(&output.join("slides/03-code.md")));

    let index = fs::read_to_string(output.join("index.html")).unwrap();
    // The first slide's metadata block renames the presentation.
    assert!(index.contains("<title>Demo presentation</title>"));
    assert!(index.contains("dist/theme/white.css"));
    assert!(index.contains("      transition: 'convex',"));
    assert!(index.contains("      slideNumber: true,"));
    assert!(index.contains("<section data-markdown data-separator="));
    assert!(index.contains("# Demo"));
    assert!(!index.contains("title: Demo presentation"));
    assert!(!index.contains("reloadCheck"));

    // Slide sources are copied alongside the page; reserved files are not.
    assert_eq!(count_files_with_pattern(&output, "slides/*.md"), 2);
    assert!(output.join("slides/02-layout.html").is_file());
    assert_eq!(
        fs::read_to_string(output.join("slides/01-intro.md")).unwrap(),
        fs::read_to_string(project.data_dir().join("slides/01-intro.md")).unwrap()
    );
    assert!(!output.join("config.yml").exists());
    assert!(!output.join("index.html.tmpl").exists());
    assert!(output.join("assets/css/custom.css").is_file());
    assert_eq!(count_files_with_pattern(&output, "**/*"), 5);
}

#[test]
fn test_export_is_idempotent() {
    init_logger();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let project = demo_project(temp_dir.path());
    let output = temp_dir.path().join("out");

    export(&project, &output, "html").expect("First export failed");
    let first = snapshot(&output);

    fs::write(output.join("stale.txt"), "left over").unwrap();
    export(&project, &output, "html").expect("Second export failed");
    let second = snapshot(&output);

    assert_eq!(first, second);
    assert!(!output.join("stale.txt").exists());
}

#[test]
fn test_export_into_data_directory_skips_itself() {
    init_logger();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let project = demo_project(temp_dir.path());
    let output = project.data_dir().join("build");
    fs::create_dir_all(output.join("old")).unwrap();
    fs::write(output.join("old/index.html"), "old").unwrap();

    export(&project, &output, "html").expect("Export failed");
    export(&project, &output, "html").expect("Second export failed");

    assert!(output.join("index.html").is_file());
    assert!(!output.join("old").exists());
    assert!(!output.join("build").exists());
    // Source files are untouched.
    assert!(project.data_dir().join("slides/01-intro.md").is_file());
}

#[test]
fn test_export_rejects_output_containing_data_directory() {
    init_logger();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let project = demo_project(temp_dir.path());

    let result = export(&project, temp_dir.path(), "html");
    assert!(matches!(result, Err(SlideError::ValidationError(_))));
    assert!(project.data_dir().join("slides/01-intro.md").is_file());
}

#[test]
fn test_export_unsupported_format() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let project = demo_project(temp_dir.path());
    let output = temp_dir.path().join("out");

    let result = export(&project, &output, "pdf");
    assert!(matches!(result, Err(SlideError::UnsupportedFormat(_))));
    assert!(!output.exists());
}

#[test]
fn test_export_fails_on_invalid_config() {
    init_logger();
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let project = demo_project(temp_dir.path());
    fs::write(
        project.data_dir().join("config.yml"),
        "revealjs:\n  transition: spin\n",
    )
    .unwrap();

    let result = export(&project, &temp_dir.path().join("out"), "html");
    assert!(matches!(result, Err(SlideError::InvalidOption { .. })));
}
