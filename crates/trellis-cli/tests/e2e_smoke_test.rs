use std::{fs, path::PathBuf};

use tempfile::tempdir;

use trellis_cli::{Args, run, run_with_output};

fn samples_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .join("samples")
}

/// Collects all .trellis files from a directory
fn collect_graph_files(dir: PathBuf) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = if let Ok(entries) = fs::read_dir(&dir) {
        entries
            .flatten()
            .map(|entry| entry.path())
            .filter(|path| {
                path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("trellis")
            })
            .collect()
    } else {
        Vec::new()
    };

    files.sort();
    files
}

fn args(input: &PathBuf, output: &PathBuf) -> Args {
    Args {
        input: input.to_string_lossy().to_string(),
        output: output.to_string_lossy().to_string(),
        config: None,
        log_level: "off".to_string(),
        seed: Some(7),
        iterations: Some(200),
        paths_from: None,
    }
}

#[test]
fn e2e_smoke_test_samples() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let samples = collect_graph_files(samples_dir());
    assert!(!samples.is_empty(), "No samples found in samples/");

    let mut failed = Vec::new();
    for sample in &samples {
        let output = temp_dir.path().join(format!(
            "{}.svg",
            sample.file_stem().unwrap().to_string_lossy()
        ));

        match run(&args(sample, &output)) {
            Ok(()) => {
                let svg = fs::read_to_string(&output).unwrap();
                if !svg.contains("<svg") {
                    failed.push(format!("{}: output is not SVG", sample.display()));
                }
            }
            Err(err) => failed.push(format!("{}: {err}", sample.display())),
        }
    }

    assert!(failed.is_empty(), "Failed samples:\n{}", failed.join("\n"));
}

#[test]
fn e2e_paths_report() {
    let temp_dir = tempdir().unwrap();
    let output = temp_dir.path().join("detour.svg");
    let mut cli_args = args(&samples_dir().join("detour.trellis"), &output);
    cli_args.paths_from = Some("s".to_string());

    let mut report = Vec::new();
    run_with_output(&cli_args, &mut report).unwrap();
    let report = String::from_utf8(report).unwrap();

    assert!(report.contains("t\t3\ts -> b -> a -> t"), "report was:\n{report}");
    assert!(report.contains("island\tunreachable"));
}

#[test]
fn e2e_parse_error() {
    let temp_dir = tempdir().unwrap();
    let input = temp_dir.path().join("broken.trellis");
    let output = temp_dir.path().join("broken.svg");
    fs::write(&input, "a -- b [weight=\"heavy\"];").unwrap();

    let err = run(&args(&input, &output)).unwrap_err();
    assert!(matches!(err, trellis::TrellisError::Parse { .. }));
    assert!(!output.exists());
}

#[test]
fn e2e_config_file() {
    let temp_dir = tempdir().unwrap();
    let config = temp_dir.path().join("config.toml");
    fs::write(&config, "[render]\nwidth = 900.0\nheight = 500.0\n").unwrap();
    let output = temp_dir.path().join("ring.svg");

    let mut cli_args = args(&samples_dir().join("ring.trellis"), &output);
    cli_args.config = Some(config.to_string_lossy().to_string());
    run(&cli_args).unwrap();

    let svg = fs::read_to_string(&output).unwrap();
    assert!(svg.contains("viewBox=\"0 0 900 500\""));
}
