use packbench::codecs::{CodecKind, CodecSet};
use packbench::config::{normalize_args, BenchConfig};
use packbench::error::BenchError;
use packbench::generator::Pattern;
use packbench::report::ReportMode;
use std::process::Command;

#[test]
fn test_defaults() {
    let config = BenchConfig::parse_from(["cli"]).unwrap();
    assert_eq!(config, BenchConfig::default());
    assert_eq!(config.bits_begin, 1);
    assert_eq!(config.bits_end, 32);
    assert_eq!(config.seq_len(), 1 << 25);
    assert_eq!(config.repeats, 16);
    assert_eq!(config.codecs, CodecSet::all());
    assert_eq!(config.separator, '\t');
}

#[test]
fn test_single_dash_options() {
    let args = normalize_args(["cli", "-bb", "3", "-be", "9", "-sep", ","]);
    assert_eq!(args[1], "--bb");
    assert_eq!(args[3], "--be");
    assert_eq!(args[5], "--sep");

    let config = BenchConfig::parse_from([
        "cli", "-bb", "3", "-be", "9", "-s", "10", "-r", "4", "-b", "forblock",
        "-b", "fastpfor", "-t", "-sep", ",",
    ])
    .unwrap();
    assert_eq!(config.bits_begin, 3);
    assert_eq!(config.bits_end, 9);
    assert_eq!(config.seq_len(), 1024);
    assert_eq!(config.repeats, 4);
    assert_eq!(config.mode, ReportMode::Time);
    assert_eq!(config.separator, ',');
    assert!(!config.codecs.contains(CodecKind::Fixed));
    assert!(config.codecs.contains(CodecKind::ForBlock));
    assert!(config.codecs.contains(CodecKind::MiniBlock));
}

#[test]
fn test_long_options() {
    let config = BenchConfig::parse_from([
        "cli", "--bb", "2", "--be", "2", "--bench", "sserialize", "--pattern",
        "uniform", "--seed", "17",
    ])
    .unwrap();
    assert_eq!(config.widths(), 2..=2);
    assert_eq!(config.pattern, Pattern::Uniform { seed: 17 });
    assert_eq!(config.codecs.iter().collect::<Vec<_>>(), vec![CodecKind::Fixed]);
}

#[test]
fn test_bad_arguments() {
    assert!(matches!(
        BenchConfig::parse_from(["cli", "-b", "xyz"]),
        Err(BenchError::UnknownCodecSelector(name)) if name == "xyz"
    ));
    for args in [
        vec!["cli", "-bb", "0"],
        vec!["cli", "-bb", "9", "-be", "3"],
        vec!["cli", "-be", "57"],
        vec!["cli", "-r", "0"],
        vec!["cli", "-s", "40"],
        vec!["cli", "-sep", "ab"],
        vec!["cli", "-s", "4"],
        vec!["cli", "-s", "3", "-b", "sserialize", "-b", "fastpfor"],
    ] {
        let err = BenchConfig::parse_from(args.clone()).unwrap_err();
        assert!(!err.is_fatal(), "{:?}", args);
    }
    assert!(matches!(
        BenchConfig::parse_from(["cli", "-r", "many"]),
        Err(BenchError::Cli(_))
    ));
}

#[test]
fn test_short_sequences() {
    assert!(matches!(
        BenchConfig::parse_from(["cli", "-s", "4"]),
        Err(BenchError::InvalidArgument(_))
    ));
    let config = BenchConfig::parse_from(["cli", "-s", "0", "-b", "forblock"]).unwrap();
    assert_eq!(config.seq_len(), 1);
    let config = BenchConfig::parse_from([
        "cli", "-s", "3", "-bb", "33", "-be", "40", "-b", "sserialize", "-b", "fastpfor",
    ])
    .unwrap();
    assert_eq!(config.seq_len(), 8);
}

fn assert_usage_exit(args: &[&str]) {
    let output = Command::new(env!("CARGO_BIN_EXE_cli"))
        .args(args)
        .output()
        .unwrap();
    assert!(!output.status.success(), "{:?}", args);
    #[cfg(unix)]
    assert_eq!(output.status.code(), Some(255), "{:?}", args);
    assert!(output.stdout.is_empty(), "{:?}", args);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.to_lowercase().contains("usage"), "{:?}", args);
}

#[test]
fn test_cli_unknown_codec_exits() {
    assert_usage_exit(&["-b", "xyz"]);
    let output = Command::new(env!("CARGO_BIN_EXE_cli"))
        .args(["-b", "xyz"])
        .output()
        .unwrap();
    assert!(String::from_utf8_lossy(&output.stderr).contains("xyz"));
}

#[test]
fn test_cli_bad_values_exit() {
    assert_usage_exit(&["-r", "many"]);
    assert_usage_exit(&["--no-such-option"]);
    assert_usage_exit(&["-s", "40"]);
    assert_usage_exit(&["-bb", "1", "-be", "1", "-s", "4"]);
}

#[test]
fn test_cli_single_codec_row() {
    let output = Command::new(env!("CARGO_BIN_EXE_cli"))
        .args(["-b", "forblock", "-bb", "3", "-be", "3", "-s", "3", "-r", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<&str> = stdout
        .lines()
        .filter(|line| !line.starts_with('#') && !line.starts_with("bits"))
        .collect();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].split('\t').count(), 3);
    assert!(rows[0].starts_with("3\t"));
}

#[test]
fn test_cli_help() {
    let output = Command::new(env!("CARGO_BIN_EXE_cli"))
        .arg("--help")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("--bench"));
}
