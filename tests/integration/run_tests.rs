use clap::Parser;
use dupseek::cli::Cli;
use dupseek::config::Config;
use dupseek::duplicates::DuplicateFinder;
use dupseek::error::ExitCode;
use dupseek::run_scan;
use std::io::Cursor;

use super::mem_fs::{sample_tree, MemFs};

/// Run a scan over the sample tree, answering the prompt with `answer`.
fn run(args: &[&str], answer: &str) -> (ExitCode, String, DuplicateFinder<MemFs>) {
    let mut argv = vec!["dupseek"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();

    let mut finder = DuplicateFinder::new(sample_tree());
    let mut input = Cursor::new(answer.to_string());
    let mut out = Vec::new();

    let code = run_scan(&cli, Config::default(), &mut finder, &mut input, &mut out).unwrap();
    (code, String::from_utf8(out).unwrap(), finder)
}

const COPIES: [&str; 3] = ["tmp/A/copy1.txt", "tmp/A/AA/copy1.txt", "tmp/B/copy2.txt"];

#[test]
fn test_report_only() {
    let (code, out, finder) = run(&["--path", "./tmp"], "y\n");
    assert_eq!(code, ExitCode::Success);
    assert!(out.starts_with("   File Name|"));
    assert!(!out.contains("Delete duplicates"));
    for path in COPIES {
        assert!(finder.file_system().exists(path));
    }
}

#[test]
fn test_json_report() {
    let (code, out, _) = run(&["--path", "tmp", "--format", "json"], "");
    assert_eq!(code, ExitCode::Success);

    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(value["duplicate_groups"], 2);
    assert_eq!(value["groups"][0]["key"], "copy1.txt_28");
    assert_eq!(value["groups"][1]["key"], "copy2.txt_28");
}

#[test]
fn test_remove_confirmed() {
    for answer in ["y\n", "YES\n", "  Yes  \n"] {
        let (code, out, finder) = run(&["--path", "tmp", "--remove"], answer);
        assert_eq!(code, ExitCode::Success);
        assert!(out.ends_with("Delete duplicates(Y/n): "));
        for path in COPIES {
            assert!(!finder.file_system().exists(path), "{} survived {:?}", path, answer);
        }
        assert!(finder.file_system().exists("tmp/copy1.txt"));
        assert!(finder.file_system().exists("tmp/copy2.txt"));
    }
}

#[test]
fn test_remove_declined() {
    for answer in ["n\n", "\n", "yep\n"] {
        let (code, _, finder) = run(&["--path", "tmp", "--remove"], answer);
        assert_eq!(code, ExitCode::Success);
        for path in COPIES {
            assert!(finder.file_system().exists(path));
        }
    }
}

#[test]
fn test_remove_respects_depth() {
    let (_, _, finder) = run(&["--path", "tmp", "--maxdepth", "2", "--remove"], "y\n");
    let fs = finder.file_system();
    assert!(!fs.exists("tmp/A/copy1.txt"));
    assert!(!fs.exists("tmp/B/copy2.txt"));
    assert!(fs.exists("tmp/A/AA/copy1.txt"));
}

#[test]
fn test_no_duplicates_no_prompt() {
    let (code, out, _) = run(&["--path", "tmp", "--maxdepth", "1", "--remove"], "");
    assert_eq!(code, ExitCode::Success);
    assert!(out.is_empty());
}

#[test]
fn test_prompt_read_failure_skips_deletion() {
    // Empty input: the confirmation read hits end of input.
    let (code, out, finder) = run(&["--path", "tmp", "--remove"], "");
    assert_eq!(code, ExitCode::ConfirmationFailed);
    assert_eq!(code.as_i32(), 1);
    // The report was still written in full.
    assert!(out.contains("tmp/B/copy2.txt"));
    for path in COPIES {
        assert!(finder.file_system().exists(path));
    }
}

#[test]
fn test_print_config_skips_scan() {
    let (code, out, finder) = run(&["--path", "tmp", "--maxdepth", "-1", "--print-config"], "");
    assert_eq!(code, ExitCode::Success);
    assert!(out.contains("[scan]"));
    assert!(out.contains("max_depth = -1"));
    assert!(out.contains("[ticker]"));
    assert!(finder.groups().is_empty());
}
