use dupseek::duplicates::{DuplicateFinder, GroupKey};
use dupseek::scanner::FileRecord;
use std::path::Path;

use super::mem_fs::sample_tree;

fn paths(files: &[FileRecord]) -> Vec<String> {
    files.iter().map(|f| f.path.display().to_string()).collect()
}

#[test]
fn test_seek_unlimited_depth() {
    let mut finder = DuplicateFinder::new(sample_tree());
    let groups = finder.seek(Path::new("./tmp"), 0);

    assert_eq!(groups.len(), 2);
    assert_eq!(
        paths(groups.get(&GroupKey::new("copy1.txt", 28)).unwrap()),
        vec!["tmp/copy1.txt", "tmp/A/copy1.txt", "tmp/A/AA/copy1.txt"]
    );
    assert_eq!(
        paths(groups.get(&GroupKey::new("copy2.txt", 28)).unwrap()),
        vec!["tmp/copy2.txt", "tmp/B/copy2.txt"]
    );
    assert!(groups.get(&GroupKey::new("unique.txt", 32)).is_none());
    assert!(groups.get(&GroupKey::new("copy1.txt", 35)).is_none());
}

#[test]
fn test_seek_negative_depth_is_unlimited() {
    let mut finder = DuplicateFinder::new(sample_tree());
    let groups = finder.seek(Path::new("tmp"), -5);
    assert_eq!(groups.file_count(), 5);
}

#[test]
fn test_seek_depth_two() {
    let mut finder = DuplicateFinder::new(sample_tree());
    let groups = finder.seek(Path::new("./tmp"), 2);

    assert_eq!(
        paths(groups.get(&GroupKey::new("copy1.txt", 28)).unwrap()),
        vec!["tmp/copy1.txt", "tmp/A/copy1.txt"]
    );
    assert_eq!(
        paths(groups.get(&GroupKey::new("copy2.txt", 28)).unwrap()),
        vec!["tmp/copy2.txt", "tmp/B/copy2.txt"]
    );
}

#[test]
fn test_seek_depth_one_has_no_duplicates() {
    let mut finder = DuplicateFinder::new(sample_tree());
    assert!(finder.seek(Path::new("tmp"), 1).is_empty());
}

#[test]
fn test_seek_missing_root_is_empty() {
    let mut finder = DuplicateFinder::new(sample_tree());
    assert!(finder.seek(Path::new("nope"), 0).is_empty());
}

#[test]
fn test_print_unlimited_depth() {
    let mut finder = DuplicateFinder::new(sample_tree());
    finder.seek(Path::new("./tmp"), 0);

    let mut out = Vec::new();
    finder.print_duplicates(&mut out).unwrap();

    let expected = "   File Name|            File Path|   File Size|
   copy1.txt|        tmp/copy1.txt|          28|
   copy1.txt|      tmp/A/copy1.txt|          28|
   copy1.txt|   tmp/A/AA/copy1.txt|          28|
   copy2.txt|        tmp/copy2.txt|          28|
   copy2.txt|      tmp/B/copy2.txt|          28|
";
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn test_print_depth_two() {
    let mut finder = DuplicateFinder::new(sample_tree());
    finder.seek(Path::new("./tmp"), 2);

    let mut out = Vec::new();
    finder.print_duplicates(&mut out).unwrap();

    let expected = "   File Name|         File Path|   File Size|
   copy1.txt|     tmp/copy1.txt|          28|
   copy1.txt|   tmp/A/copy1.txt|          28|
   copy2.txt|     tmp/copy2.txt|          28|
   copy2.txt|   tmp/B/copy2.txt|          28|
";
    assert_eq!(String::from_utf8(out).unwrap(), expected);
}

#[test]
fn test_print_is_idempotent() {
    let mut finder = DuplicateFinder::new(sample_tree());
    finder.seek(Path::new("tmp"), 0);

    let mut first = Vec::new();
    let mut second = Vec::new();
    finder.print_duplicates(&mut first).unwrap();
    finder.print_duplicates(&mut second).unwrap();

    assert!(!first.is_empty());
    assert_eq!(first, second);
}
