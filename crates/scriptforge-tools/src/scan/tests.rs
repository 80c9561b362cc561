//! Tests for the script scanner

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use super::scan;

fn make_root(tmp: &TempDir, name: &str) -> PathBuf {
    let root = tmp.path().join(name);
    fs::create_dir_all(&root).unwrap();
    root
}

fn relative_paths(roots: &[PathBuf]) -> Vec<String> {
    scan(roots)
        .into_iter()
        .map(|f| f.relative_path)
        .collect()
}

#[test]
fn test_scan_empty_roots() {
    assert!(scan(&[]).is_empty());
}

#[test]
fn test_scan_collects_and_sorts_by_code_point() {
    let tmp = TempDir::new().unwrap();
    let root = make_root(&tmp, "Script");
    fs::write(root.join("a.as"), "// a").unwrap();
    fs::write(root.join("B.as"), "// B").unwrap();
    fs::create_dir_all(root.join("sub")).unwrap();
    fs::write(root.join("sub/c.as"), "// c").unwrap();
    fs::write(root.join("notes.txt"), "not a script").unwrap();

    // 'B' (0x42) sorts before 'a' (0x61) under a code-point comparator.
    assert_eq!(
        relative_paths(std::slice::from_ref(&root)),
        vec!["B.as", "a.as", "sub/c.as"]
    );
}

#[test]
fn test_scan_records_size_and_roots() {
    let tmp = TempDir::new().unwrap();
    let root = make_root(&tmp, "Script");
    fs::write(root.join("Main.as"), "class AMain {}").unwrap();

    let files = scan(std::slice::from_ref(&root));
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].size, 14);
    assert_eq!(files[0].root, root);
    assert_eq!(files[0].absolute_path, root.join("Main.as"));
}

#[test]
fn test_scan_prunes_skip_dirs() {
    let tmp = TempDir::new().unwrap();
    let root = make_root(&tmp, "Script");
    for dir in ["Saved", ".git", "Intermediate/nested"] {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
    fs::write(root.join("Saved/stale.as"), "// pruned").unwrap();
    fs::write(root.join(".git/hook.as"), "// pruned").unwrap();
    fs::write(root.join("Intermediate/nested/gen.as"), "// pruned").unwrap();
    fs::write(root.join("Kept.as"), "// kept").unwrap();

    assert_eq!(relative_paths(std::slice::from_ref(&root)), vec!["Kept.as"]);
}

#[test]
fn test_scan_root_with_only_skip_dirs_is_empty() {
    let tmp = TempDir::new().unwrap();
    let root = make_root(&tmp, "Script");
    fs::create_dir_all(root.join("Saved")).unwrap();
    fs::create_dir_all(root.join(".git")).unwrap();
    fs::write(root.join("Saved/stale.as"), "// pruned").unwrap();
    fs::write(root.join(".git/hook.as"), "// pruned").unwrap();

    assert!(scan(std::slice::from_ref(&root)).is_empty());
}

#[test]
fn test_scan_root_named_like_skip_dir_is_still_scanned() {
    let tmp = TempDir::new().unwrap();
    let root = make_root(&tmp, "Saved");
    fs::write(root.join("Inside.as"), "// inside").unwrap();

    assert_eq!(
        relative_paths(std::slice::from_ref(&root)),
        vec!["Inside.as"]
    );
}

#[test]
fn test_scan_skips_missing_roots_silently() {
    let tmp = TempDir::new().unwrap();
    let real = make_root(&tmp, "Script");
    fs::write(real.join("Here.as"), "// here").unwrap();
    let missing = tmp.path().join("DoesNotExist");
    let file_as_root = real.join("Here.as");

    let files = scan(&[missing, file_as_root, real]);
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].relative_path, "Here.as");
}

#[test]
fn test_scan_duplicate_relative_paths_keep_root_order() {
    let tmp = TempDir::new().unwrap();
    let first = make_root(&tmp, "First");
    let second = make_root(&tmp, "Second");
    fs::write(first.join("Shared.as"), "// first").unwrap();
    fs::write(second.join("Shared.as"), "// second").unwrap();

    // Scan with roots reversed to prove the tie-break follows root order,
    // not directory enumeration order.
    let files = scan(&[second.clone(), first.clone()]);
    assert_eq!(files.len(), 2);
    assert_eq!(files[0].root, second);
    assert_eq!(files[1].root, first);
}

#[test]
fn test_scan_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let root = make_root(&tmp, "Script");
    fs::create_dir_all(root.join("Weapons")).unwrap();
    fs::write(root.join("Weapons/Rifle.as"), "class ARifle {}").unwrap();
    fs::write(root.join("Main.as"), "class AMain {}").unwrap();

    let first = scan(std::slice::from_ref(&root));
    let second = scan(std::slice::from_ref(&root));
    assert_eq!(first, second);
}
