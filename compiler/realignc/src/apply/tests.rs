use std::fs;

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn replaces_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.go");
    fs::write(&path, "old").unwrap();

    apply_fix(&path, b"new contents").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "new contents");
    // No temporary files are left behind.
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn staged_write_leaves_original_until_commit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.go");
    fs::write(&path, "original").unwrap();

    let staged = stage(&path, b"replacement").unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    assert_eq!(fs::read_to_string(staged.temp_path()).unwrap(), "replacement");
    assert_eq!(staged.temp_path().parent(), Some(dir.path()));

    staged.commit().unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "replacement");
}

#[test]
fn dropped_stage_is_a_crash_before_rename() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.go");
    fs::write(&path, "original").unwrap();

    let staged = stage(&path, b"half written").unwrap();
    let temp = staged.temp_path().to_path_buf();
    drop(staged);

    assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    assert!(!temp.exists());
}

#[test]
fn missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = apply_fix(&dir.path().join("gone.go"), b"x").unwrap_err();
    assert!(matches!(err, ApplyError::Stat(_)));
    assert!(err.to_string().starts_with("unable to stat the file"));
}

#[test]
fn directories_are_not_regular_files() {
    let dir = tempfile::tempdir().unwrap();
    let err = apply_fix(dir.path(), b"x").unwrap_err();
    assert!(matches!(err, ApplyError::NotRegularFile));
    assert_eq!(err.to_string(), "not a regular file, skipping");
}

#[cfg(unix)]
#[test]
fn symlinks_are_not_followed() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("real.go");
    let link = dir.path().join("link.go");
    fs::write(&target, "original").unwrap();
    std::os::unix::fs::symlink(&target, &link).unwrap();

    let err = apply_fix(&link, b"x").unwrap_err();
    assert!(matches!(err, ApplyError::NotRegularFile));
    assert_eq!(fs::read_to_string(&target).unwrap(), "original");
}

#[cfg(unix)]
#[test]
fn permissions_are_preserved() {
    use std::os::unix::fs::PermissionsExt;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("a.go");
    fs::write(&path, "old").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();

    apply_fix(&path, b"new").unwrap();
    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o640);
}
