//! End-to-end coverage over real files: trackers resolved from config,
//! versions read out of and written into manifests on disk.

use std::str::FromStr;

use assert_fs::prelude::*;
use predicates::prelude::*;

use version_track::config::{resolve_config, Config, Tracker};
use version_track::error::FatalError;
use version_track::ops::replace::{bump_tracked_files, current_version, do_version_replacements};
use version_track::ops::version::TargetVersion;

const MANIFEST: &str = r#"[package]
name = "snapshotfs"
version = "0.1.0"
edition = "2021"

[dependencies]
libc = "0.2"
"#;

const LOCK_FILE: &str = r#"# This file is automatically @generated by Cargo.
# It is not intended for manual editing.
version = 3

[[package]]
name = "libc"
version = "9.9.9"

[[package]]
name = "snapshotfs"
version = "0.1.0"
"#;

fn lock_trackers() -> Vec<Tracker> {
    vec![
        Tracker::new("Cargo.toml"),
        Tracker::for_package("Cargo.lock", "snapshotfs"),
    ]
}

#[test]
fn updates_manifest_in_place() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("Cargo.toml").write_str(MANIFEST).unwrap();

    let trackers = vec![Tracker::new("Cargo.toml")];
    do_version_replacements(&trackers, "0.2.0", temp.path(), false, false).unwrap();

    temp.child("Cargo.toml")
        .assert(predicate::str::contains("version = \"0.2.0\""));
    temp.child("Cargo.toml")
        .assert(predicate::str::contains("name = \"snapshotfs\""));

    temp.close().unwrap();
}

#[test]
fn only_the_version_span_changes() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("Cargo.toml").write_str(MANIFEST).unwrap();

    let trackers = vec![Tracker::new("Cargo.toml")];
    do_version_replacements(&trackers, "0.2.0", temp.path(), false, false).unwrap();

    let expected = MANIFEST.replace("version = \"0.1.0\"", "version = \"0.2.0\"");
    temp.child("Cargo.toml").assert(expected.as_str());

    temp.close().unwrap();
}

#[test]
fn lock_file_update_skips_dependency_versions() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("Cargo.toml").write_str(MANIFEST).unwrap();
    temp.child("Cargo.lock").write_str(LOCK_FILE).unwrap();

    do_version_replacements(&lock_trackers(), "1.0.0", temp.path(), false, false).unwrap();

    temp.child("Cargo.lock")
        .assert(predicate::str::contains("name = \"snapshotfs\"\nversion = \"1.0.0\""));
    temp.child("Cargo.lock")
        .assert(predicate::str::contains("name = \"libc\"\nversion = \"9.9.9\""));
    temp.child("Cargo.toml")
        .assert(predicate::str::contains("version = \"1.0.0\""));

    temp.close().unwrap();
}

#[test]
fn dry_run_leaves_files_untouched() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("Cargo.toml").write_str(MANIFEST).unwrap();
    temp.child("Cargo.lock").write_str(LOCK_FILE).unwrap();

    do_version_replacements(&lock_trackers(), "1.0.0", temp.path(), false, true).unwrap();

    temp.child("Cargo.toml").assert(MANIFEST);
    temp.child("Cargo.lock").assert(LOCK_FILE);

    temp.close().unwrap();
}

#[test]
fn missing_file_fails() {
    let temp = assert_fs::TempDir::new().unwrap();

    let trackers = vec![Tracker::new("Cargo.toml")];
    let err = do_version_replacements(&trackers, "0.2.0", temp.path(), false, false).unwrap_err();
    assert!(matches!(err, FatalError::FileNotFound(_)));

    temp.close().unwrap();
}

#[test]
fn unversioned_file_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("Cargo.toml")
        .write_str("[package]\nname = \"snapshotfs\"\n")
        .unwrap();

    let trackers = vec![Tracker::new("Cargo.toml")];
    let err = do_version_replacements(&trackers, "0.2.0", temp.path(), false, false).unwrap_err();
    assert!(matches!(err, FatalError::VersionNotFound(_)));

    temp.close().unwrap();
}

#[test]
fn current_version_prefers_first_tracker() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("Cargo.toml").write_str(MANIFEST).unwrap();
    temp.child("Cargo.lock").write_str(LOCK_FILE).unwrap();

    let version = current_version(&lock_trackers(), temp.path()).unwrap();
    assert_eq!(version, "0.1.0");

    temp.close().unwrap();
}

#[test]
fn current_version_requires_trackers() {
    let temp = assert_fs::TempDir::new().unwrap();

    let err = current_version(&[], temp.path()).unwrap_err();
    assert!(matches!(err, FatalError::NoTrackedFiles));

    temp.close().unwrap();
}

#[test]
fn bump_patch_end_to_end() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("Cargo.toml").write_str(MANIFEST).unwrap();
    temp.child("Cargo.lock").write_str(LOCK_FILE).unwrap();

    let target = TargetVersion::from_str("patch").unwrap();
    let next = bump_tracked_files(&lock_trackers(), &target, temp.path(), false, false).unwrap();
    assert_eq!(next, Some(semver::Version::new(0, 1, 1)));

    temp.child("Cargo.toml")
        .assert(predicate::str::contains("version = \"0.1.1\""));
    temp.child("Cargo.lock")
        .assert(predicate::str::contains("name = \"snapshotfs\"\nversion = \"0.1.1\""));

    temp.close().unwrap();
}

#[test]
fn bump_to_current_version_is_noop() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("Cargo.toml").write_str(MANIFEST).unwrap();

    let trackers = vec![Tracker::new("Cargo.toml")];
    let target = TargetVersion::from_str("0.1.0").unwrap();
    let next = bump_tracked_files(&trackers, &target, temp.path(), false, false).unwrap();
    assert_eq!(next, None);

    temp.child("Cargo.toml").assert(MANIFEST);

    temp.close().unwrap();
}

#[test]
fn trackers_resolved_from_project_config() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("Cargo.toml").write_str(MANIFEST).unwrap();
    temp.child("Cargo.lock").write_str(LOCK_FILE).unwrap();
    temp.child("track.toml")
        .write_str(
            r#"
[[trackers]]
file = "Cargo.toml"

[[trackers]]
file = "Cargo.lock"
package = "snapshotfs"
"#,
        )
        .unwrap();

    let config = resolve_config(&temp.path().join("Cargo.toml")).unwrap();
    let trackers = config.trackers();
    assert_eq!(trackers.len(), 2);

    do_version_replacements(&trackers, "2.0.0", temp.path(), false, false).unwrap();
    temp.child("Cargo.lock")
        .assert(predicate::str::contains("name = \"snapshotfs\"\nversion = \"2.0.0\""));

    temp.close().unwrap();
}

#[test]
fn defaults_track_the_manifest() {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("Cargo.toml").write_str(MANIFEST).unwrap();

    let config = Config::default();
    do_version_replacements(&config.trackers(), "3.0.0", temp.path(), false, false).unwrap();

    temp.child("Cargo.toml")
        .assert(predicate::str::contains("version = \"3.0.0\""));

    temp.close().unwrap();
}
