use frozen_archive::{ArchiveDir, ArchiveError};
use std::path::Path;
use std::time::SystemTime;
use tempfile::tempdir;

#[test]
fn advisory_lock_cycle() {
    let td = tempdir().unwrap();
    let archive = ArchiveDir::open(td.path()).unwrap();
    let rel = Path::new("cold2frozen.lock");

    assert!(!archive.check_lock_file(rel).unwrap());

    archive.write_lock_file(rel, "splunk-idx-03").unwrap();
    assert!(archive.check_lock_file(rel).unwrap());
    assert_eq!(archive.read_lock_file(rel).unwrap(), "splunk-idx-03");

    let mtime = archive.lock_file_age(rel).unwrap();
    assert!(SystemTime::now().duration_since(mtime).unwrap().as_secs() < 60);

    archive.remove_lock_file(rel).unwrap();
    assert!(!archive.check_lock_file(rel).unwrap());
}

#[test]
fn read_trims_trailing_newline_only() {
    let td = tempdir().unwrap();
    let archive = ArchiveDir::open(td.path()).unwrap();
    let rel = Path::new("c2f.lock");
    archive.write_lock_file(rel, "host with spaces \n").unwrap();
    assert_eq!(archive.read_lock_file(rel).unwrap(), "host with spaces");
}

#[test]
fn read_missing_lock_is_not_found() {
    let td = tempdir().unwrap();
    let archive = ArchiveDir::open(td.path()).unwrap();
    let err = archive.read_lock_file(Path::new("absent.lock")).unwrap_err();
    let archive_err = err.downcast_ref::<ArchiveError>().unwrap();
    assert_eq!(archive_err.code(), "lock_not_found");
}

#[test]
fn lock_file_under_subdirectory() {
    let td = tempdir().unwrap();
    let archive = ArchiveDir::open(td.path()).unwrap();
    let rel = Path::new("locks/main.lock");
    archive.write_lock_file(rel, "idx-host-01").unwrap();
    assert!(archive.check_lock_file(rel).unwrap());
    assert!(td.path().join("locks").join("main.lock").is_file());
}

#[test]
fn lock_path_outside_root_rejected() {
    let td = tempdir().unwrap();
    let archive = ArchiveDir::open(td.path()).unwrap();
    let err = archive
        .write_lock_file(Path::new("../escape.lock"), "host")
        .unwrap_err();
    let archive_err = err.downcast_ref::<ArchiveError>().unwrap();
    assert_eq!(archive_err.code(), "path_escapes_root");
}
