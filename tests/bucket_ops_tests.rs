use assert_fs::prelude::*;
use frozen_archive::{ArchiveDir, ArchiveError};
use std::path::Path;

fn seed_source_bucket(staging: &assert_fs::TempDir) -> std::path::PathBuf {
    let bucket = staging.child("db_1694000000_1693000000_42");
    bucket.create_dir_all().unwrap();
    bucket.child("Hosts.data").write_str("hosts").unwrap();
    bucket.child("Sources.data").write_str("sources").unwrap();
    bucket
        .child("rawdata/journal.gz")
        .write_binary(&[0u8; 30])
        .unwrap();
    bucket.path().to_path_buf()
}

#[test]
fn bucket_size_sums_known_tree() {
    let temp = assert_fs::TempDir::new().unwrap();
    let archive = ArchiveDir::open(temp.path()).unwrap();
    temp.child("main/db_1/a").write_binary(&[0u8; 10]).unwrap();
    temp.child("main/db_1/b").write_binary(&[0u8; 20]).unwrap();
    temp.child("main/db_1/raw/c").write_binary(&[0u8; 30]).unwrap();

    assert_eq!(archive.bucket_size(Path::new("main/db_1")).unwrap(), 60);
}

#[test]
fn bucket_exists_reflects_filesystem() {
    let temp = assert_fs::TempDir::new().unwrap();
    let archive = ArchiveDir::open(temp.path()).unwrap();
    assert!(!archive.bucket_exists(Path::new("main/db_1")).unwrap());
    temp.child("main/db_1").create_dir_all().unwrap();
    assert!(archive.bucket_exists(Path::new("main/db_1")).unwrap());
}

#[test]
fn bucket_dir_is_a_pure_join() {
    let temp = assert_fs::TempDir::new().unwrap();
    let archive = ArchiveDir::open(temp.path()).unwrap();
    let p = archive.bucket_dir(Path::new("main/db_9")).unwrap();
    assert!(p.starts_with(archive.root()));
    // No directory was created by asking for the path.
    assert!(!p.exists());
}

#[test]
fn copy_then_size_then_remove() {
    let staging = assert_fs::TempDir::new().unwrap();
    let temp = assert_fs::TempDir::new().unwrap();
    let archive = ArchiveDir::open(temp.path()).unwrap();
    let src = seed_source_bucket(&staging);

    archive.create_index_dir("main").unwrap();
    let dest_rel = Path::new("main/db_1694000000_1693000000_42");
    archive.bucket_copy(&src, dest_rel).unwrap();

    assert!(archive.bucket_exists(dest_rel).unwrap());
    let expected: u64 = 5 + 7 + 30;
    assert_eq!(archive.bucket_size(dest_rel).unwrap(), expected);
    assert_eq!(
        archive.list_buckets("main").unwrap(),
        vec!["db_1694000000_1693000000_42".to_string()]
    );

    archive
        .remove_bucket("main", "db_1694000000_1693000000_42")
        .unwrap();
    assert!(!archive.bucket_exists(dest_rel).unwrap());
    // Index directory survives bucket removal.
    assert!(temp.path().join("main").is_dir());
}

#[test]
fn copy_to_existing_destination_fails() {
    let staging = assert_fs::TempDir::new().unwrap();
    let temp = assert_fs::TempDir::new().unwrap();
    let archive = ArchiveDir::open(temp.path()).unwrap();
    let src = seed_source_bucket(&staging);
    temp.child("main/db_1694000000_1693000000_42")
        .create_dir_all()
        .unwrap();

    let err = archive
        .bucket_copy(&src, Path::new("main/db_1694000000_1693000000_42"))
        .unwrap_err();
    let archive_err = err.downcast_ref::<ArchiveError>().unwrap();
    assert_eq!(archive_err.code(), "destination_exists");
}

#[test]
fn copy_destination_may_not_escape_root() {
    let staging = assert_fs::TempDir::new().unwrap();
    let temp = assert_fs::TempDir::new().unwrap();
    let archive = ArchiveDir::open(temp.path()).unwrap();
    let src = seed_source_bucket(&staging);

    let err = archive
        .bucket_copy(&src, Path::new("../stolen/db_1"))
        .unwrap_err();
    let archive_err = err.downcast_ref::<ArchiveError>().unwrap();
    assert_eq!(archive_err.code(), "path_escapes_root");
}

#[test]
fn remove_missing_bucket_is_ok() {
    let temp = assert_fs::TempDir::new().unwrap();
    let archive = ArchiveDir::open(temp.path()).unwrap();
    archive.create_index_dir("main").unwrap();
    archive.remove_bucket("main", "db_404").unwrap();
}

#[test]
fn remove_reports_real_failures() {
    let temp = assert_fs::TempDir::new().unwrap();
    let archive = ArchiveDir::open(temp.path()).unwrap();
    // "index/bucket" resolving through a parent component must error, not
    // silently no-op.
    assert!(archive.remove_bucket("..", "db_1").is_err());
}
