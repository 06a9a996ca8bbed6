use framesplit_core::{CoreError, default_archive_path, export_sanitized_archive};
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;
use tempfile::tempdir;
use zip::ZipArchive;

fn write(path: &Path, contents: &[u8]) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn file_entries(archive: &Path) -> Vec<String> {
    let mut zip = ZipArchive::new(File::open(archive).unwrap()).unwrap();
    let mut names = Vec::new();
    for i in 0..zip.len() {
        let entry = zip.by_index(i).unwrap();
        if !entry.is_dir() {
            names.push(entry.name().to_string());
        }
    }
    names.sort();
    names
}

#[test]
fn test_archive_strips_videos_and_keeps_source() -> Result<(), Box<dyn std::error::Error>> {
    let workspace = tempdir()?;
    let root = workspace.path().join("data");
    write(&root.join("cats/clip.mp4"), b"video");
    write(&root.join("cats/a.png"), b"image");
    write(&root.join("cats/frames/train/frame_clip_000001.jpg"), b"frame");
    write(&root.join("dogs/run.MKV"), b"video");
    write(&root.join("inventory.csv"), b"category\r\n");

    let archive_path = default_archive_path(&root);
    assert_eq!(archive_path, workspace.path().join("data_.zip"));

    let report = export_sanitized_archive(&root, &archive_path)?;

    assert_eq!(report.videos_stripped, 2);
    assert_eq!(report.files_archived, 3);
    assert_eq!(
        file_entries(&archive_path),
        vec!["cats/a.png", "cats/frames/train/frame_clip_000001.jpg", "inventory.csv"]
    );

    let mut zip = ZipArchive::new(File::open(&archive_path)?)?;
    let mut contents = String::new();
    zip.by_name("cats/a.png")?.read_to_string(&mut contents)?;
    assert_eq!(contents, "image");

    // Source untouched, staging directory gone
    assert!(root.join("cats/clip.mp4").is_file());
    assert!(root.join("dogs/run.MKV").is_file());
    let leftovers: Vec<_> = fs::read_dir(workspace.path())?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().starts_with(".framesplit-stage-"))
        .collect();
    assert!(leftovers.is_empty());
    Ok(())
}

#[test]
fn test_archive_replaces_existing_file() -> Result<(), Box<dyn std::error::Error>> {
    let workspace = tempdir()?;
    let root = workspace.path().join("data");
    write(&root.join("cats/a.png"), b"image");
    let archive_path = workspace.path().join("out/export.zip");
    write(&archive_path, b"not a zip");

    let report = export_sanitized_archive(&root, &archive_path)?;

    assert_eq!(report.archive_path, archive_path);
    assert_eq!(file_entries(&archive_path), vec!["cats/a.png"]);
    Ok(())
}

#[test]
fn test_archive_requires_existing_root() {
    let workspace = tempdir().unwrap();
    let err = export_sanitized_archive(
        &workspace.path().join("missing"),
        &workspace.path().join("missing_.zip"),
    )
    .unwrap_err();
    assert!(matches!(err, CoreError::RootNotFound(_)));
}
