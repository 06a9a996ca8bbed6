use framesplit_core::discovery::{RENAME_SUFFIX_RANGE, scan_categories};
use framesplit_core::external::mocks::MockImageValidator;
use framesplit_core::CoreError;
use std::fs::{self, File};
use std::path::Path;
use tempfile::tempdir;

fn touch(dir: &Path, name: &str) {
    fs::create_dir_all(dir).unwrap();
    File::create(dir.join(name)).unwrap();
}

/// Splits `cats17_0003.jpg` into (17, 3, "jpg").
fn parse_renamed(category: &str, name: &str) -> (u32, u32, String) {
    let rest = name.strip_prefix(category).expect("category prefix");
    let (suffix, tail) = rest.split_once('_').expect("underscore");
    let (counter, ext) = tail.split_once('.').expect("extension");
    assert_eq!(counter.len(), 4, "counter is zero-padded: {name}");
    (suffix.parse().unwrap(), counter.parse().unwrap(), ext.to_string())
}

#[test]
fn test_scan_orders_categories_and_files() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    touch(&root.path().join("zebras"), "b.mp4");
    touch(&root.path().join("zebras"), "a.MOV");
    touch(&root.path().join("ants"), "z.jpg");
    touch(&root.path().join("ants"), "y.webp");
    touch(&root.path().join("ants"), "readme.txt");
    touch(&root.path().join("ants/frames/train"), "frame_x_000001.jpg");
    touch(&root.path().join("empty"), "notes.md");
    touch(root.path(), "inventory.csv");

    let scan = scan_categories(root.path(), false, &MockImageValidator::new())?;

    let names: Vec<&str> = scan.categories.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["ants", "zebras"]);

    let ants = &scan.categories[0];
    assert!(ants.videos.is_empty());
    let images: Vec<String> = ants
        .images
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(images, vec!["y.webp", "z.jpg"]);

    let zebras = &scan.categories[1];
    let videos: Vec<String> = zebras
        .videos
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(videos, vec!["a.MOV", "b.mp4"]);
    assert!(scan.corrupted_images.is_empty());
    Ok(())
}

#[test]
fn test_scan_rejects_bad_roots() {
    let validator = MockImageValidator::new();
    let err = scan_categories(Path::new("/no/such/framesplit/root"), false, &validator).unwrap_err();
    assert!(matches!(err, CoreError::RootNotFound(_)));

    let dir = tempdir().unwrap();
    touch(dir.path(), "file.jpg");
    let err = scan_categories(&dir.path().join("file.jpg"), false, &validator).unwrap_err();
    assert!(matches!(err, CoreError::RootNotDirectory(_)));
}

#[test]
fn test_corrupt_images_are_deleted_and_listed() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let cats = root.path().join("cats");
    touch(&cats, "ok.jpg");
    touch(&cats, "broken.png");
    let only_bad = root.path().join("ghosts");
    touch(&only_bad, "broken.png");

    let validator = MockImageValidator::new();
    validator.mark_corrupt("broken.png");
    let scan = scan_categories(root.path(), false, &validator)?;

    assert_eq!(scan.categories.len(), 1);
    assert_eq!(scan.categories[0].images, vec![cats.join("ok.jpg")]);
    assert_eq!(scan.corrupted_images, vec![cats.join("broken.png"), only_bad.join("broken.png")]);
    assert!(!cats.join("broken.png").exists());
    assert!(!only_bad.join("broken.png").exists());
    Ok(())
}

#[test]
fn test_rename_uses_one_suffix_per_category() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let cats = root.path().join("cats");
    touch(&cats, "b.jpg");
    touch(&cats, "a.PNG");
    // Already looks like a renamed file; must not be clobbered
    touch(&cats, "cats1_0001.jpg");
    touch(&cats, "clip.mp4");

    let scan = scan_categories(root.path(), true, &MockImageValidator::new())?;

    let category = &scan.categories[0];
    assert_eq!(category.images.len(), 3);
    assert_eq!(category.videos, vec![cats.join("clip.mp4")]);

    let mut suffixes = Vec::new();
    let mut counters = Vec::new();
    let mut extensions = Vec::new();
    for image in &category.images {
        assert!(image.is_file());
        let name = image.file_name().unwrap().to_string_lossy().into_owned();
        let (suffix, counter, ext) = parse_renamed("cats", &name);
        suffixes.push(suffix);
        counters.push(counter);
        extensions.push(ext);
    }
    suffixes.dedup();
    assert_eq!(suffixes.len(), 1);
    assert!(RENAME_SUFFIX_RANGE.contains(&suffixes[0]));
    counters.sort();
    assert_eq!(counters, vec![1, 2, 3]);
    extensions.sort();
    assert_eq!(extensions, vec!["PNG", "jpg", "jpg"]);

    // Nothing else is left in the category besides the video and the renamed images
    assert_eq!(fs::read_dir(&cats)?.count(), 4);
    Ok(())
}

#[test]
fn test_rename_skips_corrupt_images() -> Result<(), Box<dyn std::error::Error>> {
    let root = tempdir()?;
    let dogs = root.path().join("dogs");
    touch(&dogs, "a.jpg");
    touch(&dogs, "bad.jpg");
    let validator = MockImageValidator::new();
    validator.mark_corrupt("bad.jpg");

    let scan = scan_categories(root.path(), true, &validator)?;

    assert_eq!(scan.corrupted_images, vec![dogs.join("bad.jpg")]);
    assert_eq!(scan.categories[0].images.len(), 1);
    let name = scan.categories[0].images[0]
        .file_name()
        .unwrap()
        .to_string_lossy()
        .into_owned();
    assert_eq!(parse_renamed("dogs", &name).1, 1);
    // Renamed files are validated again
    assert_eq!(validator.checked_paths().len(), 3);
    Ok(())
}
