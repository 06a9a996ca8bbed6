//! Sanitized dataset archive export.
//!
//! The finished dataset is copied into a staging directory, every video file
//! is deleted from the copy, and the copy is compressed into a zip archive.
//! The source tree is never modified and the staging copy is always removed.

use crate::discovery::has_video_extension;
use crate::error::{CoreError, CoreResult};

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::Builder as TempFileBuilder;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Result of an archive export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveReport {
    pub archive_path: PathBuf,
    /// Files stored in the archive
    pub files_archived: usize,
    /// Video files removed from the staged copy
    pub videos_stripped: usize,
}

/// Sorted entries of a directory.
fn sorted_dir(dir: &Path) -> CoreResult<Vec<fs::DirEntry>> {
    let mut entries = fs::read_dir(dir)?.collect::<io::Result<Vec<_>>>()?;
    entries.sort_by_key(fs::DirEntry::file_name);
    Ok(entries)
}

/// Recursively copies `src` into `dst`. Symlinks are skipped.
fn copy_tree(src: &Path, dst: &Path) -> CoreResult<usize> {
    fs::create_dir_all(dst)?;
    let mut copied = 0;
    for entry in sorted_dir(src)? {
        let file_type = entry.file_type()?;
        let target = dst.join(entry.file_name());
        if file_type.is_dir() {
            copied += copy_tree(&entry.path(), &target)?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        } else {
            log::debug!("Skipping non-regular entry: {}", entry.path().display());
        }
    }
    Ok(copied)
}

/// Deletes every file with a video extension under `root`.
fn strip_videos(root: &Path) -> CoreResult<usize> {
    let mut removed = 0;
    for entry in sorted_dir(root)? {
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            removed += strip_videos(&path)?;
        } else if has_video_extension(&path) {
            fs::remove_file(&path)?;
            log::debug!("  - Removed video: {}", path.display());
            removed += 1;
        }
    }
    Ok(removed)
}

/// `/`-separated archive entry name for `path` below `base`.
fn entry_name(base: &Path, path: &Path) -> CoreResult<String> {
    let relative = path.strip_prefix(base).map_err(|_| {
        CoreError::PathError(format!(
            "{} is not below {}",
            path.display(),
            base.display()
        ))
    })?;
    Ok(relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/"))
}

fn add_tree<W: io::Write + io::Seek>(
    zip: &mut ZipWriter<W>,
    base: &Path,
    dir: &Path,
    options: SimpleFileOptions,
) -> CoreResult<usize> {
    let mut files = 0;
    for entry in sorted_dir(dir)? {
        let path = entry.path();
        let name = entry_name(base, &path)?;
        if entry.file_type()?.is_dir() {
            zip.add_directory(format!("{name}/"), options)?;
            files += add_tree(zip, base, &path, options)?;
        } else {
            zip.start_file(name, options)?;
            let mut source = File::open(&path)?;
            io::copy(&mut source, zip)?;
            files += 1;
        }
    }
    Ok(files)
}

/// Compresses the contents of `root` into a deflate zip at `archive_path`.
fn write_zip(root: &Path, archive_path: &Path) -> CoreResult<usize> {
    let file = File::create(archive_path)?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let files = add_tree(&mut zip, root, root, options)?;
    zip.finish()?;
    Ok(files)
}

/// Writes a video-free zip of `source_root` to `archive_path`, replacing any
/// existing archive.
pub fn export_sanitized_archive(source_root: &Path, archive_path: &Path) -> CoreResult<ArchiveReport> {
    if !source_root.is_dir() {
        return Err(CoreError::RootNotFound(source_root.to_path_buf()));
    }

    let parent = archive_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
    fs::create_dir_all(&parent)?;
    if archive_path.exists() {
        log::info!("Replacing existing archive: {}", archive_path.display());
        fs::remove_file(archive_path)?;
    }

    // The staging copy must live outside the tree being copied
    let mut builder = TempFileBuilder::new();
    builder.prefix(".framesplit-stage-");
    let inside_source = match (parent.canonicalize(), source_root.canonicalize()) {
        (Ok(p), Ok(s)) => p.starts_with(s),
        _ => false,
    };
    let staging = if inside_source {
        builder.tempdir()?
    } else {
        builder.tempdir_in(&parent)?
    };
    let staged_root = staging.path().join("dataset");

    log::info!(
        "Copying '{}' -> '{}' ...",
        source_root.display(),
        staged_root.display()
    );
    let copied = copy_tree(source_root, &staged_root)?;
    let videos_stripped = strip_videos(&staged_root)?;
    log::info!("Copied {} files, removed {} video files from the copy", copied, videos_stripped);

    log::info!("Compressing into '{}' ...", archive_path.display());
    let files_archived = write_zip(&staged_root, archive_path)?;
    staging.close()?;

    Ok(ArchiveReport {
        archive_path: archive_path.to_path_buf(),
        files_archived,
        videos_stripped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_names_use_forward_slashes() {
        let base = Path::new("/stage/dataset");
        assert_eq!(
            entry_name(base, Path::new("/stage/dataset/cats/frames/train/f.jpg")).unwrap(),
            "cats/frames/train/f.jpg"
        );
        assert!(entry_name(base, Path::new("/elsewhere/f.jpg")).is_err());
    }

    #[test]
    fn strip_videos_only_removes_video_extensions() {
        let dir = tempfile::tempdir().unwrap();
        let cat = dir.path().join("cats");
        fs::create_dir_all(cat.join("frames/train")).unwrap();
        fs::write(cat.join("clip.MP4"), b"v").unwrap();
        fs::write(cat.join("other.ts"), b"v").unwrap();
        fs::write(cat.join("a.png"), b"i").unwrap();
        fs::write(cat.join("frames/train/frame_clip_000001.jpg"), b"f").unwrap();

        assert_eq!(strip_videos(dir.path()).unwrap(), 2);
        assert!(!cat.join("clip.MP4").exists());
        assert!(cat.join("a.png").exists());
        assert!(cat.join("frames/train/frame_clip_000001.jpg").exists());
    }
}
