//! Saving generated images to disk
//!
//! Files are named `jasmine-<n>.<ext>` with `n` the 1-based slot number.

use jasmine_domain::{DomainError, GallerySnapshot, ImagePayload};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Slot {0} has no image")]
    EmptySlot(usize),

    #[error("Slot {slot} holds an undecodable image: {source}")]
    Decode {
        slot: usize,
        #[source]
        source: DomainError,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Default file name for the image in slot `index` (0-based)
pub fn file_name(index: usize, image: &ImagePayload) -> String {
    format!("jasmine-{}.{}", index + 1, image.file_extension())
}

/// Save one slot's image.
///
/// `target` may be a directory (the default file name is used inside it) or a
/// file path. Without a target the image goes to the current directory.
pub fn save_slot(
    snapshot: &GallerySnapshot,
    index: usize,
    target: Option<&Path>,
) -> Result<PathBuf, SaveError> {
    let image = snapshot
        .image(index)
        .ok_or(SaveError::EmptySlot(index + 1))?;

    let path = match target {
        Some(target) if target.is_dir() => target.join(file_name(index, image)),
        Some(target) => target.to_path_buf(),
        None => PathBuf::from(file_name(index, image)),
    };

    write_image(index, image, &path)?;
    Ok(path)
}

/// Save every filled slot into `dir`, creating it if needed
pub fn save_all(snapshot: &GallerySnapshot, dir: &Path) -> Result<Vec<PathBuf>, SaveError> {
    fs::create_dir_all(dir).map_err(|source| SaveError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut saved = Vec::new();
    for slot in &snapshot.slots {
        if let Some(image) = slot.image() {
            let path = dir.join(file_name(slot.index(), image));
            write_image(slot.index(), image, &path)?;
            saved.push(path);
        }
    }
    Ok(saved)
}

fn write_image(index: usize, image: &ImagePayload, path: &Path) -> Result<(), SaveError> {
    let bytes = image.decode().map_err(|source| SaveError::Decode {
        slot: index + 1,
        source,
    })?;
    fs::write(path, bytes).map_err(|source| SaveError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use jasmine_domain::{Gallery, GridLayout, Prompt};
    use tempfile::TempDir;

    fn snapshot() -> GallerySnapshot {
        let mut gallery = Gallery::new(&GridLayout::with_slot_count(3));
        let session = gallery.begin_session(&Prompt::new("a cat"));
        gallery
            .accept(session.tag(), 0, ImagePayload::from_bytes("image/png", b"first"))
            .unwrap();
        gallery
            .accept(session.tag(), 2, ImagePayload::from_bytes("image/jpeg", b"third"))
            .unwrap();
        gallery.finish_session(session.tag());
        gallery.snapshot()
    }

    #[test]
    fn test_save_slot_into_directory() {
        let dir = TempDir::new().unwrap();
        let path = save_slot(&snapshot(), 2, Some(dir.path())).unwrap();

        assert_eq!(path, dir.path().join("jasmine-3.jpeg"));
        assert_eq!(fs::read(&path).unwrap(), b"third");
    }

    #[test]
    fn test_save_slot_to_explicit_file() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("cat.png");
        let path = save_slot(&snapshot(), 0, Some(&target)).unwrap();

        assert_eq!(path, target);
        assert_eq!(fs::read(&target).unwrap(), b"first");
    }

    #[test]
    fn test_save_empty_slot_fails() {
        let dir = TempDir::new().unwrap();
        let err = save_slot(&snapshot(), 1, Some(dir.path())).unwrap_err();

        assert!(matches!(err, SaveError::EmptySlot(2)));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_save_all_writes_filled_slots() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("out");
        let saved = save_all(&snapshot(), &out).unwrap();

        assert_eq!(
            saved,
            vec![out.join("jasmine-1.png"), out.join("jasmine-3.jpeg")]
        );
        assert_eq!(fs::read(out.join("jasmine-1.png")).unwrap(), b"first");
    }
}
