//! Zip archiver for configuration backups.

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use plinth_core::{
    application::{ApplicationError, ports::Archiver},
    error::{Context as _, PlinthError, PlinthResult},
};
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;
use zip::{CompressionMethod, ZipArchive, ZipWriter, write::SimpleFileOptions};

/// Deflate-compressed zip archives.
///
/// Each source is stored under its base name, so archiving
/// `/cfg/templates` and `/cfg/config.json` yields `templates/...` and
/// `config.json` at the top of the archive.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipArchiver;

impl ZipArchiver {
    pub fn new() -> Self {
        Self
    }
}

impl Archiver for ZipArchiver {
    #[instrument(skip(self, sources), fields(sources = sources.len(), destination = %destination.display()))]
    fn archive(&self, sources: &[PathBuf], destination: &Path) -> PlinthResult<()> {
        let fail = |reason: String| -> PlinthError {
            ApplicationError::ArchiveFailed {
                path: destination.to_path_buf(),
                reason,
            }
            .into()
        };

        let file = File::create(destination).map_err(|e| fail(e.to_string()))?;
        let mut writer = ZipWriter::new(file);
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        for source in sources {
            let base = source.parent().unwrap_or_else(|| Path::new(""));
            for entry in WalkDir::new(source).sort_by_file_name() {
                let entry = entry.map_err(|e| fail(e.to_string()))?;
                let relative = entry
                    .path()
                    .strip_prefix(base)
                    .map_err(|e| fail(e.to_string()))?;
                let name = entry_name(relative);

                if entry.file_type().is_dir() {
                    writer
                        .add_directory(name, options)
                        .map_err(|e| fail(e.to_string()))?;
                } else {
                    debug!(entry = %name, "Adding");
                    writer
                        .start_file(name, options)
                        .map_err(|e| fail(e.to_string()))?;
                    let mut input =
                        File::open(entry.path()).map_err(|e| fail(e.to_string()))?;
                    io::copy(&mut input, &mut writer).map_err(|e| fail(e.to_string()))?;
                }
            }
        }

        writer.finish().map_err(|e| fail(e.to_string()))?;
        Ok(())
    }

    #[instrument(skip(self), fields(archive = %archive.display(), destination = %destination.display()))]
    fn extract(&self, archive: &Path, destination: &Path) -> PlinthResult<()> {
        let fail = |reason: String| -> PlinthError {
            ApplicationError::ArchiveFailed {
                path: archive.to_path_buf(),
                reason,
            }
            .into()
        };

        let file = File::open(archive).map_err(|e| fail(e.to_string()))?;
        let mut reader = ZipArchive::new(file).map_err(|e| fail(e.to_string()))?;

        for index in 0..reader.len() {
            let mut entry = reader.by_index(index).map_err(|e| fail(e.to_string()))?;
            let Some(relative) = entry.enclosed_name() else {
                warn!(entry = entry.name(), "Skipping entry outside the destination");
                continue;
            };
            let target = destination.join(relative);

            if entry.is_dir() {
                fs::create_dir_all(&target).at_path(&target)?;
                continue;
            }

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).at_path(parent)?;
            }
            let mut output = File::create(&target).at_path(&target)?;
            io::copy(&mut entry, &mut output).map_err(|e| fail(e.to_string()))?;
        }

        Ok(())
    }
}

/// Zip entry names always use forward slashes.
fn entry_name(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn round_trips_files_and_directories() {
        let src = TempDir::new().unwrap();
        let templates = src.path().join("templates/files");
        fs::create_dir_all(&templates).unwrap();
        fs::write(templates.join("notes.json"), "# {{ project_name }}").unwrap();
        fs::write(src.path().join("config.json"), "{}\n").unwrap();

        let out = TempDir::new().unwrap();
        let archive = out.path().join("b.zip");
        ZipArchiver::new()
            .archive(
                &[src.path().join("templates"), src.path().join("config.json")],
                &archive,
            )
            .unwrap();

        let dest = TempDir::new().unwrap();
        ZipArchiver::new().extract(&archive, dest.path()).unwrap();

        assert_eq!(
            fs::read_to_string(dest.path().join("templates/files/notes.json")).unwrap(),
            "# {{ project_name }}"
        );
        assert_eq!(
            fs::read_to_string(dest.path().join("config.json")).unwrap(),
            "{}\n"
        );
    }

    #[test]
    fn extract_overwrites_existing_files() {
        let src = TempDir::new().unwrap();
        fs::write(src.path().join("config.json"), "new").unwrap();
        let archive = src.path().join("b.zip");
        ZipArchiver::new()
            .archive(&[src.path().join("config.json")], &archive)
            .unwrap();

        let dest = TempDir::new().unwrap();
        fs::write(dest.path().join("config.json"), "old").unwrap();
        ZipArchiver::new().extract(&archive, dest.path()).unwrap();

        assert_eq!(
            fs::read_to_string(dest.path().join("config.json")).unwrap(),
            "new"
        );
    }

    #[test]
    fn extract_of_garbage_is_archive_failed() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("not-a.zip");
        fs::write(&archive, "plain text").unwrap();

        let err = ZipArchiver::new().extract(&archive, dir.path()).unwrap_err();
        assert!(matches!(
            err,
            PlinthError::Application(ApplicationError::ArchiveFailed { .. })
        ));
    }

    #[test]
    fn entry_names_use_forward_slashes() {
        let path: PathBuf = ["templates", "files", "notes.json"].iter().collect();
        assert_eq!(entry_name(&path), "templates/files/notes.json");
    }
}
