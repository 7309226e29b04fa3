use std::fs::File;
use std::path::{Component, Path, PathBuf};

use log::{debug, warn};
use xvm_sdk::XvmError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveKind {
    Zip,
    TarGz,
    Tar,
}

impl ArchiveKind {
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?.to_ascii_lowercase();
        if name.ends_with(".zip") {
            Some(Self::Zip)
        } else if name.ends_with(".tar.gz") || name.ends_with(".tgz") {
            Some(Self::TarGz)
        } else if name.ends_with(".tar") {
            Some(Self::Tar)
        } else {
            None
        }
    }
}

/// Unpack `archive` into `dest`, dropping the first `strip_components`
/// path components of every entry. Entries that would land outside `dest`
/// are skipped.
///
/// # Errors
/// Returns [`XvmError::UnsupportedArchive`] for unknown extensions or
/// unreadable archives, and [`XvmError::Io`] when writing fails.
pub fn extract(archive: &Path, dest: &Path, strip_components: usize) -> Result<(), XvmError> {
    let kind = ArchiveKind::from_path(archive).ok_or_else(|| XvmError::UnsupportedArchive {
        path: archive.to_path_buf(),
    })?;

    std::fs::create_dir_all(dest)
        .map_err(|e| XvmError::io("failed to create extraction directory", dest, &e))?;
    let file =
        File::open(archive).map_err(|e| XvmError::io("failed to open archive", archive, &e))?;

    match kind {
        ArchiveKind::Zip => extract_zip(file, archive, dest, strip_components)?,
        ArchiveKind::TarGz => extract_tar(
            tar::Archive::new(flate2::read::GzDecoder::new(file)),
            archive,
            dest,
            strip_components,
        )?,
        ArchiveKind::Tar => {
            extract_tar(tar::Archive::new(file), archive, dest, strip_components)?;
        }
    }

    debug!("Extracted {} to {}", archive.display(), dest.display());
    Ok(())
}

/// `path` without its first `strip` components, or `None` when nothing is
/// left or the path is not a plain relative path.
fn strip_path(path: &Path, strip: usize) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    let components = path.components().filter(|c| *c != Component::CurDir);
    for component in components.skip(strip) {
        match component {
            Component::Normal(part) => out.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    (!out.as_os_str().is_empty()).then_some(out)
}

fn unreadable(archive: &Path) -> XvmError {
    XvmError::UnsupportedArchive {
        path: archive.to_path_buf(),
    }
}

fn extract_zip(file: File, archive: &Path, dest: &Path, strip: usize) -> Result<(), XvmError> {
    let mut zip = zip::ZipArchive::new(file).map_err(|_| unreadable(archive))?;

    for i in 0..zip.len() {
        let mut entry = zip.by_index(i).map_err(|_| unreadable(archive))?;
        let Some(name) = entry.enclosed_name() else {
            warn!("Skipping zip entry with unsafe path: {}", entry.name());
            continue;
        };
        let Some(relative) = strip_path(&name, strip) else {
            continue;
        };
        let out_path = dest.join(relative);

        if entry.is_dir() {
            std::fs::create_dir_all(&out_path)
                .map_err(|e| XvmError::io("failed to create directory", &out_path, &e))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| XvmError::io("failed to create directory", parent, &e))?;
        }
        let mut outfile = File::create(&out_path)
            .map_err(|e| XvmError::io("failed to create extracted file", &out_path, &e))?;
        std::io::copy(&mut entry, &mut outfile)
            .map_err(|e| XvmError::io("failed to extract archive entry", &out_path, &e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                std::fs::set_permissions(&out_path, std::fs::Permissions::from_mode(mode))
                    .map_err(|e| XvmError::io("failed to set permissions", &out_path, &e))?;
            }
        }
    }

    Ok(())
}

fn extract_tar<R: std::io::Read>(
    mut tar: tar::Archive<R>,
    archive: &Path,
    dest: &Path,
    strip: usize,
) -> Result<(), XvmError> {
    let entries = tar.entries().map_err(|_| unreadable(archive))?;

    for entry in entries {
        let mut entry = entry.map_err(|e| XvmError::io("failed to read archive entry", archive, &e))?;
        let path = entry
            .path()
            .map_err(|e| XvmError::io("failed to read archive entry", archive, &e))?
            .into_owned();
        let Some(relative) = strip_path(&path, strip) else {
            if path.components().count() > strip {
                warn!("Skipping tar entry with unsafe path: {}", path.display());
            }
            continue;
        };
        let out_path = dest.join(relative);

        if let Some(parent) = out_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| XvmError::io("failed to create directory", parent, &e))?;
        }
        if entry.header().entry_type() == tar::EntryType::Link {
            hard_link(&entry, archive, dest, strip, &out_path)?;
            continue;
        }
        entry
            .unpack(&out_path)
            .map_err(|e| XvmError::io("failed to extract archive entry", &out_path, &e))?;
    }

    Ok(())
}

/// Hard-link targets name another entry of the same archive, so they are
/// stripped and resolved against `dest` like any entry path.
fn hard_link<R: std::io::Read>(
    entry: &tar::Entry<'_, R>,
    archive: &Path,
    dest: &Path,
    strip: usize,
    out_path: &Path,
) -> Result<(), XvmError> {
    let link_name = entry
        .link_name()
        .map_err(|e| XvmError::io("failed to read archive entry", archive, &e))?;
    let Some(target) = link_name.as_deref().and_then(|name| strip_path(name, strip)) else {
        warn!("Skipping hard link with unsafe target: {}", out_path.display());
        return Ok(());
    };
    std::fs::hard_link(dest.join(target), out_path)
        .map_err(|e| XvmError::io("failed to extract archive entry", out_path, &e))
}
