use std::fs;
use std::io;
use std::path::Path;

/// Copies `src` into `dest` recursively, creating `dest` and any missing
/// parents. Files that already exist at the same relative path are
/// overwritten; other files under `dest` are left alone. A failure partway
/// leaves whatever was already copied in place.
///
/// Returns the number of files copied.
pub fn copy_dir_recursive(src: &Path, dest: &Path) -> io::Result<usize> {
    let metadata = fs::metadata(src)?;
    if !metadata.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a directory", src.display()),
        ));
    }

    fs::create_dir_all(dest)?;

    let mut copied = 0;
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dest_path = dest.join(entry.file_name());
        // Follows symlinks, so a linked directory is copied as a directory.
        if src_path.is_dir() {
            copied += copy_dir_recursive(&src_path, &dest_path)?;
        } else {
            fs::copy(&src_path, &dest_path)?;
            copied += 1;
        }
    }
    Ok(copied)
}

pub fn is_dir_empty(path: &Path) -> io::Result<bool> {
    Ok(fs::read_dir(path)?.next().is_none())
}

/// Removes `path` if it is an existing, empty directory.
pub fn remove_dir_if_empty(path: &Path) -> io::Result<bool> {
    if !path.is_dir() || !is_dir_empty(path)? {
        return Ok(false);
    }
    fs::remove_dir(path)?;
    Ok(true)
}
