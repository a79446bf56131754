//! Path validation
//!
//! Resolves client-supplied logical paths against the share root and proves
//! the result stays inside it. Nothing outside this module builds a
//! [`ResolvedPath`], so every filesystem touch in the store goes through the
//! same containment check.

use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf, is_separator};

use crate::error::StorageError;

/// A real path proven to lie within the share root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    real: PathBuf,
    relative: PathBuf,
    exists: bool,
    symlink: bool,
    trailing_separator: bool,
}

impl ResolvedPath {
    /// Absolute real path on disk
    pub fn real(&self) -> &Path {
        &self.real
    }

    /// Location relative to the share root (empty for the root itself)
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    /// Whether the target existed when it was resolved
    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn is_root(&self) -> bool {
        self.relative.as_os_str().is_empty()
    }

    /// The target is a symlink left unresolved by [`resolve_no_follow`]
    pub fn is_symlink(&self) -> bool {
        self.symlink
    }

    /// The logical path ended in a separator, so it can only name a directory
    pub fn names_directory(&self) -> bool {
        self.trailing_separator
    }
}

/// Strip leading separators so the logical path is always root-relative
pub fn normalize_logical_path(logical: &str) -> &str {
    logical.trim_start_matches(is_separator)
}

/// Resolve `logical` against the canonical `root`.
///
/// Existing targets are canonicalized in full, symlinks included. For targets
/// that do not exist yet, the deepest existing ancestor is canonicalized and
/// checked, then the missing segments are re-appended; each of those must be
/// a plain name. A trailing separator on an existing non-directory is
/// `InvalidTarget`.
pub fn resolve_path(root: &Path, logical: &str) -> Result<ResolvedPath, StorageError> {
    let relative = normalize_logical_path(logical);
    let resolved = resolve_relative(root, Path::new(relative), logical)?;

    if resolved.trailing_separator
        && resolved.real.metadata().is_ok_and(|metadata| !metadata.is_dir())
    {
        return Err(StorageError::InvalidTarget(logical.to_string()));
    }
    Ok(resolved)
}

/// Like [`resolve_path`], but a symlink in the final position is not followed.
///
/// The link's parent is resolved and checked, and the result names the link
/// itself. Used where acting on the link's target would be wrong (delete).
pub fn resolve_no_follow(root: &Path, logical: &str) -> Result<ResolvedPath, StorageError> {
    let relative = Path::new(normalize_logical_path(logical));
    let is_link = root
        .join(relative)
        .symlink_metadata()
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);

    let name = match relative.components().next_back() {
        Some(Component::Normal(name)) if is_link => name,
        _ => return resolve_path(root, logical),
    };
    let parent = relative.parent().unwrap_or(Path::new(""));

    let parent = resolve_relative(root, parent, logical)?;
    if !parent.exists {
        return Err(StorageError::NotFound(logical.to_string()));
    }

    Ok(ResolvedPath {
        real: parent.real.join(name),
        relative: parent.relative.join(name),
        exists: true,
        symlink: true,
        trailing_separator: false,
    })
}

fn resolve_relative(
    root: &Path,
    relative: &Path,
    logical: &str,
) -> Result<ResolvedPath, StorageError> {
    let trailing_separator = relative
        .as_os_str()
        .to_string_lossy()
        .ends_with(is_separator);
    let joined = root.join(relative);
    let mut ancestor = joined.as_path();
    let mut missing: Vec<OsString> = Vec::new();

    let canonical = loop {
        match ancestor.canonicalize() {
            Ok(canonical) => break canonical,
            Err(e)
                if matches!(
                    e.kind(),
                    io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
                ) =>
            {
                if ancestor == root {
                    return Err(StorageError::Io(e));
                }
                // A dangling symlink would be followed by a later write.
                if ancestor.symlink_metadata().is_ok() {
                    return Err(StorageError::AccessDenied(logical.to_string()));
                }
                match ancestor.components().next_back() {
                    Some(Component::Normal(name)) => missing.push(name.to_os_string()),
                    _ => return Err(StorageError::AccessDenied(logical.to_string())),
                }
                ancestor = match ancestor.parent() {
                    Some(parent) => parent,
                    None => return Err(StorageError::AccessDenied(logical.to_string())),
                };
            }
            Err(e) => return Err(StorageError::Io(e)),
        }
    };

    let relative = match canonical.strip_prefix(root) {
        Ok(relative) => relative.to_path_buf(),
        Err(_) => return Err(StorageError::AccessDenied(logical.to_string())),
    };

    let exists = missing.is_empty();
    let mut real = canonical;
    let mut relative = relative;
    for name in missing.iter().rev() {
        real.push(name);
        relative.push(name);
    }

    Ok(ResolvedPath {
        real,
        relative,
        exists,
        symlink: false,
        trailing_separator,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn share() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().canonicalize().unwrap();
        (dir, root)
    }

    #[test]
    fn test_empty_and_separator_paths_are_root() {
        let (_dir, root) = share();
        for logical in ["", "/", "///", ".", "/./"] {
            let resolved = resolve_path(&root, logical).unwrap();
            assert!(resolved.is_root(), "{logical:?} should be the root");
            assert_eq!(resolved.real(), root);
            assert!(resolved.exists());
        }
    }

    #[test]
    fn test_absolute_looking_path_is_root_relative() {
        let (_dir, root) = share();
        let resolved = resolve_path(&root, "/etc/passwd").unwrap();
        assert_eq!(resolved.real(), root.join("etc/passwd"));
        assert!(!resolved.exists());
    }

    #[test]
    fn test_parent_segments_escaping_root_are_denied() {
        let (_dir, root) = share();
        for logical in ["..", "../../etc/passwd", "a/../../b", "/../x", "./.."] {
            assert!(
                matches!(
                    resolve_path(&root, logical),
                    Err(StorageError::AccessDenied(_))
                ),
                "{logical:?} should be denied"
            );
        }
    }

    #[test]
    fn test_parent_segments_within_root_resolve() {
        let (_dir, root) = share();
        fs::create_dir(root.join("docs")).unwrap();
        let resolved = resolve_path(&root, "docs/../docs/./a.txt").unwrap();
        assert_eq!(resolved.relative(), Path::new("docs/a.txt"));
        assert!(resolve_path(&root, "docs/..").unwrap().is_root());
    }

    #[test]
    fn test_missing_intermediate_directories() {
        let (_dir, root) = share();
        let resolved = resolve_path(&root, "new/deeper/file.bin").unwrap();
        assert_eq!(resolved.real(), root.join("new/deeper/file.bin"));
        assert_eq!(resolved.relative(), Path::new("new/deeper/file.bin"));
        assert!(!resolved.exists());
    }

    #[test]
    fn test_parent_segment_after_missing_directory_is_denied() {
        let (_dir, root) = share();
        assert!(matches!(
            resolve_path(&root, "missing/../../x"),
            Err(StorageError::AccessDenied(_))
        ));
    }

    #[test]
    fn test_sibling_with_root_prefix_is_denied() {
        let parent = tempfile::tempdir().unwrap();
        let base = parent.path().canonicalize().unwrap();
        let root = base.join("root");
        let evil = base.join("root-evil");
        fs::create_dir(&root).unwrap();
        fs::create_dir(&evil).unwrap();
        fs::write(evil.join("secret"), b"x").unwrap();

        assert!(matches!(
            resolve_path(&root, "../root-evil/secret"),
            Err(StorageError::AccessDenied(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_escaping_root_is_denied() {
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("secret"), b"x").unwrap();
        let (_dir, root) = share();
        std::os::unix::fs::symlink(outside.path(), root.join("link")).unwrap();

        assert!(matches!(
            resolve_path(&root, "link/secret"),
            Err(StorageError::AccessDenied(_))
        ));
        assert!(matches!(
            resolve_path(&root, "link/new.txt"),
            Err(StorageError::AccessDenied(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_is_denied() {
        let (_dir, root) = share();
        std::os::unix::fs::symlink("/nonexistent/target", root.join("dangling")).unwrap();
        assert!(matches!(
            resolve_path(&root, "dangling"),
            Err(StorageError::AccessDenied(_))
        ));
    }

    #[test]
    fn test_trailing_separator_on_file_is_invalid_target() {
        let (_dir, root) = share();
        fs::write(root.join("a.txt"), b"x").unwrap();
        fs::create_dir(root.join("docs")).unwrap();

        assert!(matches!(
            resolve_path(&root, "a.txt/"),
            Err(StorageError::InvalidTarget(_))
        ));
        assert!(resolve_path(&root, "docs/").unwrap().names_directory());
        assert!(resolve_path(&root, "new/").unwrap().names_directory());
        assert!(!resolve_path(&root, "a.txt").unwrap().names_directory());
    }

    #[cfg(unix)]
    #[test]
    fn test_no_follow_names_the_link() {
        let (_dir, root) = share();
        fs::create_dir(root.join("data")).unwrap();
        std::os::unix::fs::symlink(root.join("data"), root.join("alias")).unwrap();
        std::os::unix::fs::symlink("/nonexistent/target", root.join("dangling")).unwrap();

        let resolved = resolve_no_follow(&root, "alias").unwrap();
        assert!(resolved.is_symlink());
        assert_eq!(resolved.real(), root.join("alias"));

        let resolved = resolve_no_follow(&root, "/dangling").unwrap();
        assert!(resolved.is_symlink());
        assert_eq!(resolved.relative(), Path::new("dangling"));

        let resolved = resolve_no_follow(&root, "data").unwrap();
        assert!(!resolved.is_symlink());
        assert_eq!(resolved.real(), root.join("data"));
    }

    #[test]
    fn test_normalize_strips_leading_separators() {
        assert_eq!(normalize_logical_path("//docs/a"), "docs/a");
        assert_eq!(normalize_logical_path("docs/"), "docs/");
        assert_eq!(normalize_logical_path(""), "");
    }
}
