//! File descriptors handed over by the host.

use serde::Serialize;

use crate::constants::NATIVE_EXTENSION;

/// What kind of node a descriptor points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    /// A regular file; only these contribute file fields.
    File,
    /// A folder in the vault tree.
    Folder,
    /// A node with no backing file (an empty tab, a graph view, ...).
    Virtual,
}

/// A file-like reference to a node in the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileDescriptor {
    /// Vault-relative path with `/` separators, e.g. `projects/todo.md`.
    pub path: String,
    /// Final path component including the extension.
    pub name: String,
    /// Extension without the leading dot; empty when there is none.
    pub extension: String,
    /// Node kind.
    pub kind: FileKind,
}

impl FileDescriptor {
    /// Build a descriptor for a regular file from its vault-relative path.
    ///
    /// Backslashes are normalized to `/` so descriptors compare equal across platforms.
    ///
    /// ```
    /// use notetitle::fields::FileDescriptor;
    ///
    /// let file = FileDescriptor::file("projects/todo.md");
    /// assert_eq!(file.name, "todo.md");
    /// assert_eq!(file.extension, "md");
    /// assert_eq!(file.basename(), "todo");
    /// ```
    #[must_use]
    pub fn file(path: impl Into<String>) -> Self {
        Self::with_kind(path, FileKind::File)
    }

    /// Build a folder descriptor.
    #[must_use]
    pub fn folder(path: impl Into<String>) -> Self {
        Self::with_kind(path, FileKind::Folder)
    }

    /// Build a descriptor of the given kind.
    #[must_use]
    pub fn with_kind(path: impl Into<String>, kind: FileKind) -> Self {
        let path = path.into().replace('\\', "/");
        let name = path.rsplit('/').next().unwrap_or_default().to_string();
        let extension = match kind {
            FileKind::File => match name.rsplit_once('.') {
                // dotfiles like `.env` have no extension
                Some((stem, ext)) if !stem.is_empty() => ext.to_string(),
                _ => String::new(),
            },
            FileKind::Folder | FileKind::Virtual => String::new(),
        };

        Self {
            path,
            name,
            extension,
            kind,
        }
    }

    /// Whether this is a regular file.
    #[must_use]
    pub fn is_file(&self) -> bool {
        self.kind == FileKind::File
    }

    /// Whether this file is a native (Markdown) document.
    #[must_use]
    pub fn is_native_document(&self) -> bool {
        self.is_file() && self.extension == NATIVE_EXTENSION
    }

    /// Name without extension for native documents, the full name otherwise.
    #[must_use]
    pub fn basename(&self) -> &str {
        if self.is_native_document() {
            self.name.strip_suffix(&format!(".{}", self.extension)).unwrap_or(&self.name)
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basename_strips_native_extension_only() {
        assert_eq!(FileDescriptor::file("a/b/todo.md").basename(), "todo");
        assert_eq!(FileDescriptor::file("img/photo.png").basename(), "photo.png");
        assert_eq!(FileDescriptor::file("archive.tar.md").basename(), "archive.tar");
    }

    #[test]
    fn test_extension_edge_cases() {
        assert_eq!(FileDescriptor::file("README").extension, "");
        assert_eq!(FileDescriptor::file(".env").extension, "");
        assert_eq!(FileDescriptor::folder("dir.md").extension, "");
        assert!(!FileDescriptor::folder("dir.md").is_native_document());
    }

    #[test]
    fn test_path_normalization() {
        let file = FileDescriptor::file("notes\\daily\\2024-01-01.md");
        assert_eq!(file.path, "notes/daily/2024-01-01.md");
        assert_eq!(file.name, "2024-01-01.md");
    }
}
