//! Normalization of client-supplied paths.
//!
//! MCP clients often send POSIX-style paths even when the server runs on
//! Windows, e.g. `/c:/Users/me/doc.md`. These helpers turn such paths into
//! something the host filesystem understands.

use std::path::PathBuf;

/// Path conventions of the target filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStyle {
    Windows,
    Posix,
}

impl PathStyle {
    /// The style of the machine we are running on.
    pub fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else {
            Self::Posix
        }
    }
}

/// Normalize `path` for the host filesystem.
pub fn normalize_path(path: &str) -> PathBuf {
    PathBuf::from(normalize_path_for(path, PathStyle::host()))
}

/// Normalize `path` for the given target style.
///
/// On Windows targets `/c:/dir` becomes `C:\dir` and forward slashes become
/// backslashes. POSIX targets get the path back unchanged.
pub fn normalize_path_for(path: &str, style: PathStyle) -> String {
    match style {
        PathStyle::Posix => path.to_string(),
        PathStyle::Windows => {
            let trimmed = match path.strip_prefix('/') {
                Some(rest) if has_drive_prefix(rest) => rest,
                _ => path,
            };

            let mut normalized = String::with_capacity(trimmed.len());
            for (i, c) in trimmed.chars().enumerate() {
                match c {
                    '/' => normalized.push('\\'),
                    c if i == 0 && has_drive_prefix(trimmed) => {
                        normalized.push(c.to_ascii_uppercase())
                    }
                    c => normalized.push(c),
                }
            }
            normalized
        }
    }
}

/// `x:` followed by the end of the string or a separator.
fn has_drive_prefix(path: &str) -> bool {
    let bytes = path.as_bytes();
    bytes.len() >= 2
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes.len() == 2 || bytes[2] == b'/' || bytes[2] == b'\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_windows_drive_with_leading_slash() {
        assert_eq!(
            normalize_path_for("/c:/Users/doc.md", PathStyle::Windows),
            r"C:\Users\doc.md"
        );
    }

    #[test]
    fn test_windows_mixed_separators() {
        assert_eq!(
            normalize_path_for(r"D:/reports\2025/out.docx", PathStyle::Windows),
            r"D:\reports\2025\out.docx"
        );
    }

    #[test]
    fn test_windows_unc_like_path_keeps_leading_separator() {
        assert_eq!(
            normalize_path_for("/share/doc.md", PathStyle::Windows),
            r"\share\doc.md"
        );
    }

    #[test]
    fn test_posix_is_noop() {
        let path = "/home/user/docs/report.md";
        assert_eq!(normalize_path_for(path, PathStyle::Posix), path);
        assert_eq!(normalize_path_for("/c:/x", PathStyle::Posix), "/c:/x");
    }

    #[test]
    fn test_idempotent() {
        for style in [PathStyle::Windows, PathStyle::Posix] {
            for path in ["/c:/Users/doc.md", "relative/file.md", "/tmp/a b/c.html", "e:"] {
                let once = normalize_path_for(path, style);
                let twice = normalize_path_for(&once, style);
                assert_eq!(once, twice, "not idempotent for {path:?} ({style:?})");
            }
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_host_normalization_on_unix() {
        assert_eq!(
            normalize_path("/tmp/report.md"),
            PathBuf::from("/tmp/report.md")
        );
    }
}
