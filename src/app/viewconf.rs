//! View preferences: parse/write `view.conf` and apply them to the directory.
//!
//! The file remembers the status filter and sort order between sessions.
//! It uses the same `<key> = <value>` format as the theme and keybinds files.

use crate::directory::Directory;
use crate::search::{SortDirection, SortField, SortSpec, StatusFilter};

/// Persisted initial view state. The default is "All", name ascending.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewConfig {
    pub status: StatusFilter,
    pub sort: SortSpec,
}

impl ViewConfig {
    /// Read the current view state from a directory.
    pub fn from_directory(directory: &Directory) -> Self {
        Self {
            status: directory.status_filter(),
            sort: directory.sort(),
        }
    }

    /// Load from `path`, falling back to the user config directory, and
    /// finally to defaults written to `path`.
    pub fn load_or_init(path: &str) -> Self {
        let p = std::path::Path::new(path);
        if p.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        if let Some(existing) = crate::app::config_file_read_path("view.conf") {
            return Self::from_file(&existing).unwrap_or_default();
        }
        let cfg = Self::default();
        if let Err(e) = cfg.write_file(path) {
            tracing::warn!(path, error = %e, "could not write default view config");
        }
        cfg
    }

    /// Returns `None` if the file cannot be read. Unknown keys and values are skipped.
    pub fn from_file(path: &str) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    pub fn parse(contents: &str) -> Self {
        let mut cfg = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut parts = line.splitn(2, '=');
            let lhs = parts.next().map(|s| s.trim()).unwrap_or("");
            let rhs = parts.next().map(|s| s.trim()).unwrap_or("");
            if lhs.is_empty() || rhs.is_empty() {
                continue;
            }
            match lhs {
                "status_filter" => {
                    cfg.status = StatusFilter::parse(rhs).unwrap_or(cfg.status);
                }
                "sort_field" => {
                    cfg.sort.field = SortField::parse(rhs).unwrap_or(cfg.sort.field);
                }
                "sort_direction" => {
                    cfg.sort.direction = SortDirection::parse(rhs).unwrap_or(cfg.sort.direction);
                }
                _ => {}
            }
        }
        cfg
    }

    pub fn write_file(&self, path: &str) -> std::io::Result<()> {
        use std::fmt::Write as _;
        let mut buf = String::new();
        buf.push_str("# employee-directory view preferences\n");
        buf.push_str("# status_filter: All|Active|Passive\n");
        buf.push_str("# sort_field: name|email|status|phone|department|updated\n");
        buf.push_str("# sort_direction: asc|desc\n\n");
        let _ = writeln!(&mut buf, "status_filter = {}", self.status.label());
        let _ = writeln!(&mut buf, "sort_field = {}", self.sort.field.key());
        let _ = writeln!(&mut buf, "sort_direction = {}", self.sort.direction.key());
        std::fs::write(path, buf)
    }

    /// Apply to a directory; both setters reset the page to the first one.
    pub fn apply_to(&self, directory: &mut Directory) {
        directory.set_status_filter(self.status);
        directory.set_sort(self.sort);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Status;

    #[test]
    fn parse_reads_known_keys_and_keeps_defaults_otherwise() {
        let cfg = ViewConfig::parse("status_filter = passive\nsort_direction = desc\nbogus = 1\nsort_field = ???\n");
        assert_eq!(cfg.status, StatusFilter::Only(Status::Passive));
        assert_eq!(cfg.sort.field, SortField::Name);
        assert_eq!(cfg.sort.direction, SortDirection::Descending);
    }

    #[test]
    fn empty_file_is_default() {
        assert_eq!(ViewConfig::parse(""), ViewConfig::default());
    }
}
