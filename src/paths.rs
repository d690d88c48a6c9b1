use std::path::Path;

/// Directory containing `path`, or `.` when it has no parent component.
pub fn parent_or_current(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_names_resolve_to_current_dir() {
        assert_eq!(parent_or_current(Path::new("report.html")), Path::new("."));
        assert_eq!(parent_or_current(Path::new("site/report.html")), Path::new("site"));
        assert_eq!(parent_or_current(Path::new("/")), Path::new("."));
    }
}
