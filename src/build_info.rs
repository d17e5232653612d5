//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// One-line version string for banners and report metadata.
pub fn version_line() -> String {
    format!(
        "fiscal-sim {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_COMMIT,
        BUILD_DATE
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_info_not_empty() {
        assert!(!BUILD_COMMIT.is_empty());
        assert!(!BUILD_DATE.is_empty());
    }

    #[test]
    fn test_version_line_includes_commit() {
        let line = version_line();
        assert!(line.starts_with("fiscal-sim "));
        assert!(line.contains(BUILD_COMMIT));
    }
}
