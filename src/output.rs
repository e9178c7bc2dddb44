use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

/// Writes `json` to `path`, or to stdout when no path is given.
pub fn emit(path: Option<&Path>, json: &str) -> Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, json)
                .with_context(|| format!("failed to write report: {}", p.display()))?;
            info!(path = %p.display(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        emit(Some(&path), "{\"ok\":true}").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "{\"ok\":true}");
    }

    #[test]
    fn missing_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("report.json");
        let err = emit(Some(&path), "{}").unwrap_err();
        assert!(format!("{err:#}").contains("failed to write report"));
    }
}
