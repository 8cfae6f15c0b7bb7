use crate::application::models::report::ReportDescriptor;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Ordered, index-addressed collection of report descriptors. Loaded once at
/// startup; indices are stable for the process lifetime.
#[derive(Debug, Default)]
pub struct Catalog {
    reports: Vec<ReportDescriptor>,
}

impl Catalog {
    pub fn from_descriptors(reports: Vec<ReportDescriptor>) -> Self {
        Self { reports }
    }

    /// Loads the catalog from a JSON resource.
    ///
    /// A missing or unparseable file degrades to an empty catalog with a
    /// startup warning instead of aborting. Malformed entries are skipped
    /// individually; the rest of the file still loads.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(
                    "Catalog file {} not readable ({}); starting with an empty catalog",
                    path.display(),
                    e
                );
                return Self::default();
            }
        };

        let entries = match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Array(entries)) => entries,
            Ok(_) => {
                warn!(
                    "Catalog file {} is not a JSON array; starting with an empty catalog",
                    path.display()
                );
                return Self::default();
            }
            Err(e) => {
                warn!(
                    "Catalog file {} is not valid JSON ({}); starting with an empty catalog",
                    path.display(),
                    e
                );
                return Self::default();
            }
        };

        let mut reports = Vec::with_capacity(entries.len());
        for (idx, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<ReportDescriptor>(entry) {
                Ok(descriptor) => reports.push(descriptor),
                Err(e) => warn!("Skipping malformed catalog entry {}: {}", idx, e),
            }
        }

        info!("Loaded {} report(s) from {}", reports.len(), path.display());
        Self { reports }
    }

    pub fn get(&self, index: usize) -> Option<&ReportDescriptor> {
        self.reports.get(index)
    }

    pub fn reports(&self) -> &[ReportDescriptor] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

#[cfg(test)]
mod tests_catalog {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_catalog(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_valid_catalog() {
        let file = write_catalog(
            r#"[
                {"label": "Sales", "group_id": "G1", "report_id": "R1"},
                {"label": "Finance", "group_id": "G2", "report_id": "R2"}
            ]"#,
        );

        let catalog = Catalog::load(file.path());

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().label, "Sales");
        assert_eq!(catalog.get(1).unwrap().report_id, "R2");
        assert_eq!(catalog.get(2), None);
    }

    #[test]
    fn test_missing_file_yields_empty_catalog() {
        let catalog = Catalog::load("/nonexistent/reports.json");
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_invalid_json_yields_empty_catalog() {
        let file = write_catalog("{ not json");
        let catalog = Catalog::load(file.path());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_non_array_json_yields_empty_catalog() {
        let file = write_catalog(r#"{"label": "Sales"}"#);
        let catalog = Catalog::load(file.path());
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_malformed_entries_skipped_individually() {
        let file = write_catalog(
            r#"[
                {"label": "Sales", "group_id": "G1", "report_id": "R1"},
                {"label": "Broken"},
                {"label": "Finance", "group_id": "G2", "report_id": "R2"}
            ]"#,
        );

        let catalog = Catalog::load(file.path());

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().label, "Sales");
        assert_eq!(catalog.get(1).unwrap().label, "Finance");
    }

    #[test]
    fn test_indices_are_stable() {
        let file = write_catalog(
            r#"[
                {"label": "Sales", "group_id": "G1", "report_id": "R1"},
                {"label": "Finance", "group_id": "G2", "report_id": "R2"}
            ]"#,
        );

        let catalog = Catalog::load(file.path());
        let labels: Vec<_> = catalog.reports().iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Sales", "Finance"]);
    }
}
