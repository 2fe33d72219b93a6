// 🏛️ Regulatory Findings - Enforcement / warning records per regulator
//
// Each regulator publishes a list of entities it has warned about. A list is
// loaded once (JSON or CSV) and stays read-only for the process lifetime.

use crate::signals::Timestamp;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Labels of the reference regulator lists, in the order they are checked
pub const FCA_WARNING_LIST: &str = "FCA Warning List";
pub const ASIC_ALERT_LIST: &str = "ASIC Investor Alert List";
pub const NFA_BASIC_ALERTS: &str = "NFA BASIC Alerts";

// ============================================================================
// REGULATORY FINDING
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegulatoryFinding {
    /// Entity name as known to the regulator
    pub name: String,

    /// Website domain named in the finding, if any
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,

    /// Why the regulator issued the finding
    pub reason: String,

    /// Link to the published notice
    pub source_url: String,

    /// Publication date of the finding, verbatim
    pub date: Timestamp,
}

impl RegulatoryFinding {
    pub fn new(name: &str, reason: &str, source_url: &str, date: Timestamp) -> Self {
        RegulatoryFinding {
            name: name.to_string(),
            domain: None,
            reason: reason.to_string(),
            source_url: source_url.to_string(),
            date,
        }
    }

    pub fn with_domain(mut self, domain: &str) -> Self {
        self.domain = Some(domain.to_string());
        self
    }

    /// Domain, treating an empty string the same as no domain
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref().filter(|d| !d.is_empty())
    }
}

/// CSV row shape - empty `domain` cell means no domain
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FindingRow {
    name: String,
    #[serde(default)]
    domain: String,
    reason: String,
    source_url: String,
    date: Timestamp,
}

impl From<FindingRow> for RegulatoryFinding {
    fn from(row: FindingRow) -> Self {
        let domain = if row.domain.is_empty() {
            None
        } else {
            Some(row.domain)
        };

        RegulatoryFinding {
            name: row.name,
            domain,
            reason: row.reason,
            source_url: row.source_url,
            date: row.date,
        }
    }
}

// ============================================================================
// FINDING SOURCE
// ============================================================================

/// One regulator list paired with the label its signals carry
#[derive(Debug, Clone, PartialEq)]
pub struct FindingSource {
    pub label: String,
    pub findings: Vec<RegulatoryFinding>,
}

impl FindingSource {
    pub fn new(label: &str, findings: Vec<RegulatoryFinding>) -> Self {
        FindingSource {
            label: label.to_string(),
            findings,
        }
    }

    /// Load a list from disk; format is picked by extension (.json / .csv)
    pub fn from_file<P: AsRef<Path>>(label: &str, path: P) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let findings = match extension.as_deref() {
            Some("json") => load_json(path)?,
            Some("csv") => load_csv(path)?,
            _ => bail!("Unsupported finding list format: {:?} (expected .json or .csv)", path),
        };

        if findings.is_empty() {
            warn!(label, path = %path.display(), "finding list is empty");
        } else {
            info!(label, count = findings.len(), "loaded regulatory findings");
        }

        Ok(FindingSource::new(label, findings))
    }

    pub fn len(&self) -> usize {
        self.findings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }
}

fn load_json(path: &Path) -> Result<Vec<RegulatoryFinding>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read finding list: {:?}", path))?;

    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse finding list JSON: {:?}", path))
}

fn load_csv(path: &Path) -> Result<Vec<RegulatoryFinding>> {
    let mut rdr = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open finding list CSV: {:?}", path))?;

    let mut findings = Vec::new();
    for (line, result) in rdr.deserialize::<FindingRow>().enumerate() {
        let row = result.with_context(|| {
            format!("Failed to deserialize finding at row {} of {:?}", line + 1, path)
        })?;
        findings.push(row.into());
    }

    debug!(path = %path.display(), rows = findings.len(), "parsed finding CSV");
    Ok(findings)
}

// ============================================================================
// FINDING STORE
// ============================================================================

/// Ordered set of regulator lists. Insertion order is check order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FindingStore {
    sources: Vec<FindingSource>,
}

impl FindingStore {
    pub fn new() -> Self {
        FindingStore { sources: Vec::new() }
    }

    /// Reference check order used by the comparison site
    pub fn reference_labels() -> [&'static str; 3] {
        [FCA_WARNING_LIST, ASIC_ALERT_LIST, NFA_BASIC_ALERTS]
    }

    /// Store with the three reference lists present but empty
    pub fn with_reference_sources() -> Self {
        let mut store = FindingStore::new();
        for label in Self::reference_labels() {
            store.add_source(FindingSource::new(label, Vec::new()));
        }
        store
    }

    pub fn add_source(&mut self, source: FindingSource) {
        self.sources.push(source);
    }

    pub fn sources(&self) -> &[FindingSource] {
        &self.sources
    }

    pub fn source(&self, label: &str) -> Option<&FindingSource> {
        self.sources.iter().find(|s| s.label == label)
    }

    /// Total findings across all lists
    pub fn total_findings(&self) -> usize {
        self.sources.iter().map(FindingSource::len).sum()
    }
}

impl From<Vec<FindingSource>> for FindingStore {
    fn from(sources: Vec<FindingSource>) -> Self {
        FindingStore { sources }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_load_json_list() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "fca.json",
            r#"[
                {"name": "Royal", "reason": "not authorised", "sourceUrl": "https://fca.org.uk/royal", "date": "2025-09-12T00:00:00Z"},
                {"name": "Clone Markets", "domain": "clonemkts.io", "reason": "clone firm", "sourceUrl": "https://fca.org.uk/clone", "date": "2025-03-01T00:00:00Z"}
            ]"#,
        );

        let source = FindingSource::from_file(FCA_WARNING_LIST, &path).unwrap();

        assert_eq!(source.label, "FCA Warning List");
        assert_eq!(source.len(), 2);
        assert!(source.findings[0].domain().is_none());
        assert_eq!(source.findings[1].domain(), Some("clonemkts.io"));
    }

    #[test]
    fn test_load_csv_list_empty_domain_is_none() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "asic.csv",
            "name,domain,reason,sourceUrl,date\n\
             Apex Capital,,unlicensed,https://asic.gov.au/a,2024-11-02T00:00:00Z\n\
             Zenith FX,zenithfx.net,scam website,https://asic.gov.au/z,2024-12-15T00:00:00Z\n",
        );

        let source = FindingSource::from_file(ASIC_ALERT_LIST, &path).unwrap();

        assert_eq!(source.len(), 2);
        assert_eq!(source.findings[0].domain, None);
        assert_eq!(source.findings[1].domain.as_deref(), Some("zenithfx.net"));
    }

    #[test]
    fn test_unsupported_extension_fails() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "nfa.txt", "whatever");

        let result = FindingSource::from_file(NFA_BASIC_ALERTS, &path);

        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unsupported"));
    }

    #[test]
    fn test_malformed_json_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "bad.json", "[{\"name\": 1}]");

        let err = FindingSource::from_file(FCA_WARNING_LIST, &path).unwrap_err();

        assert!(format!("{:#}", err).contains("bad.json"));
    }

    #[test]
    fn test_reference_sources_order() {
        let store = FindingStore::with_reference_sources();
        let labels: Vec<&str> = store.sources().iter().map(|s| s.label.as_str()).collect();

        assert_eq!(labels, vec![FCA_WARNING_LIST, ASIC_ALERT_LIST, NFA_BASIC_ALERTS]);
        assert_eq!(store.total_findings(), 0);
        assert!(store.source(ASIC_ALERT_LIST).unwrap().is_empty());
    }

    #[test]
    fn test_empty_domain_treated_as_absent() {
        let finding = RegulatoryFinding::new("X", "r", "u", "2025-01-01T00:00:00Z".parse().unwrap())
            .with_domain("");

        assert!(finding.domain().is_none());
    }

    #[test]
    fn test_dates_load_verbatim_from_json_and_csv() {
        let dir = TempDir::new().unwrap();
        let json_path = write(
            &dir,
            "fca.json",
            r#"[
                {"name": "A", "reason": "r", "sourceUrl": "u", "date": "2025-09-12T00:00:00+02:00"},
                {"name": "B", "reason": "r", "sourceUrl": "u", "date": "2025-09-12"}
            ]"#,
        );
        let csv_path = write(
            &dir,
            "asic.csv",
            "name,domain,reason,sourceUrl,date\nC,,r,u,2024-11-02\n",
        );

        let fca = FindingSource::from_file(FCA_WARNING_LIST, &json_path).unwrap();
        let asic = FindingSource::from_file(ASIC_ALERT_LIST, &csv_path).unwrap();

        assert_eq!(fca.findings[0].date.as_str(), "2025-09-12T00:00:00+02:00");
        assert_eq!(fca.findings[1].date.as_str(), "2025-09-12");
        assert_eq!(asic.findings[0].date.as_str(), "2024-11-02");

        let back = serde_json::to_value(&fca.findings[0]).unwrap();
        assert_eq!(back["date"], "2025-09-12T00:00:00+02:00");
    }
}
