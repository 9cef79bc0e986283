//! JSON-backed data source for emails and per-customer tag sets.
//!
//! Loaded once at startup and read-only afterwards. A missing file is treated
//! as empty, so the service can start before any data is provisioned.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::DataError;

/// A labelled support email.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Email {
    pub id: String,
    pub subject: String,
    pub body: String,
    pub customer_id: String,
    /// Human-assigned tag used for accuracy measurement.
    pub ground_truth_tag: String,
}

impl Email {
    /// Text fed to the classifier: subject and body joined by a space.
    pub fn classification_text(&self) -> String {
        format!("{} {}", self.subject, self.body)
    }
}

/// A customer and its ordered tag vocabulary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerTags {
    pub customer_id: String,
    pub tags: Vec<String>,
}

/// Locations of the two data files.
#[derive(Debug, Clone)]
pub struct DataPaths {
    pub emails: PathBuf,
    pub customers: PathBuf,
}

impl DataPaths {
    /// Standard file names inside a data directory.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            emails: dir.join("mock_data.json"),
            customers: dir.join("customer_config.json"),
        }
    }
}

/// In-memory, read-only view of emails and customer tag sets.
#[derive(Debug, Clone, Default)]
pub struct DataStore {
    emails: Vec<Email>,
    customers: Vec<CustomerTags>,
}

impl DataStore {
    /// Load both files. Missing files yield empty collections.
    pub fn load(paths: &DataPaths) -> Result<Self, DataError> {
        let emails: Vec<Email> = match read_optional(&paths.emails)? {
            Some(raw) => serde_json::from_str(&raw).map_err(|source| DataError::Parse {
                path: paths.emails.clone(),
                source,
            })?,
            None => Vec::new(),
        };

        let customers = match read_optional(&paths.customers)? {
            Some(raw) => parse_customer_config(&raw, &paths.customers)?,
            None => Vec::new(),
        };

        info!(
            emails = emails.len(),
            customers = customers.len(),
            "Loaded tagging data"
        );

        Ok(Self::from_parts(emails, customers))
    }

    /// Build a store from already-loaded data.
    pub fn from_parts(emails: Vec<Email>, customers: Vec<CustomerTags>) -> Self {
        Self { emails, customers }
    }

    /// All emails, or only those of one customer.
    pub fn emails(&self, customer_id: Option<&str>) -> Vec<&Email> {
        match customer_id {
            Some(id) => self.emails.iter().filter(|e| e.customer_id == id).collect(),
            None => self.emails.iter().collect(),
        }
    }

    /// Customer ids in configuration order.
    pub fn customers(&self) -> Vec<&str> {
        self.customers.iter().map(|c| c.customer_id.as_str()).collect()
    }

    /// The customer's tags, or an empty slice for an unknown customer.
    pub fn valid_tags(&self, customer_id: &str) -> &[String] {
        self.customers
            .iter()
            .find(|c| c.customer_id == customer_id)
            .map(|c| c.tags.as_slice())
            .unwrap_or(&[])
    }

    pub fn email_by_id(&self, id: &str) -> Option<&Email> {
        self.emails.iter().find(|e| e.id == id)
    }
}

fn read_optional(path: &Path) -> Result<Option<String>, DataError> {
    match std::fs::read_to_string(path) {
        Ok(raw) => Ok(Some(raw)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(path = %path.display(), "Data file not found, using empty data");
            Ok(None)
        }
        Err(source) => Err(DataError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Parse `{"customer": ["Tag", ...], ...}` keeping declaration order.
fn parse_customer_config(raw: &str, path: &Path) -> Result<Vec<CustomerTags>, DataError> {
    let map: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(raw).map_err(|source| DataError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    map.into_iter()
        .map(|(customer_id, value)| {
            match serde_json::from_value::<Vec<String>>(value) {
                Ok(tags) => Ok(CustomerTags { customer_id, tags }),
                Err(e) => Err(DataError::InvalidTags {
                    customer_id,
                    reason: e.to_string(),
                }),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const EMAILS: &str = r#"[
        {"id": "e1", "subject": "App crash", "body": "It crashes on start", "customer_id": "cust_a", "ground_truth_tag": "Bug"},
        {"id": "e2", "subject": "Invoice", "body": "Need my invoice", "customer_id": "cust_a", "ground_truth_tag": "Billing"},
        {"id": "e3", "subject": "Wrong size", "body": "Too small", "customer_id": "cust_b", "ground_truth_tag": "Size Issue"}
    ]"#;

    const CUSTOMERS: &str = r#"{
        "cust_b": ["Return", "Size Issue"],
        "cust_a": ["Bug", "Billing", "Feature Request"]
    }"#;

    fn write_data(emails: Option<&str>, customers: Option<&str>) -> (TempDir, DataPaths) {
        let dir = TempDir::new().unwrap();
        let paths = DataPaths::in_dir(dir.path());
        if let Some(raw) = emails {
            std::fs::write(&paths.emails, raw).unwrap();
        }
        if let Some(raw) = customers {
            std::fs::write(&paths.customers, raw).unwrap();
        }
        (dir, paths)
    }

    #[test]
    fn loads_emails_and_customers() {
        let (_dir, paths) = write_data(Some(EMAILS), Some(CUSTOMERS));
        let store = DataStore::load(&paths).unwrap();

        assert_eq!(store.emails(None).len(), 3);
        assert_eq!(store.emails(Some("cust_a")).len(), 2);
        assert_eq!(store.valid_tags("cust_b"), ["Return", "Size Issue"]);
    }

    #[test]
    fn customers_keep_declaration_order() {
        let (_dir, paths) = write_data(Some(EMAILS), Some(CUSTOMERS));
        let store = DataStore::load(&paths).unwrap();
        assert_eq!(store.customers(), ["cust_b", "cust_a"]);
    }

    #[test]
    fn missing_files_are_empty() {
        let (_dir, paths) = write_data(None, None);
        let store = DataStore::load(&paths).unwrap();
        assert!(store.emails(None).is_empty());
        assert!(store.customers().is_empty());
    }

    #[test]
    fn malformed_email_file_is_parse_error() {
        let (_dir, paths) = write_data(Some("{not json"), Some(CUSTOMERS));
        let err = DataStore::load(&paths).unwrap_err();
        assert!(matches!(err, DataError::Parse { .. }));
    }

    #[test]
    fn non_string_tags_are_rejected() {
        let (_dir, paths) = write_data(None, Some(r#"{"cust_a": [1, 2]}"#));
        let err = DataStore::load(&paths).unwrap_err();
        match err {
            DataError::InvalidTags { customer_id, .. } => assert_eq!(customer_id, "cust_a"),
            other => panic!("Expected InvalidTags, got {:?}", other),
        }
    }

    #[test]
    fn unknown_customer_has_no_tags() {
        let store = DataStore::default();
        assert!(store.valid_tags("nobody").is_empty());
        assert!(store.emails(Some("nobody")).is_empty());
    }

    #[test]
    fn email_lookup_by_id() {
        let (_dir, paths) = write_data(Some(EMAILS), None);
        let store = DataStore::load(&paths).unwrap();
        assert_eq!(store.email_by_id("e3").unwrap().customer_id, "cust_b");
        assert!(store.email_by_id("missing").is_none());
    }

    #[test]
    fn classification_text_joins_subject_and_body() {
        let email = Email {
            id: "e1".into(),
            subject: "Wrong size".into(),
            body: "Too small".into(),
            customer_id: "cust_b".into(),
            ground_truth_tag: "Size Issue".into(),
        };
        assert_eq!(email.classification_text(), "Wrong size Too small");
    }
}
