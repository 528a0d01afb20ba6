use std::fmt;
use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::schema::{load_schema, read_json, Schema};
use crate::validation::{validate, ValidationFailure};

/// Data files carry this suffix.
const DOCUMENT_SUFFIX: &str = ".json";
/// Schema files sitting next to the data carry this one and are never validated.
const SCHEMA_SUFFIX: &str = "schema.json";

/// Whether a directory entry named `name` takes part in a batch run.
pub fn is_eligible(name: &str) -> bool {
    name.ends_with(DOCUMENT_SUFFIX) && !name.ends_with(SCHEMA_SUFFIX)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportEntry {
    pub file_name: String,
    pub failure: ValidationFailure,
}

/// Failures of one batch run, in directory-listing order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Report {
    pub entries: Vec<ReportEntry>,
    /// Eligible files that were validated, passing or not.
    pub checked: usize,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn failed(&self) -> usize {
        self.entries.len()
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{}: {}", entry.file_name, entry.failure)?;
        }
        Ok(())
    }
}

/// Parse the document at `path` and check it against `schema`.
///
/// Validation failures come back as `Ok(Err(..))`; reading or parsing the
/// document fails the call.
pub fn check_document<P: AsRef<Path>>(
    path: P,
    schema: &Schema,
) -> Result<std::result::Result<(), ValidationFailure>> {
    let instance = read_json(path)?;
    Ok(validate(schema, &instance))
}

/// Validate one document against an already loaded schema.
///
/// Returns `"<message> at <schema_path>"` for an invalid document and an
/// empty string for a valid one.
pub fn validate_document<P: AsRef<Path>>(path: P, schema: &Schema) -> Result<String> {
    match check_document(path, schema)? {
        Ok(()) => Ok(String::new()),
        Err(failure) => Ok(failure.to_string()),
    }
}

/// Load the schema at `schema_path` and validate one document against it.
pub fn validate_one<P: AsRef<Path>, S: AsRef<Path>>(path: P, schema_path: S) -> Result<String> {
    let schema = load_schema(schema_path)?;
    validate_document(path, &schema)
}

/// Validate every eligible entry of `dir` against `schema`.
///
/// The first unreadable or malformed document aborts the run.
pub fn run_batch<P: AsRef<Path>>(dir: P, schema: &Schema) -> Result<Report> {
    let dir_ref = dir.as_ref();
    let listing = fs::read_dir(dir_ref).map_err(|e| Error::from_io(dir_ref, e))?;

    let mut report = Report::default();

    for entry in listing {
        let entry = entry.map_err(|e| Error::from_io(dir_ref, e))?;
        let file_name = entry.file_name().to_string_lossy().into_owned();

        if !is_eligible(&file_name) {
            tracing::debug!(file = %file_name, "Skipping entry");
            continue;
        }

        report.checked += 1;

        match check_document(entry.path(), schema)? {
            Ok(()) => {
                tracing::debug!(file = %file_name, "Document validated successfully");
            }
            Err(failure) => {
                tracing::warn!(
                    file = %file_name,
                    error = %failure,
                    "Document failed validation"
                );
                report.entries.push(ReportEntry { file_name, failure });
            }
        }
    }

    Ok(report)
}

/// Validate a whole directory against the schema at `schema_path`.
///
/// Each failing file contributes a `"<filename>: <message> at <schema_path>\n"`
/// line; an empty string means every eligible file passed.
pub fn validate_all<P: AsRef<Path>, S: AsRef<Path>>(dir: P, schema_path: S) -> Result<String> {
    let schema = load_schema(schema_path)?;
    let report = run_batch(dir, &schema)?;
    Ok(report.to_string())
}
