//! # Metadata File Loading
//!
//! Reads metadata documents from local paths. A file holds one record (a
//! JSON object) or many (a JSON array). A directory contributes every
//! `*.json` file directly inside it, in file name order. Files ending in
//! `.yaml` or `.yml` are accepted when named explicitly.
//!
//! Loading never stops at a bad input: a file that cannot be read or parsed,
//! and a directory holding no `*.json` files, are recorded as a
//! [`LoadFailure`] and the remaining inputs are still loaded.
//! [`load_documents`] then turns the first failure into an error, while
//! [`load_documents_lenient`] hands every failure to the caller.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use serde::Serialize;
use serde_json::Value;

use nftmeta_core::MetadataRecord;

/// An input that contributed no documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoadFailure {
    /// The file or directory path.
    pub origin: String,
    /// Why nothing was loaded from it.
    pub reason: String,
}

/// Documents loaded from one or more paths, in load order.
#[derive(Debug, Default)]
pub struct LoadedDocuments {
    /// Raw documents.
    pub documents: Vec<Value>,
    /// Origin of each document: the file path, with `#i` appended for the
    /// i-th element of an array file.
    pub origins: Vec<String>,
    /// Inputs that could not be loaded, in the order they were met.
    pub failures: Vec<LoadFailure>,
}

impl LoadedDocuments {
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Deserialize every document into a typed record.
    ///
    /// Fails on the first document whose known fields have the wrong JSON
    /// type; run `nftmeta validate` to see every problem.
    pub fn records(&self) -> Result<Vec<MetadataRecord>> {
        self.documents
            .iter()
            .zip(&self.origins)
            .map(|(doc, origin)| {
                MetadataRecord::from_json(doc.clone())
                    .with_context(|| format!("{origin} is not a well-typed metadata record"))
            })
            .collect()
    }

    fn fail(&mut self, origin: &Path, error: anyhow::Error) {
        let failure = LoadFailure {
            origin: origin.display().to_string(),
            reason: format!("{error:#}"),
        };
        tracing::warn!(origin = %failure.origin, reason = %failure.reason, "skipped input");
        self.failures.push(failure);
    }
}

/// Load every document under `paths`, failing on the first input that
/// could not be loaded.
pub fn load_documents(paths: &[PathBuf]) -> Result<LoadedDocuments> {
    let loaded = load_documents_lenient(paths);
    if let Some(failure) = loaded.failures.first() {
        bail!("{}", failure.reason);
    }
    Ok(loaded)
}

/// Load every document under `paths`, recording unloadable inputs in
/// [`LoadedDocuments::failures`].
pub fn load_documents_lenient(paths: &[PathBuf]) -> LoadedDocuments {
    let mut loaded = LoadedDocuments::default();
    for path in paths {
        if path.is_dir() {
            let files = match json_files_in(path) {
                Ok(files) => files,
                Err(e) => {
                    loaded.fail(path, e);
                    continue;
                }
            };
            if files.is_empty() {
                loaded.fail(
                    path,
                    anyhow!("directory {} contains no .json files", path.display()),
                );
            }
            for file in files {
                if let Err(e) = load_file(&file, &mut loaded) {
                    loaded.fail(&file, e);
                }
            }
        } else if let Err(e) = load_file(path, &mut loaded) {
            loaded.fail(path, e);
        }
    }
    tracing::debug!(
        documents = loaded.len(),
        failures = loaded.failures.len(),
        "loaded metadata documents"
    );
    loaded
}

fn json_files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read directory {}", dir.display()))?;
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to list {}", dir.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn load_file(path: &Path, loaded: &mut LoadedDocuments) -> Result<()> {
    let content =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;

    let is_yaml = path
        .extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml");
    let value: Value = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("failed to parse YAML in {}", path.display()))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse JSON in {}", path.display()))?
    };

    let origin = path.display().to_string();
    match value {
        Value::Array(items) => {
            for (i, item) in items.into_iter().enumerate() {
                loaded.origins.push(format!("{origin}#{i}"));
                loaded.documents.push(item);
            }
        }
        Value::Object(_) => {
            loaded.origins.push(origin);
            loaded.documents.push(value);
        }
        other => bail!(
            "{} must hold a metadata object or an array of them, found {}",
            path.display(),
            json_kind(&other)
        ),
    }
    Ok(())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
