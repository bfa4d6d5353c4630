//! JSON and binary persistence.
//!
//! The JSON document lists simplex records lowest order first. The loader
//! sorts records by their `order` field before inserting, so documents may
//! reference faces that appear later in the list. Every record still goes
//! through [`SimplicialComplex::add_simplex`], so malformed documents fail
//! with the same errors as direct construction.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use simplicial_core::{Attributes, Label, Representation, SchemaVersion, SimplicialError};

use crate::complex::SimplicialComplex;
use crate::config::ComplexConfig;

/// Schema version written by this crate.
pub const CURRENT_SCHEMA: SchemaVersion = SchemaVersion::new(1, 0, 0);

/// Serializes the complex to a JSON string.
pub fn to_json<R: Representation>(complex: &SimplicialComplex<R>) -> Result<String, SimplicialError> {
    let document = Document::from_complex(complex)?;
    serde_json::to_string_pretty(&document)
        .map_err(|err| SimplicialError::serde("serialize-json", err.to_string()))
}

/// Restores a complex from a JSON string.
pub fn from_json<R: Representation>(json: &str) -> Result<SimplicialComplex<R>, SimplicialError> {
    let document: Document = serde_json::from_str(json)
        .map_err(|err| SimplicialError::serde("deserialize-json", err.to_string()))?;
    document.into_complex()
}

/// Serializes the complex to a compact binary representation using `bincode`.
pub fn to_bytes<R: Representation>(
    complex: &SimplicialComplex<R>,
) -> Result<Vec<u8>, SimplicialError> {
    let document = BinaryDocument::from_document(Document::from_complex(complex)?)?;
    bincode::serialize(&document)
        .map_err(|err| SimplicialError::serde("serialize-bytes", err.to_string()))
}

/// Restores a complex from its binary representation.
pub fn from_bytes<R: Representation>(bytes: &[u8]) -> Result<SimplicialComplex<R>, SimplicialError> {
    let document: BinaryDocument = bincode::deserialize(bytes)
        .map_err(|err| SimplicialError::serde("deserialize-bytes", err.to_string()))?;
    document.into_document()?.into_complex()
}

/// Writes the JSON document to `path`.
pub fn write_json<R: Representation>(
    complex: &SimplicialComplex<R>,
    path: impl AsRef<Path>,
) -> Result<(), SimplicialError> {
    let path = path.as_ref();
    let json = to_json(complex)?;
    fs::write(path, json).map_err(|err| {
        SimplicialError::serde("write-file", err.to_string())
            .with_context("path", path.display())
    })
}

/// Reads a JSON document from `path`.
pub fn read_json<R: Representation>(
    path: impl AsRef<Path>,
) -> Result<SimplicialComplex<R>, SimplicialError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|err| {
        SimplicialError::serde("read-file", err.to_string()).with_context("path", path.display())
    })?;
    from_json(&json)
}

/// One simplex as stored in a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimplexRecord {
    /// Label of the simplex.
    pub label: Label,
    /// Order of the simplex.
    pub order: usize,
    /// Labels of its immediate faces; empty for points.
    #[serde(default)]
    pub faces: Vec<Label>,
    /// Client attributes.
    #[serde(default)]
    pub attributes: Attributes,
}

#[derive(Debug, Serialize, Deserialize)]
struct Document {
    schema_version: SchemaVersion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    config: Option<ComplexConfig>,
    simplices: Vec<SimplexRecord>,
}

impl Document {
    fn from_complex<R: Representation>(
        complex: &SimplicialComplex<R>,
    ) -> Result<Self, SimplicialError> {
        let mut simplices = Vec::with_capacity(complex.number_of_simplices());
        for label in complex.simplices(false) {
            simplices.push(SimplexRecord {
                order: complex.order_of(&label)?,
                faces: complex.faces(&label)?.into_iter().collect(),
                attributes: complex.attributes(&label)?.clone(),
                label,
            });
        }
        Ok(Self {
            schema_version: CURRENT_SCHEMA,
            config: Some(complex.config().clone()),
            simplices,
        })
    }

    fn into_complex<R: Representation>(self) -> Result<SimplicialComplex<R>, SimplicialError> {
        if !CURRENT_SCHEMA.accepts(&self.schema_version) {
            return Err(SimplicialError::serde(
                "schema-version",
                "document schema version is not supported",
            )
            .with_context(
                "found",
                format!(
                    "{}.{}.{}",
                    self.schema_version.major,
                    self.schema_version.minor,
                    self.schema_version.patch
                ),
            ));
        }
        let mut complex = SimplicialComplex::with_backend(self.config.unwrap_or_default());
        let mut records = self.simplices;
        records.sort_by_key(|record| record.order);
        for record in records {
            let expected = if record.order == 0 { 0 } else { record.order + 1 };
            if record.faces.len() != expected {
                return Err(SimplicialError::invalid_order(
                    "face-count",
                    "record order disagrees with its face count",
                )
                .with_context("simplex", &record.label)
                .with_context("order", record.order)
                .with_context("faces", record.faces.len()));
            }
            complex.add_simplex(&record.faces, Some(record.label), Some(record.attributes))?;
        }
        Ok(complex)
    }
}

/// Self-describing values such as untagged labels and JSON attributes are
/// not supported by `bincode`, so the binary form tags labels and carries
/// attributes as JSON text.
#[derive(Debug, Serialize, Deserialize)]
struct BinaryDocument {
    schema_version: SchemaVersion,
    config: Option<ComplexConfig>,
    simplices: Vec<BinarySimplex>,
}

#[derive(Debug, Serialize, Deserialize)]
enum BinaryLabel {
    Int(i64),
    Name(String),
}

impl From<Label> for BinaryLabel {
    fn from(label: Label) -> Self {
        match label {
            Label::Int(value) => BinaryLabel::Int(value),
            Label::Name(name) => BinaryLabel::Name(name),
        }
    }
}

impl From<BinaryLabel> for Label {
    fn from(label: BinaryLabel) -> Self {
        match label {
            BinaryLabel::Int(value) => Label::Int(value),
            BinaryLabel::Name(name) => Label::Name(name),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct BinarySimplex {
    label: BinaryLabel,
    order: u64,
    faces: Vec<BinaryLabel>,
    attributes: String,
}

impl BinaryDocument {
    fn from_document(document: Document) -> Result<Self, SimplicialError> {
        let simplices = document
            .simplices
            .into_iter()
            .map(|record| {
                let attributes = serde_json::to_string(&record.attributes)
                    .map_err(|err| SimplicialError::serde("serialize-bytes", err.to_string()))?;
                Ok(BinarySimplex {
                    label: record.label.into(),
                    order: record.order as u64,
                    faces: record.faces.into_iter().map(BinaryLabel::from).collect(),
                    attributes,
                })
            })
            .collect::<Result<Vec<_>, SimplicialError>>()?;
        Ok(Self {
            schema_version: document.schema_version,
            config: document.config,
            simplices,
        })
    }

    fn into_document(self) -> Result<Document, SimplicialError> {
        let simplices = self
            .simplices
            .into_iter()
            .map(|simplex| {
                let attributes: Attributes = serde_json::from_str(&simplex.attributes)
                    .map_err(|err| SimplicialError::serde("deserialize-bytes", err.to_string()))?;
                Ok(SimplexRecord {
                    label: simplex.label.into(),
                    order: simplex.order as usize,
                    faces: simplex.faces.into_iter().map(Label::from).collect(),
                    attributes,
                })
            })
            .collect::<Result<Vec<_>, SimplicialError>>()?;
        Ok(Document {
            schema_version: self.schema_version,
            config: self.config,
            simplices,
        })
    }
}
