//! Declarative export lists and projection of joined records

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ExportError, Result};
use crate::model::{JoinedRecord, Scalar};

static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Remove markup tags such as `<span ...>` from a string
pub fn strip_tags(s: &str) -> String {
    TAG.replace_all(s, "").into_owned()
}

/// Derivation of a computed column
#[derive(Clone)]
pub enum Transform {
    /// Source column with markup tags removed
    StripTags(String),
    /// Integer source column plus a constant
    Offset { column: String, by: i64 },
    /// Arbitrary function over the whole record
    Custom(fn(&JoinedRecord) -> Result<Scalar>),
}

impl std::fmt::Debug for Transform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Transform::StripTags(column) => f.debug_tuple("StripTags").field(column).finish(),
            Transform::Offset { column, by } => f
                .debug_struct("Offset")
                .field("column", column)
                .field("by", by)
                .finish(),
            Transform::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl Transform {
    /// Source column, when the transform reads exactly one
    pub fn source(&self) -> Option<&str> {
        match self {
            Transform::StripTags(column) | Transform::Offset { column, .. } => Some(column.as_str()),
            Transform::Custom(_) => None,
        }
    }

    fn apply(&self, name: &str, record: &JoinedRecord) -> Result<Scalar> {
        match self {
            Transform::StripTags(column) => Ok(match field(record, column)? {
                Scalar::Str(s) => Scalar::Str(strip_tags(s)),
                other => other.clone(),
            }),
            Transform::Offset { column, by } => {
                let value = field(record, column)?;
                value
                    .as_int()
                    .and_then(|i| i.checked_add(*by))
                    .map(Scalar::Int)
                    .ok_or_else(|| ExportError::Transform {
                        column: name.to_string(),
                        message: format!("{} is not an integer ({:?})", column, value.display()),
                    })
            }
            Transform::Custom(f) => f(record),
        }
    }
}

/// One output column
#[derive(Debug, Clone)]
pub enum ExportColumn {
    /// Copy the named record field verbatim
    Copy(String),
    /// Compute a value under a new header
    Computed { name: String, transform: Transform },
}

impl ExportColumn {
    pub fn copy(name: impl Into<String>) -> Self {
        ExportColumn::Copy(name.into())
    }

    pub fn computed(name: impl Into<String>, transform: Transform) -> Self {
        ExportColumn::Computed {
            name: name.into(),
            transform,
        }
    }

    /// Header text
    pub fn name(&self) -> &str {
        match self {
            ExportColumn::Copy(name) | ExportColumn::Computed { name, .. } => name,
        }
    }
}

/// Ordered list of output columns
#[derive(Debug, Clone, Default)]
pub struct ExportSpec {
    columns: Vec<ExportColumn>,
}

impl ExportSpec {
    pub fn new(columns: Vec<ExportColumn>) -> Self {
        Self { columns }
    }

    /// Header row in export order
    pub fn header(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name().to_string()).collect()
    }

    /// Fail with `MissingField` if any column reads a name outside `available`
    pub fn validate<'a>(&self, available: impl IntoIterator<Item = &'a str>) -> Result<()> {
        let available: Vec<&str> = available.into_iter().collect();
        for column in &self.columns {
            let read = match column {
                ExportColumn::Copy(name) => Some(name.as_str()),
                ExportColumn::Computed { transform, .. } => transform.source(),
            };
            if let Some(name) = read {
                if !available.contains(&name) {
                    return Err(ExportError::MissingField {
                        column: name.to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Fully rendered export, ready for a sink
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub header: Vec<String>,
    pub rows: Vec<Vec<Scalar>>,
}

/// Projects joined records through an [`ExportSpec`]
pub struct ColumnProjector<'a> {
    spec: &'a ExportSpec,
}

impl<'a> ColumnProjector<'a> {
    pub fn new(spec: &'a ExportSpec) -> Self {
        Self { spec }
    }

    /// One output row for one record
    pub fn project(&self, record: &JoinedRecord) -> Result<Vec<Scalar>> {
        self.spec
            .columns
            .iter()
            .map(|column| match column {
                ExportColumn::Copy(name) => field(record, name).cloned(),
                ExportColumn::Computed { name, transform } => transform.apply(name, record),
            })
            .collect()
    }

    /// Header plus every projected row. Stops at the first error, so a
    /// failed render yields nothing at all.
    pub fn render<I>(&self, rows: I) -> Result<Projection>
    where
        I: IntoIterator<Item = Result<Vec<Scalar>>>,
    {
        let rows = rows.into_iter().collect::<Result<Vec<_>>>()?;

        Ok(Projection {
            header: self.spec.header(),
            rows,
        })
    }
}

fn field<'r>(record: &'r JoinedRecord, name: &str) -> Result<&'r Scalar> {
    record.get(name).ok_or_else(|| ExportError::MissingField {
        column: name.to_string(),
    })
}
