//! Table model and file loading

use std::fmt;
use std::path::Path;

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

use crate::TableError;

/// A recognized header column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    /// `field` (dot path into data) or `key` (literal key in a flat map).
    Field,
    /// `matcher` - operator name.
    Matcher,
    /// `value` - expected literal.
    Value,
}

impl Column {
    /// Parse a header cell. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::UnexpectedColumn`] for anything but `field`,
    /// `key`, `matcher` or `value`.
    pub fn from_header(header: &str) -> Result<Self, TableError> {
        match header.trim() {
            "field" | "key" => Ok(Self::Field),
            "matcher" => Ok(Self::Matcher),
            "value" => Ok(Self::Value),
            other => Err(TableError::UnexpectedColumn {
                header: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field => f.write_str("field"),
            Self::Matcher => f.write_str("matcher"),
            Self::Value => f.write_str("value"),
        }
    }
}

/// One data row. Missing cells are empty strings; an empty matcher means
/// `equal`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssertionRow {
    /// Path or key to check.
    pub field: String,
    /// Operator name.
    pub matcher: String,
    /// Expected literal.
    pub value: String,
}

impl AssertionRow {
    /// Create a row from its three cells.
    pub fn new(
        field: impl Into<String>,
        matcher: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            matcher: matcher.into(),
            value: value.into(),
        }
    }
}

/// A validated assertion table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssertionTable {
    columns: Vec<Column>,
    rows: Vec<AssertionRow>,
}

impl AssertionTable {
    /// Build a table from a header and data rows.
    ///
    /// Columns may appear in any order. When a column repeats, its last cell
    /// wins.
    ///
    /// # Errors
    ///
    /// [`TableError::UnexpectedColumn`] for an unknown header, or
    /// [`TableError::RowWidth`] for a row wider than the header.
    pub fn new<H, R, C>(header: H, rows: R) -> Result<Self, TableError>
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        let columns = header
            .into_iter()
            .map(|h| Column::from_header(h.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, cells)| build_row(&columns, i + 1, cells))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { columns, rows })
    }

    /// Build a table whose first row is the header.
    ///
    /// # Errors
    ///
    /// [`TableError::MissingHeader`] for an empty input, otherwise as
    /// [`new`](Self::new).
    pub fn from_rows(rows: Vec<Vec<String>>) -> Result<Self, TableError> {
        let mut rows = rows.into_iter();
        let header = rows.next().ok_or(TableError::MissingHeader)?;
        Self::new(header, rows)
    }

    /// The header columns, in order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The data rows, in order.
    #[must_use]
    pub fn rows(&self) -> &[AssertionRow] {
        &self.rows
    }

    /// Number of data rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn build_row<C>(columns: &[Column], row: usize, cells: C) -> Result<AssertionRow, TableError>
where
    C: IntoIterator,
    C::Item: Into<String>,
{
    let cells: Vec<String> = cells.into_iter().map(Into::into).collect();
    if cells.len() > columns.len() {
        return Err(TableError::RowWidth {
            row,
            width: cells.len(),
            header_width: columns.len(),
        });
    }

    let mut out = AssertionRow::default();
    for (column, cell) in columns.iter().zip(cells) {
        match column {
            Column::Field => out.field = cell,
            Column::Matcher => out.matcher = cell,
            Column::Value => out.value = cell,
        }
    }
    Ok(out)
}

// ═══════════════════════════════════════════════════════════════════════════════
// Files
// ═══════════════════════════════════════════════════════════════════════════════

/// A table cell as written in YAML or JSON.
///
/// Cells are text. An unquoted number or boolean is rejected rather than
/// re-rendered, since `1.0` would otherwise come back as `1` and no longer
/// be the literal the author wrote.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Cell(String);

impl Cell {
    /// Returns the cell text.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Cell {
    fn from(text: &str) -> Self {
        Self(text.to_string())
    }
}

impl From<String> for Cell {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl From<Cell> for String {
    fn from(cell: Cell) -> Self {
        cell.0
    }
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawCell::deserialize(deserializer)? {
            RawCell::Text(text) => Ok(Self(text)),
            RawCell::Bool(b) => Err(unquoted("boolean", b)),
            RawCell::Int(i) => Err(unquoted("number", i)),
            RawCell::Float(f) => Err(unquoted("number", f)),
        }
    }
}

/// Scalar shapes a cell may arrive as before it is checked.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCell {
    Text(String),
    Bool(bool),
    Int(i64),
    Float(f64),
}

fn unquoted<E: de::Error>(kind: &str, value: impl fmt::Display) -> E {
    E::custom(format!(
        "unquoted {kind} `{value}` in table cell, quote it to keep the literal as written"
    ))
}

/// Serialized table.
///
/// Either `rows` alone, with the header as the first row:
///
/// ```yaml
/// rows:
///   - [field, matcher, value]
///   - [user.id, "=", 645((int))]
/// ```
///
/// or an explicit `header`:
///
/// ```yaml
/// header: [key, value]
/// rows:
///   - [Content-Type, application/json]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableFile {
    /// Header row. When absent, the first entry of `rows` is the header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header: Option<Vec<Cell>>,
    /// Data rows.
    pub rows: Vec<Vec<Cell>>,
}

impl TryFrom<TableFile> for AssertionTable {
    type Error = TableError;

    fn try_from(file: TableFile) -> Result<Self, Self::Error> {
        let mut rows = file.rows.into_iter();
        let header = match file.header {
            Some(header) => header,
            None => rows.next().ok_or(TableError::MissingHeader)?,
        };
        let header: Vec<String> = header.into_iter().map(String::from).collect();
        Self::new(header, rows)
    }
}

/// Load a table file. `.json` files are parsed as JSON, everything else as
/// YAML.
///
/// # Errors
///
/// I/O and parse errors, then any error from [`AssertionTable::new`].
pub fn load_table(path: impl AsRef<Path>) -> Result<AssertionTable, TableError> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let file: TableFile = if is_json {
        serde_json::from_str(&content)?
    } else {
        serde_yaml::from_str(&content)?
    };
    AssertionTable::try_from(file)
}
