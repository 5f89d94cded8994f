use std::fmt;
use std::str::FromStr;

use crate::k8s::discovery::ApiResourceDescriptor;

/// Queryable columns of an API resource table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Name,
    SingularName,
    Namespaced,
    Group,
    Version,
    Kind,
    ShortNames,
    Categories,
}

impl Column {
    pub const ALL: [Column; 8] = [
        Column::Name,
        Column::SingularName,
        Column::Namespaced,
        Column::Group,
        Column::Version,
        Column::Kind,
        Column::ShortNames,
        Column::Categories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::SingularName => "singularName",
            Self::Namespaced => "namespaced",
            Self::Group => "group",
            Self::Version => "version",
            Self::Kind => "kind",
            Self::ShortNames => "shortNames",
            Self::Categories => "categories",
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Column {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown column '{s}'"))
    }
}

/// One value in a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Flag(bool),
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => f.write_str(s),
            Self::Flag(b) => write!(f, "{b}"),
        }
    }
}

/// Row-oriented table over API resource descriptors. The schema is fixed, so an
/// empty table still answers every column query, just with empty results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiResourceTable {
    rows: Vec<ApiResourceDescriptor>,
}

impl ApiResourceTable {
    pub fn new(rows: Vec<ApiResourceDescriptor>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ApiResourceDescriptor] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// At least one row.
    pub fn exists(&self) -> bool {
        !self.rows.is_empty()
    }

    /// The column in row order; list columns are flattened.
    pub fn column(&self, column: Column) -> Vec<CellValue> {
        self.rows.iter().flat_map(|row| cells(row, column)).collect()
    }

    /// Does any row's `column` contain `value`.
    pub fn includes(&self, column: Column, value: impl Into<CellValue>) -> bool {
        let value = value.into();
        self.rows
            .iter()
            .any(|row| cells(row, column).contains(&value))
    }

    /// Does every row's `column` equal `value`. False for an empty table.
    ///
    /// For list columns a row matches when its list is exactly `[value]`.
    pub fn all_equal(&self, column: Column, value: impl Into<CellValue>) -> bool {
        let value = value.into();
        !self.rows.is_empty()
            && self
                .rows
                .iter()
                .all(|row| cells(row, column) == std::slice::from_ref(&value))
    }

    /// Rows whose `column` contains `value`.
    pub fn where_eq(&self, column: Column, value: impl Into<CellValue>) -> Self {
        let value = value.into();
        self.filter(|row| cells(row, column).contains(&value))
    }

    pub fn filter<P>(&self, mut predicate: P) -> Self
    where
        P: FnMut(&ApiResourceDescriptor) -> bool,
    {
        Self {
            rows: self.rows.iter().filter(|r| predicate(r)).cloned().collect(),
        }
    }

    pub fn names(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.name.as_str()).collect()
    }

    pub fn singular_names(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.singular_name.as_str()).collect()
    }

    pub fn namespaced(&self) -> Vec<bool> {
        self.rows.iter().map(|r| r.namespaced).collect()
    }

    pub fn groups(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.group.as_str()).collect()
    }

    pub fn versions(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.version.as_str()).collect()
    }

    pub fn kinds(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.kind.as_str()).collect()
    }

    pub fn short_names(&self) -> Vec<&str> {
        self.rows
            .iter()
            .flat_map(|r| r.short_names.iter().map(String::as_str))
            .collect()
    }

    pub fn categories(&self) -> Vec<&str> {
        self.rows
            .iter()
            .flat_map(|r| r.categories.iter().map(String::as_str))
            .collect()
    }
}

fn cells(row: &ApiResourceDescriptor, column: Column) -> Vec<CellValue> {
    let text = |s: &str| vec![CellValue::Text(s.to_string())];
    match column {
        Column::Name => text(&row.name),
        Column::SingularName => text(&row.singular_name),
        Column::Namespaced => vec![CellValue::Flag(row.namespaced)],
        Column::Group => text(&row.group),
        Column::Version => text(&row.version),
        Column::Kind => text(&row.kind),
        Column::ShortNames => row.short_names.iter().cloned().map(CellValue::Text).collect(),
        Column::Categories => row.categories.iter().cloned().map(CellValue::Text).collect(),
    }
}
