//! Column descriptors for list tables.

use std::fmt;

/// Visual tone applied to badge cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Neutral,
    Positive,
    Warning,
    Negative,
}

impl BadgeTone {
    pub fn as_class(self) -> &'static str {
        match self {
            BadgeTone::Neutral => "badge--neutral",
            BadgeTone::Positive => "badge--positive",
            BadgeTone::Warning => "badge--warning",
            BadgeTone::Negative => "badge--negative",
        }
    }
}

/// Rendered content of one table cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayValue {
    Text(String),
    Badge { label: String, tone: BadgeTone },
    Empty,
}

impl DisplayValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn badge(label: impl Into<String>, tone: BadgeTone) -> Self {
        Self::Badge {
            label: label.into(),
            tone,
        }
    }
}

impl fmt::Display for DisplayValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayValue::Text(text) => f.write_str(text),
            DisplayValue::Badge { label, .. } => f.write_str(label),
            DisplayValue::Empty => Ok(()),
        }
    }
}

/// Capabilities a table needs from a column definition.
pub trait ColumnDescriptor<Row>: Send + Sync {
    /// Unique key, also used in `filters` and `sort_by`.
    fn id(&self) -> &str;

    /// Header label; the id is shown when absent.
    fn header(&self) -> Option<&str> {
        None
    }

    fn render(&self, row: &Row) -> DisplayValue;

    fn sortable(&self) -> bool {
        false
    }

    fn filterable(&self) -> bool {
        false
    }

    fn hideable(&self) -> bool {
        true
    }
}

type CellRenderer<Row> = Box<dyn Fn(&Row) -> DisplayValue + Send + Sync>;

/// Closure-backed column with builder-style capability flags.
pub struct Column<Row> {
    id: String,
    header: Option<String>,
    cell: CellRenderer<Row>,
    enable_sorting: bool,
    enable_column_filter: bool,
    enable_hiding: bool,
}

impl<Row> Column<Row> {
    pub fn new<F>(id: impl Into<String>, cell: F) -> Self
    where
        F: Fn(&Row) -> DisplayValue + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            header: None,
            cell: Box::new(cell),
            enable_sorting: false,
            enable_column_filter: false,
            enable_hiding: true,
        }
    }

    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    pub fn enable_sorting(mut self, enabled: bool) -> Self {
        self.enable_sorting = enabled;
        self
    }

    pub fn enable_column_filter(mut self, enabled: bool) -> Self {
        self.enable_column_filter = enabled;
        self
    }

    pub fn enable_hiding(mut self, enabled: bool) -> Self {
        self.enable_hiding = enabled;
        self
    }
}

impl<Row> fmt::Debug for Column<Row> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("enable_sorting", &self.enable_sorting)
            .field("enable_column_filter", &self.enable_column_filter)
            .field("enable_hiding", &self.enable_hiding)
            .finish_non_exhaustive()
    }
}

impl<Row> ColumnDescriptor<Row> for Column<Row> {
    fn id(&self) -> &str {
        &self.id
    }

    fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    fn render(&self, row: &Row) -> DisplayValue {
        (self.cell)(row)
    }

    fn sortable(&self) -> bool {
        self.enable_sorting
    }

    fn filterable(&self) -> bool {
        self.enable_column_filter
    }

    fn hideable(&self) -> bool {
        self.enable_hiding
    }
}
