//! Generic searchable, sortable, paginated table over in-memory records.
//!
//! Records are raw JSON objects. Search and sort look at the raw field
//! values of the configured columns, stringified; render functions only
//! affect what is displayed.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{extract_id, RecordId};

pub const PAGE_SIZE: usize = 10;
/// Maximum number of page buttons shown at once.
pub const PAGE_WINDOW: usize = 5;
pub const EMPTY_MESSAGE: &str = "No records found";

pub type Record = Value;
pub type RenderFn = Arc<dyn Fn(&Record) -> String + Send + Sync>;

#[derive(Clone)]
pub struct Column {
    pub field: String,
    pub header: String,
    render: Option<RenderFn>,
}

impl Column {
    pub fn new(field: impl Into<String>, header: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            header: header.into(),
            render: None,
        }
    }

    pub fn with_render<F>(mut self, render: F) -> Self
    where
        F: Fn(&Record) -> String + Send + Sync + 'static,
    {
        self.render = Some(Arc::new(render));
        self
    }

    /// Raw value of this column's field, stringified.
    pub fn raw(&self, record: &Record) -> String {
        record.get(&self.field).map(stringify).unwrap_or_default()
    }

    /// Display text: the render function when present, else the raw value.
    pub fn cell(&self, record: &Record) -> String {
        match &self.render {
            Some(render) => render(record),
            None => self.raw(record),
        }
    }
}

impl fmt::Debug for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("field", &self.field)
            .field("header", &self.header)
            .field("render", &self.render.is_some())
            .finish()
    }
}

/// Text form of a JSON value as a table cell sees it.
pub fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Object(map) => match map.get("$oid").and_then(Value::as_str) {
            Some(oid) => oid.to_string(),
            None => value.to_string(),
        },
        Value::Array(_) => value.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortState {
    pub column: String,
    pub direction: SortDirection,
}

/// What the user has typed and clicked: search text, sort column and page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableState {
    pub search: String,
    pub sort: Option<SortState>,
    /// 1-based.
    pub page: usize,
}

impl Default for TableState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: None,
            page: 1,
        }
    }
}

impl TableState {
    /// New search text always starts from the first page.
    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    /// Sorting the same column again flips direction; a new column starts
    /// ascending.
    pub fn toggle_sort(&mut self, column: &str) {
        self.sort = Some(match self.sort.take() {
            Some(current) if current.column == column => SortState {
                column: current.column,
                direction: current.direction.toggled(),
            },
            _ => SortState {
                column: column.to_string(),
                direction: SortDirection::Ascending,
            },
        });
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderView {
    pub field: String,
    pub header: String,
    pub sort: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowView {
    pub id: Option<RecordId>,
    pub cells: Vec<String>,
}

/// One rendered page of the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub headers: Vec<HeaderView>,
    pub rows: Vec<RowView>,
    pub search: String,
    pub total_records: usize,
    pub filtered_records: usize,
    pub page: usize,
    pub total_pages: usize,
    pub page_numbers: Vec<usize>,
    /// Set when nothing matches; the view shows this instead of rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub empty_message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct DataTable {
    columns: Vec<Column>,
    id_field: String,
}

impl DataTable {
    pub fn new(columns: Vec<Column>, id_field: impl Into<String>) -> Self {
        Self {
            columns,
            id_field: id_field.into(),
        }
    }

    /// Records whose raw column values contain `search`, ignoring case.
    pub fn filter<'a>(&self, records: &'a [Record], search: &str) -> Vec<&'a Record> {
        let needle = search.trim().to_lowercase();
        if needle.is_empty() {
            return records.iter().collect();
        }
        records
            .iter()
            .filter(|record| {
                self.columns
                    .iter()
                    .any(|column| column.raw(record).to_lowercase().contains(&needle))
            })
            .collect()
    }

    /// Plain string comparison on the raw value. The sort is stable, so ties
    /// keep their incoming order in both directions.
    pub fn sort(&self, records: &mut [&Record], sort: &SortState) {
        let Some(column) = self.columns.iter().find(|c| c.field == sort.column) else {
            return;
        };
        records.sort_by(|a, b| {
            let ordering = column.raw(a).cmp(&column.raw(b));
            match sort.direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            }
        });
    }

    pub fn view(&self, records: &[Record], state: &TableState) -> TableView {
        let mut matching = self.filter(records, &state.search);
        if let Some(sort) = &state.sort {
            self.sort(&mut matching, sort);
        }

        let total_pages = total_pages(matching.len(), PAGE_SIZE);
        let page = state.page.clamp(1, total_pages.max(1));

        let rows = matching
            .iter()
            .skip((page - 1) * PAGE_SIZE)
            .take(PAGE_SIZE)
            .map(|record| RowView {
                id: extract_id(record, &self.id_field),
                cells: self.columns.iter().map(|c| c.cell(record)).collect(),
            })
            .collect();

        let headers = self
            .columns
            .iter()
            .map(|c| HeaderView {
                field: c.field.clone(),
                header: c.header.clone(),
                sort: state
                    .sort
                    .as_ref()
                    .filter(|s| s.column == c.field)
                    .map(|s| s.direction),
            })
            .collect();

        TableView {
            headers,
            rows,
            search: state.search.clone(),
            total_records: records.len(),
            filtered_records: matching.len(),
            page,
            total_pages,
            page_numbers: page_window(page, total_pages),
            empty_message: matching.is_empty().then(|| EMPTY_MESSAGE.to_string()),
        }
    }
}

pub fn total_pages(items: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    items.div_ceil(page_size)
}

/// Page numbers to show as buttons: at most [`PAGE_WINDOW`], centred on
/// the current page where possible.
pub fn page_window(current: usize, total: usize) -> Vec<usize> {
    if total == 0 {
        return Vec::new();
    }
    let current = current.clamp(1, total);
    let half = PAGE_WINDOW / 2;
    let mut start = current.saturating_sub(half).max(1);
    let end = (start + PAGE_WINDOW - 1).min(total);
    if end - start + 1 < PAGE_WINDOW {
        start = end.saturating_sub(PAGE_WINDOW - 1).max(1);
    }
    (start..=end).collect()
}
