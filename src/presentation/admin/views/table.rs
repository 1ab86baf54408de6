use askama::Template;

#[derive(Clone, Debug)]
pub struct TableHeaderView {
    pub id: String,
    pub label: String,
    pub sortable: bool,
    /// `asc` / `desc` when this column drives the current sort.
    pub sort_direction: Option<&'static str>,
    pub filterable: bool,
    pub filter_value: String,
}

impl TableHeaderView {
    pub fn aria_sort(&self) -> &'static str {
        match self.sort_direction {
            Some("asc") => "ascending",
            Some("desc") => "descending",
            _ => "none",
        }
    }

    pub fn sort_glyph(&self) -> &'static str {
        match self.sort_direction {
            Some("asc") => "▲",
            Some("desc") => "▼",
            _ => "",
        }
    }
}

#[derive(Clone, Debug)]
pub struct TableCellView {
    pub text: String,
    pub badge_class: Option<&'static str>,
}

#[derive(Clone, Debug)]
pub struct TableRowView {
    pub cells: Vec<TableCellView>,
}

#[derive(Clone, Debug)]
pub struct ColumnToggleView {
    pub id: String,
    pub label: String,
    pub visible: bool,
}

#[derive(Clone, Debug)]
pub struct PageSizeOptionView {
    pub value: u32,
    pub selected: bool,
}

#[derive(Clone, Debug)]
pub struct TablePaginationView {
    pub page: u32,
    pub page_count: Option<u32>,
    pub row_count: Option<u64>,
    pub summary: String,
    pub page_sizes: Vec<PageSizeOptionView>,
    pub first_disabled: bool,
    pub previous_disabled: bool,
    pub next_disabled: bool,
    pub last_disabled: bool,
}

#[derive(Clone, Debug)]
pub struct LoadMoreView {
    pub next_page: u32,
    pub disabled: bool,
    pub pending: bool,
}

impl LoadMoreView {
    /// Last page already on screen.
    pub fn loaded_page(&self) -> u32 {
        self.next_page.saturating_sub(1)
    }

    pub fn label(&self) -> &'static str {
        if self.pending {
            "Ачаалж байна…"
        } else {
            "Цааш үзэх"
        }
    }
}

#[derive(Clone, Debug)]
pub struct TableView {
    pub headers: Vec<TableHeaderView>,
    pub rows: Vec<TableRowView>,
    pub column_span: usize,
    pub empty_message: &'static str,
    pub has_filters: bool,
    pub column_toggles: Vec<ColumnToggleView>,
    pub pagination: Option<TablePaginationView>,
    pub load_more: Option<LoadMoreView>,
}

impl TableView {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column_toggles(&self) -> bool {
        !self.column_toggles.is_empty()
    }
}

/// Body rows alone, appended by "load more" responses.
#[derive(Template)]
#[template(path = "admin/table_rows.html")]
pub struct TableRowsTemplate {
    pub rows: Vec<TableRowView>,
}

#[derive(Template)]
#[template(path = "admin/table_load_more.html")]
pub struct TableLoadMoreTemplate {
    pub more_action: String,
    pub load_more: LoadMoreView,
}
