use askama::Template;
use reelboard::presentation::admin::views::{
    table::{
        ColumnToggleView, LoadMoreView, PageSizeOptionView, TableCellView, TableHeaderView,
        TableLoadMoreTemplate, TablePaginationView, TableRowView, TableRowsTemplate, TableView,
    },
    *,
};

fn headers() -> Vec<TableHeaderView> {
    vec![
        TableHeaderView {
            id: "title".into(),
            label: "Гарчиг".into(),
            sortable: true,
            sort_direction: Some("desc"),
            filterable: true,
            filter_value: "Mad".into(),
        },
        TableHeaderView {
            id: "year".into(),
            label: "Он".into(),
            sortable: false,
            sort_direction: None,
            filterable: false,
            filter_value: String::new(),
        },
    ]
}

fn panel(table: TableView) -> AdminListPanelView {
    AdminListPanelView {
        slug: "movies".into(),
        panel_action: "/movies/panel".into(),
        more_action: "/movies/more".into(),
        state_fields: vec![
            AdminHiddenField::new("current_query", "filters.type=series&page=2"),
            AdminHiddenField::new("page", "2"),
        ],
        table,
    }
}

fn table(rows: Vec<TableRowView>) -> TableView {
    TableView {
        headers: headers(),
        column_span: 2,
        rows,
        empty_message: "No results.",
        has_filters: true,
        column_toggles: vec![ColumnToggleView {
            id: "year".into(),
            label: "Он".into(),
            visible: true,
        }],
        pagination: Some(TablePaginationView {
            page: 2,
            page_count: Some(2),
            row_count: Some(31),
            summary: "Хуудас 2 / 2 (Нийт 31)".into(),
            page_sizes: vec![
                PageSizeOptionView {
                    value: 30,
                    selected: true,
                },
                PageSizeOptionView {
                    value: 50,
                    selected: false,
                },
            ],
            first_disabled: false,
            previous_disabled: false,
            next_disabled: true,
            last_disabled: true,
        }),
        load_more: None,
    }
}

fn row(title: &str, year: &str) -> TableRowView {
    TableRowView {
        cells: vec![
            TableCellView {
                text: title.into(),
                badge_class: None,
            },
            TableCellView {
                text: year.into(),
                badge_class: Some("badge--positive"),
            },
        ],
    }
}

#[test]
fn panel_carries_state_and_controls() {
    let content = panel(table(vec![row("Mad Max: Fury Road", "2015")]));
    let rendered = AdminListPanelTemplate { content }
        .render()
        .expect("panel renders");

    assert!(rendered.contains(r#"data-admin-panel="movies""#));
    assert!(rendered.contains(r#"name="page" value="2""#));
    assert!(rendered.contains(r#"name="filter.title" value="Mad""#));
    assert!(rendered.contains(r#"aria-sort="descending""#));
    assert!(rendered.contains("/movies/panel?action=sort&amp;column=title"));
    assert!(rendered.contains("Хуудас 2 / 2 (Нийт 31)"));
    assert!(rendered.contains(r#"<option value="30" selected>"#));
    assert!(rendered.contains("Mad Max: Fury Road"));
    assert!(!rendered.contains(r#"data-role="table-empty""#));
    assert!(!rendered.contains(r#"data-role="table-load-more""#));
}

#[test]
fn empty_panel_spans_every_column() {
    let content = panel(table(Vec::new()));
    let rendered = AdminListPanelTemplate { content }
        .render()
        .expect("panel renders");

    assert_eq!(rendered.matches(r#"data-role="table-empty""#).count(), 1);
    assert!(rendered.contains(r#"<td colspan="2">No results.</td>"#));
}

#[test]
fn pagination_omitted_when_hidden() {
    let mut view = table(vec![row("Up", "2009")]);
    view.pagination = None;
    let rendered = AdminListPanelTemplate {
        content: panel(view),
    }
    .render()
    .expect("panel renders");

    assert!(!rendered.contains(r#"data-role="table-pagination""#));
}

#[test]
fn rows_fragment_renders_badges() {
    let rendered = TableRowsTemplate {
        rows: vec![row("Up", "2009")],
    }
    .render()
    .expect("rows render");

    assert_eq!(rendered.matches("<tr>").count(), 1);
    assert!(rendered.contains(r#"<span class="badge badge--positive">2009</span>"#));
}

#[test]
fn load_more_fragment_tracks_loaded_page() {
    let rendered = TableLoadMoreTemplate {
        more_action: "/rentals/more".into(),
        load_more: LoadMoreView {
            next_page: 3,
            disabled: true,
            pending: false,
        },
    }
    .render()
    .expect("load more renders");

    assert!(rendered.contains(r#"name="more_page" value="2""#));
    assert!(rendered.contains(" disabled"));
    assert!(rendered.contains("/rentals/more"));
}
