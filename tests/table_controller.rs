use reelboard::application::table::{
    EMPTY_MESSAGE, MemoryUrl, Reconciliation, TableController, TableOptions, TableProps,
    UrlAdapter,
};
use reelboard::domain::table::{
    Column, ColumnDescriptor, ColumnFilterEntry, ColumnFilters, DisplayValue, TableAction,
};

#[derive(Debug, Clone)]
struct Title {
    title: &'static str,
    year: u16,
}

fn columns() -> Vec<Box<dyn ColumnDescriptor<Title>>> {
    vec![
        Box::new(
            Column::new("title", |row: &Title| DisplayValue::text(row.title))
                .enable_column_filter(true)
                .enable_sorting(true),
        ),
        Box::new(
            Column::new("year", |row: &Title| DisplayValue::text(row.year.to_string()))
                .enable_sorting(true),
        ),
    ]
}

fn mount(query: &str, options: TableOptions) -> (TableController<Title>, MemoryUrl) {
    let url = MemoryUrl::new(query);
    let controller = TableController::mount(columns(), options, &url).expect("mount");
    (controller, url)
}

#[test]
fn location_round_trips_without_history_write() {
    for page in [1_u32, 2, 17, 500, 999] {
        for page_size in [30_u32, 50, 100] {
            let raw = format!("page={page}&page_size={page_size}");
            let (mut controller, mut url) = mount(&raw, TableOptions::default());

            assert_eq!(controller.state().pagination.page_index, page - 1);
            assert_eq!(controller.state().pagination.page_size, page_size);

            controller.reconcile(&mut url);
            assert_eq!(controller.reconcile(&mut url), Reconciliation::Unchanged);
            assert_eq!(url.write_count(), 0);
            assert_eq!(url.query_string(), raw);
        }
    }
}

#[test]
fn filters_serialize_in_insertion_order() {
    let filters = ColumnFilters::from_entries([
        ColumnFilterEntry::new("name", "foo"),
        ColumnFilterEntry::new("status", "active"),
    ]);
    let serialized = filters.serialize().expect("filters present");
    assert_eq!(serialized, "name=foo,status=active");

    let reparsed = ColumnFilters::parse(&serialized);
    assert_eq!(reparsed.get("name"), Some("foo"));
    assert_eq!(reparsed.get("status"), Some("active"));
}

#[test]
fn repeated_reconcile_writes_once() {
    let (mut controller, mut url) = mount("tab=series", TableOptions::default());
    controller.reconcile(&mut url);

    assert!(controller.dispatch(TableAction::NextPage));
    assert!(matches!(
        controller.reconcile(&mut url),
        Reconciliation::Replaced(_)
    ));
    assert_eq!(controller.reconcile(&mut url), Reconciliation::Unchanged);

    assert_eq!(url.write_count(), 1);
    assert_eq!(url.query_string(), "tab=series&page=2&page_size=30");
}

#[test]
fn disabled_url_updates_never_touch_location() {
    let options = TableOptions {
        disable_url_updates: true,
        ..TableOptions::default()
    };
    let (mut controller, mut url) = mount("page=1&page_size=30", options);
    controller.reconcile(&mut url);

    controller.dispatch(TableAction::NextPage);
    controller.dispatch(TableAction::SetPageSize(50));
    controller.dispatch(TableAction::SetColumnFilters(vec![ColumnFilterEntry::new(
        "title", "Тэмүүжин",
    )]));
    assert_eq!(controller.reconcile(&mut url), Reconciliation::Disabled);

    assert_eq!(url.write_count(), 0);
    assert_eq!(url.read().to_query_string(), "page=1&page_size=30");
    assert_eq!(controller.state().pagination.page_index, 0);
    assert_eq!(controller.state().pagination.page_size, 50);
    assert_eq!(
        controller.state().column_filters.get("title"),
        Some("Тэмүүжин")
    );
}

#[test]
fn boundary_buttons_follow_page_count() {
    let props = TableProps::<Title> {
        data: Some(Vec::new()),
        page_count: Some(5),
        ..TableProps::default()
    };

    let (mut controller, _) = mount("", TableOptions::default());
    controller.sync_page_count(None, Some(5));
    let pagination = controller.view(&props).pagination.expect("pagination");
    assert!(pagination.first_disabled);
    assert!(pagination.previous_disabled);
    assert!(!pagination.next_disabled);

    controller.dispatch(TableAction::SetPageIndex(4));
    let pagination = controller.view(&props).pagination.expect("pagination");
    assert!(pagination.next_disabled);
    assert!(pagination.last_disabled);
    assert!(!pagination.previous_disabled);

    controller.dispatch(TableAction::SetPageIndex(2));
    controller.dispatch(TableAction::NextPage);
    assert_eq!(controller.state().pagination.page_index, 3);
}

#[test]
fn missing_data_renders_empty_state() {
    let (controller, _) = mount("", TableOptions::default());

    for props in [
        TableProps::<Title>::default(),
        TableProps {
            data: Some(Vec::new()),
            ..TableProps::default()
        },
    ] {
        let view = controller.view(&props);
        assert!(view.is_empty());
        assert_eq!(view.column_span, 2);
        assert_eq!(view.empty_message, EMPTY_MESSAGE);
    }
}

#[test]
fn single_row_page_renders_headers_cells_and_summary() {
    let (mut controller, mut url) = mount("page_size=30", TableOptions::default());
    controller.reconcile(&mut url);

    let props = TableProps {
        data: Some(vec![Title {
            title: "A",
            year: 2020,
        }]),
        row_count: Some(1),
        ..TableProps::default()
    };
    controller.sync_page_count(props.row_count, props.page_count);
    let view = controller.view(&props);

    let labels: Vec<&str> = view.headers.iter().map(|h| h.label.as_str()).collect();
    assert_eq!(labels, ["title", "year"]);
    assert_eq!(view.rows.len(), 1);
    let cells: Vec<&str> = view.rows[0].cells.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(cells, ["A", "2020"]);
    assert_eq!(
        view.pagination.expect("pagination").summary,
        "Хуудас 1 / 1 (Нийт 1)"
    );
}

#[test]
fn sorting_cycles_and_resets_page() {
    let (mut controller, mut url) = mount("page=4&page_size=30", TableOptions::default());
    controller.reconcile(&mut url);

    controller.dispatch(TableAction::ToggleSort("year".into()));
    controller.reconcile(&mut url);
    assert_eq!(
        url.query_string(),
        "page=1&page_size=30&sort_by=year&sort_order=asc"
    );

    controller.dispatch(TableAction::ToggleSort("year".into()));
    controller.reconcile(&mut url);
    assert_eq!(
        url.query_string(),
        "page=1&page_size=30&sort_by=year&sort_order=desc"
    );

    controller.dispatch(TableAction::ToggleSort("year".into()));
    controller.reconcile(&mut url);
    assert_eq!(url.query_string(), "page=1&page_size=30");
    assert_eq!(url.write_count(), 3);
}
