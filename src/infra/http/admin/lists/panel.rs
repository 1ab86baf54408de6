use reelboard_api_types::JsonRow;

use crate::{
    application::{
        catalog::{ListRequest, accept_envelope},
        error::HttpError,
        table::{LoadMoreState, TableController, TableMode, TableOptions, TableProps},
    },
    domain::{
        resources::{Listing, Resource},
        table::{
            QueryParams,
            query::{FILTERS_KEY, PAGE_KEY, PAGE_SIZE_KEY, SORT_BY_KEY, SORT_ORDER_KEY},
        },
    },
    infra::http::admin::AdminState,
    presentation::{
        admin::views::{
            AdminHiddenField, AdminListPanelTemplate, AdminListPanelView, AdminListView,
            AdminSearchChoiceView, AdminSearchFieldView,
        },
        views::render_fragment,
    },
};

use super::forms::{CURRENT_QUERY_FIELD, HIDDEN_COLUMN_FIELD, PAGE_COUNT_FIELD};

pub(super) fn table_options(resource: Resource, more: Option<LoadMoreState>) -> TableOptions {
    let mode = match resource.listing() {
        Listing::Infinite => TableMode::Infinite(more.unwrap_or_default()),
        Listing::Paged | Listing::Unpaginated => TableMode::Paged,
    };

    TableOptions {
        hide_pagination: resource.listing() == Listing::Unpaginated,
        disable_url_updates: !resource.url_updates(),
        mode,
    }
}

/// Fetch the page the controller currently points at.
pub(super) async fn fetch_page(
    state: &AdminState,
    resource: Resource,
    controller: &TableController<JsonRow>,
    page: Option<u32>,
) -> Result<TableProps<JsonRow>, HttpError> {
    let mut request = ListRequest::from_state(&controller.query_state(), controller.rest());
    if let Some(page) = page {
        request = request.with_page(page);
    }

    let envelope = state.catalog.list(resource, &request).await?;
    let (rows, row_count) = accept_envelope(envelope)?;

    Ok(TableProps {
        data: Some(rows),
        row_count,
        page_count: None,
        loading: false,
    })
}

/// Hidden fields carrying the table state into the next panel request.
fn state_fields(
    controller: &TableController<JsonRow>,
    current_query: &QueryParams,
) -> Vec<AdminHiddenField> {
    let query = controller.query_state();
    let state = controller.state();

    let mut fields = vec![
        AdminHiddenField::new(CURRENT_QUERY_FIELD, current_query.to_query_string()),
        AdminHiddenField::new(PAGE_KEY, query.page.to_string()),
        AdminHiddenField::new(PAGE_SIZE_KEY, query.page_size.to_string()),
    ];
    if let Some(filters) = query.filters {
        fields.push(AdminHiddenField::new(FILTERS_KEY, filters));
    }
    if let Some(sort_by) = query.sort_by {
        fields.push(AdminHiddenField::new(SORT_BY_KEY, sort_by));
        fields.push(AdminHiddenField::new(
            SORT_ORDER_KEY,
            query.sort_order.map(|order| order.as_str()).unwrap_or("asc"),
        ));
    }
    if let Some(count) = state.page_count {
        fields.push(AdminHiddenField::new(PAGE_COUNT_FIELD, count.to_string()));
    }
    fields.extend(
        state
            .column_visibility
            .hidden_ids()
            .map(|id| AdminHiddenField::new(HIDDEN_COLUMN_FIELD, id)),
    );
    fields
}

pub(super) fn build_panel_view(
    resource: Resource,
    controller: &TableController<JsonRow>,
    props: &TableProps<JsonRow>,
    current_query: &QueryParams,
) -> AdminListPanelView {
    let slug = resource.slug();
    AdminListPanelView {
        slug: slug.to_string(),
        panel_action: format!("/{slug}/panel"),
        more_action: format!("/{slug}/more"),
        state_fields: state_fields(controller, current_query),
        table: controller.view(props),
    }
}

pub(super) fn build_list_view(
    resource: Resource,
    panel: AdminListPanelView,
    current_query: &QueryParams,
) -> AdminListView {
    let search_fields = resource
        .namespaced_filters()
        .iter()
        .map(|filter| {
            let name = format!("{FILTERS_KEY}.{}", filter.name);
            let value = current_query.get(&name).unwrap_or_default().to_string();
            AdminSearchFieldView {
                choices: filter
                    .choices
                    .iter()
                    .map(|(choice, label)| AdminSearchChoiceView {
                        value: choice.to_string(),
                        label: label.to_string(),
                        selected: *choice == value,
                    })
                    .collect(),
                name,
                label: filter.label.to_string(),
                value,
            }
        })
        .collect();

    AdminListView {
        heading: resource.title().to_string(),
        search_action: format!("/{}", resource.slug()),
        search_fields,
        panel,
    }
}

pub(super) fn render_panel_html(
    content: AdminListPanelView,
    template_source: &'static str,
) -> Result<String, HttpError> {
    render_fragment(&AdminListPanelTemplate { content }, template_source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_follow_screen_listing() {
        let genres = table_options(Resource::Genres, None);
        assert!(genres.hide_pagination);
        assert!(!genres.disable_url_updates);

        let movies = table_options(Resource::Movies, None);
        assert!(movies.disable_url_updates);
        assert_eq!(movies.mode, TableMode::Paged);

        let rentals = table_options(Resource::Rentals, None);
        assert_eq!(rentals.mode, TableMode::Infinite(LoadMoreState::default()));
    }

    #[test]
    fn search_fields_prefill_from_location() {
        let location = QueryParams::parse("filters.title=Up&filters.type=series");
        let panel = AdminListPanelView {
            slug: "movies".into(),
            panel_action: "/movies/panel".into(),
            more_action: "/movies/more".into(),
            state_fields: Vec::new(),
            table: crate::presentation::admin::views::table::TableView {
                headers: Vec::new(),
                rows: Vec::new(),
                column_span: 1,
                empty_message: "No results.",
                has_filters: false,
                column_toggles: Vec::new(),
                pagination: None,
                load_more: None,
            },
        };
        let view = build_list_view(Resource::Movies, panel, &location);

        assert_eq!(view.search_fields[0].name, "filters.title");
        assert_eq!(view.search_fields[0].value, "Up");
        assert!(view.search_fields[1].choices[1].selected);
    }
}
