use axum::{
    extract::{Form, Path, Query, RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use datastar::prelude::ElementPatchMode;
use tracing::debug;

use crate::{
    application::{
        error::HttpError,
        stream::StreamBuilder,
        table::{Reconciliation, TableController},
    },
    domain::table::QueryParams,
    infra::http::admin::{
        AdminState,
        history::PostedLocation,
        selectors::{TABLE_BODY, TABLE_LOAD_MORE, list_panel},
        shared::{datastar_replace, resolve_resource},
    },
    presentation::{
        admin::views::{
            AdminChrome, AdminLayout, AdminListTemplate,
            table::{TableLoadMoreTemplate, TableRowsTemplate},
        },
        views::{render_fragment, render_page},
    },
};

use super::{
    forms::{PanelAction, PanelForm, PanelQuery},
    panel::{build_list_view, build_panel_view, fetch_page, render_panel_html, table_options},
};

pub(crate) async fn admin_list(
    State(state): State<AdminState>,
    Path(slug): Path<String>,
    RawQuery(raw_query): RawQuery,
) -> Response {
    match render_list(&state, &slug, raw_query.as_deref().unwrap_or("")).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

async fn render_list(
    state: &AdminState,
    slug: &str,
    raw_query: &str,
) -> Result<Response, HttpError> {
    let resource = resolve_resource(slug)?;
    let mut location = PostedLocation::new(resource, raw_query);

    let mut controller =
        TableController::mount(resource.descriptors(), table_options(resource, None), &location)?;
    controller.restart_more();

    let outcome = controller.reconcile(&mut location);
    debug!(
        target = "reelboard::http::admin::lists",
        resource = resource.slug(),
        outcome = ?outcome,
        "list mounted"
    );

    let props = fetch_page(state, resource, &controller, None).await?;
    controller.sync_page_count(props.row_count, props.page_count);
    controller.finish_more(props.rows().len());

    let panel = build_panel_view(resource, &controller, &props, location.current());
    let content = build_list_view(resource, panel, location.current());
    let view = AdminLayout::new(AdminChrome::for_resource(resource), content);

    Ok(render_page(
        AdminListTemplate { view },
        "infra::http::admin::lists::render_list",
        StatusCode::OK,
    ))
}

pub(crate) async fn admin_list_panel(
    State(state): State<AdminState>,
    Path(slug): Path<String>,
    Query(query): Query<PanelQuery>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    match render_panel(&state, &slug, &query, pairs).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

async fn render_panel(
    state: &AdminState,
    slug: &str,
    query: &PanelQuery,
    pairs: Vec<(String, String)>,
) -> Result<Response, HttpError> {
    let resource = resolve_resource(slug)?;
    let action = PanelAction::parse(query)?;
    let form = PanelForm::from_pairs(pairs);

    let mut location = PostedLocation::new(resource, &form.current_query);
    let rest = location.current().without_table_keys();
    let mut controller = TableController::resume(
        resource.descriptors(),
        table_options(resource, None),
        form.table_state(),
        rest,
    )?;

    if let Some(table_action) = action.table_action(&form) {
        controller.dispatch(table_action);
    }
    controller.restart_more();

    if let Reconciliation::Replaced(query) = controller.reconcile(&mut location) {
        debug!(
            target = "reelboard::http::admin::lists",
            resource = resource.slug(),
            query = %query,
            "panel reconciled location"
        );
    }

    let props = fetch_page(state, resource, &controller, None).await?;
    controller.sync_page_count(props.row_count, props.page_count);
    controller.finish_more(props.rows().len());

    let panel = build_panel_view(resource, &controller, &props, location.current());
    let panel_html = render_panel_html(panel, "infra::http::admin::lists::render_panel")?;

    let mut stream = datastar_replace(&list_panel(resource), panel_html);
    location.flush(&mut stream);

    Ok(stream.into_response())
}

pub(crate) async fn admin_list_more(
    State(state): State<AdminState>,
    Path(slug): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    match render_more(&state, &slug, pairs).await {
        Ok(response) => response,
        Err(err) => err.into_response(),
    }
}

async fn render_more(
    state: &AdminState,
    slug: &str,
    pairs: Vec<(String, String)>,
) -> Result<Response, HttpError> {
    let resource = resolve_resource(slug)?;
    let form = PanelForm::from_pairs(pairs);
    let rest = QueryParams::parse(&form.current_query).without_table_keys();

    let mut controller = TableController::resume(
        resource.descriptors(),
        table_options(resource, Some(form.load_more_state())),
        form.table_state(),
        rest,
    )?;

    let Some(next_page) = controller.request_more() else {
        return Err(HttpError::new(
            "infra::http::admin::lists::render_more",
            StatusCode::CONFLICT,
            "Nothing more to load",
            format!("`{slug}` has no further pages"),
        ));
    };

    let props = fetch_page(state, resource, &controller, Some(next_page)).await?;
    controller.finish_more(props.rows().len());

    let view = controller.view(&props);
    let mut stream = StreamBuilder::new();

    if !view.rows.is_empty() {
        let rows_html = render_fragment(
            &TableRowsTemplate { rows: view.rows },
            "infra::http::admin::lists::render_more",
        )?;
        stream.push_patch(rows_html, TABLE_BODY, ElementPatchMode::Append);
    }

    if let Some(load_more) = view.load_more {
        let more_html = render_fragment(
            &TableLoadMoreTemplate {
                more_action: format!("/{}/more", resource.slug()),
                load_more,
            },
            "infra::http::admin::lists::render_more",
        )?;
        stream.push_patch(more_html, TABLE_LOAD_MORE, ElementPatchMode::Replace);
    }

    Ok(stream.into_response())
}
