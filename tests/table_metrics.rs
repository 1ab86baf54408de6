use std::{collections::HashSet, sync::Arc};

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use metrics_util::debugging::DebuggingRecorder;
use reelboard::infra::{
    catalog::MemoryCatalog,
    http::{AdminState, build_admin_router},
};
use tower::ServiceExt;

#[tokio::test]
async fn list_traffic_emits_expected_metric_keys() {
    let recorder = DebuggingRecorder::new();
    let snapshotter = recorder.snapshotter();
    recorder
        .install()
        .expect("debug metrics recorder should install in this test process");

    let catalog = MemoryCatalog::builtin().expect("fixture parses");
    let router = build_admin_router(AdminState::new(Arc::new(catalog)));

    let list = Request::builder()
        .method(Method::GET)
        .uri("/tags")
        .body(Body::empty())
        .expect("request");
    let response = router
        .clone()
        .oneshot(list)
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::OK);

    let panel = Request::builder()
        .method(Method::POST)
        .uri("/tags/panel?action=sort&column=name")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(
            "current_query=page%3D1%26page_size%3D30&page=1&page_size=30",
        ))
        .expect("request");
    let response = router
        .oneshot(panel)
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::OK);

    let names: HashSet<String> = snapshotter
        .snapshot()
        .into_vec()
        .into_iter()
        .map(|(composite_key, _, _, _)| composite_key.key().name().to_string())
        .collect();

    for metric in [
        "reelboard_catalog_request_total",
        "reelboard_table_history_replace_total",
    ] {
        assert!(names.contains(metric), "missing metric: {metric}");
    }
}
