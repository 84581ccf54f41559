//! End-to-end view scenarios against a fake dashboard API served by axum

use std::sync::Arc;
use std::time::Duration;

use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use livehub_core::views::directory::DRIVERS_ERROR;
use livehub_core::views::profile::PROFILE_ERROR;
use livehub_core::views::schedule::SCHEDULE_ERROR;
use livehub_core::views::DriverDirectory;
use livehub_core::{Api, Dashboard, FetchError, HubConfig, LinkRenderer, ScheduleTab, ViewStatus};
use serde_json::{json, Value};
use tokio::net::TcpListener;

async fn spawn_api(router: Router) -> HubConfig {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    HubConfig::from_base(&format!("http://{}", addr)).unwrap()
}

async fn driver_detail(Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    match id.as_str() {
        "1" => {
            // Slow enough to be overtaken by a later selection
            tokio::time::sleep(Duration::from_millis(300)).await;
            (StatusCode::OK, Json(json!({"stats": {"wins": 63}})))
        }
        "4" => (StatusCode::OK, Json(json!({"stats": {"wins": 9}}))),
        _ => (StatusCode::NOT_FOUND, Json(json!({"detail": "not found"}))),
    }
}

fn fake_api() -> Router {
    Router::new()
        .route(
            "/drivers",
            get(|| async {
                Json(json!([
                    {"id": 1, "name": "Max", "team": "RB", "country": "NL", "number": 1},
                    {"id": 4, "name": "Lando", "team": "McLaren", "country": "GB", "number": 4},
                    {"id": 7, "name": "Kimi", "team": "Ferrari", "country": "FI", "number": 7}
                ]))
            }),
        )
        .route("/drivers/{id}", get(driver_detail))
        .route(
            "/events/upcoming",
            get(|| async { Json(json!({"items": [{"id": "mon", "name": "Monaco Grand Prix"}]})) }),
        )
        .route(
            "/events/recent",
            get(|| async {
                Json(json!({"items": [{"id": "esp", "name": "Spanish Grand Prix",
                                        "result": {"winner": "Oscar Piastri"}}]}))
            }),
        )
}

async fn dashboard(router: Router) -> Dashboard {
    let config = spawn_api(router).await;
    let api = Api::http(&config).unwrap();
    Dashboard::new(api, Arc::new(LinkRenderer))
}

#[tokio::test]
async fn test_directory_search_scenario() {
    let router = Router::new().route(
        "/drivers",
        get(|| async {
            Json(json!([
                {"id": 1, "name": "Max", "team": "RB", "country": "NL", "number": 1}
            ]))
        }),
    );
    let config = spawn_api(router).await;
    let mut directory = DriverDirectory::new(Api::http(&config).unwrap());
    directory.mount();
    directory.settle().await;

    directory.set_query("nl");
    let visible = directory.visible();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, "1");

    directory.set_query("zz");
    assert!(directory.visible().is_empty());
}

#[tokio::test]
async fn test_detail_404_shows_generic_error() {
    let mut dash = dashboard(fake_api()).await;
    dash.mount();
    dash.settle().await;

    dash.directory.set_query("kimi");
    dash.select_visible(0);
    dash.settle().await;

    assert_eq!(dash.profile.status(), ViewStatus::Failed(PROFILE_ERROR));
    assert!(!dash.profile.status().is_ready());
    assert!(dash.profile.detail().is_none());
}

#[tokio::test]
async fn test_fast_reselect_shows_only_latest_driver() {
    let mut dash = dashboard(fake_api()).await;
    dash.mount();
    dash.settle().await;

    // Max's detail takes 300ms, Lando's is immediate
    dash.select_visible(0);
    dash.select_visible(1);
    dash.settle().await;

    assert_eq!(dash.selected().map(|d| d.id.as_str()), Some("4"));
    assert_eq!(dash.profile.stats()[1].value, "9");

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert!(!dash.poll());
    assert_eq!(dash.profile.stats()[1].value, "9");
}

#[tokio::test]
async fn test_schedule_tabs_with_items_envelope() {
    let mut dash = dashboard(fake_api()).await;
    dash.mount();
    dash.settle().await;

    assert_eq!(dash.schedule.cards()[0].name, "Monaco Grand Prix");
    dash.schedule.tabs_mut().set_tab(ScheduleTab::Recent);
    let recent = dash.schedule.cards();
    assert_eq!(recent[0].name, "Spanish Grand Prix");
    assert_eq!(recent[0].result.as_ref().map(|r| r.0.as_str()), Some("Oscar Piastri"));
    assert!(!dash.poll());
}

#[tokio::test]
async fn test_malformed_json_takes_error_path() {
    let router = Router::new()
        .route("/drivers", get(|| async { "<html>maintenance</html>" }))
        .route("/events/upcoming", get(|| async { Json(json!([])) }))
        .route("/events/recent", get(|| async { Json(json!({"unexpected": true})) }));
    let mut dash = dashboard(router).await;
    dash.mount();
    dash.settle().await;

    assert_eq!(dash.directory.status(), ViewStatus::Failed(DRIVERS_ERROR));
    assert_eq!(dash.schedule.status(), ViewStatus::Failed(SCHEDULE_ERROR));
}

#[tokio::test]
async fn test_api_errors_are_typed() {
    let config = spawn_api(fake_api()).await;
    let api = Api::http(&config).unwrap();

    let err = api.driver_detail("99").await.unwrap_err();
    assert_eq!(err.status(), Some(404));

    let unreachable = HubConfig::from_base("http://127.0.0.1:9").unwrap();
    let err = Api::http(&unreachable).unwrap().drivers().await.unwrap_err();
    assert!(matches!(err, FetchError::Network { .. }));
}
