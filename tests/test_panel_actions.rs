//! Integration tests for the HTTP action pipeline
//!
//! Drives the panel router directly with an in-memory store and a
//! recording service controller, covering the accept/ignore policy per
//! action and the restart trigger.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use chrono::Utc;
use tower::ServiceExt;

use wifid_panel::logging::PanelLogger;
use wifid_panel::models::{PowerMode, WifiConfig};
use wifid_panel::panel::{router, AppState};
use wifid_panel::service::RecordingController;
use wifid_panel::store::{ConfigStore, MemoryStore};

fn panel_state() -> (Arc<AppState>, Arc<MemoryStore>, Arc<RecordingController>) {
    let store = Arc::new(MemoryStore::default());
    let controller = Arc::new(RecordingController::default());
    let state = Arc::new(AppState {
        store: store.clone(),
        controller: controller.clone(),
        logger: PanelLogger::new("wifi_daemon"),
    });
    (state, store, controller)
}

async fn get_page(state: Arc<AppState>) -> (StatusCode, String) {
    let response = router(state)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

async fn post_form(state: Arc<AppState>, form_body: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form_body.to_string()))
        .unwrap();

    let response = router(state).oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn get_renders_current_configuration() {
    let (state, store, controller) = panel_state();
    let mut config = WifiConfig::default();
    config.ssid = "rooftop".to_string();
    store.save(&config).unwrap();

    let (status, body) = get_page(state).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("WiFi Daemon Control Panel"));
    assert!(body.contains("rooftop"));
    // Reads never touch the daemon
    assert_eq!(controller.restarts(), 0);
}

#[tokio::test]
async fn power_mode_update_persists_and_restarts() {
    let (state, store, controller) = panel_state();

    let (status, body) = post_form(state, "action=update_power_mode&power_mode=eco").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Power mode updated successfully"));
    assert_eq!(store.load().power_mode, PowerMode::Eco);
    assert_eq!(controller.restarts(), 1);
}

#[tokio::test]
async fn invalid_power_mode_is_a_silent_noop() {
    let (state, store, controller) = panel_state();

    let (status, body) = post_form(state, "action=update_power_mode&power_mode=turbo").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains("updated successfully"));
    assert!(!body.contains("Failed to save"));
    assert_eq!(store.load(), WifiConfig::default());
    assert_eq!(controller.restarts(), 0);
}

#[tokio::test]
async fn disable_daemon_sets_expiry_from_request_time() {
    let (state, store, controller) = panel_state();

    let before = Utc::now().timestamp();
    let (_, body) = post_form(state, "action=disable_daemon&disable_duration=45").await;
    let after = Utc::now().timestamp();

    assert!(body.contains("Daemon disabled for 45 minutes"));
    let config = store.load();
    assert_eq!(config.disable_duration, 45);
    assert!(config.disable_until >= before + 2700);
    assert!(config.disable_until <= after + 2700);
    assert_eq!(controller.restarts(), 1);
}

#[tokio::test]
async fn non_positive_disable_duration_is_ignored() {
    let (state, store, controller) = panel_state();

    for duration in ["0", "-5"] {
        let body = format!("action=disable_daemon&disable_duration={}", duration);
        let (status, page) = post_form(state.clone(), &body).await;
        assert_eq!(status, StatusCode::OK);
        assert!(!page.contains("Daemon disabled"));
    }

    assert_eq!(store.load(), WifiConfig::default());
    assert_eq!(controller.restarts(), 0);
}

#[tokio::test]
async fn schedule_update_rebuilds_active_days() {
    let (state, store, _) = panel_state();

    let form = "action=update_schedule&start_hour=8&end_hour=18\
                &day_1=on&day_2=on&day_3=on&day_4=on&day_5=on";
    let (_, body) = post_form(state, form).await;

    assert!(body.contains("Schedule updated successfully"));
    let config = store.load();
    assert_eq!(config.start_hour, 8);
    assert_eq!(config.end_hour, 18);
    assert_eq!(config.active_days, [0, 1, 1, 1, 1, 1, 0]);
}

#[tokio::test]
async fn network_update_accepts_all_fields_verbatim() {
    let (state, store, _) = panel_state();

    let form = "action=update_network&ssid=attic&password=&static_ip=10.0.0.5\
                &gateway=10.0.0.1&dns=1.1.1.1";
    let (_, body) = post_form(state, form).await;

    assert!(body.contains("Network settings updated successfully"));
    let config = store.load();
    assert_eq!(config.ssid, "attic");
    assert_eq!(config.password, "");
    assert_eq!(config.static_ip, "10.0.0.5");
    assert_eq!(config.gateway, "10.0.0.1");
    assert_eq!(config.dns, "1.1.1.1");
}

#[tokio::test]
async fn system_update_coerces_integers() {
    let (state, store, _) = panel_state();

    let form = "action=update_system&check_interval=60&min_battery=junk&max_temp=90000";
    let (_, body) = post_form(state, form).await;

    assert!(body.contains("System settings updated successfully"));
    let config = store.load();
    assert_eq!(config.check_interval, 60);
    assert_eq!(config.min_battery, 0);
    assert_eq!(config.max_temp, 90000);
}

#[tokio::test]
async fn unknown_action_renders_without_mutation_or_message() {
    let (state, store, controller) = panel_state();

    let (status, body) = post_form(state, "action=factory_reset").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Current Status"));
    assert!(!body.contains("successfully"));
    assert_eq!(store.load(), WifiConfig::default());
    assert_eq!(controller.restarts(), 0);
}

#[tokio::test]
async fn persist_failure_shows_error_and_skips_restart() {
    let (state, store, controller) = panel_state();
    store.set_fail_saves(true);

    let (status, body) = post_form(state, "action=update_power_mode&power_mode=eco").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Failed to save configuration"));
    // The page still reflects the requested change even though it was not saved
    assert!(body.contains("<option value=\"eco\" selected>"));
    assert_eq!(controller.restarts(), 0);

    store.set_fail_saves(false);
    assert_eq!(store.load(), WifiConfig::default());
}
