// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot against the
// bundled dataset in data/crops.json.

use std::path::Path;

use serde_json::json;
use serde_json::Value as Json;
use shuttle_axum::axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt as _; // for `oneshot`

use crop_advisor::api::{self, AppState};
use crop_advisor::{AppConfig, CropStore};

const BODY_LIMIT: usize = 1024 * 1024;

fn test_router() -> Router {
    let store = CropStore::load(Path::new("data/crops.json"));
    assert!(!store.is_empty(), "bundled dataset should load");
    api::router(AppState::new(store, AppConfig::default()))
}

fn empty_router() -> Router {
    api::router(AppState::new(CropStore::default(), AppConfig::default()))
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Json) {
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    let v: Json = serde_json::from_slice(&bytes).expect("json body");
    (status, v)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build GET")
}

fn post_chat(payload: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(payload))
        .expect("build POST /api/chat")
}

#[tokio::test]
async fn health_returns_ok() {
    let resp = test_router().oneshot(get("/health")).await.expect("oneshot");
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT).await.expect("body");
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn options_month_follows_calendar_cycle() {
    let (status, v) = send(test_router(), get("/api/options?type=MONTH")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], "success");

    let months: Vec<String> = serde_json::from_value(v["options"].clone()).expect("array");
    assert_eq!(months.len(), 12);
    assert_eq!(months[0], "Chithirai(Mid April-Mid May)");
    assert_eq!(months[11], "Panguni(Mid March-Mid April)");
}

#[tokio::test]
async fn options_land_type_sorted() {
    let (status, v) = send(test_router(), get("/api/options?type=LAND%20TYPE")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["options"], json!(["Dry Land", "Wet Land"]));
}

#[tokio::test]
async fn options_unknown_type_is_400() {
    let (status, v) = send(test_router(), get("/api/options?type=COLOR")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["status"], "error");
    assert_eq!(v["message"], "Invalid option type: COLOR");

    let (status, _) = send(test_router(), get("/api/options")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn chat_recommends_with_land_size_and_season() {
    let payload = json!({ "message": "What can I grow in summer on 2 acres of land?" });
    let (status, v) = send(test_router(), post_chat(payload.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], "success");

    let text = v["response"].as_str().expect("response string");
    assert!(text.starts_with("Based on your criteria, here are 3 crop recommendations:"), "{text}");
    assert!(text.contains("🌾 **Groundnut**"));
    assert!(text.contains("   - Expected Yield: 10.87 tons/year\n"), "{text}");
    assert!(!text.contains("acres"));
    assert!(!text.contains("more recommendations"));
}

#[tokio::test]
async fn chat_structured_filters_override_text() {
    let payload = json!({
        "message": "summer crops please",
        "filters": { "soil": "Clay Soil", "land_type": "Wet Land", "season": "Winter", "month": "" }
    });
    let (_, v) = send(test_router(), post_chat(payload.to_string())).await;
    let text = v["response"].as_str().expect("response string");
    assert!(text.starts_with("Based on your criteria, here are 1 crop recommendations:"), "{text}");
    assert!(text.contains("Karthigai(Mid November-Mid December)"));
}

#[tokio::test]
async fn chat_form_with_blank_dropdowns_matches_every_land_type() {
    let payload = json!({
        "message": "Please recommend crops based on the selected filters",
        "filters": {
            "soil": "", "month": "", "season": "", "land_type": "",
            "land_size": 1.0, "climate_condition": ""
        }
    });
    let (status, v) = send(test_router(), post_chat(payload.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    let text = v["response"].as_str().expect("response string");
    assert!(text.starts_with("Based on your criteria, here are 22 crop recommendations:"), "{text}");
    assert!(text.ends_with("There are 17 more recommendations matching your criteria."));
}

#[tokio::test]
async fn chat_land_size_in_message_beats_form_value() {
    let in_text = json!({
        "message": "What can I grow in summer on 2 acres of land?",
        "filters": { "land_size": 1.0 }
    });
    let (_, v) = send(test_router(), post_chat(in_text.to_string())).await;
    let text = v["response"].as_str().expect("response string");
    assert!(text.contains("Expected Yield: 10.87 tons/year"), "{text}");

    let form_only = json!({
        "message": "What can I grow in summer?",
        "filters": { "land_size": 2.0 }
    });
    let (_, v) = send(test_router(), post_chat(form_only.to_string())).await;
    let text = v["response"].as_str().expect("response string");
    assert!(text.contains("Expected Yield: 10.87 tons/year"), "{text}");
}

#[tokio::test]
async fn chat_climate_answer_ignores_season_words() {
    let plain = json!({ "message": "drought remedy" });
    let (_, plain) = send(test_router(), post_chat(plain.to_string())).await;
    let seasonal = json!({ "message": "summer drought remedy", "filters": { "month": "Thai(Mid January-Mid February)" } });
    let (_, seasonal) = send(test_router(), post_chat(seasonal.to_string())).await;
    assert_eq!(plain["response"], seasonal["response"]);
}

#[tokio::test]
async fn chat_routes_climate_questions() {
    let payload = json!({ "message": "How do I handle drought?" });
    let (_, v) = send(test_router(), post_chat(payload.to_string())).await;
    let text = v["response"].as_str().expect("response string");
    assert!(text.starts_with("Remedial measures for drought conditions:"), "{text}");
    assert!(text.contains("1. Sow short-duration varieties."));
    assert!(text.contains("7. Irrigate at pegging and pod formation."));
    assert!(!text.contains("8. "));

    let payload = json!({ "message": "any remedy for flood damage?" });
    let (_, v) = send(test_router(), post_chat(payload.to_string())).await;
    let text = v["response"].as_str().expect("response string");
    assert!(text.starts_with("Remedial measures for flood conditions:"), "{text}");
}

#[tokio::test]
async fn chat_climate_without_matches_uses_dataset_sample() {
    let payload = json!({ "message": "drought tips", "filters": { "soil": "Laterite" } });
    let (_, v) = send(test_router(), post_chat(payload.to_string())).await;
    let text = v["response"].as_str().expect("response string");
    assert!(
        text.starts_with("Here are general remedial measures for drought conditions:"),
        "{text}"
    );
    assert!(text.contains(
        "1. Sow short-duration varieties. Apply mulch between rows. Give protective irrigation at flowering."
    ));
}

#[tokio::test]
async fn chat_climate_condition_filter_uses_catalog() {
    let payload = json!({ "message": "climate help", "filters": { "climate_condition": "Frost" } });
    let (_, v) = send(test_router(), post_chat(payload.to_string())).await;
    let text = v["response"].as_str().expect("response string");
    assert!(text.starts_with("Remedial measures for Frost:"), "{text}");
    assert!(text.contains("• "));
}

#[tokio::test]
async fn chat_malformed_body_falls_back_to_defaults() {
    let (status, v) = send(test_router(), post_chat("{not json".to_string())).await;
    assert_eq!(status, StatusCode::OK);
    let text = v["response"].as_str().expect("response string");
    assert!(text.starts_with("Based on your criteria, here are 11 crop recommendations:"), "{text}");
    assert!(text.ends_with("There are 6 more recommendations matching your criteria."));
}

#[tokio::test]
async fn chat_on_empty_dataset_reports_no_matches() {
    let payload = json!({ "message": "what grows in winter" });
    let (status, v) = send(empty_router(), post_chat(payload.to_string())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        v["response"],
        "I couldn't find any crop recommendations matching your criteria. Please try with different parameters."
    );
}

#[tokio::test]
async fn recommendations_chart_is_sorted_and_normalized() {
    let (status, v) = send(
        test_router(),
        get("/api/recommendations?soil=Red%20Soil&land_type=Dry%20Land&land_size=3"),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], "success");
    assert_eq!(
        v["data"]["labels"],
        json!(["Tapioca", "Groundnut", "Ragi", "Cumbu", "Green Gram"])
    );
    let values: Vec<f64> = serde_json::from_value(v["data"]["values"].clone()).expect("values");
    assert_eq!(values[0], 100.0);
    assert!(values.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn recommendations_bad_land_size_uses_default() {
    let (status, v) = send(test_router(), get("/api/recommendations?land_size=abc")).await;
    assert_eq!(status, StatusCode::OK);
    let labels = v["data"]["labels"].as_array().expect("labels");
    assert_eq!(labels.len(), 8);
}

#[tokio::test]
async fn recommendations_empty_gives_placeholder() {
    let (_, v) = send(test_router(), get("/api/recommendations?soil=Laterite")).await;
    assert_eq!(v["data"], json!({ "labels": ["No matching crops"], "values": [0.0] }));
}
