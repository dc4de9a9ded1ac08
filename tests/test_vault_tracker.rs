//! Settings vault and tracker tests against a mocked spreadsheet service.

mod common;

use std::collections::HashMap;

use chrono::NaiveDate;
use common::{client, client_with_rank, serp_data_settings, TOKEN};
use searchdash::models::{QueryPageRow, Region, TrackerRequest};
use searchdash::tracker::{build_rows, dedup_key};
use searchdash::vault::{latest_values, parse_entries, spreadsheet_name};
use searchdash::DashboardError;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn strings(row: &[&str]) -> Vec<String> {
    row.iter().map(|s| s.to_string()).collect()
}

fn tracker_request() -> TrackerRequest {
    TrackerRequest {
        site_url: "https://example.com/".into(),
        start_date: "2024-01-01".into(),
        end_date: "2024-01-31".into(),
        keywords: vec![" Drain ".into(), "plumb".into()],
        location: Some(Region {
            country: "US".into(),
            state: Some("Texas".into()),
        }),
        top_n: None,
    }
}

async fn mount_existing_spreadsheet(server: &MockServer, id: &str) {
    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "files": [{ "id": id }] })))
        .mount(server)
        .await;
}

async fn mount_append(server: &MockServer, id: &str, updated_rows: usize) {
    Mock::given(method("POST"))
        .and(path_regex(format!(r"^/sheets/v4/spreadsheets/{id}/values/.+:append$")))
        .and(query_param("valueInputOption", "RAW"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "updates": { "updatedRows": updated_rows }
        })))
        .mount(server)
        .await;
}

/// JSON bodies of every append call received so far.
async fn appended_bodies(server: &MockServer) -> Vec<Value> {
    server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .filter(|r| r.url.path().ends_with(":append"))
        .map(|r| serde_json::from_slice(&r.body).unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// Vault helpers
// ---------------------------------------------------------------------------

#[test]
fn spreadsheet_name_uses_lowercased_email() {
    assert_eq!(spreadsheet_name(" Owner@Example.com "), "searchdash - owner@example.com");
}

#[test]
fn later_entries_win() {
    let rows = vec![
        strings(&["key", "value", "timestamp"]),
        strings(&["theme", "dark", "t1"]),
        strings(&["", "ignored", "t2"]),
        strings(&["site", "https://example.com/"]),
        strings(&["theme", "light", "t3"]),
    ];
    let entries = parse_entries(&rows);
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1].timestamp, "");

    let values = latest_values(&entries);
    assert_eq!(values.len(), 2);
    assert_eq!(values["theme"], "light");
    assert_eq!(values["site"], "https://example.com/");
}

#[test]
fn a_setting_named_key_survives_load() {
    let rows = vec![
        strings(&["key", "value", "timestamp"]),
        strings(&["key", "secret", "2024-01-01T00:00:00Z"]),
    ];
    let values = latest_values(&parse_entries(&rows));
    assert_eq!(values.get("key").map(String::as_str), Some("secret"));
}

#[test]
fn rows_without_a_header_are_all_entries() {
    let rows = vec![strings(&["theme", "dark", "t1"])];
    assert_eq!(parse_entries(&rows).len(), 1);
    assert!(parse_entries(&[]).is_empty());
}

// ---------------------------------------------------------------------------
// Vault against the mock
// ---------------------------------------------------------------------------

#[tokio::test]
async fn open_finds_existing_spreadsheet() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .and(query_param(
            "q",
            "name = 'searchdash - owner@example.com' and mimeType = 'application/vnd.google-apps.spreadsheet' and trashed = false",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "files": [{ "id": "sheet-1" }] })))
        .expect(1)
        .mount(&server)
        .await;

    let id = client(&server).vault(TOKEN).open("Owner@example.com").await.unwrap();
    assert_eq!(id, "sheet-1");
}

#[tokio::test]
async fn open_creates_spreadsheet_with_header_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "files": [] })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/sheets/v4/spreadsheets"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "spreadsheetId": "new-1" })))
        .expect(1)
        .mount(&server)
        .await;
    mount_append(&server, "new-1", 1).await;

    let id = client(&server).vault(TOKEN).open("owner@example.com").await.unwrap();
    assert_eq!(id, "new-1");

    let bodies = appended_bodies(&server).await;
    assert_eq!(bodies.len(), 2);
    assert_eq!(bodies[0]["values"][0], json!(["key", "value", "timestamp"]));
    assert_eq!(bodies[1]["values"][0][0], "runDate");
    assert_eq!(bodies[1]["values"][0][9], "dedupKey");
}

#[tokio::test]
async fn open_without_email_requires_auth() {
    let server = MockServer::start().await;
    let err = client(&server).vault(TOKEN).open("  ").await.unwrap_err();
    assert!(matches!(err, DashboardError::AuthRequired));
}

#[tokio::test]
async fn load_resolves_latest_values_and_filters_keys() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/sheets/v4/spreadsheets/sheet-1/values/Vault"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "values": [
                ["key", "value", "timestamp"],
                ["theme", "dark", "2024-01-01T00:00:00.000Z"],
                ["site", "https://example.com/", "2024-01-01T00:00:01.000Z"],
                ["theme", "light", "2024-01-02T00:00:00.000Z"]
            ]
        })))
        .mount(&server)
        .await;

    let client = client(&server);
    let vault = client.vault(TOKEN);
    let all = vault.load("sheet-1", None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all["theme"], "light");

    let keys = vec!["site".to_string(), "missing".to_string()];
    let some = vault.load("sheet-1", Some(keys.as_slice())).await.unwrap();
    assert_eq!(some.len(), 1);
    assert!(some.contains_key("site"));
}

#[tokio::test]
async fn save_appends_one_row() {
    let server = MockServer::start().await;
    mount_append(&server, "sheet-1", 1).await;

    let entry = client(&server)
        .vault(TOKEN)
        .save("sheet-1", " theme ", "dark")
        .await
        .unwrap();
    assert_eq!(entry.key, "theme");
    assert!(entry.timestamp.ends_with('Z'));

    let bodies = appended_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    let row = &bodies[0]["values"][0];
    assert_eq!(row[0], "theme");
    assert_eq!(row[1], "dark");
    assert_eq!(row[2], entry.timestamp.as_str());
}

#[tokio::test]
async fn save_requires_a_key() {
    let server = MockServer::start().await;
    let err = client(&server).vault(TOKEN).save("sheet-1", "", "x").await.unwrap_err();
    assert!(err.to_string().contains("key"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Tracker helpers
// ---------------------------------------------------------------------------

#[test]
fn dedup_key_is_stable_across_keyword_order_and_case() {
    let req = tracker_request();
    assert_eq!(
        dedup_key(&req),
        "https://example.com/|2024-01-01|2024-01-31|drain;plumb|Texas, US|10"
    );

    let mut reordered = tracker_request();
    reordered.keywords = vec!["PLUMB".into(), "drain".into()];
    assert_eq!(dedup_key(&reordered), dedup_key(&req));

    let mut deeper = tracker_request();
    deeper.top_n = Some(20);
    assert_ne!(dedup_key(&deeper), dedup_key(&req));
}

#[test]
fn validate_names_missing_fields_and_parses_range() {
    let err = TrackerRequest::default().validate().unwrap_err();
    assert!(err.to_string().contains("siteUrl, startDate, endDate"));

    let range = tracker_request().validate().unwrap();
    assert_eq!(range.start_date, "2024-01-01");
    assert_eq!(range.end_date, "2024-01-31");

    let mut inverted = tracker_request();
    inverted.start_date = "2024-02-01".into();
    assert!(matches!(inverted.validate(), Err(DashboardError::InvalidArgument(_))));
}

#[test]
fn build_rows_attaches_run_metadata() {
    let req = tracker_request();
    let rows = vec![QueryPageRow {
        query: "drain cleaning".into(),
        page: "https://example.com/drains".into(),
        clicks: 3,
        impressions: 50,
        ctr: 0.06,
        position: 4.25,
    }];
    let serp_top = HashMap::from([("drain cleaning".to_string(), "https://rival.example/".to_string())]);
    let run_date = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();

    let built = build_rows(&req, run_date, &rows, &serp_top);
    assert_eq!(built.len(), 1);
    let row = &built[0];
    assert_eq!(row.run_date, "2024-02-01");
    assert_eq!(row.location, "Texas, US");
    assert_eq!(row.serp_top_url, "https://rival.example/");
    assert_eq!(row.dedup_key, dedup_key(&req));
    assert_eq!(row.to_row()[4], "4.25");
}

// ---------------------------------------------------------------------------
// Tracker runs
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_queries_each_filter_and_appends() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"/searchAnalytics/query$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rows": [
                { "keys": ["drain cleaning", "https://example.com/drains"], "clicks": 3.0, "impressions": 50.0, "ctr": 0.06, "position": 4.0 }
            ]
        })))
        .expect(2)
        .mount(&server)
        .await;
    mount_append(&server, "sheet-1", 2).await;

    let summary = client(&server)
        .tracker(TOKEN)
        .run("sheet-1", &tracker_request())
        .await
        .unwrap();
    assert_eq!(summary.appended, 2);
    assert_eq!(summary.message, "Appended 2 row(s) to Tracker");

    let bodies = appended_bodies(&server).await;
    let values = bodies[0]["values"].as_array().unwrap();
    assert_eq!(values.len(), 2);
    // No rank backend configured: top URL left blank.
    assert_eq!(values[0][8], "");
    assert_eq!(values[0][7], "Texas, US");
}

#[tokio::test]
async fn run_looks_up_top_urls_when_a_backend_is_configured() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"/searchAnalytics/query$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rows": [
                { "keys": ["drain cleaning", "https://example.com/drains"], "clicks": 3.0, "impressions": 50.0, "ctr": 0.06, "position": 4.0 }
            ]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/search.json"))
        .and(query_param("q", "drain cleaning"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "organic_results": [{ "position": 1, "link": "https://rival.example/", "title": "Rival" }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    mount_append(&server, "sheet-1", 2).await;

    let client = client_with_rank(&server, serp_data_settings());
    client.tracker(TOKEN).run("sheet-1", &tracker_request()).await.unwrap();

    let bodies = appended_bodies(&server).await;
    assert_eq!(bodies[0]["values"][0][8], "https://rival.example/");
}

#[tokio::test]
async fn run_names_missing_fields() {
    let server = MockServer::start().await;
    let err = client(&server)
        .tracker(TOKEN)
        .run("sheet-1", &TrackerRequest::default())
        .await
        .unwrap_err();
    match err {
        DashboardError::MissingFields(fields) => {
            assert_eq!(fields, ["siteUrl", "startDate", "endDate"]);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn run_with_no_rows_appends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"/searchAnalytics/query$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let mut req = tracker_request();
    req.keywords.clear();
    let summary = client(&server).tracker(TOKEN).run("sheet-1", &req).await.unwrap();
    assert_eq!(summary.appended, 0);
    assert!(appended_bodies(&server).await.is_empty());
}

#[tokio::test]
async fn blank_keywords_fall_back_to_one_unfiltered_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"/searchAnalytics/query$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rows": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let mut req = tracker_request();
    req.keywords = vec!["  ".into(), String::new()];
    client(&server).tracker(TOKEN).run("sheet-1", &req).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let filters = body["dimensionFilterGroups"][0]["filters"].as_array().unwrap();
    assert!(filters.iter().all(|f| f["dimension"] != "query"));
}

#[tokio::test]
async fn provider_without_key_leaves_top_url_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path_regex(r"/searchAnalytics/query$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "rows": [
                { "keys": ["drain cleaning", "https://example.com/drains"], "clicks": 3.0, "impressions": 50.0, "ctr": 0.06, "position": 4.0 }
            ]
        })))
        .mount(&server)
        .await;
    mount_append(&server, "sheet-1", 1).await;

    let mut settings = serp_data_settings();
    settings.serp_api_key = None;
    let client = client_with_rank(&server, settings);
    let mut req = tracker_request();
    req.keywords.clear();
    client.tracker(TOKEN).run("sheet-1", &req).await.unwrap();

    let bodies = appended_bodies(&server).await;
    assert_eq!(bodies[0]["values"][0][8], "");
    let searched = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .any(|r| r.url.path() == "/search.json");
    assert!(!searched);
}
