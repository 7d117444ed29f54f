use clap::ArgMatches;
use scrapedesk::command_argument_builder;
use scrapedesk::handlers::*;
use scrapedesk_core::{HttpStore, StoreConfig};
use serde_json::json;
use std::fs;
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, method, path},
};

fn parse(args: &[&str]) -> ArgMatches {
    let mut argv = vec!["scrapedesk"];
    argv.extend_from_slice(args);
    command_argument_builder()
        .try_get_matches_from(argv)
        .unwrap()
}

fn sub(matches: &ArgMatches) -> &ArgMatches {
    matches.subcommand().unwrap().1
}

fn store_for(server: &MockServer) -> HttpStore {
    HttpStore::new(StoreConfig::new(&server.uri()).unwrap()).unwrap()
}

fn records() -> serde_json::Value {
    json!([
        {
            "id": 1,
            "name": "Acme",
            "description": "Anvils",
            "address": "1 Road",
            "phone": "555",
            "email": "a@acme.test",
            "facebook": "https://facebook.com/acme"
        },
        { "id": "2", "name": "Globex" }
    ])
}

async fn mount_list(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/companies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ============================================================================
// Argument Helpers
// ============================================================================

#[test]
fn test_store_config_from_base_url() {
    let matches = parse(&["--base-url", "http://records.test:9000/", "list"]);
    let config = store_config(&matches).unwrap();
    assert_eq!(config.base_url().as_str(), "http://records.test:9000/");
}

#[test]
fn test_store_config_rejects_non_base_url() {
    let matches = parse(&["--base-url", "mailto:admin@records.test", "list"]);
    assert!(store_config(&matches).is_err());
}

#[test]
fn test_export_destination_default() {
    let matches = parse(&["export"]);
    assert_eq!(
        export_destination(sub(&matches)),
        std::path::PathBuf::from("companies.csv")
    );
}

#[test]
fn test_expand_path_tilde() {
    let expanded = expand_path("~/companies.csv");
    assert!(!expanded.to_string_lossy().starts_with('~'));
    assert!(expanded.ends_with("companies.csv"));
}

// ============================================================================
// List / Show
// ============================================================================

#[tokio::test]
async fn test_handle_list_prints_table() {
    let server = MockServer::start().await;
    mount_list(&server, records()).await;
    let store = store_for(&server);

    let matches = parse(&["list"]);
    let mut out = Vec::new();
    handle_list(&store, sub(&matches), &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("COMPANY"));
    assert!(text.contains("Acme"));
    assert!(text.contains("Globex"));
    assert!(text.contains("2 companies"));
}

#[tokio::test]
async fn test_handle_list_json() {
    let server = MockServer::start().await;
    mount_list(&server, records()).await;
    let store = store_for(&server);

    let matches = parse(&["list", "--json"]);
    let mut out = Vec::new();
    handle_list(&store, sub(&matches), &mut out).await.unwrap();

    let parsed: serde_json::Value = serde_json::from_slice(&out).unwrap();
    let items = parsed.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["id"], "1");
    assert_eq!(items[1]["name"], "Globex");
}

#[tokio::test]
async fn test_handle_list_backend_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/companies"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    let store = store_for(&server);

    let matches = parse(&["list"]);
    let mut out = Vec::new();
    let err = handle_list(&store, sub(&matches), &mut out)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("500"));
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_handle_show_renders_detail() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/companies/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1,
            "name": "Acme",
            "website": "acme.test",
            "logo": "static/logos/acme.png"
        })))
        .mount(&server)
        .await;
    let store = store_for(&server);
    let config = store.config().clone();

    let matches = parse(&["show", "1"]);
    let mut out = Vec::new();
    handle_show(&store, &config, sub(&matches), &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.starts_with("Home / Acme"));
    assert!(text.contains("<http://acme.test>"));
    assert!(text.contains(&format!("{}/logos/acme.png", server.uri())));
}

#[tokio::test]
async fn test_handle_show_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/companies/42"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let store = store_for(&server);
    let config = store.config().clone();

    let matches = parse(&["show", "42"]);
    let mut out = Vec::new();
    let err = handle_show(&store, &config, sub(&matches), &mut out)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("42"));
}

// ============================================================================
// Scrape / Delete
// ============================================================================

#[tokio::test]
async fn test_handle_scrape_posts_then_refreshes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/companies/scrape"))
        .and(body_json(json!({ "url": "https://initech.test" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/companies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(records()))
        .expect(1)
        .mount(&server)
        .await;
    let store = store_for(&server);

    let matches = parse(&["scrape", "https://initech.test"]);
    let mut out = Vec::new();
    handle_scrape(&store, sub(&matches), &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Saved details for https://initech.test"));
    assert!(text.contains("2 companies on record"));
}

#[tokio::test]
async fn test_handle_scrape_invalid_url_makes_no_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let store = store_for(&server);

    let matches = parse(&["scrape", "initech.test"]);
    let mut out = Vec::new();
    let err = handle_scrape(&store, sub(&matches), &mut out)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("Please enter a valid URL"));
}

#[tokio::test]
async fn test_handle_scrape_failure_skips_refresh() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/companies/scrape"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/companies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(records()))
        .expect(0)
        .mount(&server)
        .await;
    let store = store_for(&server);

    let matches = parse(&["scrape", "https://initech.test"]);
    let mut out = Vec::new();
    let err = handle_scrape(&store, sub(&matches), &mut out)
        .await
        .unwrap_err();

    assert!(
        err.to_string()
            .contains("Could not save details for https://initech.test")
    );
}

#[tokio::test]
async fn test_handle_delete_reports_remaining() {
    let server = MockServer::start().await;
    for id in ["1", "2"] {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/companies/{}", id)))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
    }
    mount_list(&server, json!([{ "id": 3, "name": "Initech" }])).await;
    let store = store_for(&server);

    let matches = parse(&["delete", "1", "2"]);
    let mut out = Vec::new();
    handle_delete(&store, sub(&matches), &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Deleted 2 of 2 companies"));
    assert!(text.contains("1 companies remain"));
    assert!(!text.contains("failed"));
}

#[tokio::test]
async fn test_handle_delete_partial_failure_still_refreshes() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/companies/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/companies/2"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/companies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 2 }])))
        .expect(1)
        .mount(&server)
        .await;
    let store = store_for(&server);

    let matches = parse(&["delete", "1", "2"]);
    let mut out = Vec::new();
    handle_delete(&store, sub(&matches), &mut out)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Deleted 1 of 2 companies"));
    assert!(text.contains("1 deletes failed"));
    assert!(text.contains("1 companies remain"));
}

// ============================================================================
// Export
// ============================================================================

#[tokio::test]
async fn test_handle_export_to_file() {
    let server = MockServer::start().await;
    mount_list(&server, records()).await;
    let store = store_for(&server);

    let dir = TempDir::new().unwrap();
    let target = dir.path().join("out.csv");
    let matches = parse(&["export", "-o", target.to_str().unwrap()]);
    let mut out = Vec::new();
    handle_export(&store, sub(&matches), &mut out)
        .await
        .unwrap();

    let content = fs::read_to_string(&target).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], "ID,Name,Description,Address,Phone,Email");
    assert_eq!(lines[1], "1,Acme,Anvils,1 Road,555,a@acme.test");
    assert_eq!(lines[2], "2,Globex,,,,");
    assert!(String::from_utf8(out).unwrap().contains("Exported 2 companies"));
}

#[tokio::test]
async fn test_handle_export_stdout() {
    let server = MockServer::start().await;
    mount_list(&server, json!([])).await;
    let store = store_for(&server);

    let matches = parse(&["export", "--stdout"]);
    let mut out = Vec::new();
    handle_export(&store, sub(&matches), &mut out)
        .await
        .unwrap();

    assert_eq!(
        String::from_utf8(out).unwrap(),
        "ID,Name,Description,Address,Phone,Email\n"
    );
}
