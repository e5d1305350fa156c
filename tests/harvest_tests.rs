//! Integration tests for the harvest flow
//!
//! These tests use wiremock to stand in for both the external
//! spreadsheet-backed service and the seller listing pages, exercising the
//! full resolve → scrape → dispatch cycle end-to-end.

use listing_harvester::config::{Config, OauthConfig, ScrapeConfig, ServiceConfig};
use listing_harvester::harvest::{Coordinator, SheetOutcome};
use wiremock::matchers::{basic_auth, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a config pointing every endpoint at the mock server
fn test_config(server_uri: &str, sheets: Vec<&str>) -> Config {
    Config {
        sheets: sheets.into_iter().map(String::from).collect(),
        service: ServiceConfig {
            read_url: format!("{}/read", server_uri),
            write_url: format!("{}/write", server_uri),
        },
        scrape: ScrapeConfig {
            user_agent: "TestHarvester/1.0".to_string(),
            timeout_secs: 5,
        },
        oauth: None,
    }
}

/// Renders a listing page with `count` complete rows labelled by page
fn listing_page(count: usize, label: &str) -> String {
    let rows: String = (0..count)
        .map(|i| {
            format!(
                r#"<li class="s-item">
                     <div class="s-item__info">
                       <a class="s-item__link" href="/itm/{label}-{i}">
                         <div class="s-item__title">NEW LISTING {label} item {i}</div>
                       </a>
                       <span class="s-item__price">$1{i}.50</span>
                       <span>Oct-14 9:05</span>
                     </div>
                   </li>"#
            )
        })
        .collect();
    format!("<html><body><ul>{}</ul></body></html>", rows)
}

/// Mounts the dedup trigger mock; must be mounted before the plain read
/// mock so the more specific match wins.
async fn mount_dedup(server: &MockServer, sheet: &str, times: u64) {
    Mock::given(method("GET"))
        .and(path("/read"))
        .and(query_param("sheetName", sheet))
        .and(query_param("action", "removeDuplicates"))
        .respond_with(ResponseTemplate::new(200).set_body_string("3 new rows added"))
        .expect(times)
        .mount(server)
        .await;
}

async fn mount_seller_lookup(server: &MockServer, sheet: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path("/read"))
        .and(query_param("sheetName", sheet))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn mount_listing_page(server: &MockServer, seller_path: &str, page: u32, html: String) {
    Mock::given(method("GET"))
        .and(path(seller_path))
        .and(query_param("_sop", "10"))
        .and(query_param("_pgn", page.to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_string(html))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_end_to_end_single_sheet() {
    let server = MockServer::start().await;
    let seller_url = format!("{}/str/seller123", server.uri());

    mount_dedup(&server, "B11", 1).await;
    mount_seller_lookup(&server, "B11", &seller_url).await;

    // Three pages yielding 5, 3, and 0 items
    mount_listing_page(&server, "/str/seller123", 1, listing_page(5, "p1")).await;
    mount_listing_page(&server, "/str/seller123", 2, listing_page(3, "p2")).await;
    mount_listing_page(&server, "/str/seller123", 3, listing_page(0, "p3")).await;

    Mock::given(method("POST"))
        .and(path("/write"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK: 8 rows"))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), vec!["B11"]);
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let summary = coordinator.run().await;

    assert_eq!(summary.reports.len(), 1);
    match &summary.reports[0].outcome {
        SheetOutcome::Delivered {
            rows,
            write_ack,
            dedup_ack,
        } => {
            assert_eq!(*rows, 8);
            assert_eq!(write_ack, "OK: 8 rows");
            assert_eq!(dedup_ack, "3 new rows added");
        }
        other => panic!("Expected Delivered, got {:?}", other),
    }

    // Inspect the write request body: 8 rows of 7 columns, page 1 first
    let requests = server.received_requests().await.expect("recording enabled");
    let write = requests
        .iter()
        .find(|r| r.url.path() == "/write")
        .expect("write request sent");
    let body: serde_json::Value = serde_json::from_slice(&write.body).unwrap();

    assert_eq!(body["sheetName"], "B11");
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 8);
    for row in items {
        let row = row.as_array().unwrap();
        assert_eq!(row.len(), 7);
        assert_eq!(row[3], "");
        assert_eq!(row[4], "");
        assert_eq!(row[5], "");
    }

    // Normalization applied: badge stripped, timestamp reformatted,
    // detail URL absolute
    assert_eq!(items[0][0], "10/14 09:05");
    assert_eq!(items[0][1], "p1 item 0");
    assert_eq!(
        items[0][6],
        format!("{}/itm/p1-0", server.uri())
    );
    // Page 1 rows precede page 2 rows
    assert_eq!(items[5][1], "p2 item 0");
}

#[tokio::test]
async fn test_resolution_failure_skips_sheet_but_run_continues() {
    let server = MockServer::start().await;
    let seller_url = format!("{}/str/good-seller", server.uri());

    mount_dedup(&server, "GOOD", 1).await;
    mount_seller_lookup(&server, "BAD", "Error: sheet not found").await;
    mount_seller_lookup(&server, "GOOD", &seller_url).await;

    mount_listing_page(&server, "/str/good-seller", 1, listing_page(1, "g")).await;
    mount_listing_page(&server, "/str/good-seller", 2, listing_page(0, "g")).await;
    mount_listing_page(&server, "/str/good-seller", 3, listing_page(0, "g")).await;

    // Only the good sheet reaches the write endpoint
    Mock::given(method("POST"))
        .and(path("/write"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), vec!["BAD", "GOOD"]);
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let summary = coordinator.run().await;

    assert_eq!(summary.reports.len(), 2);
    assert!(matches!(
        summary.reports[0].outcome,
        SheetOutcome::ResolutionFailed
    ));
    assert!(summary.reports[1].outcome.is_delivered());
    assert_eq!(summary.delivered(), 1);
    assert_eq!(summary.failed(), 1);
}

#[tokio::test]
async fn test_dedup_fires_even_when_write_rejected() {
    let server = MockServer::start().await;
    let seller_url = format!("{}/str/seller123", server.uri());

    mount_dedup(&server, "B11", 1).await;
    mount_seller_lookup(&server, "B11", &seller_url).await;

    for page in 1..=3 {
        mount_listing_page(&server, "/str/seller123", page, listing_page(1, "x")).await;
    }

    // The write response is not inspected for success
    Mock::given(method("POST"))
        .and(path("/write"))
        .respond_with(ResponseTemplate::new(500).set_body_string("quota exceeded"))
        .expect(1)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), vec!["B11"]);
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let summary = coordinator.run().await;

    match &summary.reports[0].outcome {
        SheetOutcome::Delivered { write_ack, .. } => {
            assert_eq!(write_ack, "quota exceeded");
        }
        other => panic!("Expected Delivered, got {:?}", other),
    }
}

#[tokio::test]
async fn test_scrape_failure_prevents_dispatch() {
    let server = MockServer::start().await;
    let seller_url = format!("{}/str/seller123", server.uri());

    mount_dedup(&server, "B11", 0).await;
    mount_seller_lookup(&server, "B11", &seller_url).await;

    // Listing pages all 404; the fetcher treats that as a navigation error
    Mock::given(method("GET"))
        .and(path("/str/seller123"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/write"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .expect(0)
        .mount(&server)
        .await;

    let config = test_config(&server.uri(), vec!["B11"]);
    let coordinator = Coordinator::new(config).expect("Failed to create coordinator");
    let summary = coordinator.run().await;

    assert!(matches!(
        summary.reports[0].outcome,
        SheetOutcome::ScrapeFailed { .. }
    ));
}

#[tokio::test]
async fn test_exchange_code_returns_tokens() {
    use listing_harvester::auth::exchange_code;

    let server = MockServer::start().await;

    // The matcher also verifies the Basic credentials on the token request
    Mock::given(method("POST"))
        .and(path("/identity/v1/oauth2/token"))
        .and(basic_auth("client-abc", "secret-xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"access_token": "tok-123", "refresh_token": "ref-456", "expires_in": 7200}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let oauth = OauthConfig {
        client_id: "client-abc".to_string(),
        client_secret: "secret-xyz".to_string(),
        redirect_uri: "http://localhost:3000/callback".to_string(),
        authorize_url: format!("{}/oauth2/authorize", server.uri()),
        token_url: format!("{}/identity/v1/oauth2/token", server.uri()),
        scope: "api_scope".to_string(),
    };

    let client = reqwest::Client::new();
    let tokens = exchange_code(&client, &oauth, "auth-code-1").await.unwrap();

    assert_eq!(tokens.access_token, "tok-123");
    assert_eq!(tokens.refresh_token.as_deref(), Some("ref-456"));
    assert_eq!(tokens.expires_in, 7200);

    // The token request body is form-encoded
    let requests = server.received_requests().await.expect("recording enabled");
    let body = String::from_utf8(requests[0].body.clone()).unwrap();
    assert!(body.contains("grant_type=authorization_code"));
    assert!(body.contains("code=auth-code-1"));
}

#[tokio::test]
async fn test_exchange_code_surfaces_provider_error() {
    use listing_harvester::auth::exchange_code;

    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_grant"}"#))
        .mount(&server)
        .await;

    let oauth = OauthConfig {
        client_id: "client-abc".to_string(),
        client_secret: "secret-xyz".to_string(),
        redirect_uri: "http://localhost:3000/callback".to_string(),
        authorize_url: format!("{}/authorize", server.uri()),
        token_url: format!("{}/token", server.uri()),
        scope: "api_scope".to_string(),
    };

    let client = reqwest::Client::new();
    let result = exchange_code(&client, &oauth, "expired-code").await;

    let err = result.unwrap_err();
    assert!(err.to_string().contains("invalid_grant"));
}
