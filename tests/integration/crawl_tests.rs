use crawl_studio::client::HttpCrawlService;
use crawl_studio::config::{ConfigurationModel, ServiceConfig};
use crawl_studio::session::{CrawlSession, SessionPhase};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a session talking to the given service base URL
fn create_session(base_url: &str) -> CrawlSession<HttpCrawlService> {
    let service = HttpCrawlService::new(&ServiceConfig {
        base_url: base_url.to_string(),
        request_timeout_secs: None,
    })
    .expect("Failed to build service");
    CrawlSession::new(service, ConfigurationModel::new())
}

fn success_body() -> serde_json::Value {
    json!({
        "success": true,
        "url": "https://example.com",
        "title": "Title",
        "markdown": "# Title",
        "extractedData": {"a": 1},
        "metadata": {"crawlTime": "1.2s", "wordCount": 120, "linkCount": 5, "imageCount": 2}
    })
}

#[tokio::test]
async fn test_successful_crawl() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = create_session(&mock_server.uri());
    let state = session
        .submit("https://example.com")
        .await
        .expect("Submit refused");

    assert_eq!(state.phase, SessionPhase::Succeeded);
    assert_eq!(state.progress, 100);
    assert!(state.error.is_none());

    let result = state.result.expect("Missing result");
    assert_eq!(result.markdown.as_deref(), Some("# Title"));
    assert_eq!(result.extracted_data, Some(json!({"a": 1})));

    let metadata = result.metadata.expect("Missing metadata");
    assert_eq!(metadata.crawl_time, "1.2s");
    assert_eq!(metadata.word_count, 120);
    assert_eq!(metadata.link_count, 5);
    assert_eq!(metadata.image_count, 2);
}

#[tokio::test]
async fn test_request_body_matches_contract() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .and(body_json(json!({
            "url": "https://example.com/docs",
            "config": {
                "headless": true,
                "screenshots": true,
                "extractImages": false,
                "extractLinks": true,
                "waitTime": 5,
                "userAgent": "default",
                "outputFormat": "json"
            },
            "extractionConfig": {
                "useAI": true,
                "schema": "",
                "cssSelector": "article",
                "extractionPrompt": "Summarise the page"
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut session = create_session(&mock_server.uri());
    let config = session.config_mut();
    config.set_screenshots(true);
    config.set_wait_time("5").unwrap();
    config.set_output_format("json".parse().unwrap());
    config.set_use_ai(true);
    config.set_css_selector("article");
    config.set_extraction_prompt("Summarise the page");

    let state = session.submit("https://example.com/docs").await.unwrap();
    assert_eq!(state.phase, SessionPhase::Succeeded);
}

#[tokio::test]
async fn test_server_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = create_session(&mock_server.uri());
    let state = session.submit("https://example.com").await.unwrap();

    assert_eq!(state.phase, SessionPhase::Failed);
    assert_eq!(state.error.as_deref(), Some("HTTP error! status: 500"));
    assert!(state.result.is_none());
    assert!(state.progress <= 90);
}

#[tokio::test]
async fn test_bad_request_with_failure_payload_uses_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({"success": false, "error": "Failed to fetch URL: 404"})),
        )
        .mount(&mock_server)
        .await;

    let session = create_session(&mock_server.uri());
    let state = session.submit("https://example.com/missing").await.unwrap();

    assert_eq!(state.error.as_deref(), Some("HTTP error! status: 400"));
}

#[tokio::test]
async fn test_application_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"success": false, "error": "timeout"})),
        )
        .mount(&mock_server)
        .await;

    let session = create_session(&mock_server.uri());
    let state = session.submit("https://example.com").await.unwrap();

    assert_eq!(state.phase, SessionPhase::Failed);
    assert_eq!(state.error.as_deref(), Some("timeout"));
}

#[tokio::test]
async fn test_application_failure_without_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&mock_server)
        .await;

    let session = create_session(&mock_server.uri());
    let state = session.submit("https://example.com").await.unwrap();

    assert_eq!(state.error.as_deref(), Some("Crawling failed"));
}

#[tokio::test]
async fn test_malformed_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&mock_server)
        .await;

    let session = create_session(&mock_server.uri());
    let state = session.submit("https://example.com").await.unwrap();

    assert_eq!(state.phase, SessionPhase::Failed);
    let error = state.error.expect("Missing error");
    assert!(
        error.starts_with("Failed to crawl the URL: "),
        "unexpected error: {}",
        error
    );
}

#[tokio::test]
async fn test_unreachable_service() {
    // Nothing listens on the discard port
    let session = create_session("http://127.0.0.1:9");
    let state = session.submit("https://example.com").await.unwrap();

    assert_eq!(state.phase, SessionPhase::Failed);
    assert!(state
        .error
        .expect("Missing error")
        .starts_with("Failed to crawl the URL: "));
}

#[tokio::test]
async fn test_empty_url_sends_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(0)
        .mount(&mock_server)
        .await;

    let session = create_session(&mock_server.uri());
    let state = session.submit("  ").await.unwrap();

    assert_eq!(state.phase, SessionPhase::Failed);
    assert_eq!(state.error.as_deref(), Some("Please enter a valid URL"));

    let received = mock_server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_slow_service_shows_progress() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body())
                .set_delay(Duration::from_millis(1_300)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let session = create_session(&mock_server.uri());
    let mut rx = session.subscribe();

    let watcher = tokio::spawn(async move {
        let mut seen = Vec::new();
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            seen.push((state.phase, state.progress));
            if state.phase.is_terminal() {
                break;
            }
        }
        seen
    });

    let state = session.submit("https://example.com").await.unwrap();
    let seen = watcher.await.unwrap();

    assert_eq!(state.phase, SessionPhase::Succeeded);
    let in_flight: Vec<u8> = seen
        .iter()
        .filter(|(phase, _)| *phase == SessionPhase::InFlight)
        .map(|(_, p)| *p)
        .collect();
    assert!(in_flight.windows(2).all(|w| w[0] <= w[1]));
    assert!(in_flight.iter().all(|p| *p <= 90));
    assert!(in_flight.iter().any(|p| *p >= 10), "no progress tick observed");
    assert_eq!(seen.last(), Some(&(SessionPhase::Succeeded, 100)));

    // Nothing moves once the session has settled
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(session.state(), state);
}

#[tokio::test]
async fn test_health_check() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "service": "crawl4ai-backend",
            "version": "1.0.0"
        })))
        .mount(&mock_server)
        .await;

    let service = HttpCrawlService::new(&ServiceConfig {
        base_url: mock_server.uri(),
        request_timeout_secs: Some(5),
    })
    .unwrap();

    let health = service.health_check().await.expect("Health check failed");
    assert!(health.is_healthy());
    assert_eq!(health.service, "crawl4ai-backend");
    assert_eq!(health.version, "1.0.0");
}

#[tokio::test]
async fn test_health_check_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let service = HttpCrawlService::new(&ServiceConfig {
        base_url: mock_server.uri(),
        request_timeout_secs: None,
    })
    .unwrap();

    assert!(service.health_check().await.is_err());
}
