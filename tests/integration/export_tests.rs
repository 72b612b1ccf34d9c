use crawl_studio::client::{CrawlResult, HttpCrawlService};
use crawl_studio::config::{ConfigurationModel, ServiceConfig};
use crawl_studio::export::{export, save_artifact, ExportFormat};
use crawl_studio::session::CrawlSession;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[test]
fn test_json_export_of_extracted_data() {
    let result = CrawlResult {
        extracted_data: Some(json!({"x": [1, 2]})),
        ..Default::default()
    };

    let artifact = export(Some(&result), ExportFormat::Json)
        .expect("Export failed")
        .expect("Nothing exported");

    assert_eq!(artifact.bytes, b"{\n  \"x\": [\n    1,\n    2\n  ]\n}".to_vec());
    assert_eq!(artifact.filename, "crawl-results.json");
    assert_eq!(artifact.mime_type, "text/plain");
}

#[tokio::test]
async fn test_export_after_crawl() {
    let mock_server = MockServer::start().await;
    let markdown = "# Example Domain\\n\\nThis domain is for use in examples.\n\n## Links\n\n- [More](https://www.iana.org/domains/example)\n";
    let extracted = json!({
        "title": "Example Domain",
        "description": "",
        "links": ["https://www.iana.org/domains/example"],
        "images": []
    });

    Mock::given(method("POST"))
        .and(path("/api/crawl"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "markdown": markdown,
            "extractedData": extracted,
            "metadata": {"crawlTime": "0.3s", "wordCount": 17, "linkCount": 1, "imageCount": 0}
        })))
        .mount(&mock_server)
        .await;

    let service = HttpCrawlService::new(&ServiceConfig {
        base_url: mock_server.uri(),
        request_timeout_secs: None,
    })
    .unwrap();
    let session = CrawlSession::new(service, ConfigurationModel::new());
    session.submit("https://example.com").await.unwrap();

    let dir = TempDir::new().unwrap();

    let md = session.export(ExportFormat::Markdown).unwrap().unwrap();
    let md_path = save_artifact(&md, dir.path()).unwrap();
    assert_eq!(std::fs::read(&md_path).unwrap(), markdown.as_bytes());

    let data = session.export(ExportFormat::Json).unwrap().unwrap();
    let json_path = save_artifact(&data, dir.path()).unwrap();
    let written = std::fs::read_to_string(&json_path).unwrap();
    assert_eq!(written, serde_json::to_string_pretty(&extracted).unwrap());
    assert!(written.contains("\n  \"links\": [\n    \"https://www.iana.org/domains/example\"\n  ]"));
}

#[tokio::test]
async fn test_failed_crawl_has_nothing_to_export() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&mock_server)
        .await;

    let service = HttpCrawlService::new(&ServiceConfig {
        base_url: mock_server.uri(),
        request_timeout_secs: None,
    })
    .unwrap();
    let session = CrawlSession::new(service, ConfigurationModel::new());
    session.submit("https://example.com").await.unwrap();

    assert!(session.export(ExportFormat::Markdown).unwrap().is_none());
    assert!(session.export(ExportFormat::Json).unwrap().is_none());
}
