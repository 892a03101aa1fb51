//! Integration tests for the scrape pipeline
//!
//! These tests use wiremock to stand in for the storefront and run the full
//! chart → details → report cycle end-to-end.

use playstore_top_apps::config::{
    Config, DetailFailurePolicy, HttpConfig, OutputConfig, RunConfig, SourceConfig,
};
use playstore_top_apps::output::{header_line, LINE_SEPARATOR};
use playstore_top_apps::scrape::{run_scrape, AppDetails, Coordinator, KeyMode};
use playstore_top_apps::ScrapeError;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a test configuration pointing at the mock server
fn create_test_config(origin: &str, report_path: &Path, policy: DetailFailurePolicy) -> Config {
    Config {
        source: SourceConfig {
            origin: origin.to_string(),
            chart_path: "/store/apps/top".to_string(),
        },
        http: HttpConfig {
            user_agent: "TestBot/1.0".to_string(),
            timeout_secs: 5,
            connect_timeout_secs: 5,
        },
        output: OutputConfig {
            path: Some(report_path.to_path_buf()),
        },
        run: RunConfig {
            on_detail_failure: policy,
            key_by: KeyMode::Name,
        },
        ..Config::default()
    }
}

fn report_path(dir: &TempDir) -> PathBuf {
    dir.path().join("playstore-top-app-details.tsv")
}

fn chart_page(apps: &[(&str, &str)]) -> String {
    let cards: String = apps
        .iter()
        .map(|(name, link)| {
            format!(
                r#"<div class="b8cIId ReQCgd Q9MA7b">
                    <a href="{link}"><div class="WsMG1c nnK0zc" title="{name}">{name}</div></a>
                </div>"#
            )
        })
        .collect();
    format!("<html><head><title>Top charts</title></head><body>{cards}</body></html>")
}

fn detail_page(reviews: &str, updated: &str) -> String {
    format!(
        r#"<html><body>
            <span class="AYi5wd TBRnV"><span aria-label="reviews">{reviews}</span></span>
            <div class="hAyfc"><div class="BgcNfc">Size</div>
                <span class="htlgb"><div class="IQ1z0d"><span class="htlgb">Varies with device</span></div></span>
            </div>
            <div class="hAyfc"><div class="BgcNfc">Updated</div>
                <span class="htlgb"><div class="IQ1z0d"><span class="htlgb">{updated}</span></div></span>
            </div>
        </body></html>"#
    )
}

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html; charset=utf-8")
}

async fn mount_chart(server: &MockServer, apps: &[(&str, &str)]) {
    Mock::given(method("GET"))
        .and(path("/store/apps/top"))
        .respond_with(html(chart_page(apps)))
        .mount(server)
        .await;
}

async fn mount_detail(server: &MockServer, id: &str, template: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/store/apps/details"))
        .and(query_param("id", id))
        .respond_with(template)
        .mount(server)
        .await;
}

fn expected_report(rows: &[&str]) -> String {
    let mut expected = header_line();
    for row in rows {
        expected.push_str(row);
        expected.push_str(LINE_SEPARATOR);
    }
    expected
}

#[tokio::test]
async fn test_full_scrape_writes_report() {
    let server = MockServer::start().await;
    mount_chart(
        &server,
        &[
            ("App A", "/store/apps/details?id=a"),
            ("App B", "/store/apps/details?id=b"),
        ],
    )
    .await;
    mount_detail(&server, "a", html(detail_page("120,345", "Jan 1, 2024"))).await;
    mount_detail(&server, "b", html(detail_page("5,002", "Feb 2, 2024"))).await;

    let dir = TempDir::new().unwrap();
    let report = report_path(&dir);
    let config = create_test_config(&server.uri(), &report, DetailFailurePolicy::Skip);

    let summary = run_scrape(config).await.expect("Scrape failed");

    assert_eq!(summary.apps_listed, 2);
    assert_eq!(summary.rows_written, 2);
    assert!(summary.is_complete());
    assert!(summary.finished_at.is_some());

    let content = std::fs::read_to_string(&report).unwrap();
    assert_eq!(
        content,
        expected_report(&["App A\t120,345\tJan 1, 2024", "App B\t5,002\tFeb 2, 2024"])
    );
}

#[tokio::test]
async fn test_previous_report_is_replaced() {
    let server = MockServer::start().await;
    mount_chart(&server, &[("App A", "/store/apps/details?id=a")]).await;
    mount_detail(&server, "a", html(detail_page("1", "Jan 1, 2024"))).await;

    let dir = TempDir::new().unwrap();
    let report = report_path(&dir);
    std::fs::write(&report, "old\trow\nolder\trow\n").unwrap();

    let config = create_test_config(&server.uri(), &report, DetailFailurePolicy::Skip);
    run_scrape(config).await.expect("Scrape failed");

    let content = std::fs::read_to_string(&report).unwrap();
    assert_eq!(content, expected_report(&["App A\t1\tJan 1, 2024"]));
}

#[tokio::test]
async fn test_skip_policy_continues_past_broken_detail_page() {
    let server = MockServer::start().await;
    mount_chart(
        &server,
        &[
            ("App A", "/store/apps/details?id=a"),
            ("App B", "/store/apps/details?id=b"),
            ("App C", "/store/apps/details?id=c"),
        ],
    )
    .await;
    mount_detail(&server, "a", html(detail_page("10", "Jan 1, 2024"))).await;
    mount_detail(
        &server,
        "b",
        html("<html><body><p>Page redesigned</p></body></html>".to_string()),
    )
    .await;
    mount_detail(&server, "c", html(detail_page("30", "Mar 3, 2024"))).await;

    let dir = TempDir::new().unwrap();
    let report = report_path(&dir);
    let config = create_test_config(&server.uri(), &report, DetailFailurePolicy::Skip);

    let summary = run_scrape(config).await.expect("Scrape failed");

    assert_eq!(summary.apps_listed, 3);
    assert_eq!(summary.rows_written, 2);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].name, "App B");
    assert!(!summary.is_complete());

    let content = std::fs::read_to_string(&report).unwrap();
    assert_eq!(
        content,
        expected_report(&["App A\t10\tJan 1, 2024", "App C\t30\tMar 3, 2024"])
    );
}

#[tokio::test]
async fn test_abort_policy_keeps_written_prefix() {
    let server = MockServer::start().await;
    mount_chart(
        &server,
        &[
            ("App A", "/store/apps/details?id=a"),
            ("App B", "/store/apps/details?id=b"),
            ("App C", "/store/apps/details?id=c"),
        ],
    )
    .await;
    mount_detail(&server, "a", html(detail_page("10", "Jan 1, 2024"))).await;
    // Review count present, but no "Updated" row
    mount_detail(
        &server,
        "b",
        html(
            r#"<html><body><span class="AYi5wd TBRnV"><span>20</span></span>
               <div class="hAyfc">Installs <span class="htlgb"><span class="htlgb">100+</span></span></div>
               </body></html>"#
                .to_string(),
        ),
    )
    .await;
    mount_detail(&server, "c", html(detail_page("30", "Mar 3, 2024"))).await;

    let dir = TempDir::new().unwrap();
    let report = report_path(&dir);
    let config = create_test_config(&server.uri(), &report, DetailFailurePolicy::Abort);

    let result = run_scrape(config).await;
    assert!(matches!(
        result,
        Err(ScrapeError::MarkupNotFound { ref what, .. }) if what == "updated row"
    ));

    let content = std::fs::read_to_string(&report).unwrap();
    assert_eq!(content, expected_report(&["App A\t10\tJan 1, 2024"]));
}

#[tokio::test]
async fn test_detail_http_error_is_fatal_even_when_skipping() {
    let server = MockServer::start().await;
    mount_chart(
        &server,
        &[
            ("App A", "/store/apps/details?id=a"),
            ("App B", "/store/apps/details?id=b"),
        ],
    )
    .await;
    mount_detail(&server, "a", ResponseTemplate::new(404)).await;
    mount_detail(&server, "b", html(detail_page("20", "Feb 2, 2024"))).await;

    let dir = TempDir::new().unwrap();
    let report = report_path(&dir);
    let config = create_test_config(&server.uri(), &report, DetailFailurePolicy::Skip);

    let result = run_scrape(config).await;
    assert!(matches!(
        result,
        Err(ScrapeError::HttpStatus { status: 404, .. })
    ));

    let content = std::fs::read_to_string(&report).unwrap();
    assert_eq!(content, header_line());
}

#[tokio::test]
async fn test_chart_page_failure_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/store/apps/top"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let report = report_path(&dir);
    let config = create_test_config(&server.uri(), &report, DetailFailurePolicy::Skip);

    let result = run_scrape(config).await;
    assert!(matches!(
        result,
        Err(ScrapeError::HttpStatus { status: 503, .. })
    ));

    // The report is initialized before the chart is fetched
    assert_eq!(std::fs::read_to_string(&report).unwrap(), header_line());
}

#[tokio::test]
async fn test_chart_without_app_cards_is_fatal() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/store/apps/top"))
        .respond_with(html("<html><body>Nothing here</body></html>".to_string()))
        .mount(&server)
        .await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &report_path(&dir), DetailFailurePolicy::Skip);

    let result = run_scrape(config).await;
    assert!(matches!(result, Err(ScrapeError::MarkupNotFound { .. })));
}

#[tokio::test]
async fn test_slow_detail_page_times_out() {
    let server = MockServer::start().await;
    mount_chart(&server, &[("App A", "/store/apps/details?id=a")]).await;
    mount_detail(
        &server,
        "a",
        html(detail_page("1", "Jan 1, 2024")).set_delay(Duration::from_secs(3)),
    )
    .await;

    let dir = TempDir::new().unwrap();
    let mut config =
        create_test_config(&server.uri(), &report_path(&dir), DetailFailurePolicy::Skip);
    config.http.timeout_secs = 1;

    let result = run_scrape(config).await;
    assert!(matches!(result, Err(ScrapeError::Timeout { .. })));
}

#[tokio::test]
async fn test_duplicate_names_collapse_by_default() {
    let server = MockServer::start().await;
    mount_chart(
        &server,
        &[
            ("Notes", "/store/apps/details?id=first"),
            ("Notes", "/store/apps/details?id=second"),
        ],
    )
    .await;
    mount_detail(&server, "first", html(detail_page("1", "Jan 1, 2024"))).await;
    mount_detail(&server, "second", html(detail_page("2", "Feb 2, 2024"))).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &report_path(&dir), DetailFailurePolicy::Skip);
    let coordinator = Coordinator::new(config).unwrap();

    let mut rows: Vec<AppDetails> = Vec::new();
    let summary = coordinator.run_with(&mut rows).await.unwrap();

    assert_eq!(summary.apps_listed, 1);
    assert_eq!(rows, vec![AppDetails::new("Notes", "2", "Feb 2, 2024")]);
}

#[tokio::test]
async fn test_duplicate_names_kept_when_keyed_by_link() {
    let server = MockServer::start().await;
    mount_chart(
        &server,
        &[
            ("Notes", "/store/apps/details?id=first"),
            ("Notes", "/store/apps/details?id=second"),
        ],
    )
    .await;
    mount_detail(&server, "first", html(detail_page("1", "Jan 1, 2024"))).await;
    mount_detail(&server, "second", html(detail_page("2", "Feb 2, 2024"))).await;

    let dir = TempDir::new().unwrap();
    let mut config =
        create_test_config(&server.uri(), &report_path(&dir), DetailFailurePolicy::Skip);
    config.run.key_by = KeyMode::Link;
    let coordinator = Coordinator::new(config).unwrap();

    let mut rows: Vec<AppDetails> = Vec::new();
    let summary = coordinator.run_with(&mut rows).await.unwrap();

    assert_eq!(summary.apps_listed, 2);
    assert_eq!(
        rows,
        vec![
            AppDetails::new("Notes", "1", "Jan 1, 2024"),
            AppDetails::new("Notes", "2", "Feb 2, 2024"),
        ]
    );
}

#[tokio::test]
async fn test_empty_link_is_skipped() {
    let server = MockServer::start().await;
    mount_chart(
        &server,
        &[("Broken", ""), ("App A", "/store/apps/details?id=a")],
    )
    .await;
    mount_detail(&server, "a", html(detail_page("10", "Jan 1, 2024"))).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &report_path(&dir), DetailFailurePolicy::Skip);
    let coordinator = Coordinator::new(config).unwrap();

    let mut rows: Vec<AppDetails> = Vec::new();
    let summary = coordinator.run_with(&mut rows).await.unwrap();

    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].name, "Broken");
    assert_eq!(rows, vec![AppDetails::new("App A", "10", "Jan 1, 2024")]);
}

#[tokio::test]
async fn test_off_site_link_is_skipped() {
    let server = MockServer::start().await;
    mount_chart(
        &server,
        &[
            ("Elsewhere", "//evil.test/store/apps/details?id=x"),
            ("App A", "/store/apps/details?id=a"),
        ],
    )
    .await;
    mount_detail(&server, "a", html(detail_page("10", "Jan 1, 2024"))).await;

    let dir = TempDir::new().unwrap();
    let config = create_test_config(&server.uri(), &report_path(&dir), DetailFailurePolicy::Skip);
    let coordinator = Coordinator::new(config).unwrap();

    let mut rows: Vec<AppDetails> = Vec::new();
    let summary = coordinator.run_with(&mut rows).await.unwrap();

    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].name, "Elsewhere");
    assert_eq!(rows, vec![AppDetails::new("App A", "10", "Jan 1, 2024")]);
}

#[test]
fn test_origin_with_path_is_rejected() {
    let dir = TempDir::new().unwrap();
    let origin = "https://example.com/mirror";
    let config = create_test_config(origin, &report_path(&dir), DetailFailurePolicy::Skip);

    let result = Coordinator::new(config);
    assert!(matches!(result, Err(ScrapeError::Config(_))));
}

#[tokio::test]
async fn test_empty_updated_value_is_written_blank() {
    let server = MockServer::start().await;
    mount_chart(&server, &[("App A", "/store/apps/details?id=a")]).await;
    mount_detail(&server, "a", html(detail_page("7", ""))).await;

    let dir = TempDir::new().unwrap();
    let report = report_path(&dir);
    let config = create_test_config(&server.uri(), &report, DetailFailurePolicy::Abort);

    let summary = run_scrape(config).await.expect("Scrape failed");
    assert!(summary.is_complete());

    let content = std::fs::read_to_string(&report).unwrap();
    assert_eq!(content, expected_report(&["App A\t7\t"]));
}
