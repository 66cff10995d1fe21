//! End-to-end runs against one mock server standing in for both the shop's
//! search pages and the Telegram Bot API.

use std::time::{Duration, Instant};

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pricewatch_pipeline::{Pipeline, RunOutcome, RunSummary, ScrapeJob};
use pricewatch_report::{Reporter, TelegramClient};
use pricewatch_scraper::PageFetcher;

const TOKEN: &str = "424242:pipeline-token";
const CHAT_ID: &str = "-100555";
const CSV_HEADER: &str =
    "Product ID,Title,Rating,Rating Count,Monthly Sales,Selling Price,MRP,Discount\n";

fn listing(asin: &str) -> String {
    format!(
        r#"<div data-asin="{asin}">
          <span class="a-size-base-plus a-color-base a-text-normal">Jaggery Powder 1kg</span>
          <span class="a-icon-alt">4.3 out of 5 stars</span>
          <span class="a-price-whole">275</span>
        </div>"#
    )
}

fn results_page(asins: &[&str]) -> String {
    let body: String = asins.iter().map(|a| listing(a)).collect();
    format!("<html><body>{body}</body></html>")
}

/// Rendered (the marker is present) but with no product containers.
const EMPTY_RESULTS_PAGE: &str = r#"<html><body>
  <span class="a-size-base-plus a-color-base a-text-normal">No results for jaggery</span>
</body></html>"#;

fn pipeline(server: &MockServer, max_pages: u32, attempts: u32) -> Pipeline {
    paced_pipeline(server, max_pages, attempts, Duration::ZERO)
}

fn paced_pipeline(server: &MockServer, max_pages: u32, attempts: u32, delay: Duration) -> Pipeline {
    let job = ScrapeJob {
        search_url_template: format!("{}/s?k=jaggery&page={{page}}", server.uri()),
        max_pages,
        page_delay_min: delay,
        page_delay_max: delay,
    };
    let fetcher = PageFetcher::new(5, attempts, Duration::ZERO).expect("fetcher");
    let telegram =
        TelegramClient::with_base_url(TOKEN, CHAT_ID, 5, &server.uri()).expect("telegram client");
    Pipeline::new(job, fetcher, Reporter::new(telegram))
}

async fn mount_search_page(server: &MockServer, page: &str, status: u16, body: &str, calls: u64) {
    Mock::given(method("GET"))
        .and(path("/s"))
        .and(query_param("page", page))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .expect(calls)
        .mount(server)
        .await;
}

async fn mount_telegram(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendDocument")))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({"ok": status == 200})))
        .expect(1)
        .mount(server)
        .await;
}

async fn uploaded_csv(server: &MockServer) -> String {
    let requests = server
        .received_requests()
        .await
        .expect("request recording is enabled");
    let uploads: Vec<_> = requests
        .iter()
        .filter(|r| r.method.as_str() == "POST")
        .collect();
    assert_eq!(uploads.len(), 1, "expected exactly one upload");
    String::from_utf8_lossy(&uploads[0].body).into_owned()
}

#[tokio::test]
async fn run_stops_at_first_empty_page_and_reports_once() {
    let server = MockServer::start().await;
    let first = results_page(&["B0JAG00001", "B0JAG00002", "B0JAG00003", "B0JAG00004", "B0JAG00005"]);
    mount_search_page(&server, "1", 200, &first, 1).await;
    mount_search_page(&server, "2", 200, EMPTY_RESULTS_PAGE, 1).await;
    mount_search_page(&server, "3", 200, &results_page(&["B0JAG00099"]), 0).await;
    mount_telegram(&server, 200).await;

    let outcome = pipeline(&server, 3, 3).run().await;

    assert_eq!(
        outcome,
        RunOutcome::Completed(RunSummary {
            pages_fetched: 2,
            pages_skipped: 0,
            records: 5,
            halted_early: true,
            reported: true,
        })
    );

    let body = uploaded_csv(&server).await;
    assert!(body.contains(CSV_HEADER));
    let rows = body.lines().filter(|l| l.starts_with("B0JAG")).count();
    assert_eq!(rows, 5);
    assert!(body.contains("B0JAG00001,Jaggery Powder 1kg,4.3 out of 5 stars,N/A,N/A,₹275,N/A,N/A"));
    assert!(!body.contains("B0JAG00099"));
}

#[tokio::test]
async fn run_accumulates_pages_in_order() {
    let server = MockServer::start().await;
    mount_search_page(&server, "1", 200, &results_page(&["B0JAG00001"]), 1).await;
    mount_search_page(&server, "2", 200, &results_page(&["B0JAG00002", "B0JAG00003"]), 1).await;

    let result = pipeline(&server, 2, 1).scrape().await;

    let ids: Vec<&str> = result.records.iter().map(|r| r.product_id.as_str()).collect();
    assert_eq!(ids, ["B0JAG00001", "B0JAG00002", "B0JAG00003"]);
    assert_eq!(result.pages_fetched, 2);
    assert!(!result.halted_early);
}

#[tokio::test]
async fn skipped_page_does_not_halt_the_run() {
    let server = MockServer::start().await;
    mount_search_page(&server, "1", 503, "", 2).await;
    mount_search_page(&server, "2", 200, &results_page(&["B0JAG00007"]), 1).await;
    mount_telegram(&server, 200).await;

    let outcome = pipeline(&server, 2, 2).run().await;

    assert_eq!(
        outcome,
        RunOutcome::Completed(RunSummary {
            pages_fetched: 1,
            pages_skipped: 1,
            records: 1,
            halted_early: false,
            reported: true,
        })
    );
    assert!(uploaded_csv(&server).await.contains("B0JAG00007,"));
}

#[tokio::test]
async fn run_with_every_page_failing_sends_header_only_report() {
    let server = MockServer::start().await;
    mount_search_page(&server, "1", 503, "", 2).await;
    mount_search_page(&server, "2", 503, "", 2).await;
    mount_telegram(&server, 200).await;

    let outcome = pipeline(&server, 2, 2).run().await;

    let RunOutcome::Completed(summary) = outcome else {
        panic!("expected a completed run, got {outcome:?}");
    };
    assert_eq!(summary.pages_skipped, 2);
    assert_eq!(summary.records, 0);
    assert!(summary.reported);

    let body = uploaded_csv(&server).await;
    assert!(body.contains(CSV_HEADER));
    assert!(!body.contains("B0JAG"));
}

#[tokio::test]
async fn failed_upload_is_logged_not_raised() {
    let server = MockServer::start().await;
    mount_search_page(&server, "1", 200, &results_page(&["B0JAG00001"]), 1).await;
    mount_telegram(&server, 500).await;

    let outcome = pipeline(&server, 1, 1).run().await;

    let RunOutcome::Completed(summary) = outcome else {
        panic!("expected a completed run, got {outcome:?}");
    };
    assert_eq!(summary.records, 1);
    assert!(!summary.reported);
}

#[tokio::test]
async fn overlapping_run_is_skipped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/s"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(results_page(&["B0JAG00001"]))
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_telegram(&server, 200).await;

    let p = pipeline(&server, 1, 1);
    let (first, second) = tokio::join!(p.run(), p.run());

    assert!(matches!(first, RunOutcome::Completed(_)), "got {first:?}");
    assert_eq!(second, RunOutcome::Skipped);
    assert!(!p.is_running());
}

const PAGE_DELAY: Duration = Duration::from_millis(300);

#[tokio::test]
async fn halting_page_still_gets_page_delay() {
    let server = MockServer::start().await;
    mount_search_page(&server, "1", 200, EMPTY_RESULTS_PAGE, 1).await;
    mount_search_page(&server, "2", 200, &results_page(&["B0JAG00001"]), 0).await;

    let started = Instant::now();
    let result = paced_pipeline(&server, 2, 1, PAGE_DELAY).scrape().await;
    let elapsed = started.elapsed();

    assert!(result.halted_early);
    assert!(elapsed >= PAGE_DELAY, "halting page was not paced: {elapsed:?}");
}

#[tokio::test]
async fn each_fetched_page_is_followed_by_page_delay() {
    let server = MockServer::start().await;
    mount_search_page(&server, "1", 200, &results_page(&["B0JAG00001"]), 1).await;
    mount_search_page(&server, "2", 200, &results_page(&["B0JAG00002"]), 1).await;

    let started = Instant::now();
    let result = paced_pipeline(&server, 2, 1, PAGE_DELAY).scrape().await;
    let elapsed = started.elapsed();

    assert_eq!(result.pages_fetched, 2);
    assert!(elapsed >= PAGE_DELAY * 2, "expected two pauses, took {elapsed:?}");
}

#[tokio::test]
async fn skipped_page_gets_no_page_delay() {
    let server = MockServer::start().await;
    mount_search_page(&server, "1", 503, "", 1).await;

    let started = Instant::now();
    let result = paced_pipeline(&server, 1, 1, PAGE_DELAY).scrape().await;
    let elapsed = started.elapsed();

    assert_eq!(result.pages_skipped, 1);
    assert!(elapsed < PAGE_DELAY, "skipped page was paced: {elapsed:?}");
}
