use reqwest::Client;
use std::future::Future;
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::models::Reading;
use crate::utils::constants::{DEFAULT_MAX_OFFSET, DEFAULT_PAGE_SIZE, EXPECTED_READING_COLUMNS};
use crate::utils::progress::ProgressReporter;

/// Outcome of a complete paginated fetch
#[derive(Debug)]
pub struct FetchReport {
    pub readings: Vec<Reading>,
    pub requests_issued: usize,
    pub hit_ceiling: bool,
}

/// Sequentially drains a `$limit`/`$offset` paginated CSV endpoint.
///
/// Pages are requested one at a time; an empty page (empty body or
/// header-only body) is the normal termination signal. The max-offset
/// ceiling is a safety device against a misbehaving upstream and should
/// never fire in correct operation; when it does, the truncation is
/// reported, not swallowed. Transport faults abort the fetch, there is
/// no retry.
pub struct PaginatedFetcher {
    client: Client,
    endpoint_url: String,
    page_size: u64,
    max_offset: u64,
}

impl PaginatedFetcher {
    pub fn new(endpoint_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint_url: endpoint_url.into(),
            page_size: DEFAULT_PAGE_SIZE,
            max_offset: DEFAULT_MAX_OFFSET,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Self {
        Self::new(config.endpoint_url.clone())
            .with_page_size(config.page_size)
            .with_max_offset(config.max_offset)
    }

    pub fn with_page_size(mut self, page_size: u64) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_max_offset(mut self, max_offset: u64) -> Self {
        self.max_offset = max_offset;
        self
    }

    /// Fetch every page from the configured endpoint
    pub async fn fetch_all(&self, progress: Option<&ProgressReporter>) -> Result<FetchReport> {
        info!(url = %self.endpoint_url, page_size = self.page_size, "starting paginated fetch");
        self.fetch_all_with(|offset, limit| self.fetch_page(offset, limit), progress)
            .await
    }

    /// Drive the pagination loop with a caller-supplied page source.
    ///
    /// `fetch_page` receives the current offset and the page size and
    /// returns the CSV body of that page. This is the seam the tests use
    /// to count requests without a network.
    pub async fn fetch_all_with<F, Fut>(
        &self,
        mut fetch_page: F,
        progress: Option<&ProgressReporter>,
    ) -> Result<FetchReport>
    where
        F: FnMut(u64, u64) -> Fut,
        Fut: Future<Output = Result<String>>,
    {
        let mut readings: Vec<Reading> = Vec::new();
        let mut offset: u64 = 0;
        let mut requests_issued = 0;
        let mut hit_ceiling = false;

        loop {
            if offset >= self.max_offset {
                hit_ceiling = true;
                warn!(
                    offset,
                    max_offset = self.max_offset,
                    "pagination offset ceiling reached, fetch stopped early"
                );
                break;
            }

            let body = fetch_page(offset, self.page_size).await?;
            requests_issued += 1;

            let page = parse_page(&body)?;
            debug!(offset, rows = page.len(), "fetched page");

            if page.is_empty() {
                break;
            }

            readings.extend(page);
            // The offset always advances by the full page size: a short
            // page is not a termination signal, only an empty one is.
            offset += self.page_size;

            if let Some(reporter) = progress {
                reporter.set_message(&format!(
                    "fetched {} pages ({} rows)",
                    requests_issued,
                    readings.len()
                ));
            }
        }

        info!(
            rows = readings.len(),
            requests = requests_issued,
            hit_ceiling,
            "paginated fetch finished"
        );

        Ok(FetchReport {
            readings,
            requests_issued,
            hit_ceiling,
        })
    }

    async fn fetch_page(&self, offset: u64, limit: u64) -> Result<String> {
        let response = self
            .client
            .get(&self.endpoint_url)
            .query(&[
                ("$limit", limit.to_string()),
                ("$offset", offset.to_string()),
            ])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.text().await?)
    }
}

/// Parse one CSV page into readings.
///
/// An empty body and a header-only body both mean "zero rows"; the
/// upstream is inconsistent about which of the two it sends for an
/// exhausted offset.
fn parse_page(body: &str) -> Result<Vec<Reading>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let headers = reader.headers()?.clone();
    validate_headers(&headers)?;

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        let reading: Reading = record?;
        rows.push(reading);
    }

    Ok(rows)
}

/// Fail loudly when the upstream schema drifts from the expected columns
fn validate_headers(headers: &csv::StringRecord) -> Result<()> {
    let missing: Vec<&str> = EXPECTED_READING_COLUMNS
        .iter()
        .copied()
        .filter(|expected| !headers.iter().any(|h| h == *expected))
        .collect();

    if !missing.is_empty() {
        return Err(PipelineError::SchemaDrift {
            missing: missing.join(", "),
            found: headers.iter().collect::<Vec<_>>().join(", "),
        });
    }

    Ok(())
}
