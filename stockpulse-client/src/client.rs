//! The dashboard API client.

use std::time::Duration;

use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use stockpulse_metrics::types::{
    DashboardSummary, EmployeePerformance, HistoricalResponse, StoreDetail, StoreSummary,
};
use tracing::warn;

use crate::error::{ClientError, ClientResult};

/// Per-request timeout.
const REQUEST_TIMEOUT_SECS: u64 = 10;
/// Total send attempts per request: the original plus one retry.
const MAX_ATTEMPTS: u32 = 2;

/// Error payload the API returns for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    detail: String,
}

/// Liveness payload from `/api/health`.
#[derive(Debug, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// Typed client for the dashboard REST API.
pub struct DashboardClient {
    http: reqwest::Client,
    base_url: Url,
}

impl DashboardClient {
    pub fn new(base_url: &str) -> ClientResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|_| ClientError::InvalidBaseUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { http, base_url })
    }

    /// Chain-wide summary, optionally for a specific period ("YYYY-MM").
    pub async fn summary(&self, periodo: Option<&str>) -> ClientResult<DashboardSummary> {
        let url = self.endpoint(&["api", "dashboard", "summary"])?;
        self.get_json(url, &period_query(periodo)).await
    }

    /// All store records for the period.
    pub async fn stores(&self, periodo: Option<&str>) -> ClientResult<Vec<StoreSummary>> {
        let url = self.endpoint(&["api", "dashboard", "tiendas"])?;
        self.get_json(url, &period_query(periodo)).await
    }

    /// Full detail for one store. The store name is sent as a path segment;
    /// names with spaces ("Tienda Centro") are percent-encoded here.
    pub async fn store_detail(
        &self,
        tienda: &str,
        periodo: Option<&str>,
    ) -> ClientResult<StoreDetail> {
        let url = self.endpoint(&["api", "dashboard", "tiendas", tienda])?;
        self.get_json(url, &period_query(periodo)).await
    }

    /// Employee performance records, ranked by total sales.
    pub async fn employees(&self) -> ClientResult<Vec<EmployeePerformance>> {
        let url = self.endpoint(&["api", "dashboard", "empleados"])?;
        self.get_json(url, &[]).await
    }

    /// Monthly historical series, chain-wide unless a store is given.
    pub async fn historical(
        &self,
        tienda: Option<&str>,
        year: Option<i32>,
    ) -> ClientResult<HistoricalResponse> {
        let url = self.endpoint(&["api", "dashboard", "historico"])?;
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(t) = tienda {
            query.push(("tienda", t.to_string()));
        }
        if let Some(y) = year {
            query.push(("year", y.to_string()));
        }
        self.get_json(url, &query).await
    }

    /// API liveness probe.
    pub async fn health(&self) -> ClientResult<HealthStatus> {
        let url = self.endpoint(&["api", "health"])?;
        self.get_json(url, &[]).await
    }

    /// Build an endpoint URL from path segments, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| ClientError::InvalidBaseUrl(self.base_url.to_string()))?;
            path.pop_if_empty();
            for segment in segments {
                path.push(segment);
            }
        }
        Ok(url)
    }

    /// GET with one retry on transport failure. HTTP error statuses are
    /// never retried; the API already saw the request.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> ClientResult<T> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let result = self.http.get(url.clone()).query(query).send().await;
            match result {
                Ok(response) => return decode(response).await,
                Err(err) if attempt < MAX_ATTEMPTS => {
                    warn!(url = url.as_str(), %err, "transport error, retrying");
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }
    let detail = match response.json::<ApiErrorBody>().await {
        Ok(body) => body.detail,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("unknown error")
            .to_string(),
    };
    Err(ClientError::Api {
        status: status.as_u16(),
        detail,
    })
}

fn period_query(periodo: Option<&str>) -> Vec<(&'static str, String)> {
    periodo
        .map(|p| vec![("periodo", p.to_string())])
        .unwrap_or_default()
}
