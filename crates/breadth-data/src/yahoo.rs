//! Yahoo Finance chart endpoint.

use async_trait::async_trait;
use breadth_core::error::DataError;
use breadth_core::traits::DataSource;
use breadth_core::types::{Interval, Lookback, PricePoint, PriceSeries};
use chrono::DateTime;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Yahoo client configuration.
#[derive(Debug, Clone)]
pub struct YahooConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: "https://query1.finance.yahoo.com".to_string(),
            user_agent: "Mozilla/5.0 (compatible; breadth/0.1)".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

/// Error body of a failed request; Yahoo nests it under `chart` or `finance`.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    chart: Option<ErrorEnvelope>,
    finance: Option<ErrorEnvelope>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteData>,
    #[serde(default)]
    adjclose: Vec<AdjCloseData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseData {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// Historical closes from the Yahoo Finance chart API.
pub struct YahooSource {
    config: YahooConfig,
    client: Client,
}

impl YahooSource {
    /// Create a new client.
    pub fn new(config: YahooConfig) -> Result<Self, DataError> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        Ok(Self { config, client })
    }

    fn chart_url(&self, symbol: &str) -> String {
        format!(
            "{}/v8/finance/chart/{}",
            self.config.base_url.trim_end_matches('/'),
            symbol
        )
    }
}

#[async_trait]
impl DataSource for YahooSource {
    async fn fetch_closes(
        &self,
        symbol: &str,
        interval: Interval,
        lookback: Lookback,
    ) -> Result<PriceSeries, DataError> {
        let url = self.chart_url(symbol);
        debug!(symbol, %interval, %lookback, "Requesting chart");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("interval", interval.to_string()),
                ("range", lookback.to_string()),
                ("includeAdjustedClose", "true".to_string()),
            ])
            .send()
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        if status == StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound(symbol.to_string()));
        }
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(DataError::Api {
                code: status.as_u16().to_string(),
                description: "rate limited".to_string(),
            });
        }
        if !status.is_success() {
            return Err(status_error(symbol, status, &body));
        }

        let series = parse_chart(symbol, interval, &body)?;
        debug!(symbol, points = series.len(), "Chart parsed");
        Ok(series)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}

fn api_error(symbol: &str, error: ChartError) -> DataError {
    if error.code.eq_ignore_ascii_case("Not Found") {
        return DataError::SymbolNotFound(symbol.to_string());
    }
    DataError::Api {
        code: error.code,
        description: error.description,
    }
}

/// Map a non-success response to an API error, using the error payload when there is one.
fn status_error(symbol: &str, status: StatusCode, body: &str) -> DataError {
    let payload = serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|r| {
            let finance = r.finance.and_then(|e| e.error);
            r.chart.and_then(|e| e.error).or(finance)
        });
    if let Some(error) = payload {
        return api_error(symbol, error);
    }

    let snippet: String = body.trim().chars().take(200).collect();
    let description = if snippet.is_empty() {
        status.canonical_reason().unwrap_or("request failed").to_string()
    } else {
        snippet
    };
    DataError::Api {
        code: status.as_u16().to_string(),
        description,
    }
}

/// Parse a chart response body into a close series.
///
/// Adjusted closes are used when present, raw closes otherwise. Null
/// observations are skipped. Dates are taken in the exchange's local offset.
fn parse_chart(symbol: &str, interval: Interval, body: &str) -> Result<PriceSeries, DataError> {
    let response: ChartResponse =
        serde_json::from_str(body).map_err(|e| DataError::ParseError(e.to_string()))?;

    if let Some(error) = response.chart.error {
        return Err(api_error(symbol, error));
    }

    let data = response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or(DataError::NoDataAvailable)?;

    let closes = data
        .indicators
        .adjclose
        .into_iter()
        .next()
        .map(|a| a.adjclose)
        .filter(|a| !a.is_empty())
        .or_else(|| data.indicators.quote.into_iter().next().map(|q| q.close))
        .ok_or(DataError::NoDataAvailable)?;

    let offset = data.meta.gmtoffset;
    let points: Vec<PricePoint> = data
        .timestamp
        .iter()
        .zip(closes)
        .filter_map(|(&ts, close)| {
            let close = close.filter(|c| c.is_finite())?;
            let date = DateTime::from_timestamp(ts + offset, 0)?.date_naive();
            Some(PricePoint::new(date, close))
        })
        .collect();

    if points.is_empty() {
        return Err(DataError::NoDataAvailable);
    }

    Ok(PriceSeries::new(symbol, interval, points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve a single canned HTTP response and return the base URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/plain\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}", addr)
    }

    async fn fetch_from(base_url: String) -> Result<PriceSeries, DataError> {
        let source = YahooSource::new(YahooConfig {
            base_url,
            ..YahooConfig::default()
        })
        .unwrap();
        source
            .fetch_closes("AAPL", Interval::Daily, Lookback::Month1)
            .await
    }

    const CHART: &str = r#"{
        "chart": {
            "result": [{
                "meta": {"symbol": "AAPL", "gmtoffset": -14400},
                "timestamp": [1704205800, 1704292200, 1704378600],
                "indicators": {
                    "quote": [{"close": [185.64, 184.25, null]}],
                    "adjclose": [{"adjclose": [184.94, 183.55, null]}]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_parse_prefers_adjusted_close() {
        let series = parse_chart("AAPL", Interval::Daily, CHART).unwrap();

        assert_eq!(series.symbol, "AAPL");
        assert_eq!(series.len(), 2); // null skipped
        assert_eq!(series.closes(), vec![184.94, 183.55]);
        assert_eq!(
            series.first().unwrap().date,
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
    }

    #[test]
    fn test_parse_falls_back_to_close() {
        let body = r#"{"chart": {"result": [{
            "timestamp": [1704205800],
            "indicators": {"quote": [{"close": [101.5]}]}
        }], "error": null}}"#;

        let series = parse_chart("SPY", Interval::Daily, body).unwrap();
        assert_eq!(series.closes(), vec![101.5]);
    }

    #[test]
    fn test_parse_not_found() {
        let body = r#"{"chart": {"result": null, "error": {
            "code": "Not Found",
            "description": "No data found, symbol may be delisted"
        }}}"#;

        assert!(matches!(
            parse_chart("ZZZZ", Interval::Daily, body),
            Err(DataError::SymbolNotFound(_))
        ));
    }

    #[test]
    fn test_parse_api_error() {
        let body = r#"{"chart": {"result": null, "error": {
            "code": "Bad Request",
            "description": "Invalid input - interval=7d is not supported"
        }}}"#;

        match parse_chart("AAPL", Interval::Daily, body) {
            Err(DataError::Api { code, .. }) => assert_eq!(code, "Bad Request"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_all_null_is_no_data() {
        let body = r#"{"chart": {"result": [{
            "timestamp": [1704205800, 1704292200],
            "indicators": {"quote": [{"close": [null, null]}]}
        }], "error": null}}"#;

        assert!(matches!(
            parse_chart("AAPL", Interval::Daily, body),
            Err(DataError::NoDataAvailable)
        ));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_chart("AAPL", Interval::Daily, "<html>"),
            Err(DataError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn test_server_error_is_api_error() {
        let base = serve_once("503 Service Unavailable", "<html>down</html>").await;

        match fetch_from(base).await {
            Err(DataError::Api { code, description }) => {
                assert_eq!(code, "503");
                assert_eq!(description, "<html>down</html>");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_finance_error_payload() {
        let base = serve_once(
            "401 Unauthorized",
            r#"{"finance":{"result":null,"error":{"code":"Unauthorized","description":"Invalid Crumb"}}}"#,
        )
        .await;

        match fetch_from(base).await {
            Err(DataError::Api { code, description }) => {
                assert_eq!(code, "Unauthorized");
                assert_eq!(description, "Invalid Crumb");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_status_error_without_body() {
        match status_error("AAPL", StatusCode::FORBIDDEN, "  ") {
            DataError::Api { code, description } => {
                assert_eq!(code, "403");
                assert_eq!(description, "Forbidden");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_chart_url() {
        let source = YahooSource::new(YahooConfig {
            base_url: "http://localhost:9999/".to_string(),
            ..YahooConfig::default()
        })
        .unwrap();
        assert_eq!(
            source.chart_url("BRK-B"),
            "http://localhost:9999/v8/finance/chart/BRK-B"
        );
        assert_eq!(source.name(), "yahoo");
    }

    #[tokio::test]
    #[ignore] // requires network access
    async fn test_fetch_live() {
        let source = YahooSource::new(YahooConfig::default()).unwrap();
        let series = source
            .fetch_closes("AAPL", Interval::Daily, Lookback::Month1)
            .await
            .unwrap();
        assert!(!series.is_empty());
    }
}
