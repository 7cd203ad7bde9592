#![allow(dead_code)]

use httpmock::{Method::GET, Mock, MockServer};
use intraday_dash::{Clock, QuoteClient};
use std::sync::Arc;
use std::{fs, path::Path};
use url::Url;

pub const API_KEY: &str = "test-key";

pub fn setup_server() -> MockServer {
    MockServer::start()
}

pub fn fixture(endpoint: &str, symbol: &str, ext: &str) -> String {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures");
    let filename = format!("{}_{}.{}", endpoint, symbol, ext);
    let path = dir.join(&filename);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

pub fn query_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}/query", server.base_url())).unwrap()
}

pub fn client(server: &MockServer) -> QuoteClient {
    QuoteClient::builder()
        .api_key(API_KEY)
        .base_query(query_url(server))
        .build()
        .unwrap()
}

pub fn client_with_clock(server: &MockServer, clock: Arc<dyn Clock>) -> QuoteClient {
    QuoteClient::builder()
        .api_key(API_KEY)
        .base_query(query_url(server))
        .clock(clock)
        .build()
        .unwrap()
}

/// Mocks the intraday endpoint for `symbol`/`interval` with a JSON body.
pub fn mock_intraday<'a>(
    server: &'a MockServer,
    symbol: &'a str,
    interval: &'a str,
    status: u16,
    body: &'a str,
) -> Mock<'a> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/query")
            .query_param("function", "TIME_SERIES_INTRADAY")
            .query_param("symbol", symbol)
            .query_param("interval", interval)
            .query_param("outputsize", "compact")
            .query_param("apikey", API_KEY);
        then.status(status)
            .header("content-type", "application/json")
            .body(body);
    })
}
