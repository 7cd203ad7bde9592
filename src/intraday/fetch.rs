use url::Url;

use crate::core::client::constants::{FUNCTION_INTRADAY, OUTPUT_SIZE_COMPACT};
use crate::core::wire::{ResponseShape, classify};
use crate::core::{FetchError, Interval, NetworkError, QuoteClient};
use serde_json::{Map, Value};

/// The data entries of a successful response, still in wire form.
pub struct Fetched {
    pub entries: Map<String, Value>,
}

/// Builds the provider query URL. Parameter order is fixed.
pub(crate) fn intraday_url(client: &QuoteClient, symbol: &str, interval: Interval) -> Url {
    let mut url = client.base_query().clone();
    url.query_pairs_mut()
        .clear()
        .append_pair("function", FUNCTION_INTRADAY)
        .append_pair("symbol", symbol)
        .append_pair("interval", interval.as_str())
        .append_pair("outputsize", OUTPUT_SIZE_COMPACT)
        .append_pair("apikey", client.api_key());
    url
}

/// The URL with the credential replaced, for error messages and logs.
pub(crate) fn redacted(url: &Url) -> String {
    let mut out = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "apikey" { "***".into() } else { v.into_owned() };
            (k.into_owned(), v)
        })
        .collect();
    out.query_pairs_mut().clear().extend_pairs(pairs);
    out.to_string()
}

pub async fn fetch_intraday(
    client: &QuoteClient,
    symbol: &str,
    interval: Interval,
) -> Result<Fetched, FetchError> {
    let url = intraday_url(client, symbol, interval);

    let resp = client
        .http()
        .get(url.clone())
        .header("accept", "application/json")
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(NetworkError::Status {
            status: status.as_u16(),
            url: redacted(&url),
        }
        .into());
    }

    let body = resp.text().await?;
    decode_intraday(&body)
}

fn decode_intraday(body: &str) -> Result<Fetched, FetchError> {
    let payload: Value = serde_json::from_str(body)
        .map_err(|_| FetchError::UnexpectedResponse(body.to_string()))?;

    match classify(payload) {
        ResponseShape::TimeSeries(entries) => Ok(Fetched { entries }),
        ResponseShape::ProviderError(msg) => Err(FetchError::Provider(msg)),
        ResponseShape::RateLimit(msg) => Err(FetchError::RateLimited(msg)),
        ResponseShape::Unknown(raw) => Err(FetchError::UnexpectedResponse(raw.to_string())),
    }
}
