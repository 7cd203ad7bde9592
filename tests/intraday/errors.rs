use intraday_dash::{FetchError, Interval, NetworkError};

use crate::common::{client, mock_intraday, setup_server};

#[tokio::test]
async fn error_message_maps_to_provider_error() {
    let server = setup_server();
    let body = r#"{"Error Message": "Invalid API call. Please retry or visit the documentation for TIME_SERIES_INTRADAY."}"#;
    let mock = mock_intraday(&server, "NOPE", "5min", 200, body);

    let err = client(&server)
        .intraday("NOPE", Interval::I5m)
        .await
        .unwrap_err();
    mock.assert();

    match err {
        FetchError::Provider(msg) => assert!(msg.starts_with("Invalid API call.")),
        other => panic!("expected Provider, got {other:?}"),
    }
}

#[tokio::test]
async fn note_maps_to_rate_limited() {
    let server = setup_server();
    let body = r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."}"#;
    let mock = mock_intraday(&server, "IBM", "5min", 200, body);

    let c = client(&server);
    let err = c.intraday("IBM", Interval::I5m).await.unwrap_err();
    mock.assert();

    assert!(err.is_rate_limited());
    match err {
        FetchError::RateLimited(msg) => assert!(msg.contains("5 calls per minute")),
        other => panic!("expected RateLimited, got {other:?}"),
    }
    assert!(c.cache().is_empty().await);
}

#[tokio::test]
async fn unknown_shape_carries_raw_payload() {
    let server = setup_server();
    let body = r#"{"Meta Data": {"2. Symbol": "IBM"}}"#;
    let mock = mock_intraday(&server, "IBM", "5min", 200, body);

    let err = client(&server)
        .intraday("IBM", Interval::I5m)
        .await
        .unwrap_err();
    mock.assert();

    match err {
        FetchError::UnexpectedResponse(raw) => assert!(raw.contains("Meta Data")),
        other => panic!("expected UnexpectedResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn status_429_is_network_error_and_cache_is_untouched() {
    let server = setup_server();
    let mock = mock_intraday(&server, "IBM", "5min", 429, "{}");

    let c = client(&server);
    let err = c.intraday("IBM", Interval::I5m).await.unwrap_err();
    mock.assert();

    assert!(err.is_network());
    match err {
        FetchError::Network(NetworkError::Status { status, url }) => {
            assert_eq!(status, 429);
            assert!(url.contains("/query"));
            assert!(!url.contains(crate::common::API_KEY));
        }
        other => panic!("expected Network status error, got {other:?}"),
    }
    assert!(c.cache().is_empty().await);
}

#[tokio::test]
async fn server_error_is_not_retried() {
    let server = setup_server();
    let mock = mock_intraday(&server, "IBM", "5min", 503, "busy");

    let err = client(&server)
        .intraday("IBM", Interval::I5m)
        .await
        .unwrap_err();

    mock.assert_calls(1);
    assert!(matches!(
        err,
        FetchError::Network(NetworkError::Status { status: 503, .. })
    ));
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    // Grab a free port, then close it so nothing is listening there.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let c = intraday_dash::QuoteClient::builder()
        .api_key("k")
        .base_query(url::Url::parse(&format!("http://127.0.0.1:{port}/query")).unwrap())
        .timeout(std::time::Duration::from_secs(2))
        .build()
        .unwrap();

    let err = c.intraday("IBM", Interval::I5m).await.unwrap_err();
    assert!(matches!(
        err,
        FetchError::Network(NetworkError::Transport(_))
    ));
}

#[tokio::test]
async fn one_bad_row_fails_the_whole_series() {
    let server = setup_server();
    let body = r#"{"Time Series (5min)": {
        "2024-01-02 09:40:00": {"1. open":"10.0","2. high":"10.5","3. low":"9.8","4. close":"10.2","5. volume":"1000"},
        "2024-01-02 09:35:00": {"1. open":"10.0","2. high":"oops","3. low":"9.8","4. close":"10.2","5. volume":"1000"}
    }}"#;
    let mock = mock_intraday(&server, "IBM", "5min", 200, body);

    let c = client(&server);
    let err = c.intraday("IBM", Interval::I5m).await.unwrap_err();
    mock.assert();

    match err {
        FetchError::MalformedData { timestamp, reason } => {
            assert_eq!(timestamp, "2024-01-02 09:35:00");
            assert!(reason.contains("high"));
        }
        other => panic!("expected MalformedData, got {other:?}"),
    }
    assert!(c.cache().is_empty().await);
}

#[tokio::test]
async fn missing_volume_fails_the_whole_series() {
    let server = setup_server();
    let body = r#"{"Time Series (5min)": {
        "2024-01-02 09:35:00": {"1. open":"10.0","2. high":"10.5","3. low":"9.8","4. close":"10.2"}
    }}"#;
    let mock = mock_intraday(&server, "IBM", "5min", 200, body);

    let err = client(&server)
        .intraday("IBM", Interval::I5m)
        .await
        .unwrap_err();
    mock.assert();
    assert!(matches!(err, FetchError::MalformedData { .. }));
}

#[tokio::test]
async fn negative_and_zero_values_fail_the_whole_series() {
    let server = setup_server();
    let body = r#"{"Time Series (5min)": {
        "2024-01-02 09:35:00": {"1. open":"-10.0","2. high":"0","3. low":"-9.8","4. close":"0","5. volume":"-1000"}
    }}"#;
    let mock = mock_intraday(&server, "IBM", "5min", 200, body);

    let c = client(&server);
    let err = c.intraday("IBM", Interval::I5m).await.unwrap_err();
    mock.assert();

    match err {
        FetchError::MalformedData { timestamp, reason } => {
            assert_eq!(timestamp, "2024-01-02 09:35:00");
            assert_eq!(reason, "open must be positive");
        }
        other => panic!("expected MalformedData, got {other:?}"),
    }
    assert!(c.cache().is_empty().await);
}

#[tokio::test]
async fn negative_volume_alone_fails_the_series() {
    let server = setup_server();
    let body = r#"{"Time Series (5min)": {
        "2024-01-02 09:35:00": {"1. open":"10.0","2. high":"10.5","3. low":"9.8","4. close":"10.2","5. volume":"-1000"}
    }}"#;
    let mock = mock_intraday(&server, "IBM", "5min", 200, body);

    let c = client(&server);
    let err = c.intraday("IBM", Interval::I5m).await.unwrap_err();
    mock.assert();

    assert!(matches!(
        err,
        FetchError::MalformedData { ref reason, .. } if reason == "volume must be non-negative"
    ));
    assert!(c.cache().is_empty().await);
}
