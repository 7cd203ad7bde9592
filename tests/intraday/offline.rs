use chrono::NaiveDate;
use intraday_dash::{IntradayBuilder, Interval};

use crate::common::{client, fixture, mock_intraday, setup_server};

#[tokio::test]
async fn single_entry_is_parsed_field_by_field() {
    let server = setup_server();
    let body = r#"{"Time Series (5min)": {"2024-01-02 09:35:00": {"1. open":"10.0","2. high":"10.5","3. low":"9.8","4. close":"10.2","5. volume":"1000"}}}"#;
    let mock = mock_intraday(&server, "IBM", "5min", 200, body);

    let series = client(&server)
        .intraday("IBM", Interval::I5m)
        .await
        .unwrap();
    mock.assert();

    assert_eq!(series.symbol(), "IBM");
    assert_eq!(series.interval(), Interval::I5m);
    assert_eq!(series.len(), 1);
    let row = series.rows()[0];
    assert_eq!(
        row.ts,
        NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(9, 35, 0)
            .unwrap()
    );
    assert_eq!(row.open, 10.0);
    assert_eq!(row.high, 10.5);
    assert_eq!(row.low, 9.8);
    assert_eq!(row.close, 10.2);
    assert_eq!(row.volume, 1000.0);
    assert_eq!(row.volume_shares(), 1000);
}

#[tokio::test]
async fn fixture_rows_come_back_ascending() {
    let server = setup_server();
    let body = fixture("intraday", "IBM", "json");
    let mock = mock_intraday(&server, "IBM", "5min", 200, &body);

    let series = IntradayBuilder::new(&client(&server), "IBM")
        .fetch()
        .await
        .unwrap();
    mock.assert();

    // The provider sends six entries newest first.
    assert_eq!(series.len(), 6);
    assert!(series.rows().windows(2).all(|w| w[0].ts < w[1].ts));

    let first = series.first().unwrap();
    assert_eq!(first.ts.format("%H:%M").to_string(), "15:35");
    assert_eq!(first.close, 184.95);

    let last = series.latest().unwrap();
    assert_eq!(last.ts.format("%H:%M").to_string(), "16:00");
    assert_eq!(last.close, 185.20);
    assert_eq!(last.volume_shares(), 412_033);
}

#[tokio::test]
async fn symbol_is_upper_cased_for_the_request() {
    let server = setup_server();
    let body = fixture("intraday", "IBM", "json");
    let mock = mock_intraday(&server, "IBM", "5min", 200, &body);

    let series = client(&server)
        .intraday("  ibm ", Interval::I5m)
        .await
        .unwrap();
    mock.assert();
    assert_eq!(series.symbol(), "IBM");
}

#[tokio::test]
async fn interval_is_forwarded_and_key_found_by_pattern() {
    let server = setup_server();
    let body = r#"{
      "Meta Data": {"4. Interval": "15min"},
      "Time Series (15min)": {
        "2024-01-02 10:00:00": {"1. open":"1","2. high":"2","3. low":"0.5","4. close":"1.5","5. volume":"10"},
        "2024-01-02 09:45:00": {"1. open":"1","2. high":"2","3. low":"0.5","4. close":"1.25","5. volume":"20"}
      }
    }"#;
    let mock = mock_intraday(&server, "MSFT", "15min", 200, body);

    let series = IntradayBuilder::new(&client(&server), "MSFT")
        .interval(Interval::I15m)
        .fetch()
        .await
        .unwrap();
    mock.assert();

    assert_eq!(series.len(), 2);
    assert_eq!(series.rows()[0].close, 1.25);
    assert_eq!(series.interval(), Interval::I15m);
}

#[tokio::test]
async fn empty_symbol_is_rejected_without_io() {
    let server = setup_server();
    let err = client(&server)
        .intraday("   ", Interval::I5m)
        .await
        .unwrap_err();
    assert!(matches!(err, intraday_dash::FetchError::EmptySymbol));
}
