// File: crates/hits-core/tests/response.rs
// Purpose: Validate decoding of both backend shapes and malformed/empty result handling.

use hits_core::response::{from_epoch_seconds, HitsResponse, MatrixResponse};
use hits_core::{aggregate_hits, aggregate_matrix, parse_value, ResponseError};

#[test]
fn value_sentinels() {
    assert!(parse_value("NaN").is_nan());
    assert_eq!(parse_value("Inf"), f64::INFINITY);
    assert_eq!(parse_value("+Inf"), f64::INFINITY);
    assert_eq!(parse_value("-Inf"), f64::NEG_INFINITY);
    assert_eq!(parse_value("12.5"), 12.5);
    assert_eq!(parse_value(" 3 "), 3.0);
    assert!(parse_value("bogus").is_nan());
}

#[test]
fn matrix_without_result_is_malformed() {
    let resp = MatrixResponse::from_slice(br#"{"status":"error"}"#).expect("json");
    let err = aggregate_matrix(resp, 5).unwrap_err();
    assert!(matches!(err, ResponseError::MalformedResponse { field: "result" }));
    assert_eq!(err.to_string(), "Error: No 'result' field in response");

    let resp = MatrixResponse::from_slice(br#"{"status":"success","data":{}}"#).expect("json");
    assert!(aggregate_matrix(resp, 5).is_err());
}

#[test]
fn matrix_with_empty_result_is_empty() {
    let body = br#"{"status":"success","data":{"result":[],"resultType":"matrix"}}"#;
    let resp = MatrixResponse::from_slice(body).expect("json");
    assert_eq!(resp.data.as_ref().map(|d| d.result_type.as_str()), Some("matrix"));
    assert!(aggregate_matrix(resp, 5).expect("not an error").is_empty());
}

#[test]
fn hits_without_hits_key_is_malformed() {
    let resp = HitsResponse::from_slice(br#"{"other":1}"#).expect("json");
    let err = aggregate_hits(resp, 5).unwrap_err();
    assert_eq!(err.to_string(), "Error: No 'hits' field in response");

    let resp = HitsResponse::from_slice(br#"{"hits":[]}"#).expect("json");
    assert!(aggregate_hits(resp, 5).expect("empty").is_empty());
}

#[test]
fn matrix_series_are_labelled_and_totalled() {
    let body = br#"{
        "status": "success",
        "data": {"resultType": "matrix", "result": [
            {"metric": {"__name__": "hits", "level": "error", "app": ""},
             "values": [[1697040000, "2"], [1697040060, "NaN"], [1697040120, "3.5"]]},
            {"metric": {}, "values": [[1697040000, "1"]]}
        ]}
    }"#;
    let resp = MatrixResponse::from_slice(body).expect("json");
    let series = resp.into_series().expect("series");

    assert_eq!(series[0].labels["name"], "hits {level:\"error\"}");
    assert_eq!(series[0].total, 5.5);
    assert!(series[0].values[1].is_some_and(f64::is_nan));
    assert_eq!(series[0].timestamps[0], from_epoch_seconds(1_697_040_000.0).expect("ts"));

    // No name and no labels: empty label, still ranked normally.
    assert_eq!(series[1].labels["name"], "");
    assert!(!series[1].is_other);
}

#[test]
fn hit_series_decode_rfc3339_and_totals() {
    let body = br#"{"hits": [
        {"timestamps": ["2024-01-01T00:00:00Z", "2024-01-01T00:01:00Z", "not-a-time"],
         "values": [3, 0, 9], "fields": {"_stream": "{app=\"api\"}"}, "total": 3},
        {"timestamps": ["2024-01-01T00:00:00+00:00"], "values": [7], "fields": {}}
    ]}"#;
    let resp = HitsResponse::from_slice(body).expect("json");
    let series = resp.into_series().expect("series");

    assert_eq!(series[0].len(), 2, "bad timestamp dropped");
    assert_eq!(series[0].values, vec![Some(3.0), Some(0.0)]);
    assert_eq!(series[0].total, 3.0);
    assert_eq!(series[1].total, 7.0);
    assert_eq!(series[0].timestamps[0], series[1].timestamps[0]);
}

#[test]
fn unlabelled_hit_becomes_other() {
    let body = br#"{"hits": [
        {"timestamps": ["2024-01-01T00:00:00Z"], "values": [1], "fields": {"_stream": "a"}, "total": 1},
        {"timestamps": ["2024-01-01T00:00:00Z"], "values": [50], "fields": {}, "total": 50}
    ]}"#;
    let out = aggregate_hits(HitsResponse::from_slice(body).expect("json"), 5).expect("hits");
    assert_eq!(out.len(), 2);
    assert!(out[0].is_other);
    assert_eq!(out[0].total, 50.0);
    assert_eq!(out[1].labels["_stream"], "a");
}

#[test]
fn invalid_json_is_decode_error() {
    let err = HitsResponse::from_slice(b"{not json").map_err(ResponseError::from).unwrap_err();
    assert!(matches!(err, ResponseError::Decode(_)));
}
