use grocerbot_protocols::ShoppingResult;
use serde_json::json;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;

fn config(server: &MockServer) -> SheetsConfig {
    SheetsConfig {
        token_endpoint: format!("{}/token", server.uri()),
        api_base: server.uri(),
        ..SheetsConfig::new("sheet-123", "client-id", "client-secret", "refresh-abc")
    }
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=refresh-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "access-xyz",
            "expires_in": 3599,
            "token_type": "Bearer"
        })))
        .expect(1)
        .mount(server)
        .await;
}

#[test]
fn test_sheet_url() {
    let source = SheetsGrocerySource::new(SheetsConfig::new("abc", "id", "secret", "refresh"));
    assert_eq!(source.sheet_url(None), "https://docs.google.com/spreadsheets/d/abc");
    assert_eq!(
        source.sheet_url(Some(42)),
        "https://docs.google.com/spreadsheets/d/abc/edit#gid=42"
    );
}

#[tokio::test]
async fn test_get_list_before_init() {
    let source = SheetsGrocerySource::new(SheetsConfig::new("abc", "id", "secret", "refresh"));
    let err = source.get_list().await.unwrap_err();
    assert!(matches!(err, SourceError::NotInitialized));
}

#[tokio::test]
async fn test_init_and_get_list() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-123/values/A1:C50"))
        .and(header("authorization", "Bearer access-xyz"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "range": "Sheet1!A1:C50",
            "majorDimension": "ROWS",
            "values": [["Item", "Quantity"], ["milk", "2"], ["bread"]]
        })))
        .mount(&server)
        .await;

    let mut source = SheetsGrocerySource::new(config(&server));
    source.init().await.unwrap();
    let list = source.get_list().await.unwrap();

    assert_eq!(list.len(), 2);
    assert_eq!(list[0].name, "milk");
    assert_eq!(list[0].quantity.get(), 2);
    assert_eq!(list[1].quantity.get(), 1);
}

#[tokio::test]
async fn test_get_list_without_values() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-123/values/A1:C50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"range": "Sheet1!A1:C50"})))
        .mount(&server)
        .await;

    let mut source = SheetsGrocerySource::new(config(&server));
    source.init().await.unwrap();
    assert!(source.get_list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_init_rejected_refresh_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant",
            "error_description": "Token has been expired or revoked."
        })))
        .mount(&server)
        .await;

    let mut source = SheetsGrocerySource::new(config(&server));
    let err = source.init().await.unwrap_err();
    match err {
        SourceError::AuthFailed(msg) => assert!(msg.contains("expired or revoked")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_get_list_api_error() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("GET"))
        .and(path("/v4/spreadsheets/sheet-123/values/A1:C50"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": 404, "message": "Requested entity was not found.", "status": "NOT_FOUND"}
        })))
        .mount(&server)
        .await;

    let mut source = SheetsGrocerySource::new(config(&server));
    source.init().await.unwrap();
    let err = source.get_list().await.unwrap_err();
    match err {
        SourceError::Api(msg) => {
            assert!(msg.contains("404"));
            assert!(msg.contains("Requested entity was not found."));
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_record_results() {
    let server = MockServer::start().await;
    mount_token(&server).await;
    Mock::given(method("POST"))
        .and(path("/v4/spreadsheets/sheet-123:batchUpdate"))
        .and(header("authorization", "Bearer access-xyz"))
        .and(body_partial_json(json!({
            "requests": [{"addSheet": {"properties": {"sheetId": 1792000000, "title": "Trip"}}}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "spreadsheetId": "sheet-123",
            "replies": [{}, {}, {}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut source = SheetsGrocerySource::new(config(&server));
    source.init().await.unwrap();
    let url = source
        .record_results("Trip", 1_792_000_000, &[ShoppingResult::new("saffron", None)])
        .await
        .unwrap();

    assert_eq!(
        url,
        "https://docs.google.com/spreadsheets/d/sheet-123/edit#gid=1792000000"
    );
}
