//! HTTP status mapping through the default and passthrough wrappers.

use custody_kit::*;
use serde_json::json;

use crate::init_tracing;

/// The mock is removed from the server when dropped, so it is returned too.
async fn server_answering(
    status: usize,
    body: &str,
) -> (mockito::ServerGuard, mockito::Mock) {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/eth/wallet/w1")
        .with_status(status)
        .with_body(body)
        .create_async()
        .await;
    (server, mock)
}

#[tokio::test]
async fn test_status_codes_map_to_api_errors() {
    init_tracing();
    let cases: [(usize, fn(&ApiError) -> bool); 5] = [
        (401, |e| matches!(e, ApiError::Authentication(_))),
        (403, |e| matches!(e, ApiError::Authentication(_))),
        (404, |e| matches!(e, ApiError::NotFound(_))),
        (409, |e| matches!(e, ApiError::Conflict(_))),
        (500, |e| matches!(e, ApiError::Api { status: 500, .. })),
    ];

    for (status, expected) in cases {
        let (server, _mock) = server_answering(status, r#"{"message":"nope"}"#).await;
        let custody = Custody::builder(server.url()).build().unwrap();

        let err = custody.eth().wallet("w1").get().await.unwrap_err();
        match &err {
            Error::Api(api) => assert!(expected(api), "status {}: got {:?}", status, api),
            other => panic!("Expected Api error for {}, got: {:?}", status, other),
        }
    }
}

#[tokio::test]
async fn test_error_message_taken_from_body() {
    init_tracing();
    let (server, _mock) = server_answering(404, r#"{"message":"wallet w1 not found"}"#).await;
    let custody = Custody::builder(server.url()).build().unwrap();

    let err = custody.eth().wallet("w1").get().await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("wallet w1 not found"));
}

#[tokio::test]
async fn test_passthrough_keeps_raw_status() {
    init_tracing();
    let (server, _mock) = server_answering(409, "conflict").await;
    let custody = Custody::builder(server.url())
        .wrapper(Passthrough)
        .build()
        .unwrap();

    let err = custody.eth().wallet("w1").get().await.unwrap_err();
    match err {
        Error::Http(HttpError::Status { status, body }) => {
            assert_eq!(status, 409);
            assert_eq!(body, "conflict");
        }
        other => panic!("Expected raw Http status, got: {:?}", other),
    }
}

#[tokio::test]
async fn test_iterator_surfaces_page_error() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let _first = server
        .mock("GET", "/eth/transactions")
        .with_status(200)
        .with_body(
            json!({
                "hits": { "total": 2 },
                "list": [],
                "links": { "next": "eth/transactions/cursor/2", "previous": null }
            })
            .to_string(),
        )
        .create_async()
        .await;
    let _second = server
        .mock("GET", "/eth/transactions/cursor/2")
        .with_status(503)
        .with_body("maintenance")
        .create_async()
        .await;

    let custody = Custody::builder(server.url()).build().unwrap();
    let mut items = custody.eth().transactions().items();

    let err = items.next().await.unwrap().unwrap_err();
    assert_eq!(err.status_code(), Some(503));
    assert!(items.next().await.is_none());
}

#[tokio::test]
async fn test_empty_body_decodes_as_null() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let delete = server
        .mock("DELETE", "/eth/wallet/w1/monitor/m1")
        .with_status(204)
        .create_async()
        .await;

    let custody = Custody::builder(server.url()).build().unwrap();
    custody
        .eth()
        .wallet("w1")
        .monitor("m1")
        .delete()
        .await
        .unwrap();

    delete.assert_async().await;
}
