//! Async requests over real HTTP.

use std::time::Duration;

use custody_kit::*;
use mockito::Matcher;
use serde_json::json;

use crate::init_tracing;

#[tokio::test]
async fn test_send_and_wait_for_completion() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let submit = server
        .mock("POST", "/eth/wallet/treasury/transaction")
        .match_header("authorization", "Bearer sk_test")
        .match_body(Matcher::Json(json!({ "to": "0x01", "value": "10" })))
        .with_status(202)
        .with_body(json!({ "id": "req-42" }).to_string())
        .expect(1)
        .create_async()
        .await;
    let status = server
        .mock("GET", "/request/req-42")
        .with_status(200)
        .with_body(
            json!({
                "process": "completed",
                "status": { "stage": "mined" },
                "created": "2024-03-01T10:00:00Z",
                "updated": "2024-03-01T10:00:12Z",
                "output": { "hash": "0xfeed", "block": 19000000 }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let custody = Custody::builder(server.url())
        .api_key("sk_test")
        .build()
        .unwrap();
    let request = custody
        .eth()
        .wallet("treasury")
        .send(json!({ "to": "0x01", "value": "10" }))
        .await
        .unwrap();
    assert_eq!(request.id(), "req-42");

    let done = request
        .wait()
        .timeout(Duration::from_secs(5))
        .interval(Duration::from_millis(20))
        .await
        .unwrap();

    assert_eq!(done.process, ProcessState::Completed);
    assert_eq!(done.output.unwrap().hash, "0xfeed");
    submit.assert_async().await;
    status.assert_async().await;
}

#[tokio::test]
async fn test_wait_times_out_on_running_request() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let _status = server
        .mock("GET", "/request/req-slow")
        .with_status(200)
        .with_body(json!({ "process": "running", "status": { "stage": "queued" } }).to_string())
        .create_async()
        .await;

    let custody = Custody::builder(server.url()).build().unwrap();
    let err = custody
        .request("req-slow")
        .unwrap()
        .wait()
        .timeout(Duration::from_millis(300))
        .interval(Duration::from_millis(50))
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert_eq!(err.to_string(), "Timed out waiting for request req-slow");
}
