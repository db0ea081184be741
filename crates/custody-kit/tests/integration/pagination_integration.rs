//! Pagination over real HTTP.

use custody_kit::*;
use mockito::Matcher;
use serde_json::json;

use crate::init_tracing;

fn tx(hash: &str) -> serde_json::Value {
    json!({
        "hash": hash,
        "links": [{ "type": "GET", "rel": "transaction", "href": format!("/eth/transaction/{hash}") }]
    })
}

// =============================================================================
// Item iteration
// =============================================================================

#[tokio::test]
async fn test_two_page_transaction_search() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let next = format!("{}/eth/transactions/cursor/2", server.url());

    let first = server
        .mock("GET", "/eth/transactions")
        .match_query(Matcher::UrlEncoded("limit".into(), "2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "hits": { "total": 4 },
                "list": [tx("0x0a"), tx("0x0b")],
                "links": { "next": next, "previous": null }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/eth/transactions/cursor/2")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "hits": { "total": 4 },
                "list": [tx("0x0c"), tx("0x0d")],
                "links": { "next": null, "previous": "eth/transactions" }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let custody = Custody::builder(server.url()).build().unwrap();
    let mut items = custody.eth().transactions().limit(2).items();

    assert_eq!(items.hits().await.unwrap().total, 4);
    let hashes: Vec<String> = items
        .try_collect_all()
        .await
        .unwrap()
        .iter()
        .map(|t| t.hash().to_string())
        .collect();

    assert_eq!(hashes, vec!["0x0a", "0x0b", "0x0c", "0x0d"]);
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_monitor_items_resolve_wallet_from_links() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let list = server
        .mock("GET", "/api/eth/wallet/ops/monitors")
        .with_status(200)
        .with_body(
            json!({
                "hits": { "total": 1 },
                "list": [{
                    "monitor": "m1",
                    "links": [{ "type": "GET", "rel": "monitor", "href": "/eth/wallet/ops/monitor/m1" }]
                }],
                "links": { "next": null, "previous": null }
            })
            .to_string(),
        )
        .create_async()
        .await;
    let detail = server
        .mock("GET", "/api/eth/wallet/ops/monitor/m1")
        .with_status(200)
        .with_body(json!({ "id": "m1", "active": true }).to_string())
        .create_async()
        .await;

    let custody = Custody::builder(format!("{}/api", server.url()))
        .build()
        .unwrap();
    let monitors = custody
        .eth()
        .wallet("ops")
        .monitors()
        .items()
        .try_collect_all()
        .await
        .unwrap();

    assert_eq!(monitors.len(), 1);
    assert_eq!(monitors[0].wallet(), "ops");
    assert_eq!(monitors[0].get().await.unwrap()["active"], true);
    list.assert_async().await;
    detail.assert_async().await;
}

// =============================================================================
// Page iteration
// =============================================================================

#[tokio::test]
async fn test_pages_forward_then_back() {
    init_tracing();
    let mut server = mockito::Server::new_async().await;
    let wallet = |name: &str| {
        json!({
            "name": name,
            "links": [{ "type": "GET", "rel": "wallet", "href": format!("/btc/wallet/{name}") }]
        })
    };
    let first = server
        .mock("GET", "/btc/wallets")
        .with_status(200)
        .with_body(
            json!({
                "hits": { "total": 3 },
                "list": [wallet("cold"), wallet("hot")],
                "links": { "next": "btc/wallets/cursor/2", "previous": null }
            })
            .to_string(),
        )
        .expect(2)
        .create_async()
        .await;
    let second = server
        .mock("GET", "/btc/wallets/cursor/2")
        .with_status(200)
        .with_body(
            json!({
                "hits": { "total": 3 },
                "list": [wallet("vault")],
                "links": { "next": null, "previous": "btc/wallets" }
            })
            .to_string(),
        )
        .expect(1)
        .create_async()
        .await;

    let custody = Custody::builder(server.url()).build().unwrap();
    let mut pages = custody.btc().wallets().pages();

    assert_eq!(pages.next().await.unwrap().unwrap().len(), 2);
    let last = pages.next().await.unwrap().unwrap();
    assert_eq!(last.list[0].name(), "vault");
    assert!(pages.next().await.unwrap().is_none());

    let back = pages.previous().await.unwrap().unwrap();
    assert_eq!(back.list[1].name(), "hot");

    first.assert_async().await;
    second.assert_async().await;
}
