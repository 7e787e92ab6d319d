//! Pending-count lifecycle tests with a gated mock transport
//!
//! The transport below blocks each exchange on a semaphore permit, so tests
//! control exactly when calls settle and can observe the counter while
//! requests are genuinely in flight.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use ayuskey::http::{RequestInit, StatusCode, Transport, TransportReply};
use ayuskey::{Auth, Client, Error};
use serde_json::{Value, json};
use tokio::sync::{Mutex, Semaphore};

#[derive(Debug)]
struct GatedTransport {
    gate: Semaphore,
    replies: Mutex<VecDeque<ayuskey::Result<TransportReply>>>,
}

impl GatedTransport {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            gate: Semaphore::new(0),
            replies: Mutex::new(VecDeque::new()),
        })
    }

    async fn push(&self, reply: ayuskey::Result<TransportReply>) {
        self.replies.lock().await.push_back(reply);
    }

    fn release(&self, calls: usize) {
        self.gate.add_permits(calls);
    }
}

#[async_trait]
impl Transport for GatedTransport {
    async fn fetch(&self, _url: &str, _init: RequestInit) -> ayuskey::Result<TransportReply> {
        self.gate.acquire().await.expect("gate closed").forget();
        self.replies
            .lock()
            .await
            .pop_front()
            .expect("no reply queued for this call")
    }
}

fn gated_client(transport: Arc<GatedTransport>) -> Client {
    Client::builder()
        .origin("https://example.tld")
        .token("K")
        .transport(transport)
        .build()
        .unwrap()
}

fn ok_reply(body: Value) -> ayuskey::Result<TransportReply> {
    Ok(TransportReply::new(
        StatusCode::OK,
        serde_json::to_vec(&body).unwrap(),
    ))
}

#[tokio::test]
async fn counter_peaks_at_three_and_returns_to_zero_across_mixed_outcomes() {
    let transport = GatedTransport::new();
    let client = gated_client(transport.clone());

    transport.push(ok_reply(json!({"ok": 1}))).await;
    transport
        .push(Ok(TransportReply::new(
            StatusCode::BAD_REQUEST,
            serde_json::to_vec(&json!({
                "error": {"id": "x", "code": "INVALID", "message": "bad", "kind": "client", "info": {}}
            }))
            .unwrap(),
        )))
        .await;
    transport
        .push(Err(Error::Connection("refused".into())))
        .await;

    // entry happens in the synchronous prefix, before any await
    let first = client.request_raw("a", json!({}), Auth::Inherit);
    let second = client.request_raw("b", json!({}), Auth::Inherit);
    let third = client.request_raw("c", json!({}), Auth::Inherit);
    assert_eq!(client.pending_requests(), 3);

    transport.release(3);
    let (first, second, third) = tokio::join!(first, second, third);

    assert!(first.is_ok());
    let second = second.unwrap_err();
    assert!(second.is_api_error());
    assert_eq!(second.as_api_error().unwrap().code, "INVALID");
    let third = third.unwrap_err();
    assert!(!third.is_api_error());
    assert!(matches!(third, Error::Connection(_)));

    assert_eq!(client.pending_requests(), 0);
}

#[tokio::test]
async fn custom_transport_failure_propagates_unchanged() {
    let transport = GatedTransport::new();
    let client = gated_client(transport.clone());

    transport
        .push(Err(Error::Other(anyhow::anyhow!("boom"))))
        .await;
    transport.release(1);

    let err = client
        .request_raw("anything", json!({}), Auth::Inherit)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Other(_)));
    assert!(err.to_string().contains("boom"));
    assert!(!err.is_api_error());
    assert_eq!(client.pending_requests(), 0);
}

#[tokio::test]
async fn dropping_an_unpolled_call_still_settles_the_counter() {
    let transport = GatedTransport::new();
    let client = gated_client(transport);

    let call = client.request_raw("a", json!({}), Auth::Inherit);
    assert_eq!(client.pending_requests(), 1);

    drop(call);
    assert_eq!(client.pending_requests(), 0);
}

#[tokio::test]
async fn dropping_an_in_flight_call_still_settles_the_counter() {
    let transport = GatedTransport::new();
    let client = gated_client(transport.clone());
    transport.push(ok_reply(json!({}))).await;

    let handle = tokio::spawn({
        let client = client.clone();
        async move { client.request_raw("a", json!({}), Auth::Inherit).await }
    });

    // wait for the call to reach the gate, then abandon it
    while client.pending_requests() == 0 {
        tokio::task::yield_now().await;
    }
    handle.abort();
    let _ = handle.await;

    assert_eq!(client.pending_requests(), 0);
}

#[tokio::test]
async fn serialization_failure_still_settles_the_counter() {
    let transport = GatedTransport::new();
    let client = gated_client(transport);

    // non-object params are rejected before touching the wire
    let err = client
        .request_raw("a", json!("not an object"), Auth::Inherit)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::InvalidRequest(_)));
    assert_eq!(client.pending_requests(), 0);
}
