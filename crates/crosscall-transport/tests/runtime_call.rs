// crates/crosscall-transport/tests/runtime_call.rs
// ============================================================================
// Module: Runtime Call Tests
// Description: Tests for the synchronous call protocol over the in-process binder.
// Purpose: Exercise reply, timeout, discard, and resource release paths.
// Dependencies: crosscall-transport, serde_json, tokio
// ============================================================================
//! ## Overview
//! Validates the single-round-trip call protocol: envelope framing, the
//! reply-versus-timeout race, exactly-once outcome delivery, and endpoint
//! release on every exit path.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::sync::Arc;
use std::sync::Mutex;
use std::time::Duration;

use crosscall_transport::ActionIdentity;
use crosscall_transport::CalleeTarget;
use crosscall_transport::CallingAction;
use crosscall_transport::ChannelBinder;
use crosscall_transport::MsgpackCodec;
use crosscall_transport::PROTOCOL_VERSION;
use crosscall_transport::ReplyOutcome;
use crosscall_transport::RuntimeCall;
use crosscall_transport::RuntimeCallError;
use crosscall_transport::ServiceChannel;
use serde_json::Value;
use serde_json::json;

/// Calling action stub recording every delivered outcome.
#[derive(Clone)]
struct RecordingAction {
    outcomes: Arc<Mutex<Vec<ReplyOutcome>>>,
}

impl RecordingAction {
    fn new() -> Self {
        Self {
            outcomes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn outcomes(&self) -> Vec<ReplyOutcome> {
        self.outcomes.lock().expect("outcomes lock").clone()
    }
}

impl CallingAction for RecordingAction {
    fn identity(&self) -> ActionIdentity {
        ActionIdentity::new("frontend", "1.0.0", "render")
    }

    fn transport_snapshot(&self) -> Value {
        json!({"request_id": "r-1"})
    }

    fn process_reply(&self, outcome: ReplyOutcome) {
        self.outcomes.lock().expect("outcomes lock").push(outcome);
    }
}

/// Connects to the address, retrying until the caller has bound it.
async fn connect_with_retry(binder: &ChannelBinder, address: &str) -> ServiceChannel {
    loop {
        match binder.connect(address) {
            Ok(channel) => return channel,
            Err(_) => tokio::time::sleep(Duration::from_millis(2)).await,
        }
    }
}

#[tokio::test]
async fn reply_before_timeout_is_delivered_exactly_once() {
    let binder = ChannelBinder::new();
    let transport = RuntimeCall::new(binder.clone(), MsgpackCodec);
    let action = RecordingAction::new();
    let address = "channel://call-reply";

    let peer = tokio::spawn({
        let binder = binder.clone();
        async move {
            let mut service = connect_with_retry(&binder, address).await;
            let frames = service.recv_request().await.expect("request frames");
            assert_eq!(frames[0], vec![PROTOCOL_VERSION]);
            let envelope: Value = rmp_serde::from_slice(&frames[1]).expect("envelope");
            assert_eq!(envelope["command"]["name"], json!("runtime-call"));
            assert_eq!(
                envelope["command"]["arguments"]["callee"],
                json!(["users", "2.1", "read"])
            );
            assert_eq!(
                envelope["command"]["arguments"]["transport"],
                json!({"request_id": "r-1"})
            );
            let reply = rmp_serde::to_vec(&json!({"result": {"id": 7}})).expect("reply bytes");
            service.send_reply(reply).expect("reply send");
        }
    });

    transport
        .call(
            &action,
            &CalleeTarget::new("users", "2.1", "read"),
            address,
            vec![json!({"name": "id", "value": 7})],
            vec![],
            Duration::from_millis(500),
        )
        .await
        .expect("call");
    peer.await.expect("peer task");

    // Past the original window; a cancelled timer must not add an outcome.
    tokio::time::sleep(Duration::from_millis(550)).await;
    let outcomes = action.outcomes();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(outcomes[0], ReplyOutcome::Reply(json!({"result": {"id": 7}})));
}

#[tokio::test]
async fn missing_reply_reports_a_timeout_naming_the_callee() {
    let binder = ChannelBinder::new();
    let transport = RuntimeCall::new(binder, MsgpackCodec);
    let action = RecordingAction::new();

    transport
        .call(
            &action,
            &CalleeTarget::new("users", "2.1", "read"),
            "channel://call-timeout",
            vec![],
            vec![],
            Duration::from_millis(50),
        )
        .await
        .expect("call completes with a delivered outcome");

    let outcomes = action.outcomes();
    assert_eq!(outcomes.len(), 1);
    assert_eq!(
        outcomes[0],
        ReplyOutcome::Failure(RuntimeCallError::Timeout {
            service: "users".to_string(),
            version: "2.1".to_string(),
            action: "read".to_string(),
            timeout_ms: 50,
        })
    );
}

#[tokio::test]
async fn late_reply_after_timeout_is_discarded() {
    let binder = ChannelBinder::new();
    let transport = RuntimeCall::new(binder.clone(), MsgpackCodec);
    let action = RecordingAction::new();
    let address = "channel://call-late";

    let peer = tokio::spawn({
        let binder = binder.clone();
        async move {
            let mut service = connect_with_retry(&binder, address).await;
            let _frames = service.recv_request().await.expect("request frames");
            tokio::time::sleep(Duration::from_millis(150)).await;
            let reply = rmp_serde::to_vec(&json!({"late": true})).expect("reply bytes");
            service.send_reply(reply)
        }
    });

    transport
        .call(
            &action,
            &CalleeTarget::new("users", "2.1", "read"),
            address,
            vec![],
            vec![],
            Duration::from_millis(50),
        )
        .await
        .expect("call completes with a delivered outcome");

    let late_send = peer.await.expect("peer task");
    assert!(late_send.is_err(), "late reply must be discarded, not delivered");
    let outcomes = action.outcomes();
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(
        outcomes[0],
        ReplyOutcome::Failure(RuntimeCallError::Timeout { .. })
    ));
}

#[tokio::test]
async fn undecodable_reply_is_delivered_as_a_failure() {
    let binder = ChannelBinder::new();
    let transport = RuntimeCall::new(binder.clone(), MsgpackCodec);
    let action = RecordingAction::new();
    let address = "channel://call-garbage";

    let peer = tokio::spawn({
        let binder = binder.clone();
        async move {
            let mut service = connect_with_retry(&binder, address).await;
            let _frames = service.recv_request().await.expect("request frames");
            service.send_reply(vec![0xc1]).expect("reply send");
        }
    });

    transport
        .call(
            &action,
            &CalleeTarget::new("users", "2.1", "read"),
            address,
            vec![],
            vec![],
            Duration::from_millis(500),
        )
        .await
        .expect("call completes with a delivered outcome");
    peer.await.expect("peer task");

    let outcomes = action.outcomes();
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(
        outcomes[0],
        ReplyOutcome::Failure(RuntimeCallError::Codec(_))
    ));
}

#[tokio::test]
async fn overlapping_calls_on_one_instance_are_refused() {
    let binder = ChannelBinder::new();
    let transport = Arc::new(RuntimeCall::new(binder, MsgpackCodec));
    let action = RecordingAction::new();

    let first = tokio::spawn({
        let transport = Arc::clone(&transport);
        let action = action.clone();
        async move {
            transport
                .call(
                    &action,
                    &CalleeTarget::new("users", "2.1", "read"),
                    "channel://slot-a",
                    vec![],
                    vec![],
                    Duration::from_millis(200),
                )
                .await
        }
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    let second = transport
        .call(
            &action,
            &CalleeTarget::new("users", "2.1", "read"),
            "channel://slot-b",
            vec![],
            vec![],
            Duration::from_millis(200),
        )
        .await;
    assert_eq!(second, Err(RuntimeCallError::InFlight));

    first.await.expect("first call task").expect("first call outcome");
    assert_eq!(action.outcomes().len(), 1);
}

#[tokio::test]
async fn address_is_reusable_after_either_outcome() {
    let binder = ChannelBinder::new();
    let transport = RuntimeCall::new(binder.clone(), MsgpackCodec);
    let action = RecordingAction::new();
    let address = "channel://call-reuse";

    transport
        .call(
            &action,
            &CalleeTarget::new("users", "2.1", "read"),
            address,
            vec![],
            vec![],
            Duration::from_millis(30),
        )
        .await
        .expect("first call");

    let peer = tokio::spawn({
        let binder = binder.clone();
        async move {
            let mut service = connect_with_retry(&binder, address).await;
            let _frames = service.recv_request().await.expect("request frames");
            let reply = rmp_serde::to_vec(&json!({"ok": true})).expect("reply bytes");
            service.send_reply(reply).expect("reply send");
        }
    });

    transport
        .call(
            &action,
            &CalleeTarget::new("users", "2.1", "read"),
            address,
            vec![],
            vec![],
            Duration::from_millis(500),
        )
        .await
        .expect("second call on the same address");
    peer.await.expect("peer task");

    let outcomes = action.outcomes();
    assert_eq!(outcomes.len(), 2);
    assert!(matches!(outcomes[0], ReplyOutcome::Failure(RuntimeCallError::Timeout { .. })));
    assert_eq!(outcomes[1], ReplyOutcome::Reply(json!({"ok": true})));
}
