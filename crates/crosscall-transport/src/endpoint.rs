// crates/crosscall-transport/src/endpoint.rs
// ============================================================================
// Module: Crosscall Reply Endpoints
// Description: Binder seam and in-process reference implementation.
// Purpose: Bind reply-capable endpoints the remote side connects back to.
// Dependencies: async-trait, tokio, url, crate::error
// ============================================================================

//! ## Overview
//! The broker topology is inverted for runtime calls: the caller binds a
//! reply endpoint at a caller-supplied address and the remote service
//! connects back to deliver exactly one reply frame. [`ChannelBinder`] is
//! the in-process reference implementation over tokio channels; production
//! deployments substitute their broker binding behind the same traits.
//! Invariants:
//! - One endpoint per address; a second bind fails until the first is
//!   dropped.
//! - Dropping an endpoint releases its address on every exit path.
//! - Messages queued before the peer connects are retained, matching
//!   bind-then-send broker semantics.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;

use async_trait::async_trait;
use tokio::sync::mpsc;
use url::Url;

use crate::error::EndpointError;

// ============================================================================
// SECTION: Frame Types
// ============================================================================

/// Ordered frames composing one request message.
pub type FrameBatch = Vec<Vec<u8>>;

// ============================================================================
// SECTION: Endpoint Traits
// ============================================================================

/// Reply-capable endpoint bound for the duration of one call.
#[async_trait]
pub trait ReplyEndpoint: Send {
    /// Sends the request frames toward the remote service.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::Send`] when the frames cannot be queued.
    async fn send(&mut self, frames: FrameBatch) -> Result<(), EndpointError>;

    /// Receives the single reply frame.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::Receive`] when the reply channel closes
    /// before a frame arrives.
    async fn recv(&mut self) -> Result<Vec<u8>, EndpointError>;

    /// Returns the bound address.
    fn address(&self) -> &str;
}

/// Binds reply endpoints at caller-supplied addresses.
pub trait ReplyBinder: Send + Sync {
    /// Binds a reply endpoint at the address.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::InvalidAddress`] for unparseable addresses
    /// and [`EndpointError::AddressInUse`] for double binds.
    fn bind(&self, address: &str) -> Result<Box<dyn ReplyEndpoint>, EndpointError>;
}

// ============================================================================
// SECTION: In-Process Binder
// ============================================================================

/// Service-side binding slot held until a peer connects.
///
/// # Invariants
/// - `pending` is `Some` from bind until the first connect.
struct BindingSlot {
    /// Service-side channel half awaiting a connect.
    pending: Option<ServiceChannel>,
}

/// Address registry shared by a binder and its bound endpoints.
type Registry = Arc<Mutex<BTreeMap<String, BindingSlot>>>;

/// In-process reference binder over tokio channels.
///
/// # Invariants
/// - Addresses are unique within one binder instance.
/// - Cloned binders share one registry.
#[derive(Clone, Default)]
pub struct ChannelBinder {
    /// Binding registry keyed by address.
    registry: Registry,
}

impl ChannelBinder {
    /// Creates an empty binder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects to a bound address, yielding the service-side channel half.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::NotBound`] when no endpoint is bound at the
    /// address and [`EndpointError::AlreadyConnected`] when the service
    /// half was already taken.
    pub fn connect(&self, address: &str) -> Result<ServiceChannel, EndpointError> {
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = registry.get_mut(address).ok_or_else(|| EndpointError::NotBound {
            address: address.to_string(),
        })?;
        slot.pending.take().ok_or_else(|| EndpointError::AlreadyConnected {
            address: address.to_string(),
        })
    }
}

impl ReplyBinder for ChannelBinder {
    fn bind(&self, address: &str) -> Result<Box<dyn ReplyEndpoint>, EndpointError> {
        Url::parse(address).map_err(|err| EndpointError::InvalidAddress {
            address: address.to_string(),
            reason: err.to_string(),
        })?;
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        if registry.contains_key(address) {
            return Err(EndpointError::AddressInUse {
                address: address.to_string(),
            });
        }
        let (request_tx, request_rx) = mpsc::unbounded_channel();
        let (reply_tx, reply_rx) = mpsc::unbounded_channel();
        registry.insert(address.to_string(), BindingSlot {
            pending: Some(ServiceChannel {
                address: address.to_string(),
                request_rx,
                reply_tx,
            }),
        });
        Ok(Box::new(ChannelEndpoint {
            address: address.to_string(),
            registry: Arc::clone(&self.registry),
            request_tx,
            reply_rx,
        }))
    }
}

// ============================================================================
// SECTION: Bound Endpoint
// ============================================================================

/// Caller-side endpoint bound at one address.
///
/// # Invariants
/// - Releases its registry entry on drop, on every exit path.
struct ChannelEndpoint {
    /// Bound address.
    address: String,
    /// Shared binding registry for drop-time release.
    registry: Registry,
    /// Request frames toward the service side.
    request_tx: mpsc::UnboundedSender<FrameBatch>,
    /// Reply frames from the service side.
    reply_rx: mpsc::UnboundedReceiver<Vec<u8>>,
}

#[async_trait]
impl ReplyEndpoint for ChannelEndpoint {
    async fn send(&mut self, frames: FrameBatch) -> Result<(), EndpointError> {
        self.request_tx
            .send(frames)
            .map_err(|_| EndpointError::Send("service side disconnected".to_string()))
    }

    async fn recv(&mut self) -> Result<Vec<u8>, EndpointError> {
        self.reply_rx
            .recv()
            .await
            .ok_or_else(|| EndpointError::Receive("reply channel closed".to_string()))
    }

    fn address(&self) -> &str {
        &self.address
    }
}

impl Drop for ChannelEndpoint {
    fn drop(&mut self) {
        let mut registry = self.registry.lock().unwrap_or_else(PoisonError::into_inner);
        registry.remove(&self.address);
    }
}

// ============================================================================
// SECTION: Service Channel
// ============================================================================

/// Service-side channel half used to receive a request and reply once.
///
/// # Invariants
/// - Valid only while the caller endpoint stays bound; operations fail once
///   the endpoint is released.
pub struct ServiceChannel {
    /// Address the peer endpoint was bound at.
    address: String,
    /// Request frames from the caller side.
    request_rx: mpsc::UnboundedReceiver<FrameBatch>,
    /// Reply frames toward the caller side.
    reply_tx: mpsc::UnboundedSender<Vec<u8>>,
}

impl ServiceChannel {
    /// Returns the address the peer endpoint was bound at.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Receives the next request frame batch.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::Receive`] once the caller endpoint is
    /// released and the queue is drained.
    pub async fn recv_request(&mut self) -> Result<FrameBatch, EndpointError> {
        self.request_rx
            .recv()
            .await
            .ok_or_else(|| EndpointError::Receive("caller endpoint released".to_string()))
    }

    /// Sends the single reply frame toward the caller.
    ///
    /// # Errors
    ///
    /// Returns [`EndpointError::Send`] once the caller endpoint is
    /// released; a late reply is discarded, never delivered.
    pub fn send_reply(&self, frame: Vec<u8>) -> Result<(), EndpointError> {
        self.reply_tx
            .send(frame)
            .map_err(|_| EndpointError::Send("caller endpoint released".to_string()))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
