//! # Printer Transport Layer
//!
//! This module carries assembled print buffers to the device over a narrow,
//! ordered, acknowledgment-gated pipe whose payload bound can change at
//! runtime.
//!
//! ## Structure
//!
//! - [`flow`]: the chunked transfer state machine (pure, no I/O)
//! - [`connection`]: read-only view of the adapter's connection lifecycle
//! - [`Transport`]: the capability trait platform adapters implement
//! - [`send`]: the driver that pumps a session through a transport
//!
//! The encoding/flow-control core is fully platform-neutral: the platform
//! GATT bindings (one per OS Bluetooth stack) are the only non-portable
//! code, and they live behind [`Transport`].

pub mod connection;
pub mod flow;

pub use connection::{ConnectionState, ConnectionWatch, SCAN_WINDOW};
pub use flow::{Chunk, SessionState, Step, TransferSession};

use async_trait::async_trait;

use crate::error::TransferError;

/// One acknowledgment-gated write pipe to a printer.
///
/// For the BLE printers this crate targets, `write` maps to a GATT
/// characteristic write-with-response: the future resolves only when the
/// device has confirmed delivery, and the payload bound is the negotiated
/// MTU minus the ATT header. The bound may change between writes as late
/// negotiation completes.
#[async_trait]
pub trait Transport {
    /// Write one payload, resolving on the device's delivery confirmation.
    async fn write(&mut self, payload: &[u8]) -> Result<(), TransferError>;

    /// Largest byte count acceptable in one write, right now.
    fn max_payload_size(&self) -> usize;
}

/// Drive a transfer session over a transport until the buffer is exhausted.
///
/// Strict one-chunk-in-flight discipline: each chunk is dispatched only
/// after the previous one's confirmation, and each next chunk is sized with
/// the transport's payload bound *as of that moment*. Returns the number of
/// chunks delivered.
///
/// There is no retry: the first write error fails the session and surfaces
/// as-is. The caller decides whether to build a new session and resend.
///
/// ## Example
///
/// ```no_run
/// use candela::transport::{self, TransferSession};
/// # use candela::transport::Transport;
/// # async fn demo(link: &mut dyn Transport, data: Vec<u8>) -> Result<(), candela::CandelaError> {
/// let mut session = TransferSession::new(link.max_payload_size())?;
/// let chunks = transport::send(&mut session, link, data).await?;
/// println!("delivered in {chunks} writes");
/// # Ok(())
/// # }
/// ```
pub async fn send<T>(
    session: &mut TransferSession,
    transport: &mut T,
    buffer: Vec<u8>,
) -> Result<usize, TransferError>
where
    T: Transport + ?Sized,
{
    session.set_max_payload_size(transport.max_payload_size())?;

    let mut chunks = 0usize;
    let mut step = session.begin(buffer)?;

    while let Step::Write(chunk) = step {
        if let Err(err) = transport.write(session.chunk_bytes(chunk)).await {
            session.fail();
            return Err(err);
        }
        chunks += 1;

        // Pick up any MTU renegotiation before sizing the next chunk
        session.set_max_payload_size(transport.max_payload_size())?;
        step = session.confirm()?;
    }

    Ok(chunks)
}

// ============================================================================
// TESTS
// ============================================================================
