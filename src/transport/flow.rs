//! # Transfer Flow Control
//!
//! State machine that feeds an assembled buffer through a narrow, ordered,
//! acknowledgment-gated pipe one bounded chunk at a time.
//!
//! ## Why One Chunk In Flight
//!
//! The BLE characteristic underneath is a single acknowledgment-gated pipe:
//! issuing a second write before the first is confirmed corrupts delivery
//! ordering on the target hardware. The session therefore never exposes
//! chunk `i+1` before chunk `i`'s confirmation has been observed.
//!
//! ## State Machine
//!
//! ```text
//!          begin                 confirm (cursor == len)
//! Idle ───────────► Sending ───────────────────────────► Done
//!   ▲                  │ ▲                                 │
//!   │                  │ └── confirm (cursor < len)        │ begin
//!   │                  │                                   ▼
//!   │                  │ fail / bad confirm            (reusable)
//!   │                  ▼
//!   └───────────── Failed (terminal)
//! ```
//!
//! ## Driving a Session
//!
//! The session is purely reactive - it never blocks and never calls the
//! transport itself. [`begin`](TransferSession::begin) and
//! [`confirm`](TransferSession::confirm) each hand back a [`Step`] telling
//! the caller what to do next:
//!
//! ```
//! use candela::transport::flow::{Step, TransferSession};
//!
//! let mut session = TransferSession::new(4)?;
//! let mut step = session.begin((0u8..10).collect())?;
//!
//! while let Step::Write(chunk) = step {
//!     // hand the bytes to the transport, await its confirmation, then:
//!     let _payload = session.chunk_bytes(chunk);
//!     step = session.confirm()?;
//! }
//! assert_eq!(session.cursor(), 10);
//! # Ok::<(), candela::error::TransferError>(())
//! ```
//!
//! The maximum payload size may change between chunks (late MTU
//! negotiation); each next chunk is computed with the *current* value, while
//! a chunk already dispatched keeps the length it was dispatched with.
//!
//! ## Ownership
//!
//! The session's `cursor`/`state` are mutated both by the call that starts a
//! transfer and by confirmation events arriving from the transport's
//! callback context. Callers must serialize access through a single logical
//! owner (one task, or `&mut` through a lock); the driver in
//! [`super::send`] does this by construction.

use crate::error::TransferError;

/// Transfer session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    Sending,
    Done,
    Failed,
}

/// A `{offset, length}` view into the session's buffer.
///
/// Chunks never copy data; [`TransferSession::chunk_bytes`] resolves one to
/// a borrowed slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk {
    pub offset: usize,
    pub length: usize,
}

/// What the caller should do after `begin`/`confirm`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Dispatch this chunk and report back with `confirm` (or `fail`).
    Write(Chunk),
    /// The buffer is fully delivered. Emitted exactly once per transfer.
    Done,
}

/// Chunked transfer session over one assembled buffer.
///
/// Invariants, checked in debug builds:
/// - `0 <= cursor <= buffer.len()`, cursor strictly non-decreasing
/// - `max_payload >= 1`
/// - at most one chunk in flight
#[derive(Debug)]
pub struct TransferSession {
    state: SessionState,
    buffer: Vec<u8>,
    cursor: usize,
    /// Length of the dispatched chunk awaiting confirmation.
    in_flight: Option<usize>,
    max_payload: usize,
}

impl TransferSession {
    /// Create an idle session.
    ///
    /// `max_payload` is the write size to assume until
    /// [`set_max_payload_size`](Self::set_max_payload_size) reports a
    /// negotiated value. Must be at least 1.
    pub fn new(max_payload: usize) -> Result<Self, TransferError> {
        if max_payload == 0 {
            return Err(TransferError::InvalidPayloadSize(0));
        }
        Ok(Self {
            state: SessionState::Idle,
            buffer: Vec::new(),
            cursor: 0,
            in_flight: None,
            max_payload,
        })
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Bytes confirmed delivered so far.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total size of the buffer being transferred.
    pub fn buffer_len(&self) -> usize {
        self.buffer.len()
    }

    /// The payload bound applied to future chunks.
    pub fn max_payload_size(&self) -> usize {
        self.max_payload
    }

    /// Update the payload bound used for future chunk computations.
    ///
    /// A chunk already dispatched and awaiting confirmation keeps the
    /// length it was dispatched with.
    pub fn set_max_payload_size(&mut self, n: usize) -> Result<(), TransferError> {
        if n == 0 {
            return Err(TransferError::InvalidPayloadSize(0));
        }
        self.max_payload = n;
        Ok(())
    }

    /// Start transferring `buffer`.
    ///
    /// Valid only from `Idle` or `Done` (a finished session may be reused
    /// for the next job). Resets the cursor and yields the first chunk of
    /// `min(max_payload, buffer.len())` bytes, or `Done` for an empty
    /// buffer.
    ///
    /// ## Errors
    ///
    /// [`TransferError::AlreadySending`] if a transfer is in progress: the
    /// ack-gated pipe admits one session at a time, and a re-entrant begin
    /// would corrupt its ordering. The running transfer is left untouched.
    /// [`TransferError::SessionFailed`] if the session has failed; failed
    /// sessions are discarded, never restarted.
    pub fn begin(&mut self, buffer: Vec<u8>) -> Result<Step, TransferError> {
        match self.state {
            SessionState::Idle | SessionState::Done => {}
            SessionState::Sending => return Err(TransferError::AlreadySending),
            SessionState::Failed => return Err(TransferError::SessionFailed),
        }

        self.buffer = buffer;
        self.cursor = 0;
        self.in_flight = None;

        if self.buffer.is_empty() {
            self.state = SessionState::Done;
            return Ok(Step::Done);
        }

        self.state = SessionState::Sending;
        Ok(Step::Write(self.dispatch_next()))
    }

    /// Record the outstanding chunk as delivered.
    ///
    /// Advances the cursor by the dispatched length and yields either the
    /// next chunk (computed with the *current* payload bound) or `Done`.
    ///
    /// ## Errors
    ///
    /// A confirmation with no chunk in flight is a duplicate or
    /// out-of-order event from the transport. There is no safe way to
    /// resynchronize the cursor after one, so the session moves to
    /// `Failed` and the caller must start a new session.
    pub fn confirm(&mut self) -> Result<Step, TransferError> {
        let Some(sent) = self.in_flight.take() else {
            self.state = SessionState::Failed;
            return Err(TransferError::UnexpectedConfirmation);
        };
        debug_assert_eq!(self.state, SessionState::Sending);

        self.cursor += sent;
        debug_assert!(self.cursor <= self.buffer.len());

        if self.cursor == self.buffer.len() {
            self.state = SessionState::Done;
            return Ok(Step::Done);
        }

        Ok(Step::Write(self.dispatch_next()))
    }

    /// Record a write failure. The session becomes `Failed`; there is no
    /// automatic retry - the caller must start a new session to resend.
    pub fn fail(&mut self) {
        self.state = SessionState::Failed;
        self.in_flight = None;
    }

    /// Resolve a chunk to its bytes. Borrows; never copies.
    pub fn chunk_bytes(&self, chunk: Chunk) -> &[u8] {
        &self.buffer[chunk.offset..chunk.offset + chunk.length]
    }

    /// Compute and record the next outstanding chunk.
    fn dispatch_next(&mut self) -> Chunk {
        let length = self.max_payload.min(self.buffer.len() - self.cursor);
        self.in_flight = Some(length);
        Chunk {
            offset: self.cursor,
            length,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Drive a session to completion, collecting every chunk length.
    fn run_to_done(session: &mut TransferSession, buffer: Vec<u8>) -> Vec<usize> {
        let mut lengths = Vec::new();
        let mut step = session.begin(buffer).unwrap();
        while let Step::Write(chunk) = step {
            lengths.push(chunk.length);
            step = session.confirm().unwrap();
        }
        lengths
    }

    #[test]
    fn test_rejects_zero_payload_size() {
        assert_eq!(
            TransferSession::new(0).unwrap_err(),
            TransferError::InvalidPayloadSize(0)
        );
        let mut session = TransferSession::new(20).unwrap();
        assert_eq!(
            session.set_max_payload_size(0).unwrap_err(),
            TransferError::InvalidPayloadSize(0)
        );
    }

    #[test]
    fn test_fixed_payload_chunking() {
        // L = 1000, payload 200: exactly 5 chunks of 200, then Done
        let mut session = TransferSession::new(200).unwrap();
        let lengths = run_to_done(&mut session, vec![0u8; 1000]);

        assert_eq!(lengths, vec![200; 5]);
        assert_eq!(session.state(), SessionState::Done);
        assert_eq!(session.cursor(), 1000);
    }

    #[test]
    fn test_done_emitted_exactly_once() {
        let mut session = TransferSession::new(200).unwrap();
        let mut done_count = 0;
        let mut step = session.begin(vec![0u8; 1000]).unwrap();
        loop {
            match step {
                Step::Write(_) => step = session.confirm().unwrap(),
                Step::Done => {
                    done_count += 1;
                    break;
                }
            }
        }
        assert_eq!(done_count, 1);
        // Any further confirmation is rejected, not a second Done
        assert!(session.confirm().is_err());
    }

    #[test]
    fn test_payload_shrink_mid_transfer() {
        // Payload drops from 200 to 50 after the 2nd confirmation
        let mut session = TransferSession::new(200).unwrap();
        let mut lengths = Vec::new();

        let mut step = session.begin(vec![0u8; 1000]).unwrap();
        let mut confirmations = 0;
        while let Step::Write(chunk) = step {
            lengths.push(chunk.length);
            step = session.confirm().unwrap();
            confirmations += 1;
            if confirmations == 2 {
                session.set_max_payload_size(50).unwrap();
            }
        }

        // 200, 200, then the in-flight 3rd chunk was computed before the
        // change took effect, then 50s for the remainder
        assert_eq!(lengths[..2], [200, 200]);
        assert!(lengths[3..].iter().all(|&l| l == 50));
        assert_eq!(lengths.iter().sum::<usize>(), 1000);
    }

    #[test]
    fn test_payload_change_ignores_in_flight_chunk() {
        let mut session = TransferSession::new(200).unwrap();
        let Step::Write(first) = session.begin(vec![0u8; 500]).unwrap() else {
            panic!("non-empty buffer must yield a chunk");
        };
        assert_eq!(first.length, 200);

        // Shrink while the first chunk is outstanding: the cursor still
        // advances by the dispatched 200 bytes
        session.set_max_payload_size(10).unwrap();
        let Step::Write(second) = session.confirm().unwrap() else {
            panic!("transfer not finished");
        };
        assert_eq!(session.cursor(), 200);
        assert_eq!(second, Chunk { offset: 200, length: 10 });
    }

    #[test]
    fn test_short_final_chunk() {
        let mut session = TransferSession::new(64).unwrap();
        let lengths = run_to_done(&mut session, vec![0u8; 150]);
        assert_eq!(lengths, vec![64, 64, 22]);
    }

    #[test]
    fn test_buffer_shorter_than_payload() {
        let mut session = TransferSession::new(512).unwrap();
        let lengths = run_to_done(&mut session, vec![0u8; 7]);
        assert_eq!(lengths, vec![7]);
    }

    #[test]
    fn test_empty_buffer_completes_immediately() {
        let mut session = TransferSession::new(20).unwrap();
        assert_eq!(session.begin(Vec::new()).unwrap(), Step::Done);
        assert_eq!(session.state(), SessionState::Done);
    }

    #[test]
    fn test_begin_rejected_while_sending() {
        let mut session = TransferSession::new(20).unwrap();
        session.begin(vec![0u8; 100]).unwrap();

        let err = session.begin(vec![0u8; 100]).unwrap_err();
        assert_eq!(err, TransferError::AlreadySending);
        // The running transfer is untouched
        assert_eq!(session.state(), SessionState::Sending);
        assert!(session.confirm().is_ok());
    }

    #[test]
    fn test_session_reusable_after_done() {
        let mut session = TransferSession::new(10).unwrap();
        run_to_done(&mut session, vec![0u8; 25]);
        assert_eq!(session.state(), SessionState::Done);

        let lengths = run_to_done(&mut session, vec![0u8; 5]);
        assert_eq!(lengths, vec![5]);
        assert_eq!(session.cursor(), 5);
    }

    #[test]
    fn test_duplicate_confirmation_fails_session() {
        let mut session = TransferSession::new(100).unwrap();
        session.begin(vec![0u8; 100]).unwrap();
        assert_eq!(session.confirm().unwrap(), Step::Done);

        // The transfer is complete; a late duplicate event is a
        // programming error and poisons the session
        assert_eq!(
            session.confirm().unwrap_err(),
            TransferError::UnexpectedConfirmation
        );
        assert_eq!(session.state(), SessionState::Failed);
    }

    #[test]
    fn test_confirmation_before_begin_fails() {
        let mut session = TransferSession::new(100).unwrap();
        assert_eq!(
            session.confirm().unwrap_err(),
            TransferError::UnexpectedConfirmation
        );
        assert_eq!(session.state(), SessionState::Failed);
    }

    #[test]
    fn test_failed_session_is_terminal() {
        let mut session = TransferSession::new(20).unwrap();
        session.begin(vec![0u8; 100]).unwrap();
        session.fail();

        assert_eq!(session.state(), SessionState::Failed);
        assert!(session.begin(vec![0u8; 10]).is_err());
        assert!(session.confirm().is_err());
    }

    #[test]
    fn test_cursor_monotonic_and_bounded() {
        let mut session = TransferSession::new(33).unwrap();
        let mut last_cursor = 0;

        let mut step = session.begin(vec![0u8; 400]).unwrap();
        while let Step::Write(_) = step {
            step = session.confirm().unwrap();
            assert!(session.cursor() >= last_cursor);
            assert!(session.cursor() <= session.buffer_len());
            last_cursor = session.cursor();
        }
        assert_eq!(last_cursor, 400);
    }

    #[test]
    fn test_chunk_bytes_are_views() {
        let data: Vec<u8> = (0..=99).collect();
        let mut session = TransferSession::new(40).unwrap();

        let Step::Write(chunk) = session.begin(data).unwrap() else {
            panic!("expected a chunk");
        };
        assert_eq!(session.chunk_bytes(chunk), (0..=39).collect::<Vec<u8>>());

        let Step::Write(chunk) = session.confirm().unwrap() else {
            panic!("expected a chunk");
        };
        assert_eq!(session.chunk_bytes(chunk), (40..=79).collect::<Vec<u8>>());
    }
}
