//! Transport seam between this crate and the EtherNet/IP session.
//!
//! The session itself (registration, forward open, encapsulation, sockets,
//! timeouts) belongs to the PLC communication client that owns it. This crate
//! only needs to hand it a CIP request and get the raw reply back, which is
//! what the [`Transport`] trait describes.
//!
//! # Design
//!
//! - **Protocol agnostic** - the transport knows about sessions and bytes, not
//!   about attributes or faults
//! - **Synchronous** - `send` blocks until the reply is in
//! - **Status passthrough** - failures carry the transport's own status code,
//!   which ends up verbatim in every [`Response`](crate::Response)
//!
//! [`ScriptedTransport`] replays canned replies and records what was sent; it
//! is useful for testing code built on top of this crate.
//!
//! # Example
//!
//! ```
//! use logix_diag::{ScriptedTransport, Transport};
//!
//! let mut transport = ScriptedTransport::new();
//! transport.push_reply(vec![0xCC, 0x00]);
//!
//! transport.connect(true).unwrap();
//! let reply = transport.send(&[0x03, 0x02], true).unwrap();
//! assert_eq!(reply, vec![0xCC, 0x00]);
//! assert_eq!(transport.sent(), &[vec![0x03u8, 0x02]]);
//! ```

use std::collections::VecDeque;

use crate::error::{CipError, Result};

/// Status reported by [`ScriptedTransport`] when it runs out of replies.
pub const STATUS_CONNECTION_FAILURE: i32 = 0x01;

/// A live EtherNet/IP session able to carry CIP requests.
pub trait Transport {
    /// Ensures the session is open.
    ///
    /// `full_session` asks for a fully open session rather than a bare
    /// registration. Implementations that are already connected return `Ok`.
    ///
    /// # Errors
    ///
    /// Returns `CipError::Transport` carrying the transport's status code.
    fn connect(&mut self, full_session: bool) -> Result<()>;

    /// Sends a CIP request and returns the raw reply frame.
    ///
    /// When `expect_reply` is false the returned buffer may be empty.
    ///
    /// # Errors
    ///
    /// Returns `CipError::Transport` carrying the transport's status code.
    fn send(&mut self, request: &[u8], expect_reply: bool) -> Result<Vec<u8>>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn connect(&mut self, full_session: bool) -> Result<()> {
        (**self).connect(full_session)
    }

    fn send(&mut self, request: &[u8], expect_reply: bool) -> Result<Vec<u8>> {
        (**self).send(request, expect_reply)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn connect(&mut self, full_session: bool) -> Result<()> {
        (**self).connect(full_session)
    }

    fn send(&mut self, request: &[u8], expect_reply: bool) -> Result<Vec<u8>> {
        (**self).send(request, expect_reply)
    }
}

/// In-memory transport that replays queued replies in order.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    replies: VecDeque<Result<Vec<u8>>>,
    connect_error: Option<(i32, String)>,
    sent: Vec<Vec<u8>>,
    connects: Vec<bool>,
}

impl ScriptedTransport {
    /// Creates a transport with no queued replies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful reply.
    pub fn push_reply(&mut self, reply: Vec<u8>) -> &mut Self {
        self.replies.push_back(Ok(reply));
        self
    }

    /// Queues a failed send with the given status.
    pub fn push_failure(&mut self, status: i32, reason: impl Into<String>) -> &mut Self {
        self.replies
            .push_back(Err(CipError::transport(status, reason)));
        self
    }

    /// Makes every `connect` call fail with the given status.
    pub fn fail_connect(&mut self, status: i32, reason: impl Into<String>) -> &mut Self {
        self.connect_error = Some((status, reason.into()));
        self
    }

    /// Returns every request sent so far, oldest first.
    pub fn sent(&self) -> &[Vec<u8>] {
        &self.sent
    }

    /// Returns the `full_session` flag of every `connect` call so far.
    pub fn connects(&self) -> &[bool] {
        &self.connects
    }

    /// Returns the number of replies still queued.
    pub fn pending(&self) -> usize {
        self.replies.len()
    }
}

impl Transport for ScriptedTransport {
    fn connect(&mut self, full_session: bool) -> Result<()> {
        self.connects.push(full_session);
        match &self.connect_error {
            Some((status, reason)) => Err(CipError::transport(*status, reason.clone())),
            None => Ok(()),
        }
    }

    fn send(&mut self, request: &[u8], _expect_reply: bool) -> Result<Vec<u8>> {
        self.sent.push(request.to_vec());
        self.replies.pop_front().unwrap_or_else(|| {
            Err(CipError::transport(
                STATUS_CONNECTION_FAILURE,
                "no scripted reply left",
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replays_in_order() {
        let mut transport = ScriptedTransport::new();
        transport.push_reply(vec![1]).push_reply(vec![2]);

        assert_eq!(transport.send(&[0xA], true).unwrap(), vec![1]);
        assert_eq!(transport.send(&[0xB], true).unwrap(), vec![2]);
        assert_eq!(transport.sent(), &[vec![0xAu8], vec![0xBu8]]);
        assert_eq!(transport.pending(), 0);
    }

    #[test]
    fn test_scripted_failure_status() {
        let mut transport = ScriptedTransport::new();
        transport.push_failure(0x07, "connection lost");

        let err = transport.send(&[0x01], true).unwrap_err();
        assert_eq!(err.status(), 0x07);
    }

    #[test]
    fn test_exhausted_script() {
        let mut transport = ScriptedTransport::new();
        let err = transport.send(&[0x01], true).unwrap_err();
        assert_eq!(err.status(), STATUS_CONNECTION_FAILURE);
    }

    #[test]
    fn test_connect_failure() {
        let mut transport = ScriptedTransport::new();
        transport.fail_connect(0x01, "refused");

        assert!(transport.connect(true).is_err());
        assert_eq!(transport.connects(), &[true]);
    }

    #[test]
    fn test_mut_ref_transport() {
        let mut inner = ScriptedTransport::new();
        inner.push_reply(vec![9]);
        {
            let mut by_ref = &mut inner;
            assert_eq!(Transport::send(&mut by_ref, &[0x01], true).unwrap(), vec![9]);
        }
        assert_eq!(inner.sent().len(), 1);
    }
}
