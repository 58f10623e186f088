//! CIP reply parsing and the result envelope.
//!
//! Replies are handed over by the transport exactly as they came off the
//! wire, encapsulation header included. The payload is located at a fixed,
//! vendor-specific byte offset rather than by walking the length fields, so
//! a firmware that frames its replies differently will be misparsed. See
//! [`ClientConfig`](crate::ClientConfig) for overriding the offsets.
//!
//! # Example
//!
//! ```
//! use logix_diag::{decode_text, extract_attribute_payload};
//!
//! let mut reply = vec![0u8; 54];
//! reply.extend_from_slice(b"MainTask");
//!
//! let payload = extract_attribute_payload(&reply, 54).unwrap();
//! assert_eq!(decode_text(payload).unwrap(), "MainTask");
//! ```

use crate::error::{CipError, Result};

/// Returns the part of `reply` starting at `offset`.
///
/// # Errors
///
/// Returns `CipError::ShortReply` if `offset` lies beyond the end of the reply.
///
/// # Example
///
/// ```
/// use logix_diag::extract_attribute_payload;
///
/// let reply = [0xAA, 0xBB, 0xCC];
/// assert_eq!(extract_attribute_payload(&reply, 1).unwrap(), &[0xBB, 0xCC]);
/// assert!(extract_attribute_payload(&reply, 3).unwrap().is_empty());
/// assert!(extract_attribute_payload(&reply, 4).is_err());
/// ```
pub fn extract_attribute_payload(reply: &[u8], offset: usize) -> Result<&[u8]> {
    reply
        .get(offset..)
        .ok_or_else(|| CipError::short_reply(offset, reply.len()))
}

/// Decodes a payload as UTF-8 text.
///
/// The whole payload is taken as the string; no length prefix is read and
/// nothing is trimmed.
///
/// # Errors
///
/// Returns `CipError::Decode` if the bytes are not valid UTF-8.
pub fn decode_text(payload: &[u8]) -> Result<String> {
    String::from_utf8(payload.to_vec())
        .map_err(|e| CipError::decode(format!("payload is not valid UTF-8: {}", e)))
}

/// Decodes the first four payload bytes as a little-endian `u32`.
///
/// # Errors
///
/// Returns `CipError::Decode` if fewer than four bytes are available.
///
/// # Example
///
/// ```
/// use logix_diag::decode_u32_le;
///
/// assert_eq!(decode_u32_le(&[0x07, 0x00, 0x00, 0x00]).unwrap(), 7);
/// assert!(decode_u32_le(&[0x07, 0x00]).is_err());
/// ```
pub fn decode_u32_le(payload: &[u8]) -> Result<u32> {
    match payload.get(..4) {
        Some(&[b0, b1, b2, b3]) => Ok(u32::from_le_bytes([b0, b1, b2, b3])),
        _ => Err(CipError::decode(format!(
            "expected 4 bytes for u32, got {}",
            payload.len()
        ))),
    }
}

/// Reads a little-endian `u16` at `offset`.
pub(crate) fn read_u16_le(data: &[u8], offset: usize) -> Result<u16> {
    match data.get(offset..offset + 2) {
        Some(&[lo, hi]) => Ok(u16::from_le_bytes([lo, hi])),
        _ => Err(CipError::short_reply(offset + 2, data.len())),
    }
}

/// Result envelope handed to the command dispatcher.
///
/// Carries an optional name, the value on success, and a status code. A
/// status of 0 means success; any other value is the lower layer's status,
/// passed through untouched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Response<T> {
    /// Name of what was read, if any.
    pub name: Option<String>,
    /// Value read, absent on failure.
    pub value: Option<T>,
    /// Status code (0 = success).
    pub status: i32,
}

impl<T> Response<T> {
    /// Builds an envelope from an operation result.
    ///
    /// # Example
    ///
    /// ```
    /// use logix_diag::{CipError, Response};
    ///
    /// let ok = Response::from_result(Some("TaskName"), Ok::<_, CipError>("Main".to_string()));
    /// assert_eq!(ok.status, 0);
    /// assert_eq!(ok.value.as_deref(), Some("Main"));
    ///
    /// let failed = Response::<String>::from_result(None::<String>, Err(CipError::transport(1, "refused")));
    /// assert_eq!(failed.status, 1);
    /// assert!(failed.value.is_none());
    /// ```
    pub fn from_result(name: Option<impl Into<String>>, result: Result<T>) -> Self {
        let name = name.map(Into::into);
        match result {
            Ok(value) => Self {
                name,
                value: Some(value),
                status: 0,
            },
            Err(e) => Self {
                name,
                value: None,
                status: e.status(),
            },
        }
    }

    /// Returns whether the envelope carries a value.
    pub fn is_success(&self) -> bool {
        self.status == 0 && self.value.is_some()
    }
}

impl<T> From<Result<T>> for Response<T> {
    fn from(result: Result<T>) -> Self {
        Self::from_result(None::<String>, result)
    }
}

impl<T: std::fmt::Display> std::fmt::Display for Response<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Response(Name=")?;
        match &self.name {
            Some(name) => write!(f, "{}", name)?,
            None => write!(f, "None")?,
        }
        write!(f, ", Value=")?;
        match &self.value {
            Some(value) => write!(f, "{}", value)?,
            None => write!(f, "None")?,
        }
        write!(
            f,
            ", Status={})",
            crate::error::cip_status_description(self.status)
        )
    }
}
