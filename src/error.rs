//! Error types for the CIP extension layer.

use thiserror::Error;

/// Result type alias for CIP operations.
pub type Result<T> = std::result::Result<T, CipError>;

/// CIP general status "Not enough data", reported for short replies.
pub const STATUS_NOT_ENOUGH_DATA: i32 = 0x13;

/// CIP general status "Invalid attribute value", reported for decode failures.
pub const STATUS_INVALID_ATTRIBUTE_VALUE: i32 = 0x09;

/// CIP general status "Invalid parameter", reported for out-of-range identifiers.
pub const STATUS_INVALID_PARAMETER: i32 = 0x20;

/// Errors that can occur while querying controller attributes.
#[derive(Debug, Error)]
pub enum CipError {
    /// The transport could not connect or the send failed.
    ///
    /// The status is the transport's own code and is passed through unchanged.
    #[error("Transport failure (status {status}): {reason}")]
    Transport {
        /// Status code reported by the transport.
        status: i32,
        /// Description of the failure.
        reason: String,
    },

    /// The reply ended before the expected payload offset.
    #[error("Short reply: offset {offset} exceeds reply length {len}")]
    ShortReply {
        /// Offset the payload was expected at.
        offset: usize,
        /// Actual reply length.
        len: usize,
    },

    /// The payload could not be decoded as the expected type.
    #[error("Decode error: {reason}")]
    Decode {
        /// Description of the decode failure.
        reason: String,
    },

    /// Invalid parameter provided.
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// Name of the invalid parameter.
        parameter: String,
        /// Description of why the parameter is invalid.
        reason: String,
    },
}

impl CipError {
    /// Creates a new `Transport` error.
    ///
    /// # Example
    ///
    /// ```
    /// use logix_diag::CipError;
    ///
    /// let err = CipError::transport(1, "connection refused");
    /// assert_eq!(err.status(), 1);
    /// ```
    pub fn transport(status: i32, reason: impl Into<String>) -> Self {
        Self::Transport {
            status,
            reason: reason.into(),
        }
    }

    /// Creates a new `ShortReply` error.
    pub fn short_reply(offset: usize, len: usize) -> Self {
        Self::ShortReply { offset, len }
    }

    /// Creates a new `Decode` error.
    ///
    /// # Example
    ///
    /// ```
    /// use logix_diag::CipError;
    ///
    /// let err = CipError::decode("payload is not valid UTF-8");
    /// ```
    pub fn decode(reason: impl Into<String>) -> Self {
        Self::Decode {
            reason: reason.into(),
        }
    }

    /// Creates a new `InvalidParameter` error.
    pub fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Returns the status code this error is reported with in a [`Response`](crate::Response).
    ///
    /// Transport errors keep the transport's status verbatim. Errors detected
    /// locally map to the CIP general status that describes them.
    ///
    /// # Example
    ///
    /// ```
    /// use logix_diag::CipError;
    ///
    /// assert_eq!(CipError::transport(7, "lost").status(), 7);
    /// assert_eq!(CipError::short_reply(54, 10).status(), 0x13);
    /// ```
    pub fn status(&self) -> i32 {
        match self {
            CipError::Transport { status, .. } => *status,
            CipError::ShortReply { .. } => STATUS_NOT_ENOUGH_DATA,
            CipError::Decode { .. } => STATUS_INVALID_ATTRIBUTE_VALUE,
            CipError::InvalidParameter { .. } => STATUS_INVALID_PARAMETER,
        }
    }
}

/// Returns a human-readable description of a CIP general status code.
///
/// # Example
///
/// ```
/// use logix_diag::cip_status_description;
///
/// assert_eq!(cip_status_description(0x00), "Success");
/// assert_eq!(cip_status_description(0x13), "Not enough data");
/// ```
pub fn cip_status_description(status: i32) -> String {
    let text = match status {
        0x00 => "Success",
        0x01 => "Connection failure",
        0x02 => "Resource unavailable",
        0x03 => "Invalid parameter value",
        0x04 => "Path segment error",
        0x05 => "Path destination unknown",
        0x06 => "Partial transfer",
        0x07 => "Connection lost",
        0x08 => "Service not supported",
        0x09 => "Invalid attribute value",
        0x0A => "Attribute list error",
        0x0B => "Already in requested mode/state",
        0x0C => "Object state conflict",
        0x0D => "Object already exists",
        0x0E => "Attribute not settable",
        0x0F => "Privilege violation",
        0x10 => "Device state conflict",
        0x11 => "Reply data too large",
        0x12 => "Fragmentation of a primitive value",
        0x13 => "Not enough data",
        0x14 => "Attribute not supported",
        0x15 => "Too much data",
        0x16 => "Object does not exist",
        0x17 => "Service fragmentation sequence not in progress",
        0x18 => "No stored attribute data",
        0x19 => "Store operation failure",
        0x1A => "Routing failure, request packet too large",
        0x1B => "Routing failure, response packet too large",
        0x1C => "Missing attribute list entry data",
        0x1D => "Invalid attribute value list",
        0x1E => "Embedded service error",
        0x1F => "Vendor specific error",
        0x20 => "Invalid parameter",
        0x21 => "Write-once value or medium already written",
        0x22 => "Invalid reply received",
        0x23 => "Buffer overflow",
        0x24 => "Invalid message format",
        0x25 => "Key failure in path",
        0x26 => "Path size invalid",
        0x27 => "Unexpected attribute in list",
        0x28 => "Invalid member ID",
        0x29 => "Member not settable",
        0x2A => "Group 2 only server general failure",
        0x2B => "Unknown Modbus error",
        0x2C => "Attribute not gettable",
        _ => return format!("Unknown error {}", status),
    };
    text.to_string()
}
