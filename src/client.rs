//! Client for attribute lookups and fault diagnosis.
//!
//! This module provides the [`Client`] struct, which owns the transport handle
//! for the duration of its use and runs every operation over it.
//!
//! # Overview
//!
//! The client handles:
//! - Request construction (narrow or wide path form)
//! - Payload extraction at the vendor reply offsets
//! - Text and integer decoding of attribute payloads
//! - Fault record decoding and classification
//!
//! Each lookup issues exactly one request and waits for one reply. There are
//! no retries, timeouts or reconnects here; those belong to the transport.
//!
//! # Example
//!
//! ```
//! use logix_diag::{Client, ClientConfig, FaultDiagnosis, ScriptedTransport};
//!
//! // Fault record with type 0: no fault
//! let mut transport = ScriptedTransport::new();
//! transport.push_reply(vec![0u8; 84]);
//!
//! let mut client = Client::new(transport, ClientConfig::default());
//! assert_eq!(client.diagnose()?, FaultDiagnosis::NoFault);
//! # Ok::<(), logix_diag::CipError>(())
//! ```
//!
//! # Configuration
//!
//! [`ClientConfig`] holds the reply layout and the session mode. The defaults
//! are the values observed on Logix controllers; override them only for a
//! controller known to frame its replies differently.

use tracing::{debug, trace, warn};

use crate::command::{AttributeRequest, FAULT_QUERY_REQUEST};
use crate::error::Result;
use crate::fault::{FaultClass, FaultDiagnosis, FaultRecord, FAULT_RECORD_OFFSET};
use crate::object::{ObjectAttribute, ATTRIBUTE_PAYLOAD_OFFSET, MODULE_SLOT_PAYLOAD_OFFSET};
use crate::response::{decode_text, decode_u32_le, extract_attribute_payload, Response};
use crate::transport::Transport;

/// Name of the envelope returned by [`Client::fault_report`].
pub const FAULT_REPORT_NAME: &str = "FaultDiagnosis";

/// Configuration for a [`Client`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClientConfig {
    /// Offset of the attribute payload in an attribute reply.
    pub attribute_offset: usize,
    /// Offset of the slot payload in a module slot reply.
    pub module_slot_offset: usize,
    /// Offset of the fault record in the controller's fault reply.
    pub fault_record_offset: usize,
    /// Whether to ask the transport for a fully open session.
    pub full_session: bool,
}

impl ClientConfig {
    /// Creates a configuration with the Logix reply layout.
    ///
    /// # Example
    ///
    /// ```
    /// use logix_diag::ClientConfig;
    ///
    /// let config = ClientConfig::new();
    /// assert_eq!(config.attribute_offset, 54);
    /// assert_eq!(config.module_slot_offset, 50);
    /// assert_eq!(config.fault_record_offset, 44);
    /// assert!(config.full_session);
    /// ```
    pub fn new() -> Self {
        Self {
            attribute_offset: ATTRIBUTE_PAYLOAD_OFFSET,
            module_slot_offset: MODULE_SLOT_PAYLOAD_OFFSET,
            fault_record_offset: FAULT_RECORD_OFFSET,
            full_session: true,
        }
    }

    /// Sets a custom attribute payload offset (default is 54).
    pub fn with_attribute_offset(mut self, offset: usize) -> Self {
        self.attribute_offset = offset;
        self
    }

    /// Sets a custom module slot payload offset (default is 50).
    pub fn with_module_slot_offset(mut self, offset: usize) -> Self {
        self.module_slot_offset = offset;
        self
    }

    /// Sets a custom fault record offset (default is 44).
    pub fn with_fault_record_offset(mut self, offset: usize) -> Self {
        self.fault_record_offset = offset;
        self
    }

    /// Sets the session mode passed to [`Transport::connect`].
    pub fn with_full_session(mut self, full_session: bool) -> Self {
        self.full_session = full_session;
        self
    }

    /// Returns the payload offset used for a known attribute.
    pub fn offset_for(&self, attribute: ObjectAttribute) -> usize {
        if attribute.uses_slot_layout() {
            self.module_slot_offset
        } else {
            self.attribute_offset
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for controller attribute lookups and fault diagnosis.
///
/// Owns its transport exclusively; every method takes `&mut self`, so only
/// one request is ever in flight.
pub struct Client<T> {
    transport: T,
    config: ClientConfig,
}

impl<T: Transport> Client<T> {
    /// Creates a new client over an already established transport.
    pub fn new(transport: T, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Returns a mutable reference to the transport.
    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    /// Consumes the client and returns the transport.
    pub fn into_inner(self) -> T {
        self.transport
    }

    /// Reads an attribute and returns its payload at the default offset.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An identifier does not fit the wire encoding
    /// - The transport fails (status passed through)
    /// - The reply is shorter than the payload offset
    pub fn read_attribute(
        &mut self,
        class_id: u32,
        attribute_id: u16,
        instance_id: u32,
    ) -> Result<Vec<u8>> {
        let offset = self.config.attribute_offset;
        self.read_attribute_at(class_id, attribute_id, instance_id, offset)
    }

    /// Reads an attribute and returns the reply from `offset` onwards.
    ///
    /// # Example
    ///
    /// ```
    /// use logix_diag::{Client, ClientConfig, ScriptedTransport};
    ///
    /// let mut reply = vec![0u8; 54];
    /// reply.extend_from_slice(&[0xAB, 0xCD]);
    /// let mut transport = ScriptedTransport::new();
    /// transport.push_reply(reply);
    ///
    /// let mut client = Client::new(transport, ClientConfig::default());
    /// let payload = client.read_attribute_at(0x70, 24, 1, 54)?;
    /// assert_eq!(payload, vec![0xAB, 0xCD]);
    /// # Ok::<(), logix_diag::CipError>(())
    /// ```
    pub fn read_attribute_at(
        &mut self,
        class_id: u32,
        attribute_id: u16,
        instance_id: u32,
        offset: usize,
    ) -> Result<Vec<u8>> {
        let request = AttributeRequest::new(class_id, attribute_id, instance_id)?;
        let reply = self.exchange(&request.to_bytes())?;
        debug!(
            class_id,
            attribute_id,
            instance_id,
            form = %request.form(),
            reply_len = reply.len(),
            "attribute reply received"
        );

        let payload = extract_attribute_payload(&reply, offset).map_err(|e| {
            warn!(class_id, attribute_id, instance_id, error = %e, "attribute reply too short");
            e
        })?;
        Ok(payload.to_vec())
    }

    /// Reads one of the known controller object attributes.
    fn read_object_attribute(
        &mut self,
        attribute: ObjectAttribute,
        instance_id: u32,
    ) -> Result<Vec<u8>> {
        let offset = self.config.offset_for(attribute);
        self.read_attribute_at(
            attribute.class_id(),
            attribute.attribute_id(),
            instance_id,
            offset,
        )
    }

    /// Reads the name of a task.
    ///
    /// The whole payload is decoded as UTF-8; no length prefix is read.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged, or `CipError::Decode` if the
    /// payload is not valid UTF-8.
    pub fn task_name(&mut self, instance_id: u32) -> Result<String> {
        let payload = self.read_object_attribute(ObjectAttribute::TaskName, instance_id)?;
        decode_text(&payload)
    }

    /// Reads the name of a program.
    ///
    /// # Errors
    ///
    /// Same as [`Client::task_name`].
    pub fn program_name(&mut self, instance_id: u32) -> Result<String> {
        let payload = self.read_object_attribute(ObjectAttribute::ProgramName, instance_id)?;
        decode_text(&payload)
    }

    /// Reads the chassis slot of an IO module.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged, or `CipError::Decode` if fewer
    /// than four payload bytes came back.
    pub fn module_slot(&mut self, instance_id: u32) -> Result<u32> {
        let payload = self.read_object_attribute(ObjectAttribute::ModuleSlot, instance_id)?;
        decode_u32_le(&payload)
    }

    /// Queries the controller's current fault record.
    ///
    /// # Errors
    ///
    /// Returns the transport error unchanged, or `CipError::ShortReply` if the
    /// reply ends before the last record field.
    pub fn fault_record(&mut self) -> Result<FaultRecord> {
        let reply = self.exchange(&FAULT_QUERY_REQUEST)?;
        let record = FaultRecord::from_reply(&reply, self.config.fault_record_offset)?;
        debug!(%record, "fault record received");
        Ok(record)
    }

    /// Queries the fault record and classifies it.
    ///
    /// Lookups are made only when the classification needs them: the module
    /// slot for a required IO module failure, or the task name followed by
    /// the program name for a logic fault. The first failure is returned as
    /// is; no default value is substituted.
    ///
    /// # Example
    ///
    /// ```
    /// use logix_diag::{Client, ClientConfig, FaultDiagnosis, ScriptedTransport};
    ///
    /// // type 3, code 23: IO module failure on startup
    /// let mut reply = vec![0u8; 84];
    /// reply[64] = 3;
    /// reply[66] = 23;
    ///
    /// let mut transport = ScriptedTransport::new();
    /// transport.push_reply(reply);
    ///
    /// let mut client = Client::new(transport, ClientConfig::default());
    /// assert_eq!(client.diagnose()?, FaultDiagnosis::IoStartupFailure);
    /// # Ok::<(), logix_diag::CipError>(())
    /// ```
    pub fn diagnose(&mut self) -> Result<FaultDiagnosis> {
        let record = self.fault_record()?;
        let class = FaultClass::of(&record);
        trace!(?class, "fault classified");

        let diagnosis = match class {
            FaultClass::NoFault => FaultDiagnosis::NoFault,
            FaultClass::IoStartupFailure => FaultDiagnosis::IoStartupFailure,
            FaultClass::RequiredIoModuleFailure { module } => {
                let slot = self.module_slot(u32::from(module))?;
                FaultDiagnosis::RequiredIoModuleFailure { slot }
            }
            FaultClass::LogicFault { task, program } => {
                let task = self.task_name(u32::from(task))?;
                let program = self.program_name(u32::from(program))?;
                FaultDiagnosis::LogicFault { task, program }
            }
        };
        Ok(diagnosis)
    }

    /// Diagnoses the current fault and wraps the outcome in a [`Response`].
    ///
    /// The envelope is named [`FAULT_REPORT_NAME`]. On failure it carries no
    /// value and the status of the first failing step.
    pub fn fault_report(&mut self) -> Response<FaultDiagnosis> {
        Response::from_result(Some(FAULT_REPORT_NAME), self.diagnose())
    }

    /// Connects, sends one request and returns the raw reply.
    fn exchange(&mut self, request: &[u8]) -> Result<Vec<u8>> {
        let result = self
            .transport
            .connect(self.config.full_session)
            .and_then(|()| {
                debug!(len = request.len(), "sending CIP request");
                self.transport.send(request, true)
            });

        if let Err(e) = &result {
            warn!(status = e.status(), error = %e, "CIP exchange failed");
        }
        result
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Client<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("transport", &self.transport)
            .field("config", &self.config)
            .finish()
    }
}
