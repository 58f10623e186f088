//! # Logix Fault Diagnosis Library
//!
//! CIP attribute lookups and controller fault diagnosis for Logix PLCs,
//! running over an EtherNet/IP session owned by the caller.
//!
//! This is a **protocol-only** library. It does not open sessions, retry,
//! time out or reconnect; the session belongs to the PLC communication
//! client, which plugs in through the [`Transport`] trait. Each lookup
//! produces exactly 1 request and 1 response.
//!
//! ## Features
//!
//! - **Attribute codec** - narrow and wide class/instance paths, payload
//!   extraction at the controller's reply offsets
//! - **Fault telemetry** - decodes the controller's major/minor fault record
//! - **Diagnosis** - classifies the fault and looks up the slot, task or
//!   program involved
//! - **Status passthrough** - a failing transport's status code reaches the
//!   caller unchanged
//! - **No panics** - all errors returned as `Result<T, CipError>`
//!
//! ## Quick Start
//!
//! ```no_run
//! use logix_diag::{Client, ClientConfig, FaultDiagnosis, Transport};
//!
//! fn report<T: Transport>(session: T) -> logix_diag::Result<()> {
//!     let mut client = Client::new(session, ClientConfig::default());
//!
//!     match client.diagnose()? {
//!         FaultDiagnosis::NoFault => println!("controller OK"),
//!         FaultDiagnosis::IoStartupFailure => println!("IO module failed on startup"),
//!         FaultDiagnosis::RequiredIoModuleFailure { slot } => {
//!             println!("required IO module in slot {} failed", slot)
//!         }
//!         FaultDiagnosis::LogicFault { task, program } => {
//!             println!("logic fault in {}/{}", task, program)
//!         }
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Attribute Lookups
//!
//! | Lookup | Class | Attribute | Payload offset | Decoded as |
//! |--------|-------|-----------|----------------|------------|
//! | [`Client::task_name`] | 0x70 | 24 | 54 | UTF-8 text |
//! | [`Client::program_name`] | 0x68 | 28 | 54 | UTF-8 text |
//! | [`Client::module_slot`] | 0x69 | 10 | 50 | u32 LE |
//!
//! Arbitrary attributes can be read with [`Client::read_attribute`] and
//! [`Client::read_attribute_at`].
//!
//! ## Fault Diagnosis
//!
//! [`Client::diagnose`] reads the fault record and classifies it, first match
//! wins:
//!
//! | Condition | Diagnosis | Lookups |
//! |-----------|-----------|---------|
//! | type 0 | [`FaultDiagnosis::NoFault`] | none |
//! | type 3, code 23 | [`FaultDiagnosis::IoStartupFailure`] | none |
//! | id3 34 | [`FaultDiagnosis::RequiredIoModuleFailure`] | slot of module `id2` |
//! | otherwise | [`FaultDiagnosis::LogicFault`] | task `id1`, then program `id2` |
//!
//! ## Result Envelope
//!
//! Command dispatchers that print results use [`Response`], which carries a
//! name, the value and a status code:
//!
//! ```
//! use logix_diag::{Client, ClientConfig, ScriptedTransport};
//!
//! let mut transport = ScriptedTransport::new();
//! transport.push_failure(0x07, "connection lost");
//!
//! let mut client = Client::new(transport, ClientConfig::default());
//! let response = client.fault_report();
//! assert_eq!(response.status, 0x07);
//! assert!(response.value.is_none());
//! println!("{}", response);
//! ```
//!
//! ## Logging
//!
//! The library emits [`tracing`] events (`debug` per request and reply,
//! `warn` on failures). Install a subscriber in the application to see them.

#![warn(clippy::all)]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

mod client;
mod command;
mod error;
mod fault;
mod object;
mod path;
mod response;
mod transport;

// Public re-exports
pub use client::{Client, ClientConfig, FAULT_REPORT_NAME};
pub use command::{AttributeRequest, FAULT_QUERY_REQUEST};
pub use error::{
    cip_status_description, CipError, Result, STATUS_INVALID_ATTRIBUTE_VALUE,
    STATUS_INVALID_PARAMETER, STATUS_NOT_ENOUGH_DATA,
};
pub use fault::{
    FaultClass, FaultDiagnosis, FaultRecord, FAULT_CODE_IO_STARTUP, FAULT_ID3_REQUIRED_MODULE,
    FAULT_RECORD_OFFSET, FAULT_TYPE_IO, FAULT_TYPE_NONE,
};
pub use object::{
    ObjectAttribute, ATTRIBUTE_PAYLOAD_OFFSET, ATTR_MODULE_SLOT, ATTR_PROGRAM_NAME,
    ATTR_TASK_NAME, CLASS_CONTROLLER, CLASS_MODULE, CLASS_PROGRAM, CLASS_TASK,
    MODULE_SLOT_PAYLOAD_OFFSET,
};
pub use path::{PathForm, NARROW_INSTANCE_MAX};
pub use response::{decode_text, decode_u32_le, extract_attribute_payload, Response};
pub use transport::{ScriptedTransport, Transport, STATUS_CONNECTION_FAILURE};
