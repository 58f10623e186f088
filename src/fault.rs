//! Controller fault telemetry and classification.
//!
//! The controller object answers a Get_Attribute_All with its current
//! major/minor fault record. [`FaultRecord::from_reply`] pulls the six fields
//! the diagnosis needs out of that reply, and [`FaultClass::of`] decides which
//! of the four diagnoses applies and which follow-up lookups it needs.
//!
//! # Record Layout
//!
//! The record starts [`FAULT_RECORD_OFFSET`] bytes into the reply. Fields are
//! little-endian `u16` at these offsets inside the record:
//!
//! | Field | Offset |
//! |-------|--------|
//! | type | 20 |
//! | code | 22 |
//! | id1 | 24 |
//! | id2 | 28 |
//! | id3 | 32 |
//! | data | 36 |
//!
//! # Classification
//!
//! Rules are checked in order and the first match wins:
//!
//! 1. type 0: no fault
//! 2. type 3, code 23: IO module failure on startup
//! 3. id3 34: required IO module failure, slot read from module `id2`
//! 4. anything else: logic fault, task `id1` and program `id2`
//!
//! # Example
//!
//! ```
//! use logix_diag::{FaultClass, FaultRecord};
//!
//! let record = FaultRecord { fault_type: 1, code: 5, id1: 2, id2: 3, id3: 34, data: 0 };
//! assert_eq!(FaultClass::of(&record), FaultClass::RequiredIoModuleFailure { module: 3 });
//! ```

use crate::error::Result;
use crate::response::{extract_attribute_payload, read_u16_le};

/// Where the fault record starts in the controller's reply.
pub const FAULT_RECORD_OFFSET: usize = 44;

const FIELD_TYPE: usize = 20;
const FIELD_CODE: usize = 22;
const FIELD_ID1: usize = 24;
const FIELD_ID2: usize = 28;
const FIELD_ID3: usize = 32;
const FIELD_DATA: usize = 36;

/// Fault type reported when the controller is not faulted.
pub const FAULT_TYPE_NONE: u16 = 0;
/// Fault type of IO faults.
pub const FAULT_TYPE_IO: u16 = 3;
/// IO fault code for a module that failed during startup.
pub const FAULT_CODE_IO_STARTUP: u16 = 23;
/// `id3` marker of a fault raised by a required IO module.
pub const FAULT_ID3_REQUIRED_MODULE: u16 = 34;

/// Snapshot of the controller's fault record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FaultRecord {
    /// Major fault type.
    pub fault_type: u16,
    /// Fault code within the type.
    pub code: u16,
    /// First auxiliary id (task instance for logic faults).
    pub id1: u16,
    /// Second auxiliary id (program or module instance).
    pub id2: u16,
    /// Third auxiliary id.
    pub id3: u16,
    /// Fault data word.
    pub data: u16,
}

impl FaultRecord {
    /// Parses a fault record from a raw controller reply.
    ///
    /// # Errors
    ///
    /// Returns `CipError::ShortReply` if the reply ends before the last field.
    pub fn from_reply(reply: &[u8], record_offset: usize) -> Result<Self> {
        let record = extract_attribute_payload(reply, record_offset)?;

        Ok(Self {
            fault_type: read_u16_le(record, FIELD_TYPE)?,
            code: read_u16_le(record, FIELD_CODE)?,
            id1: read_u16_le(record, FIELD_ID1)?,
            id2: read_u16_le(record, FIELD_ID2)?,
            id3: read_u16_le(record, FIELD_ID3)?,
            data: read_u16_le(record, FIELD_DATA)?,
        })
    }
}

impl std::fmt::Display for FaultRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "type={} code={} id1={} id2={} id3={} data={}",
            self.fault_type, self.code, self.id1, self.id2, self.id3, self.data
        )
    }
}

/// Which diagnosis a record falls under, before any lookups are made.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultClass {
    /// Controller is not faulted.
    NoFault,
    /// IO module failed during startup.
    IoStartupFailure,
    /// A required IO module faulted; `module` is its module object instance.
    RequiredIoModuleFailure {
        /// Module object instance to read the slot from.
        module: u16,
    },
    /// Anything else is reported as a logic fault.
    LogicFault {
        /// Task object instance.
        task: u16,
        /// Program object instance.
        program: u16,
    },
}

impl FaultClass {
    /// Classifies a fault record.
    pub fn of(record: &FaultRecord) -> Self {
        if record.fault_type == FAULT_TYPE_NONE {
            FaultClass::NoFault
        } else if record.fault_type == FAULT_TYPE_IO && record.code == FAULT_CODE_IO_STARTUP {
            FaultClass::IoStartupFailure
        } else if record.id3 == FAULT_ID3_REQUIRED_MODULE {
            FaultClass::RequiredIoModuleFailure { module: record.id2 }
        } else {
            FaultClass::LogicFault {
                task: record.id1,
                program: record.id2,
            }
        }
    }
}

/// Diagnosis of the controller's current fault.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FaultDiagnosis {
    /// Controller is not faulted.
    NoFault,
    /// IO module failed during startup.
    IoStartupFailure,
    /// A required IO module faulted.
    RequiredIoModuleFailure {
        /// Chassis slot of the module.
        slot: u32,
    },
    /// Fault raised by user logic.
    LogicFault {
        /// Name of the faulted task.
        task: String,
        /// Name of the faulted program.
        program: String,
    },
}

impl std::fmt::Display for FaultDiagnosis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FaultDiagnosis::NoFault => write!(f, "No Fault"),
            FaultDiagnosis::IoStartupFailure => write!(f, "IO Module Failure on Startup"),
            FaultDiagnosis::RequiredIoModuleFailure { slot } => {
                write!(f, "Required IO Module Failure in slot {}", slot)
            }
            FaultDiagnosis::LogicFault { task, program } => {
                write!(f, "Logic Fault in task {}, program {}", task, program)
            }
        }
    }
}
