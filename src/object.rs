//! Controller object attributes used by the fault diagnosis lookups.
//!
//! Each [`ObjectAttribute`] names one attribute of a Logix controller object
//! together with the class id, attribute id and reply layout it is read with.
//!
//! | Attribute | Class | Attribute id | Payload offset | Decoded as |
//! |-----------|-------|--------------|----------------|------------|
//! | [`ObjectAttribute::TaskName`] | 0x70 (Task) | 24 | 54 | UTF-8 text |
//! | [`ObjectAttribute::ProgramName`] | 0x68 (Program) | 28 | 54 | UTF-8 text |
//! | [`ObjectAttribute::ModuleSlot`] | 0x69 (Module) | 10 | 50 | u32 LE |
//!
//! # Example
//!
//! ```
//! use logix_diag::ObjectAttribute;
//!
//! assert_eq!(ObjectAttribute::TaskName.class_id(), 112);
//! assert_eq!(ObjectAttribute::ModuleSlot.attribute_id(), 10);
//! assert_eq!(ObjectAttribute::ProgramName.to_string(), "ProgramName");
//! ```

/// Controller object class (fault record, Get_Attribute_All).
pub const CLASS_CONTROLLER: u32 = 0x73;
/// Task object class.
pub const CLASS_TASK: u32 = 0x70;
/// Program object class.
pub const CLASS_PROGRAM: u32 = 0x68;
/// Module object class.
pub const CLASS_MODULE: u32 = 0x69;

/// Task name attribute of the task object.
pub const ATTR_TASK_NAME: u16 = 24;
/// Program name attribute of the program object.
pub const ATTR_PROGRAM_NAME: u16 = 28;
/// Slot number attribute of the module object.
pub const ATTR_MODULE_SLOT: u16 = 10;

/// Where the attribute payload starts in an attribute reply.
pub const ATTRIBUTE_PAYLOAD_OFFSET: usize = 54;

/// Where the slot payload starts in a module slot reply.
///
/// Observed on the wire for this attribute only; not derivable from
/// [`ATTRIBUTE_PAYLOAD_OFFSET`].
pub const MODULE_SLOT_PAYLOAD_OFFSET: usize = 50;

/// Attributes read while diagnosing a controller fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectAttribute {
    /// Name of the task that faulted.
    TaskName,
    /// Name of the program that faulted.
    ProgramName,
    /// Chassis slot of an IO module.
    ModuleSlot,
}

impl ObjectAttribute {
    /// Returns the CIP class id of the object owning this attribute.
    pub fn class_id(self) -> u32 {
        match self {
            ObjectAttribute::TaskName => CLASS_TASK,
            ObjectAttribute::ProgramName => CLASS_PROGRAM,
            ObjectAttribute::ModuleSlot => CLASS_MODULE,
        }
    }

    /// Returns the attribute id.
    pub fn attribute_id(self) -> u16 {
        match self {
            ObjectAttribute::TaskName => ATTR_TASK_NAME,
            ObjectAttribute::ProgramName => ATTR_PROGRAM_NAME,
            ObjectAttribute::ModuleSlot => ATTR_MODULE_SLOT,
        }
    }

    /// Returns whether the reply carries the attribute at the module slot offset.
    pub(crate) fn uses_slot_layout(self) -> bool {
        matches!(self, ObjectAttribute::ModuleSlot)
    }
}

impl std::fmt::Display for ObjectAttribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObjectAttribute::TaskName => write!(f, "TaskName"),
            ObjectAttribute::ProgramName => write!(f, "ProgramName"),
            ObjectAttribute::ModuleSlot => write!(f, "ModuleSlot"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_ids() {
        assert_eq!(ObjectAttribute::TaskName.class_id(), 112);
        assert_eq!(ObjectAttribute::ProgramName.class_id(), 104);
        assert_eq!(ObjectAttribute::ModuleSlot.class_id(), 105);
    }

    #[test]
    fn test_attribute_ids() {
        assert_eq!(ObjectAttribute::TaskName.attribute_id(), 24);
        assert_eq!(ObjectAttribute::ProgramName.attribute_id(), 28);
        assert_eq!(ObjectAttribute::ModuleSlot.attribute_id(), 10);
    }

    #[test]
    fn test_slot_layout() {
        assert!(ObjectAttribute::ModuleSlot.uses_slot_layout());
        assert!(!ObjectAttribute::TaskName.uses_slot_layout());
        assert!(!ObjectAttribute::ProgramName.uses_slot_layout());
    }

    #[test]
    fn test_offsets() {
        assert_eq!(ATTRIBUTE_PAYLOAD_OFFSET, 54);
        assert_eq!(MODULE_SLOT_PAYLOAD_OFFSET, 50);
    }
}
