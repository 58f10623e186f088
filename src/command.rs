//! CIP request structures and serialization.
//!
//! # Request Types
//!
//! - [`AttributeRequest`] - read one attribute of a class/instance
//! - [`FAULT_QUERY_REQUEST`] - read the controller fault record
//!
//! # Attribute Request Layout
//!
//! | Field | Narrow form | Wide form |
//! |-------|-------------|-----------|
//! | Service | `0x03` | `0x03` |
//! | Path size (words) | `0x02` | `0x03` |
//! | Class segment | `0x20, u8` | `0x20, u16` |
//! | Instance segment | `0x24, u8` | `0x25, u16` |
//! | Attribute count | `u16 = 1` | `u16 = 1` |
//! | Attribute id | `u16` | `u16` |
//!
//! All words are little-endian.
//!
//! # Example
//!
//! ```
//! use logix_diag::AttributeRequest;
//!
//! let request = AttributeRequest::new(0x70, 24, 5).unwrap();
//! assert_eq!(
//!     request.to_bytes(),
//!     vec![0x03, 0x02, 0x20, 0x70, 0x24, 0x05, 0x01, 0x00, 0x18, 0x00]
//! );
//! ```

use crate::error::Result;
use crate::object::{ObjectAttribute, CLASS_CONTROLLER};
use crate::path::{PathForm, SEGMENT_CLASS, SEGMENT_INSTANCE_8};

/// Get_Attribute_List service code.
pub(crate) const SERVICE_GET_ATTRIBUTE_LIST: u8 = 0x03;
/// Get_Attribute_All service code.
pub(crate) const SERVICE_GET_ATTRIBUTE_ALL: u8 = 0x01;

/// Number of attributes requested per attribute request.
const ATTRIBUTE_COUNT: u16 = 1;

/// Get_Attribute_All on the controller object (class 0x73), instance 1.
pub const FAULT_QUERY_REQUEST: [u8; 6] = [
    SERVICE_GET_ATTRIBUTE_ALL,
    0x02,
    SEGMENT_CLASS,
    CLASS_CONTROLLER as u8,
    SEGMENT_INSTANCE_8,
    0x01,
];

/// Request for a single attribute of a CIP object instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRequest {
    class_id: u32,
    instance_id: u32,
    attribute_id: u16,
    form: PathForm,
    path: Vec<u8>,
}

impl AttributeRequest {
    /// Creates a new attribute request.
    ///
    /// The encoding form is chosen from `instance_id`: ids up to 255 use the
    /// narrow 8-bit form, larger ids the wide 16-bit form.
    ///
    /// # Errors
    ///
    /// Returns `CipError::InvalidParameter` if `class_id` or `instance_id`
    /// does not fit the selected form.
    ///
    /// # Example
    ///
    /// ```
    /// use logix_diag::{AttributeRequest, PathForm};
    ///
    /// let request = AttributeRequest::new(0x70, 24, 300).unwrap();
    /// assert_eq!(request.form(), PathForm::Wide);
    /// ```
    pub fn new(class_id: u32, attribute_id: u16, instance_id: u32) -> Result<Self> {
        let form = PathForm::for_instance(instance_id);
        let path = form.encode(class_id, instance_id)?;

        Ok(Self {
            class_id,
            instance_id,
            attribute_id,
            form,
            path,
        })
    }

    /// Creates a request for one of the known controller object attributes.
    pub fn for_attribute(attribute: ObjectAttribute, instance_id: u32) -> Result<Self> {
        Self::new(attribute.class_id(), attribute.attribute_id(), instance_id)
    }

    /// Returns the class id.
    pub fn class_id(&self) -> u32 {
        self.class_id
    }

    /// Returns the instance id.
    pub fn instance_id(&self) -> u32 {
        self.instance_id
    }

    /// Returns the attribute id.
    pub fn attribute_id(&self) -> u16 {
        self.attribute_id
    }

    /// Returns the encoding form of the path.
    pub fn form(&self) -> PathForm {
        self.form
    }

    /// Serializes the request to bytes for transmission.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(1 + self.path.len() + 4);
        bytes.push(SERVICE_GET_ATTRIBUTE_LIST);
        bytes.extend_from_slice(&self.path);
        bytes.extend_from_slice(&ATTRIBUTE_COUNT.to_le_bytes());
        bytes.extend_from_slice(&self.attribute_id.to_le_bytes());
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CipError;

    #[test]
    fn test_narrow_request_bytes() {
        let request = AttributeRequest::new(0x70, 24, 1).unwrap();
        assert_eq!(request.form(), PathForm::Narrow);
        assert_eq!(
            request.to_bytes(),
            hex::decode("03022070240101001800").unwrap()
        );
    }

    #[test]
    fn test_wide_request_bytes() {
        let request = AttributeRequest::new(0x70, 24, 300).unwrap();
        assert_eq!(request.form(), PathForm::Wide);
        assert_eq!(
            request.to_bytes(),
            hex::decode("0303207000252c0101001800").unwrap()
        );
    }

    #[test]
    fn test_narrow_boundary() {
        let at_max = AttributeRequest::new(0x69, 10, 255).unwrap();
        assert_eq!(at_max.to_bytes().len(), 10);
        assert_eq!(at_max.to_bytes()[5], 0xFF);

        let past_max = AttributeRequest::new(0x69, 10, 256).unwrap();
        assert_eq!(past_max.to_bytes().len(), 12);
        assert_eq!(&past_max.to_bytes()[6..8], &[0x00, 0x01]);
    }

    #[test]
    fn test_attribute_id_little_endian() {
        let request = AttributeRequest::new(0x68, 0x1234, 2).unwrap();
        let bytes = request.to_bytes();
        assert_eq!(&bytes[bytes.len() - 2..], &[0x34, 0x12]);
    }

    #[test]
    fn test_for_attribute() {
        let request = AttributeRequest::for_attribute(ObjectAttribute::ModuleSlot, 3).unwrap();
        assert_eq!(request.class_id(), 105);
        assert_eq!(request.attribute_id(), 10);
        assert_eq!(request.instance_id(), 3);
    }

    #[test]
    fn test_oversized_instance_rejected() {
        let result = AttributeRequest::new(0x70, 24, 70_000);
        assert!(matches!(result, Err(CipError::InvalidParameter { .. })));
    }

    #[test]
    fn test_fault_query_request() {
        assert_eq!(FAULT_QUERY_REQUEST, [0x01, 0x02, 0x20, 0x73, 0x24, 0x01]);
    }
}
