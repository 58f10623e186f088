//! CIP logical path segments and encoding forms.
//!
//! An attribute request addresses its target object with a padded EPATH made
//! of a class segment followed by an instance segment. This crate emits two
//! fixed layouts:
//!
//! | Form | Path size | Class segment | Instance segment | Bytes |
//! |------|-----------|---------------|------------------|-------|
//! | [`PathForm::Narrow`] | 2 words | `0x20, class:u8` | `0x24, instance:u8` | 4 |
//! | [`PathForm::Wide`] | 3 words | `0x20, class:u16` | `0x25, instance:u16` | 6 |
//!
//! The form is selected from the instance id alone. Class ids used by this
//! crate are always below 256, but the wide form still carries the class as a
//! 16-bit word because that is what the controller expects on this wire.
//!
//! # Example
//!
//! ```
//! use logix_diag::PathForm;
//!
//! assert_eq!(PathForm::for_instance(1), PathForm::Narrow);
//! assert_eq!(PathForm::for_instance(300), PathForm::Wide);
//!
//! let path = PathForm::Narrow.encode(0x70, 5).unwrap();
//! assert_eq!(path, vec![0x02, 0x20, 0x70, 0x24, 0x05]);
//! ```

use crate::error::{CipError, Result};

/// Logical class segment type.
pub(crate) const SEGMENT_CLASS: u8 = 0x20;
/// Logical instance segment type, 8-bit id.
pub(crate) const SEGMENT_INSTANCE_8: u8 = 0x24;
/// Logical instance segment type, 16-bit id.
pub(crate) const SEGMENT_INSTANCE_16: u8 = 0x25;

/// Largest instance id that still fits the narrow form.
pub const NARROW_INSTANCE_MAX: u32 = 0xFF;

/// Encoding form of a class/instance path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathForm {
    /// 8-bit class and instance identifiers.
    Narrow,
    /// 16-bit class and instance identifiers.
    Wide,
}

impl PathForm {
    /// Selects the encoding form for an instance id.
    pub fn for_instance(instance_id: u32) -> Self {
        if instance_id <= NARROW_INSTANCE_MAX {
            PathForm::Narrow
        } else {
            PathForm::Wide
        }
    }

    /// Path size in 16-bit words, as written in the request.
    pub fn size_words(self) -> u8 {
        match self {
            PathForm::Narrow => 0x02,
            PathForm::Wide => 0x03,
        }
    }

    /// Encodes the path size byte followed by the class and instance segments.
    ///
    /// # Errors
    ///
    /// Returns `CipError::InvalidParameter` if an identifier does not fit the
    /// width of this form.
    pub fn encode(self, class_id: u32, instance_id: u32) -> Result<Vec<u8>> {
        match self {
            PathForm::Narrow => {
                let class = narrow("class_id", class_id)?;
                let instance = narrow("instance_id", instance_id)?;
                Ok(vec![
                    self.size_words(),
                    SEGMENT_CLASS,
                    class,
                    SEGMENT_INSTANCE_8,
                    instance,
                ])
            }
            PathForm::Wide => {
                let class = wide("class_id", class_id)?.to_le_bytes();
                let instance = wide("instance_id", instance_id)?.to_le_bytes();
                Ok(vec![
                    self.size_words(),
                    SEGMENT_CLASS,
                    class[0],
                    class[1],
                    SEGMENT_INSTANCE_16,
                    instance[0],
                    instance[1],
                ])
            }
        }
    }
}

fn narrow(parameter: &str, value: u32) -> Result<u8> {
    u8::try_from(value).map_err(|_| {
        CipError::invalid_parameter(parameter, format!("{} does not fit in 8 bits", value))
    })
}

fn wide(parameter: &str, value: u32) -> Result<u16> {
    u16::try_from(value).map_err(|_| {
        CipError::invalid_parameter(parameter, format!("{} does not fit in 16 bits", value))
    })
}

impl std::fmt::Display for PathForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathForm::Narrow => write!(f, "narrow"),
            PathForm::Wide => write!(f, "wide"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_boundary() {
        assert_eq!(PathForm::for_instance(0), PathForm::Narrow);
        assert_eq!(PathForm::for_instance(255), PathForm::Narrow);
        assert_eq!(PathForm::for_instance(256), PathForm::Wide);
        assert_eq!(PathForm::for_instance(65535), PathForm::Wide);
    }

    #[test]
    fn test_encode_narrow() {
        let path = PathForm::Narrow.encode(0x69, 0x0A).unwrap();
        assert_eq!(path, vec![0x02, 0x20, 0x69, 0x24, 0x0A]);
    }

    #[test]
    fn test_encode_wide() {
        let path = PathForm::Wide.encode(0x70, 300).unwrap();
        assert_eq!(path, vec![0x03, 0x20, 0x70, 0x00, 0x25, 0x2C, 0x01]);
    }

    #[test]
    fn test_encode_narrow_rejects_wide_class() {
        let err = PathForm::Narrow.encode(0x1234, 1).unwrap_err();
        assert!(matches!(err, CipError::InvalidParameter { .. }));
    }

    #[test]
    fn test_encode_wide_rejects_oversized_instance() {
        let err = PathForm::Wide.encode(0x70, 0x1_0000).unwrap_err();
        match err {
            CipError::InvalidParameter { parameter, .. } => assert_eq!(parameter, "instance_id"),
            _ => panic!("Expected InvalidParameter"),
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(PathForm::Narrow.to_string(), "narrow");
        assert_eq!(PathForm::Wide.to_string(), "wide");
    }
}
