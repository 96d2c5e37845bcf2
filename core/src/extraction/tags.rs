use dicom_core::dictionary::DataDictionary;
use dicom_core::value::{PrimitiveValue, Value};
use dicom_core::Tag;
use dicom_dictionary_std::StandardDataDictionary;
use dicom_object::mem::InMemElement;
use dicom_object::InMemDicomObject;

// Patient / Plan Tags
pub const PATIENT_ID: Tag = Tag(0x0010, 0x0020);
pub const RT_PLAN_LABEL: Tag = Tag(0x300A, 0x0002);
pub const RT_PLAN_NAME: Tag = Tag(0x300A, 0x0003);

// Fraction Group Tags
pub const FRACTION_GROUP_SEQUENCE: Tag = Tag(0x300A, 0x0070);
pub const REFERENCED_BEAM_SEQUENCE: Tag = Tag(0x300C, 0x0004);
pub const REFERENCED_BEAM_NUMBER: Tag = Tag(0x300C, 0x0006);
pub const BEAM_METERSET: Tag = Tag(0x300A, 0x0086);

// Beam Tags
pub const BEAM_SEQUENCE: Tag = Tag(0x300A, 0x00B0);
pub const BEAM_NUMBER: Tag = Tag(0x300A, 0x00C0);
pub const BEAM_NAME: Tag = Tag(0x300A, 0x00C2);
pub const BEAM_DESCRIPTION: Tag = Tag(0x300A, 0x00C3);

// Control Point Tags
pub const CONTROL_POINT_SEQUENCE: Tag = Tag(0x300A, 0x0111);
pub const CUMULATIVE_METERSET_WEIGHT: Tag = Tag(0x300A, 0x0134);
pub const GANTRY_ANGLE: Tag = Tag(0x300A, 0x011E);
pub const GANTRY_ROTATION_DIRECTION: Tag = Tag(0x300A, 0x011F);

// Beam Limiting Device Tags
pub const BEAM_LIMITING_DEVICE_POSITION_SEQUENCE: Tag = Tag(0x300A, 0x011A);
pub const RT_BEAM_LIMITING_DEVICE_TYPE: Tag = Tag(0x300A, 0x00B8);
pub const LEAF_JAW_POSITIONS: Tag = Tag(0x300A, 0x011C);

/// Returns the dictionary keyword of a tag, or its `(gggg,eeee)` form
pub fn tag_name(tag: Tag) -> String {
    StandardDataDictionary
        .by_tag(tag)
        .map(|entry| entry.alias.to_string())
        .unwrap_or_else(|| format!("({:04X},{:04X})", tag.group(), tag.element()))
}

/// Helper to get string value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to string
pub fn get_string_value(dcm: &InMemDicomObject, tag: Tag) -> Option<String> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_str().ok())
        .map(|s| s.trim().to_string())
}

/// Helper to get integer value from DICOM tag
///
/// Returns `None` if the tag is not present or cannot be converted to i32
pub fn get_int_value(dcm: &InMemDicomObject, tag: Tag) -> Option<i32> {
    dcm.element(tag)
        .ok()
        .and_then(|elem| elem.to_int::<i32>().ok())
}

/// Helper to get a float value from DICOM tag
///
/// Returns `Ok(None)` if the tag is absent or empty, and an error if the
/// value is present but not numeric
pub fn get_float_value(dcm: &InMemDicomObject, tag: Tag) -> crate::Result<Option<f64>> {
    match dcm.element(tag) {
        Ok(elem) if is_blank(elem) => Ok(None),
        Ok(elem) => Ok(Some(elem.to_float64()?)),
        Err(_) => Ok(None),
    }
}

/// Helper to get a multi-valued float from DICOM tag
///
/// Same absence/invalid semantics as [`get_float_value`]
pub fn get_multi_float_value(dcm: &InMemDicomObject, tag: Tag) -> crate::Result<Option<Vec<f64>>> {
    match dcm.element(tag) {
        Ok(elem) if is_blank(elem) => Ok(None),
        Ok(elem) => Ok(Some(elem.to_multi_float64()?)),
        Err(_) => Ok(None),
    }
}

/// Whether an element carries no value at all (zero length or only padding)
fn is_blank(elem: &InMemElement) -> bool {
    match elem.value() {
        Value::Primitive(PrimitiveValue::Empty) => true,
        Value::Primitive(_) => elem
            .to_str()
            .map(|s| s.trim().is_empty())
            .unwrap_or(false),
        _ => false,
    }
}

/// Helper to get the items of a sequence element
///
/// Returns `None` if the tag is not present or is not a sequence
pub fn get_sequence_items(dcm: &InMemDicomObject, tag: Tag) -> Option<&[InMemDicomObject]> {
    dcm.element(tag).ok().and_then(|elem| elem.items())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom_core::{DataElement, VR};

    #[test]
    fn test_tag_values() {
        assert_eq!(BEAM_SEQUENCE, Tag(0x300A, 0x00B0));
        assert_eq!(CONTROL_POINT_SEQUENCE, Tag(0x300A, 0x0111));
        assert_eq!(LEAF_JAW_POSITIONS, Tag(0x300A, 0x011C));
        assert_eq!(REFERENCED_BEAM_SEQUENCE, Tag(0x300C, 0x0004));
    }

    #[test]
    fn test_tag_name() {
        assert_eq!(tag_name(BEAM_SEQUENCE), "BeamSequence");
        assert_eq!(tag_name(LEAF_JAW_POSITIONS), "LeafJawPositions");
    }

    #[test]
    fn test_get_float_values() {
        let dcm = InMemDicomObject::from_element_iter([
            DataElement::new(
                GANTRY_ANGLE,
                VR::DS,
                PrimitiveValue::from("180.0"),
            ),
            DataElement::new(
                LEAF_JAW_POSITIONS,
                VR::DS,
                PrimitiveValue::Strs(vec!["-50".to_string(), "50.5".to_string()].into()),
            ),
            DataElement::new(
                GANTRY_ROTATION_DIRECTION,
                VR::CS,
                PrimitiveValue::from("CW"),
            ),
        ]);

        assert_eq!(get_float_value(&dcm, GANTRY_ANGLE).unwrap(), Some(180.0));
        assert_eq!(
            get_multi_float_value(&dcm, LEAF_JAW_POSITIONS).unwrap(),
            Some(vec![-50.0, 50.5])
        );
        assert_eq!(get_float_value(&dcm, CUMULATIVE_METERSET_WEIGHT).unwrap(), None);
        assert!(get_float_value(&dcm, GANTRY_ROTATION_DIRECTION).is_err());
        assert_eq!(
            get_string_value(&dcm, GANTRY_ROTATION_DIRECTION),
            Some("CW".to_string())
        );
    }
}
