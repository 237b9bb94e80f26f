/// Static definition of the "Image" field type
///
/// One descriptor value exists per field type, process-wide, and is never
/// mutated. It carries the designer-button icon and label, the factory for
/// new instances, and the validation predicate the capture pipeline runs
/// against uploaded values.

use super::instance::FieldInstance;

/// The three surfaces a field can be rendered on.
///
/// Dispatch over render modes is an explicit tagged variant rather than
/// ambient casting: see [`crate::field::render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Static placeholder inside the form-builder canvas
    Designer,
    /// Live capture control inside a fillable form
    Form,
    /// Configuration panel (label, required flag)
    Properties,
}

/// Capability record for one field type.
pub struct FieldDescriptor {
    /// Icon shown on the designer toolbox button
    pub icon: &'static str,
    /// Label shown on the designer toolbox button
    pub label: &'static str,
}

/// The image field type. The only descriptor this crate defines.
pub const IMAGE_FIELD: FieldDescriptor = FieldDescriptor {
    icon: "📷",
    label: "Image",
};

impl FieldDescriptor {
    /// Create a fresh instance with default attributes
    /// (`required: true`, `label: "Image"`).
    pub fn construct(&self, id: impl Into<String>) -> FieldInstance {
        FieldInstance::new(id)
    }

    /// Validate a candidate value for this field.
    ///
    /// A required field accepts only values longer than 3 characters.
    /// The value is expected to be an uploaded-image path, so this is a
    /// length heuristic rather than a content check: any real path the
    /// endpoint returns clears the bar, while empty and junk values do not.
    /// An optional field accepts anything, including the empty string.
    pub fn validate(&self, instance: &FieldInstance, value: &str) -> bool {
        if instance.attributes().required {
            value.chars().count() > 3
        } else {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::instance::Attributes;

    #[test]
    fn test_required_accepts_only_longer_than_three() {
        let instance = IMAGE_FIELD.construct("image-1");
        assert!(instance.attributes().required);

        assert!(!IMAGE_FIELD.validate(&instance, ""));
        assert!(!IMAGE_FIELD.validate(&instance, "abc"));
        assert!(IMAGE_FIELD.validate(&instance, "abcd"));
        assert!(IMAGE_FIELD.validate(&instance, "uploads/1700000000000.png"));
    }

    #[test]
    fn test_optional_accepts_anything() {
        let mut instance = IMAGE_FIELD.construct("image-1");
        instance.set_attributes(Attributes {
            required: false,
            label: "Image".to_string(),
        });

        assert!(IMAGE_FIELD.validate(&instance, ""));
        assert!(IMAGE_FIELD.validate(&instance, "ab"));
    }

    #[test]
    fn test_length_is_measured_in_characters() {
        let instance = IMAGE_FIELD.construct("image-1");
        // Four two-byte characters: passes a char count, not a byte count
        assert!(IMAGE_FIELD.validate(&instance, "åäöü"));
    }
}
