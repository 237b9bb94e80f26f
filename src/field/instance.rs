/// One configured occurrence of the image field placed on a form
///
/// Instances are owned by the form's ordered field list and serialized
/// to JSON when a form is saved. The attribute pair is only ever
/// replaced as a whole by the properties editor's commit path.

use serde::{Deserialize, Serialize};

/// Configurable attributes of a placed image field.
///
/// `required` and `label` always travel together: there is no API to
/// update one without the other, so a commit can never leave the pair
/// half-applied.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Attributes {
    /// Whether the surrounding form refuses to submit without a capture
    pub required: bool,
    /// Label displayed above the capture control
    pub label: String,
}

impl Default for Attributes {
    /// Defaults applied when the field is first dropped onto a form
    fn default() -> Self {
        Self {
            required: true,
            label: "Image".to_string(),
        }
    }
}

/// A placed image field: a form-unique id plus its attributes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldInstance {
    id: String,
    attributes: Attributes,
}

impl FieldInstance {
    /// Create an instance with default attributes.
    /// `id` must be unique within the owning form.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            attributes: Attributes::default(),
        }
    }

    /// The form-unique id of this instance
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Current attributes
    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Replace both attributes atomically.
    /// This is the only mutation path; partial updates are not expressible.
    pub fn set_attributes(&mut self, attributes: Attributes) {
        self.attributes = attributes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let instance = FieldInstance::new("image-1");
        assert_eq!(instance.id(), "image-1");
        assert!(instance.attributes().required);
        assert_eq!(instance.attributes().label, "Image");
    }

    #[test]
    fn test_attributes_replaced_as_pair() {
        let mut instance = FieldInstance::new("image-1");
        instance.set_attributes(Attributes {
            required: false,
            label: "Site photo".to_string(),
        });
        assert!(!instance.attributes().required);
        assert_eq!(instance.attributes().label, "Site photo");
    }

    #[test]
    fn test_serialization_round_trip() {
        let mut instance = FieldInstance::new("image-7");
        instance.set_attributes(Attributes {
            required: false,
            label: "Receipt".to_string(),
        });

        let json = serde_json::to_string(&instance).unwrap();
        let restored: FieldInstance = serde_json::from_str(&json).unwrap();

        assert_eq!(instance, restored);
    }
}
