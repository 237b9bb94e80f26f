/// Properties editor for a placed image field
///
/// A small configuration form over the instance's attributes: the label
/// text (minimum 2 characters) and the required toggle. Edits live in a
/// draft; the draft is committed when focus leaves the form (Enter on the
/// label input, or clicking the toggle) and replaces both attributes
/// atomically. An invalid draft blocks the commit and shows an inline
/// message instead.

use iced::widget::{checkbox, column, text, text_input};
use iced::Element;

use super::instance::{Attributes, FieldInstance};

/// Labels shorter than this are rejected
const MIN_LABEL_CHARS: usize = 2;

#[derive(Debug, Clone)]
pub enum Event {
    /// The label draft changed (no commit yet)
    LabelEdited(String),
    /// The required toggle changed; commits, since clicking it takes
    /// focus away from the label input
    RequiredToggled(bool),
    /// Focus left the label input (Enter)
    CommitRequested,
}

/// What the host must do after an update.
#[derive(Debug, Clone)]
pub enum Action {
    None,
    /// Apply the updated instance to the shared field collection
    Commit(FieldInstance),
}

/// Draft state of the properties form for one instance.
pub struct PropertiesForm {
    instance: FieldInstance,
    draft_label: String,
    draft_required: bool,
    label_error: Option<String>,
}

impl PropertiesForm {
    /// Bind a fresh form to the instance's current attributes
    pub fn new(instance: &FieldInstance) -> Self {
        Self {
            instance: instance.clone(),
            draft_label: instance.attributes().label.clone(),
            draft_required: instance.attributes().required,
            label_error: None,
        }
    }

    /// Re-bind to the instance after it changed externally (for example
    /// an undo in the designer). Discards the draft and any inline error.
    pub fn reset(&mut self, instance: &FieldInstance) {
        *self = Self::new(instance);
    }

    /// Current label draft (not yet committed)
    pub fn draft_label(&self) -> &str {
        &self.draft_label
    }

    /// Inline validation message, if the last commit attempt was blocked
    pub fn label_error(&self) -> Option<&str> {
        self.label_error.as_deref()
    }

    pub fn update(&mut self, event: Event) -> Action {
        match event {
            Event::LabelEdited(label) => {
                self.draft_label = label;
                // Typing clears the stale message; validation reruns on commit
                self.label_error = None;
                Action::None
            }
            Event::RequiredToggled(required) => {
                self.draft_required = required;
                self.try_commit()
            }
            Event::CommitRequested => self.try_commit(),
        }
    }

    /// Validate the draft and, if it passes, replace both attributes
    /// atomically on a copy of the instance.
    fn try_commit(&mut self) -> Action {
        if self.draft_label.chars().count() < MIN_LABEL_CHARS {
            self.label_error = Some(format!(
                "Label must be at least {} characters",
                MIN_LABEL_CHARS
            ));
            return Action::None;
        }
        self.label_error = None;

        let mut updated = self.instance.clone();
        updated.set_attributes(Attributes {
            required: self.draft_required,
            label: self.draft_label.clone(),
        });
        self.instance = updated.clone();
        Action::Commit(updated)
    }

    pub fn view(&self) -> Element<'_, Event> {
        let mut form = column![
            text("Label").size(14),
            text_input("Field label", &self.draft_label)
                .on_input(Event::LabelEdited)
                .on_submit(Event::CommitRequested)
                .padding(8),
            text("Displayed above the field").size(12).style(text::secondary),
        ]
        .spacing(6);

        if let Some(message) = &self.label_error {
            form = form.push(text(message.clone()).size(12).style(text::danger));
        }

        form = form
            .push(
                checkbox("Required", self.draft_required)
                    .on_toggle(Event::RequiredToggled),
            )
            .push(
                text("The form refuses to submit without a capture")
                    .size(12)
                    .style(text::secondary),
            );

        form.padding(12).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::descriptor::IMAGE_FIELD;

    fn form() -> PropertiesForm {
        PropertiesForm::new(&IMAGE_FIELD.construct("image-1"))
    }

    #[test]
    fn test_short_label_blocks_commit() {
        let mut form = form();
        form.update(Event::LabelEdited("X".to_string()));

        let action = form.update(Event::CommitRequested);

        assert!(matches!(action, Action::None));
        assert!(form.label_error().is_some());
    }

    #[test]
    fn test_commit_replaces_both_attributes_atomically() {
        let mut form = form();
        form.update(Event::LabelEdited("Site photo".to_string()));

        let action = form.update(Event::RequiredToggled(false));

        match action {
            Action::Commit(instance) => {
                assert_eq!(instance.id(), "image-1");
                assert_eq!(instance.attributes().label, "Site photo");
                assert!(!instance.attributes().required);
            }
            Action::None => panic!("expected a commit"),
        }
        assert!(form.label_error().is_none());
    }

    #[test]
    fn test_toggle_with_invalid_label_is_blocked_too() {
        let mut form = form();
        form.update(Event::LabelEdited(String::new()));

        let action = form.update(Event::RequiredToggled(false));

        assert!(matches!(action, Action::None));
        assert!(form.label_error().is_some());
    }

    #[test]
    fn test_typing_clears_the_inline_message() {
        let mut form = form();
        form.update(Event::LabelEdited("X".to_string()));
        form.update(Event::CommitRequested);
        assert!(form.label_error().is_some());

        form.update(Event::LabelEdited("XY".to_string()));
        assert!(form.label_error().is_none());
    }

    #[test]
    fn test_reset_rebinds_to_external_changes() {
        let mut form = form();
        form.update(Event::LabelEdited("half-typed".to_string()));

        let mut changed = IMAGE_FIELD.construct("image-1");
        changed.set_attributes(Attributes {
            required: false,
            label: "Restored".to_string(),
        });
        form.reset(&changed);

        assert_eq!(form.draft_label(), "Restored");
        assert!(form.label_error().is_none());

        // Committing now carries the restored attributes
        match form.update(Event::CommitRequested) {
            Action::Commit(instance) => {
                assert_eq!(instance.attributes().label, "Restored");
                assert!(!instance.attributes().required);
            }
            Action::None => panic!("expected a commit"),
        }
    }
}
