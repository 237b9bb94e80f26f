use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length, Task, Theme};

mod error;
mod field;
mod imaging;
mod upload;

use field::capture::{self, CaptureField};
use field::descriptor::{RenderMode, IMAGE_FIELD};
use field::instance::FieldInstance;
use field::properties::{self, PropertiesForm};
use upload::Uploader;

/// Host shell around the image field.
///
/// Plays the two roles the field expects from its surroundings: the
/// designer, which owns the ordered field-instance list and applies
/// property commits through `update_element`, and the form runtime,
/// which receives values through `submit_value` and flags required
/// fields that are still empty on a submit attempt.
struct FormDesigner {
    /// Ordered field instances of the form under construction
    fields: Vec<FieldInstance>,
    /// Which surface of the field is shown
    mode: RenderMode,
    /// Properties editor bound to the first field
    properties: PropertiesForm,
    /// Capture control; exists only while the form surface is mounted
    capture: Option<CaptureField>,
    /// Shared upload client
    uploader: Uploader,
    /// Values reported by fields, by field id
    submissions: Vec<(String, String)>,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User switched between designer, properties, and form surfaces
    ModeSelected(RenderMode),
    /// An event from the rendered field surface
    Field(field::Event),
    /// User attempted to submit the filled form
    SubmitForm,
}

impl FormDesigner {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let instance = IMAGE_FIELD.construct("image-1");
        let properties = PropertiesForm::new(&instance);

        (
            FormDesigner {
                fields: vec![instance],
                mode: RenderMode::Designer,
                properties,
                capture: None,
                uploader: Uploader::new(),
                submissions: Vec::new(),
                status: "Ready. Switch the Image field between surfaces.".to_string(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ModeSelected(mode) => {
                if mode == self.mode {
                    return Task::none();
                }

                // Entering the form mounts a fresh capture control; leaving
                // it unmounts the control, so completions of any still
                // pending pipeline run find no field to update
                self.capture = match mode {
                    RenderMode::Form => self
                        .fields
                        .first()
                        .map(|instance| CaptureField::new(instance, self.uploader.clone())),
                    _ => None,
                };

                if mode == RenderMode::Properties {
                    if let Some(instance) = self.fields.first() {
                        self.properties.reset(instance);
                    }
                }

                self.mode = mode;
                Task::none()
            }

            Message::Field(field::Event::Capture(event)) => {
                let Some(capture) = self.capture.as_mut() else {
                    // Late completion after the field was unmounted
                    return Task::none();
                };
                match capture.update(event) {
                    capture::Action::Run(task) => {
                        task.map(|event| Message::Field(field::Event::Capture(event)))
                    }
                    capture::Action::Submit { field_id, value } => {
                        self.submit_value(field_id, value);
                        Task::none()
                    }
                    capture::Action::None => Task::none(),
                }
            }

            Message::Field(field::Event::Properties(event)) => {
                match self.properties.update(event) {
                    properties::Action::Commit(instance) => {
                        self.update_element(instance);
                        Task::none()
                    }
                    properties::Action::None => Task::none(),
                }
            }

            Message::SubmitForm => {
                let mut missing = 0;
                for instance in &self.fields {
                    let value = self
                        .submissions
                        .iter()
                        .find(|(id, _)| id == instance.id())
                        .map(|(_, value)| value.as_str())
                        .unwrap_or("");
                    let valid = IMAGE_FIELD.validate(instance, value);
                    if !valid {
                        missing += 1;
                    }
                    // Mirror the verdict into the mounted capture control
                    if let Some(capture) = self.capture.as_mut() {
                        if capture.field_id() == instance.id() {
                            capture.set_invalid(!valid);
                        }
                    }
                }

                self.status = if missing > 0 {
                    format!("⚠️  {} required field(s) still need a capture.", missing)
                } else {
                    format!("✅ Form submitted with {} value(s).", self.submissions.len())
                };
                Task::none()
            }
        }
    }

    /// Form-runtime callback: a field reported a validated value.
    /// Replaces any previous value for the same field id.
    fn submit_value(&mut self, field_id: String, value: String) {
        self.submissions.retain(|(id, _)| *id != field_id);
        self.status = format!("Field '{}' captured {}.", field_id, value);
        self.submissions.push((field_id, value));

        // A fresh value clears the missing-required flag
        if let Some(capture) = self.capture.as_mut() {
            capture.set_invalid(false);
        }
    }

    /// Designer callback: the properties editor committed new attributes.
    /// Replaces the matching instance in the shared field collection.
    fn update_element(&mut self, updated: FieldInstance) {
        let Some(slot) = self.fields.iter_mut().find(|f| f.id() == updated.id()) else {
            return;
        };
        *slot = updated.clone();
        self.properties.reset(&updated);
        self.status = format!(
            "Updated field '{}': label {:?}, required {}.",
            updated.id(),
            updated.attributes().label,
            updated.attributes().required,
        );
        println!("🛠  {}", self.status);
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let mode_button = |label: &'static str, mode: RenderMode| {
            let style = if self.mode == mode {
                button::primary
            } else {
                button::secondary
            };
            button(text(label))
                .style(style)
                .on_press(Message::ModeSelected(mode))
                .padding(10)
        };

        let modes = row![
            mode_button("Designer", RenderMode::Designer),
            mode_button("Properties", RenderMode::Properties),
            mode_button("Preview form", RenderMode::Form),
        ]
        .spacing(10);

        let surface: Element<'_, Message> = match self.fields.first() {
            Some(instance) => field::render(
                self.mode,
                instance,
                self.capture.as_ref(),
                &self.properties,
            )
            .map(Message::Field),
            None => text("No fields on this form yet.").into(),
        };

        let mut content = column![
            text("Form Designer").size(32),
            modes,
            container(surface).padding(20),
        ]
        .spacing(20)
        .padding(40)
        .align_x(Alignment::Center);

        if self.mode == RenderMode::Form {
            content = content.push(
                button(text("Submit form"))
                    .on_press(Message::SubmitForm)
                    .padding(10),
            );
        }

        content = content.push(text(&self.status).size(14));

        container(content)
            .width(Length::Fill)
            .height(Length::Fill)
            .center_x(Length::Fill)
            .center_y(Length::Fill)
            .into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application(
        "Form Designer — Image Field",
        FormDesigner::update,
        FormDesigner::view,
    )
    .theme(FormDesigner::theme)
    .centered()
    .run_with(FormDesigner::new)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_late_completion_after_unmount_is_a_no_op() {
        let (mut app, _) = FormDesigner::new();
        assert!(app.capture.is_none());

        // A completion arriving while no capture control is mounted
        app.update(Message::Field(field::Event::Capture(
            capture::Event::Uploaded {
                generation: 1,
                result: Ok(upload::UploadResult {
                    image_path: "uploads/late.png".to_string(),
                }),
            },
        )));

        assert!(app.submissions.is_empty());
        assert!(app.capture.is_none());
    }

    #[test]
    fn test_submit_attempt_flags_missing_required_capture() {
        let (mut app, _) = FormDesigner::new();
        app.update(Message::ModeSelected(RenderMode::Form));
        assert!(app.capture.is_some());

        app.update(Message::SubmitForm);

        let capture = app.capture.as_ref().unwrap();
        assert!(capture.has_error());
        assert!(app.status.contains("required"));
    }

    #[test]
    fn test_property_commit_replaces_the_instance() {
        let (mut app, _) = FormDesigner::new();
        app.update(Message::ModeSelected(RenderMode::Properties));

        app.update(Message::Field(field::Event::Properties(
            properties::Event::LabelEdited("Site photo".to_string()),
        )));
        app.update(Message::Field(field::Event::Properties(
            properties::Event::RequiredToggled(false),
        )));

        let instance = app.fields.first().unwrap();
        assert_eq!(instance.attributes().label, "Site photo");
        assert!(!instance.attributes().required);
    }

    #[test]
    fn test_leaving_form_mode_unmounts_the_capture_control() {
        let (mut app, _) = FormDesigner::new();
        app.update(Message::ModeSelected(RenderMode::Form));
        assert!(app.capture.is_some());

        app.update(Message::ModeSelected(RenderMode::Designer));
        assert!(app.capture.is_none());
    }
}
