/// The "Image" field type
///
/// This module groups everything the field contributes to the designer:
/// - Static type descriptor and render-mode dispatch (descriptor.rs)
/// - Placed instances and their attribute pair (instance.rs)
/// - Designer-canvas placeholder (designer.rs)
/// - Live capture pipeline (capture.rs)
/// - Properties editor (properties.rs)

pub mod capture;
pub mod descriptor;
pub mod designer;
pub mod instance;
pub mod properties;

use iced::Element;

use capture::CaptureField;
use descriptor::RenderMode;
use instance::FieldInstance;
use properties::PropertiesForm;

/// Events from whichever surface of the field is currently rendered.
#[derive(Debug, Clone)]
pub enum Event {
    Capture(capture::Event),
    Properties(properties::Event),
}

/// Render dispatch over the three field surfaces.
///
/// The capture control only exists while the live form has the field
/// mounted; outside form mode the placeholder is shown instead.
pub fn render<'a>(
    mode: RenderMode,
    instance: &'a FieldInstance,
    capture: Option<&'a CaptureField>,
    properties: &'a PropertiesForm,
) -> Element<'a, Event> {
    match mode {
        RenderMode::Designer => designer::view(instance),
        RenderMode::Form => match capture {
            Some(capture) => capture.view().map(Event::Capture),
            None => designer::view(instance),
        },
        RenderMode::Properties => properties.view().map(Event::Properties),
    }
}
