/// Designer-canvas preview of the image field
///
/// A static placeholder: label, hint, icon. No state, no validation, no
/// side effects; the instance is only read.

use iced::widget::{column, text};
use iced::{Alignment, Element};

use super::descriptor::IMAGE_FIELD;
use super::instance::FieldInstance;

pub fn view<'a, Message: 'a>(instance: &'a FieldInstance) -> Element<'a, Message> {
    column![
        text(instance.attributes().label.as_str()).size(16),
        text("This will request the user for an image capture or upload")
            .size(13)
            .style(text::secondary),
        text(IMAGE_FIELD.icon).size(32),
    ]
    .spacing(8)
    .align_x(Alignment::Center)
    .into()
}
