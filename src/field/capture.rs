/// Live-form renderer for the image field: the capture pipeline
///
/// Owns the ephemeral per-render state of one placed field while the form
/// is being filled: pick a file, normalize it to PNG on a background task,
/// upload it, validate the returned path, and report the value to the
/// owning form exactly once. State is created when the form mounts the
/// field and discarded when it unmounts; nothing here is persisted.

use chrono::Utc;
use iced::widget::image::Handle;
use iced::widget::{button, column, container, text};
use iced::{Alignment, Element, Task};
use std::path::PathBuf;

use super::descriptor::IMAGE_FIELD;
use super::instance::FieldInstance;
use crate::error::CaptureError;
use crate::imaging::compress::CompressOptions;
use crate::imaging::convert::{self, EncodedImage};
use crate::upload::{UploadResult, Uploader};

/// Pipeline state. Each variant carries only the data valid in it:
/// a preview exists once conversion produced one, and an image path
/// exists only after upload *and* validation succeeded.
#[derive(Debug, Clone)]
pub enum CaptureState {
    /// Nothing captured yet (or the last capture was retaken)
    Idle,
    /// A picked file is being decoded and re-encoded to PNG
    Converting,
    /// The normalized payload is in flight to the endpoint
    Uploading { preview: Handle },
    /// Uploaded and validated; the value has been reported upward
    Success {
        image_path: String,
        preview: Option<Handle>,
    },
    /// The pipeline failed; the cause stays distinguishable for logs
    Failed { cause: CaptureError },
}

/// Events produced by the capture control and its background tasks.
///
/// Async completions carry the generation of the pipeline run that
/// produced them, so a superseded run can never overwrite a newer one.
#[derive(Debug, Clone)]
pub enum Event {
    /// User clicked the capture control
    PickRequested,
    /// File dialog closed; `None` means cancelled
    FilePicked(Option<PathBuf>),
    /// Background conversion finished
    Converted {
        generation: u64,
        result: Result<EncodedImage, CaptureError>,
    },
    /// Upload request finished
    Uploaded {
        generation: u64,
        result: Result<UploadResult, CaptureError>,
    },
    /// User discarded the current capture to take another
    RetakeRequested,
}

/// What the host must do after an update.
pub enum Action {
    None,
    /// Run a background task and feed its event back into this field
    Run(Task<Event>),
    /// Report a validated value to the owning form
    Submit { field_id: String, value: String },
}

/// Capture control for one mounted field instance.
pub struct CaptureField {
    instance: FieldInstance,
    uploader: Uploader,
    compress_options: CompressOptions,
    state: CaptureState,
    /// Mirror of the externally supplied invalidity flag, independent of
    /// the pipeline (the form raises it on submit with a missing value)
    invalid: bool,
    /// Bumped on every new pipeline run; stale completions are dropped
    generation: u64,
}

impl CaptureField {
    /// Mount the capture control for `instance`. State starts fresh.
    pub fn new(instance: &FieldInstance, uploader: Uploader) -> Self {
        Self {
            instance: instance.clone(),
            uploader,
            compress_options: CompressOptions::default(),
            state: CaptureState::Idle,
            invalid: false,
            generation: 0,
        }
    }

    /// Override the compression limit (defaults to 3 MB)
    pub fn with_compress_options(mut self, options: CompressOptions) -> Self {
        self.compress_options = options;
        self
    }

    /// Id of the instance this control is mounted for
    pub fn field_id(&self) -> &str {
        self.instance.id()
    }

    /// Current pipeline state
    pub fn state(&self) -> &CaptureState {
        &self.state
    }

    /// The validated uploaded path, if any
    pub fn value(&self) -> Option<&str> {
        match &self.state {
            CaptureState::Success { image_path, .. } => Some(image_path),
            _ => None,
        }
    }

    /// Whether a conversion or upload is in flight
    pub fn is_loading(&self) -> bool {
        matches!(
            self.state,
            CaptureState::Converting | CaptureState::Uploading { .. }
        )
    }

    /// Whether the error indicator is shown: either the pipeline failed
    /// or the surrounding form marked this field invalid
    pub fn has_error(&self) -> bool {
        self.invalid || matches!(self.state, CaptureState::Failed { .. })
    }

    /// Mirror the externally supplied invalidity flag
    pub fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }

    pub fn update(&mut self, event: Event) -> Action {
        match event {
            Event::PickRequested => {
                // Native dialog, same blocking pattern as any picker press
                let picked = rfd::FileDialog::new()
                    .set_title("Capture or choose a photo")
                    .add_filter("Images", &["png", "jpg", "jpeg", "webp", "bmp", "gif"])
                    .pick_file();
                self.update(Event::FilePicked(picked))
            }

            // Dialog cancelled: not an error, stay where we are
            Event::FilePicked(None) => Action::None,

            Event::FilePicked(Some(path)) => {
                // New run supersedes anything in flight
                self.generation += 1;
                let generation = self.generation;
                self.state = CaptureState::Converting;

                println!("🖼️  Converting {} ...", path.display());

                let options = self.compress_options;
                Action::Run(Task::perform(
                    convert::encode_capture(path, options),
                    move |result| Event::Converted { generation, result },
                ))
            }

            Event::Converted { generation, result } => {
                if generation != self.generation {
                    // Completion of a superseded run, or the field was
                    // remounted since: drop it
                    return Action::None;
                }
                match result {
                    Ok(encoded) => {
                        let preview = Handle::from_bytes(encoded.png);
                        self.state = CaptureState::Uploading { preview };

                        let image_name = Utc::now().timestamp_millis().to_string();
                        println!("📤 Uploading capture as {} ...", image_name);

                        let upload = self.uploader.clone().upload(encoded.data_url, image_name);
                        Action::Run(Task::perform(upload, move |result| Event::Uploaded {
                            generation,
                            result,
                        }))
                    }
                    Err(cause) => {
                        cause.log();
                        self.state = CaptureState::Failed { cause };
                        Action::None
                    }
                }
            }

            Event::Uploaded { generation, result } => {
                if generation != self.generation {
                    return Action::None;
                }
                match result {
                    Ok(UploadResult { image_path }) => {
                        if IMAGE_FIELD.validate(&self.instance, &image_path) {
                            println!("✅ Upload complete: {}", image_path);
                            let preview = self.take_preview();
                            self.state = CaptureState::Success {
                                image_path: image_path.clone(),
                                preview,
                            };
                            Action::Submit {
                                field_id: self.instance.id().to_string(),
                                value: image_path,
                            }
                        } else {
                            // Upload worked but the path fails the field's
                            // own validation: withhold the value
                            let cause = CaptureError::Rejected(image_path);
                            cause.log();
                            self.state = CaptureState::Failed { cause };
                            Action::None
                        }
                    }
                    Err(cause) => {
                        cause.log();
                        self.state = CaptureState::Failed { cause };
                        Action::None
                    }
                }
            }

            Event::RetakeRequested => {
                // Drops the previous preview and supersedes any in-flight run
                self.generation += 1;
                self.state = CaptureState::Idle;
                Action::None
            }
        }
    }

    /// Pull the preview out of the uploading state without cloning it
    fn take_preview(&mut self) -> Option<Handle> {
        match std::mem::replace(&mut self.state, CaptureState::Idle) {
            CaptureState::Uploading { preview } => Some(preview),
            other => {
                self.state = other;
                None
            }
        }
    }

    pub fn view(&self) -> Element<'_, Event> {
        let attributes = self.instance.attributes();
        let mut label = attributes.label.clone();
        if attributes.required {
            label.push('*');
        }
        let label = if self.has_error() {
            text(label).style(text::danger)
        } else {
            text(label)
        };

        let frame: Element<'_, Event> = match &self.state {
            CaptureState::Converting => text("⏳ Converting...").size(16).into(),
            CaptureState::Uploading { .. } => text("⏳ Uploading...").size(16).into(),
            CaptureState::Success {
                preview: Some(preview),
                ..
            } => column![
                iced::widget::image(preview.clone()).width(128.0).height(128.0),
                button(text("Retake"))
                    .on_press(Event::RetakeRequested)
                    .padding(6),
            ]
            .spacing(8)
            .align_x(Alignment::Center)
            .into(),
            CaptureState::Idle
            | CaptureState::Failed { .. }
            | CaptureState::Success { preview: None, .. } => button(text(IMAGE_FIELD.icon).size(48))
                .style(button::text)
                .on_press(Event::PickRequested)
                .padding(10)
                .into(),
        };

        column![
            label,
            container(frame)
                .style(container::bordered_box)
                .center_x(168.0)
                .center_y(168.0),
        ]
        .spacing(8)
        .into()
    }
}
