use iced::widget::image::Handle as ImageHandle;
use iced::widget::{button, column, container, scrollable, text, Column, Image};
use iced::{Alignment, Element, Length, Task, Theme};
use rfd::{FileDialog, MessageDialog, MessageLevel};
use std::path::PathBuf;

mod config;
mod remote;
mod state;
mod ui;

use config::AppConfig;
use remote::RemoteClient;
use state::form::FormState;
use state::gallery::GalleryState;
use state::operation::{CropField, OperationKind};
use state::preview::{PreviewSlot, PreviewSource};

/// Main application state
struct PhotoForge {
    /// The form/submission state machine
    form: FormState,
    /// Per-user list of previously processed images
    gallery: GalleryState,
    /// The one live display image
    preview: PreviewSlot,
    /// Rendered handle for the preview bytes, rebuilt when they change
    display: Option<ImageHandle>,
    /// Client for the processing service
    remote: RemoteClient,
    /// Persisted settings (service URL, last username)
    config: AppConfig,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// User clicked the "Select Image" button
    PickFile,
    /// Background file read completed with (filename, bytes)
    FileLoaded(Result<(String, Vec<u8>), String>),
    /// User edited the username field
    UsernameChanged(String),
    /// User picked a different operation
    OperationPicked(OperationKind),
    /// User edited one of the crop fields
    CropFieldEdited(CropField, String),
    /// User edited the rotation angle
    AngleEdited(String),
    /// User clicked the submit button
    Submit,
    /// The process request resolved
    ProcessFinished(Result<Vec<u8>, String>),
    /// A gallery listing resolved; token identifies which refresh it was
    GalleryFetched {
        token: u64,
        result: Result<Vec<String>, String>,
    },
    /// User clicked a gallery entry
    GalleryEntrySelected(String),
    /// The gallery asset fetch resolved
    GalleryAssetFetched(Result<Vec<u8>, String>),
    /// User clicked the download button
    Download,
    /// The background save completed
    SaveFinished(Result<PathBuf, String>),
}

impl PhotoForge {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let config = AppConfig::load();
        let remote = RemoteClient::new(&config.server_url);
        println!("🌐 Using image service at {}", config.server_url);

        let form = FormState::new(config.username.clone());
        let mut gallery = GalleryState::new();

        // Fetch the gallery straight away when a username was restored.
        let task = if form.username.is_empty() {
            Task::none()
        } else {
            let token = gallery.begin_refresh();
            fetch_gallery(remote.clone(), form.username.clone(), token)
        };

        (
            PhotoForge {
                form,
                gallery,
                preview: PreviewSlot::new(),
                display: None,
                remote,
                config,
                status: String::from("Ready. Select an image to begin."),
            },
            task,
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::PickFile => {
                // Show the native file picker dialog
                let picked = FileDialog::new()
                    .set_title("Select an Image")
                    .add_filter("Images", &["jpg", "jpeg", "png", "gif"])
                    .pick_file();

                if let Some(path) = picked {
                    self.status = format!("Loading {}...", path.display());
                    return Task::perform(load_image_file(path), Message::FileLoaded);
                }

                Task::none()
            }
            Message::FileLoaded(Ok((filename, bytes))) => {
                self.form.select_source(bytes.clone(), filename.clone());
                self.preview.install(bytes, PreviewSource::Selection);
                self.refresh_display();
                self.status = format!("Loaded {}. Pick an operation and process.", filename);
                Task::none()
            }
            Message::FileLoaded(Err(e)) => {
                eprintln!("⚠️  {}", e);
                self.status = format!("⚠️  {}", e);
                Task::none()
            }
            Message::UsernameChanged(username) => {
                self.form.username = username;

                // Every edit re-scopes the gallery; the token keeps late
                // responses from older usernames out.
                if self.form.username.is_empty() {
                    self.gallery.clear();
                    return Task::none();
                }
                let token = self.gallery.begin_refresh();
                fetch_gallery(self.remote.clone(), self.form.username.clone(), token)
            }
            Message::OperationPicked(kind) => {
                self.form.operation = kind;
                Task::none()
            }
            Message::CropFieldEdited(field, value) => {
                self.form.crop.set(field, value);
                Task::none()
            }
            Message::AngleEdited(value) => {
                self.form.rotate.angle = value;
                Task::none()
            }
            Message::Submit => match self.form.begin_submit() {
                Ok(payload) => {
                    self.status = String::from("Processing...");
                    let remote = self.remote.clone();
                    Task::perform(
                        async move { remote.process(payload).await.map_err(|e| e.to_string()) },
                        Message::ProcessFinished,
                    )
                }
                Err(error) => {
                    // Validation failures block the request; nothing has
                    // touched the network at this point.
                    let _ = MessageDialog::new()
                        .set_level(MessageLevel::Warning)
                        .set_title("Cannot process")
                        .set_description(&error.to_string())
                        .show();
                    Task::none()
                }
            },
            Message::ProcessFinished(Ok(bytes)) => {
                let dimensions = describe_image(&bytes);

                // The response becomes both the display image and the next
                // upload source, so operations can be chained.
                self.form.finish_submit_ok(bytes.clone());
                self.preview.install(bytes, PreviewSource::Processed);
                self.refresh_display();

                self.status = match dimensions {
                    Some((w, h)) => format!("✅ Processed image ({}x{}). Ready for the next operation.", w, h),
                    None => String::from("✅ Processed image received. Ready for the next operation."),
                };
                println!("✅ Process request succeeded");

                // Remember the username that just produced a result.
                self.config.username = self.form.username.clone();
                self.config.save();

                // Exactly one gallery refresh per successful submission.
                let token = self.gallery.begin_refresh();
                fetch_gallery(self.remote.clone(), self.form.username.clone(), token)
            }
            Message::ProcessFinished(Err(e)) => {
                // The previous image and source stay exactly as they were.
                self.form.finish_submit_err();
                eprintln!("❌ Process request failed: {}", e);
                self.status = String::from("❌ Processing failed. The previous image is unchanged.");

                let _ = MessageDialog::new()
                    .set_level(MessageLevel::Error)
                    .set_title("Processing failed")
                    .set_description(&e)
                    .show();
                Task::none()
            }
            Message::GalleryFetched { token, result } => {
                match result {
                    Ok(entries) => {
                        if self.gallery.apply(token, entries) {
                            println!(
                                "🖼️  Gallery refreshed: {} entries",
                                self.gallery.entries().len()
                            );
                        } else {
                            println!("🔄 Discarded stale gallery response (token {})", token);
                        }
                    }
                    // Gallery failures never interrupt the form.
                    Err(e) => eprintln!("⚠️  Gallery refresh failed: {}", e),
                }
                Task::none()
            }
            Message::GalleryEntrySelected(filename) => {
                self.status = format!("Fetching {}...", filename);
                let remote = self.remote.clone();
                Task::perform(
                    async move { remote.fetch_asset(&filename).await.map_err(|e| e.to_string()) },
                    Message::GalleryAssetFetched,
                )
            }
            Message::GalleryAssetFetched(Ok(bytes)) => {
                // Display only; the pending upload is untouched.
                self.preview.install(bytes, PreviewSource::Gallery);
                self.refresh_display();
                self.status = String::from("Showing a previously processed image.");
                Task::none()
            }
            Message::GalleryAssetFetched(Err(e)) => {
                eprintln!("⚠️  Could not fetch gallery image: {}", e);
                self.status = String::from("⚠️  Could not fetch the gallery image.");
                Task::none()
            }
            Message::Download => {
                let Some(bytes) = self.preview.bytes() else {
                    return Task::none();
                };
                let bytes = bytes.to_vec();

                // Native save dialog; the suggested name is fixed no matter
                // what the actual encoding is.
                let picked = FileDialog::new()
                    .set_title("Save Processed Image")
                    .set_file_name("processed-image.jpg")
                    .save_file();

                if let Some(path) = picked {
                    return Task::perform(save_image(path, bytes), Message::SaveFinished);
                }
                Task::none()
            }
            Message::SaveFinished(Ok(path)) => {
                println!("💾 Saved image to {}", path.display());
                self.status = format!("💾 Saved to {}", path.display());
                Task::none()
            }
            Message::SaveFinished(Err(e)) => {
                eprintln!("⚠️  {}", e);
                self.status = format!("⚠️  {}", e);
                Task::none()
            }
        }
    }

    /// Rebuild the rendered image handle from the current preview bytes
    fn refresh_display(&mut self) {
        self.display = self
            .preview
            .current()
            .map(|preview| ImageHandle::from_bytes(preview.bytes().to_vec()));
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let mut content: Column<Message> = column![
            text("Photo Forge").size(32),
            ui::form::form_section(&self.form),
            text(&self.status).size(14),
        ]
        .spacing(16)
        .padding(24)
        .align_x(Alignment::Start);

        if let Some(handle) = &self.display {
            content = content.push(
                Image::new(handle.clone())
                    .width(Length::Fixed(480.0)),
            );
            content = content.push(button("Download").on_press(Message::Download).padding(8));
        }

        content = content.push(ui::gallery::gallery_section(
            &self.gallery,
            &self.form.username,
        ));

        scrollable(container(content).width(Length::Fill).center_x(Length::Fill)).into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application("Photo Forge", PhotoForge::update, PhotoForge::view)
        .theme(PhotoForge::theme)
        .centered()
        .run_with(PhotoForge::new)
}

/// Build the task that refreshes the gallery for a username
fn fetch_gallery(remote: RemoteClient, username: String, token: u64) -> Task<Message> {
    Task::perform(
        async move { remote.list_images(&username).await.map_err(|e| e.to_string()) },
        move |result| Message::GalleryFetched { token, result },
    )
}

/// Read a picked file off the UI thread
async fn load_image_file(path: PathBuf) -> Result<(String, Vec<u8>), String> {
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| String::from("upload.jpg"));

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    Ok((filename, bytes))
}

/// Write the displayed image to disk
async fn save_image(path: PathBuf, bytes: Vec<u8>) -> Result<PathBuf, String> {
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| format!("Failed to save {}: {}", path.display(), e))?;

    Ok(path)
}

/// Probe the dimensions of an encoded image, if it decodes at all
fn describe_image(bytes: &[u8]) -> Option<(u32, u32)> {
    use image::GenericImageView;

    image::load_from_memory(bytes)
        .ok()
        .map(|img| img.dimensions())
}
