use iced::widget::{
    button, column, container, horizontal_space, image as iced_image, row, stack, text,
};
use iced::{Alignment, Element, Length, Task, Theme};

use base64::Engine as _;
use rfd::FileDialog;
use std::collections::HashMap;

// Declare the application modules
mod api;
mod state;
mod ui;

use api::client::ApiClient;
use api::error::ApiError;
use api::models::{AuthResponse, AuthToken, ImageRecord, UploadRequest};
use state::data::{sniff_content_type, PickedFile, Scope, UploadDraft};
use state::gallery::{Gallery, LoadTicket};
use state::session::{SessionManager, SessionStatus, SessionStore};
use ui::auth::{AuthForm, AuthMode};

/// Main application state
struct PixShare {
    /// HTTP client for the backend
    api: ApiClient,
    /// The authenticated session
    session: SessionManager,
    /// Image list for the active visibility scope
    gallery: Gallery,
    /// Login/register form
    auth_form: AuthForm,
    /// Upload panel state
    upload: UploadDraft,
    /// Decoded image handles per image id, so base64 payloads are not
    /// re-decoded on every frame
    thumbnails: HashMap<String, iced_image::Handle>,
    /// One-line outcome of the latest action
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    // Auth form
    UsernameChanged(String),
    EmailChanged(String),
    PasswordChanged(String),
    AuthModeToggled,
    AuthSubmitted,
    AuthCompleted(Result<AuthResponse, ApiError>),
    LogoutPressed,
    // Gallery
    ScopeSelected(Scope),
    RefreshPressed,
    ImagesLoaded(LoadTicket, Result<Vec<ImageRecord>, ApiError>),
    ImageOpened(String),
    DetailClosed,
    SpoilersToggled(bool),
    DeleteRequested(String),
    DeleteCompleted(String, Result<(), ApiError>),
    // Upload panel
    PickImagePressed,
    CaptionChanged(String),
    PrivateToggled(bool),
    UploadPressed,
    UploadCompleted(Result<ImageRecord, ApiError>),
}

impl PixShare {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let api = ApiClient::from_env();
        println!("🖼  PixShare starting (server: {})", api.base_url());

        let mut session = SessionManager::new(SessionStore::new());
        session.initialize();

        let mut app = PixShare {
            api,
            session,
            gallery: Gallery::new(),
            auth_form: AuthForm::default(),
            upload: UploadDraft::default(),
            thumbnails: HashMap::new(),
            status: String::new(),
        };

        // A restored session goes straight to the gallery
        let task = if app.session.is_authenticated() {
            app.load_images()
        } else {
            Task::none()
        };

        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::UsernameChanged(username) => {
                self.auth_form.username = username;
                Task::none()
            }
            Message::EmailChanged(email) => {
                self.auth_form.email = email;
                Task::none()
            }
            Message::PasswordChanged(password) => {
                self.auth_form.password = password;
                Task::none()
            }
            Message::AuthModeToggled => {
                self.auth_form.switch_mode();
                Task::none()
            }
            Message::AuthSubmitted => {
                if !self.auth_form.ready() {
                    return Task::none();
                }

                self.auth_form.submitting = true;
                self.auth_form.error = None;

                let api = self.api.clone();
                let username = self.auth_form.username.trim().to_string();
                let password = self.auth_form.password.clone();

                match self.auth_form.mode {
                    AuthMode::Login => Task::perform(
                        async move { api.login(username, password).await },
                        Message::AuthCompleted,
                    ),
                    AuthMode::Register => {
                        let email = self.auth_form.email.trim().to_string();
                        Task::perform(
                            async move { api.register(username, email, password).await },
                            Message::AuthCompleted,
                        )
                    }
                }
            }
            Message::AuthCompleted(result) => {
                self.auth_form.submitting = false;

                let fallback = match self.auth_form.mode {
                    AuthMode::Login => "Login failed. Check your username and password.",
                    AuthMode::Register => "Registration failed. Try a different username or email.",
                };

                match self.session.complete_auth(result, fallback) {
                    Ok(()) => {
                        let username = self
                            .session
                            .user()
                            .map(|user| user.username.clone())
                            .unwrap_or_default();
                        println!("👋 Signed in as {username}");
                        self.status = format!("Signed in as {username}");
                        self.auth_form = AuthForm::default();
                        self.load_images()
                    }
                    Err(message) => {
                        self.auth_form.error = Some(message);
                        Task::none()
                    }
                }
            }
            Message::LogoutPressed => {
                println!("👋 Signed out");
                self.session.logout();
                self.gallery = Gallery::new();
                self.thumbnails.clear();
                self.upload = UploadDraft::default();
                self.status.clear();
                Task::none()
            }
            Message::ScopeSelected(scope) => {
                let ticket = self.gallery.set_scope(scope);
                self.fetch(ticket)
            }
            Message::RefreshPressed => self.load_images(),
            Message::ImagesLoaded(ticket, result) => {
                if let Err(err) = &result {
                    if err.is_unauthorized() {
                        self.expire_session();
                        return Task::none();
                    }
                }

                if self.gallery.apply_load(ticket, result) {
                    self.rebuild_thumbnails();
                }

                Task::none()
            }
            Message::ImageOpened(id) => {
                let record = self
                    .gallery
                    .items()
                    .iter()
                    .find(|image| image.id == id)
                    .cloned();
                self.gallery.select(record);
                Task::none()
            }
            Message::DetailClosed => {
                self.gallery.select(None);
                Task::none()
            }
            Message::SpoilersToggled(reveal) => {
                self.gallery.set_reveal_spoilers(reveal);
                Task::none()
            }
            Message::DeleteRequested(id) => {
                let Some(token) = self.session.auth_token().cloned() else {
                    return Task::none();
                };

                let api = self.api.clone();
                let request_id = id.clone();

                Task::perform(
                    async move { api.delete_image(&token, &id).await },
                    move |result| Message::DeleteCompleted(request_id.clone(), result),
                )
            }
            Message::DeleteCompleted(id, result) => {
                if let Err(err) = &result {
                    if err.is_unauthorized() {
                        self.expire_session();
                        return Task::none();
                    }
                }

                match self.gallery.apply_delete(&id, result) {
                    Ok(()) => {
                        self.thumbnails.remove(&id);
                        self.status = "Image deleted.".to_string();
                    }
                    Err(message) => {
                        self.status = message;
                    }
                }

                Task::none()
            }
            Message::PickImagePressed => {
                let file = FileDialog::new()
                    .set_title("Choose an image to share")
                    .add_filter("Images", &["jpg", "jpeg", "png", "gif", "webp"])
                    .pick_file();

                if let Some(path) = file {
                    self.upload.file = Some(PickedFile::from_path(path));
                    self.upload.error = None;
                }

                Task::none()
            }
            Message::CaptionChanged(caption) => {
                self.upload.caption = caption;
                Task::none()
            }
            Message::PrivateToggled(is_private) => {
                self.upload.is_private = is_private;
                Task::none()
            }
            Message::UploadPressed => match self.upload.validate() {
                Ok(file) => {
                    let Some(token) = self.session.auth_token().cloned() else {
                        return Task::none();
                    };

                    self.upload.in_flight = true;
                    self.upload.error = None;

                    let api = self.api.clone();
                    let caption = self.upload.caption.trim().to_string();
                    let is_private = self.upload.is_private;

                    Task::perform(
                        upload_image_task(api, token, file, caption, is_private),
                        Message::UploadCompleted,
                    )
                }
                Err(message) => {
                    self.upload.error = Some(message);
                    Task::none()
                }
            },
            Message::UploadCompleted(result) => {
                self.upload.in_flight = false;

                match result {
                    Ok(image) => {
                        println!("✅ Uploaded {} ({})", image.filename, image.content_type);
                        self.status = format!("Uploaded {}", image.filename);
                        self.upload.clear();
                        // The server assigns id and timestamp, so the
                        // list refreshes instead of inserting locally
                        self.load_images()
                    }
                    Err(err) => {
                        if err.is_unauthorized() {
                            self.expire_session();
                            return Task::none();
                        }

                        self.upload.error =
                            Some(err.user_message("Upload failed. Please try again."));
                        Task::none()
                    }
                }
            }
        }
    }

    /// Start a list request for the gallery's current scope
    fn load_images(&mut self) -> Task<Message> {
        let ticket = self.gallery.begin_load();
        self.fetch(ticket)
    }

    /// Run the list request for an already issued ticket
    fn fetch(&self, ticket: LoadTicket) -> Task<Message> {
        let Some(token) = self.session.auth_token().cloned() else {
            return Task::none();
        };

        let api = self.api.clone();

        Task::perform(
            async move { api.list_images(&token, ticket.scope().is_private()).await },
            move |result| Message::ImagesLoaded(ticket, result),
        )
    }

    /// A 401 on an authenticated call means the stored token has gone
    /// stale: sign out and drop everything tied to the old session.
    fn expire_session(&mut self) {
        eprintln!("🔑 Stored session was rejected by the server, signing out");
        self.session.logout();
        self.gallery = Gallery::new();
        self.thumbnails.clear();
        self.upload = UploadDraft::default();
        self.auth_form = AuthForm::default();
        self.auth_form.error = Some("Your session has expired. Please log in again.".to_string());
        self.status.clear();
    }

    /// Decode base64 payloads into image handles, once per image.
    /// Handles for images that stayed in the list are reused.
    fn rebuild_thumbnails(&mut self) {
        let mut handles = HashMap::new();

        for image in self.gallery.items() {
            if let Some(handle) = self.thumbnails.remove(&image.id) {
                handles.insert(image.id.clone(), handle);
                continue;
            }

            match base64::engine::general_purpose::STANDARD.decode(&image.image_data) {
                Ok(bytes) => {
                    handles.insert(image.id.clone(), iced_image::Handle::from_bytes(bytes));
                }
                Err(e) => eprintln!("⚠️  Undecodable payload for image {}: {e}", image.id),
            }
        }

        self.thumbnails = handles;
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        match self.session.status() {
            SessionStatus::Authenticated => self.gallery_screen(),
            _ => ui::auth::view(&self.auth_form),
        }
    }

    /// The signed-in screen: top bar, upload panel, grid, status line
    fn gallery_screen(&self) -> Element<'_, Message> {
        let username = self
            .session
            .user()
            .map(|user| user.username.as_str())
            .unwrap_or("");

        let top_bar = row![
            text("PixShare").size(28),
            horizontal_space(),
            text!("Signed in as {username}").size(14),
            button(text("Log out").size(14))
                .style(button::text)
                .on_press(Message::LogoutPressed),
        ]
        .spacing(12)
        .align_y(Alignment::Center);

        let screen = column![
            top_bar,
            ui::upload::view(&self.upload),
            ui::gallery::view(&self.gallery, &self.thumbnails),
            text(self.status.as_str()).size(13),
        ]
        .spacing(16)
        .padding(20);

        let base = container(screen).width(Length::Fill).height(Length::Fill);

        match self.gallery.selected() {
            Some(image) => stack![
                base,
                ui::gallery::detail(image, self.thumbnails.get(&image.id))
            ]
            .into(),
            None => base.into(),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn main() -> iced::Result {
    iced::application("PixShare", PixShare::update, PixShare::view)
        .theme(PixShare::theme)
        .centered()
        .run_with(PixShare::new)
}

/// Read the picked file, check its format locally and push it to the
/// server. Runs as a background task so the UI stays responsive.
async fn upload_image_task(
    api: ApiClient,
    token: AuthToken,
    file: PickedFile,
    caption: String,
    is_private: bool,
) -> Result<ImageRecord, ApiError> {
    let bytes = tokio::fs::read(&file.path)
        .await
        .map_err(|e| ApiError::Network(format!("Could not read {}: {e}", file.filename)))?;

    // Reject unsupported formats before the bytes ever leave the machine
    let content_type = sniff_content_type(&bytes).map_err(|message| ApiError::Rejected {
        status: 400,
        detail: message,
    })?;

    api.upload_image(
        &token,
        UploadRequest {
            bytes,
            filename: file.filename,
            content_type: content_type.to_string(),
            caption,
            is_private,
        },
    )
    .await
}
