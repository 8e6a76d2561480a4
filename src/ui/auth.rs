/// Login and registration screen

use iced::widget::{button, column, container, text, text_input, Column};
use iced::{Alignment, Element, Length};

use crate::Message;

/// Which endpoint the form submits to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Register,
}

impl AuthMode {
    pub fn title(self) -> &'static str {
        match self {
            AuthMode::Login => "Welcome back",
            AuthMode::Register => "Create an account",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            AuthMode::Login => "Log in",
            AuthMode::Register => "Register",
        }
    }

    pub fn switch_prompt(self) -> &'static str {
        match self {
            AuthMode::Login => "New here? Create an account",
            AuthMode::Register => "Already have an account? Log in",
        }
    }
}

/// Auth form state owned by the app
#[derive(Debug, Clone, Default)]
pub struct AuthForm {
    pub mode: AuthMode,
    pub username: String,
    pub email: String,
    pub password: String,
    pub error: Option<String>,
    pub submitting: bool,
}

impl AuthForm {
    /// Local check before hitting the network.
    /// Registration additionally needs an email address.
    pub fn ready(&self) -> bool {
        !self.submitting
            && !self.username.trim().is_empty()
            && !self.password.is_empty()
            && (self.mode == AuthMode::Login || !self.email.trim().is_empty())
    }

    /// Flip between login and registration, dropping any stale error
    pub fn switch_mode(&mut self) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.error = None;
    }
}

/// Build the auth screen
pub fn view(form: &AuthForm) -> Element<'_, Message> {
    let mut fields: Column<Message> = column![
        text("PixShare").size(48),
        text(form.mode.title()).size(20),
        text_input("Username", &form.username)
            .on_input(Message::UsernameChanged)
            .padding(10),
    ]
    .spacing(12)
    .max_width(360)
    .align_x(Alignment::Center);

    if form.mode == AuthMode::Register {
        fields = fields.push(
            text_input("Email", &form.email)
                .on_input(Message::EmailChanged)
                .padding(10),
        );
    }

    fields = fields.push(
        text_input("Password", &form.password)
            .secure(true)
            .on_input(Message::PasswordChanged)
            .on_submit(Message::AuthSubmitted)
            .padding(10),
    );

    if let Some(error) = &form.error {
        fields = fields.push(text(error.as_str()).size(14).style(text::danger));
    }

    let submit_label = if form.submitting {
        "Please wait…"
    } else {
        form.mode.submit_label()
    };

    fields = fields
        .push(
            button(text(submit_label))
                .on_press_maybe(form.ready().then_some(Message::AuthSubmitted))
                .padding(10)
                .width(Length::Fill),
        )
        .push(
            button(text(form.mode.switch_prompt()).size(14))
                .style(button::text)
                .on_press(Message::AuthModeToggled),
        );

    container(fields)
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_needs_username_and_password() {
        let mut form = AuthForm::default();
        assert!(!form.ready());

        form.username = "alice".to_string();
        assert!(!form.ready());

        form.password = "x".to_string();
        assert!(form.ready());
    }

    #[test]
    fn test_register_additionally_needs_email() {
        let mut form = AuthForm {
            mode: AuthMode::Register,
            username: "alice".to_string(),
            password: "x".to_string(),
            ..AuthForm::default()
        };
        assert!(!form.ready());

        form.email = "alice@example.com".to_string();
        assert!(form.ready());
    }

    #[test]
    fn test_submitting_blocks_resubmit() {
        let form = AuthForm {
            username: "alice".to_string(),
            password: "x".to_string(),
            submitting: true,
            ..AuthForm::default()
        };
        assert!(!form.ready());
    }

    #[test]
    fn test_switch_mode_drops_error() {
        let mut form = AuthForm {
            error: Some("Incorrect username or password".to_string()),
            ..AuthForm::default()
        };

        form.switch_mode();

        assert_eq!(form.mode, AuthMode::Register);
        assert!(form.error.is_none());
    }
}
