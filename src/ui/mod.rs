//! UI rendering using egui.
//!
//! The auth card, the settings bar, and the companion painter. Draw
//! functions take data in and report intents back through [`UiActions`];
//! submit handling itself lives in the app loop.

mod auth_form;
mod companion;
mod settings_bar;
pub mod style;

pub use auth_form::draw_auth_card;
pub use companion::draw_companions;
pub use settings_bar::draw_settings_bar;

use crate::lang::Translations;

/// Which form is currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
    ForgotPassword,
}

impl AuthMode {
    pub fn title(self, t: &Translations) -> &'static str {
        match self {
            AuthMode::Login => t.login_title,
            AuthMode::Signup => t.signup_title,
            AuthMode::ForgotPassword => t.reset_title,
        }
    }

    pub fn subtitle(self, t: &Translations) -> &'static str {
        match self {
            AuthMode::Login => t.login_subtitle,
            AuthMode::Signup => t.signup_subtitle,
            AuthMode::ForgotPassword => t.reset_subtitle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Info,
    Warning,
    Error,
}

/// A persistent message box on the card (the immediate-mode stand-in for a
/// toast); replaced by the next outcome or dismissed by the user
#[derive(Debug, Clone)]
pub struct Banner {
    pub kind: BannerKind,
    pub title: String,
    pub body: String,
}

/// Field validation failures, translated at draw time so a language switch
/// re-renders them correctly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    InvalidEmail,
    PasswordTooShort,
    NameTooShort,
}

impl ValidationError {
    pub fn text(self, t: &Translations) -> &'static str {
        match self {
            ValidationError::InvalidEmail => t.invalid_email,
            ValidationError::PasswordTooShort => t.password_min,
            ValidationError::NameTooShort => t.name_min,
        }
    }
}

#[derive(Debug, Default)]
pub struct FieldErrors {
    pub email: Option<ValidationError>,
    pub password: Option<ValidationError>,
    pub name: Option<ValidationError>,
}

impl FieldErrors {
    pub fn clear(&mut self) {
        *self = FieldErrors::default();
    }

    pub fn is_empty(&self) -> bool {
        self.email.is_none() && self.password.is_none() && self.name.is_none()
    }
}

/// Intents reported by the UI pass, handled by the app loop
#[derive(Default)]
pub struct UiActions {
    /// The form validated and the user asked to submit
    pub submit_requested: bool,
}

/// All mutable state behind the auth card
pub struct AuthUiState {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub field_errors: FieldErrors,
    pub banner: Option<Banner>,
    /// Epoch ms when the active lockout expires; the countdown is derived
    /// from this each frame rather than ticked by a timer
    pub lockout_until_ms: Option<u64>,
}

impl AuthUiState {
    pub fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            email: String::new(),
            password: String::new(),
            full_name: String::new(),
            field_errors: FieldErrors::default(),
            banner: None,
            lockout_until_ms: None,
        }
    }

    /// Switch forms, dropping per-form transient state
    pub fn set_mode(&mut self, mode: AuthMode) {
        self.mode = mode;
        self.field_errors.clear();
        self.banner = None;
    }

    pub fn set_lockout(&mut self, seconds: u64, now_ms: u64) {
        self.lockout_until_ms = Some(now_ms + seconds * 1000);
    }

    /// Seconds left on the active lockout, 0 when none
    pub fn lockout_remaining_secs(&self, now_ms: u64) -> u64 {
        match self.lockout_until_ms {
            Some(until) if until > now_ms => (until - now_ms).div_ceil(1000),
            _ => 0,
        }
    }

    /// Validate the visible fields for the current mode. Errors are stored
    /// for the next draw; returns whether the form may submit.
    pub fn validate(&mut self) -> bool {
        self.field_errors.clear();

        if !email_is_valid(&self.email) {
            self.field_errors.email = Some(ValidationError::InvalidEmail);
        }
        if self.mode != AuthMode::ForgotPassword && self.password.chars().count() < 6 {
            self.field_errors.password = Some(ValidationError::PasswordTooShort);
        }
        // The name is optional, but a provided one must not be a single char
        if self.mode == AuthMode::Signup
            && !self.full_name.is_empty()
            && self.full_name.trim().chars().count() < 2
        {
            self.field_errors.name = Some(ValidationError::NameTooShort);
        }

        self.field_errors.is_empty()
    }
}

/// Minimal email shape check: something@domain.tld
fn email_is_valid(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || email.contains(char::is_whitespace) {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_shape_check() {
        assert!(email_is_valid("user@example.com"));
        assert!(email_is_valid(" user@sub.example.org "));
        assert!(!email_is_valid("userexample.com"));
        assert!(!email_is_valid("user@"));
        assert!(!email_is_valid("@example.com"));
        assert!(!email_is_valid("user@example"));
        assert!(!email_is_valid("us er@example.com"));
    }

    #[test]
    fn test_validate_per_mode() {
        let mut state = AuthUiState::new();
        state.email = "user@example.com".into();
        state.password = "short".into();

        // Login needs a 6+ char password
        assert!(!state.validate());
        assert_eq!(
            state.field_errors.password,
            Some(ValidationError::PasswordTooShort)
        );

        // Forgot-password ignores the password field
        state.set_mode(AuthMode::ForgotPassword);
        assert!(state.validate());

        // Signup accepts an empty optional name but not a one-char one
        state.set_mode(AuthMode::Signup);
        state.password = "longenough".into();
        assert!(state.validate());
        state.full_name = "x".into();
        assert!(!state.validate());
        assert_eq!(state.field_errors.name, Some(ValidationError::NameTooShort));
    }

    #[test]
    fn test_lockout_countdown_derives_from_deadline() {
        let mut state = AuthUiState::new();
        assert_eq!(state.lockout_remaining_secs(5_000), 0);

        state.set_lockout(900, 10_000);
        assert_eq!(state.lockout_remaining_secs(10_000), 900);
        assert_eq!(state.lockout_remaining_secs(10_500), 900);
        assert_eq!(state.lockout_remaining_secs(11_000), 899);
        assert_eq!(state.lockout_remaining_secs(910_000), 0);
    }

    #[test]
    fn test_mode_switch_clears_transient_state() {
        let mut state = AuthUiState::new();
        state.field_errors.email = Some(ValidationError::InvalidEmail);
        state.banner = Some(Banner {
            kind: BannerKind::Error,
            title: "t".into(),
            body: "b".into(),
        });

        state.set_mode(AuthMode::Signup);
        assert!(state.field_errors.is_empty());
        assert!(state.banner.is_none());
    }
}
