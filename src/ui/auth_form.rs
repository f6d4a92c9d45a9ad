//! The centered auth card: fields, validation feedback, submit, mode links.

use egui::{Align2, Color32, Key, RichText};

use super::style;
use super::{AuthMode, AuthUiState, Banner, BannerKind, UiActions};
use crate::constants::*;
use crate::engine::FormBounds;
use crate::events::{EventQueue, FormEvent, FormField};
use crate::lang::Translations;
use crate::theme::{Settings, Theme};

/// Draw the auth card and report the card's rectangle in normalized window
/// coordinates so the companion engine can station itself around it.
pub fn draw_auth_card(
    ctx: &egui::Context,
    state: &mut AuthUiState,
    settings: Settings,
    configured: bool,
    loading: bool,
    now_ms: u64,
    events: &mut EventQueue,
    actions: &mut UiActions,
) -> Option<FormBounds> {
    let t = settings.language.strings();
    let theme = settings.theme;
    let lockout_secs = state.lockout_remaining_secs(now_ms);

    let response = egui::Window::new("auth-card")
        .title_bar(false)
        .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
        .resizable(false)
        .collapsible(false)
        .default_width(AUTH_CARD_WIDTH)
        .frame(style::card_frame(theme))
        .show(ctx, |ui| {
            ui.set_width(AUTH_CARD_WIDTH);

            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(state.mode.title(t))
                        .size(26.0)
                        .strong()
                        .color(style::text_primary(theme)),
                );
                ui.label(RichText::new(state.mode.subtitle(t)).color(style::text_muted(theme)));
            });
            ui.add_space(14.0);

            let mut dismiss_banner = false;
            if let Some(banner) = &state.banner {
                dismiss_banner = draw_banner(ui, banner, theme);
                ui.add_space(6.0);
            }
            if dismiss_banner {
                state.banner = None;
            }

            let mut submit_via_enter = false;

            if state.mode == AuthMode::Signup {
                let response = labeled_field(
                    ui,
                    t.full_name,
                    t.enter_full_name,
                    &mut state.full_name,
                    false,
                    FormField::FullName,
                    settings,
                    events,
                );
                submit_via_enter |= enter_pressed(ui, &response);
                error_line(ui, state.field_errors.name.map(|e| e.text(t)), settings);
            }

            let response = labeled_field(
                ui,
                t.email,
                t.enter_email,
                &mut state.email,
                false,
                FormField::Email,
                settings,
                events,
            );
            submit_via_enter |= enter_pressed(ui, &response);
            error_line(ui, state.field_errors.email.map(|e| e.text(t)), settings);

            if state.mode != AuthMode::ForgotPassword {
                let response = labeled_field(
                    ui,
                    t.password,
                    "••••••••",
                    &mut state.password,
                    true,
                    FormField::Password,
                    settings,
                    events,
                );
                submit_via_enter |= enter_pressed(ui, &response);
                error_line(ui, state.field_errors.password.map(|e| e.text(t)), settings);
            }

            if lockout_secs > 0 && state.mode == AuthMode::Login {
                ui.add_space(4.0);
                lockout_box(ui, t, lockout_secs);
            }

            ui.add_space(10.0);

            let submit_enabled = !loading && (lockout_secs == 0 || state.mode != AuthMode::Login);
            let clicked = submit_button(ui, state.mode, t, loading, submit_enabled);

            if (clicked || (submit_via_enter && submit_enabled)) && state.validate() {
                actions.submit_requested = true;
            }

            ui.add_space(8.0);
            mode_links(ui, state, t);

            if !configured {
                ui.add_space(8.0);
                config_warning(ui, t, theme);
            }
        });

    // Normalize the laid-out card rect against the full window
    let screen = ctx.screen_rect();
    response.map(|r| {
        let rect = r.response.rect;
        FormBounds {
            x: (rect.min.x - screen.min.x) / screen.width(),
            y: (rect.min.y - screen.min.y) / screen.height(),
            width: rect.width() / screen.width(),
            height: rect.height() / screen.height(),
        }
    })
}

/// A labeled single-line field that reports focus, blur and edits
fn labeled_field(
    ui: &mut egui::Ui,
    label: &str,
    hint: &str,
    value: &mut String,
    password: bool,
    field: FormField,
    settings: Settings,
    events: &mut EventQueue,
) -> egui::Response {
    field_label(ui, label, settings);

    let response = ui.add(
        egui::TextEdit::singleline(value)
            .hint_text(hint)
            .password(password)
            .desired_width(f32::INFINITY),
    );

    if response.gained_focus() {
        events.push(FormEvent::FieldFocused);
    }
    if response.lost_focus() {
        events.push(FormEvent::FieldBlurred);
    }
    if response.changed() {
        events.push(FormEvent::Typing(field));
    }

    response
}

fn field_label(ui: &mut egui::Ui, text: &str, settings: Settings) {
    let label = RichText::new(text).size(13.0).color(style::text_muted(settings.theme));
    if settings.language.is_rtl() {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(label);
        });
    } else {
        ui.label(label);
    }
}

fn error_line(ui: &mut egui::Ui, error: Option<&'static str>, settings: Settings) {
    let Some(error) = error else {
        return;
    };
    let text = RichText::new(error).size(11.0).color(style::accent::DANGER);
    if settings.language.is_rtl() {
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(text);
        });
    } else {
        ui.label(text);
    }
}

fn enter_pressed(ui: &egui::Ui, response: &egui::Response) -> bool {
    response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter))
}

fn lockout_box(ui: &mut egui::Ui, t: &Translations, seconds: u64) {
    egui::Frame::none()
        .fill(style::accent::DANGER.gamma_multiply(0.15))
        .stroke(egui::Stroke::new(1.0, style::accent::DANGER.gamma_multiply(0.4)))
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(egui::Margin::same(10.0))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    RichText::new(format!(
                        "🔒 {} ({}:{:02})",
                        t.account_locked,
                        seconds / 60,
                        seconds % 60
                    ))
                    .size(13.0)
                    .color(style::accent::DANGER),
                );
            });
        });
}

fn submit_button(
    ui: &mut egui::Ui,
    mode: AuthMode,
    t: &Translations,
    loading: bool,
    enabled: bool,
) -> bool {
    let label = match mode {
        AuthMode::Login => t.login,
        AuthMode::Signup => t.create_account,
        AuthMode::ForgotPassword => t.send_reset_link,
    };

    let mut clicked = false;
    ui.vertical_centered_justified(|ui| {
        if loading {
            ui.horizontal(|ui| {
                ui.add_space(ui.available_width() / 2.0 - 50.0);
                ui.add(egui::Spinner::new().size(16.0));
                ui.label(RichText::new(t.processing).color(style::accent::AMBER));
            });
        } else {
            let button = egui::Button::new(
                RichText::new(label).size(15.0).strong().color(Color32::WHITE),
            )
            .fill(style::accent::AMBER_DEEP)
            .min_size(egui::vec2(0.0, 36.0));
            clicked = ui.add_enabled(enabled, button).clicked();
        }
    });
    clicked
}

fn mode_links(ui: &mut egui::Ui, state: &mut AuthUiState, t: &Translations) {
    ui.vertical_centered(|ui| {
        ui.horizontal_wrapped(|ui| {
            match state.mode {
                AuthMode::Login => {
                    if ui.link(t.forgot_password_link).clicked() {
                        state.set_mode(AuthMode::ForgotPassword);
                    }
                    ui.label("|");
                    if ui.link(t.create_new_account).clicked() {
                        state.set_mode(AuthMode::Signup);
                    }
                }
                AuthMode::Signup => {
                    if ui.link(t.have_account).clicked() {
                        state.set_mode(AuthMode::Login);
                    }
                }
                AuthMode::ForgotPassword => {
                    if ui.link(t.back_to_login).clicked() {
                        state.set_mode(AuthMode::Login);
                    }
                }
            };
        });
    });
}

fn config_warning(ui: &mut egui::Ui, t: &Translations, theme: Theme) {
    egui::Frame::none()
        .fill(style::accent::AMBER.gamma_multiply(if theme.is_dark() { 0.15 } else { 0.2 }))
        .stroke(egui::Stroke::new(1.0, style::accent::AMBER.gamma_multiply(0.4)))
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(egui::Margin::same(8.0))
        .show(ui, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(t.config_warning).size(11.0));
            });
        });
}

/// Draw a banner; returns true when the user dismissed it
fn draw_banner(ui: &mut egui::Ui, banner: &Banner, theme: Theme) -> bool {
    let color = match banner.kind {
        BannerKind::Info => style::accent::SUCCESS,
        BannerKind::Warning => style::accent::AMBER,
        BannerKind::Error => style::accent::DANGER,
    };

    let mut dismissed = false;
    egui::Frame::none()
        .fill(color.gamma_multiply(if theme.is_dark() { 0.15 } else { 0.22 }))
        .stroke(egui::Stroke::new(1.0, color.gamma_multiply(0.5)))
        .rounding(egui::Rounding::same(8.0))
        .inner_margin(egui::Margin::same(10.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(RichText::new(&banner.title).strong().size(13.0).color(color));
                    if !banner.body.is_empty() {
                        ui.label(RichText::new(&banner.body).size(12.0));
                    }
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                    if ui.small_button("✕").clicked() {
                        dismissed = true;
                    }
                });
            });
        });
    dismissed
}
