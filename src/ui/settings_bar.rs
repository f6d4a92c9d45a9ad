//! Top-right settings bar: language and theme toggles.
//!
//! The only writer of the injected [`Settings`] holder.

use egui::Align2;

use crate::lang::Language;
use crate::theme::Settings;

/// Draw the settings bar. Returns true when the theme changed so the caller
/// can restyle the context.
pub fn draw_settings_bar(ctx: &egui::Context, settings: &mut Settings) -> bool {
    let mut theme_changed = false;

    egui::Area::new(egui::Id::new("settings-bar"))
        .anchor(Align2::RIGHT_TOP, [-16.0, 16.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let t = settings.language.strings();

                let lang_label = match settings.language {
                    Language::En => "عربي",
                    Language::Ar => "EN",
                };
                if ui
                    .button(format!("🌐 {lang_label}"))
                    .on_hover_text(t.switch_language)
                    .clicked()
                {
                    settings.language = settings.language.toggled();
                }

                let (icon, hover) = if settings.theme.is_dark() {
                    ("☀", t.light_mode)
                } else {
                    ("🌙", t.dark_mode)
                };
                if ui.button(icon).on_hover_text(hover).clicked() {
                    settings.theme = settings.theme.toggled();
                    theme_changed = true;
                }
            });
        });

    theme_changed
}
