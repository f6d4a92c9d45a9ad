//! Sand-and-charcoal egui styling in light and dark variants.
//!
//! The palette follows the desert mood of the companions: warm parchment in
//! light mode, dim ember tones in dark mode, amber as the single accent.

use egui::epaint::Shadow;
use egui::style::{WidgetVisuals, Widgets};
use egui::{Color32, FontData, FontDefinitions, FontFamily, Margin, Rounding, Stroke, Style, Visuals};

use crate::theme::Theme;

/// Color palette for the dark theme
pub mod dark {
    use egui::Color32;

    // hsl(30, 15%, 8%) backdrop
    pub const BACKDROP: Color32 = Color32::from_rgb(24, 21, 18);
    pub const CARD_BG: Color32 = Color32::from_rgba_premultiplied(38, 34, 30, 245);
    pub const CARD_BORDER: Color32 = Color32::from_rgb(70, 62, 54);

    pub const FIELD_BG: Color32 = Color32::from_rgb(48, 43, 38);
    pub const FIELD_HOVER: Color32 = Color32::from_rgb(58, 52, 46);
    pub const FIELD_ACTIVE: Color32 = Color32::from_rgb(68, 60, 52);
    pub const FIELD_BORDER: Color32 = Color32::from_rgb(86, 76, 66);

    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(230, 224, 213);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(160, 152, 140);
}

/// Color palette for the light theme
pub mod light {
    use egui::Color32;

    // #e8e0d5 backdrop
    pub const BACKDROP: Color32 = Color32::from_rgb(232, 224, 213);
    pub const CARD_BG: Color32 = Color32::from_rgba_premultiplied(244, 239, 231, 245);
    pub const CARD_BORDER: Color32 = Color32::from_rgb(205, 195, 180);

    pub const FIELD_BG: Color32 = Color32::from_rgb(250, 247, 242);
    pub const FIELD_HOVER: Color32 = Color32::from_rgb(242, 237, 228);
    pub const FIELD_ACTIVE: Color32 = Color32::from_rgb(236, 229, 218);
    pub const FIELD_BORDER: Color32 = Color32::from_rgb(190, 180, 165);

    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(45, 45, 45);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(105, 100, 90);
}

/// Shared accent colors
pub mod accent {
    use egui::Color32;

    pub const AMBER: Color32 = Color32::from_rgb(255, 193, 7);
    pub const AMBER_DEEP: Color32 = Color32::from_rgb(255, 152, 0);
    pub const DANGER: Color32 = Color32::from_rgb(239, 68, 68);
    pub const SUCCESS: Color32 = Color32::from_rgb(80, 250, 123);
}

/// Border width for the card and fields
pub const BORDER_WIDTH: f32 = 1.0;
/// Corner rounding across the UI
pub const ROUNDING: f32 = 12.0;

pub fn backdrop_color(theme: Theme) -> Color32 {
    if theme.is_dark() {
        dark::BACKDROP
    } else {
        light::BACKDROP
    }
}

pub fn text_primary(theme: Theme) -> Color32 {
    if theme.is_dark() {
        dark::TEXT_PRIMARY
    } else {
        light::TEXT_PRIMARY
    }
}

pub fn text_muted(theme: Theme) -> Color32 {
    if theme.is_dark() {
        dark::TEXT_MUTED
    } else {
        light::TEXT_MUTED
    }
}

/// Themed visuals
pub fn gate_visuals(theme: Theme) -> Visuals {
    let mut visuals = if theme.is_dark() {
        Visuals::dark()
    } else {
        Visuals::light()
    };

    let (card_bg, card_border, text) = if theme.is_dark() {
        (dark::CARD_BG, dark::CARD_BORDER, dark::TEXT_PRIMARY)
    } else {
        (light::CARD_BG, light::CARD_BORDER, light::TEXT_PRIMARY)
    };

    visuals.window_rounding = Rounding::same(ROUNDING);
    visuals.menu_rounding = Rounding::same(6.0);
    visuals.window_shadow = Shadow::NONE;
    visuals.popup_shadow = Shadow::NONE;

    visuals.window_fill = card_bg;
    visuals.window_stroke = Stroke::new(BORDER_WIDTH, card_border);
    visuals.panel_fill = card_bg;

    visuals.widgets = gate_widgets(theme);

    visuals.selection.bg_fill = accent::AMBER.gamma_multiply(0.4);
    visuals.selection.stroke = Stroke::new(1.0, accent::AMBER_DEEP);
    visuals.override_text_color = Some(text);

    visuals
}

fn gate_widgets(theme: Theme) -> Widgets {
    let (bg, hover, active, border, text, muted) = if theme.is_dark() {
        (
            dark::FIELD_BG,
            dark::FIELD_HOVER,
            dark::FIELD_ACTIVE,
            dark::FIELD_BORDER,
            dark::TEXT_PRIMARY,
            dark::TEXT_MUTED,
        )
    } else {
        (
            light::FIELD_BG,
            light::FIELD_HOVER,
            light::FIELD_ACTIVE,
            light::FIELD_BORDER,
            light::TEXT_PRIMARY,
            light::TEXT_MUTED,
        )
    };
    let rounding = Rounding::same(8.0);

    Widgets {
        noninteractive: WidgetVisuals {
            bg_fill: bg,
            weak_bg_fill: bg,
            bg_stroke: Stroke::new(BORDER_WIDTH, border),
            rounding,
            fg_stroke: Stroke::new(1.0, muted),
            expansion: 0.0,
        },
        inactive: WidgetVisuals {
            bg_fill: bg,
            weak_bg_fill: bg,
            bg_stroke: Stroke::new(BORDER_WIDTH, border),
            rounding,
            fg_stroke: Stroke::new(1.0, text),
            expansion: 0.0,
        },
        hovered: WidgetVisuals {
            bg_fill: hover,
            weak_bg_fill: hover,
            bg_stroke: Stroke::new(BORDER_WIDTH, accent::AMBER),
            rounding,
            fg_stroke: Stroke::new(1.0, text),
            expansion: 0.0,
        },
        active: WidgetVisuals {
            bg_fill: active,
            weak_bg_fill: active,
            bg_stroke: Stroke::new(2.0, accent::AMBER_DEEP),
            rounding,
            fg_stroke: Stroke::new(1.0, text),
            expansion: 0.0,
        },
        open: WidgetVisuals {
            bg_fill: active,
            weak_bg_fill: active,
            bg_stroke: Stroke::new(BORDER_WIDTH, border),
            rounding,
            fg_stroke: Stroke::new(1.0, text),
            expansion: 0.0,
        },
    }
}

/// The frame for the centered auth card
pub fn card_frame(theme: Theme) -> egui::Frame {
    let (fill, border) = if theme.is_dark() {
        (dark::CARD_BG, dark::CARD_BORDER)
    } else {
        (light::CARD_BG, light::CARD_BORDER)
    };
    egui::Frame::none()
        .fill(fill)
        .stroke(Stroke::new(BORDER_WIDTH, border))
        .rounding(Rounding::same(ROUNDING * 2.0))
        .inner_margin(Margin::same(28.0))
}

/// Register a system font with Arabic coverage as a fallback for the
/// defaults, when one is available
pub fn load_fonts() -> FontDefinitions {
    let mut fonts = FontDefinitions::default();

    let candidates = [
        "/usr/share/fonts/truetype/noto/NotoSansArabic-Regular.ttf",
        "/usr/share/fonts/noto/NotoSansArabic-Regular.ttf",
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
    ];
    for path in candidates {
        if let Ok(font_data) = std::fs::read(path) {
            fonts
                .font_data
                .insert("arabic-fallback".to_owned(), FontData::from_owned(font_data));
            fonts
                .families
                .entry(FontFamily::Proportional)
                .or_default()
                .push("arabic-fallback".to_owned());
            fonts
                .families
                .entry(FontFamily::Monospace)
                .or_default()
                .push("arabic-fallback".to_owned());
            break;
        }
    }

    fonts
}

/// Themed style, applied to the context on startup and theme toggle
pub fn gate_style(theme: Theme) -> Style {
    let mut style = Style::default();
    style.visuals = gate_visuals(theme);
    style.spacing.item_spacing = egui::vec2(8.0, 10.0);
    style.spacing.button_padding = egui::vec2(16.0, 8.0);
    style
}

pub fn apply(ctx: &egui::Context, theme: Theme) {
    ctx.set_style(gate_style(theme));
}
