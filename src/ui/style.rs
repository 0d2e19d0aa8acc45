//! Dungeon-themed egui styling.
//!
//! Flat panels, hard borders, muted colors, monospace font everywhere so the
//! glyph grid and the message log line up.

use egui::epaint::Shadow;
use egui::style::{WidgetVisuals, Widgets};
use egui::{Color32, FontData, FontDefinitions, FontFamily, Frame, Margin, Rounding, Stroke, Style, Visuals};

/// Panel palette
pub mod colors {
    use egui::Color32;

    pub const PANEL_BG: Color32 = Color32::from_rgb(25, 22, 20);
    pub const PANEL_BORDER: Color32 = Color32::from_rgb(60, 52, 45);

    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(220, 210, 195);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(150, 140, 125);
    pub const TEXT_ACCENT: Color32 = Color32::from_rgb(210, 180, 100);

    pub const HP_BAR: Color32 = Color32::from_rgb(140, 35, 35);
    pub const DEATH_TEXT: Color32 = Color32::from_rgb(200, 60, 60);
}

pub const BORDER_WIDTH: f32 = 1.0;

fn flat_widget(bg: Color32, stroke: Color32, fg: Color32) -> WidgetVisuals {
    WidgetVisuals {
        bg_fill: bg,
        weak_bg_fill: bg,
        bg_stroke: Stroke::new(BORDER_WIDTH, stroke),
        rounding: Rounding::ZERO,
        fg_stroke: Stroke::new(1.0, fg),
        expansion: 0.0,
    }
}

pub fn dungeon_visuals() -> Visuals {
    let mut visuals = Visuals::dark();

    visuals.window_rounding = Rounding::ZERO;
    visuals.menu_rounding = Rounding::ZERO;
    visuals.window_shadow = Shadow::NONE;
    visuals.popup_shadow = Shadow::NONE;

    visuals.window_fill = colors::PANEL_BG;
    visuals.window_stroke = Stroke::new(BORDER_WIDTH, colors::PANEL_BORDER);
    visuals.panel_fill = colors::PANEL_BG;
    visuals.extreme_bg_color = colors::PANEL_BG;

    let idle = flat_widget(colors::PANEL_BG, colors::PANEL_BORDER, colors::TEXT_MUTED);
    let active = flat_widget(colors::PANEL_BG, colors::TEXT_ACCENT, colors::TEXT_PRIMARY);
    visuals.widgets = Widgets {
        noninteractive: idle,
        inactive: idle,
        hovered: active,
        active,
        open: active,
    };

    visuals.override_text_color = Some(colors::TEXT_PRIMARY);
    visuals
}

/// Prefer the system Hack font for both families when it is installed.
pub fn load_fonts() -> FontDefinitions {
    let mut fonts = FontDefinitions::default();

    match std::fs::read("/usr/share/fonts/TTF/Hack-Regular.ttf") {
        Ok(font_data) => {
            fonts
                .font_data
                .insert("hack".to_owned(), FontData::from_owned(font_data));
            for family in [FontFamily::Proportional, FontFamily::Monospace] {
                fonts.families.entry(family).or_default().insert(0, "hack".to_owned());
            }
        }
        Err(err) => log::debug!("Hack font unavailable, using egui defaults: {err}"),
    }

    fonts
}

/// Frame for the message panel under the map
pub fn message_panel_frame() -> Frame {
    Frame::none()
        .fill(colors::PANEL_BG)
        .stroke(Stroke::new(BORDER_WIDTH, colors::PANEL_BORDER))
        .inner_margin(Margin::same(8.0))
}

pub fn dungeon_style() -> Style {
    Style {
        visuals: dungeon_visuals(),
        ..Style::default()
    }
}
