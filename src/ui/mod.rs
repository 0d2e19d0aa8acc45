//! UI rendering using egui.
//!
//! The map is painted cell by cell from a `GlyphGrid`; the status panel sits
//! underneath it.

pub mod status_bar;
pub mod style;

pub use status_bar::{draw_status_bar, get_status_bar_data, StatusBarData};

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, Vec2};
use glam::Vec3;

use crate::constants::*;
use crate::systems::{DisplaySink, GlyphGrid};

/// Convert a 0..1 RGB color to egui's representation.
pub fn to_color32(color: Vec3) -> Color32 {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    Color32::from_rgb(c.x as u8, c.y as u8, c.z as u8)
}

/// `DisplaySink` that paints cells into an egui layer.
pub struct PainterSink<'a> {
    painter: &'a Painter,
    origin: Pos2,
    cell_size: f32,
    extent: Vec2,
    font: FontId,
}

impl<'a> PainterSink<'a> {
    pub fn new(painter: &'a Painter, origin: Pos2, cell_size: f32, columns: usize, rows: usize) -> Self {
        Self {
            painter,
            origin,
            cell_size,
            extent: Vec2::new(columns as f32 * cell_size, rows as f32 * cell_size),
            font: FontId::monospace(cell_size * 0.9),
        }
    }

    fn cell_rect(&self, x: i32, y: i32) -> Rect {
        let min = self.origin + Vec2::new(x as f32 * self.cell_size, y as f32 * self.cell_size);
        Rect::from_min_size(min, Vec2::splat(self.cell_size))
    }
}

impl DisplaySink for PainterSink<'_> {
    fn clear(&mut self) {
        self.painter
            .rect_filled(Rect::from_min_size(self.origin, self.extent), 0.0, Color32::BLACK);
    }

    fn draw(&mut self, x: i32, y: i32, ch: char, fg: Vec3, bg: Vec3) {
        let rect = self.cell_rect(x, y);
        self.painter.rect_filled(rect, 0.0, to_color32(bg));
        if ch != ' ' {
            self.painter
                .text(rect.center(), Align2::CENTER_CENTER, ch, self.font.clone(), to_color32(fg));
        }
    }
}

/// Paint the map into the central panel.
pub fn draw_map(ctx: &egui::Context, frame: &GlyphGrid) {
    puffin::profile_function!();

    egui::CentralPanel::default()
        .frame(egui::Frame::none().fill(Color32::BLACK))
        .show(ctx, |ui| {
            let origin = ui.max_rect().min;
            let mut sink = PainterSink::new(ui.painter(), origin, CELL_SIZE, frame.width, frame.height);
            frame.present(&mut sink);
        });
}
