//! Status panel UI component.
//!
//! Player hp, turn counter and the message log, docked under the map.

use super::style::{self, colors};
use crate::constants::*;
use crate::engine::{TurnEngine, TurnPhase};
use crate::rng::RandomSource;

/// Data needed to render the status panel
#[derive(Debug, Clone, PartialEq)]
pub struct StatusBarData {
    pub hp: i32,
    pub max_hp: i32,
    pub turn: u64,
    pub debug_reveal: bool,
    pub phase: TurnPhase,
    /// Oldest first
    pub lines: Vec<String>,
}

/// Extract status panel data from the engine
pub fn get_status_bar_data<R: RandomSource>(engine: &TurnEngine<R>) -> StatusBarData {
    let hp = engine.state.player_fighter().map(|f| f.hp).unwrap_or(0);

    StatusBarData {
        hp,
        max_hp: PLAYER_HP,
        turn: engine.turn_count(),
        debug_reveal: engine.state.debug_reveal,
        phase: engine.phase(),
        lines: engine.messages().lines().map(str::to_string).collect(),
    }
}

impl StatusBarData {
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp > 0 {
            (self.hp as f32 / self.max_hp as f32).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Render the status panel at the bottom of the window
pub fn draw_status_bar(ctx: &egui::Context, data: &StatusBarData) {
    egui::TopBottomPanel::bottom("status")
        .exact_height(MESSAGE_PANEL_HEIGHT)
        .frame(style::message_panel_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.add_sized(
                    [180.0, 18.0],
                    egui::ProgressBar::new(data.hp_fraction())
                        .fill(colors::HP_BAR)
                        .text(format!("HP {}/{}", data.hp.max(0), data.max_hp)),
                );
                ui.label(egui::RichText::new(format!("turn {}", data.turn)).color(colors::TEXT_MUTED));
                if data.debug_reveal {
                    ui.label(egui::RichText::new("[reveal]").color(colors::TEXT_ACCENT));
                }
                match data.phase {
                    TurnPhase::PlayerDead => {
                        ui.label(egui::RichText::new("DEAD").color(colors::DEATH_TEXT).strong());
                    }
                    TurnPhase::Halted => {
                        ui.label(egui::RichText::new("HALTED").color(colors::DEATH_TEXT).strong());
                    }
                    _ => {}
                }
            });

            ui.separator();
            for line in &data.lines {
                ui.label(egui::RichText::new(line).monospace());
            }
        });
}
