//! HUD
//!
//! egui overlay drawn over the arena:
//! - action buttons (top-left)
//! - "Today" leaderboard panel (right edge)
//! - defeat banner (centered)
//! - volume and VSync controls (bottom-left)

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::arena::input::ActionDispatch;
use crate::combat::boss::{Boss, DefeatBanner};
use crate::keybindings::{GameAction, Keybindings};
use crate::leaderboard::Leaderboard;
use crate::settings::GameSettings;

/// Plugin for the HUD. Requires `EguiPlugin`.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (action_buttons, leaderboard_panel, settings_strip, defeat_banner).chain());
    }
}

/// Common colors used throughout the HUD
pub mod colors {
    use bevy_egui::egui::Color32;

    pub const BUTTON_FILL: Color32 = Color32::from_rgb(31, 41, 55);
    pub const BUTTON_STROKE: Color32 = Color32::from_rgb(147, 197, 253);
    pub const PANEL_FILL: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 153);
    pub const TITLE_GOLD: Color32 = Color32::from_rgb(255, 215, 0);
    pub const HINT: Color32 = Color32::from_rgb(150, 150, 150);
}

/// Font sizes used throughout the HUD
pub mod fonts {
    pub const BUTTON: f32 = 18.0;
    pub const PANEL_TITLE: f32 = 22.0;
    pub const PANEL_BODY: f32 = 18.0;
    pub const HINT: f32 = 12.0;
}

const PANEL_WIDTH: f32 = 200.0;

fn action_button(ui: &mut egui::Ui, label: &str, enabled: bool) -> bool {
    let button = egui::Button::new(
        egui::RichText::new(label)
            .size(fonts::BUTTON)
            .color(egui::Color32::WHITE),
    )
    .min_size(egui::vec2(120.0, 42.0))
    .fill(colors::BUTTON_FILL)
    .stroke(egui::Stroke::new(2.0, colors::BUTTON_STROKE));
    ui.add_enabled(enabled, button).clicked()
}

/// LIGHT / HEAVY / CHANGE, plus NEXT when there is more than one actor.
fn action_buttons(
    mut contexts: EguiContexts,
    mut dispatch: ActionDispatch,
    boss: Res<Boss>,
    keybindings: Res<Keybindings>,
) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };
    if !dispatch.accepts_input() {
        return;
    }

    // Buttons stay clickable only when the press would do something
    let ready = boss.is_alive() && !dispatch.selected_busy();
    let roster = dispatch.roster();
    let mut pressed = Vec::new();

    egui::Area::new(egui::Id::new("arena_actions"))
        .fixed_pos(egui::pos2(50.0, 38.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                for action in [
                    GameAction::LightAttack,
                    GameAction::HeavyAttack,
                    GameAction::ChangeCharacter,
                ] {
                    if action_button(ui, action.button_label(), ready) {
                        pressed.push(action);
                    }
                }
                if roster > 1 {
                    if action_button(ui, GameAction::NextActor.button_label(), true) {
                        pressed.push(GameAction::NextActor);
                    }
                    ui.label(
                        egui::RichText::new(format!("{} / {}", dispatch.selected().0 + 1, roster))
                            .size(fonts::BUTTON)
                            .color(egui::Color32::WHITE),
                    );
                }
            });
            ui.label(
                egui::RichText::new(format!(
                    "{}=Light {}=Heavy {}=Change {}=Next",
                    keybindings.binding_display(GameAction::LightAttack),
                    keybindings.binding_display(GameAction::HeavyAttack),
                    keybindings.binding_display(GameAction::ChangeCharacter),
                    keybindings.binding_display(GameAction::NextActor),
                ))
                .size(fonts::HINT)
                .color(colors::HINT),
            );
        });

    for action in pressed {
        dispatch.dispatch(action);
    }
}

fn leaderboard_panel(mut contexts: EguiContexts, leaderboard: Res<Leaderboard>) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    egui::SidePanel::right("leaderboard")
        .exact_width(PANEL_WIDTH)
        .resizable(false)
        .frame(
            egui::Frame::none()
                .fill(colors::PANEL_FILL)
                .inner_margin(egui::Margin::same(10.0)),
        )
        .show(ctx, |ui| {
            ui.label(
                egui::RichText::new("🏆 Today")
                    .size(fonts::PANEL_TITLE)
                    .color(colors::TITLE_GOLD),
            );
            ui.add_space(18.0);
            for line in leaderboard.display_lines() {
                ui.label(
                    egui::RichText::new(line)
                        .size(fonts::PANEL_BODY)
                        .color(egui::Color32::WHITE),
                );
                ui.add_space(8.0);
            }
        });
}

/// Edits land in `GameSettings`, which saves them and applies VSync.
fn settings_strip(mut contexts: EguiContexts, mut settings: ResMut<GameSettings>) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    let mut volume = settings.master_volume;
    let mut vsync = settings.vsync;
    let mut released = false;

    egui::Area::new(egui::Id::new("settings_strip"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(16.0, -16.0))
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let slider = ui.add(
                    egui::Slider::new(&mut volume, 0.0..=1.0)
                        .text(egui::RichText::new("Volume").color(egui::Color32::WHITE)),
                );
                // Save once per drag, not every frame of it
                released = slider.drag_stopped() || (slider.changed() && !slider.dragged());
                ui.checkbox(
                    &mut vsync,
                    egui::RichText::new("VSync").color(egui::Color32::WHITE),
                );
            });
        });

    if vsync != settings.vsync || released {
        settings.apply_audio_video(volume, vsync);
    }
}

/// Outlined banner text at the banner's current alpha.
fn defeat_banner(mut contexts: EguiContexts, banner: Res<DefeatBanner>) {
    if !banner.is_visible() {
        return;
    }
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    let alpha = (banner.alpha().clamp(0.0, 1.0) * 255.0) as u8;
    let fill = egui::Color32::from_rgba_unmultiplied(255, 255, 255, alpha);
    let outline = egui::Color32::from_rgba_unmultiplied(0, 0, 0, alpha);
    let font = egui::FontId::proportional(banner.font_size());
    let center = ctx.screen_rect().center();

    egui::Area::new(egui::Id::new("defeat_banner"))
        .fixed_pos(egui::pos2(0.0, 0.0))
        .interactable(false)
        .show(ctx, |ui| {
            let painter = ui.painter();
            for (dx, dy) in [
                (-4.0, 0.0),
                (4.0, 0.0),
                (0.0, -4.0),
                (0.0, 4.0),
                (-3.0, -3.0),
                (3.0, -3.0),
                (-3.0, 3.0),
                (3.0, 3.0),
            ] {
                painter.text(
                    egui::pos2(center.x + dx, center.y + dy),
                    egui::Align2::CENTER_CENTER,
                    banner.text(),
                    font.clone(),
                    outline,
                );
            }
            painter.text(center, egui::Align2::CENTER_CENTER, banner.text(), font, fill);
        });
}
