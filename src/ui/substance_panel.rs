//! Substance panel
//!
//! Floating egui window with the tube's contents (kind, color, particle
//! count), the reagent buttons and a read-only status block. Edits go
//! through a local copy of [`SubstanceParams`] so the resource is only
//! marked changed when a value really changed.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::core::LabState;
use crate::lab::substance::{PARTICLE_COUNT_RANGE, PARTICLE_COUNT_STEP};
use crate::lab::{
    FillLevel, Flask, PourDirector, Reagent, ReagentAdded, SubstanceKind, SubstanceParams, Tube,
};

pub fn substance_panel_ui(
    mut contexts: EguiContexts,
    mut params: ResMut<SubstanceParams>,
    director: Res<PourDirector>,
    state: Res<State<LabState>>,
    tube_fill: Query<&FillLevel, (With<Tube>, Without<Flask>)>,
    flask_fill: Query<&FillLevel, (With<Flask>, Without<Tube>)>,
    mut reagents: MessageWriter<ReagentAdded>,
) -> Result {
    let ctx = contexts.ctx_mut()?;
    let mut edited = params.clone();

    egui::Window::new("Lab Substances")
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
        .default_width(300.0)
        .resizable(false)
        .show(ctx, |ui| {
            ui.heading("Tube Substance");
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                ui.label("Kind:");
                egui::ComboBox::from_id_salt("substance_kind")
                    .selected_text(edited.kind.label())
                    .show_ui(ui, |ui| {
                        for kind in SubstanceKind::ALL {
                            ui.selectable_value(&mut edited.kind, kind, kind.label());
                        }
                    });
            });

            ui.horizontal(|ui| {
                ui.label("Color:");
                let srgba = edited.color.to_srgba();
                let mut rgb = [srgba.red, srgba.green, srgba.blue];
                if egui::widgets::color_picker::color_edit_button_rgb(ui, &mut rgb).changed() {
                    edited.color = Color::srgb(rgb[0], rgb[1], rgb[2]);
                }
            });

            ui.add_enabled_ui(edited.kind == SubstanceKind::Solid, |ui| {
                let mut count = edited.particle_count();
                ui.add(
                    egui::Slider::new(&mut count, PARTICLE_COUNT_RANGE)
                        .step_by(PARTICLE_COUNT_STEP as f64)
                        .text("Particles"),
                );
                edited.set_particle_count(count);
            });

            ui.separator();
            ui.heading("Reagents");
            ui.horizontal(|ui| {
                for reagent in Reagent::ALL {
                    if ui.button(format!("Add {}", reagent.formula())).clicked() {
                        reagents.write(ReagentAdded(reagent));
                    }
                }
            });

            ui.separator();
            ui.heading("Status");
            match state.get() {
                LabState::Loading => {
                    ui.label("Loading lab asset...");
                }
                LabState::Unavailable => {
                    ui.colored_label(egui::Color32::RED, "Lab asset unavailable");
                }
                LabState::Ready => {
                    let phase = director
                        .phase()
                        .map_or_else(|| "Idle".to_string(), |p| format!("{:?}", p));
                    ui.label(format!("Pour: {}", phase));
                    if let Ok(fill) = tube_fill.single() {
                        ui.label(format!("Tube: {:.1}%", fill.ratio() * 100.0));
                    }
                    if let Ok(fill) = flask_fill.single() {
                        ui.label(format!("Flask: {:.1}%", fill.ratio() * 100.0));
                    }
                    ui.small("Double-click the tube to pour");
                }
            }
        });

    params.set_if_neq(edited);
    Ok(())
}
