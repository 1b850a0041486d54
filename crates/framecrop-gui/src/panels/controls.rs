use framecrop_core::editor::EditorPhase;
use framecrop_core::upload::{Preview, UploadFolder};

use crate::app::FramecropApp;

use super::helpers::{enum_combo, section_header};

const RIGHT_PANEL_WIDTH: f32 = 260.0;
const PREVIEW_WIDTH: f32 = 220.0;

pub fn show(ctx: &egui::Context, app: &mut FramecropApp) {
    egui::SidePanel::right("controls")
        .default_width(RIGHT_PANEL_WIDTH)
        .resizable(false)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(RIGHT_PANEL_WIDTH - 20.0);

                file_section(ui, app);
                ui.separator();
                zoom_section(ui, app);
                ui.separator();
                actions_section(ui, app);
                ui.separator();
                result_section(ui, app);
            });
        });
}

fn file_section(ui: &mut egui::Ui, app: &mut FramecropApp) {
    section_header(ui, "Image", None);
    ui.add_space(4.0);

    let busy = app.ui_state.is_busy() || app.editor.is_busy();
    if ui.add_enabled(!busy, egui::Button::new("Choose image...")).clicked() {
        app.pick_file();
    }

    match app.editor.image() {
        Some(image) => {
            ui.label(image.name());
            ui.small(format!(
                "{}x{}",
                image.natural_width(),
                image.natural_height()
            ));
            if let Some(url) = app.editor.display_url() {
                ui.small(url);
            }
        }
        None => {
            ui.small("No image. Drop one onto the frame.");
        }
    }

    if let Some(err) = app.editor.last_error() {
        ui.colored_label(ui.visuals().error_fg_color, err);
    }
}

fn zoom_section(ui: &mut egui::Ui, app: &mut FramecropApp) {
    let range = app.editor.policy().map(|p| (p.min_scale(), p.max_scale()));
    let state = app.editor.viewport();
    let status = state.map(|s| format!("{:.0}%", s.scale * 100.0));
    section_header(ui, "Zoom", status.as_deref());
    ui.add_space(4.0);

    let enabled = app.editor.phase() == EditorPhase::Editing && !app.editor.is_busy();
    let (Some((min, max)), Some(state)) = (range, state) else {
        ui.add_enabled(false, egui::Slider::new(&mut 1.0_f64, 1.0..=1.0));
        return;
    };

    let mut scale = state.scale;
    let response = ui.add_enabled(
        enabled,
        egui::Slider::new(&mut scale, min..=max).show_value(false),
    );
    if response.changed() {
        app.editor.set_zoom(scale);
    }
    ui.small("Drag to pan, scroll to zoom, double-click to reset");
}

fn actions_section(ui: &mut egui::Ui, app: &mut FramecropApp) {
    section_header(ui, "Crop", None);
    ui.add_space(4.0);

    let editing = app.editor.phase() == EditorPhase::Editing && !app.editor.is_busy();

    ui.horizontal(|ui| {
        if ui.add_enabled(editing, egui::Button::new("Reset")).clicked() {
            app.editor.reset();
        }
        if ui.add_enabled(editing, egui::Button::new("Cancel")).clicked() {
            app.cancel();
        }
        if ui.add_enabled(editing, egui::Button::new("Confirm")).clicked() {
            app.confirm();
        }
    });

    let mut folder = app.ui_state.folder;
    if enum_combo(ui, "Folder", &mut folder, &UploadFolder::ALL) {
        app.ui_state.folder = folder;
    }
}

fn result_section(ui: &mut egui::Ui, app: &mut FramecropApp) {
    section_header(ui, "Result", None);
    ui.add_space(4.0);

    match app.editor.preview() {
        Some(Preview::Remote(url)) => {
            ui.label("Current image");
            ui.small(url.as_str());
        }
        Some(Preview::Local {
            filename,
            content_type,
            width,
            height,
        }) => {
            if let Some(tex) = &app.view.preview {
                let size = tex.size_vec2();
                let display = size * (PREVIEW_WIDTH / size.x.max(1.0));
                ui.image((tex.id(), display));
            }
            ui.label(filename.as_str());
            ui.small(format!("{width}x{height} {content_type}"));
        }
        None => {
            ui.small("Nothing confirmed yet");
        }
    }

    if let Some(location) = &app.ui_state.upload_location {
        ui.small(format!("Stored at {location}"));
    }

    let has_result = app.ui_state.last_result.is_some();
    let idle = !app.editor.is_busy();
    ui.horizontal(|ui| {
        if ui.add_enabled(has_result, egui::Button::new("Save...")).clicked() {
            app.save_result();
        }
        if ui.add_enabled(has_result, egui::Button::new("Upload...")).clicked() {
            app.upload_result();
        }
        let can_clear = idle && (app.editor.preview().is_some() || app.editor.image().is_some());
        if ui.add_enabled(can_clear, egui::Button::new("Clear")).clicked() {
            app.clear();
        }
    });
}
