use crate::app::FramecropApp;

pub fn show(ctx: &egui::Context, app: &mut FramecropApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);

        if let Some(task) = app.ui_state.running {
            ui.add(egui::ProgressBar::new(0.0).text(format!("{task}...")).animate(true));
        } else {
            ui.add(egui::ProgressBar::new(0.0).text(""));
        }

        // Log area, fixed height for 4 lines.
        let line_height = ui.text_style_height(&egui::TextStyle::Body);
        let spacing = ui.spacing().item_spacing.y;
        let log_height = line_height * 4.0 + spacing * 3.0;

        egui::ScrollArea::vertical()
            .max_height(log_height)
            .min_scrolled_height(log_height)
            .stick_to_bottom(true)
            .show(ui, |ui| {
                if app.ui_state.log_messages.is_empty() {
                    for _ in 0..4 {
                        ui.label("");
                    }
                } else {
                    for msg in &app.ui_state.log_messages {
                        ui.label(msg);
                    }
                }
            });

        ui.horizontal(|ui| {
            ui.label(format!("{:?}", app.editor.phase()));
            if let Some(state) = app.editor.viewport() {
                ui.separator();
                ui.label(format!("Zoom: {:.0}%", state.scale * 100.0));
                ui.separator();
                ui.label(format!("Offset: {:.0}, {:.0}", state.offset_x, state.offset_y));
            }
            ui.separator();
            let frame = app.editor.config().frame;
            ui.label(format!("Frame: {}x{}", frame.width, frame.height));
        });

        ui.add_space(2.0);
    });
}
