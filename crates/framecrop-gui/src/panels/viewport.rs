use framecrop_core::viewport::{Point, PointerId, ViewportState};

use crate::app::FramecropApp;

/// egui reports a single primary pointer; touches are folded into it.
const PRIMARY_POINTER: PointerId = PointerId(0);

pub fn show(ctx: &egui::Context, app: &mut FramecropApp) {
    let hovering_files = ctx.input(|i| !i.raw.hovered_files.is_empty());
    let dropped = ctx.input(|i| i.raw.dropped_files.first().cloned());
    if let Some(file) = dropped {
        app.open_dropped(file);
    }

    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let frame = app.editor.config().frame;
        let frame_rect = egui::Rect::from_center_size(
            rect.center(),
            egui::vec2(frame.width as f32, frame.height as f32),
        );
        let response = ui.allocate_rect(frame_rect, egui::Sense::click_and_drag());

        handle_drag(ui, &response, app, frame_rect);
        handle_wheel(ui, &response, app, frame_rect);
        if response.double_clicked() {
            app.editor.reset();
        }

        let image_size = app
            .editor
            .image()
            .map(|i| egui::vec2(i.natural_width() as f32, i.natural_height() as f32));
        let texture_id = app.view.texture.as_ref().map(|t| t.id());

        match (texture_id, image_size, app.editor.viewport()) {
            (Some(texture_id), Some(image_size), Some(state)) => {
                draw_image(ui, texture_id, frame_rect, image_size, &state);
            }
            _ => show_placeholder(ui, frame_rect, app.editor.is_busy()),
        }
        draw_frame_border(ui, frame_rect);

        if hovering_files {
            draw_drop_hint(ui, rect);
        }
    });
}

fn to_frame(frame_rect: egui::Rect, pos: egui::Pos2) -> Point {
    let local = pos - frame_rect.min;
    Point::new(local.x as f64, local.y as f64)
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

/// Pan with the primary button. The drag keeps following the pointer after
/// it leaves the frame until the button is released.
fn handle_drag(
    ui: &egui::Ui,
    response: &egui::Response,
    app: &mut FramecropApp,
    frame_rect: egui::Rect,
) {
    if response.drag_started_by(egui::PointerButton::Primary) {
        let origin = ui
            .input(|i| i.pointer.press_origin())
            .or_else(|| response.interact_pointer_pos());
        if let Some(pos) = origin {
            app.editor.begin_drag(PRIMARY_POINTER, to_frame(frame_rect, pos));
        }
    }

    if response.dragged_by(egui::PointerButton::Primary) {
        if let Some(pos) = response.interact_pointer_pos() {
            app.editor
                .continue_drag(PRIMARY_POINTER, to_frame(frame_rect, pos));
        }
    }

    if response.drag_stopped_by(egui::PointerButton::Primary) {
        app.editor.release_pointer(PRIMARY_POINTER);
    }
}

fn handle_wheel(
    ui: &egui::Ui,
    response: &egui::Response,
    app: &mut FramecropApp,
    frame_rect: egui::Rect,
) {
    if !response.hovered() {
        return;
    }
    let scroll = ui.input(|i| i.raw_scroll_delta.y);
    if scroll == 0.0 {
        return;
    }
    if let Some(pos) = response.hover_pos() {
        // egui scrolls up with positive y; the editor zooms out on positive.
        app.editor.wheel(-(scroll as f64), to_frame(frame_rect, pos));
    }
}

fn draw_image(
    ui: &egui::Ui,
    texture_id: egui::TextureId,
    frame_rect: egui::Rect,
    image_size: egui::Vec2,
    state: &ViewportState,
) {
    let scale = state.scale as f32;
    let img_rect = egui::Rect::from_min_size(
        frame_rect.min + egui::vec2(state.offset_x as f32, state.offset_y as f32),
        image_size * scale,
    );
    ui.painter().with_clip_rect(frame_rect).image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn draw_frame_border(ui: &egui::Ui, frame_rect: egui::Rect) {
    ui.painter().rect_stroke(
        frame_rect,
        0.0,
        egui::Stroke::new(1.0, egui::Color32::from_gray(160)),
        egui::StrokeKind::Outside,
    );
}

fn show_placeholder(ui: &egui::Ui, frame_rect: egui::Rect, busy: bool) {
    ui.painter()
        .rect_filled(frame_rect, 0.0, egui::Color32::from_gray(45));
    let text = if busy {
        "Loading..."
    } else {
        "Open an image or drop one here"
    };
    ui.painter().text(
        frame_rect.center(),
        egui::Align2::CENTER_CENTER,
        text,
        egui::FontId::proportional(16.0),
        egui::Color32::from_gray(140),
    );
}

fn draw_drop_hint(ui: &egui::Ui, rect: egui::Rect) {
    let painter = ui.painter();
    painter.rect_filled(rect, 0.0, egui::Color32::from_black_alpha(160));
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "Drop image to open",
        egui::FontId::proportional(20.0),
        egui::Color32::WHITE,
    );
}
