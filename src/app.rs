use std::ops::Range;
use std::path::PathBuf;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui::text::{LayoutJob, TextFormat};
use eframe::egui::{self, Key, Modifiers, Sense, TextureHandle, TextureOptions, ViewportCommand};

use crate::animation::AnimationState;
use crate::controller::{Command, Controller, Screen, Update, WindowChange};
use crate::files::SUPPORTED_EXTENSIONS;
use crate::metadata;
use crate::settings::{save_settings, WindowSettings};
use crate::triage::TriageTarget;
use crate::view::{DisplayMode, DisplayState, ZoomDirection};

const WELCOME_TEXT: &str = "File > Open (Ctrl+O) or drag and drop an image";
const EMPTY_TEXT: &str = "No images left in this folder";
const STATUS_REFRESH: Duration = Duration::from_millis(250);

/// Things the key handler cannot express as a [`Command`].
#[derive(Default)]
struct ShellActions {
    commands: Vec<Command>,
    open_dialog: bool,
    close: bool,
    fullscreen: bool,
    metadata: bool,
}

pub struct ViewerApp {
    controller: Controller,
    texture: Option<TextureHandle>,
    shown_frame: Option<usize>,
    forwarded: Option<Receiver<Vec<PathBuf>>>,
    pending_launch: Option<PathBuf>,
    settings_path: Option<PathBuf>,
    window: WindowSettings,
    settings_saved: bool,
    show_metadata: bool,
    metadata_text: Option<String>,
    space_dragged: bool,
    last_title: String,
    closing: bool,
}

impl ViewerApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        launch_path: Option<PathBuf>,
        launch_error: Option<String>,
        forwarded: Option<Receiver<Vec<PathBuf>>>,
        settings_path: Option<PathBuf>,
        window: WindowSettings,
    ) -> Self {
        let repaint = cc.egui_ctx.clone();
        let mut controller = Controller::new(move || repaint.request_repaint());
        if let Some(err) = launch_error {
            log::warn!("{err}");
            controller.set_status(err, Instant::now());
        }

        Self {
            controller,
            texture: None,
            shown_frame: None,
            forwarded,
            pending_launch: launch_path,
            settings_path,
            window,
            settings_saved: false,
            show_metadata: false,
            metadata_text: None,
            space_dragged: false,
            last_title: String::new(),
            closing: false,
        }
    }

    fn apply_black_background(ctx: &egui::Context) {
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = egui::Color32::BLACK;
        visuals.extreme_bg_color = egui::Color32::BLACK;
        ctx.set_visuals(visuals);
    }

    fn dispatch(&mut self, command: Command, ctx: &egui::Context) {
        if self.controller.dispatch(command, Instant::now()) {
            self.sync_texture(ctx, false);
        }
    }

    fn open_dialog(&mut self, ctx: &egui::Context) {
        let picked = rfd::FileDialog::new()
            .add_filter("Images", SUPPORTED_EXTENSIONS)
            .pick_file();
        if let Some(path) = picked {
            self.dispatch(Command::Open(path), ctx);
        }
    }

    fn poll_forwarded_paths(&mut self, ctx: &egui::Context) {
        let Some(receiver) = self.forwarded.as_ref() else {
            return;
        };
        let mut batches = Vec::new();
        loop {
            match receiver.try_recv() {
                Ok(batch) => batches.push(batch),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    self.forwarded = None;
                    break;
                }
            }
        }
        if batches.is_empty() {
            return;
        }
        // Any launch of a second process raises this window, even without a path.
        ctx.send_viewport_cmd(ViewportCommand::Focus);
        if let Some(path) = forwarded_target(&batches).cloned() {
            log::info!("Opening forwarded path {}", path.display());
            self.dispatch(Command::Open(path), ctx);
        }
    }

    /// Uploads the visible frame when the image or the animation frame changed.
    fn sync_texture(&mut self, ctx: &egui::Context, image_changed: bool) {
        let frame_index = self.controller.animation().map_or(0, AnimationState::frame);
        if !image_changed && self.texture.is_some() && self.shown_frame == Some(frame_index) {
            return;
        }
        if image_changed {
            self.metadata_text = None;
        }

        let Some(frame) = self.controller.visible_frame().map(Arc::clone) else {
            self.texture = None;
            self.shown_frame = None;
            return;
        };

        self.shown_frame = Some(frame_index);
        if let Some(texture) = self.texture.as_mut() {
            texture.set(frame, TextureOptions::LINEAR);
        } else {
            self.texture = Some(ctx.load_texture("viewer-image", frame, TextureOptions::LINEAR));
        }
    }

    fn read_keys(&mut self, ctx: &egui::Context) -> ShellActions {
        let mut actions = ShellActions::default();
        let centre = self.controller.display().viewport() * 0.5;
        ctx.input_mut(|input| {
            if input.consume_key(Modifiers::CTRL, Key::O) {
                actions.open_dialog = true;
            }
            if input.consume_key(Modifiers::CTRL, Key::W)
                || input.consume_key(Modifiers::NONE, Key::Escape)
            {
                actions.close = true;
            }
            if input.modifiers.ctrl {
                return;
            }

            let commands = &mut actions.commands;
            if input.key_pressed(Key::ArrowRight)
                || input.key_pressed(Key::ArrowDown)
                || input.key_pressed(Key::PageDown)
            {
                commands.push(Command::Next);
            }
            if input.key_pressed(Key::ArrowLeft)
                || input.key_pressed(Key::ArrowUp)
                || input.key_pressed(Key::PageUp)
            {
                commands.push(Command::Prev);
            }
            if input.key_pressed(Key::Home) {
                commands.push(Command::First);
            }
            if input.key_pressed(Key::End) {
                commands.push(Command::Last);
            }
            if input.key_pressed(Key::F) {
                commands.push(Command::ToggleFit);
            }
            if input.key_pressed(Key::R) {
                commands.push(Command::ToggleShuffle);
            }
            if input.key_pressed(Key::Delete) {
                commands.push(Command::Delete);
            }
            if input.key_pressed(Key::Num7) {
                commands.push(Command::Triage(TriageTarget::Reject));
            }
            if input.key_pressed(Key::Num9) {
                commands.push(Command::Triage(TriageTarget::Accept));
            }
            if input.key_pressed(Key::Period) {
                commands.push(Command::StepFrame);
            }
            if input.key_pressed(Key::Plus) || input.key_pressed(Key::Equals) {
                commands.push(Command::Zoom {
                    direction: ZoomDirection::In,
                    pointer: centre,
                });
            }
            if input.key_pressed(Key::Minus) {
                commands.push(Command::Zoom {
                    direction: ZoomDirection::Out,
                    pointer: centre,
                });
            }
            if input.key_pressed(Key::Num0) || input.key_pressed(Key::Num1) {
                commands.push(Command::ZoomActualSize { pointer: centre });
            }
            if input.key_pressed(Key::Space) {
                self.space_dragged = false;
            }
            // Space doubles as the pan modifier; a hold that dragged does not toggle.
            if input.key_released(Key::Space) && !self.space_dragged {
                commands.push(Command::TogglePlayback);
            }
            actions.fullscreen = input.key_pressed(Key::F11);
            actions.metadata = input.key_pressed(Key::I);
        });
        actions
    }

    fn toggle_fullscreen(&mut self, ctx: &egui::Context) {
        let maximized = ctx.input(|input| input.viewport().maximized.unwrap_or(false));
        match self.controller.toggle_fullscreen(maximized) {
            Some(WindowChange::EnterFullscreen) => {
                ctx.send_viewport_cmd(ViewportCommand::Fullscreen(true));
            }
            Some(WindowChange::ExitFullscreen { maximized }) => {
                ctx.send_viewport_cmd(ViewportCommand::Fullscreen(false));
                ctx.send_viewport_cmd(ViewportCommand::Maximized(maximized));
            }
            None => {}
        }
    }

    fn toggle_metadata(&mut self) {
        self.show_metadata = !self.show_metadata && self.controller.image().is_some();
    }

    fn track_window(&mut self, ctx: &egui::Context) {
        ctx.input(|input| {
            let viewport = input.viewport();
            let fullscreen = viewport.fullscreen.unwrap_or(false);
            let maximized = viewport.maximized.unwrap_or(false);
            if fullscreen {
                return;
            }
            self.window.maximized = maximized;
            if maximized {
                return;
            }
            if let Some(inner) = viewport.inner_rect {
                self.window.width = inner.width();
                self.window.height = inner.height();
            }
            if let Some(outer) = viewport.outer_rect {
                self.window.x = Some(outer.min.x);
                self.window.y = Some(outer.min.y);
            }
        });
    }

    fn persist_window_settings(&mut self) {
        if self.settings_saved {
            return;
        }
        self.settings_saved = true;
        let Some(path) = self.settings_path.as_ref() else {
            return;
        };
        match save_settings(path, &self.window) {
            Ok(()) => log::debug!("Saved window settings to {}", path.display()),
            Err(err) => log::warn!("Could not save window settings: {err:#}"),
        }
    }

    fn show_menu_bar(&mut self, ctx: &egui::Context, actions: &mut ShellActions) {
        let has_image = self.controller.image().is_some();
        egui::TopBottomPanel::top("menu-bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Open... (Ctrl+O)").clicked() {
                        actions.open_dialog = true;
                        ui.close_menu();
                    }
                    if ui.button("Quit (Esc)").clicked() {
                        actions.close = true;
                        ui.close_menu();
                    }
                });
                ui.menu_button("View", |ui| {
                    if ui.button("Fit to window (F)").clicked() {
                        actions.commands.push(Command::ToggleFit);
                        ui.close_menu();
                    }
                    if ui.button("Shuffle (R)").clicked() {
                        actions.commands.push(Command::ToggleShuffle);
                        ui.close_menu();
                    }
                    if ui.button("Fullscreen (F11)").clicked() {
                        actions.fullscreen = true;
                        ui.close_menu();
                    }
                    if ui
                        .add_enabled(has_image, egui::Button::new("Metadata (I)"))
                        .clicked()
                    {
                        actions.metadata = true;
                        ui.close_menu();
                    }
                });
                ui.menu_button("Image", |ui| {
                    ui.add_enabled_ui(has_image, |ui| {
                        let accept = format!("Move to {} (9)", TriageTarget::Accept.folder());
                        if ui.button(accept).clicked() {
                            actions.commands.push(Command::Triage(TriageTarget::Accept));
                            ui.close_menu();
                        }
                        let reject = format!("Move to {} (7)", TriageTarget::Reject.folder());
                        if ui.button(reject).clicked() {
                            actions.commands.push(Command::Triage(TriageTarget::Reject));
                            ui.close_menu();
                        }
                        if ui.button("Move to trash (Del)").clicked() {
                            actions.commands.push(Command::Delete);
                            ui.close_menu();
                        }
                    });
                });
            });
        });
    }

    fn show_status_bar(&self, ctx: &egui::Context, now: Instant) {
        let message = self.controller.status(now).map(str::to_string);
        let summary = view_summary(self.controller.display(), self.controller.animation());
        let loading = self.controller.is_loading();
        egui::TopBottomPanel::bottom("status-bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if let Some(message) = message {
                    ui.label(message);
                } else if loading {
                    ui.label("Loading...");
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(summary) = summary {
                        ui.monospace(summary);
                    }
                });
            });
        });
    }

    fn show_canvas(&mut self, ctx: &egui::Context, actions: &mut ShellActions) {
        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(egui::Color32::BLACK))
            .show(ctx, |ui| {
                let available = ui.available_size();
                let (canvas_rect, response) =
                    ui.allocate_exact_size(available, Sense::click_and_drag());
                self.controller.set_viewport(canvas_rect.size());

                let showing_image = *self.controller.screen() == Screen::Image;
                if !showing_image && response.double_clicked() {
                    actions.open_dialog = true;
                }

                if response.dragged() && ui.input(|input| input.key_down(Key::Space)) {
                    self.space_dragged = true;
                    actions.commands.push(Command::Pan(response.drag_delta()));
                }

                if response.hovered() {
                    let (scroll, zoom_steps) = ui.input(|input| {
                        let scroll = if input.modifiers.ctrl {
                            egui::Vec2::ZERO
                        } else {
                            input.smooth_scroll_delta
                        };
                        (scroll, wheel_zoom_steps(&input.events))
                    });
                    if scroll != egui::Vec2::ZERO {
                        actions.commands.push(Command::Scroll(scroll));
                    }
                    if let Some(pointer) = response.hover_pos() {
                        let pointer = pointer - canvas_rect.min;
                        for direction in zoom_steps {
                            actions.commands.push(Command::Zoom { direction, pointer });
                        }
                    }
                }

                let image_rect = self.controller.display().image_rect(canvas_rect.min);
                match (self.controller.screen(), self.texture.as_ref(), image_rect) {
                    (Screen::Image, Some(texture), Some(image_rect)) => {
                        ui.painter().with_clip_rect(canvas_rect).image(
                            texture.id(),
                            image_rect,
                            egui::Rect::from_min_max(egui::Pos2::ZERO, egui::pos2(1.0, 1.0)),
                            egui::Color32::WHITE,
                        );
                    }
                    (screen, _, _) => {
                        let text = match screen {
                            Screen::Welcome => WELCOME_TEXT,
                            Screen::Empty => EMPTY_TEXT,
                            Screen::Failed(message) => message.as_str(),
                            Screen::Image => "",
                        };
                        ui.painter().text(
                            canvas_rect.center(),
                            egui::Align2::CENTER_CENTER,
                            text,
                            egui::FontId::proportional(16.0),
                            ui.visuals().weak_text_color(),
                        );
                    }
                }
            });
    }

    fn show_metadata_window(&mut self, ctx: &egui::Context) {
        if !self.show_metadata {
            return;
        }
        if self.metadata_text.is_none() {
            self.metadata_text = self
                .controller
                .image()
                .map(|(path, image)| metadata::describe(path, image));
        }
        let Some(text) = self.metadata_text.as_deref() else {
            self.show_metadata = false;
            return;
        };

        egui::Window::new("Metadata")
            .open(&mut self.show_metadata)
            .default_width(420.0)
            .show(ctx, |ui| {
                if ui.button("Copy all").clicked() {
                    ui.ctx().copy_text(text.to_string());
                }
                ui.separator();
                egui::ScrollArea::vertical()
                    .id_salt("metadata-scroll")
                    .max_height(480.0)
                    .show(ui, |ui| {
                        let font = egui::TextStyle::Monospace.resolve(ui.style());
                        let job = json_layout(text, font, ui.visuals().text_color());
                        ui.add(egui::Label::new(job).selectable(true));
                    });
            });
    }

    fn handle_fatal(&mut self, ctx: &egui::Context, now: Instant) {
        if self.closing {
            return;
        }
        let Some(err) = self.controller.fatal_error().map(ToString::to_string) else {
            return;
        };
        log::error!("Closing viewer: {err}");
        self.controller.set_status(err, now);
        self.closing = true;
        ctx.send_viewport_cmd(ViewportCommand::Close);
    }

    fn update_title(&mut self, ctx: &egui::Context) {
        let title = self.controller.title();
        if title != self.last_title {
            ctx.send_viewport_cmd(ViewportCommand::Title(title.clone()));
            self.last_title = title;
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        if let Some(wait) = self.controller.until_next_frame(now) {
            ctx.request_repaint_after(wait);
        }
        if self.controller.status(now).is_some() {
            ctx.request_repaint_after(STATUS_REFRESH);
        }
    }
}

impl eframe::App for ViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        Self::apply_black_background(ctx);
        let now = Instant::now();

        if let Some(path) = self.pending_launch.take() {
            self.dispatch(Command::Open(path), ctx);
        }
        self.poll_forwarded_paths(ctx);

        let loaded = self.controller.poll(now);
        let ticked = self.controller.tick(now);
        match (loaded, ticked) {
            (Update::ImageChanged, _) => self.sync_texture(ctx, true),
            (_, Update::FrameChanged) => self.sync_texture(ctx, false),
            _ => {}
        }
        self.handle_fatal(ctx, now);

        let dropped = ctx.input(|input| {
            input
                .raw
                .dropped_files
                .iter()
                .find_map(|file| file.path.clone())
        });
        if let Some(path) = dropped {
            self.dispatch(Command::Open(path), ctx);
        }

        let mut actions = self.read_keys(ctx);
        if !self.controller.is_fullscreen() {
            self.show_menu_bar(ctx, &mut actions);
            self.show_status_bar(ctx, now);
        }
        self.show_canvas(ctx, &mut actions);

        for command in actions.commands.drain(..) {
            self.dispatch(command, ctx);
        }
        if actions.fullscreen {
            self.toggle_fullscreen(ctx);
        }
        if actions.metadata {
            self.toggle_metadata();
        }
        if actions.open_dialog {
            self.open_dialog(ctx);
        }
        self.show_metadata_window(ctx);

        self.track_window(ctx);
        if actions.close {
            ctx.send_viewport_cmd(ViewportCommand::Close);
        }
        if ctx.input(|input| input.viewport().close_requested()) {
            self.persist_window_settings();
        }

        self.update_title(ctx);
        if self.controller.is_loading() {
            ctx.set_cursor_icon(egui::CursorIcon::Progress);
        }
        self.schedule_repaint(ctx, now);
    }
}

/// First path of the most recent batch that carried any.
fn forwarded_target(batches: &[Vec<PathBuf>]) -> Option<&PathBuf> {
    batches.iter().rev().find_map(|batch| batch.first())
}

/// One zoom step per Ctrl+wheel notch, in event order.
fn wheel_zoom_steps(events: &[egui::Event]) -> Vec<ZoomDirection> {
    events
        .iter()
        .filter_map(|event| match event {
            egui::Event::MouseWheel {
                delta, modifiers, ..
            } if modifiers.ctrl => {
                if delta.y > 0.0 {
                    Some(ZoomDirection::In)
                } else if delta.y < 0.0 {
                    Some(ZoomDirection::Out)
                } else {
                    None
                }
            }
            _ => None,
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum JsonToken {
    Key,
    Str,
    Number,
    Literal,
    Plain,
}

/// Splits pretty-printed JSON into contiguous classified spans.
fn json_tokens(text: &str) -> Vec<(Range<usize>, JsonToken)> {
    let bytes = text.as_bytes();
    let mut tokens: Vec<(Range<usize>, JsonToken)> = Vec::new();
    let mut index = 0;
    while index < bytes.len() {
        let start = index;
        let kind = match bytes[index] {
            b'"' => {
                index += 1;
                while index < bytes.len() && bytes[index] != b'"' {
                    index += if bytes[index] == b'\\' { 2 } else { 1 };
                }
                index = (index + 1).min(bytes.len());
                let rest = text[index..].trim_start();
                if rest.starts_with(':') {
                    JsonToken::Key
                } else {
                    JsonToken::Str
                }
            }
            b'-' | b'0'..=b'9' => {
                while index < bytes.len()
                    && matches!(bytes[index], b'0'..=b'9' | b'-' | b'+' | b'.' | b'e' | b'E')
                {
                    index += 1;
                }
                JsonToken::Number
            }
            b'a'..=b'z' => {
                while index < bytes.len() && bytes[index].is_ascii_alphabetic() {
                    index += 1;
                }
                JsonToken::Literal
            }
            _ => {
                index += 1;
                JsonToken::Plain
            }
        };
        match tokens.last_mut() {
            Some((range, JsonToken::Plain)) if kind == JsonToken::Plain => range.end = index,
            _ => tokens.push((start..index, kind)),
        }
    }
    tokens
}

fn json_layout(text: &str, font: egui::FontId, plain: egui::Color32) -> LayoutJob {
    let mut job = LayoutJob::default();
    for (range, kind) in json_tokens(text) {
        let color = match kind {
            JsonToken::Key => egui::Color32::from_rgb(0x9c, 0xdc, 0xfe),
            JsonToken::Str => egui::Color32::from_rgb(0xce, 0x91, 0x78),
            JsonToken::Number => egui::Color32::from_rgb(0xb5, 0xce, 0xa8),
            JsonToken::Literal => egui::Color32::from_rgb(0x56, 0x9c, 0xd6),
            JsonToken::Plain => plain,
        };
        job.append(&text[range], 0.0, TextFormat::simple(font.clone(), color));
    }
    job
}

/// Right-hand status bar text: zoom, display mode and animation state.
fn view_summary(display: &DisplayState, animation: Option<&AnimationState>) -> Option<String> {
    let percent = display.zoom_percent()?;
    let mode = match display.mode() {
        DisplayMode::Fit => "Fit",
        DisplayMode::FreeZoom => "Zoom",
    };
    let mut summary = format!("{mode} {percent:.0}%");
    if let Some(animation) = animation {
        let state = if animation.is_running() {
            "playing"
        } else {
            "paused"
        };
        summary.push_str(&format!(
            "  |  frame {}/{} {state}",
            animation.frame() + 1,
            animation.frame_count()
        ));
    }
    Some(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wheel(y: f32, modifiers: Modifiers) -> egui::Event {
        egui::Event::MouseWheel {
            unit: egui::MouseWheelUnit::Line,
            delta: egui::vec2(0.0, y),
            modifiers,
        }
    }

    #[test]
    fn ctrl_wheel_maps_to_zoom_steps() {
        let events = vec![
            wheel(1.0, Modifiers::CTRL),
            wheel(-2.0, Modifiers::CTRL),
            wheel(1.0, Modifiers::NONE),
            wheel(0.0, Modifiers::CTRL),
            wheel(1.0, Modifiers::MAC_CMD),
        ];
        assert_eq!(
            wheel_zoom_steps(&events),
            vec![ZoomDirection::In, ZoomDirection::Out]
        );
    }

    #[test]
    fn json_tokens_classify_keys_values_and_literals() {
        let text = "{\n  \"name\": \"a\\\"b.png\",\n  \"width\": -4.5e2,\n  \"animated\": true,\n  \"exif\": null\n}";
        let spans = json_tokens(text)
            .into_iter()
            .filter(|(_, kind)| *kind != JsonToken::Plain)
            .map(|(range, kind)| (&text[range], kind))
            .collect::<Vec<_>>();
        assert_eq!(
            spans,
            vec![
                ("\"name\"", JsonToken::Key),
                ("\"a\\\"b.png\"", JsonToken::Str),
                ("\"width\"", JsonToken::Key),
                ("-4.5e2", JsonToken::Number),
                ("\"animated\"", JsonToken::Key),
                ("true", JsonToken::Literal),
                ("\"exif\"", JsonToken::Key),
                ("null", JsonToken::Literal),
            ]
        );
    }

    #[test]
    fn json_layout_covers_whole_text() {
        let text = "{\n  \"frames\": 3\n}";
        let job = json_layout(text, egui::FontId::monospace(12.0), egui::Color32::WHITE);
        assert_eq!(job.text, text);
        assert!(job.sections.len() >= 3);
    }

    #[test]
    fn forwarded_target_takes_first_path_of_latest_batch() {
        let batches = vec![
            vec![PathBuf::from("/a.png"), PathBuf::from("/b.png")],
            vec![PathBuf::from("/c.png"), PathBuf::from("/d.png")],
            Vec::new(),
        ];
        assert_eq!(forwarded_target(&batches), Some(&PathBuf::from("/c.png")));
        assert_eq!(forwarded_target(&[Vec::new()]), None);
    }

    #[test]
    fn summary_is_empty_without_image() {
        assert_eq!(view_summary(&DisplayState::default(), None), None);
    }

    #[test]
    fn summary_reports_fit_scale_and_animation() {
        let mut display = DisplayState::default();
        display.set_viewport(egui::vec2(200.0, 100.0));
        display.show_static([400, 100]);
        assert_eq!(view_summary(&display, None).as_deref(), Some("Fit 50%"));

        let now = Instant::now();
        let mut animation = AnimationState::new(vec![Duration::from_millis(50); 4], now);
        animation.toggle_playback(now);
        animation.step();
        display.toggle_fit();
        assert_eq!(
            view_summary(&display, Some(&animation)).as_deref(),
            Some("Zoom 100%  |  frame 2/4 paused")
        );
    }
}
