//! Schaltplan-Editor.
//!
//! Interaktiver Editor für digitale Logik-Schaltpläne mit egui/eframe:
//! Bauteile platzieren, verdrahten, selektieren und verschieben, mit
//! Undo/Redo über das Edit-Log.

use eframe::egui;
use glam::Vec2;
use schaltplan_editor::core::{descriptor, DescriptorId, DESCRIPTORS};
use schaltplan_editor::{collect_frame_input, Editor, EditorIntent, EguiRenderer, Theme};

fn main() -> Result<(), eframe::Error> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!(
        "Schaltplan-Editor v{} startet...",
        env!("CARGO_PKG_VERSION")
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title("Schaltplan-Editor"),
        multisampling: 4,
        ..Default::default()
    };

    eframe::run_native(
        "Schaltplan-Editor",
        options,
        Box::new(|_cc| Ok(Box::new(EditorApp::new()))),
    )
}

/// Haupt-Anwendungsstruktur
struct EditorApp {
    editor: Editor,
    /// Letzte bekannte Zeiger-Position (Viewport-relativ)
    last_pointer_screen: Vec2,
}

impl EditorApp {
    fn new() -> Self {
        // Theme aus TOML laden (oder Standardwerte)
        let config_path = Theme::config_path();
        let theme = Theme::load_from_file(&config_path);

        Self {
            editor: Editor::new(theme),
            last_pointer_screen: Vec2::ZERO,
        }
    }

    /// Bauteil-Palette und Undo/Redo-Knöpfe; liefert die geklickten Intents.
    fn render_toolbar(&self, ctx: &egui::Context) -> Vec<EditorIntent> {
        let mut intents = Vec::new();

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                for (index, desc) in DESCRIPTORS.iter().enumerate() {
                    let id = DescriptorId(index);
                    let active = self.editor.machine().placing().map(|p| p.desc) == Some(id);
                    if ui.selectable_label(active, desc.type_name).clicked() {
                        intents.push(EditorIntent::StartPlacing { desc: id });
                    }
                }

                ui.separator();

                if ui
                    .add_enabled(self.editor.can_undo(), egui::Button::new("Undo"))
                    .clicked()
                {
                    intents.push(EditorIntent::Undo);
                }
                if ui
                    .add_enabled(self.editor.can_redo(), egui::Button::new("Redo"))
                    .clicked()
                {
                    intents.push(EditorIntent::Redo);
                }
            });
        });

        intents
    }

    fn render_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("Zoom: {:.0}%", self.editor.camera.zoom * 100.0));
                ui.separator();
                ui.label(format!("Bauteile: {}", self.editor.circuit.component_count()));
                ui.separator();
                ui.label(format!("Netze: {}", self.editor.circuit.net_count()));
                if let Some(placement) = self.editor.machine().placing() {
                    ui.separator();
                    ui.label(format!(
                        "Platzieren: {} (Escape bricht ab)",
                        descriptor(placement.desc).type_name
                    ));
                }
            });
        });
    }
}

impl eframe::App for EditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let intents = self.render_toolbar(ctx);
        self.render_status_bar(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let (rect, response) =
                    ui.allocate_exact_size(ui.available_size(), egui::Sense::click_and_drag());

                ui.painter()
                    .rect_filled(rect, 0.0, egui::Color32::from_gray(25));

                let input = collect_frame_input(ui, &response, self.last_pointer_screen);
                self.last_pointer_screen = input.pointer_screen;
                let dt = ui.input(|i| i.stable_dt).min(0.1);

                for intent in intents {
                    self.editor.handle_intent(intent);
                }

                // Messung und Zeichnen laufen über getrennte Backends: das
                // Layout misst mit dem Kamera-Stand vor dem Frame-Schritt,
                // gezeichnet wird mit dem danach.
                let measure = EguiRenderer::new(
                    ui.painter(),
                    rect,
                    &self.editor.camera,
                    &self.editor.theme,
                );
                self.editor.update(&input, dt, &measure);

                let mut renderer = EguiRenderer::new(
                    ui.painter(),
                    rect,
                    &self.editor.camera,
                    &self.editor.theme,
                );
                self.editor.draw(&mut renderer);
            });

        // Laufende Gesten und Platzierungen brauchen kontinuierliche Frames
        if ctx.input(|i| i.pointer.is_moving() || i.pointer.any_down())
            || self.editor.machine().placing().is_some()
        {
            ctx.request_repaint();
        }
    }
}
