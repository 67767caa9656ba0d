use eframe::egui;
use imgbatch::TargetFormat;
use std::sync::atomic::AtomicBool;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

#[path = "app_processing.rs"]
mod app_processing;

pub struct ConverterApp {
    // Input/Output paths
    input_path: String,
    output_path: String,

    // Conversion configuration
    target_format: TargetFormat,
    quality: u8,
    recursive: bool,

    // Conversion state
    is_converting: bool,
    progress: f32,
    current_file: String,
    processed_count: usize,
    total_count: usize,

    // Results
    results_message: String,
    failure_lines: Vec<String>,
    error_message: String,

    // Background worker handoff: progress messages arrive on this channel,
    // the cancel flag is shared with the worker thread
    progress_receiver: Option<Receiver<ProgressMessage>>,
    cancel_flag: Option<Arc<AtomicBool>>,
}

#[derive(Debug)]
pub(crate) enum ProgressMessage {
    Progress {
        current: usize,
        total: usize,
        file: String,
    },
    Complete {
        message: String,
        failures: Vec<String>,
    },
    Error(String),
}

impl ConverterApp {
    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            input_path: String::new(),
            output_path: "output".to_string(),
            target_format: TargetFormat::Jpg,
            quality: 85,
            recursive: false,
            is_converting: false,
            progress: 0.0,
            current_file: String::new(),
            processed_count: 0,
            total_count: 0,
            results_message: String::new(),
            failure_lines: Vec::new(),
            error_message: String::new(),
            progress_receiver: None,
            cancel_flag: None,
        }
    }

    fn render_file_selection(&mut self, ui: &mut egui::Ui) {
        ui.heading("Folders");
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Input:");
            ui.text_edit_singleline(&mut self.input_path);
            if ui.button("Browse...").clicked() {
                if let Some(path) = rfd::FileDialog::new().pick_folder() {
                    self.input_path = path.display().to_string();
                }
            }
        });

        ui.horizontal(|ui| {
            ui.label("Output:");
            ui.text_edit_singleline(&mut self.output_path);
            if ui.button("Browse...").clicked() {
                if let Some(path) = rfd::FileDialog::new().pick_folder() {
                    self.output_path = path.display().to_string();
                }
            }
        });

        ui.add_space(10.0);
    }

    fn render_conversion_settings(&mut self, ui: &mut egui::Ui) {
        ui.heading("Conversion Settings");
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Target format:");
            egui::ComboBox::from_id_salt("target_format")
                .selected_text(self.target_format.extension())
                .show_ui(ui, |ui| {
                    for &format in TargetFormat::all() {
                        ui.selectable_value(&mut self.target_format, format, format.extension());
                    }
                });
        });

        ui.horizontal(|ui| {
            ui.label("Quality:");
            ui.add_enabled(
                self.target_format.uses_quality(),
                egui::Slider::new(&mut self.quality, 0..=100),
            );
        });
        if !self.target_format.uses_quality() {
            ui.label("(quality only applies to JPEG output)");
        }

        ui.checkbox(&mut self.recursive, "Recurse into subdirectories");

        ui.add_space(10.0);
    }

    fn render_action_buttons(&mut self, ui: &mut egui::Ui) {
        ui.separator();

        ui.horizontal(|ui| {
            let button_text = if self.is_converting {
                "Converting..."
            } else {
                "Convert Images"
            };
            let convert = egui::Button::new(button_text).min_size(egui::vec2(160.0, 36.0));
            if ui.add_enabled(!self.is_converting, convert).clicked() {
                self.start_conversion();
            }

            let stop = egui::Button::new("Stop").min_size(egui::vec2(80.0, 36.0));
            if ui.add_enabled(self.is_converting, stop).clicked() {
                self.cancel_conversion();
            }
        });

        ui.add_space(10.0);
    }

    fn render_progress(&mut self, ui: &mut egui::Ui) {
        if self.is_converting || !self.results_message.is_empty() || !self.error_message.is_empty()
        {
            ui.heading("Progress");
            ui.separator();

            if self.is_converting {
                ui.label(format!(
                    "Converting: {}/{}",
                    self.processed_count, self.total_count
                ));
                ui.label(&self.current_file);

                let progress_bar = egui::ProgressBar::new(self.progress)
                    .show_percentage()
                    .animate(true);
                ui.add(progress_bar);
            }

            if !self.results_message.is_empty() {
                ui.label(&self.results_message);
            }

            for line in &self.failure_lines {
                ui.colored_label(egui::Color32::LIGHT_RED, line);
            }

            if !self.error_message.is_empty() {
                ui.colored_label(egui::Color32::RED, &self.error_message);
            }
        }
    }
}

impl eframe::App for ConverterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Check for progress updates from the background thread
        self.check_progress();

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Batch Image Converter");
                ui.label("Convert every image in a folder to a single format");
                ui.add_space(20.0);

                self.render_file_selection(ui);
                self.render_conversion_settings(ui);
                self.render_action_buttons(ui);
                self.render_progress(ui);
            });
        });

        // Request repaint if converting
        if self.is_converting {
            ctx.request_repaint();
        }
    }
}
