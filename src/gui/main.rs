// GUI entry point for imgbatch
// This binary provides a graphical interface for the batch converter

use eframe::egui;

mod app;
use app::ConverterApp;

fn main() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 480.0])
            .with_min_inner_size([420.0, 380.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Batch Image Converter",
        options,
        Box::new(|cc| Ok(Box::new(ConverterApp::new(cc)))),
    )
}
