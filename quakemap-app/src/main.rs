//! Desktop viewer for the earthquake map.

use crossbeam_channel::{unbounded, Receiver};
use quakemap::{spawn_fetch, DatasetEvent, DatasetKind, LatLng, Map, MapWidget, Point};

struct QuakeMapApp {
    widget: MapWidget,
    datasets: Receiver<DatasetEvent>,
}

impl QuakeMapApp {
    fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let map = Map::new(LatLng::new(38.8026, -116.4194), 3.0, Point::new(1200.0, 800.0));

        // Both feeds load in the background; the map is usable immediately
        let (tx, rx) = unbounded();
        spawn_fetch(DatasetKind::Earthquakes, tx.clone());
        spawn_fetch(DatasetKind::PlateBoundaries, tx);

        Self {
            widget: MapWidget::new(map),
            datasets: rx,
        }
    }
}

impl eframe::App for QuakeMapApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        for event in self.datasets.try_iter() {
            self.widget.map.apply_dataset(event);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| {
                self.widget.show(ui);
            });
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Earthquake Map"),
        ..Default::default()
    };

    eframe::run_native(
        "quakemap-app",
        options,
        Box::new(|cc| Box::new(QuakeMapApp::new(cc))),
    )?;

    Ok(())
}
