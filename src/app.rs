use eframe::egui;

use crate::resources::ResourceCache;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct SalaryDashApp {
    pub state: AppState,
    cache: ResourceCache,
}

impl SalaryDashApp {
    pub fn new(cache: ResourceCache) -> Self {
        SalaryDashApp {
            state: AppState::default(),
            cache,
        }
    }
}

impl eframe::App for SalaryDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Loaded once; every later frame reads the cached instance.
        let resources = self.cache.resources();

        // ---- Top panel: title bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, resources.as_deref().ok().map(|r| &r.dataset));
        });

        // ---- Left side panel: employee inputs ----
        egui::SidePanel::left("input_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(
                    ui,
                    &mut self.state,
                    resources.as_deref().ok().map(|r| r.dataset.len()),
                );
            });

        // ---- Central panel: prediction, charts, overview ----
        egui::CentralPanel::default().show(ctx, |ui| match &resources {
            Ok(res) => panels::central_panel(ui, &mut self.state, res),
            Err(e) => {
                ui.colored_label(egui::Color32::RED, format!("Error loading resources: {e:#}"));
            }
        });
    }
}
