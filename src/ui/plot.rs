use eframe::egui::{Color32, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoints, Points};

use crate::viewmodel::ScatterView;

// ---------------------------------------------------------------------------
// Scatter charts
// ---------------------------------------------------------------------------

/// Render one scatter chart: the dataset base series plus the predicted
/// employee as a red diamond marker.
pub fn scatter_chart(ui: &mut Ui, chart: &ScatterView, base_color: Color32) {
    ui.strong(&chart.title);

    Plot::new(eframe::egui::Id::new(chart.title.as_str()))
        .height(320.0)
        .legend(Legend::default())
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            let base: PlotPoints = chart.base.clone().into();
            plot_ui.points(
                Points::new(base)
                    .radius(2.5)
                    .color(base_color)
                    .name("Employees"),
            );

            let highlight: PlotPoints = vec![chart.highlight].into();
            plot_ui.points(
                Points::new(highlight)
                    .shape(MarkerShape::Diamond)
                    .radius(7.0)
                    .color(Color32::RED)
                    .name("Predicted Employee"),
            );
        });
}
