/// Presentation layer: thin egui rendering of the computed `ViewModel`.
pub mod panels;
pub mod plot;
