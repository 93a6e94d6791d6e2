/// UI layer: egui rendering surface for the dashboard pipeline.

pub mod dashboard;
pub mod panels;
