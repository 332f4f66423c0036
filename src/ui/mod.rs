//! egui rendering of the filter sidebar and the view descriptions.

pub mod panels;
pub mod plot;
pub mod table;
