use eframe::egui::{self, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::{contrasting_text, ColorScale};
use crate::views::Table;

/// Draw a table description; shaded cells get a heat-scale background.
pub fn table(ui: &mut Ui, table: &Table) {
    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .resizable(false)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .columns(Column::auto().at_least(60.0), table.headers.len())
        .header(22.0, |mut header| {
            for title in &table.headers {
                header.col(|ui| {
                    ui.strong(*title);
                });
            }
        })
        .body(|mut body| {
            for row in &table.rows {
                body.row(20.0, |mut cells| {
                    for cell in row {
                        cells.col(|ui| match cell.shade {
                            Some(t) => {
                                let bg = ColorScale::Heat.sample(t);
                                ui.label(
                                    RichText::new(cell.text.as_str())
                                        .background_color(bg)
                                        .color(contrasting_text(bg)),
                                );
                            }
                            None => {
                                ui.label(cell.text.as_str());
                            }
                        });
                    }
                });
            }
        });
}
