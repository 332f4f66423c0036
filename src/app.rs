use eframe::egui::{self, RichText};

use crate::error::DashboardError;
use crate::state::AppState;
use crate::ui::panels;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub enum VnlExplorerApp {
    Ready(Box<AppState>),
    /// The dataset could not be loaded; nothing but the error is shown.
    Unavailable(DashboardError),
}

impl eframe::App for VnlExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = match self {
            VnlExplorerApp::Ready(state) => state,
            VnlExplorerApp::Unavailable(err) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.centered_and_justified(|ui| {
                        ui.label(
                            RichText::new(format!("Error: {err}"))
                                .heading()
                                .color(ui.visuals().error_fg_color),
                        );
                    });
                });
                return;
            }
        };

        // ---- Top panel: title and tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, state);
        });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            panels::footer(ui);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, state);
            });

        // ---- Central panel: active view ----
        egui::CentralPanel::default().show(ctx, |ui| {
            panels::central_panel(ui, state);
        });
    }
}
