use crate::app::EfficiencyApp;
use crate::io::settings::Tab;
use crate::ui::theme;
use egui::{menu, RichText, Ui};

/// Render the top menu bar.
pub fn show_toolbar(app: &mut EfficiencyApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  Export CSV...").clicked() {
                app.export_csv();
                ui.close_menu();
            }
            if ui.button("  Open Data Folder").clicked() {
                app.open_data_folder();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });
    });
}

/// Render the tab strip. Returns the tab the user picked, if it changed.
pub fn show_tabs(active: Tab, ui: &mut Ui) -> Option<Tab> {
    let mut picked = None;
    ui.horizontal(|ui| {
        for tab in Tab::all() {
            let icon = match tab {
                Tab::Checklist => egui_phosphor::regular::LIST_CHECKS,
                Tab::Prioritize => egui_phosphor::regular::GRID_FOUR,
                Tab::Timer => egui_phosphor::regular::TIMER,
            };
            let text = RichText::new(format!("{} {}", icon, tab.label())).size(13.0);
            if ui.selectable_label(*tab == active, text).clicked() && *tab != active {
                picked = Some(*tab);
            }
        }
    });
    picked
}
