use egui::{RichText, Ui};

use crate::model::pomodoro::MAX_MINUTES;
use crate::model::Pomodoro;
use crate::ui::theme;

pub enum TimerAction {
    None,
    Start,
    Pause,
    Reset,
    SetWorkMinutes(u32),
    SetBreakMinutes(u32),
}

/// Render the Pomodoro tab.
pub fn show_timer(timer: &Pomodoro, ui: &mut Ui) -> TimerAction {
    let mut action = TimerAction::None;
    let accent = theme::timer_accent(timer.is_break());

    ui.add_space(12.0);
    ui.vertical_centered(|ui| {
        let phase = if timer.is_break() { "Break" } else { "Focus" };
        ui.label(RichText::new(phase).size(14.0).strong().color(accent));
        ui.label(
            RichText::new(timer.display())
                .font(theme::font_clock())
                .color(accent),
        );
        ui.add(
            egui::ProgressBar::new(timer.progress())
                .desired_width(260.0)
                .fill(accent)
                .rounding(egui::Rounding::same(3.0)),
        );
        if let Some(left) = timer.auto_start_pending() {
            ui.label(
                RichText::new(format!("Break starts in {:.0}s", left.as_secs_f32().ceil()))
                    .size(11.0)
                    .color(theme::TEXT_SECONDARY),
            );
        }
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            // Center the three buttons.
            let width = 3.0 * 96.0 + 2.0 * ui.spacing().item_spacing.x;
            ui.add_space(((ui.available_width() - width) / 2.0).max(0.0));

            let start = ui.add_enabled(
                !timer.is_running(),
                egui::Button::new(format!("{}  Start", egui_phosphor::regular::PLAY))
                    .min_size(egui::vec2(96.0, 30.0)),
            );
            if start.clicked() {
                action = TimerAction::Start;
            }
            let pause = ui.add_enabled(
                timer.is_running(),
                egui::Button::new(format!("{}  Pause", egui_phosphor::regular::PAUSE))
                    .min_size(egui::vec2(96.0, 30.0)),
            );
            if pause.clicked() {
                action = TimerAction::Pause;
            }
            let reset = ui.add(
                egui::Button::new(format!(
                    "{}  Reset",
                    egui_phosphor::regular::ARROW_COUNTER_CLOCKWISE
                ))
                .min_size(egui::vec2(96.0, 30.0)),
            );
            if reset.clicked() {
                action = TimerAction::Reset;
            }
        });

        ui.add_space(14.0);
        ui.separator();
        ui.add_space(6.0);

        let config = timer.config();
        let mut work = config.work_minutes;
        let mut rest = config.break_minutes;
        egui::Grid::new("timer_settings")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Work").color(theme::TEXT_SECONDARY));
                if ui
                    .add(egui::DragValue::new(&mut work).range(1..=MAX_MINUTES).suffix(" min"))
                    .changed()
                {
                    action = TimerAction::SetWorkMinutes(work);
                }
                ui.end_row();

                ui.label(RichText::new("Break").color(theme::TEXT_SECONDARY));
                if ui
                    .add(egui::DragValue::new(&mut rest).range(1..=MAX_MINUTES).suffix(" min"))
                    .changed()
                {
                    action = TimerAction::SetBreakMinutes(rest);
                }
                ui.end_row();
            });

        ui.add_space(10.0);
        ui.label(
            RichText::new(format!(
                "{}  Sessions completed: {}",
                egui_phosphor::regular::TIMER,
                timer.sessions_completed()
            ))
            .size(12.0)
            .color(theme::TEXT_SECONDARY),
        );
    });

    action
}
