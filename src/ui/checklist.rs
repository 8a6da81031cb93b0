use chrono::{Local, NaiveDate, NaiveTime};
use egui::{Color32, RichText, Ui};

use crate::model::{ChecklistView, Priority, Task};
use crate::ui::theme;

/// Actions that the checklist can request.
pub enum ChecklistAction {
    None,
    Complete(i64),
    Delete(i64),
    ShowForm,
    SaveForm,
    CancelForm,
}

/// State behind the "Add task" form.
pub struct TaskForm {
    pub visible: bool,
    pub text: String,
    pub has_deadline: bool,
    pub date: NaiveDate,
    pub hour: u32,
    pub minute: u32,
    pub priority: Priority,
}

impl Default for TaskForm {
    fn default() -> Self {
        Self {
            visible: false,
            text: String::new(),
            has_deadline: false,
            date: Local::now().date_naive(),
            hour: 18,
            minute: 0,
            priority: Priority::None,
        }
    }
}

impl TaskForm {
    /// Deadline in `YYYY-MM-DDTHH:MM` form, empty when unchecked.
    pub fn deadline(&self) -> String {
        if !self.has_deadline {
            return String::new();
        }
        let time = NaiveTime::from_hms_opt(self.hour.min(23), self.minute.min(59), 0)
            .unwrap_or_default();
        self.date.and_time(time).format("%Y-%m-%dT%H:%M").to_string()
    }

    /// Hide and clear every field.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Render the checklist tab: the add form on top, then the task rows.
pub fn show_checklist(view: &ChecklistView<'_>, form: &mut TaskForm, ui: &mut Ui) -> ChecklistAction {
    let mut action = ChecklistAction::None;

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new("Tasks")
                .strong()
                .size(15.0)
                .color(theme::TEXT_PRIMARY),
        );
        ui.label(
            RichText::new(format!("({})", view.pending.len() + view.completed.len()))
                .size(11.0)
                .color(theme::TEXT_DIM),
        );
    });
    ui.add_space(4.0);

    if form.visible {
        if let Some(form_action) = show_task_form(form, ui) {
            action = form_action;
        }
    } else {
        let btn = egui::Button::new(
            RichText::new(format!("{}  Add task", egui_phosphor::regular::PLUS))
                .color(Color32::WHITE)
                .size(12.0),
        )
        .fill(theme::ACCENT)
        .rounding(egui::Rounding::same(5.0));
        if ui.add_sized([ui.available_width(), 30.0], btn).clicked() {
            action = ChecklistAction::ShowForm;
        }
    }

    ui.add_space(6.0);
    ui.separator();

    if view.is_empty() {
        ui.add_space(24.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new("No tasks yet").color(theme::TEXT_DIM));
        });
        return action;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, task) in view.pending.iter().enumerate() {
                if let Some(row_action) = show_task_row(task, i, ui) {
                    action = row_action;
                }
            }

            if !view.completed.is_empty() {
                ui.add_space(8.0);
                ui.label(
                    RichText::new("Completed")
                        .size(10.0)
                        .strong()
                        .color(theme::TEXT_DIM),
                );
                ui.add_space(2.0);
                for (i, task) in view.completed.iter().enumerate() {
                    if let Some(row_action) = show_task_row(task, i, ui) {
                        action = row_action;
                    }
                }
            }
        });

    action
}

fn show_task_form(form: &mut TaskForm, ui: &mut Ui) -> Option<ChecklistAction> {
    let mut action = None;
    let frame = egui::Frame {
        fill: theme::BG_DARK,
        rounding: egui::Rounding::same(6.0),
        inner_margin: egui::Margin::same(8.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::new(1.0, theme::BORDER_SUBTLE),
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        egui::Grid::new("add_task_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label(RichText::new("Task").color(theme::TEXT_SECONDARY));
                let text_edit = ui.add_sized(
                    [ui.available_width().max(160.0), 24.0],
                    egui::TextEdit::singleline(&mut form.text).hint_text("What needs doing?"),
                );
                if text_edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    action = Some(ChecklistAction::SaveForm);
                }
                ui.end_row();

                ui.label(RichText::new("Deadline").color(theme::TEXT_SECONDARY));
                ui.horizontal(|ui| {
                    ui.checkbox(&mut form.has_deadline, "");
                    ui.add_enabled_ui(form.has_deadline, |ui| {
                        ui.add(egui_extras::DatePickerButton::new(&mut form.date).id_salt("form_deadline"));
                        ui.add(egui::DragValue::new(&mut form.hour).range(0..=23));
                        ui.label(":");
                        ui.add(egui::DragValue::new(&mut form.minute).range(0..=59));
                    });
                });
                ui.end_row();

                ui.label(RichText::new("Priority").color(theme::TEXT_SECONDARY));
                let selected = format!(
                    "{} {}",
                    theme::priority_icon(form.priority),
                    form.priority.label()
                );
                egui::ComboBox::from_id_salt("form_priority")
                    .selected_text(RichText::new(selected).size(11.0))
                    .show_ui(ui, |ui| {
                        for p in Priority::all() {
                            let lbl = format!("{} {}", theme::priority_icon(*p), p.label());
                            ui.selectable_value(&mut form.priority, *p, lbl);
                        }
                    });
                ui.end_row();
            });

        ui.add_space(4.0);
        ui.horizontal(|ui| {
            let save_btn = egui::Button::new(RichText::new("Save").color(Color32::WHITE))
                .fill(theme::ACCENT)
                .rounding(egui::Rounding::same(4.0));
            if ui.add_sized([80.0, 26.0], save_btn).clicked() {
                action = Some(ChecklistAction::SaveForm);
            }
            if ui.add_sized([80.0, 26.0], egui::Button::new("Cancel")).clicked() {
                action = Some(ChecklistAction::CancelForm);
            }
        });
    });

    action
}

fn show_task_row(task: &Task, index: usize, ui: &mut Ui) -> Option<ChecklistAction> {
    let mut action = None;
    let row_bg = if index % 2 == 0 {
        theme::BG_PANEL
    } else {
        theme::BG_DARK
    };
    let frame = egui::Frame {
        fill: row_bg,
        rounding: egui::Rounding::same(theme::ROW_ROUNDING),
        inner_margin: egui::Margin::symmetric(6.0, 4.0),
        outer_margin: egui::Margin::ZERO,
        stroke: egui::Stroke::NONE,
        shadow: egui::epaint::Shadow::NONE,
    };

    frame.show(ui, |ui| {
        ui.horizontal(|ui| {
            // Quadrant stripe
            let (stripe, _) = ui.allocate_exact_size(egui::vec2(4.0, 30.0), egui::Sense::hover());
            ui.painter()
                .rect_filled(stripe, 2.0, theme::priority_color(task.priority));

            ui.vertical(|ui| {
                let mut text = RichText::new(&task.text).size(12.5);
                text = if task.completed {
                    text.strikethrough().color(theme::TEXT_DIM)
                } else {
                    text.color(theme::TEXT_PRIMARY)
                };
                ui.add(egui::Label::new(text).truncate());
                ui.label(
                    RichText::new(task.deadline_label())
                        .size(10.0)
                        .color(theme::TEXT_SECONDARY),
                );
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let del_btn = ui.add(
                    egui::Button::new(RichText::new(egui_phosphor::regular::X).color(theme::TEXT_DIM))
                        .frame(false),
                );
                if del_btn.on_hover_text("Delete task").clicked() {
                    action = Some(ChecklistAction::Delete(task.id));
                }
                if !task.completed {
                    let done_btn = ui.add(
                        egui::Button::new(
                            RichText::new(egui_phosphor::regular::CHECK).color(theme::TIMER_BREAK),
                        )
                        .frame(false),
                    );
                    if done_btn.on_hover_text("Mark done").clicked() {
                        action = Some(ChecklistAction::Complete(task.id));
                    }
                }
                if task.priority.is_set() {
                    ui.label(
                        RichText::new(theme::priority_icon(task.priority))
                            .color(theme::priority_color(task.priority)),
                    )
                    .on_hover_text(task.priority.label());
                }
            });
        });
    });
    ui.add_space(1.0);

    action
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unchecked_deadline_is_empty() {
        let form = TaskForm::default();
        assert_eq!(form.deadline(), "");
    }

    #[test]
    fn deadline_uses_datetime_local_format() {
        let form = TaskForm {
            has_deadline: true,
            date: NaiveDate::from_ymd_opt(2026, 7, 9).expect("valid date"),
            hour: 8,
            minute: 5,
            ..TaskForm::default()
        };
        assert_eq!(form.deadline(), "2026-07-09T08:05");
    }

    #[test]
    fn clear_hides_and_resets() {
        let mut form = TaskForm {
            visible: true,
            text: "x".into(),
            priority: Priority::ImportantUrgent,
            ..TaskForm::default()
        };
        form.clear();
        assert!(!form.visible);
        assert!(form.text.is_empty());
        assert_eq!(form.priority, Priority::None);
    }
}
