use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::bridge::{DesktopBridge, Haptic, NotificationKind};
use crate::controller::{Controller, ControllerEvent};
use crate::io::settings::{AppPaths, AppSettings, Tab};
use crate::io::FileStore;
use crate::model::TimerEvent;
use crate::ui;
use crate::ui::checklist::{ChecklistAction, TaskForm};
use crate::ui::prioritize::{PrioritizeAction, SwipeState};
use crate::ui::timer_view::TimerAction;

/// How often to repaint while something is counting down.
const TIMER_REPAINT: Duration = Duration::from_millis(250);

/// Main application state.
pub struct EfficiencyApp {
    pub controller: Controller<DesktopBridge>,
    pub paths: AppPaths,
    pub settings: AppSettings,
    pub tab: Tab,

    pub form: TaskForm,
    pub swipe: SwipeState,
    pub show_about: bool,

    /// Status bar text, written by the controller subscription.
    pub status_message: Rc<RefCell<String>>,

    last_frame: Instant,
}

impl EfficiencyApp {
    pub fn new(cc: &eframe::CreationContext<'_>, paths: AppPaths) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let settings = AppSettings::load(&paths.settings_file());
        let store = FileStore::new(paths.storage_file());
        info!(path = %store.path().display(), "using local task store");

        let mut controller = Controller::new(
            Box::new(store),
            Some(DesktopBridge::new()),
            settings.timer_config(),
        );

        let status_message = Rc::new(RefCell::new("Ready".to_string()));
        let status = status_message.clone();
        let repaint = cc.egui_ctx.clone();
        controller.subscribe(move |event| {
            if let Some(text) = status_text(event) {
                *status.borrow_mut() = text;
            }
            repaint.request_repaint();
        });
        controller.init();

        Self {
            controller,
            tab: settings.last_tab,
            paths,
            settings,
            form: TaskForm::default(),
            swipe: SwipeState::default(),
            show_about: false,
            status_message,
            last_frame: Instant::now(),
        }
    }

    fn set_status(&self, text: impl Into<String>) {
        *self.status_message.borrow_mut() = text.into();
    }

    // --- Settings ---

    fn switch_tab(&mut self, tab: Tab) {
        info!(?tab, "switching tab");
        self.tab = tab;
        self.settings.last_tab = tab;
        self.save_settings();
    }

    fn save_settings(&mut self) {
        let config = self.controller.timer().config();
        self.settings.work_minutes = config.work_minutes;
        self.settings.break_minutes = config.break_minutes;
        if let Err(e) = self.settings.save(&self.paths.settings_file()) {
            warn!(error = %e, "failed to save settings");
        }
    }

    // --- File operations ---

    pub fn export_csv(&mut self) {
        if self.controller.tasks().is_empty() {
            self.set_status("Nothing to export, the checklist is empty");
            return;
        }

        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name("tasks.csv")
            .save_file()
        {
            match crate::io::csv_export::export_csv(self.controller.tasks().tasks(), &path) {
                Ok(count) => self.set_status(format!("Exported {} tasks to CSV", count)),
                Err(e) => self.set_status(format!("CSV export failed: {}", e)),
            }
        }
    }

    pub fn open_data_folder(&mut self) {
        let dir = self.paths.data_dir.clone();
        if let Err(e) = std::fs::create_dir_all(&dir).and_then(|_| open::that(&dir)) {
            warn!(error = %e, "failed to open data folder");
            self.set_status(format!("Could not open {}", dir.display()));
        }
    }

    // --- Task form ---

    fn save_form(&mut self) {
        let deadline = self.form.deadline();
        let added = self
            .controller
            .add_task(&self.form.text, &deadline, self.form.priority);
        if added.is_some() {
            self.form.clear();
        } else {
            self.set_status("Task text is empty");
        }
    }

    // --- Frame handlers ---

    fn handle_checklist(&mut self, action: ChecklistAction) {
        match action {
            ChecklistAction::Complete(id) => {
                self.controller.complete_task(id);
            }
            ChecklistAction::Delete(id) => {
                self.controller.delete_task(id);
            }
            ChecklistAction::ShowForm => self.form.visible = true,
            ChecklistAction::SaveForm => self.save_form(),
            ChecklistAction::CancelForm => self.form.clear(),
            ChecklistAction::None => {}
        }
    }

    fn handle_prioritize(&mut self, action: PrioritizeAction) {
        match action {
            PrioritizeAction::Swipe(start, end) => {
                if self.controller.swipe(start, end).is_none() {
                    self.set_status("Swipe further up or down to pick a quadrant");
                }
            }
            PrioritizeAction::Assign(id, priority) => {
                self.controller.assign_priority(id, priority);
            }
            PrioritizeAction::None => {}
        }
    }

    fn handle_timer(&mut self, action: TimerAction) {
        match action {
            TimerAction::Start => self.controller.start_timer(),
            TimerAction::Pause => self.controller.pause_timer(),
            TimerAction::Reset => self.controller.reset_timer(),
            TimerAction::SetWorkMinutes(m) => {
                self.controller.set_work_minutes(m);
                self.save_settings();
            }
            TimerAction::SetBreakMinutes(m) => {
                self.controller.set_break_minutes(m);
                self.save_settings();
            }
            TimerAction::None => {}
        }
    }

    /// Paint the haptic pulse as a fading border around the window.
    fn paint_pulse(&self, ctx: &egui::Context, now: Instant) {
        let Some((haptic, strength)) = self.controller.bridge().and_then(|b| b.active_pulse(now))
        else {
            return;
        };
        let color = match haptic {
            Haptic::Impact(_) => ui::theme::ACCENT,
            Haptic::Notification(NotificationKind::Success) => ui::theme::TIMER_BREAK,
            Haptic::Notification(NotificationKind::Warning) => ui::theme::TIMER_WORK,
        };
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("haptic_pulse"),
        ));
        painter.rect_stroke(
            ctx.screen_rect().shrink(1.5),
            egui::Rounding::same(4.0),
            egui::Stroke::new(3.0, color.gamma_multiply(strength)),
        );
        ctx.request_repaint();
    }
}

/// Status bar line for a controller event.
fn status_text(event: &ControllerEvent) -> Option<String> {
    let text = match event {
        ControllerEvent::Loaded { count } => format!("Loaded {} tasks", count),
        ControllerEvent::TaskAdded { .. } => "Task added".to_string(),
        ControllerEvent::TaskCompleted { .. } => "Task completed".to_string(),
        ControllerEvent::TaskDeleted { .. } => "Task deleted".to_string(),
        ControllerEvent::PriorityAssigned { priority, .. } => {
            format!("Marked as {}", priority.label().to_lowercase())
        }
        ControllerEvent::SaveFailed { reason } => format!("Could not save tasks: {}", reason),
        ControllerEvent::Timer(TimerEvent::SessionComplete {
            sessions,
            entered_break,
        }) => {
            if *entered_break {
                format!("Session {} done, break starts shortly", sessions)
            } else {
                "Break over, start the next session when ready".to_string()
            }
        }
        ControllerEvent::Timer(TimerEvent::AutoStarted) => "Break started".to_string(),
        ControllerEvent::Timer(_) | ControllerEvent::TimerConfigChanged(_) => return None,
    };
    Some(text)
}

impl eframe::App for EfficiencyApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        let elapsed = now.saturating_duration_since(self.last_frame);
        self.last_frame = now;
        self.controller.advance(elapsed);
        ui::theme::apply_theme(ctx, self.controller.timer().is_break());

        let timer = self.controller.timer();
        if timer.is_running() || timer.auto_start_pending().is_some() {
            ctx.request_repaint_after(TIMER_REPAINT);
        }

        // Top panel: menu + tabs
        let mut picked_tab = None;
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
            ui.add_space(2.0);
            picked_tab = ui::toolbar::show_tabs(self.tab, ui);
            ui.add_space(2.0);
        });
        if let Some(tab) = picked_tab {
            self.switch_tab(tab);
        }

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_DARK)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(self.status_message.borrow().as_str())
                            .font(ui::theme::font_status())
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let tasks = self.controller.tasks();
                        ui.label(
                            egui::RichText::new(format!(
                                "Tasks: {} · To triage: {} · Sessions: {}",
                                tasks.len(),
                                tasks.unprioritized_count(),
                                self.controller.timer().sessions_completed()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Central panel: active tab
        let frame = egui::Frame::default()
            .fill(ui::theme::BG_PANEL)
            .inner_margin(egui::Margin::same(12.0));
        egui::CentralPanel::default().frame(frame).show(ctx, |ui| match self.tab {
            Tab::Checklist => {
                let action =
                    ui::checklist::show_checklist(&self.controller.checklist(), &mut self.form, ui);
                self.handle_checklist(action);
            }
            Tab::Prioritize => {
                let action = ui::prioritize::show_prioritize(
                    self.controller.current_unprioritized(),
                    self.controller.tasks().unprioritized_count(),
                    &mut self.swipe,
                    ui,
                );
                self.handle_prioritize(action);
            }
            Tab::Timer => {
                let action = ui::timer_view::show_timer(self.controller.timer(), ui);
                self.handle_timer(action);
            }
        });

        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }

        self.paint_pulse(ctx, now);
    }
}
