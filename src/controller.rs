use std::time::Duration;

use chrono::Utc;
use tracing::{debug, error, info};

use crate::bridge::{HostBridge, ImpactStyle, NotificationKind};
use crate::io::{self, KeyValueStore};
use crate::model::gesture::classify_swipe;
use crate::model::{ChecklistView, Pomodoro, Priority, Task, TaskList, TimerConfig, TimerEvent};

/// Notifications sent to subscribers after every state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerEvent {
    /// Tasks were (re)loaded from storage.
    Loaded { count: usize },
    TaskAdded { id: i64 },
    TaskCompleted { id: i64 },
    TaskDeleted { id: i64 },
    PriorityAssigned { id: i64, priority: Priority },
    /// The write after a mutation failed; in-memory state is still current.
    SaveFailed { reason: String },
    Timer(TimerEvent),
    TimerConfigChanged(TimerConfig),
}

type Subscriber = Box<dyn FnMut(&ControllerEvent)>;

/// Owns the task collection and the Pomodoro timer, persists after every task
/// mutation and reports changes to subscribers.
pub struct Controller<B: HostBridge> {
    tasks: TaskList,
    timer: Pomodoro,
    local_store: Box<dyn KeyValueStore>,
    bridge: Option<B>,
    subscribers: Vec<Subscriber>,
}

impl<B: HostBridge> Controller<B> {
    pub fn new(local_store: Box<dyn KeyValueStore>, bridge: Option<B>, timer: TimerConfig) -> Self {
        Self {
            tasks: TaskList::default(),
            timer: Pomodoro::new(timer),
            local_store,
            bridge,
            subscribers: Vec::new(),
        }
    }

    /// Load stored tasks and tell the host we are up.
    pub fn init(&mut self) {
        let tasks = io::load_tasks(&*self.store());
        let count = tasks.len();
        self.tasks = TaskList::new(tasks);
        info!(count, "tasks loaded");
        self.emit(ControllerEvent::Loaded { count });

        if let Some(bridge) = self.bridge.as_mut() {
            bridge.ready();
        }
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(&ControllerEvent) + 'static) {
        self.subscribers.push(Box::new(subscriber));
    }

    // ── Getters ─────────────────────────────────────────────────

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn checklist(&self) -> ChecklistView<'_> {
        self.tasks.checklist()
    }

    pub fn current_unprioritized(&self) -> Option<&Task> {
        self.tasks.current_unprioritized()
    }

    pub fn timer(&self) -> &Pomodoro {
        &self.timer
    }

    pub fn bridge(&self) -> Option<&B> {
        self.bridge.as_ref()
    }

    // ── Checklist ───────────────────────────────────────────────

    /// Add a task. Blank text is ignored and nothing is written.
    pub fn add_task(&mut self, text: &str, deadline: &str, priority: Priority) -> Option<i64> {
        let id = match self.tasks.add(text, deadline, priority, Utc::now()) {
            Some(task) => task.id,
            None => {
                debug!("ignoring task with empty text");
                return None;
            }
        };
        info!(id, "task added");
        self.persist();
        self.emit(ControllerEvent::TaskAdded { id });
        self.impact(ImpactStyle::Light);
        Some(id)
    }

    pub fn complete_task(&mut self, id: i64) -> bool {
        if !self.tasks.complete(id) {
            return false;
        }
        info!(id, "task completed");
        self.persist();
        self.emit(ControllerEvent::TaskCompleted { id });
        self.notify(NotificationKind::Success);
        true
    }

    /// Remove a task. Unknown ids leave the collection as it was.
    pub fn delete_task(&mut self, id: i64) -> bool {
        let removed = self.tasks.remove(id);
        self.persist();
        if removed {
            info!(id, "task deleted");
            self.emit(ControllerEvent::TaskDeleted { id });
        }
        removed
    }

    // ── Prioritization ──────────────────────────────────────────

    pub fn assign_priority(&mut self, id: i64, priority: Priority) -> bool {
        if !self.tasks.set_priority(id, priority) {
            return false;
        }
        info!(id, priority = priority.as_str(), "priority assigned");
        self.persist();
        self.emit(ControllerEvent::PriorityAssigned { id, priority });
        self.impact(ImpactStyle::Medium);
        true
    }

    /// Apply a drag over the current card. Returns the quadrant it mapped to.
    pub fn swipe(&mut self, start: (f32, f32), end: (f32, f32)) -> Option<(i64, Priority)> {
        let priority = classify_swipe(start, end)?;
        let id = self.tasks.current_unprioritized()?.id;
        self.assign_priority(id, priority).then_some((id, priority))
    }

    // ── Timer ───────────────────────────────────────────────────

    pub fn start_timer(&mut self) {
        if self.timer.start() {
            debug!("timer started");
            self.emit(ControllerEvent::Timer(TimerEvent::Started));
        }
    }

    pub fn pause_timer(&mut self) {
        self.timer.pause();
        debug!("timer paused");
        self.emit(ControllerEvent::Timer(TimerEvent::Paused));
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
        debug!("timer reset");
        self.emit(ControllerEvent::Timer(TimerEvent::Reset));
    }

    pub fn set_work_minutes(&mut self, minutes: u32) {
        self.timer.set_work_minutes(minutes);
        self.emit(ControllerEvent::TimerConfigChanged(self.timer.config()));
    }

    pub fn set_break_minutes(&mut self, minutes: u32) {
        self.timer.set_break_minutes(minutes);
        self.emit(ControllerEvent::TimerConfigChanged(self.timer.config()));
    }

    /// Feed elapsed wall time into the timer.
    pub fn advance(&mut self, elapsed: Duration) {
        let events = self.timer.advance(elapsed);
        self.handle_timer_events(events);
    }

    /// One simulated second.
    pub fn tick(&mut self) {
        let events = self.timer.tick();
        self.handle_timer_events(events);
    }

    fn handle_timer_events(&mut self, events: Vec<TimerEvent>) {
        for event in events {
            if let TimerEvent::SessionComplete {
                sessions,
                entered_break,
            } = event
            {
                info!(sessions, entered_break, "pomodoro session complete");
                self.notify(if entered_break {
                    NotificationKind::Success
                } else {
                    NotificationKind::Warning
                });
            }
            self.emit(ControllerEvent::Timer(event));
        }
    }

    // ── Internals ───────────────────────────────────────────────

    /// Device storage from the bridge when it offers one, else the local store.
    fn store(&mut self) -> &mut dyn KeyValueStore {
        match self.bridge.as_mut().and_then(|b| b.device_storage()) {
            Some(store) => store,
            None => self.local_store.as_mut(),
        }
    }

    fn persist(&mut self) {
        let tasks = self.tasks.tasks().to_vec();
        if let Err(e) = io::save_tasks(self.store(), &tasks) {
            error!(error = %e, "failed to save tasks");
            self.emit(ControllerEvent::SaveFailed {
                reason: e.to_string(),
            });
        }
    }

    fn impact(&mut self, style: ImpactStyle) {
        if let Some(bridge) = self.bridge.as_mut() {
            bridge.impact_occurred(style);
        }
    }

    fn notify(&mut self, kind: NotificationKind) {
        if let Some(bridge) = self.bridge.as_mut() {
            bridge.notification_occurred(kind);
        }
    }

    fn emit(&mut self, event: ControllerEvent) {
        for subscriber in self.subscribers.iter_mut() {
            subscriber(&event);
        }
    }
}
