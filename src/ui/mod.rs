pub mod checklist;
pub mod dialogs;
pub mod prioritize;
pub mod theme;
pub mod timer_view;
pub mod toolbar;
