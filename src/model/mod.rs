pub mod gesture;
pub mod pomodoro;
pub mod task;
pub mod task_list;

pub use pomodoro::{Pomodoro, TimerConfig, TimerEvent};
pub use task::{Priority, Task};
pub use task_list::{ChecklistView, TaskList};
