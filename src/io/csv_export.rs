use crate::model::Task;
use std::path::Path;

fn status_label(task: &Task) -> &'static str {
    if task.completed {
        "Done"
    } else {
        "Open"
    }
}

/// Export tasks to a semicolon-delimited CSV file.
///
/// Columns: Task ; Deadline ; Priority ; Status ; Created
/// Priority uses the stored quadrant names, empty when untriaged.
/// Returns the number of tasks written.
pub fn export_csv(tasks: &[Task], path: &Path) -> Result<usize, String> {
    let wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_path(path)
        .map_err(|e| format!("Failed to create CSV file: {}", e))?;
    write_tasks(wtr, tasks)
}

fn write_tasks<W: std::io::Write>(mut wtr: csv::Writer<W>, tasks: &[Task]) -> Result<usize, String> {
    wtr.write_record(["Task", "Deadline", "Priority", "Status", "Created"])
        .map_err(|e| format!("Failed to write header: {}", e))?;

    for task in tasks {
        wtr.write_record([
            task.text.as_str(),
            task.deadline.as_str(),
            task.priority.as_str(),
            status_label(task),
            task.created_at.as_str(),
        ])
        .map_err(|e| format!("Failed to write task '{}': {}", task.text, e))?;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {}", e))?;
    Ok(tasks.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Priority, TaskList};
    use chrono::{TimeZone, Utc};

    #[test]
    fn writes_header_and_rows() {
        let now = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).single().expect("valid time");
        let mut list = TaskList::default();
        list.add("plan; review", "2026-01-03T09:00", Priority::ImportantUrgent, now);
        list.add("stretch", "", Priority::None, now);
        let id = list.tasks()[1].id;
        list.complete(id);

        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("tasks.csv");
        let written = export_csv(list.tasks(), &path).expect("export");
        assert_eq!(written, 2);

        let text = std::fs::read_to_string(&path).expect("read back");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Task;Deadline;Priority;Status;Created");
        assert_eq!(
            lines[1],
            "\"plan; review\";2026-01-03T09:00;important-urgent;Open;2026-01-02T03:04:05.000Z"
        );
        assert_eq!(lines[2], "stretch;;;Done;2026-01-02T03:04:05.000Z");
    }
}
