use super::breathing::SessionState;
use super::task::Task;
use chrono::{Datelike, NaiveDate};

/// Weekday header for a Sunday-first calendar
pub const WEEKDAYS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];

const CELL_WIDTH: usize = 4;

/// Every day of a month, in order. Empty for an invalid year/month.
pub fn month_days(year: i32, month: u32) -> Vec<NaiveDate> {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return Vec::new();
    };
    first
        .iter_days()
        .take_while(|day| day.month() == month)
        .collect()
}

/// Number of empty cells before the 1st in a Sunday-first week
pub fn leading_blanks(year: i32, month: u32) -> usize {
    NaiveDate::from_ymd_opt(year, month, 1)
        .map(|first| first.weekday().num_days_from_sunday() as usize)
        .unwrap_or(0)
}

/// Render a month as a text grid. `marker` returns a character for days that
/// have something to show (e.g. the feeling of that day's entry).
pub fn calendar_grid<F>(year: i32, month: u32, marker: F) -> String
where
    F: Fn(NaiveDate) -> Option<char>,
{
    let mut out = String::new();
    for name in WEEKDAYS {
        out.push_str(&format!("{:<width$}", name, width = CELL_WIDTH));
    }
    let mut lines = vec![out.trim_end().to_string()];

    let mut line = " ".repeat(CELL_WIDTH * leading_blanks(year, month));
    let mut column = leading_blanks(year, month);
    for day in month_days(year, month) {
        let mark = marker(day).unwrap_or(' ');
        line.push_str(&format!("{:>2}{} ", day.day(), mark));
        column += 1;
        if column == 7 {
            lines.push(line.trim_end().to_string());
            line = String::new();
            column = 0;
        }
    }
    if !line.trim().is_empty() {
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

pub fn checkbox(done: bool) -> &'static str {
    if done {
        "[x]"
    } else {
        "[ ]"
    }
}

/// One line of the task list
pub fn task_row(task: &Task) -> String {
    let mut row = format!(
        "{} {} {} · {}",
        task.short_id(),
        checkbox(task.is_completed),
        task.subject,
        task.title
    );
    if let Some(due) = task.due_date {
        row.push_str(&format!(" (due {})", due.format("%Y-%m-%d")));
    }
    row
}

/// Status line for a breathing session snapshot, ending with the backdrop tint
pub fn session_line(state: &SessionState) -> String {
    let tint = state.backdrop().name();
    if state.is_running {
        format!(
            "{} {:<6} {:>2}s  [{}]",
            state.visual_position.glyph(),
            state.current_phase.label(),
            state.seconds_remaining,
            tint
        )
    } else {
        format!("{} ready  [{}]", state.visual_position.glyph(), tint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::breathing::BreathingSession;

    #[test]
    fn test_month_days() {
        assert_eq!(month_days(2024, 2).len(), 29);
        assert_eq!(month_days(2023, 2).len(), 28);
        assert_eq!(month_days(2024, 12).len(), 31);
        assert!(month_days(2024, 13).is_empty());
    }

    #[test]
    fn test_leading_blanks() {
        // 1 May 2024 was a Wednesday
        assert_eq!(leading_blanks(2024, 5), 3);
        // 1 September 2024 was a Sunday
        assert_eq!(leading_blanks(2024, 9), 0);
    }

    #[test]
    fn test_calendar_grid_marks_days() {
        let marked = NaiveDate::from_ymd_opt(2024, 9, 2).unwrap();
        let grid = calendar_grid(2024, 9, |day| (day == marked).then_some('H'));
        let lines: Vec<&str> = grid.lines().collect();

        assert_eq!(lines[0], "Su  Mo  Tu  We  Th  Fr  Sa");
        assert_eq!(lines[1], " 1   2H  3   4   5   6   7");
        // 30 days starting on Sunday: 5 week rows
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[5], "29  30");
    }

    #[test]
    fn test_calendar_grid_leading_padding() {
        let grid = calendar_grid(2024, 5, |_| None);
        let first_week = grid.lines().nth(1).unwrap();
        assert_eq!(first_week, "             1   2   3   4");
    }

    #[test]
    fn test_task_row() {
        let mut task = Task::new("Essay".to_string(), "History".to_string(), NaiveDate::from_ymd_opt(2024, 3, 10));
        let row = task_row(&task);
        assert!(row.contains("[ ] History · Essay (due 2024-03-10)"));

        task.is_completed = true;
        task.due_date = None;
        assert!(task_row(&task).ends_with("[x] History · Essay"));
    }

    #[test]
    fn test_session_line() {
        let mut session = BreathingSession::default();
        assert_eq!(session_line(&session.state()), "🧘 ready  [blue]");
        let state = session.start();
        assert_eq!(session_line(&state), "😤 INHALE  4s  [blue]");
        for _ in 0..4 {
            session.tick();
        }
        assert_eq!(session_line(&session.state()), "😬 HOLD    7s  [purple]");
    }
}
