//! Pure derived-state computations over a fetched todo collection: dashboard
//! counts, due-date bucket labels, the display sort order and per-category
//! progress. Everything here takes an explicit `now` so the calendar logic is
//! deterministic under test.

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::Serialize;
use std::collections::BTreeSet;
use utoipa::ToSchema;
use uuid::Uuid;

use super::todo_models::Todo;
use crate::category::category_models::Category;

/// Aggregates shown on the dashboard, recomputed from scratch after every
/// mutation.
#[derive(Debug, Serialize, ToSchema)]
pub struct TodoStats {
    pub total: usize,
    pub completed: usize,
    pub tasks_left: usize,
    pub due_today: usize,
    pub overdue: usize,
    pub high_priority_open: usize,
    pub progress_percentage: f64,
}

pub fn compute_stats(todos: &[Todo], now: DateTime<Utc>) -> TodoStats {
    let total = todos.len();
    let completed = todos.iter().filter(|t| t.completed).count();

    let due_today = todos
        .iter()
        .filter(|t| matches!(t.due_date, Some(due) if due.date_naive() == now.date_naive()))
        .count();

    let overdue = todos.iter().filter(|t| is_overdue(t, now)).count();

    let high_priority_open = todos
        .iter()
        .filter(|t| !t.completed && t.priority == "high")
        .count();

    let progress_percentage = if total > 0 {
        completed as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    TodoStats {
        total,
        completed,
        tasks_left: total - completed,
        due_today,
        overdue,
        high_priority_open,
        progress_percentage,
    }
}

/// A due date equal to "now" is not overdue (strict inequality).
pub fn is_overdue(todo: &Todo, now: DateTime<Utc>) -> bool {
    match todo.due_date {
        Some(due) => !todo.completed && due < now,
        None => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueBucket {
    Today,
    Tomorrow,
    Overdue,
    Upcoming,
}

/// Classifies a due instant. Calendar-day matches take precedence over the
/// instant comparison, so a task due earlier today still buckets as Today.
pub fn due_bucket(due: DateTime<Utc>, now: DateTime<Utc>) -> DueBucket {
    let today = now.date_naive();
    if due.date_naive() == today {
        DueBucket::Today
    } else if Some(due.date_naive()) == today.checked_add_days(Days::new(1)) {
        DueBucket::Tomorrow
    } else if due < now {
        DueBucket::Overdue
    } else {
        DueBucket::Upcoming
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DueLabel {
    pub text: String,
    pub color: String,
}

/// Human-readable due-date badge; None when the todo has no due date.
pub fn due_label(due_date: Option<DateTime<Utc>>, now: DateTime<Utc>) -> Option<DueLabel> {
    let due = due_date?;
    let (text, color) = match due_bucket(due, now) {
        DueBucket::Today => ("Today".to_string(), "blue"),
        DueBucket::Tomorrow => ("Tomorrow".to_string(), "green"),
        DueBucket::Overdue => ("Overdue".to_string(), "red"),
        DueBucket::Upcoming => (due.format("%b %-d").to_string(), "slate"),
    };
    Some(DueLabel {
        text,
        color: color.to_string(),
    })
}

/// Display order: incomplete before completed, then priority descending,
/// then dated before undated with dated tasks ascending by due instant.
/// The sort is stable, so undated peers keep their relative order.
pub fn sort_for_display(todos: &mut [Todo]) {
    todos.sort_by(|a, b| {
        a.completed
            .cmp(&b.completed)
            .then_with(|| b.priority().rank().cmp(&a.priority().rank()))
            .then_with(|| match (a.due_date, b.due_date) {
                (Some(a_due), Some(b_due)) => a_due.cmp(&b_due),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            })
    });
}

/// Todos due on the given calendar day; completion state does not matter
/// for the calendar view.
pub fn todos_on_day(todos: Vec<Todo>, day: NaiveDate) -> Vec<Todo> {
    todos
        .into_iter()
        .filter(|t| matches!(t.due_date, Some(due) if due.date_naive() == day))
        .collect()
}

/// Sorted, de-duplicated calendar days carrying at least one dated todo;
/// drives the month-view day markers.
pub fn dates_with_todos(todos: &[Todo]) -> Vec<NaiveDate> {
    let days: BTreeSet<NaiveDate> = todos
        .iter()
        .filter_map(|t| t.due_date.map(|due| due.date_naive()))
        .collect();
    days.into_iter().collect()
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryProgress {
    pub category_id: Uuid,
    pub completed: usize,
    pub total: usize,
}

/// Per-category completed/total rollup; a category with no todos reports 0/0.
pub fn category_rollup(categories: &[Category], todos: &[Todo]) -> Vec<CategoryProgress> {
    categories
        .iter()
        .map(|category| {
            let in_category: Vec<&Todo> = todos
                .iter()
                .filter(|t| t.category_id == Some(category.id))
                .collect();
            CategoryProgress {
                category_id: category.id,
                completed: in_category.iter().filter(|t| t.completed).count(),
                total: in_category.len(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn todo(title: &str, completed: bool, priority: &str, due_date: Option<DateTime<Utc>>) -> Todo {
        Todo {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: title.to_string(),
            description: String::new(),
            completed,
            priority: priority.to_string(),
            due_date,
            reminder_date: None,
            category_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_counts_add_up() {
        let todos = vec![
            todo("a", false, "low", None),
            todo("b", true, "high", None),
            todo("c", false, "medium", None),
        ];
        let stats = compute_stats(&todos, Utc::now());
        assert_eq!(stats.tasks_left + stats.completed, stats.total);
        assert_eq!(stats.tasks_left, 2);
    }

    #[test]
    fn test_empty_list_has_zero_progress() {
        let stats = compute_stats(&[], Utc::now());
        assert_eq!(stats.total, 0);
        assert_eq!(stats.progress_percentage, 0.0);
    }

    #[test]
    fn test_progress_percentage() {
        let todos = vec![
            todo("a", true, "low", None),
            todo("b", true, "low", None),
            todo("c", false, "low", None),
            todo("d", false, "low", None),
        ];
        let stats = compute_stats(&todos, Utc::now());
        assert_eq!(stats.progress_percentage, 50.0);
    }

    #[test]
    fn test_due_today_ignores_completion() {
        let now = at(2025, 6, 15, 12);
        let todos = vec![
            todo("done today", true, "low", Some(at(2025, 6, 15, 8))),
            todo("open today", false, "low", Some(at(2025, 6, 15, 20))),
            todo("tomorrow", false, "low", Some(at(2025, 6, 16, 9))),
        ];
        let stats = compute_stats(&todos, now);
        assert_eq!(stats.due_today, 2);
    }

    #[test]
    fn test_overdue_requires_open_and_strictly_past() {
        let now = at(2025, 6, 15, 12);
        let exactly_now = todo("now", false, "low", Some(now));
        assert!(!is_overdue(&exactly_now, now));

        let past_open = todo("past", false, "low", Some(at(2025, 6, 14, 12)));
        assert!(is_overdue(&past_open, now));

        let past_done = todo("past done", true, "low", Some(at(2025, 6, 14, 12)));
        assert!(!is_overdue(&past_done, now));
    }

    #[test]
    fn test_high_priority_open_count() {
        let todos = vec![
            todo("a", false, "high", None),
            todo("b", true, "high", None),
            todo("c", false, "medium", None),
        ];
        let stats = compute_stats(&todos, Utc::now());
        assert_eq!(stats.high_priority_open, 1);
    }

    #[test]
    fn test_bucket_today_beats_overdue() {
        // Due at a past hour of the current day still labels Today.
        let now = at(2025, 6, 15, 18);
        let label = due_label(Some(at(2025, 6, 15, 6)), now).unwrap();
        assert_eq!(label.text, "Today");
        assert_eq!(label.color, "blue");
    }

    #[test]
    fn test_bucket_tomorrow() {
        let now = at(2025, 6, 15, 18);
        let label = due_label(Some(at(2025, 6, 16, 6)), now).unwrap();
        assert_eq!(label.text, "Tomorrow");
        assert_eq!(label.color, "green");
    }

    #[test]
    fn test_bucket_overdue() {
        let now = at(2025, 6, 15, 18);
        let label = due_label(Some(at(2025, 6, 10, 6)), now).unwrap();
        assert_eq!(label.text, "Overdue");
        assert_eq!(label.color, "red");
    }

    #[test]
    fn test_bucket_future_short_date() {
        let now = at(2025, 6, 15, 18);
        let label = due_label(Some(at(2025, 7, 4, 6)), now).unwrap();
        assert_eq!(label.text, "Jul 4");
        assert_eq!(label.color, "slate");
    }

    #[test]
    fn test_no_due_date_no_label() {
        assert_eq!(due_label(None, Utc::now()), None);
    }

    #[test]
    fn test_sort_example_scenario() {
        let mut todos = vec![
            todo("A", false, "low", None),
            todo("B", false, "high", Some(at(2099, 1, 1, 0))),
            todo("C", true, "high", None),
        ];
        sort_for_display(&mut todos);
        let titles: Vec<&str> = todos.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_sort_dated_before_undated() {
        let mut todos = vec![
            todo("undated", false, "medium", None),
            todo("dated", false, "medium", Some(at(2099, 1, 1, 0))),
        ];
        sort_for_display(&mut todos);
        assert_eq!(todos[0].title, "dated");
    }

    #[test]
    fn test_sort_dated_ascending() {
        let mut todos = vec![
            todo("later", false, "medium", Some(at(2099, 2, 1, 0))),
            todo("sooner", false, "medium", Some(at(2099, 1, 1, 0))),
        ];
        sort_for_display(&mut todos);
        assert_eq!(todos[0].title, "sooner");
    }

    #[test]
    fn test_sort_unknown_priority_ranks_as_medium() {
        let mut todos = vec![
            todo("mystery", false, "???", None),
            todo("low", false, "low", None),
            todo("high", false, "high", None),
        ];
        sort_for_display(&mut todos);
        let titles: Vec<&str> = todos.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["high", "mystery", "low"]);
    }

    #[test]
    fn test_sort_is_stable_for_undated_peers() {
        let mut todos = vec![
            todo("first", false, "medium", None),
            todo("second", false, "medium", None),
            todo("third", false, "medium", None),
        ];
        sort_for_display(&mut todos);
        let titles: Vec<&str> = todos.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_todos_on_day_matches_calendar_day() {
        let day = at(2025, 6, 15, 0).date_naive();
        let todos = vec![
            todo("morning", false, "low", Some(at(2025, 6, 15, 8))),
            todo("evening done", true, "low", Some(at(2025, 6, 15, 22))),
            todo("next day", false, "low", Some(at(2025, 6, 16, 8))),
            todo("undated", false, "low", None),
        ];
        let on_day = todos_on_day(todos, day);
        let titles: Vec<&str> = on_day.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["morning", "evening done"]);
    }

    #[test]
    fn test_dates_with_todos_sorted_and_unique() {
        let todos = vec![
            todo("b", false, "low", Some(at(2025, 6, 20, 8))),
            todo("a", false, "low", Some(at(2025, 6, 15, 8))),
            todo("a again", false, "low", Some(at(2025, 6, 15, 22))),
            todo("undated", false, "low", None),
        ];
        let dates = dates_with_todos(&todos);
        assert_eq!(
            dates,
            vec![
                at(2025, 6, 15, 0).date_naive(),
                at(2025, 6, 20, 0).date_naive()
            ]
        );
    }

    #[test]
    fn test_category_rollup() {
        let cat = Category {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "Work".to_string(),
            color: "#10b981".to_string(),
            icon: "briefcase".to_string(),
            created_at: Utc::now(),
        };
        let empty = Category {
            id: Uuid::new_v4(),
            name: "Empty".to_string(),
            ..cat.clone()
        };
        let mut a = todo("a", true, "low", None);
        a.category_id = Some(cat.id);
        let mut b = todo("b", false, "low", None);
        b.category_id = Some(cat.id);
        let c = todo("c", false, "low", None);

        let rollup = category_rollup(&[cat.clone(), empty.clone()], &[a, b, c]);
        assert_eq!(rollup[0].category_id, cat.id);
        assert_eq!((rollup[0].completed, rollup[0].total), (1, 2));
        assert_eq!((rollup[1].completed, rollup[1].total), (0, 0));
    }
}
