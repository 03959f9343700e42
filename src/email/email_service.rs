use chrono::{DateTime, Utc};

pub struct EmailContent {
    pub subject: String,
    pub body: String,
}

/// Reminder email template, keyed only on task title, due instant and the
/// user's display name.
pub fn generate_reminder_email(
    task_title: &str,
    due_date: DateTime<Utc>,
    user_name: &str,
) -> EmailContent {
    let subject = format!("Reminder: {task_title} is due soon");

    let body = format!(
        "Hi {user_name}!\n\n\
         Don't forget about your task:\n\n\
         {task_title}\n\
         Due: {}\n\n\
         Stay productive and keep up the great work!",
        due_date.format("%B %-d, %Y at %H:%M UTC")
    );

    EmailContent { subject, body }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_reminder_subject_carries_title() {
        let due = Utc.with_ymd_and_hms(2025, 6, 15, 14, 30, 0).unwrap();
        let email = generate_reminder_email("Ship the release", due, "Ada");
        assert_eq!(email.subject, "Reminder: Ship the release is due soon");
    }

    #[test]
    fn test_reminder_body_carries_name_and_due_instant() {
        let due = Utc.with_ymd_and_hms(2025, 6, 15, 14, 30, 0).unwrap();
        let email = generate_reminder_email("Ship the release", due, "Ada");
        assert!(email.body.contains("Hi Ada!"));
        assert!(email.body.contains("Ship the release"));
        assert!(email.body.contains("June 15, 2025 at 14:30 UTC"));
    }
}
