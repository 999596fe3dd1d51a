use chrono::{Local, NaiveDate};
use serde::Serialize;
use serde_json::Value;
use std::fmt;

/// Details applied to a submission when the calling surface supplies none.
const DEFAULT_DURATION_MINUTES: u32 = 30;
const DEFAULT_CALORIES: u32 = 250;
const DEFAULT_FEEDBACK: &str = "Felt good!";

/// Normalized, render-safe representation of one logged exercise session.
///
/// Every field except `title` is optional: the remote service is loosely
/// typed and a record keeps only what arrived in a usable shape. The view
/// renders records without further type checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkoutRecord {
    pub user: Option<String>,
    /// Display title. Always a string, never an unrendered structure.
    pub title: String,
    /// Duration in minutes
    pub duration: Option<f64>,
    pub calories: Option<f64>,
    pub feedback: Option<String>,
    /// ISO calendar date (`YYYY-MM-DD`) as sent by the server; not validated
    pub date: Option<String>,
    /// True when the raw element was not a workout-shaped object
    pub invalid: bool,
    /// Original payload element, kept for diagnostic display only
    pub raw: Value,
}

impl fmt::Display for WorkoutRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Workout: {}", self.title)?;
        if self.invalid {
            writeln!(f, "  (unrecognized entry)")?;
        }
        writeln!(f, "  User: {}", self.user.as_deref().unwrap_or("N/A"))?;
        match self.duration {
            Some(minutes) => writeln!(f, "  Duration: {} min", minutes)?,
            None => writeln!(f, "  Duration: N/A")?,
        }
        match self.calories {
            Some(calories) => writeln!(f, "  Calories: {}", calories)?,
            None => writeln!(f, "  Calories: N/A")?,
        }
        writeln!(f, "  Feedback: {}", self.feedback.as_deref().unwrap_or("N/A"))?;
        writeln!(f, "  Date: {}", self.date.as_deref().unwrap_or("N/A"))?;
        write!(f, "  {}", self.raw)
    }
}

/// A new workout at the submission boundary.
///
/// Defaults are fixed here, when the draft is built, not at display time:
/// a plain `add` submits 30 minutes, 250 calories, a stock feedback note
/// and today's date. Builder methods let a richer calling surface override
/// any of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkoutDraft {
    pub title: String,
    pub duration: u32,
    pub calories: u32,
    pub feedback: String,
    pub date: NaiveDate,
}

impl WorkoutDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            duration: DEFAULT_DURATION_MINUTES,
            calories: DEFAULT_CALORIES,
            feedback: DEFAULT_FEEDBACK.to_string(),
            date: Local::now().date_naive(),
        }
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = minutes;
        self
    }

    pub fn with_calories(mut self, calories: u32) -> Self {
        self.calories = calories;
        self
    }

    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = feedback.into();
        self
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    /// Wire body for the create call.
    pub fn to_body(&self, user: &str) -> Value {
        serde_json::json!({
            "user": user,
            "workout": self.title,
            "duration": self.duration,
            "calories": self.calories,
            "feedback": self.feedback,
            "date": self.date,
        })
    }

    /// Locally-built record mirroring what the server would store for this
    /// draft. Used by the optimistic resync strategy.
    pub fn to_record(&self, user: &str) -> WorkoutRecord {
        WorkoutRecord {
            user: Some(user.to_string()),
            title: self.title.clone(),
            duration: Some(f64::from(self.duration)),
            calories: Some(f64::from(self.calories)),
            feedback: Some(self.feedback.clone()),
            date: Some(self.date.to_string()),
            invalid: false,
            raw: self.to_body(user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_fixes_defaults_at_submission() {
        let draft = WorkoutDraft::new("Pushups - 20 reps");
        assert_eq!(draft.title, "Pushups - 20 reps");
        assert_eq!(draft.duration, 30);
        assert_eq!(draft.calories, 250);
        assert_eq!(draft.feedback, "Felt good!");
        assert_eq!(draft.date, Local::now().date_naive());
    }

    #[test]
    fn test_draft_builders_override_defaults() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();
        let draft = WorkoutDraft::new("Squats")
            .with_duration(45)
            .with_calories(300)
            .with_feedback("Tough")
            .with_date(date);

        assert_eq!(draft.duration, 45);
        assert_eq!(draft.calories, 300);
        assert_eq!(draft.feedback, "Tough");
        assert_eq!(draft.date, date);
    }

    #[test]
    fn test_wire_body_shape() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();
        let body = WorkoutDraft::new("Squats").with_date(date).to_body("al");

        assert_eq!(body["user"], "al");
        assert_eq!(body["workout"], "Squats");
        assert_eq!(body["duration"], 30);
        assert_eq!(body["calories"], 250);
        assert_eq!(body["feedback"], "Felt good!");
        assert_eq!(body["date"], "2025-04-07");
    }

    #[test]
    fn test_draft_to_record_round_trips_fields() {
        let date = NaiveDate::from_ymd_opt(2025, 4, 7).unwrap();
        let record = WorkoutDraft::new("Squats").with_date(date).to_record("al");

        assert_eq!(record.user.as_deref(), Some("al"));
        assert_eq!(record.title, "Squats");
        assert_eq!(record.duration, Some(30.0));
        assert_eq!(record.calories, Some(250.0));
        assert_eq!(record.date.as_deref(), Some("2025-04-07"));
        assert!(!record.invalid);
    }

    #[test]
    fn test_record_display_shows_absent_fields_as_na() {
        let record = WorkoutRecord {
            user: None,
            title: "Pushups".to_string(),
            duration: Some(20.0),
            calories: None,
            feedback: None,
            date: None,
            invalid: false,
            raw: serde_json::json!({"workout": "Pushups", "duration": 20}),
        };

        let rendered = record.to_string();
        assert!(rendered.contains("Workout: Pushups"));
        assert!(rendered.contains("Duration: 20 min"));
        assert!(rendered.contains("Calories: N/A"));
        assert!(rendered.contains("User: N/A"));
    }
}
