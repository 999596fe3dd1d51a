mod workout;

pub use workout::{WorkoutDraft, WorkoutRecord};
