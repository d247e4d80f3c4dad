//! Admission and rendering rules for timetable blocks.
//!
//! The engine is pure: callers hand it a snapshot of an owner's existing
//! entries and get back either an admitted entry (with its color) or a typed
//! rejection. It never touches storage.

mod clock;
mod overlap;
mod palette;
mod time;

pub use clock::{
    Face, FaceGeometry, HandAngles, Sector, hand_angles, hour_angle, minute_angle,
    portion_on_face, sectors_for_face, split_at_noon,
};
use db::models::schedule::CreateSchedule;
pub use overlap::{ScheduleEntry, ensure_no_overlap, find_conflict};
pub use palette::{COMPACT_PALETTE, ColorAssignor, ColorPolicy, DEFAULT_PALETTE, Palette};
use thiserror::Error;
pub use time::{TimeOfDay, TimeRange};
use uuid::Uuid;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ScheduleError {
    #[error("invalid time {0:?}: expected HH:MM between 00:00 and 23:59")]
    Format(String),
    #[error("start time {start} must be before end time {end}")]
    InvalidRange { start: TimeOfDay, end: TimeOfDay },
    #[error("this time overlaps with \"{title}\"")]
    Overlap { id: Uuid, title: String },
    #[error("title must not be empty")]
    EmptyTitle,
}

/// A candidate that passed validation. The caller assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct AdmittedSchedule {
    pub title: String,
    pub range: TimeRange,
    pub color: String,
}

impl AdmittedSchedule {
    /// Normalised form ready for storage.
    pub fn to_create(&self) -> CreateSchedule {
        CreateSchedule {
            title: self.title.clone(),
            start_time: self.range.start().to_string(),
            end_time: self.range.end().to_string(),
        }
    }

    pub fn into_entry(self, id: Uuid) -> ScheduleEntry {
        ScheduleEntry {
            id,
            title: self.title,
            range: self.range,
            color: self.color,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ScheduleEngine {
    colors: ColorAssignor,
}

impl ScheduleEngine {
    pub fn new(palette: Palette, policy: ColorPolicy) -> Self {
        Self {
            colors: ColorAssignor::new(palette, policy),
        }
    }

    /// Round-robin over the compact palette, as used by anonymous drafts.
    pub fn draft() -> Self {
        Self::new(Palette::compact(), ColorPolicy::RoundRobin)
    }

    pub fn color_policy(&self) -> ColorPolicy {
        self.colors.policy()
    }

    /// Checks run in order: title, time format, range, overlap.
    pub fn admit(
        &self,
        existing: &[ScheduleEntry],
        candidate: &CreateSchedule,
    ) -> Result<AdmittedSchedule, ScheduleError> {
        let title = candidate.title.trim();
        if title.is_empty() {
            return Err(ScheduleError::EmptyTitle);
        }
        let range = TimeRange::parse(&candidate.start_time, &candidate.end_time)?;
        ensure_no_overlap(existing, &range)?;

        Ok(AdmittedSchedule {
            title: title.to_string(),
            range,
            color: self.colors.assign(existing).to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(title: &str, start: &str, end: &str) -> CreateSchedule {
        CreateSchedule {
            title: title.to_string(),
            start_time: start.to_string(),
            end_time: end.to_string(),
        }
    }

    #[test]
    fn test_meeting_lunch_scenario() {
        let palette = Palette::compact();
        for policy in [ColorPolicy::RoundRobin, ColorPolicy::FirstUnused] {
            let engine = ScheduleEngine::new(palette.clone(), policy);
            let mut entries = Vec::new();

            let meeting = engine
                .admit(&entries, &candidate("Meeting", "09:00", "10:00"))
                .unwrap();
            assert_eq!(meeting.color, COMPACT_PALETTE[0]);
            let meeting_id = Uuid::new_v4();
            entries.push(meeting.into_entry(meeting_id));

            let rejected = engine.admit(&entries, &candidate("Lunch", "09:30", "10:30"));
            assert_eq!(
                rejected,
                Err(ScheduleError::Overlap {
                    id: meeting_id,
                    title: "Meeting".to_string(),
                })
            );

            let lunch = engine
                .admit(&entries, &candidate("Lunch", "10:00", "11:00"))
                .unwrap();
            assert_eq!(lunch.color, COMPACT_PALETTE[1], "policy {policy}");
        }
    }

    #[test]
    fn test_zero_length_rejected_even_when_empty() {
        let engine = ScheduleEngine::default();
        assert!(matches!(
            engine.admit(&[], &candidate("Nothing", "10:00", "10:00")),
            Err(ScheduleError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_invalid_range_wins_over_overlap() {
        let engine = ScheduleEngine::default();
        let existing =
            vec![ScheduleEntry::parse(Uuid::new_v4(), "Meeting", "09:00", "10:00", "#0088FE").unwrap()];
        assert!(matches!(
            engine.admit(&existing, &candidate("Backwards", "09:45", "09:15")),
            Err(ScheduleError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_format_and_title_errors() {
        let engine = ScheduleEngine::default();
        assert_eq!(
            engine.admit(&[], &candidate("Bad", "9am", "10:00")),
            Err(ScheduleError::Format("9am".to_string()))
        );
        assert_eq!(
            engine.admit(&[], &candidate("   ", "09:00", "10:00")),
            Err(ScheduleError::EmptyTitle)
        );
    }

    #[test]
    fn test_admitted_schedule_is_normalized() {
        let engine = ScheduleEngine::default();
        let admitted = engine
            .admit(&[], &candidate("  Walk ", "7:30", "08:15"))
            .unwrap();
        let create = admitted.to_create();
        assert_eq!(create.title, "Walk");
        assert_eq!(create.start_time, "07:30");
        assert_eq!(create.end_time, "08:15");
        assert_eq!(admitted.color, DEFAULT_PALETTE[0]);
    }

    #[test]
    fn test_draft_engine_wraps_after_six() {
        let engine = ScheduleEngine::draft();
        let mut entries = Vec::new();
        for hour in 0..6 {
            let admitted = engine
                .admit(
                    &entries,
                    &candidate("Block", &format!("{hour:02}:00"), &format!("{hour:02}:30")),
                )
                .unwrap();
            entries.push(admitted.into_entry(Uuid::new_v4()));
        }
        let seventh = engine
            .admit(&entries, &candidate("Block", "06:00", "06:30"))
            .unwrap();
        assert_eq!(seventh.color, COMPACT_PALETTE[0]);
    }
}
