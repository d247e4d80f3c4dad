use db::models::schedule::Schedule;
use uuid::Uuid;

use super::{ScheduleError, TimeRange};

/// An existing timetable block as the engine sees it.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub id: Uuid,
    pub title: String,
    pub range: TimeRange,
    pub color: String,
}

impl ScheduleEntry {
    pub fn parse(
        id: Uuid,
        title: impl Into<String>,
        start_time: &str,
        end_time: &str,
        color: impl Into<String>,
    ) -> Result<Self, ScheduleError> {
        Ok(Self {
            id,
            title: title.into(),
            range: TimeRange::parse(start_time, end_time)?,
            color: color.into(),
        })
    }
}

impl TryFrom<&Schedule> for ScheduleEntry {
    type Error = ScheduleError;

    fn try_from(schedule: &Schedule) -> Result<Self, Self::Error> {
        ScheduleEntry::parse(
            schedule.id,
            schedule.title.clone(),
            &schedule.start_time,
            &schedule.end_time,
            schedule.color.clone(),
        )
    }
}

/// First existing entry whose interval intersects `candidate`, in input order.
pub fn find_conflict<'a>(
    existing: &'a [ScheduleEntry],
    candidate: &TimeRange,
) -> Option<&'a ScheduleEntry> {
    existing.iter().find(|entry| entry.range.overlaps(candidate))
}

pub fn ensure_no_overlap(
    existing: &[ScheduleEntry],
    candidate: &TimeRange,
) -> Result<(), ScheduleError> {
    match find_conflict(existing, candidate) {
        Some(entry) => Err(ScheduleError::Overlap {
            id: entry.id,
            title: entry.title.clone(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(title: &str, start: &str, end: &str) -> ScheduleEntry {
        ScheduleEntry::parse(Uuid::new_v4(), title, start, end, "#0088FE").unwrap()
    }

    fn range(start: &str, end: &str) -> TimeRange {
        TimeRange::parse(start, end).unwrap()
    }

    #[test]
    fn test_disjoint_and_back_to_back_are_admitted() {
        let existing = vec![entry("Meeting", "09:00", "10:00")];
        for (start, end) in [("07:00", "08:00"), ("08:00", "09:00"), ("10:00", "11:00"), ("13:00", "14:30")] {
            assert_eq!(
                ensure_no_overlap(&existing, &range(start, end)),
                Ok(()),
                "{start}-{end} should be admitted"
            );
        }
    }

    #[test]
    fn test_every_kind_of_overlap_is_rejected() {
        let meeting = entry("Meeting", "09:00", "10:00");
        let existing = vec![meeting.clone()];
        let cases = [
            ("08:30", "09:30"), // overlaps start edge
            ("09:30", "10:30"), // overlaps end edge
            ("09:15", "09:45"), // contained
            ("08:00", "11:00"), // contains
            ("09:00", "10:00"), // identical
            ("09:00", "09:01"), // shares start
            ("09:59", "10:00"), // shares end
        ];
        for (start, end) in cases {
            assert_eq!(
                ensure_no_overlap(&existing, &range(start, end)),
                Err(ScheduleError::Overlap {
                    id: meeting.id,
                    title: "Meeting".to_string(),
                }),
                "{start}-{end} should conflict"
            );
        }
    }

    #[test]
    fn test_find_conflict_returns_first_in_input_order() {
        let existing = vec![
            entry("Breakfast", "07:00", "08:00"),
            entry("Commute", "08:00", "09:00"),
        ];
        let conflict = find_conflict(&existing, &range("07:30", "08:30")).unwrap();
        assert_eq!(conflict.title, "Breakfast");
        assert!(find_conflict(&existing, &range("09:00", "09:30")).is_none());
    }

    #[test]
    fn test_try_from_schedule_rejects_corrupt_row() {
        let schedule = Schedule {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "Broken".to_string(),
            start_time: "25:00".to_string(),
            end_time: "26:00".to_string(),
            color: "#000000".to_string(),
            created_at: chrono::Utc::now(),
        };
        assert!(matches!(
            ScheduleEntry::try_from(&schedule),
            Err(ScheduleError::Format(_))
        ));
    }
}
