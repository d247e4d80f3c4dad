use std::{fmt, str::FromStr};

use super::ScheduleError;

const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time of day with minute precision, no date or zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    minutes: u16,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay { minutes: 0 };
    pub const NOON: TimeOfDay = TimeOfDay { minutes: 12 * 60 };

    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then(|| Self {
            minutes: u16::from(hour) * 60 + u16::from(minute),
        })
    }

    pub fn hour(self) -> u8 {
        (self.minutes / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.minutes % 60) as u8
    }
}

impl FromStr for TimeOfDay {
    type Err = ScheduleError;

    /// Accepts `H:MM` or `HH:MM`, 24-hour.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let format_error = || ScheduleError::Format(s.to_string());

        let (hour, minute) = s.split_once(':').ok_or_else(format_error)?;
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !(1..=2).contains(&hour.len()) || minute.len() != 2 {
            return Err(format_error());
        }
        if !all_digits(hour) || !all_digits(minute) {
            return Err(format_error());
        }

        let hour: u8 = hour.parse().map_err(|_| format_error())?;
        let minute: u8 = minute.parse().map_err(|_| format_error())?;
        TimeOfDay::new(hour, minute).ok_or_else(format_error)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// A same-day half-open interval `[start, end)`. `start < end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    start: TimeOfDay,
    end: TimeOfDay,
}

impl TimeRange {
    pub fn new(start: TimeOfDay, end: TimeOfDay) -> Result<Self, ScheduleError> {
        if start >= end {
            return Err(ScheduleError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses both bounds, reporting format problems before range problems.
    pub fn parse(start: &str, end: &str) -> Result<Self, ScheduleError> {
        let start = start.trim().parse()?;
        let end = end.trim().parse()?;
        Self::new(start, end)
    }

    pub fn start(&self) -> TimeOfDay {
        self.start
    }

    pub fn end(&self) -> TimeOfDay {
        self.end
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end.minutes - self.start.minutes
    }

    /// Half-open intersection test: touching ends do not overlap.
    pub fn overlaps(&self, other: &TimeRange) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Intersection with `[from, to)`, if non-empty.
    pub(crate) fn clip(&self, from: TimeOfDay, to: TimeOfDay) -> Option<TimeRange> {
        let start = self.start.max(from);
        let end = self.end.min(to);
        (start < end).then_some(TimeRange { start, end })
    }
}

/// Upper bound used when clipping to the end of the day.
pub(crate) const END_OF_DAY: TimeOfDay = TimeOfDay {
    minutes: MINUTES_PER_DAY,
};
