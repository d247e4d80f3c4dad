use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;

use super::ScheduleEntry;

/// Colors offered to persisted timetables.
pub const DEFAULT_PALETTE: [&str; 20] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884D8", "#82CA9D", "#FF6B6B", "#4ECDC4",
    "#FFD93D", "#6C5CE7", "#A8E6CF", "#FF8B94", "#96CEB4", "#FFEEAD", "#D4A5A5", "#9B59B6",
    "#3498DB", "#E67E22", "#2ECC71", "#F1C40F",
];

/// Smaller palette used by the anonymous draft timetable.
pub const COMPACT_PALETTE: [&str; 6] = [
    "#0088FE", "#00C49F", "#FFBB28", "#FF8042", "#8884D8", "#82CA9D",
];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS, EnumString, Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ColorPolicy {
    /// `palette[count % len]`. Colors repeat after deletions.
    RoundRobin,
    /// First palette color no current entry uses, else `palette[0]`.
    #[default]
    FirstUnused,
}

/// Ordered, non-empty list of colors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    pub fn new<I, S>(colors: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        (!colors.is_empty()).then_some(Self { colors })
    }

    pub fn standard() -> Self {
        Self {
            colors: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn compact() -> Self {
        Self {
            colors: COMPACT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }

}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColorAssignor {
    palette: Palette,
    policy: ColorPolicy,
}

impl ColorAssignor {
    pub fn new(palette: Palette, policy: ColorPolicy) -> Self {
        Self { palette, policy }
    }

    pub fn policy(&self) -> ColorPolicy {
        self.policy
    }

    /// Color for the next entry added after `existing`.
    pub fn assign(&self, existing: &[ScheduleEntry]) -> &str {
        let colors = &self.palette.colors;
        match self.policy {
            ColorPolicy::RoundRobin => &colors[existing.len() % colors.len()],
            ColorPolicy::FirstUnused => colors
                .iter()
                .find(|color| !existing.iter().any(|entry| entry.color == **color))
                .unwrap_or(&colors[0]),
        }
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn entry_at(slot: usize, color: &str) -> ScheduleEntry {
        let start = format!("{:02}:00", slot);
        let end = format!("{:02}:30", slot);
        ScheduleEntry::parse(Uuid::new_v4(), format!("e{slot}"), &start, &end, color).unwrap()
    }

    fn entries_with_colors(colors: &[&str]) -> Vec<ScheduleEntry> {
        colors
            .iter()
            .enumerate()
            .map(|(slot, color)| entry_at(slot, color))
            .collect()
    }

    #[test]
    fn test_round_robin_wraps_after_palette_size() {
        let assignor = ColorAssignor::new(Palette::compact(), ColorPolicy::RoundRobin);
        let mut existing = Vec::new();
        for (slot, expected) in COMPACT_PALETTE.iter().enumerate() {
            let color = assignor.assign(&existing).to_string();
            assert_eq!(color, *expected);
            existing.push(entry_at(slot, &color));
        }
        // 7th entry (index 6) comes back around.
        assert_eq!(assignor.assign(&existing), COMPACT_PALETTE[0]);
    }

    #[test]
    fn test_round_robin_repeats_after_deletion() {
        let assignor = ColorAssignor::new(Palette::compact(), ColorPolicy::RoundRobin);
        // palette[0] was deleted, palette[1] remains: count is 1 so palette[1] again
        let existing = entries_with_colors(&[COMPACT_PALETTE[1]]);
        assert_eq!(assignor.assign(&existing), COMPACT_PALETTE[1]);
    }

    #[test]
    fn test_first_unused_fills_gaps_left_by_deletion() {
        let assignor = ColorAssignor::new(Palette::compact(), ColorPolicy::FirstUnused);
        let existing = entries_with_colors(&[COMPACT_PALETTE[1]]);
        assert_eq!(assignor.assign(&existing), COMPACT_PALETTE[0]);

        let existing = entries_with_colors(&[COMPACT_PALETTE[0], COMPACT_PALETTE[2]]);
        assert_eq!(assignor.assign(&existing), COMPACT_PALETTE[1]);
    }

    #[test]
    fn test_first_unused_falls_back_when_exhausted() {
        let assignor = ColorAssignor::new(Palette::compact(), ColorPolicy::FirstUnused);
        let existing = entries_with_colors(&COMPACT_PALETTE);
        assert_eq!(assignor.assign(&existing), COMPACT_PALETTE[0]);
    }

    #[test]
    fn test_palette_rejects_empty() {
        assert!(Palette::new(Vec::<String>::new()).is_none());
        assert_eq!(Palette::new(DEFAULT_PALETTE), Some(Palette::standard()));
        assert_eq!(Palette::new(COMPACT_PALETTE), Some(Palette::compact()));
    }

    #[test]
    fn test_policy_parses_from_config_strings() {
        assert_eq!("round_robin".parse::<ColorPolicy>().unwrap(), ColorPolicy::RoundRobin);
        assert_eq!("first_unused".parse::<ColorPolicy>().unwrap(), ColorPolicy::FirstUnused);
        assert!("random".parse::<ColorPolicy>().is_err());
    }
}
