//! Analog clock geometry for the AM and PM timetable faces.
//!
//! Angles are in degrees, clockwise from the 12 o'clock position. A schedule
//! block is drawn as a circular sector from the hour-hand angle of its start
//! to the hour-hand angle of its end.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use ts_rs::TS;
use uuid::Uuid;

use super::{
    ScheduleEntry, TimeOfDay, TimeRange,
    time::END_OF_DAY,
};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, EnumString, Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Face {
    Am,
    Pm,
}

impl Face {
    pub fn bounds(self) -> (TimeOfDay, TimeOfDay) {
        match self {
            Face::Am => (TimeOfDay::MIDNIGHT, TimeOfDay::NOON),
            Face::Pm => (TimeOfDay::NOON, END_OF_DAY),
        }
    }
}

/// Hour-hand angle: 30° per hour plus 0.5° per minute.
pub fn hour_angle(time: TimeOfDay) -> f64 {
    f64::from(time.hour() % 12) * 30.0 + f64::from(time.minute()) * 0.5
}

/// Minute-hand angle: 6° per minute.
pub fn minute_angle(time: TimeOfDay) -> f64 {
    f64::from(time.minute()) * 6.0
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct HandAngles {
    pub hour: f64,
    pub minute: f64,
}

pub fn hand_angles(time: TimeOfDay) -> HandAngles {
    HandAngles {
        hour: hour_angle(time),
        minute: minute_angle(time),
    }
}

/// Size of the rendered dial in SVG user units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceGeometry {
    pub center: f64,
    pub radius: f64,
}

impl Default for FaceGeometry {
    fn default() -> Self {
        Self {
            center: 150.0,
            radius: 148.0,
        }
    }
}

impl FaceGeometry {
    fn point(&self, angle: f64) -> (f64, f64) {
        let radians = (angle - 90.0).to_radians();
        (
            self.center + self.radius * radians.cos(),
            self.center + self.radius * radians.sin(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
pub struct Sector {
    pub id: Uuid,
    pub title: String,
    pub start_time: String,
    pub end_time: String,
    pub color: String,
    pub face: Face,
    pub start_angle: f64,
    pub end_angle: f64,
    pub large_arc_flag: u8,
    pub sweep_flag: u8,
    pub path: String,
}

/// The part of `range` drawn on `face`, if any. A block crossing noon is
/// split so each face only shows its own half.
pub fn portion_on_face(range: &TimeRange, face: Face) -> Option<TimeRange> {
    let (from, to) = face.bounds();
    range.clip(from, to)
}

/// Both face portions of `range`, AM first.
pub fn split_at_noon(range: &TimeRange) -> impl Iterator<Item = (Face, TimeRange)> + '_ {
    [Face::Am, Face::Pm]
        .into_iter()
        .filter_map(move |face| portion_on_face(range, face).map(|part| (face, part)))
}

/// Sector for a range that already lies within `face`.
fn sector(entry: &ScheduleEntry, face: Face, part: TimeRange, geometry: &FaceGeometry) -> Sector {
    let (_, face_end) = face.bounds();
    let start_angle = hour_angle(part.start());
    // The AM face closes at 12:00, which would otherwise project back to 0°.
    let end_angle = if part.end() == face_end {
        360.0
    } else {
        hour_angle(part.end())
    };
    let large_arc_flag = u8::from(end_angle - start_angle > 180.0);
    let sweep_flag = 1;

    let (x1, y1) = geometry.point(start_angle);
    let (x2, y2) = geometry.point(end_angle);
    let c = geometry.center;
    let r = geometry.radius;
    // An arc whose endpoints coincide renders as nothing; draw a full face as two halves.
    let arc = if end_angle - start_angle >= 360.0 {
        let (xm, ym) = geometry.point(start_angle + 180.0);
        format!(
            "A {r:.3} {r:.3} 0 0 {sweep_flag} {xm:.3} {ym:.3} A {r:.3} {r:.3} 0 0 {sweep_flag} {x2:.3} {y2:.3}"
        )
    } else {
        format!("A {r:.3} {r:.3} 0 {large_arc_flag} {sweep_flag} {x2:.3} {y2:.3}")
    };
    let path = format!("M {c:.3} {c:.3} L {x1:.3} {y1:.3} {arc} Z");

    Sector {
        id: entry.id,
        title: entry.title.clone(),
        start_time: part.start().to_string(),
        end_time: part.end().to_string(),
        color: entry.color.clone(),
        face,
        start_angle,
        end_angle,
        large_arc_flag,
        sweep_flag,
        path,
    }
}

/// Sectors to draw on one face, in the order of `entries`.
pub fn sectors_for_face<'a>(
    entries: &'a [ScheduleEntry],
    face: Face,
    geometry: FaceGeometry,
) -> impl Iterator<Item = Sector> + 'a {
    entries.iter().filter_map(move |entry| {
        portion_on_face(&entry.range, face).map(|part| sector(entry, face, part, &geometry))
    })
}
