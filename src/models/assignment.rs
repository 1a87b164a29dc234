//! Assignment models (a trainer's bookable weekly time-slot)

use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};

/// Assignment model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Assignment {
    pub assign_id: i32,
    /// Gym service offered in this slot
    pub service_id: i32,
    /// Trainer running this slot
    pub trainer_id: i32,
    /// Slot start (time of day, recurring weekly)
    pub start_time: NaiveTime,
    /// Slot end (time of day, recurring weekly)
    pub end_time: NaiveTime,
    /// Comma-separated weekday names, e.g. "Monday,Wednesday"
    pub schedule: String,
    /// Capacity ceiling
    pub max_capacity: i32,
    /// Number of active bookings currently occupying the slot
    pub current_capacity: i32,
    /// Rate per session
    pub rate: i32,
    pub description: Option<String>,
}

/// Assignment with trainer and service names resolved
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AssignmentDetails {
    pub assign_id: i32,
    pub service_id: i32,
    pub service_name: String,
    pub trainer_id: i32,
    pub trainer_name: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub schedule: String,
    pub max_capacity: i32,
    pub current_capacity: i32,
    pub rate: i32,
    pub description: Option<String>,
}

/// Create assignment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAssignment {
    pub service_id: i32,
    pub trainer_id: i32,
    /// Start time (HH:MM)
    pub start_time: String,
    /// End time (HH:MM)
    pub end_time: String,
    /// Weekday names
    pub schedule: Vec<String>,
    pub max_capacity: i32,
    pub rate: i32,
    pub description: Option<String>,
}

/// Update assignment request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAssignment {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub schedule: Option<Vec<String>>,
    pub max_capacity: Option<i32>,
    pub rate: Option<i32>,
    pub description: Option<String>,
}

/// Query parameters for assignment listing
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct AssignmentQuery {
    /// Filter by gym service
    pub service_id: Option<i32>,
    /// Filter by trainer
    pub trainer_id: Option<i32>,
    /// Only slots with remaining capacity
    pub available: Option<bool>,
}

/// Weekday set serialized as comma-separated English day names.
///
/// This is the storage format for `assignments.schedule`; parsing
/// validates the names so a bad staff edit is rejected at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule(Vec<Weekday>);

impl Schedule {
    pub fn from_names(names: &[String]) -> AppResult<Self> {
        if names.is_empty() {
            return Err(AppError::Validation("Schedule must name at least one weekday".to_string()));
        }
        let mut days = Vec::with_capacity(names.len());
        for name in names {
            let day = parse_weekday(name)?;
            if !days.contains(&day) {
                days.push(day);
            }
        }
        Ok(Schedule(days))
    }

    pub fn parse(serialized: &str) -> AppResult<Self> {
        let names: Vec<String> = serialized
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self::from_names(&names)
    }

    pub fn days(&self) -> &[Weekday] {
        &self.0
    }

    pub fn serialize(&self) -> String {
        self.0
            .iter()
            .map(|d| weekday_name(*d))
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn parse_weekday(name: &str) -> AppResult<Weekday> {
    match name {
        "Monday" => Ok(Weekday::Mon),
        "Tuesday" => Ok(Weekday::Tue),
        "Wednesday" => Ok(Weekday::Wed),
        "Thursday" => Ok(Weekday::Thu),
        "Friday" => Ok(Weekday::Fri),
        "Saturday" => Ok(Weekday::Sat),
        "Sunday" => Ok(Weekday::Sun),
        other => Err(AppError::Validation(format!("Unknown weekday: {}", other))),
    }
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Parse an HH:MM (or HH:MM:SS) time-of-day field from a request
pub fn parse_time(value: &str) -> AppResult<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| AppError::Validation(format!("Invalid time of day: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schedule_round_trips() {
        let schedule = Schedule::parse("Monday, Wednesday,Friday").unwrap();
        assert_eq!(schedule.days(), &[Weekday::Mon, Weekday::Wed, Weekday::Fri]);
        assert_eq!(schedule.serialize(), "Monday,Wednesday,Friday");
    }

    #[test]
    fn schedule_deduplicates_days() {
        let names = vec!["Monday".to_string(), "Monday".to_string()];
        let schedule = Schedule::from_names(&names).unwrap();
        assert_eq!(schedule.days().len(), 1);
    }

    #[test]
    fn schedule_rejects_unknown_day() {
        assert!(Schedule::parse("Monday,Funday").is_err());
    }

    #[test]
    fn schedule_rejects_empty() {
        assert!(Schedule::parse("").is_err());
        assert!(Schedule::from_names(&[]).is_err());
    }

    #[test]
    fn parse_time_accepts_both_formats() {
        assert_eq!(parse_time("09:30").unwrap(), NaiveTime::from_hms_opt(9, 30, 0).unwrap());
        assert_eq!(parse_time("18:00:00").unwrap(), NaiveTime::from_hms_opt(18, 0, 0).unwrap());
        assert!(parse_time("9h30").is_err());
    }
}
