use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

pub const GENERATE_SCHEDULE_PATH: &str = "api/generate-schedule";
pub const ADD_TO_CALENDAR_PATH: &str = "api/add-to-calendar";
pub const HEALTH_PATH: &str = "api/health";

pub const DEFAULT_CALENDAR_NAME: &str = "Class Schedule";
pub const UNKNOWN_LOCATION: &str = "TBA";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateScheduleRequest {
    pub courses: Vec<String>,
    pub quarter: String,
    pub days_of_week: Vec<String>,
    pub time_preference: String,
    pub teacher_preference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_schedules: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateScheduleResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ScheduleResults>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResults {
    #[serde(default, deserialize_with = "null_as_default")]
    pub recommendations: Vec<ScheduleRecommendation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<ScheduleSummary>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    #[serde(default)]
    pub total_sections: Option<u32>,
    #[serde(default)]
    pub professors_researched: Option<u32>,
    #[serde(default)]
    pub recommendations_count: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRecommendation {
    #[serde(default, deserialize_with = "null_as_default")]
    pub pros: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub cons: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub schedule: Vec<CourseMeeting>,
}

/// One meeting of a course inside a schedule option.
///
/// Fields the client does not render (`start`, `end`, `end_sem`, ...) are kept
/// in `extra` so the meeting can be handed back to the calendar endpoint
/// exactly as the service produced it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseMeeting {
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "one_or_many_days",
        skip_serializing_if = "Option::is_none"
    )]
    pub days_of_week: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CourseMeeting {
    pub fn display_location(&self) -> &str {
        match self.location.as_deref().map(str::trim) {
            Some(location) if !location.is_empty() => location,
            _ => UNKNOWN_LOCATION,
        }
    }

    /// `None` when there is nothing to show for the meeting days.
    pub fn display_days(&self) -> Option<String> {
        self.days_of_week
            .as_ref()
            .filter(|days| !days.is_empty())
            .map(|days| days.join(", "))
    }
}

/// Treats an explicit `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn one_or_many_days<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        Many(Vec<String>),
        One(String),
    }

    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        None => None,
        Some(OneOrMany::Many(days)) => Some(days),
        Some(OneOrMany::One(joined)) => Some(
            joined
                .split(',')
                .map(str::trim)
                .filter(|day| !day.is_empty())
                .map(str::to_string)
                .collect(),
        ),
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddToCalendarRequest {
    pub schedule: Vec<CourseMeeting>,
    pub calendar_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToCalendarResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalendarReceipt {
    pub calendar_id: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}
