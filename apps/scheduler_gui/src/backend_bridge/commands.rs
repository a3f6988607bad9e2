//! Backend commands queued from UI to backend worker.

use shared::protocol::{AddToCalendarRequest, GenerateScheduleRequest};

pub enum BackendCommand {
    GenerateSchedule { request: GenerateScheduleRequest },
    AddToCalendar { request: AddToCalendarRequest },
    CheckHealth,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::GenerateSchedule { .. } => "generate_schedule",
            BackendCommand::AddToCalendar { .. } => "add_to_calendar",
            BackendCommand::CheckHealth => "check_health",
        }
    }
}
