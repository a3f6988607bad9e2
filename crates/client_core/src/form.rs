//! Draft state of the course preference form.
//!
//! Every mutator is total: positions outside the course list are ignored and
//! the list never drops below one slot. Blank course names are kept while
//! editing and only filtered when a request is built.

use std::collections::BTreeSet;

use shared::{
    domain::{Quarter, TimeBlock, Weekday},
    protocol::GenerateScheduleRequest,
};
use thiserror::Error;

pub const INITIAL_COURSE_SLOTS: usize = 4;

pub const INCOMPLETE_FORM_MESSAGE: &str =
    "Please complete all required fields before generating schedule.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormValidationError {
    #[error("add at least one course")]
    NoCourses,
    #[error("choose a quarter")]
    NoQuarter,
    #[error("select at least one day of the week")]
    NoDays,
    #[error("select at least one time of day")]
    NoTimeBlocks,
}

impl FormValidationError {
    pub fn user_message(self) -> String {
        format!("{INCOMPLETE_FORM_MESSAGE} ({self})")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDraft {
    course_names: Vec<String>,
    quarter: Option<Quarter>,
    days_of_week: BTreeSet<Weekday>,
    time_blocks: BTreeSet<TimeBlock>,
    professor_notes: String,
}

impl Default for FormDraft {
    fn default() -> Self {
        Self {
            course_names: vec![String::new(); INITIAL_COURSE_SLOTS],
            quarter: None,
            days_of_week: BTreeSet::new(),
            time_blocks: BTreeSet::new(),
            professor_notes: String::new(),
        }
    }
}

impl FormDraft {
    pub fn course_names(&self) -> &[String] {
        &self.course_names
    }

    pub fn course_count(&self) -> usize {
        self.course_names.len()
    }

    pub fn can_remove_course_slot(&self) -> bool {
        self.course_names.len() > 1
    }

    pub fn add_course_slot(&mut self) {
        self.course_names.push(String::new());
    }

    pub fn remove_course_slot(&mut self, index: usize) {
        if self.can_remove_course_slot() && index < self.course_names.len() {
            self.course_names.remove(index);
        }
    }

    pub fn update_course_name(&mut self, index: usize, value: impl Into<String>) {
        if let Some(slot) = self.course_names.get_mut(index) {
            *slot = value.into();
        }
    }

    pub fn quarter(&self) -> Option<Quarter> {
        self.quarter
    }

    pub fn set_quarter(&mut self, quarter: Option<Quarter>) {
        self.quarter = quarter;
    }

    pub fn days_of_week(&self) -> &BTreeSet<Weekday> {
        &self.days_of_week
    }

    pub fn has_day(&self, day: Weekday) -> bool {
        self.days_of_week.contains(&day)
    }

    pub fn toggle_day(&mut self, day: Weekday) {
        if !self.days_of_week.remove(&day) {
            self.days_of_week.insert(day);
        }
    }

    pub fn time_blocks(&self) -> &BTreeSet<TimeBlock> {
        &self.time_blocks
    }

    pub fn has_time_block(&self, block: TimeBlock) -> bool {
        self.time_blocks.contains(&block)
    }

    pub fn toggle_time_block(&mut self, block: TimeBlock) {
        if !self.time_blocks.remove(&block) {
            self.time_blocks.insert(block);
        }
    }

    pub fn professor_notes(&self) -> &str {
        &self.professor_notes
    }

    pub fn set_professor_notes(&mut self, notes: impl Into<String>) {
        self.professor_notes = notes.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Non-blank names in slot order, exactly as typed.
    pub fn filled_courses(&self) -> Vec<String> {
        self.course_names
            .iter()
            .filter(|name| !name.trim().is_empty())
            .cloned()
            .collect()
    }

    pub fn time_preference(&self) -> String {
        self.time_blocks
            .iter()
            .map(|block| block.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    pub fn validate(&self) -> Result<(), FormValidationError> {
        if self.filled_courses().is_empty() {
            return Err(FormValidationError::NoCourses);
        }
        if self.quarter.is_none() {
            return Err(FormValidationError::NoQuarter);
        }
        if self.days_of_week.is_empty() {
            return Err(FormValidationError::NoDays);
        }
        if self.time_blocks.is_empty() {
            return Err(FormValidationError::NoTimeBlocks);
        }
        Ok(())
    }

    pub fn to_generate_request(
        &self,
        num_schedules: Option<u32>,
    ) -> Result<GenerateScheduleRequest, FormValidationError> {
        self.validate()?;
        let quarter = self.quarter.ok_or(FormValidationError::NoQuarter)?;
        Ok(GenerateScheduleRequest {
            courses: self.filled_courses(),
            quarter: quarter.as_str().to_string(),
            days_of_week: self
                .days_of_week
                .iter()
                .map(|day| day.as_str().to_string())
                .collect(),
            time_preference: self.time_preference(),
            teacher_preference: self.professor_notes.clone(),
            num_schedules,
        })
    }

    pub fn snapshot(&self) -> PreferencesSnapshot {
        PreferencesSnapshot {
            course_names: self.filled_courses(),
            quarter: self.quarter,
            days_of_week: self.days_of_week.iter().copied().collect(),
            time_blocks: self.time_blocks.iter().copied().collect(),
            professor_notes: self.professor_notes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferencesSnapshot {
    pub course_names: Vec<String>,
    pub quarter: Option<Quarter>,
    pub days_of_week: Vec<Weekday>,
    pub time_blocks: Vec<TimeBlock>,
    pub professor_notes: String,
}
