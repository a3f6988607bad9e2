use chrono::{DateTime, Local};
use shared::protocol::{
    AddToCalendarRequest, CalendarReceipt, ScheduleRecommendation, ScheduleResults,
};
use thiserror::Error;

use crate::form::PreferencesSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Please generate a schedule first.")]
    NoResults,
    #[error("Please select a schedule to add.")]
    NoSelection,
}

/// Schedule options returned by the last successful generation and the
/// option the user picked.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultsState {
    results: Option<ScheduleResults>,
    selected: Option<usize>,
}

impl ResultsState {
    pub fn has_results(&self) -> bool {
        self.results.is_some()
    }

    pub fn recommendations(&self) -> &[ScheduleRecommendation] {
        self.results
            .as_ref()
            .map(|results| results.recommendations.as_slice())
            .unwrap_or_default()
    }

    pub fn results(&self) -> Option<&ScheduleResults> {
        self.results.as_ref()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index)
    }

    pub fn replace(&mut self, results: ScheduleResults) {
        self.selected = if results.recommendations.is_empty() {
            None
        } else {
            Some(0)
        };
        self.results = Some(results);
    }

    /// Out-of-range indices leave the selection unchanged.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.recommendations().len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    pub fn selected(&self) -> Option<&ScheduleRecommendation> {
        self.selected
            .and_then(|index| self.recommendations().get(index))
    }

    pub fn can_export(&self) -> bool {
        self.selected().is_some()
    }

    pub fn calendar_request(
        &self,
        calendar_name: &str,
    ) -> Result<AddToCalendarRequest, SelectionError> {
        if self.recommendations().is_empty() {
            return Err(SelectionError::NoResults);
        }
        let option = self.selected().ok_or(SelectionError::NoSelection)?;
        Ok(AddToCalendarRequest {
            schedule: option.schedule.clone(),
            calendar_name: calendar_name.to_string(),
        })
    }

    pub fn clear(&mut self) {
        self.results = None;
        self.selected = None;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubmittedConfirmation {
    pub preferences: PreferencesSnapshot,
    pub calendar_name: String,
    pub receipt: CalendarReceipt,
    pub submitted_at: DateTime<Local>,
}

impl SubmittedConfirmation {
    pub fn new(
        preferences: PreferencesSnapshot,
        calendar_name: impl Into<String>,
        receipt: CalendarReceipt,
    ) -> Self {
        Self {
            preferences,
            calendar_name: calendar_name.into(),
            receipt,
            submitted_at: Local::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use shared::protocol::CourseMeeting;

    use super::*;

    fn option(title: &str) -> ScheduleRecommendation {
        ScheduleRecommendation {
            pros: vec!["Mornings free".to_string()],
            cons: Vec::new(),
            schedule: vec![CourseMeeting {
                summary: title.to_string(),
                description: "Staff".to_string(),
                ..CourseMeeting::default()
            }],
        }
    }

    fn results(count: usize) -> ScheduleResults {
        ScheduleResults {
            recommendations: (0..count).map(|i| option(&format!("CS{i}"))).collect(),
            summary: None,
        }
    }

    #[test]
    fn new_results_select_the_first_option() {
        let mut state = ResultsState::default();
        state.replace(results(3));
        assert_eq!(state.recommendations().len(), 3);
        assert_eq!(state.selected_index(), Some(0));

        state.select(2);
        state.replace(results(2));
        assert_eq!(state.selected_index(), Some(0));
    }

    #[test]
    fn empty_results_leave_nothing_selected() {
        let mut state = ResultsState::default();
        state.replace(results(0));
        assert!(state.has_results());
        assert_eq!(state.selected_index(), None);
        assert_eq!(
            state.calendar_request("Class Schedule"),
            Err(SelectionError::NoResults)
        );
    }

    #[test]
    fn selection_ignores_out_of_range_clicks() {
        let mut state = ResultsState::default();
        state.replace(results(2));
        assert!(state.select(1));
        assert!(!state.select(5));
        assert_eq!(state.selected_index(), Some(1));
    }

    #[test]
    fn calendar_request_carries_the_selected_schedule() {
        let mut state = ResultsState::default();
        assert_eq!(
            state.calendar_request("Class Schedule"),
            Err(SelectionError::NoResults)
        );

        state.replace(results(2));
        state.select(1);
        let request = state.calendar_request("Class Schedule").expect("request");
        assert_eq!(request.calendar_name, "Class Schedule");
        assert_eq!(request.schedule[0].summary, "CS1");
    }

    #[test]
    fn clear_drops_results_and_selection() {
        let mut state = ResultsState::default();
        state.replace(results(1));
        state.clear();
        assert!(!state.has_results());
        assert_eq!(state.selected_index(), None);
        assert!(!state.can_export());
    }
}
