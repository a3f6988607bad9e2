//! Submission coordinator: owns the form, the results and both busy flags,
//! turns user actions into backend commands and folds backend events back
//! into state.
//!
//! Time is passed in explicitly so delayed scrolls and toasts can be driven
//! from tests without an egui context.

use std::time::{Duration, Instant};

use client_core::{FormDraft, ResultsState, Settings, SubmittedConfirmation};
use crossbeam_channel::Sender;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{err_label, UiError, UiErrorContext, UiEvent};
use crate::controller::notifications::{ToastCenter, ToastKey, ToastLevel};
use crate::controller::orchestration::dispatch_backend_command;

pub const RESULTS_SCROLL_DELAY: Duration = Duration::from_millis(100);
pub const REDO_TOAST_DELAY: Duration = Duration::from_millis(400);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollTarget {
    Top,
    Results,
    Confirmation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    pub api_base_url: String,
    pub calendar_name: String,
    pub num_schedules: Option<u32>,
}

impl From<&Settings> for ControllerSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            api_base_url: settings.api_base_url.clone(),
            calendar_name: settings.calendar_name.clone(),
            num_schedules: settings.num_schedules,
        }
    }
}

pub struct SchedulerController {
    cmd_tx: Sender<BackendCommand>,
    settings: ControllerSettings,
    pub form: FormDraft,
    results: ResultsState,
    submitted: Option<SubmittedConfirmation>,
    generating: bool,
    adding_to_calendar: bool,
    redo_prompt_open: bool,
    toasts: ToastCenter,
    pending_scrolls: Vec<(Instant, ScrollTarget)>,
    status: String,
}

impl SchedulerController {
    pub fn new(cmd_tx: Sender<BackendCommand>, settings: ControllerSettings) -> Self {
        Self {
            cmd_tx,
            settings,
            form: FormDraft::default(),
            results: ResultsState::default(),
            submitted: None,
            generating: false,
            adding_to_calendar: false,
            redo_prompt_open: false,
            toasts: ToastCenter::default(),
            pending_scrolls: Vec::new(),
            status: "Connecting to scheduling service".to_string(),
        }
    }

    pub fn results(&self) -> &ResultsState {
        &self.results
    }

    pub fn submitted(&self) -> Option<&SubmittedConfirmation> {
        self.submitted.as_ref()
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    pub fn is_adding_to_calendar(&self) -> bool {
        self.adding_to_calendar
    }

    pub fn toasts(&self) -> &ToastCenter {
        &self.toasts
    }

    pub fn dismiss_toast(&mut self, id: u64) {
        self.toasts.dismiss(id);
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn can_add_to_calendar(&self) -> bool {
        !self.adding_to_calendar && self.results.can_export()
    }

    pub fn generate_schedule(&mut self, now: Instant) {
        if self.generating {
            tracing::debug!("generation already in flight; ignoring request");
            return;
        }
        let request = match self.form.to_generate_request(self.settings.num_schedules) {
            Ok(request) => request,
            Err(err) => {
                tracing::debug!(missing = %err, "generate blocked by incomplete form");
                self.toasts
                    .push(None, ToastLevel::Error, err.user_message(), now);
                return;
            }
        };

        self.generating = true;
        self.toasts.push(
            Some(ToastKey::Generate),
            ToastLevel::Loading,
            "Generating your schedule...",
            now,
        );
        let queued = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::GenerateSchedule { request },
            &mut self.status,
        );
        if !queued {
            self.generating = false;
            self.toasts.push(
                Some(ToastKey::Generate),
                ToastLevel::Error,
                self.status.clone(),
                now,
            );
        }
    }

    pub fn add_to_calendar(&mut self, now: Instant) {
        if self.adding_to_calendar {
            tracing::debug!("calendar export already in flight; ignoring request");
            return;
        }
        let request = match self.results.calendar_request(&self.settings.calendar_name) {
            Ok(request) => request,
            Err(err) => {
                self.toasts
                    .push(None, ToastLevel::Error, err.to_string(), now);
                return;
            }
        };

        self.adding_to_calendar = true;
        self.toasts.push(
            Some(ToastKey::Calendar),
            ToastLevel::Loading,
            "Adding to calendar...",
            now,
        );
        let queued = dispatch_backend_command(
            &self.cmd_tx,
            BackendCommand::AddToCalendar { request },
            &mut self.status,
        );
        if !queued {
            self.adding_to_calendar = false;
            self.toasts.push(
                Some(ToastKey::Calendar),
                ToastLevel::Error,
                self.status.clone(),
                now,
            );
        }
    }

    /// Startup check; failures only reach the status line.
    pub fn check_health(&mut self) {
        if !dispatch_backend_command(&self.cmd_tx, BackendCommand::CheckHealth, &mut self.status)
        {
            tracing::warn!(status = %self.status, "health check not queued");
        }
    }

    pub fn select_candidate(&mut self, index: usize) {
        if self.results.select(index) {
            tracing::debug!(index, "schedule option selected");
        }
    }

    pub fn apply_event(&mut self, event: UiEvent, now: Instant) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::ServiceHealthy(status) => {
                self.status = format!(
                    "Scheduling service at {} is {status}",
                    self.settings.api_base_url
                );
            }
            UiEvent::ScheduleGenerated(results) => {
                self.generating = false;
                let count = results.recommendations.len();
                self.results.replace(results);
                self.toasts.push(
                    Some(ToastKey::Generate),
                    ToastLevel::Success,
                    "Schedule generated successfully!",
                    now,
                );
                self.status = format!("{count} schedule option(s) generated");
                self.pending_scrolls
                    .push((now + RESULTS_SCROLL_DELAY, ScrollTarget::Results));
            }
            UiEvent::CalendarUpdated(receipt) => {
                self.adding_to_calendar = false;
                let message = receipt
                    .message
                    .clone()
                    .unwrap_or_else(|| "Schedule added to calendar!".to_string());
                self.submitted = Some(SubmittedConfirmation::new(
                    self.form.snapshot(),
                    self.settings.calendar_name.clone(),
                    receipt,
                ));
                self.toasts.push(
                    Some(ToastKey::Calendar),
                    ToastLevel::Success,
                    message,
                    now,
                );
                self.pending_scrolls
                    .push((now + RESULTS_SCROLL_DELAY, ScrollTarget::Confirmation));
            }
            UiEvent::Error(err) => self.apply_error(err, now),
        }
    }

    fn apply_error(&mut self, err: UiError, now: Instant) {
        let message = err.user_message(&self.settings.api_base_url);
        let key = match err.context() {
            UiErrorContext::Generate => {
                self.generating = false;
                Some(ToastKey::Generate)
            }
            UiErrorContext::AddToCalendar => {
                self.adding_to_calendar = false;
                Some(ToastKey::Calendar)
            }
            UiErrorContext::HealthCheck => {
                tracing::warn!("scheduling service health check failed");
                self.status = message;
                return;
            }
            UiErrorContext::BackendStartup => None,
        };
        self.status = format!("{} error: {message}", err_label(&err));
        self.toasts.push(key, ToastLevel::Error, message, now);
    }

    pub fn request_redo(&mut self) {
        self.redo_prompt_open = true;
    }

    pub fn is_redo_prompt_open(&self) -> bool {
        self.redo_prompt_open
    }

    pub fn cancel_redo(&mut self) {
        self.redo_prompt_open = false;
    }

    /// Clears every field once the user has confirmed.
    pub fn confirm_redo(&mut self, now: Instant) {
        if !self.redo_prompt_open {
            return;
        }
        self.redo_prompt_open = false;
        self.form.clear();
        self.results.clear();
        self.submitted = None;
        self.pending_scrolls.retain(|(_, target)| *target == ScrollTarget::Top);
        self.pending_scrolls.push((now, ScrollTarget::Top));
        self.toasts.schedule(
            None,
            ToastLevel::Success,
            "Form cleared! You can now add a new course.",
            now,
            REDO_TOAST_DELAY,
        );
        tracing::info!("form cleared");
    }

    pub fn tick(&mut self, now: Instant) {
        self.toasts.tick(now);
    }

    pub fn take_due_scrolls(&mut self, now: Instant) -> Vec<ScrollTarget> {
        let (due, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.pending_scrolls)
            .into_iter()
            .partition(|(at, _)| *at <= now);
        self.pending_scrolls = pending;
        due.into_iter().map(|(_, target)| target).collect()
    }

    /// Next instant at which state changes without user input.
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.pending_scrolls
            .iter()
            .map(|(at, _)| *at)
            .chain(self.toasts.next_deadline())
            .min()
    }
}

#[cfg(test)]
#[path = "../tests/coordinator_tests.rs"]
mod tests;
