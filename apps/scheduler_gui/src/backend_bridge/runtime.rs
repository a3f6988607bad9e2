//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread};

use client_core::SchedulerApi;
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    api: Arc<dyn SchedulerApi>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let _ = ui_tx.try_send(UiEvent::Info(format!(
            "Backend worker ready ({})",
            api.base_url()
        )));

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                let api = Arc::clone(&api);
                let ui_tx = ui_tx.clone();
                // Each command settles on its own task so a slow generation
                // does not hold back a calendar export.
                tokio::spawn(async move {
                    let name = cmd.name();
                    let event = execute_command(api.as_ref(), cmd).await;
                    deliver(ui_tx, name, event).await;
                });
            }
            tracing::debug!("ui command queue closed; backend worker exiting");
        });
    })
}

/// Every command result clears a busy flag in the UI, so a full queue waits
/// for room instead of dropping the event.
async fn deliver(ui_tx: Sender<UiEvent>, command: &'static str, event: UiEvent) {
    match ui_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            tracing::warn!(command, "ui event queue full; waiting for room");
            let sent = tokio::task::spawn_blocking(move || ui_tx.send(event).is_ok()).await;
            if !matches!(sent, Ok(true)) {
                tracing::warn!(command, "ui event queue closed; dropping result");
            }
        }
        Err(TrySendError::Disconnected(_)) => {
            tracing::warn!(command, "ui event queue closed; dropping result");
        }
    }
}

pub async fn execute_command(api: &dyn SchedulerApi, cmd: BackendCommand) -> UiEvent {
    match cmd {
        BackendCommand::GenerateSchedule { request } => {
            match api.generate_schedule(&request).await {
                Ok(results) => UiEvent::ScheduleGenerated(results),
                Err(err) => {
                    UiEvent::Error(UiError::from_client_error(UiErrorContext::Generate, &err))
                }
            }
        }
        BackendCommand::AddToCalendar { request } => match api.add_to_calendar(&request).await {
            Ok(receipt) => UiEvent::CalendarUpdated(receipt),
            Err(err) => UiEvent::Error(UiError::from_client_error(
                UiErrorContext::AddToCalendar,
                &err,
            )),
        },
        BackendCommand::CheckHealth => match api.health().await {
            Ok(health) => UiEvent::ServiceHealthy(health.status),
            Err(err) => {
                UiEvent::Error(UiError::from_client_error(UiErrorContext::HealthCheck, &err))
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use client_core::ClientError;
    use shared::protocol::{
        AddToCalendarRequest, CalendarReceipt, GenerateScheduleRequest, HealthResponse,
        ScheduleRecommendation, ScheduleResults,
    };

    use super::*;
    use crate::controller::events::UiErrorCategory;

    struct StubApi {
        decline_calendar: bool,
    }

    #[async_trait]
    impl SchedulerApi for StubApi {
        async fn generate_schedule(
            &self,
            _request: &GenerateScheduleRequest,
        ) -> Result<ScheduleResults, ClientError> {
            Ok(ScheduleResults {
                recommendations: vec![ScheduleRecommendation::default()],
                summary: None,
            })
        }

        async fn add_to_calendar(
            &self,
            _request: &AddToCalendarRequest,
        ) -> Result<CalendarReceipt, ClientError> {
            if self.decline_calendar {
                Err(ClientError::Rejected {
                    message: Some("calendar quota exceeded".to_string()),
                })
            } else {
                Ok(CalendarReceipt::default())
            }
        }

        async fn health(&self) -> Result<HealthResponse, ClientError> {
            Ok(HealthResponse {
                status: "healthy".to_string(),
            })
        }

        fn base_url(&self) -> &str {
            "http://stub/"
        }
    }

    fn calendar_command() -> BackendCommand {
        BackendCommand::AddToCalendar {
            request: AddToCalendarRequest {
                schedule: Vec::new(),
                calendar_name: "Class Schedule".to_string(),
            },
        }
    }

    #[tokio::test]
    async fn generation_result_becomes_schedule_event() {
        let api = StubApi {
            decline_calendar: false,
        };
        let event = execute_command(
            &api,
            BackendCommand::GenerateSchedule {
                request: GenerateScheduleRequest {
                    courses: vec!["CS101".to_string()],
                    quarter: "Fall 2025".to_string(),
                    days_of_week: vec!["monday".to_string()],
                    time_preference: "morning".to_string(),
                    teacher_preference: String::new(),
                    num_schedules: None,
                },
            },
        )
        .await;
        assert!(matches!(event, UiEvent::ScheduleGenerated(results) if results.recommendations.len() == 1));
    }

    #[tokio::test]
    async fn declined_export_is_tagged_with_calendar_context() {
        let api = StubApi {
            decline_calendar: true,
        };
        match execute_command(&api, calendar_command()).await {
            UiEvent::Error(err) => {
                assert_eq!(err.context(), UiErrorContext::AddToCalendar);
                assert_eq!(err.category(), UiErrorCategory::Rejected);
                assert_eq!(err.message(), Some("calendar quota exceeded"));
            }
            _ => panic!("expected error event"),
        }
    }

    #[tokio::test]
    async fn health_check_reports_status() {
        let api = StubApi {
            decline_calendar: false,
        };
        assert!(matches!(
            execute_command(&api, BackendCommand::CheckHealth).await,
            UiEvent::ServiceHealthy(status) if status == "healthy"
        ));
    }

    #[test]
    fn launched_worker_answers_over_the_event_queue() {
        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(4);
        let (ui_tx, ui_rx) = crossbeam_channel::bounded(4);
        let handle = launch(
            cmd_rx,
            ui_tx,
            Arc::new(StubApi {
                decline_calendar: false,
            }),
        );

        cmd_tx.send(calendar_command()).expect("queue command");
        let mut saw_calendar = false;
        for _ in 0..2 {
            match ui_rx
                .recv_timeout(std::time::Duration::from_secs(5))
                .expect("event")
            {
                UiEvent::CalendarUpdated(_) => saw_calendar = true,
                UiEvent::Info(_) => {}
                _ => panic!("unexpected event"),
            }
        }
        assert!(saw_calendar);

        drop(cmd_tx);
        handle.join().expect("worker exits when the queue closes");
    }

    #[test]
    fn result_waits_for_room_on_a_full_event_queue() {
        let (cmd_tx, cmd_rx) = crossbeam_channel::bounded(4);
        // The ready notice fills the only slot.
        let (ui_tx, ui_rx) = crossbeam_channel::bounded(1);
        let handle = launch(
            cmd_rx,
            ui_tx,
            Arc::new(StubApi {
                decline_calendar: false,
            }),
        );

        cmd_tx.send(calendar_command()).expect("queue command");
        std::thread::sleep(std::time::Duration::from_millis(200));

        let timeout = std::time::Duration::from_secs(5);
        assert!(matches!(ui_rx.recv_timeout(timeout).expect("ready"), UiEvent::Info(_)));
        assert!(matches!(
            ui_rx.recv_timeout(timeout).expect("calendar result"),
            UiEvent::CalendarUpdated(_)
        ));

        drop(cmd_tx);
        handle.join().expect("worker exits when the queue closes");
    }
}
