use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;
use eframe::egui;

use crate::controller::coordinator::{SchedulerController, ScrollTarget};
use crate::controller::events::UiEvent;
use crate::ui::{form, results, theme, toasts};

const REDO_PROMPT: &str = "This will clear all your current entries.\n\n\
Consider:\n\
• Want to add a different course?\n\
• Need to change the schedule?\n\
• Want to update professor information?\n\n\
Ready to start over?";

const IDLE_REPAINT: Duration = Duration::from_millis(250);

pub struct SchedulerApp {
    controller: SchedulerController,
    ui_rx: Receiver<UiEvent>,
    style_applied: bool,
}

impl SchedulerApp {
    pub fn new(controller: SchedulerController, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            controller,
            ui_rx,
            style_applied: false,
        }
    }

    fn process_ui_events(&mut self, now: Instant) {
        while let Ok(event) = self.ui_rx.try_recv() {
            self.controller.apply_event(event, now);
        }
    }

    fn show_header(&self, ui: &mut egui::Ui, scroll_here: bool) {
        let heading = ui.vertical_centered(|ui| {
            ui.add_space(12.0);
            ui.label(
                egui::RichText::new("Course Scheduler")
                    .strong()
                    .size(34.0)
                    .color(theme::ACCENT),
            );
            ui.label(
                egui::RichText::new("Make your schedule for next quarter")
                    .size(16.0)
                    .weak(),
            );
            ui.add_space(8.0);
        });
        if scroll_here {
            heading.response.scroll_to_me(Some(egui::Align::Min));
        }
    }

    fn show_actions(&mut self, ui: &mut egui::Ui, now: Instant) {
        ui.horizontal(|ui| {
            let generating = self.controller.is_generating();
            let label = if generating {
                "Generating..."
            } else {
                "Generate Schedule"
            };
            if ui
                .add_enabled(!generating, theme::primary_button(label))
                .clicked()
            {
                self.controller.generate_schedule(now);
            }
            if generating {
                ui.spinner();
            }
            if ui.button("🔄 Redo").clicked() {
                self.controller.request_redo();
            }
        });
    }

    fn show_calendar_actions(&mut self, ui: &mut egui::Ui, now: Instant) {
        ui.horizontal(|ui| {
            let adding = self.controller.is_adding_to_calendar();
            let label = if adding {
                "Adding to Calendar..."
            } else {
                "Add to Calendar"
            };
            if ui
                .add_enabled(
                    self.controller.can_add_to_calendar(),
                    theme::primary_button(label),
                )
                .clicked()
            {
                self.controller.add_to_calendar(now);
            }
            if adding {
                ui.spinner();
            }
        });
    }

    fn show_redo_prompt(&mut self, ctx: &egui::Context, now: Instant) {
        if !self.controller.is_redo_prompt_open() {
            return;
        }

        let mut confirmed = false;
        let mut cancelled = false;
        egui::Window::new("🔄 Starting Fresh")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(REDO_PROMPT);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Cancel").clicked() {
                        cancelled = true;
                    }
                    if ui.add(theme::primary_button("Start over")).clicked() {
                        confirmed = true;
                    }
                });
            });

        if ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            cancelled = true;
        }
        if confirmed {
            self.controller.confirm_redo(now);
        } else if cancelled {
            self.controller.cancel_redo();
        }
    }

    fn show_status_line(&self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.small("Status:");
            ui.small(egui::RichText::new(self.controller.status()).weak());
        });
    }
}

impl eframe::App for SchedulerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if !self.style_applied {
            theme::apply(ctx);
            self.style_applied = true;
        }

        let now = Instant::now();
        self.process_ui_events(now);
        self.controller.tick(now);
        let scrolls = self.controller.take_due_scrolls(now);
        let scroll_to = |target: ScrollTarget| scrolls.contains(&target);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::MUTED_FILL))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let width = ui.available_width().min(860.0);
                        ui.vertical_centered(|ui| {
                            ui.set_max_width(width);
                            self.show_header(ui, scroll_to(ScrollTarget::Top));

                            theme::card().show(ui, |ui| {
                                ui.set_width(ui.available_width());
                                form::show_courses(ui, &mut self.controller.form);
                            });
                            ui.add_space(12.0);
                            theme::card().show(ui, |ui| {
                                ui.set_width(ui.available_width());
                                form::show_schedule_preferences(ui, &mut self.controller.form);
                            });
                            ui.add_space(12.0);
                            theme::card().show(ui, |ui| {
                                ui.set_width(ui.available_width());
                                form::show_professor_notes(ui, &mut self.controller.form);
                            });
                            ui.add_space(12.0);
                            self.show_actions(ui, now);

                            if self.controller.results().has_results() {
                                ui.add_space(16.0);
                                let mut clicked = None;
                                theme::card().show(ui, |ui| {
                                    ui.set_width(ui.available_width());
                                    clicked = results::show_results(
                                        ui,
                                        self.controller.results(),
                                        scroll_to(ScrollTarget::Results),
                                    );
                                });
                                if let Some(index) = clicked {
                                    self.controller.select_candidate(index);
                                }
                                ui.add_space(8.0);
                                self.show_calendar_actions(ui, now);
                            }

                            if let Some(submitted) = self.controller.submitted() {
                                ui.add_space(16.0);
                                results::show_confirmation(
                                    ui,
                                    submitted,
                                    scroll_to(ScrollTarget::Confirmation),
                                );
                            }

                            ui.add_space(16.0);
                            ui.separator();
                            self.show_status_line(ui);
                        });
                    });
            });

        self.show_redo_prompt(ctx, now);
        if let Some(id) = toasts::show(ctx, self.controller.toasts().visible()) {
            self.controller.dismiss_toast(id);
        }

        let wait = self
            .controller
            .next_wakeup()
            .map(|at| at.saturating_duration_since(now))
            .unwrap_or(IDLE_REPAINT)
            .min(IDLE_REPAINT);
        ctx.request_repaint_after(wait);
    }
}
