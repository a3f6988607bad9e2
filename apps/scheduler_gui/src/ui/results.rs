//! Read-only rendering of generated schedule options and the calendar
//! confirmation.

use client_core::{ResultsState, SubmittedConfirmation};
use eframe::egui;
use shared::protocol::{CourseMeeting, ScheduleRecommendation, ScheduleSummary};

use crate::ui::theme::{self, ACCENT};

/// Returns the option the user clicked, if any.
pub fn show_results(ui: &mut egui::Ui, results: &ResultsState, scroll_here: bool) -> Option<usize> {
    let heading = ui.heading("Your Schedule");
    if scroll_here {
        heading.scroll_to_me(Some(egui::Align::Min));
    }

    if let Some(summary) = results.results().and_then(|r| r.summary.as_ref()) {
        show_summary(ui, summary);
    }

    if results.recommendations().is_empty() {
        ui.weak("No schedule options matched your preferences. Adjust your choices and try again.");
        return None;
    }

    if let Some(index) = results.selected_index() {
        ui.label(
            egui::RichText::new(format!("✓ Schedule {} selected", index + 1))
                .color(ACCENT)
                .strong(),
        );
    }
    ui.add_space(6.0);

    let mut clicked = None;
    for (index, option) in results.recommendations().iter().enumerate() {
        let selected = results.is_selected(index);
        let response = option_card(ui, index, option, selected);
        if response.clicked() {
            clicked = Some(index);
        }
        ui.add_space(8.0);
    }
    clicked
}

fn show_summary(ui: &mut egui::Ui, summary: &ScheduleSummary) {
    let mut parts = Vec::new();
    if let Some(count) = summary.total_sections {
        parts.push(format!("{count} sections considered"));
    }
    if let Some(count) = summary.professors_researched {
        parts.push(format!("{count} professors researched"));
    }
    if let Some(count) = summary.recommendations_count {
        parts.push(format!("{count} options"));
    }
    if !parts.is_empty() {
        ui.small(parts.join(" · "));
    }
}

fn option_card(
    ui: &mut egui::Ui,
    index: usize,
    option: &ScheduleRecommendation,
    selected: bool,
) -> egui::Response {
    let (fill, stroke) = if selected {
        (
            theme::lighten_color(ACCENT, 0.93),
            egui::Stroke::new(2.5, ACCENT),
        )
    } else {
        (
            egui::Color32::WHITE,
            egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
        )
    };

    let inner = egui::Frame::new()
        .fill(fill)
        .stroke(stroke)
        .corner_radius(egui::CornerRadius::same(12))
        .inner_margin(egui::Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                let badge = if selected {
                    "✓".to_string()
                } else {
                    (index + 1).to_string()
                };
                ui.label(egui::RichText::new(badge).strong().color(ACCENT));
                ui.label(
                    egui::RichText::new(format!("Schedule Option {}", index + 1))
                        .strong()
                        .size(18.0),
                );
                if selected {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.small(egui::RichText::new("Selected").color(ACCENT));
                    });
                }
            });

            if !option.pros.is_empty() || !option.cons.is_empty() {
                ui.columns(2, |columns| {
                    if !option.pros.is_empty() {
                        columns[0].label(egui::RichText::new("Pros").strong().color(theme::SUCCESS));
                        for pro in &option.pros {
                            columns[0].label(format!("• {pro}"));
                        }
                    }
                    if !option.cons.is_empty() {
                        columns[1].label(egui::RichText::new("Cons").strong().color(theme::ERROR));
                        for con in &option.cons {
                            columns[1].label(format!("• {con}"));
                        }
                    }
                });
            }

            ui.add_space(4.0);
            for meeting in &option.schedule {
                meeting_row(ui, meeting, selected);
            }
        });

    inner
        .response
        .interact(egui::Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
}

fn meeting_row(ui: &mut egui::Ui, meeting: &CourseMeeting, selected: bool) {
    let title_color = if selected {
        ACCENT
    } else {
        ui.visuals().strong_text_color()
    };
    egui::Frame::new()
        .fill(egui::Color32::WHITE)
        .inner_margin(egui::Margin::symmetric(10, 6))
        .show(ui, |ui| {
            ui.label(
                egui::RichText::new(&meeting.summary)
                    .strong()
                    .color(title_color),
            );
            ui.label(format!("👨‍🏫 {}", meeting.description));
            ui.horizontal_wrapped(|ui| {
                ui.small(format!("📍 {}", meeting.display_location()));
                if let Some(days) = meeting.display_days() {
                    ui.small(egui::RichText::new(format!("📅 {days}")).color(ACCENT));
                }
            });
        });
}

pub fn show_confirmation(
    ui: &mut egui::Ui,
    submitted: &SubmittedConfirmation,
    scroll_here: bool,
) {
    let frame = egui::Frame::new()
        .fill(theme::lighten_color(theme::SUCCESS, 0.9))
        .stroke(egui::Stroke::new(1.5, theme::SUCCESS))
        .corner_radius(egui::CornerRadius::same(14))
        .inner_margin(egui::Margin::symmetric(18, 14))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(egui::RichText::new("✅").size(32.0));
                ui.label(
                    egui::RichText::new("Schedule Created!")
                        .strong()
                        .size(26.0)
                        .color(theme::SUCCESS),
                );
            });
            ui.add_space(6.0);

            let prefs = &submitted.preferences;
            ui.label(format!("Courses: {}", prefs.course_names.join(", ")));
            if let Some(quarter) = prefs.quarter {
                ui.label(format!("Quarter: {}", quarter.label()));
            }
            ui.label(format!(
                "Days: {}",
                prefs
                    .days_of_week
                    .iter()
                    .map(|day| day.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
            ui.label(format!(
                "Times: {}",
                prefs
                    .time_blocks
                    .iter()
                    .map(|block| block.label())
                    .collect::<Vec<_>>()
                    .join(", ")
            ));
            if !prefs.professor_notes.trim().is_empty() {
                ui.label(format!("Professor preferences: {}", prefs.professor_notes));
            }
            ui.add_space(4.0);
            ui.small(format!(
                "Added to \"{}\" at {}",
                submitted.calendar_name,
                submitted.submitted_at.format("%b %-d, %Y %H:%M")
            ));
            if let Some(message) = &submitted.receipt.message {
                ui.small(message);
            }
        });
    if scroll_here {
        frame.response.scroll_to_me(Some(egui::Align::Min));
    }
}
