//! Preference form: courses, quarter, days, times and professor notes.

use client_core::FormDraft;
use eframe::egui;
use shared::domain::{Quarter, TimeBlock, Weekday};

use crate::ui::theme::{self, ACCENT};

fn section_header(ui: &mut egui::Ui, title: &str, subtitle: &str, required: bool) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(title).strong().size(20.0));
        if required {
            ui.label(egui::RichText::new("*").color(theme::ERROR).strong());
        }
    });
    ui.weak(subtitle);
    ui.add_space(6.0);
}

fn toggle_chip(ui: &mut egui::Ui, selected: bool, text: &str, width: f32) -> egui::Response {
    let (fill, color) = if selected {
        (ACCENT, egui::Color32::WHITE)
    } else {
        (egui::Color32::WHITE, ui.visuals().text_color())
    };
    ui.add(
        egui::Button::new(egui::RichText::new(text).color(color))
            .fill(fill)
            .stroke(egui::Stroke::new(1.5, theme::lighten_color(ACCENT, 0.5)))
            .min_size(egui::vec2(width, 34.0)),
    )
}

pub fn show_courses(ui: &mut egui::Ui, form: &mut FormDraft) {
    section_header(
        ui,
        "List of Courses",
        "Add your courses (add multiple if needed)",
        true,
    );

    let mut remove_at = None;
    let can_remove = form.can_remove_course_slot();
    for index in 0..form.course_count() {
        let mut value = form.course_names()[index].clone();
        ui.horizontal(|ui| {
            let width = ui.available_width() - if can_remove { 44.0 } else { 0.0 };
            let edit = egui::TextEdit::singleline(&mut value)
                .id_salt(("course_name", index))
                .hint_text("Enter course name...");
            ui.add_sized([width.max(120.0), 32.0], edit);
            if can_remove && ui.button("✕").on_hover_text("Remove course").clicked() {
                remove_at = Some(index);
            }
        });
        if value != form.course_names()[index] {
            form.update_course_name(index, value);
        }
    }
    if let Some(index) = remove_at {
        form.remove_course_slot(index);
    }

    ui.add_space(4.0);
    if ui.button("+ Add Another Course").clicked() {
        form.add_course_slot();
    }
}

pub fn show_schedule_preferences(ui: &mut egui::Ui, form: &mut FormDraft) {
    section_header(
        ui,
        "Class Schedule",
        "Choose the quarter, days and times that work for you",
        true,
    );

    ui.label(egui::RichText::new("Quarter").strong());
    let mut quarter = form.quarter();
    egui::ComboBox::from_id_salt("quarter")
        .width(220.0)
        .selected_text(quarter.map_or("Select quarter...", Quarter::label))
        .show_ui(ui, |ui| {
            for option in Quarter::ALL {
                ui.selectable_value(&mut quarter, Some(*option), option.label());
            }
        });
    if quarter != form.quarter() {
        form.set_quarter(quarter);
    }

    ui.add_space(8.0);
    ui.label(egui::RichText::new("Days of Week").strong());
    ui.horizontal_wrapped(|ui| {
        for day in Weekday::ALL {
            if toggle_chip(ui, form.has_day(*day), day.short_label(), 64.0).clicked() {
                form.toggle_day(*day);
            }
        }
    });

    ui.add_space(8.0);
    ui.label(egui::RichText::new("Time Preferences").strong());
    ui.horizontal_wrapped(|ui| {
        for block in TimeBlock::ALL {
            if toggle_chip(ui, form.has_time_block(*block), block.label(), 110.0).clicked() {
                form.toggle_time_block(*block);
            }
        }
    });
}

pub fn show_professor_notes(ui: &mut egui::Ui, form: &mut FormDraft) {
    section_header(
        ui,
        "Professor Preferences",
        "Tell us what kind of teaching style works best for you",
        false,
    );
    let mut notes = form.professor_notes().to_string();
    let response = ui.add(
        egui::TextEdit::multiline(&mut notes)
            .id_salt("professor_notes")
            .hint_text("Describe your ideal professor...")
            .desired_rows(4)
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        form.set_professor_notes(notes);
    }
}
