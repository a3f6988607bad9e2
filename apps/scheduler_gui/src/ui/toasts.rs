use eframe::egui;

use crate::controller::notifications::{Toast, ToastLevel};
use crate::ui::theme;

/// Draws the visible toasts in the top-right corner and returns the id of a
/// toast the user dismissed.
pub fn show(ctx: &egui::Context, toasts: &[Toast]) -> Option<u64> {
    if toasts.is_empty() {
        return None;
    }

    let mut dismissed = None;
    egui::Area::new(egui::Id::new("toast_stack"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-16.0, 16.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.set_max_width(360.0);
            for toast in toasts {
                let (fill, icon) = match toast.level {
                    ToastLevel::Loading => (egui::Color32::from_rgb(60, 64, 72), "⏳"),
                    ToastLevel::Success => (theme::SUCCESS, "✅"),
                    ToastLevel::Error => (theme::ERROR, "❌"),
                };
                egui::Frame::new()
                    .fill(fill)
                    .corner_radius(egui::CornerRadius::same(8))
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        ui.horizontal(|ui| {
                            if toast.level == ToastLevel::Loading {
                                ui.add(egui::Spinner::new().color(egui::Color32::WHITE));
                            } else {
                                ui.label(icon);
                            }
                            ui.label(
                                egui::RichText::new(&toast.message).color(egui::Color32::WHITE),
                            );
                            if toast.level != ToastLevel::Loading
                                && ui
                                    .small_button(
                                        egui::RichText::new("✕").color(egui::Color32::WHITE),
                                    )
                                    .clicked()
                            {
                                dismissed = Some(toast.id);
                            }
                        });
                    });
                ui.add_space(6.0);
            }
        });
    dismissed
}
