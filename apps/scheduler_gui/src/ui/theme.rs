use eframe::egui;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(0xB3, 0x07, 0x38);
pub const SUCCESS: egui::Color32 = egui::Color32::from_rgb(46, 125, 50);
pub const ERROR: egui::Color32 = egui::Color32::from_rgb(175, 52, 52);
pub const MUTED_FILL: egui::Color32 = egui::Color32::from_rgb(245, 245, 247);

pub fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round() as u8
    };
    egui::Color32::from_rgb(mix(c.r()), mix(c.g()), mix(c.b()))
}

pub fn apply(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::light();
    style.visuals.selection.bg_fill = ACCENT;
    style.visuals.hyperlink_color = ACCENT;

    // Make text inputs reliably clickable and visible:
    style.visuals.widgets.inactive.bg_stroke =
        egui::Stroke::new(1.0, style.visuals.widgets.noninteractive.bg_stroke.color);
    style.visuals.widgets.active.bg_stroke =
        egui::Stroke::new(1.2, ACCENT.gamma_multiply(0.9));

    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(10.0, 6.0);
    style.spacing.interact_size = egui::vec2(40.0, 28.0);
    ctx.set_style(style);
}

pub fn primary_button(text: &str) -> egui::Button<'static> {
    egui::Button::new(
        egui::RichText::new(text.to_string())
            .strong()
            .color(egui::Color32::WHITE),
    )
    .fill(ACCENT)
    .min_size(egui::vec2(180.0, 36.0))
}

pub fn card() -> egui::Frame {
    egui::Frame::new()
        .fill(egui::Color32::WHITE)
        .corner_radius(egui::CornerRadius::same(12))
        .stroke(egui::Stroke::new(1.0, lighten_color(ACCENT, 0.8)))
        .inner_margin(egui::Margin::symmetric(18, 14))
}
