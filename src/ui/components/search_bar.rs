//! Search header
//!
//! Glass search field with a mic button. The field stores its text; the mic
//! opens the voice modal.

use crate::ui::theme::Theme;
use egui::{self, RichText, Vec2};

pub struct SearchBar<'a> {
    query: &'a mut String,
    theme: &'a Theme,
}

/// What the search bar asked for this frame
#[derive(Default)]
pub struct SearchBarResponse {
    pub mic_clicked: bool,
}

impl<'a> SearchBar<'a> {
    pub fn new(query: &'a mut String, theme: &'a Theme) -> Self {
        Self { query, theme }
    }

    pub fn show(self, ui: &mut egui::Ui) -> SearchBarResponse {
        let mut out = SearchBarResponse::default();

        egui::Frame::none()
            .fill(self.theme.glass_fill)
            .rounding(self.theme.pill_rounding)
            .inner_margin(egui::Margin::symmetric(12.0, 8.0))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("🔍")
                            .size(14.0)
                            .color(self.theme.text_muted),
                    );

                    let mic_width = 40.0;
                    let field = egui::TextEdit::singleline(self.query)
                        .hint_text("搜尋股票、新聞、工具...")
                        .desired_width(ui.available_width() - mic_width - 12.0)
                        .frame(false);
                    let field_response = ui.add(field);
                    field_response.widget_info(|| {
                        egui::WidgetInfo::labeled(egui::WidgetType::TextEdit, true, "Search input")
                    });

                    let mic = ui.add(
                        egui::Button::new(RichText::new("🎤").size(16.0))
                            .min_size(Vec2::splat(32.0))
                            .rounding(egui::Rounding::same(16.0))
                            .fill(self.theme.accent_purple.gamma_multiply(0.5)),
                    );
                    mic.widget_info(|| {
                        egui::WidgetInfo::labeled(
                            egui::WidgetType::Button,
                            true,
                            "Search microphone",
                        )
                    });
                    if mic.clicked() {
                        out.mic_clicked = true;
                    }
                });
            });

        out
    }
}
