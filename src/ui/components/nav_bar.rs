//! Bottom navigation bar
//!
//! Three tabs. Selecting one only changes which tab is marked active.

use crate::ui::state::NavTab;
use crate::ui::theme::Theme;
use egui::{self, RichText, Vec2};

const TABS: [NavTab; 3] = [NavTab::Classic, NavTab::ForYou, NavTab::Builder];

pub struct NavBar<'a> {
    active: &'a mut NavTab,
    theme: &'a Theme,
}

impl<'a> NavBar<'a> {
    pub fn new(active: &'a mut NavTab, theme: &'a Theme) -> Self {
        Self { active, theme }
    }

    pub fn show(mut self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.glass_fill)
            .rounding(self.theme.card_rounding)
            .inner_margin(self.theme.spacing_sm)
            .show(ui, |ui| {
                ui.columns(TABS.len(), |columns| {
                    for (column, tab) in columns.iter_mut().zip(TABS) {
                        self.show_tab(column, tab);
                    }
                });
            });
    }

    fn show_tab(&mut self, ui: &mut egui::Ui, tab: NavTab) {
        let is_active = *self.active == tab;
        let color = if is_active {
            self.theme.accent_cyan
        } else {
            self.theme.text_muted
        };

        ui.vertical_centered(|ui| {
            let text = format!("{}\n{}", tab.glyph(), tab.label());
            let button = egui::Button::new(RichText::new(text).size(13.0).color(color))
                .min_size(Vec2::new(ui.available_width(), 44.0))
                .rounding(self.theme.card_rounding)
                .fill(if is_active {
                    self.theme.accent_cyan.gamma_multiply(0.15)
                } else {
                    egui::Color32::TRANSPARENT
                });

            let response = ui.add(button);
            let label = tab.label();
            response.widget_info(move || {
                egui::WidgetInfo::labeled(egui::WidgetType::Button, true, format!("Nav: {}", label))
            });
            if response.clicked() {
                *self.active = tab;
            }
        });
    }
}
