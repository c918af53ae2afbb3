//! Thinking indicator: three pulsing dots

use crate::ui::theme::Theme;
use egui::{self, Pos2, Sense, Vec2};

const DOT_COUNT: usize = 3;
const DOT_RADIUS: f32 = 5.0;
const DOT_GAP: f32 = 10.0;

pub struct ThinkingDots<'a> {
    theme: &'a Theme,
}

impl<'a> ThinkingDots<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let width = DOT_COUNT as f32 * (DOT_RADIUS * 2.0 + DOT_GAP);
        let (rect, response) =
            ui.allocate_exact_size(Vec2::new(width, DOT_RADIUS * 2.0 + 6.0), Sense::hover());

        if ui.is_rect_visible(rect) {
            let painter = ui.painter();
            let time = ui.ctx().input(|i| i.time);
            for i in 0..DOT_COUNT {
                let pulse = ((time * 3.0 + i as f64 * 0.5).sin() * 0.5 + 0.5) as f32;
                let center = Pos2::new(
                    rect.left() + DOT_RADIUS + i as f32 * (DOT_RADIUS * 2.0 + DOT_GAP),
                    rect.center().y,
                );
                painter.circle_filled(
                    center,
                    DOT_RADIUS,
                    self.theme.accent_cyan.gamma_multiply(0.3 + 0.7 * pulse),
                );
            }
        }

        ui.ctx().request_repaint();
        response
    }
}
