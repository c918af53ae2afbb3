//! Sound-wave indicator
//!
//! Five vertical bars, cyan fading into purple. While a capture is active
//! the bars bounce on the frame clock with per-bar phase offsets; idle bars
//! collapse to a short stub.

use crate::ui::theme::Theme;
use egui::{self, Color32, Pos2, Rect, Sense, Vec2};

const BAR_COUNT: usize = 5;
const BAR_WIDTH: f32 = 4.0;
const BAR_GAP: f32 = 4.0;
const IDLE_HEIGHT: f32 = 8.0;

/// Five-bar sound wave
pub struct SoundWave<'a> {
    theme: &'a Theme,
    active: bool,
    height: f32,
}

impl<'a> SoundWave<'a> {
    pub fn new(active: bool, theme: &'a Theme) -> Self {
        Self {
            theme,
            active,
            height: 48.0,
        }
    }

    pub fn height(mut self, height: f32) -> Self {
        self.height = height;
        self
    }

    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let width = BAR_COUNT as f32 * (BAR_WIDTH + BAR_GAP);
        let (rect, response) =
            ui.allocate_exact_size(Vec2::new(width, self.height), Sense::hover());

        if ui.is_rect_visible(rect) {
            self.paint(ui, rect);
        }

        if self.active {
            ui.ctx().request_repaint();
        }
        response
    }

    fn paint(&self, ui: &egui::Ui, rect: Rect) {
        let painter = ui.painter();
        let time = ui.ctx().input(|i| i.time);
        let center_y = rect.center().y;
        let max_height = rect.height() - 8.0;

        for i in 0..BAR_COUNT {
            let height = if self.active {
                let bounce = ((time * 6.0 + i as f64 * 1.3).sin() * 0.5 + 0.5) as f32;
                (IDLE_HEIGHT + bounce * (max_height - IDLE_HEIGHT)).max(IDLE_HEIGHT)
            } else {
                IDLE_HEIGHT
            };

            let x = rect.left() + i as f32 * (BAR_WIDTH + BAR_GAP) + BAR_GAP / 2.0;
            let bar = Rect::from_center_size(
                Pos2::new(x + BAR_WIDTH / 2.0, center_y),
                Vec2::new(BAR_WIDTH, height),
            );

            // Cyan at the edges, purple toward the middle
            let t = i as f32 / (BAR_COUNT - 1) as f32;
            let color = lerp_color(self.theme.accent_cyan, self.theme.accent_purple, t);
            painter.rect_filled(bar, BAR_WIDTH / 2.0, color);
        }
    }
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t) as u8;
    Color32::from_rgb(lerp(a.r(), b.r()), lerp(a.g(), b.g()), lerp(a.b(), b.b()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_color_endpoints() {
        let a = Color32::from_rgb(0, 100, 200);
        let b = Color32::from_rgb(200, 100, 0);
        assert_eq!(lerp_color(a, b, 0.0), a);
        assert_eq!(lerp_color(a, b, 1.0), b);
    }

    #[test]
    fn test_lerp_color_midpoint() {
        let a = Color32::from_rgb(0, 0, 0);
        let b = Color32::from_rgb(200, 100, 50);
        assert_eq!(lerp_color(a, b, 0.5), Color32::from_rgb(100, 50, 25));
    }
}
