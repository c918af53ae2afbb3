//! Dashboard card renderer
//!
//! Paints one glass tile: art placeholder, title/subtitle, optional value
//! row, and the mood badge or voice row. The whole tile is clickable; the
//! caller decides what a click means.

use crate::cards::{Card, CardKind};
use crate::ui::theme::Theme;
use egui::{self, Align2, FontId, Pos2, Rect, Sense, Stroke, Vec2};

/// One dashboard tile
pub struct ElementCard<'a> {
    card: &'a Card,
    theme: &'a Theme,
}

impl<'a> ElementCard<'a> {
    pub fn new(card: &'a Card, theme: &'a Theme) -> Self {
        Self { card, theme }
    }

    fn desired_height(&self) -> f32 {
        let mut height = 64.0;
        if self.card.value.is_some() {
            height += 34.0;
        }
        if self.card.mood.is_some() || self.card.kind == CardKind::Voice {
            height += 30.0;
        }
        height
    }

    pub fn show(self, ui: &mut egui::Ui) -> egui::Response {
        let desired_size = Vec2::new(ui.available_width(), self.desired_height());
        let (rect, response) = ui.allocate_exact_size(desired_size, Sense::click());

        if ui.is_rect_visible(rect) {
            // Gentle float, staggered per card
            let time = ui.ctx().input(|i| i.time);
            let dy = ((time * 1.2 + self.card.delay as f64).sin() * 2.5) as f32;
            let rect = rect.translate(Vec2::new(0.0, dy));

            self.paint(ui, rect, &response);
        }

        let title = self.card.title;
        response.widget_info(move || {
            egui::WidgetInfo::labeled(egui::WidgetType::Button, true, format!("Card: {}", title))
        });
        response
    }

    fn paint(&self, ui: &egui::Ui, rect: Rect, response: &egui::Response) {
        let painter = ui.painter();
        let theme = self.theme;

        // Glass body with an optional mood tint
        painter.rect_filled(rect, theme.card_rounding, theme.glass_fill);
        if let Some(mood) = self.card.mood {
            painter.rect_filled(rect, theme.card_rounding, theme.mood_fill(mood));
        }
        let stroke = if response.hovered() {
            Stroke::new(1.0, theme.accent_cyan.gamma_multiply(0.6))
        } else {
            Stroke::new(1.0, theme.glass_stroke)
        };
        painter.rect_stroke(rect, theme.card_rounding, stroke);

        let inner = rect.shrink(12.0);

        // Art placeholder: the real asset at `card.image` ships separately
        let art_rect = Rect::from_min_size(inner.min, Vec2::splat(40.0));
        let art_color = match self.card.mood {
            Some(mood) => theme.mood_color(mood).gamma_multiply(0.3),
            None => theme.accent_cyan.gamma_multiply(0.2),
        };
        painter.rect_filled(art_rect, 10.0, art_color);
        painter.text(
            art_rect.center(),
            Align2::CENTER_CENTER,
            self.card.kind.glyph(),
            FontId::proportional(18.0),
            theme.text_primary,
        );

        // Title and subtitle beside the art
        let text_left = art_rect.right() + 10.0;
        painter.text(
            Pos2::new(text_left, inner.top() + 2.0),
            Align2::LEFT_TOP,
            self.card.title,
            FontId::proportional(14.0),
            theme.text_primary,
        );
        painter.text(
            Pos2::new(text_left, inner.top() + 22.0),
            Align2::LEFT_TOP,
            self.card.subtitle,
            FontId::proportional(11.0),
            theme.text_muted,
        );

        let mut row_top = inner.top() + 48.0;

        // Value row
        if let Some(value) = self.card.value {
            painter.text(
                Pos2::new(inner.left(), row_top + 24.0),
                Align2::LEFT_BOTTOM,
                value,
                FontId::proportional(22.0),
                theme.text_primary,
            );
            if let Some(change) = self.card.change {
                painter.text(
                    Pos2::new(inner.right(), row_top + 22.0),
                    Align2::RIGHT_BOTTOM,
                    change,
                    FontId::proportional(13.0),
                    theme.change_color(change),
                );
            }
            row_top += 34.0;
        }

        // Mood badge
        if let Some(mood) = self.card.mood {
            let label = mood.label();
            let font = FontId::proportional(11.0);
            let galley = painter.layout_no_wrap(label.to_string(), font.clone(), theme.mood_color(mood));
            let badge = Rect::from_min_size(
                Pos2::new(inner.left(), row_top),
                galley.size() + Vec2::new(16.0, 8.0),
            );
            painter.rect_filled(badge, 12.0, theme.glass_fill);
            painter.text(
                badge.center(),
                Align2::CENTER_CENTER,
                label,
                font,
                theme.mood_color(mood),
            );
        }

        // Voice row
        if self.card.kind == CardKind::Voice {
            let dot = Pos2::new(inner.left() + 14.0, row_top + 14.0);
            painter.circle_filled(dot, 14.0, theme.accent_purple.gamma_multiply(0.8));
            painter.circle_filled(dot, 10.0, theme.accent_cyan.gamma_multiply(0.9));
            painter.text(
                dot,
                Align2::CENTER_CENTER,
                "▶",
                FontId::proportional(10.0),
                theme.text_primary,
            );
            painter.text(
                Pos2::new(dot.x + 22.0, dot.y),
                Align2::LEFT_CENTER,
                "Net仔話你知",
                FontId::proportional(11.0),
                theme.accent_cyan,
            );
        }
    }
}
