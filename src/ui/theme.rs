//! Space theme
//!
//! The "weightless universe" palette: deep space backgrounds, cyan/purple
//! accents, translucent glass cards, and the four mood colors.

use crate::cards::Mood;
use egui::{Color32, FontFamily, FontId, Margin, Rounding, Stroke, Vec2, Visuals};

/// Application theme configuration
#[derive(Clone, Debug)]
pub struct Theme {
    /// Deep-space page background
    pub space_bg: Color32,
    /// Even deeper background behind the nav
    pub space_bg_deep: Color32,

    /// Primary accent (cyan)
    pub accent_cyan: Color32,
    /// Secondary accent (purple)
    pub accent_purple: Color32,
    /// Tertiary accent (blue, nebula glow)
    pub accent_blue: Color32,

    /// Translucent card fill
    pub glass_fill: Color32,
    /// Card border
    pub glass_stroke: Color32,

    /// Text colors
    pub text_primary: Color32,
    pub text_secondary: Color32,
    pub text_muted: Color32,

    /// Positive / negative change colors
    pub positive: Color32,
    pub negative: Color32,

    /// Mood colors
    pub mood_hot: Color32,
    pub mood_warm: Color32,
    pub mood_cool: Color32,
    pub mood_cold: Color32,

    /// Border radius for cards/panels
    pub card_rounding: Rounding,
    /// Border radius for pill buttons
    pub pill_rounding: Rounding,

    /// Standard spacing
    pub spacing: f32,
    pub spacing_sm: f32,
    pub spacing_lg: f32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::space()
    }
}

impl Theme {
    /// The space theme (the product has no light variant)
    pub fn space() -> Self {
        Self {
            space_bg: Color32::from_rgb(10, 14, 26),
            space_bg_deep: Color32::from_rgb(5, 8, 16),

            accent_cyan: Color32::from_rgb(34, 211, 238),
            accent_purple: Color32::from_rgb(168, 85, 247),
            accent_blue: Color32::from_rgb(59, 130, 246),

            glass_fill: Color32::from_rgba_unmultiplied(255, 255, 255, 14),
            glass_stroke: Color32::from_rgba_unmultiplied(255, 255, 255, 30),

            text_primary: Color32::from_rgb(249, 250, 251),
            text_secondary: Color32::from_rgba_unmultiplied(255, 255, 255, 153),
            text_muted: Color32::from_rgba_unmultiplied(255, 255, 255, 102),

            positive: Color32::from_rgb(74, 222, 128),
            negative: Color32::from_rgb(248, 113, 113),

            mood_hot: Color32::from_rgb(255, 112, 67),
            mood_warm: Color32::from_rgb(255, 213, 79),
            mood_cool: Color32::from_rgb(79, 195, 247),
            mood_cold: Color32::from_rgb(124, 77, 255),

            card_rounding: Rounding::same(16.0),
            pill_rounding: Rounding::same(20.0),

            spacing: 16.0,
            spacing_sm: 8.0,
            spacing_lg: 24.0,
        }
    }

    /// Apply this theme to egui
    pub fn apply(&self, ctx: &egui::Context) {
        let mut visuals = Visuals::dark();

        visuals.panel_fill = self.space_bg;
        visuals.window_fill = self.space_bg;
        visuals.extreme_bg_color = self.space_bg_deep;

        visuals.widgets.noninteractive.bg_fill = self.glass_fill;
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_muted);

        visuals.widgets.inactive.bg_fill = self.glass_fill;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_secondary);

        visuals.widgets.hovered.bg_fill = self.accent_cyan.gamma_multiply(0.25);
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.active.bg_fill = self.accent_cyan.gamma_multiply(0.4);
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.selection.bg_fill = self.accent_cyan.gamma_multiply(0.3);
        visuals.selection.stroke = Stroke::new(1.0, self.accent_cyan);

        visuals.hyperlink_color = self.accent_cyan;
        visuals.window_rounding = self.card_rounding;
        visuals.window_stroke = Stroke::new(1.0, self.glass_stroke);

        ctx.set_visuals(visuals);
        ctx.set_fonts(egui::FontDefinitions::default());

        let mut style = (*ctx.style()).clone();
        style.spacing.item_spacing = Vec2::splat(self.spacing_sm);
        style.spacing.window_margin = Margin::same(self.spacing);
        style.spacing.button_padding = Vec2::new(self.spacing, self.spacing_sm);

        style.text_styles.insert(
            egui::TextStyle::Heading,
            FontId::new(24.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Body,
            FontId::new(14.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Monospace,
            FontId::new(13.0, FontFamily::Monospace),
        );
        style.text_styles.insert(
            egui::TextStyle::Button,
            FontId::new(14.0, FontFamily::Proportional),
        );
        style.text_styles.insert(
            egui::TextStyle::Small,
            FontId::new(12.0, FontFamily::Proportional),
        );

        ctx.set_style(style);
    }

    /// Translucent tint for a card with the given mood
    pub fn mood_fill(&self, mood: Mood) -> Color32 {
        self.mood_color(mood).gamma_multiply(0.12)
    }

    /// Badge/text color for a mood
    pub fn mood_color(&self, mood: Mood) -> Color32 {
        match mood {
            Mood::Hot => self.mood_hot,
            Mood::Warm => self.mood_warm,
            Mood::Cool => self.mood_cool,
            Mood::Cold => self.mood_cold,
        }
    }

    /// Color for a value-change string: a leading '+' renders positive
    pub fn change_color(&self, change: &str) -> Color32 {
        if change.starts_with('+') {
            self.positive
        } else {
            self.negative
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_color_by_sign() {
        let theme = Theme::space();
        assert_eq!(theme.change_color("+1.25%"), theme.positive);
        assert_eq!(theme.change_color("-0.8%"), theme.negative);
        assert_eq!(theme.change_color("步"), theme.negative);
    }

    #[test]
    fn test_mood_colors_are_distinct() {
        let theme = Theme::space();
        let colors = [
            theme.mood_color(Mood::Hot),
            theme.mood_color(Mood::Warm),
            theme.mood_color(Mood::Cool),
            theme.mood_color(Mood::Cold),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in colors.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
