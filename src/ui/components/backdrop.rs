//! Space backdrop
//!
//! Decorative starfield behind the page: twinkling stars, slowly rising
//! particles, and three fixed nebula glows. Positions are randomized once
//! at startup; all motion is derived from the frame clock.

use crate::ui::theme::Theme;
use egui::{Color32, Pos2, Rect};
use rand::Rng;

const STAR_COUNT: usize = 50;
const PARTICLE_COUNT: usize = 20;

struct Star {
    /// Position as a fraction of the viewport
    x: f32,
    y: f32,
    /// Twinkle phase offset in seconds
    phase: f32,
    base_alpha: f32,
}

struct Particle {
    x: f32,
    phase: f32,
    /// Seconds for one full bottom-to-top drift
    period: f32,
}

/// Decorative space background
pub struct Backdrop {
    stars: Vec<Star>,
    particles: Vec<Particle>,
}

impl Backdrop {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let stars = (0..STAR_COUNT)
            .map(|_| Star {
                x: rng.random_range(0.0..1.0),
                y: rng.random_range(0.0..1.0),
                phase: rng.random_range(0.0..3.0),
                base_alpha: rng.random_range(0.2..0.7),
            })
            .collect();

        let particles = (0..PARTICLE_COUNT)
            .map(|_| Particle {
                x: rng.random_range(0.0..1.0),
                phase: rng.random_range(0.0..10.0),
                period: rng.random_range(8.0..12.0),
            })
            .collect();

        Self { stars, particles }
    }

    /// Paint the backdrop into the given rect
    pub fn paint(&self, painter: &egui::Painter, rect: Rect, theme: &Theme, time: f64) {
        self.paint_nebulas(painter, rect, theme);
        self.paint_stars(painter, rect, time);
        self.paint_particles(painter, rect, theme, time);
    }

    fn paint_nebulas(&self, painter: &egui::Painter, rect: Rect, theme: &Theme) {
        let glows = [
            (Pos2::new(rect.left(), rect.top()), 180.0, theme.accent_cyan),
            (
                Pos2::new(rect.right(), rect.top() + rect.height() * 0.33),
                150.0,
                theme.accent_purple,
            ),
            (
                Pos2::new(rect.left() + rect.width() * 0.25, rect.bottom()),
                140.0,
                theme.accent_blue,
            ),
        ];

        // Concentric translucent circles stand in for a blur
        for (center, radius, color) in glows {
            for ring in 1..=5 {
                let t = ring as f32 / 5.0;
                painter.circle_filled(center, radius * t, color.gamma_multiply(0.03));
            }
        }
    }

    fn paint_stars(&self, painter: &egui::Painter, rect: Rect, time: f64) {
        for star in &self.stars {
            let twinkle = ((time + star.phase as f64) * 2.0).sin() as f32 * 0.5 + 0.5;
            let alpha = star.base_alpha * (0.5 + 0.5 * twinkle);
            let pos = Pos2::new(
                rect.left() + star.x * rect.width(),
                rect.top() + star.y * rect.height(),
            );
            painter.circle_filled(pos, 1.0, Color32::WHITE.gamma_multiply(alpha));
        }
    }

    fn paint_particles(&self, painter: &egui::Painter, rect: Rect, theme: &Theme, time: f64) {
        for particle in &self.particles {
            let progress = (((time + particle.phase as f64) / particle.period as f64)
                .fract()) as f32;
            // Drift from bottom to top, fading out near the top
            let y = rect.bottom() - progress * rect.height();
            let alpha = (1.0 - progress) * 0.5;
            let pos = Pos2::new(rect.left() + particle.x * rect.width(), y);
            painter.circle_filled(pos, 1.5, theme.accent_cyan.gamma_multiply(alpha));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_backdrop_layout_counts() {
        let mut rng = StdRng::seed_from_u64(1);
        let backdrop = Backdrop::new(&mut rng);
        assert_eq!(backdrop.stars.len(), STAR_COUNT);
        assert_eq!(backdrop.particles.len(), PARTICLE_COUNT);
    }

    #[test]
    fn test_positions_are_fractions() {
        let mut rng = StdRng::seed_from_u64(2);
        let backdrop = Backdrop::new(&mut rng);
        for star in &backdrop.stars {
            assert!((0.0..=1.0).contains(&star.x));
            assert!((0.0..=1.0).contains(&star.y));
        }
        for particle in &backdrop.particles {
            assert!((0.0..=1.0).contains(&particle.x));
            assert!(particle.period >= 8.0 && particle.period < 12.0);
        }
    }
}
