//! Voice assistant modal
//!
//! Centered glass card over a dimmed page: mascot with a listening ping
//! ring, the sound wave, a status line (listening prompt, thinking dots,
//! response, or idle hint), the captured transcript, and the mic toggle.
//! Clicking outside the card closes it.

use crate::state::FlowSnapshot;
use crate::ui::components::{SoundWave, ThinkingDots};
use crate::ui::state::PageState;
use crate::ui::theme::Theme;
use egui::{self, Align2, Color32, FontId, RichText, Sense, Stroke, Vec2};

pub struct VoiceModal<'a> {
    page: &'a mut PageState,
    theme: &'a Theme,
}

impl<'a> VoiceModal<'a> {
    pub fn new(page: &'a mut PageState, theme: &'a Theme) -> Self {
        Self { page, theme }
    }

    pub fn show(self, ctx: &egui::Context) {
        let VoiceModal { page, theme } = self;
        let snapshot = page.flow.snapshot();

        let mut close_requested = false;
        let mut mic_toggled = false;

        // Dim the page underneath
        let screen = ctx.screen_rect();
        egui::Area::new(egui::Id::new("voice_modal_dim"))
            .order(egui::Order::Middle)
            .fixed_pos(screen.min)
            .interactable(false)
            .show(ctx, |ui| {
                ui.painter()
                    .rect_filled(screen, 0.0, Color32::from_black_alpha(150));
                ui.allocate_exact_size(screen.size(), Sense::hover());
            });

        let modal = egui::Area::new(egui::Id::new("voice_modal"))
            .order(egui::Order::Foreground)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(theme.space_bg_deep)
                    .rounding(theme.card_rounding)
                    .stroke(Stroke::new(1.0, theme.accent_cyan.gamma_multiply(0.4)))
                    .inner_margin(theme.spacing_lg)
                    .show(ui, |ui| {
                        ui.set_width(280.0);
                        Self::show_contents(
                            ui,
                            theme,
                            &snapshot,
                            &mut close_requested,
                            &mut mic_toggled,
                        );
                    });
            });

        // Clicking outside the card closes the modal. The click that opened
        // the modal lands in the same frame and must not count.
        let modal_rect = modal.response.rect;
        if page.modal_just_opened {
            page.modal_just_opened = false;
        } else {
            let clicked_outside = ctx.input(|i| {
                i.pointer.primary_clicked()
                    && i.pointer
                        .interact_pos()
                        .is_some_and(|pos| !modal_rect.expand(4.0).contains(pos))
            });
            if clicked_outside {
                close_requested = true;
            }
        }

        if mic_toggled {
            page.toggle_listening();
        }
        if close_requested {
            page.close_modal();
        }

        if snapshot.listening || snapshot.thinking {
            ctx.request_repaint();
        }
    }

    fn show_contents(
        ui: &mut egui::Ui,
        theme: &Theme,
        snapshot: &FlowSnapshot,
        close_requested: &mut bool,
        mic_toggled: &mut bool,
    ) {
        // Close button in the top-right corner
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
            let close = ui.add(
                egui::Button::new(RichText::new("✕").size(14.0).color(theme.text_muted))
                    .frame(false),
            );
            close.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Close voice modal")
            });
            if close.clicked() {
                *close_requested = true;
            }
        });

        // Mascot with listening ping ring
        ui.vertical_centered(|ui| {
            Self::show_mascot(ui, theme, snapshot.listening);
            ui.add_space(theme.spacing_sm);
            SoundWave::new(snapshot.listening, theme).show(ui);
            ui.add_space(theme.spacing_sm);
            Self::show_status(ui, theme, snapshot);
        });

        // Captured transcript
        if !snapshot.transcript.is_empty() {
            ui.add_space(theme.spacing_sm);
            egui::Frame::none()
                .fill(theme.glass_fill)
                .rounding(theme.card_rounding)
                .inner_margin(theme.spacing_sm)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.label(
                        RichText::new(format!("你講咗：「{}」", snapshot.transcript))
                            .size(13.0)
                            .color(theme.text_secondary),
                    );
                });
        }

        // Mic toggle
        ui.add_space(theme.spacing);
        ui.vertical_centered(|ui| {
            let icon = if snapshot.listening { "⏹" } else { "🎤" };
            let mic = ui.add(
                egui::Button::new(RichText::new(icon).size(20.0))
                    .min_size(Vec2::splat(48.0))
                    .rounding(egui::Rounding::same(24.0))
                    .fill(if snapshot.listening {
                        theme.accent_cyan.gamma_multiply(0.4)
                    } else {
                        theme.accent_purple.gamma_multiply(0.4)
                    }),
            );
            mic.widget_info(|| {
                egui::WidgetInfo::labeled(egui::WidgetType::Button, true, "Voice modal microphone")
            });
            if mic.clicked() {
                *mic_toggled = true;
            }
        });
    }

    fn show_mascot(ui: &mut egui::Ui, theme: &Theme, listening: bool) {
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(80.0), Sense::hover());
        let painter = ui.painter();
        let center = rect.center();

        painter.circle_filled(center, 36.0, theme.accent_purple.gamma_multiply(0.5));
        painter.circle_filled(center, 30.0, theme.accent_cyan.gamma_multiply(0.6));
        painter.text(
            center,
            Align2::CENTER_CENTER,
            "Net仔",
            FontId::proportional(15.0),
            theme.text_primary,
        );

        if listening {
            // Expanding ping ring
            let time = ui.ctx().input(|i| i.time);
            let t = (time * 1.2).fract() as f32;
            painter.circle_stroke(
                center,
                36.0 + t * 14.0,
                Stroke::new(2.0, theme.accent_cyan.gamma_multiply(1.0 - t)),
            );
            ui.ctx().request_repaint();
        }
    }

    fn show_status(ui: &mut egui::Ui, theme: &Theme, snapshot: &FlowSnapshot) {
        if snapshot.listening {
            ui.label(
                RichText::new("聆聽中... 講嘢啦！")
                    .size(13.0)
                    .color(theme.accent_cyan),
            );
        } else if snapshot.thinking {
            ThinkingDots::new(theme).show(ui);
        } else if let Some(response) = &snapshot.response {
            ui.label(
                RichText::new(response.as_str())
                    .size(13.0)
                    .color(theme.text_primary),
            );
        } else {
            ui.label(
                RichText::new("點擊麥克風開始對話")
                    .size(13.0)
                    .color(theme.text_muted),
            );
        }
    }
}
