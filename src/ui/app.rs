//! Main application struct and eframe integration

use crate::cards::{self, Card};
use crate::config::AppConfig;
use crate::script::{FlowProbe, SessionCommand, SessionRunner, SessionScript};
use crate::ui::components::{Backdrop, ElementCard, NavBar, SearchBar, VoiceModal};
use crate::ui::state::{greeting_line, PageState};
use crate::ui::theme::Theme;
use chrono::Timelike;
use egui::{self, Align2, CentralPanel, FontId, RichText, Sense, Stroke, TopBottomPanel, Vec2};
use std::time::Duration;
use tracing::info;

/// Content column width, phone-like
const CONTENT_WIDTH: f32 = 392.0;

/// Main ET Light application
pub struct EtLightApp {
    /// Page state and worker handles
    page: PageState,
    /// Visual theme
    theme: Theme,
    /// Decorative starfield
    backdrop: Backdrop,
    /// Optional session script driving the page
    script: Option<SessionRunner>,
    /// Whether the app has been initialized
    initialized: bool,
}

impl EtLightApp {
    /// Create the application
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &AppConfig,
        script: Option<SessionScript>,
    ) -> Self {
        let theme = Theme::space();
        theme.apply(&cc.egui_ctx);

        let mut rng = rand::rng();

        Self {
            page: PageState::new(config),
            theme,
            backdrop: Backdrop::new(&mut rng),
            script: script.map(SessionRunner::new),
            initialized: false,
        }
    }

    fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        info!(
            "ET Light UI initialized (speech available: {})",
            self.page.speech_available()
        );
        self.initialized = true;
    }

    /// Apply due session-script steps
    fn drive_script(&mut self, ctx: &egui::Context) {
        let Some(runner) = &mut self.script else {
            return;
        };
        runner.start();

        while let Some((command, check)) = runner.poll() {
            if let SessionCommand::Exit { code } = command {
                if let Some(check) = &check {
                    let probe = FlowProbe {
                        modal_open: self.page.modal_open,
                        flow: self.page.flow.snapshot(),
                    };
                    runner.check(check, &probe);
                }
                let passed = runner.passed();
                info!(
                    "[SCRIPT] session finished: {}",
                    if passed { "PASS" } else { "FAIL" }
                );
                self.page.shutdown();
                std::process::exit(if passed { code } else { 1 });
            }

            match command {
                SessionCommand::OpenModal => self.page.open_modal(),
                SessionCommand::CloseModal => self.page.close_modal(),
                SessionCommand::ToggleListening => self.page.toggle_listening(),
                SessionCommand::Speak { text } => self.page.flow.write().push_partial(&text),
                SessionCommand::Exit { .. } => unreachable!("handled above"),
            }

            if let Some(check) = &check {
                let probe = FlowProbe {
                    modal_open: self.page.modal_open,
                    flow: self.page.flow.snapshot(),
                };
                runner.check(check, &probe);
            }
        }

        // Scripts keep their own clock; keep frames coming
        ctx.request_repaint_after(Duration::from_millis(10));
    }

    fn show_header(&mut self, ctx: &egui::Context) {
        TopBottomPanel::top("header")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.space_bg)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(CONTENT_WIDTH);
                    let response = SearchBar::new(&mut self.page.search_query, &self.theme).show(ui);
                    if response.mic_clicked {
                        self.page.open_modal();
                    }
                });
            });
    }

    fn show_nav(&mut self, ctx: &egui::Context) {
        TopBottomPanel::bottom("nav")
            .frame(
                egui::Frame::none()
                    .fill(self.theme.space_bg_deep)
                    .inner_margin(12.0),
            )
            .show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.set_max_width(CONTENT_WIDTH);
                    NavBar::new(&mut self.page.active_tab, &self.theme).show(ui);
                });
            });
    }

    fn show_content(&mut self, ctx: &egui::Context) {
        CentralPanel::default()
            .frame(egui::Frame::none().fill(self.theme.space_bg))
            .show(ctx, |ui| {
                let time = ui.ctx().input(|i| i.time);
                self.backdrop
                    .paint(ui.painter(), ui.max_rect(), &self.theme, time);

                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.set_max_width(CONTENT_WIDTH);
                            ui.add_space(self.theme.spacing);

                            self.show_welcome(ui);
                            ui.add_space(self.theme.spacing);
                            self.show_greeting(ui);
                            ui.add_space(self.theme.spacing);
                            self.show_card_grid(ui);
                            ui.add_space(self.theme.spacing);
                            self.show_quick_actions(ui);
                            ui.add_space(self.theme.spacing_lg * 2.0);
                        });
                    });
            });
    }

    fn show_welcome(&self, ui: &mut egui::Ui) {
        ui.label(
            RichText::new("ET Light")
                .size(26.0)
                .strong()
                .color(self.theme.accent_cyan),
        );
        ui.label(
            RichText::new("你的輕盈理財夥伴")
                .size(13.0)
                .color(self.theme.text_muted),
        );
    }

    fn show_greeting(&self, ui: &mut egui::Ui) {
        egui::Frame::none()
            .fill(self.theme.glass_fill)
            .rounding(self.theme.card_rounding)
            .stroke(Stroke::new(1.0, self.theme.accent_cyan.gamma_multiply(0.3)))
            .inner_margin(self.theme.spacing)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    // Mascot avatar placeholder
                    let (rect, _) = ui.allocate_exact_size(Vec2::splat(48.0), Sense::hover());
                    let painter = ui.painter();
                    painter.circle_filled(
                        rect.center(),
                        22.0,
                        self.theme.accent_purple.gamma_multiply(0.5),
                    );
                    painter.circle_filled(
                        rect.center(),
                        18.0,
                        self.theme.accent_cyan.gamma_multiply(0.6),
                    );
                    painter.text(
                        rect.center(),
                        Align2::CENTER_CENTER,
                        "Net仔",
                        FontId::proportional(11.0),
                        self.theme.text_primary,
                    );

                    ui.vertical(|ui| {
                        let hour = chrono::Local::now().hour();
                        ui.label(
                            RichText::new(greeting_line(hour))
                                .size(14.0)
                                .strong()
                                .color(self.theme.text_primary),
                        );
                        ui.label(
                            RichText::new("今日想睇咩？問我啦！")
                                .size(12.0)
                                .color(self.theme.text_muted),
                        );
                    });
                });
            });
    }

    fn show_card_grid(&mut self, ui: &mut egui::Ui) {
        let mut clicked: Option<Card> = None;

        for row in self.page.cards.chunks(2) {
            ui.columns(2, |columns| {
                for (column, card) in columns.iter_mut().zip(row) {
                    if ElementCard::new(card, &self.theme).show(column).clicked() {
                        clicked = Some(card.clone());
                    }
                }
            });
            ui.add_space(self.theme.spacing_sm);
        }

        if let Some(card) = clicked {
            self.page.card_clicked(&card);
        }
    }

    fn show_quick_actions(&self, ui: &mut egui::Ui) {
        ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
            ui.label(
                RichText::new("快速操作")
                    .size(13.0)
                    .color(self.theme.text_secondary),
            );
            ui.add_space(self.theme.spacing_sm);

            egui::ScrollArea::horizontal()
                .id_salt("quick_actions")
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        for action in cards::QUICK_ACTIONS {
                            let _ = ui.add(
                                egui::Button::new(
                                    RichText::new(action)
                                        .size(12.0)
                                        .color(self.theme.text_secondary),
                                )
                                .rounding(self.theme.pill_rounding)
                                .fill(self.theme.glass_fill),
                            );
                        }
                    });
                });
        });
    }

    /// Floating mic in the bottom-right corner; hidden while the modal is up
    fn show_floating_mic(&mut self, ctx: &egui::Context) {
        if self.page.modal_open {
            return;
        }

        egui::Area::new(egui::Id::new("floating_mic"))
            .order(egui::Order::Middle)
            .anchor(Align2::RIGHT_BOTTOM, Vec2::new(-16.0, -96.0))
            .show(ctx, |ui| {
                let (rect, response) = ui.allocate_exact_size(Vec2::splat(56.0), Sense::click());
                let painter = ui.painter();
                let hovered = response.hovered();

                let outer = if hovered { 28.0 } else { 26.0 };
                painter.circle_filled(
                    rect.center(),
                    outer,
                    self.theme.accent_purple.gamma_multiply(0.9),
                );
                painter.circle_filled(
                    rect.center(),
                    outer - 4.0,
                    self.theme.accent_cyan.gamma_multiply(0.9),
                );
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    "🎤",
                    FontId::proportional(20.0),
                    self.theme.text_primary,
                );

                response.widget_info(|| {
                    egui::WidgetInfo::labeled(
                        egui::WidgetType::Button,
                        true,
                        "Floating microphone",
                    )
                });
                if response.clicked() {
                    self.page.open_modal_and_listen();
                }
            });
    }

    /// Blocking notice (e.g. recognition unavailable)
    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.page.flow.notice() else {
            return;
        };

        egui::Area::new(egui::Id::new("notice"))
            .order(egui::Order::Tooltip)
            .anchor(Align2::CENTER_CENTER, Vec2::ZERO)
            .show(ctx, |ui| {
                egui::Frame::none()
                    .fill(self.theme.space_bg_deep)
                    .rounding(self.theme.card_rounding)
                    .stroke(Stroke::new(1.0, self.theme.negative.gamma_multiply(0.6)))
                    .inner_margin(self.theme.spacing)
                    .show(ui, |ui| {
                        ui.set_max_width(280.0);
                        ui.label(
                            RichText::new(notice)
                                .size(13.0)
                                .color(self.theme.text_primary),
                        );
                        ui.add_space(self.theme.spacing_sm);
                        ui.vertical_centered(|ui| {
                            let ok = ui.button("知道喇");
                            ok.widget_info(|| {
                                egui::WidgetInfo::labeled(
                                    egui::WidgetType::Button,
                                    true,
                                    "Dismiss notice",
                                )
                            });
                            if ok.clicked() {
                                self.page.flow.write().clear_notice();
                            }
                        });
                    });
            });
    }
}

impl eframe::App for EtLightApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.initialize();

        // Pump worker events before rendering
        self.page.poll();
        self.drive_script(ctx);

        self.show_header(ctx);
        self.show_nav(ctx);
        self.show_content(ctx);
        self.show_floating_mic(ctx);
        if self.page.modal_open {
            VoiceModal::new(&mut self.page, &self.theme).show(ctx);
        }
        self.show_notice(ctx);

        // Keep animating while anything is in flight; otherwise idle at a
        // slow cadence for the backdrop drift
        let busy = {
            let snapshot = self.page.flow.snapshot();
            snapshot.listening || snapshot.thinking
        };
        if busy {
            ctx.request_repaint();
        } else {
            ctx.request_repaint_after(Duration::from_millis(50));
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("ET Light shutting down");
        self.page.shutdown();
    }
}
