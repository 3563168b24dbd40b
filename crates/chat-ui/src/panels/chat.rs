//! Chat panel — conversation thread, welcome screen, error banner, and the
//! input row. New messages fade and slide in, keyed by message id.

use egui::{self, Align, Color32, Layout, RichText, ScrollArea, Sense, Vec2};
use chat_types::{
    message::{Message, Sender},
    state::ChatState,
};
use crate::state::UiState;
use crate::theme::*;

/// What the user asked for this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatAction {
    Send(String),
    ClearHistory,
}

/// Render the chat panel. Returns the submitted action, if any.
pub fn chat_panel(
    ui: &mut egui::Ui,
    chat: &ChatState,
    state: &mut UiState,
) -> Option<ChatAction> {
    let mut action = None;

    if state.take_skip_entry_animations() {
        // Rehydrated history pops in as-is; only messages appended from now
        // on animate.
        for message in &chat.messages {
            state.seen_messages.insert(message.id.clone());
        }
    }

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    ui.heading(RichText::new("Chat").color(TEXT_PRIMARY).strong());
                    status_indicator(ui, chat.is_loading);
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let clear_btn = ui.add_enabled(
                            !chat.messages.is_empty(),
                            egui::Button::new(RichText::new("Clear").small()),
                        );
                        if clear_btn.clicked() {
                            action = Some(ChatAction::ClearHistory);
                        }
                        ui.label(
                            RichText::new(&state.status_text)
                                .color(TEXT_SECONDARY)
                                .small(),
                        );
                    });
                });

                ui.separator();

                // Thread
                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| {
                        if chat.messages.is_empty() && chat.error.is_none() {
                            welcome_message(ui);
                        } else {
                            for message in &chat.messages {
                                render_message(ui, state, message);
                                ui.add_space(4.0);
                            }
                        }

                        if chat.is_loading {
                            typing_indicator(ui);
                        }

                        if let Some(error) = &chat.error {
                            error_banner(ui, error);
                        }

                        if state.take_scroll_to_bottom() {
                            ui.scroll_to_cursor(Some(Align::BOTTOM));
                        }
                    });

                ui.add_space(8.0);

                // Input row
                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text("Type your message...")
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));

                    let response = ui.add_enabled(!chat.is_loading, input);

                    let send_enabled =
                        !state.input_text.trim().is_empty() && !chat.is_loading;
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    // Submit on Enter or button click
                    if (response.lost_focus()
                        && ui.input(|i| i.key_pressed(egui::Key::Enter))
                        && send_enabled)
                        || send_btn.clicked()
                    {
                        let text = state.input_text.trim().to_string();
                        action = Some(ChatAction::Send(text));
                        state.input_text.clear();
                        response.request_focus();
                    }
                });
            });
        });

    action
}

fn render_message(ui: &mut egui::Ui, state: &mut UiState, message: &Message) {
    let t = entry_progress(ui.ctx(), state, &message.id);

    let (label, label_color, bubble, layout) = match message.sender {
        Sender::User => ("You", ACCENT, BUBBLE_USER, Layout::right_to_left(Align::TOP)),
        Sender::Bot => ("Bot", SUCCESS, BUBBLE_BOT, Layout::left_to_right(Align::TOP)),
    };

    ui.add_space((1.0 - t) * 12.0);
    ui.scope(|ui| {
        ui.set_opacity(t);
        ui.with_layout(layout, |ui| {
            ui.set_max_width(ui.available_width());
            egui::Frame::default()
                .fill(bubble)
                .corner_radius(BUBBLE_ROUNDING)
                .inner_margin(8.0)
                .show(ui, |ui| {
                    ui.set_max_width(ui.available_width() * 0.8);
                    ui.vertical(|ui| {
                        ui.label(RichText::new(label).color(label_color).strong().small());
                        ui.label(RichText::new(&message.text).color(TEXT_PRIMARY));
                        ui.label(
                            RichText::new(clock_time(&message.timestamp))
                                .color(TEXT_SECONDARY)
                                .small(),
                        );
                    });
                });
        });
    });

    if t < 1.0 {
        ui.ctx().request_repaint();
    }
}

/// Fade/slide progress for a message, 0.0 → 1.0 over its first frames.
/// Already-seen messages stay at 1.0.
fn entry_progress(ctx: &egui::Context, state: &mut UiState, id: &str) -> f32 {
    let anim_id = egui::Id::new(("message_entry", id));
    if state.seen_messages.insert(id.to_string()) {
        // First sighting: seed the clock at zero so the entry animates
        ctx.animate_value_with_time(anim_id, 0.0, 0.0);
    }
    ctx.animate_value_with_time(anim_id, 1.0, 0.25)
}

fn status_indicator(ui: &mut egui::Ui, is_loading: bool) {
    let t = ui
        .ctx()
        .animate_bool_with_time(egui::Id::new("status_indicator"), is_loading, 0.3);
    let color = lerp_color(SUCCESS, WARNING, t);
    let (rect, _) = ui.allocate_exact_size(Vec2::splat(10.0), Sense::hover());
    ui.painter().circle_filled(rect.center(), 5.0, color);
}

fn welcome_message(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);
        ui.heading(RichText::new("Welcome!").color(TEXT_PRIMARY));
        ui.label(
            RichText::new("Ask me anything and I'll help you out.")
                .color(TEXT_SECONDARY),
        );
        ui.add_space(16.0);
        bouncing_dots(ui, 5, TEXT_SECONDARY);
    });
}

/// Animated ellipsis shown while the reply is in flight
fn typing_indicator(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.add_space(8.0);
        bouncing_dots(ui, 3, TEXT_SECONDARY);
    });
}

fn bouncing_dots(ui: &mut egui::Ui, count: usize, color: Color32) {
    let time = ui.input(|i| i.time);
    ui.horizontal(|ui| {
        for i in 0..count {
            let phase = time * 3.0 + i as f64 * 0.4;
            let lift = (phase.sin().max(0.0) * 5.0) as f32;
            let (rect, _) = ui.allocate_exact_size(Vec2::new(10.0, 14.0), Sense::hover());
            let center = rect.center() - Vec2::new(0.0, lift);
            ui.painter().circle_filled(center, 3.0, color);
        }
    });
    ui.ctx().request_repaint();
}

fn error_banner(ui: &mut egui::Ui, error: &str) {
    ui.add_space(4.0);
    egui::Frame::default()
        .fill(ERROR_BG)
        .corner_radius(PANEL_ROUNDING)
        .inner_margin(8.0)
        .show(ui, |ui| {
            ui.label(RichText::new(error).color(ERROR));
        });
}

/// Local wall-clock display for a message timestamp; empty when the stamp
/// does not parse.
pub(crate) fn clock_time(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .map(|t| t.with_timezone(&chrono::Local).format("%H:%M").to_string())
        .unwrap_or_default()
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let channel = |x: u8, y: u8| egui::lerp((x as f32)..=(y as f32), t) as u8;
    Color32::from_rgb(
        channel(a.r(), b.r()),
        channel(a.g(), b.g()),
        channel(a.b(), b.b()),
    )
}
