//! Chat panel — displays the active thread and the composer.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use chatty_core::store::ChatStore;
use chatty_types::conversation::Conversation;
use chatty_types::message::Message;
use crate::state::{UiAction, UiState};
use crate::theme::*;

pub const EMPTY_STATE_TEXT: &str = "Select a conversation or start a new one.";
pub const INPUT_HINT: &str = "Type your message here...";
pub const LOADING_TEXT: &str = "...";

/// Render the chat panel. Returns `UiAction::Send` when the user submits input.
pub fn chat_panel(ui: &mut egui::Ui, state: &mut UiState, store: &ChatStore) -> Option<UiAction> {
    let mut submitted = None;
    let active = store.active_conversation();

    egui::Frame::default()
        .fill(BG_PRIMARY)
        .inner_margin(PANEL_PADDING)
        .show(ui, |ui| {
            ui.vertical(|ui| {
                // Header
                ui.horizontal(|ui| {
                    let title = active.map(|c| c.heading.as_str()).unwrap_or("chatty");
                    ui.heading(RichText::new(title).color(TEXT_PRIMARY).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let status_color = if store.is_send_blocked() { WARNING } else { TEXT_SECONDARY };
                        ui.label(RichText::new(&state.status_text).color(status_color).small());
                    });
                });

                ui.separator();

                let available_height = ui.available_height() - 60.0;
                ScrollArea::vertical()
                    .max_height(available_height)
                    .auto_shrink([false, false])
                    .stick_to_bottom(true)
                    .show(ui, |ui| match active {
                        Some(conv) => render_thread(ui, conv),
                        None => render_empty_state(ui, available_height),
                    });

                ui.add_space(8.0);

                // Input area
                let blocked = store.is_send_blocked();
                ui.horizontal(|ui| {
                    let input = egui::TextEdit::singleline(&mut state.input_text)
                        .hint_text(INPUT_HINT)
                        .desired_width(ui.available_width() - 70.0)
                        .font(egui::FontId::proportional(14.0));

                    let response = ui.add_enabled(!blocked, input);

                    let send_enabled = !blocked && !state.input_text.trim().is_empty();
                    let send_btn = ui.add_enabled(
                        send_enabled,
                        egui::Button::new(RichText::new("Send").color(TEXT_PRIMARY))
                            .fill(if send_enabled { ACCENT } else { BG_SURFACE })
                            .corner_radius(PANEL_ROUNDING)
                            .min_size(Vec2::new(60.0, 0.0)),
                    );

                    // Submit on Enter or button click
                    let enter = response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if send_enabled && (enter || send_btn.clicked()) {
                        submitted = state.take_input().map(UiAction::Send);
                        response.request_focus();
                    }
                });
            });
        });

    submitted
}

fn render_thread(ui: &mut egui::Ui, conv: &Conversation) {
    if !conv.is_loaded() {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(RichText::new("Loading messages...").color(TEXT_SECONDARY));
        });
        return;
    }

    for message in conv.messages() {
        render_message(ui, message);
        ui.add_space(4.0);
    }
}

fn render_empty_state(ui: &mut egui::Ui, height: f32) {
    ui.vertical_centered(|ui| {
        ui.add_space(height * 0.35);
        ui.label(RichText::new("chatty").color(ACCENT).strong().size(28.0));
        ui.label(RichText::new(EMPTY_STATE_TEXT).color(TEXT_SECONDARY));
    });
}

fn render_message(ui: &mut egui::Ui, message: &Message) {
    let (label, label_color, bg, align) = if message.is_user {
        ("You", TEXT_PRIMARY, USER_BUBBLE, Align::Max)
    } else {
        ("Assistant", SUCCESS, ASSISTANT_BUBBLE, Align::Min)
    };

    ui.with_layout(Layout::top_down(align), |ui| {
        egui::Frame::default()
            .fill(bg)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.set_max_width(ui.available_width() * 0.8);
                ui.label(RichText::new(label).color(label_color).strong().small());
                if message.is_placeholder() {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(RichText::new(LOADING_TEXT).color(TEXT_SECONDARY));
                    });
                } else {
                    ui.label(RichText::new(&message.text).color(TEXT_PRIMARY));
                }
            });
    });
}
