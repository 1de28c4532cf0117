//! Sidebar — conversation list, new chat, delete, logout.

use egui::{self, Align, Layout, RichText, ScrollArea, Vec2};
use chatty_core::store::{ChatStore, LoadStatus};
use chatty_types::conversation::Conversation;
use crate::state::{UiAction, UiState};
use crate::theme::*;

const PREVIEW_CHARS: usize = 80;

pub fn sidebar_panel(ui: &mut egui::Ui, state: &mut UiState, store: &ChatStore) -> Option<UiAction> {
    let mut action = None;

    ui.vertical(|ui| {
        ui.horizontal(|ui| {
            ui.heading(RichText::new("Chats").color(TEXT_PRIMARY).strong());
            if store.status() == LoadStatus::Loading {
                ui.spinner();
            }
        });
        ui.add_space(4.0);

        let new_chat = ui.add(
            egui::Button::new(RichText::new("+ New Chat").color(TEXT_PRIMARY))
                .fill(ACCENT)
                .corner_radius(PANEL_ROUNDING)
                .min_size(Vec2::new(ui.available_width(), 28.0)),
        );
        if new_chat.clicked() {
            state.pending_delete = None;
            action = Some(UiAction::NewChat);
        }

        ui.separator();

        if store.status() == LoadStatus::Failed {
            if let Some(error) = store.error() {
                ui.label(RichText::new(error).color(ERROR).small());
            }
        }

        let list_height = ui.available_height() - 40.0;
        ScrollArea::vertical()
            .max_height(list_height)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let active = store.active_chat_id();
                for conv in store.conversations() {
                    let is_active = active == Some(&conv.id);
                    if let Some(a) = conversation_row(ui, state, conv, is_active) {
                        action = Some(a);
                    }
                }
            });

        ui.with_layout(Layout::bottom_up(Align::Min), |ui| {
            if ui
                .add(egui::Button::new(RichText::new("Logout").color(TEXT_SECONDARY)).frame(false))
                .clicked()
            {
                action = Some(UiAction::Logout);
            }
        });
    });

    action
}

/// One entry: selectable heading plus a two-step delete
fn conversation_row(
    ui: &mut egui::Ui,
    state: &mut UiState,
    conv: &Conversation,
    is_active: bool,
) -> Option<UiAction> {
    let mut action = None;
    let confirming = state.pending_delete.as_ref() == Some(&conv.id);

    ui.horizontal(|ui| {
        if confirming {
            ui.label(RichText::new("Delete this chat?").color(WARNING).small());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui.small_button("No").clicked() {
                    state.pending_delete = None;
                }
                if ui.small_button(RichText::new("Yes").color(ERROR)).clicked() {
                    state.pending_delete = None;
                    action = Some(UiAction::Delete(conv.id.clone()));
                }
            });
            return;
        }

        let heading = if conv.heading.trim().is_empty() {
            "Untitled"
        } else {
            conv.heading.as_str()
        };
        let color = if is_active { TEXT_PRIMARY } else { TEXT_SECONDARY };
        let mut row = ui.selectable_label(is_active, RichText::new(heading).color(color));
        if let Some(preview) = row_preview(conv) {
            row = row.on_hover_text(preview);
        }
        if row.clicked() && !is_active {
            action = Some(UiAction::Select(conv.id.clone()));
        }
        if ui.small_button("🗑").on_hover_text("Delete").clicked() {
            state.pending_delete = Some(conv.id.clone());
        }
    });

    action
}

/// Hover text for a row: the latest loaded message, shortened
pub fn row_preview(conv: &Conversation) -> Option<String> {
    let message = conv.last_message().filter(|m| !m.is_placeholder())?;
    let text = message.text.trim();
    if text.is_empty() {
        return None;
    }
    if text.chars().count() <= PREVIEW_CHARS {
        return Some(text.to_string());
    }
    let cut: String = text.chars().take(PREVIEW_CHARS).collect();
    Some(format!("{}…", cut.trim_end()))
}
