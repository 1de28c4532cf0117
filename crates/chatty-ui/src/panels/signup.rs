//! Signup screen — account creation against `POST /signup`.

use egui::{self, RichText, Vec2};
use chatty_types::event::Route;
use crate::panels::login::form_field;
use crate::state::{UiAction, UiState};
use crate::theme::*;

pub fn signup_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<UiAction> {
    let mut action = None;

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.1);
        ui.heading(RichText::new("chatty").color(ACCENT).strong().size(28.0));
        ui.add_space(12.0);

        egui::Frame::default()
            .fill(BG_SECONDARY)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(PANEL_PADDING * 2.0)
            .show(ui, |ui| {
                ui.set_width(FORM_WIDTH);
                ui.label(RichText::new("Sign Up").color(TEXT_PRIMARY).strong().size(18.0));
                ui.add_space(6.0);

                let form = &mut state.signup;
                let mut enter = false;
                for (caption, value, password, hint) in [
                    ("Name", &mut form.name, false, ""),
                    ("Email", &mut form.email, false, "you@example.com"),
                    ("Password", &mut form.password, true, "At least 6 characters"),
                    ("Age", &mut form.age, false, ""),
                ] {
                    let response = form_field(ui, caption, value, password, hint);
                    enter |= response.lost_focus();
                }
                let enter = enter && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.add_space(8.0);
                let label = if state.auth_busy { "Creating Account..." } else { "Sign Up" };
                let submit = ui.add_enabled(
                    !state.auth_busy,
                    egui::Button::new(RichText::new(label).color(TEXT_PRIMARY))
                        .fill(ACCENT)
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(FORM_WIDTH, 28.0)),
                );

                if submit.clicked() || (enter && !state.auth_busy) {
                    action = state.submit_signup();
                }

                if let Some(error) = &state.form_error {
                    ui.add_space(4.0);
                    ui.label(RichText::new(error).color(ERROR).small());
                }

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Already have an account?").color(TEXT_SECONDARY).small());
                    if ui.link("Log in").clicked() {
                        action = Some(UiAction::Navigate(Route::Login));
                    }
                });
            });
    });

    action
}
