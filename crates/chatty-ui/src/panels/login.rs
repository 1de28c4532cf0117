//! Login screen — email and password against `POST /login`.

use egui::{self, RichText, Vec2};
use chatty_types::event::Route;
use crate::state::{UiAction, UiState};
use crate::theme::*;

/// Render the login form. Returns an intent when the user submits or
/// follows the signup link.
pub fn login_panel(ui: &mut egui::Ui, state: &mut UiState) -> Option<UiAction> {
    let mut action = None;

    ui.vertical_centered(|ui| {
        ui.add_space(ui.available_height() * 0.15);
        ui.heading(RichText::new("chatty").color(ACCENT).strong().size(28.0));
        ui.add_space(12.0);

        egui::Frame::default()
            .fill(BG_SECONDARY)
            .corner_radius(PANEL_ROUNDING)
            .inner_margin(PANEL_PADDING * 2.0)
            .show(ui, |ui| {
                ui.set_width(FORM_WIDTH);
                ui.label(RichText::new("Login").color(TEXT_PRIMARY).strong().size(18.0));
                ui.add_space(6.0);

                if let Some(notice) = &state.notice {
                    ui.label(RichText::new(notice).color(SUCCESS).small());
                    ui.add_space(4.0);
                }

                let email = form_field(ui, "Email", &mut state.login.email, false, "you@example.com");
                let password = form_field(ui, "Password", &mut state.login.password, true, "");

                let enter = (email.lost_focus() || password.lost_focus())
                    && ui.input(|i| i.key_pressed(egui::Key::Enter));

                ui.add_space(8.0);
                let label = if state.auth_busy { "Logging in..." } else { "Login" };
                let submit = ui.add_enabled(
                    !state.auth_busy,
                    egui::Button::new(RichText::new(label).color(TEXT_PRIMARY))
                        .fill(ACCENT)
                        .corner_radius(PANEL_ROUNDING)
                        .min_size(Vec2::new(FORM_WIDTH, 28.0)),
                );

                if submit.clicked() || (enter && !state.auth_busy) {
                    action = state.submit_login();
                }

                if let Some(error) = &state.form_error {
                    ui.add_space(4.0);
                    ui.label(RichText::new(error).color(ERROR).small());
                }

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Don't have an account?").color(TEXT_SECONDARY).small());
                    if ui.link("Sign up").clicked() {
                        action = Some(UiAction::Navigate(Route::Signup));
                    }
                });
            });
    });

    action
}

/// Caption plus single-line edit, full form width
pub(crate) fn form_field(
    ui: &mut egui::Ui,
    caption: &str,
    value: &mut String,
    password: bool,
    hint: &str,
) -> egui::Response {
    ui.label(RichText::new(caption).color(TEXT_SECONDARY).small());
    let response = ui.add(
        egui::TextEdit::singleline(value)
            .password(password)
            .hint_text(hint)
            .desired_width(FORM_WIDTH),
    );
    ui.add_space(4.0);
    response
}
