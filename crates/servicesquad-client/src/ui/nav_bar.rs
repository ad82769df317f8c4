use eframe::egui;

use crate::state::{NAV_ITEMS, NavAction, Route, nav_action};

pub enum NavEvent {
    Navigate(Route),
    Action(NavAction),
}

/// Top bar with the page links and a login/logout button.
pub fn show(ctx: &egui::Context, current: Route, authenticated: bool) -> Option<NavEvent> {
    let mut event = None;

    egui::TopBottomPanel::top("nav_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            ui.strong("ServiceSquad");
            ui.separator();

            for route in NAV_ITEMS {
                if ui.selectable_label(current == route, route.title()).clicked() {
                    event = Some(NavEvent::Navigate(route));
                }
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let action = nav_action(authenticated);
                let label = match action {
                    NavAction::Login => "Login",
                    NavAction::Logout => "Logout",
                };
                if ui.button(label).clicked() {
                    event = Some(NavEvent::Action(action));
                }
            });
        });
    });

    event
}
