use eframe::egui;

use crate::state::{AppStateInner, Route};
use servicesquad_protocol::{OpportunityData, OrganizationData, UserData};

// Each page returns the route of a link clicked on it, if any.

pub fn home(ui: &mut egui::Ui, state: &AppStateInner) -> Option<Route> {
    ui.heading("Find a way to help");
    if let Some(user) = &state.current_user {
        ui.label(format!("Welcome back, {}", user.username));
    }
    ui.add_space(10.0);
    opportunity_list(ui, &state.opportunities);
    None
}

pub fn opportunities(ui: &mut egui::Ui, state: &AppStateInner) -> Option<Route> {
    ui.heading("Opportunities");
    ui.add_space(10.0);
    opportunity_list(ui, &state.opportunities);
    None
}

pub fn organizations(ui: &mut egui::Ui, state: &AppStateInner) -> Option<Route> {
    ui.heading("Organizations");
    ui.add_space(10.0);

    if state.organizations.is_empty() {
        ui.label("No organizations yet");
        return None;
    }

    let mut target = None;
    egui::ScrollArea::vertical().show(ui, |ui| {
        for org in &state.organizations {
            if let Some(route) = organization_card(ui, org) {
                target = Some(route);
            }
            ui.add_space(8.0);
        }
    });
    target
}

pub fn profile(ui: &mut egui::Ui, state: &AppStateInner) -> Option<Route> {
    ui.heading("Your Volunteer Profile");

    if let Some(user) = &state.current_user {
        ui.add_space(10.0);
        profile_fields(ui, user);
    }
    None
}

fn opportunity_list(ui: &mut egui::Ui, opportunities: &[OpportunityData]) {
    if opportunities.is_empty() {
        ui.label("No opportunities yet");
        return;
    }

    egui::ScrollArea::vertical().show(ui, |ui| {
        for opp in opportunities {
            ui.group(|ui| {
                ui.strong(opp.title.as_str());
                if let Some(description) = &opp.description {
                    ui.label(description.as_str());
                }
                if let Some(dates) = &opp.dates {
                    ui.label(format!("When: {}", dates));
                }
            });
        }
    });
}

fn opportunity_link(ui: &mut egui::Ui, opp: &OpportunityData) -> egui::Response {
    ui.link(opp.title.as_str())
}

fn organization_card(ui: &mut egui::Ui, org: &OrganizationData) -> Option<Route> {
    let mut target = None;
    ui.group(|ui| {
        ui.heading(org.name.as_str());
        ui.label("Opportunities Available:");
        for opp in &org.opportunities {
            if opportunity_link(ui, opp).clicked() {
                target = Some(Route::Opportunities);
            }
        }
        if let Some(website) = &org.website {
            ui.hyperlink(website);
        }
        if let Some(category) = &org.category {
            ui.label(format!("Type: {}", category));
        }
    });
    target
}

fn profile_fields(ui: &mut egui::Ui, user: &UserData) {
    egui::Grid::new("profile_grid").num_columns(2).show(ui, |ui| {
        ui.label("Username");
        ui.label(user.username.as_str());
        ui.end_row();

        for (key, value) in &user.profile {
            ui.label(key.replace('_', " "));
            match value.as_str() {
                Some(text) => ui.label(text),
                None => ui.label(value.to_string()),
            };
            ui.end_row();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn food_bank() -> OrganizationData {
        serde_json::from_value(json!({
            "id": 3,
            "name": "Harbor Food Bank",
            "opportunities": [{ "id": 9, "title": "Sort donations" }]
        }))
        .unwrap()
    }

    fn frame(events: Vec<egui::Event>) -> egui::RawInput {
        egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(
                egui::Pos2::ZERO,
                egui::vec2(800.0, 600.0),
            )),
            events,
            ..Default::default()
        }
    }

    fn press(pos: egui::Pos2, pressed: bool) -> egui::Event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            modifiers: egui::Modifiers::default(),
        }
    }

    #[test]
    fn opportunity_titles_are_clickable() {
        let ctx = egui::Context::default();
        let opp = food_bank().opportunities.remove(0);
        let mut rect = egui::Rect::NOTHING;
        let mut clicked = false;

        let inputs = |rect: egui::Rect| {
            vec![
                frame(vec![]),
                frame(vec![
                    egui::Event::PointerMoved(rect.center()),
                    press(rect.center(), true),
                ]),
                frame(vec![press(rect.center(), false)]),
            ]
        };

        // first frame lays the link out so its position is known
        let _ = ctx.run(frame(vec![]), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                rect = opportunity_link(ui, &opp).rect;
            });
        });
        assert!(rect.is_positive());

        for input in inputs(rect) {
            let _ = ctx.run(input, |ctx| {
                egui::CentralPanel::default().show(ctx, |ui| {
                    clicked |= opportunity_link(ui, &opp).clicked();
                });
            });
        }

        assert!(clicked);
    }

    #[test]
    fn organizations_page_without_clicks_stays_put() {
        let ctx = egui::Context::default();
        let state = AppStateInner {
            organizations: vec![food_bank()],
            ..Default::default()
        };
        let mut target = Some(Route::Home);

        let _ = ctx.run(frame(vec![]), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                target = organizations(ui, &state);
            });
        });

        assert_eq!(target, None);
    }
}
