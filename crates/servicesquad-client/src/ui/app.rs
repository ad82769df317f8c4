use eframe::egui;
use tokio::sync::oneshot;

use crate::config::ClientConfig;
use crate::network::{ApiError, NetworkClient};
use servicesquad_protocol::UserData;
use crate::session::SessionController;
use crate::state::{AppState, AuthMode, NavAction, Route};

use super::login::LoginView;
use super::nav_bar::{self, NavEvent};
use super::pages;

pub struct ServiceSquadApp {
    state: AppState,
    network: NetworkClient,
    session: SessionController<NetworkClient>,
    runtime: tokio::runtime::Runtime,
    route: Route,
    login_view: LoginView,
    pending_logout: Option<oneshot::Receiver<Result<(), ApiError>>>,
    pending_restore: Option<oneshot::Receiver<Result<Option<UserData>, ApiError>>>,
}

impl ServiceSquadApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: ClientConfig,
        runtime: tokio::runtime::Runtime,
    ) -> Result<Self, ApiError> {
        let mut style = (*cc.egui_ctx.style()).clone();
        style.spacing.item_spacing = egui::vec2(8.0, 8.0);
        cc.egui_ctx.set_style(style);

        let state = AppState::new();
        let network = NetworkClient::new(state.clone(), &config)?;
        let session = SessionController::new(network.clone(), state.clone());

        // Only a cookie saved by an earlier run can still name a live session
        let pending_restore = network.has_session_cookie().then(|| {
            let (tx, rx) = oneshot::channel();
            let session = session.clone();
            runtime.spawn(async move {
                let _ = tx.send(session.restore_session().await);
            });
            rx
        });

        let mut app = Self {
            state,
            network,
            session,
            runtime,
            route: Route::Home,
            login_view: LoginView::new(config.auto_login),
            pending_logout: None,
            pending_restore,
        };
        app.navigate(Route::Home);
        Ok(app)
    }

    fn is_authenticated(&self) -> bool {
        let state = self.state.clone();
        self.runtime.block_on(async { state.is_authenticated().await })
    }

    fn navigate(&mut self, requested: Route) {
        let route = Route::resolve(requested, self.is_authenticated());
        if route != requested {
            tracing::debug!("Redirecting {:?} to {:?}", requested, route);
        }

        if let Some(mode) = route.auth_mode() {
            self.login_view.set_mode(mode);
        }
        self.load_for(route);
        self.route = route;
    }

    /// Refresh the listing a page shows, in the background.
    fn load_for(&self, route: Route) {
        let network = self.network.clone();
        let state = self.state.clone();

        match route {
            Route::Home | Route::Opportunities => {
                self.runtime.spawn(async move {
                    let result = network.load_opportunities().await;
                    record_load_error(&state, result).await;
                });
            }
            Route::Organizations => {
                self.runtime.spawn(async move {
                    let result = network.load_organizations().await;
                    record_load_error(&state, result).await;
                });
            }
            Route::Login | Route::Signup | Route::Profile => {}
        }
    }

    fn start_logout(&mut self) {
        if self.pending_logout.is_some() {
            return;
        }

        let (tx, rx) = oneshot::channel();
        let session = self.session.clone();
        self.runtime.spawn(async move {
            let _ = tx.send(session.logout().await);
        });
        self.pending_logout = Some(rx);
    }

    fn poll_logout(&mut self) {
        let Some(rx) = self.pending_logout.as_mut() else {
            return;
        };

        match rx.try_recv() {
            Ok(Ok(())) => {
                self.pending_logout = None;
                self.navigate(Route::Login);
            }
            Ok(Err(e)) => {
                self.pending_logout = None;
                tracing::error!("Logout failed: {}", e);
                let state = self.state.clone();
                self.runtime
                    .block_on(state.set_connection_error(Some(format!("Logout failed: {}", e))));
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => self.pending_logout = None,
        }
    }

    fn poll_restore(&mut self) {
        let Some(rx) = self.pending_restore.as_mut() else {
            return;
        };

        match rx.try_recv() {
            Ok(result) => {
                self.pending_restore = None;
                match result {
                    Ok(Some(_)) if self.route.auth_mode().is_some() => {
                        self.navigate(Route::Home)
                    }
                    Ok(_) => {}
                    Err(e) => tracing::warn!("Could not restore session: {}", e),
                }
            }
            Err(oneshot::error::TryRecvError::Empty) => {}
            Err(oneshot::error::TryRecvError::Closed) => self.pending_restore = None,
        }
    }

    /// Draw the current page. Returns a route the page asked to open.
    fn show_page(&self, ctx: &egui::Context) -> Option<Route> {
        let state = self.state.clone();
        let inner = self.runtime.block_on(state.read());

        egui::CentralPanel::default()
            .show(ctx, |ui| {
                if let Some(error) = &inner.connection_error {
                    ui.colored_label(egui::Color32::RED, error);
                }

                match self.route {
                    Route::Home => pages::home(ui, &inner),
                    Route::Opportunities => pages::opportunities(ui, &inner),
                    Route::Organizations => pages::organizations(ui, &inner),
                    Route::Profile => pages::profile(ui, &inner),
                    Route::Login | Route::Signup => None,
                }
            })
            .inner
    }
}

async fn record_load_error(state: &AppState, result: Result<(), ApiError>) {
    match result {
        Ok(()) => state.set_connection_error(None).await,
        Err(e) => {
            tracing::error!("Failed to load listing: {}", e);
            state.set_connection_error(Some(e.to_string())).await;
        }
    }
}

impl eframe::App for ServiceSquadApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Keep polling background requests
        ctx.request_repaint();

        self.poll_logout();
        self.poll_restore();

        let authenticated = self.is_authenticated();
        match nav_bar::show(ctx, self.route, authenticated) {
            Some(NavEvent::Navigate(route)) => self.navigate(route),
            Some(NavEvent::Action(NavAction::Login)) => self.navigate(Route::Login),
            Some(NavEvent::Action(NavAction::Logout)) => self.start_logout(),
            None => {}
        }

        match self.route {
            Route::Login | Route::Signup => {
                self.login_view.try_auto_login(&self.session, &self.runtime);

                if let Some(user) = self.login_view.show(ctx, &self.session, &self.runtime) {
                    tracing::info!("Signed in as {}", user.username);
                    self.navigate(Route::Home);
                } else {
                    // Keep the highlighted nav entry in step with the form
                    self.route = match self.login_view.mode() {
                        AuthMode::Login => Route::Login,
                        AuthMode::Signup => Route::Signup,
                    };
                }
            }
            _ => {
                if let Some(route) = self.show_page(ctx) {
                    self.navigate(route);
                }
            }
        }
    }
}
