use eframe::egui;
use tokio::sync::oneshot;

use crate::network::NetworkClient;
use crate::session::{SessionController, SessionForm, SubmitError};
use crate::state::{AuthMode, Credentials, Field};
use servicesquad_protocol::UserData;

type SubmitResult = Result<UserData, SubmitError>;

pub struct LoginView {
    form: SessionForm,
    pending: Option<oneshot::Receiver<SubmitResult>>,
    auto_login: Option<Credentials>,
}

impl LoginView {
    pub fn new(auto_login: Option<Credentials>) -> Self {
        Self {
            form: SessionForm::new(AuthMode::Login),
            pending: None,
            auto_login,
        }
    }

    pub fn set_mode(&mut self, mode: AuthMode) {
        self.form.set_mode(mode);
    }

    pub fn mode(&self) -> AuthMode {
        self.form.mode()
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    fn start_submit(
        &mut self,
        session: &SessionController<NetworkClient>,
        runtime: &tokio::runtime::Runtime,
        credentials: Credentials,
    ) {
        let (tx, rx) = oneshot::channel();
        let session = session.clone();
        let mode = self.form.mode();

        runtime.spawn(async move {
            let result = session.submit(&credentials, mode).await;
            let _ = tx.send(result);
        });

        self.pending = Some(rx);
    }

    /// Submit the credentials from the environment once, before the form is shown.
    pub fn try_auto_login(
        &mut self,
        session: &SessionController<NetworkClient>,
        runtime: &tokio::runtime::Runtime,
    ) {
        if let Some(credentials) = self.auto_login.take() {
            tracing::info!("Attempting auto-login as {}", credentials.username);
            self.form.username = credentials.username.clone();
            self.form.password = credentials.password.clone();
            self.start_submit(session, runtime, credentials);
        }
    }

    fn poll_pending(&mut self) -> Option<UserData> {
        let rx = self.pending.as_mut()?;
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(oneshot::error::TryRecvError::Empty) => return None,
            Err(oneshot::error::TryRecvError::Closed) => {
                self.pending = None;
                self.form.set_error("Request was cancelled");
                return None;
            }
        };

        self.pending = None;
        self.form.finish(&result);
        result.ok()
    }

    /// Draw the form. Returns the user once a submission succeeds.
    pub fn show(
        &mut self,
        ctx: &egui::Context,
        session: &SessionController<NetworkClient>,
        runtime: &tokio::runtime::Runtime,
    ) -> Option<UserData> {
        if let Some(user) = self.poll_pending() {
            return Some(user);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(100.0);

                ui.heading(self.form.mode().label());
                ui.add_space(20.0);

                ui.group(|ui| {
                    ui.set_width(300.0);

                    ui.horizontal(|ui| {
                        ui.label("Username:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.form.username)
                                .hint_text("Username"),
                        );
                    });
                    if let Some(reason) = self.form.field_error(Field::Username) {
                        ui.colored_label(egui::Color32::RED, reason);
                    }

                    ui.horizontal(|ui| {
                        ui.label("Password:");
                        ui.add(
                            egui::TextEdit::singleline(&mut self.form.password)
                                .password(true)
                                .hint_text("Password"),
                        );
                    });
                    if let Some(reason) = self.form.field_error(Field::Password) {
                        ui.colored_label(egui::Color32::RED, reason);
                    }

                    ui.add_space(10.0);

                    let can_submit = !self.is_loading();
                    if ui
                        .add_enabled(can_submit, egui::Button::new("Submit"))
                        .clicked()
                        && self.form.validate()
                    {
                        let credentials = self.form.credentials();
                        self.start_submit(session, runtime, credentials);
                    }

                    ui.add_space(5.0);

                    let toggle_text = match self.form.mode() {
                        AuthMode::Login => "Don't have an account? Sign up",
                        AuthMode::Signup => "Already have an account? Login",
                    };
                    if ui.link(toggle_text).clicked() {
                        self.form.toggle_mode();
                    }

                    if let Some(error) = self.form.error() {
                        ui.add_space(10.0);
                        ui.colored_label(egui::Color32::RED, error);
                    }

                    if self.is_loading() {
                        ui.add_space(10.0);
                        ui.spinner();
                    }
                });
            });
        });

        None
    }
}
