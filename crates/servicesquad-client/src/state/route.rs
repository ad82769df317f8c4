use super::AuthMode;

/// Pages reachable from the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Login,
    Signup,
    Profile,
    Opportunities,
    Organizations,
}

impl Route {
    pub fn requires_auth(self) -> bool {
        !matches!(self, Route::Login | Route::Signup)
    }

    /// Where a navigation to `requested` actually lands given the session.
    pub fn resolve(requested: Route, authenticated: bool) -> Route {
        match (requested.requires_auth(), authenticated) {
            (true, false) => Route::Login,
            (false, true) => Route::Home,
            _ => requested,
        }
    }

    /// Form mode a login/signup page opens in
    pub fn auth_mode(self) -> Option<AuthMode> {
        match self {
            Route::Login => Some(AuthMode::Login),
            Route::Signup => Some(AuthMode::Signup),
            _ => None,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Login => "Login",
            Route::Signup => "Sign Up",
            Route::Profile => "Profile",
            Route::Opportunities => "Opportunities",
            Route::Organizations => "Organizations",
        }
    }
}

/// Trailing button of the navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    Login,
    Logout,
}

pub const NAV_ITEMS: [Route; 5] = [
    Route::Home,
    Route::Profile,
    Route::Opportunities,
    Route::Organizations,
    Route::Signup,
];

pub fn nav_action(authenticated: bool) -> NavAction {
    if authenticated {
        NavAction::Logout
    } else {
        NavAction::Login
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_users_land_on_login() {
        for route in [
            Route::Home,
            Route::Profile,
            Route::Opportunities,
            Route::Organizations,
        ] {
            assert_eq!(Route::resolve(route, false), Route::Login);
            assert_eq!(Route::resolve(route, true), route);
        }
    }

    #[test]
    fn signed_in_users_skip_the_form() {
        assert_eq!(Route::resolve(Route::Login, true), Route::Home);
        assert_eq!(Route::resolve(Route::Signup, true), Route::Home);
        assert_eq!(Route::resolve(Route::Signup, false), Route::Signup);
    }

    #[test]
    fn nav_action_follows_session() {
        assert_eq!(nav_action(true), NavAction::Logout);
        assert_eq!(nav_action(false), NavAction::Login);
        assert_eq!(Route::Signup.auth_mode(), Some(AuthMode::Signup));
    }
}
