pub mod app_state;
pub mod auth;
pub mod route;
pub mod settings;

pub use app_state::*;
pub use auth::*;
pub use route::{NAV_ITEMS, NavAction, Route, nav_action};
pub use settings::PersistedSession;
