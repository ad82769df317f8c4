//! Backend paths, relative to the server base URL.

pub const LOGIN: &str = "/login";
pub const SIGNUP: &str = "/signup";
pub const LOGOUT: &str = "/logout";
pub const CHECK_SESSION: &str = "/check_session";
pub const ORGANIZATIONS: &str = "/organization";
pub const OPPORTUNITIES: &str = "/opportunities";
