mod app;
mod login;
mod nav_bar;
mod pages;

pub use app::ServiceSquadApp;
