pub mod ai;
pub mod api;
pub mod app_state;
pub mod config;
pub mod draw;
pub mod services;
pub mod session;

#[cfg(test)]
mod tests;
