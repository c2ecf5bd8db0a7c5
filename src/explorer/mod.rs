pub mod gui;
pub mod logic;
pub mod model;

pub use gui::DashboardApp;
