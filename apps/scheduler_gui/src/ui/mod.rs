//! UI layer: app shell, form and results rendering, toasts and theme.

pub mod app;
pub mod form;
pub mod results;
pub mod theme;
pub mod toasts;

pub use app::SchedulerApp;
