//! UI layer: app shell, product form, and result presentation.

pub mod app;

pub use app::PredictApp;
