pub mod client;
pub mod models;

pub use client::QuickChartClient;
pub use models::ChartError;
