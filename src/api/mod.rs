pub mod quickchart;
pub mod vang_today;
