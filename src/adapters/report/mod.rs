//! Report adapters. Render a ticker report to a file.

pub mod html_dashboard;

pub use html_dashboard::HtmlDashboard;
