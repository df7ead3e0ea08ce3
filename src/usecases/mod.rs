//! Application use cases. Orchestrate domain logic via ports.

pub mod article_service;
pub mod dashboard_service;
pub mod sentiment_service;

pub use article_service::ArticleService;
pub use dashboard_service::DashboardService;
pub use sentiment_service::SentimentService;
