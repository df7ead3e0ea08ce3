//! Infrastructure adapters. Implement outbound ports.
//!
//! News sources, article pages, LLM, classifier, market data, HTML reports and the
//! terminal UI. Map errors to DomainError.

pub mod ai;
pub mod extraction;
pub mod market;
pub mod news;
pub mod report;
pub mod sentiment;
pub mod ui;
