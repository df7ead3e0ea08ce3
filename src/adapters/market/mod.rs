//! Market data adapters.

pub mod yahoo;

pub use yahoo::YahooMarketData;
