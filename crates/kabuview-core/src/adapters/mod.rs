//! Provider adapters implementing [`MarketDataSource`](crate::MarketDataSource).

mod yahoo;

pub use yahoo::YahooAdapter;
