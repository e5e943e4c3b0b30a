pub mod cache;
pub mod point_fetcher;
