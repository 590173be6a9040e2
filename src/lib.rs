pub mod config;
pub mod crawler;
pub mod extractor;
pub mod fetcher;
pub mod runner;
pub mod store;
