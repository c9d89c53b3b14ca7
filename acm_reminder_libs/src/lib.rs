pub mod crawler;
pub mod fetch;
pub mod parsers;
pub mod types;
