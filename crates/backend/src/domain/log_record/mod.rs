pub mod filter;
pub mod parser;
pub mod repository;
pub mod service;
