pub mod abstract_trait;
pub mod config;
pub mod database;
pub mod di;
pub mod domain;
pub mod filter;
pub mod handler;
pub mod middleware;
pub mod model;
pub mod repository;
pub mod service;
pub mod state;
