pub mod config;
pub mod dtos;
pub mod handlers;
pub mod mappers;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod store;
pub mod utils;
pub mod validators;
