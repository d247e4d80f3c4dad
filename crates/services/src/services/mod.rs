pub mod auth;
pub mod config;
pub mod database_validator;
pub mod schedule_engine;
pub mod schedules;
pub mod todos;
