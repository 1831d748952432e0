pub mod config;
pub mod db;
pub mod db_models;
pub mod errors;
pub mod payment;
pub mod routes;
pub mod schema;
pub mod startup;
pub mod telemetry;
pub mod validations;
