// Library exports for testing and external use

pub mod config;
pub mod dto;
pub mod middleware;
pub mod routes;
pub mod telemetry;
