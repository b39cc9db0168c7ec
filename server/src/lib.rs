pub mod config;
pub mod environment;
pub mod errors;
pub mod location;
pub mod review;
pub mod routes;
pub mod sentiment;
pub mod store;
