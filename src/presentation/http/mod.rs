pub mod controllers;
pub mod error;
pub mod extractors;
pub mod live;
pub mod openapi;
pub mod routes;
pub mod state;
