//! HTTP API - routes, handlers and form parsing

pub mod form;
pub mod handlers;
pub mod routes;
