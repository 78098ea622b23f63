//! # HTTP Handlers
//!
//! - [`health`] - liveness
//! - [`auth`] - register / login / me
//! - [`products`] - CRUD plus the ordered, searched and ranked catalog views

pub mod auth;
pub mod health;
pub mod products;
