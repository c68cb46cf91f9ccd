//! API handlers for Lubritrack REST endpoints

pub mod equipment;
pub mod health;
pub mod lubrication;
pub mod openapi;
pub mod plans;
pub mod users;
