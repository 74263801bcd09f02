//! Middleware module
//!
//! Request logging for the HTTP surface

pub mod logging;
