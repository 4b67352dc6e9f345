//! Request handlers, one module per resource.

pub mod employees;
pub mod stats;
