#![forbid(unsafe_code)]

pub mod cfg;
pub mod handlers;
pub mod program;
