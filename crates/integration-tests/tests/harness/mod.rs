#![allow(dead_code)]

pub mod config;
pub mod mock_upstream;
pub mod server;
pub mod sse;
pub mod workflows;
