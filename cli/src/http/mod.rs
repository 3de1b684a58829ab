//! HTTP服务器模块 - 暴露列表与条目操作的 REST 风格 API

pub mod middleware;
pub mod models;
pub mod params;
pub mod routes;
pub mod server;
pub mod state;
pub mod validation;

pub use models::*;
pub use server::*;
pub use state::*;
