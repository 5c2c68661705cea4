//! Proxy response types and their display model

mod proxy;
mod view;

pub use proxy::{ProxyResponse, ProxySuccess};
pub use view::{ResponseView, StatusClass, SuccessView, present, safe_stringify};
