//! 数据模型模块

pub mod todo;
pub mod user;
