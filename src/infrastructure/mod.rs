//! 基础设施：配置、数据库连接池、日志

pub mod config;
pub mod database;
pub mod logger;
