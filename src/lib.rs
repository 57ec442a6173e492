// ==========================================
// 灌溉排程系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 地块 / ET0 气象 / ETc 计算的持久化与派生
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与校验
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - ETc 计算与重算编排
pub mod engine;

// 报表层 - 表格格式化
pub mod report;

// API 层 - 业务接口
pub mod api;

// 配置层 - 运行配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 应用层 - 交互式菜单
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{EtcRecord, EtcResults, Field, ValidationError, WeatherObservation};

// 引擎
pub use engine::{EtcCalculator, EtcRecalcEngine, RecalcError, RecalcOutcome};

// API
pub use api::{ApiError, EtcApi, FieldApi, WeatherApi};

// 报表
pub use report::format_etc_table;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Irrigation Scheduling Application";
