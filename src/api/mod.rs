// ==========================================
// 灌溉排程系统 - API 层
// ==========================================
// 职责: 面向交互前端的业务接口
// ==========================================

pub mod error;
pub mod etc_api;
pub mod field_api;
pub mod weather_api;

pub use error::{ApiError, ApiResult};
pub use etc_api::{EtcApi, EtcTableView};
pub use field_api::FieldApi;
pub use weather_api::WeatherApi;
