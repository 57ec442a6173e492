// ==========================================
// 灌溉排程系统 - 气象观测 API
// ==========================================

use std::sync::Arc;
use tracing::info;

use crate::api::error::ApiResult;
use crate::domain::WeatherObservation;
use crate::repository::WeatherRepository;

// ==========================================
// WeatherApi - ET0 观测 API
// ==========================================
pub struct WeatherApi {
    weather_repo: Arc<WeatherRepository>,
}

impl WeatherApi {
    pub fn new(weather_repo: Arc<WeatherRepository>) -> Self {
        Self { weather_repo }
    }

    /// 保存 ET0 (同日期覆盖)
    pub fn save_observation(&self, date: &str, et0: f64) -> ApiResult<WeatherObservation> {
        let observation = WeatherObservation::new(date, et0)?;
        self.weather_repo.upsert(&observation)?;
        info!(date, et0, "保存 ET0");
        Ok(observation)
    }

    pub fn get_observation(&self, date: &str) -> ApiResult<Option<WeatherObservation>> {
        Ok(self.weather_repo.find_by_date(date)?)
    }

    /// 按日期集合查询 (日期升序,缺失日期不返回)
    pub fn get_observations(&self, dates: &[String]) -> ApiResult<Vec<WeatherObservation>> {
        Ok(self.weather_repo.find_by_dates(dates)?)
    }

    /// 全部观测 (日期升序)
    pub fn list_observations(&self) -> ApiResult<Vec<WeatherObservation>> {
        Ok(self.weather_repo.list_all()?)
    }
}
