//! 延迟策略 - 业务能力层
//!
//! 在浏览器操作之间、职位之间插入有界的随机等待，降低被识别为自动化的风险。

use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;
use tracing::debug;

use crate::error::DelayError;

/// 已校验的延迟区间（秒），保证 0 ≤ min ≤ max
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayRange {
    min: f64,
    max: f64,
}

impl DelayRange {
    /// 创建延迟区间
    ///
    /// 非有限值、负数、min > max 或超出 `Duration` 表示范围都返回 `DelayError::InvalidRange`
    pub fn new(min: f64, max: f64) -> Result<Self, DelayError> {
        if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
            return Err(DelayError::InvalidRange { min, max });
        }
        if Duration::try_from_secs_f64(max).is_err() {
            return Err(DelayError::InvalidRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// 在区间内均匀抽取一个时长
    pub fn sample(&self) -> Duration {
        let secs = if self.min == self.max {
            self.min
        } else {
            rand::thread_rng().gen_range(self.min..=self.max)
        };
        Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
    }

    /// 按区间随机等待
    pub async fn pause(&self) {
        let wait = self.sample();
        debug!("⏳ 随机等待 {:.2} 秒", wait.as_secs_f64());
        sleep(wait).await;
    }
}

/// 在 `[min_sec, max_sec]` 内随机等待
pub async fn delay(min_sec: f64, max_sec: f64) -> Result<(), DelayError> {
    DelayRange::new(min_sec, max_sec)?.pause().await;
    Ok(())
}

/// 固定等待（页面/表单渲染稳定时间）
pub async fn settle(secs: f64) {
    let wait = settle_duration(secs);
    debug!("⏳ 等待页面稳定 {:.2} 秒", wait.as_secs_f64());
    sleep(wait).await;
}

/// 非正数和 NaN 视为 0，过大的值截断到 `Duration::MAX`
fn settle_duration(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}
