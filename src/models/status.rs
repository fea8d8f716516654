use serde::{Deserialize, Serialize};

/// 单次申请的终态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplyStatus {
    /// 已点击提交
    Success,
    /// 过程中出现故障
    Failed,
    /// 未找到申请按钮，需要人工申请
    ManualRequired,
    /// 表单已打开但未找到提交按钮
    Partial,
}

impl ApplyStatus {
    pub const ALL: [ApplyStatus; 4] = [
        ApplyStatus::Success,
        ApplyStatus::Failed,
        ApplyStatus::ManualRequired,
        ApplyStatus::Partial,
    ];

    /// 写入日志时使用的标识
    pub fn as_str(self) -> &'static str {
        match self {
            ApplyStatus::Success => "success",
            ApplyStatus::Failed => "failed",
            ApplyStatus::ManualRequired => "manual_required",
            ApplyStatus::Partial => "partial",
        }
    }
}

impl std::fmt::Display for ApplyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 批量申请统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub success: usize,
    pub failed: usize,
    pub manual_required: usize,
    pub partial: usize,
}

impl BatchSummary {
    pub fn record(&mut self, status: ApplyStatus) {
        *self.slot(status) += 1;
    }

    pub fn count(&self, status: ApplyStatus) -> usize {
        match status {
            ApplyStatus::Success => self.success,
            ApplyStatus::Failed => self.failed,
            ApplyStatus::ManualRequired => self.manual_required,
            ApplyStatus::Partial => self.partial,
        }
    }

    /// 已尝试的职位总数
    pub fn total(&self) -> usize {
        ApplyStatus::ALL.iter().map(|s| self.count(*s)).sum()
    }

    fn slot(&mut self, status: ApplyStatus) -> &mut usize {
        match status {
            ApplyStatus::Success => &mut self.success,
            ApplyStatus::Failed => &mut self.failed,
            ApplyStatus::ManualRequired => &mut self.manual_required,
            ApplyStatus::Partial => &mut self.partial,
        }
    }
}
