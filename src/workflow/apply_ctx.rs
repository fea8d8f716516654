//! 职位申请上下文
//!
//! 封装"我正在处理第几个职位"这一信息

use std::fmt::Display;

/// 职位申请上下文
#[derive(Debug, Clone, Copy)]
pub struct ApplyCtx {
    /// 职位序号（从1开始，仅用于日志显示）
    pub job_index: usize,

    /// 本批次计划申请的职位数
    pub total: usize,
}

impl ApplyCtx {
    pub fn new(job_index: usize, total: usize) -> Self {
        Self { job_index, total }
    }
}

impl Display for ApplyCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[职位 {}/{}]", self.job_index, self.total)
    }
}
