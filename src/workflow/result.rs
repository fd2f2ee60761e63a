//! 工作流结果

use serde::Serialize;
use std::fmt::Display;

use crate::error::Failure;
use crate::models::{DocumentRecord, Submission};

/// 工作流步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowStep {
    Submit,
    Fetch,
}

impl Display for WorkflowStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            WorkflowStep::Submit => "上传识别",
            WorkflowStep::Fetch => "获取文档",
        };
        f.write_str(name)
    }
}

/// 工作流成功时的完整输出
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowOutcome {
    pub submission: Submission,
    /// 服务端未返回文档ID时为 `None`
    pub document: Option<DocumentRecord>,
    /// 渲染好的报告
    pub report: String,
    pub image_saved: bool,
}

/// 工作流结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum WorkflowResult {
    Success(WorkflowOutcome),
    Failure { step: WorkflowStep, error: Failure },
}

impl WorkflowResult {
    pub fn is_success(&self) -> bool {
        matches!(self, WorkflowResult::Success(_))
    }

    pub fn outcome(&self) -> Option<&WorkflowOutcome> {
        match self {
            WorkflowResult::Success(outcome) => Some(outcome),
            WorkflowResult::Failure { .. } => None,
        }
    }

    /// 失败时返回失败的步骤与原因
    pub fn failure(&self) -> Option<(WorkflowStep, &Failure)> {
        match self {
            WorkflowResult::Success(_) => None,
            WorkflowResult::Failure { step, error } => Some((*step, error)),
        }
    }
}
