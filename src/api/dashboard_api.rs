// ==========================================
// TalentoPlus 人事管理系统 - 仪表盘 API
// ==========================================
// 职责: 员工统计卡片 + 自然语言问答
// 架构: API 层 → QueryClassifier（意图识别）→ EmployeeStore（计数）
// ==========================================

use std::sync::Arc;

use tracing::{debug, error, info, instrument};

use crate::api::error::ApiResult;
use crate::domain::catalog::CatalogKind;
use crate::domain::dashboard::{
    AiAnswer, DashboardSummary, QueryIntent, STATUS_ACTIVE, STATUS_INACTIVE, STATUS_VACATION,
};
use crate::engine::QueryClassifier;
use crate::i18n::{t, t_with_args};
use crate::repository::{EmployeeStore, RepositoryResult};

// ==========================================
// DashboardApi - 仪表盘 API
// ==========================================
pub struct DashboardApi {
    employees: Arc<dyn EmployeeStore>,
    /// 意图识别（远程 LLM 或本地关键词）
    classifier: Arc<dyn QueryClassifier>,
}

impl DashboardApi {
    pub fn new(employees: Arc<dyn EmployeeStore>, classifier: Arc<dyn QueryClassifier>) -> Self {
        Self {
            employees,
            classifier,
        }
    }

    /// 统计卡片：总数 / 休假 / 在职 / 离职
    ///
    /// 状态按名称大小写不敏感相等匹配
    pub fn summary(&self) -> ApiResult<DashboardSummary> {
        let by_status =
            |name: &str| self.employees.count_by_catalog_name(CatalogKind::EmployeeStatus, name);

        Ok(DashboardSummary {
            total_employees: self.employees.count_all()?,
            employees_on_vacation: by_status(STATUS_VACATION)?,
            active_employees: by_status(STATUS_ACTIVE)?,
            inactive_employees: by_status(STATUS_INACTIVE)?,
        })
    }

    /// 自然语言问答
    ///
    /// 存储失败不向上抛出，而是返回 success=false 的回答
    #[instrument(skip(self))]
    pub async fn ask(&self, question: &str) -> AiAnswer {
        let intent = self.classifier.classify(question).await;
        debug!(intent = %intent.to_wire(), "问题意图识别完成");

        match self.answer_for(&intent) {
            Ok(answer) => {
                info!(intent = %intent.to_wire(), "问答完成");
                AiAnswer {
                    question: question.to_string(),
                    answer,
                    success: true,
                }
            }
            Err(e) => {
                error!(error = %e, "问答查询失败");
                AiAnswer {
                    question: question.to_string(),
                    answer: t_with_args("dashboard.query_failed", &[("error", &e.to_string())]),
                    success: false,
                }
            }
        }
    }

    fn answer_for(&self, intent: &QueryIntent) -> RepositoryResult<String> {
        let counted = |key: &str, kind: CatalogKind, filter: &str| -> RepositoryResult<String> {
            let count = self.employees.count_by_catalog_name(kind, filter)?;
            Ok(t_with_args(
                key,
                &[("count", &count.to_string()), ("filter", filter)],
            ))
        };

        match intent {
            QueryIntent::TotalEmployees => {
                let count = self.employees.count_all()?;
                Ok(t_with_args(
                    "dashboard.total_employees",
                    &[("count", &count.to_string())],
                ))
            }
            QueryIntent::StatusCount(filter) => {
                counted("dashboard.status_count", CatalogKind::EmployeeStatus, filter)
            }
            QueryIntent::DepartmentCount(filter) => {
                counted("dashboard.department_count", CatalogKind::Department, filter)
            }
            QueryIntent::PositionCount(filter) => {
                counted("dashboard.position_count", CatalogKind::Position, filter)
            }
            QueryIntent::Unknown => Ok(t("dashboard.unknown")),
        }
    }
}
