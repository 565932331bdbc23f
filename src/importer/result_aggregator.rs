// ==========================================
// TalentoPlus 人事管理系统 - 导入结果汇总器
// ==========================================
// 约束: 计数器单调递增，错误列表只追加
// ==========================================

use crate::domain::import::ImportSummary;

/// 单行处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Inserted,
    Updated,
    Failed(String),
}

#[derive(Debug, Default)]
pub struct ImportTally {
    total_rows: usize,
    imported_rows: usize,
    updated_rows: usize,
    error_rows: usize,
    errors: Vec<String>,
}

impl ImportTally {
    /// total_rows 为表头之后的物理行数
    pub fn new(total_rows: usize) -> Self {
        Self {
            total_rows,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: RowOutcome) {
        match outcome {
            RowOutcome::Inserted => self.imported_rows += 1,
            RowOutcome::Updated => self.updated_rows += 1,
            RowOutcome::Failed(message) => {
                self.error_rows += 1;
                self.errors.push(message);
            }
        }
    }

    /// 仅当有错误且没有任何行写入成功时判定失败
    pub fn finalize(self) -> ImportSummary {
        let success =
            !(self.error_rows > 0 && self.imported_rows == 0 && self.updated_rows == 0);

        ImportSummary {
            success,
            total_rows: self.total_rows,
            imported_rows: self.imported_rows,
            updated_rows: self.updated_rows,
            error_rows: self.error_rows,
            errors: self.errors,
        }
    }
}
