// ==========================================
// TalentoPlus 人事管理系统 - 引擎层
// ==========================================
// 职责: 问答意图识别，不拼 SQL
// ==========================================

pub mod query_classifier;

pub use query_classifier::{
    build_classifier, KeywordClassifier, QueryClassifier, RemoteLlmClassifier, RemoteLlmConfig,
};
