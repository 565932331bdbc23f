// ==========================================
// TalentoPlus 人事管理系统 - 问题分类引擎
// ==========================================
// 职责: 将自然语言问题归类为 QueryIntent
// 红线: 不访问数据库，分类失败一律降级为本地关键词分类
// ==========================================

use crate::domain::dashboard::{QueryIntent, STATUS_ACTIVE, STATUS_INACTIVE, STATUS_VACATION};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_LLM_ENDPOINT: &str =
    "https://generativelanguage.googleapis.com/v1beta/models/gemini-pro:generateContent";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 15;

// ==========================================
// QueryClassifier Trait
// ==========================================
#[async_trait]
pub trait QueryClassifier: Send + Sync {
    /// 分类问题（不返回错误：所有失败都在内部降级）
    async fn classify(&self, question: &str) -> QueryIntent;
}

// ==========================================
// KeywordClassifier - 本地关键词分类
// ==========================================
// 匹配顺序即优先级；"inactivo" 必须先于 "activo"
#[derive(Debug, Clone, Default)]
pub struct KeywordClassifier;

const STATUS_KEYWORDS: &[(&str, &str)] = &[
    ("vacaciones", STATUS_VACATION),
    ("inactivo", STATUS_INACTIVE),
    ("activo", STATUS_ACTIVE),
    ("licencia", "Licencia"),
];

const DEPARTMENT_KEYWORDS: &[(&str, &str)] = &[
    ("tecnología", "Tecnología"),
    ("tecnologia", "Tecnología"),
    ("recursos humanos", "Recursos Humanos"),
    ("rrhh", "Recursos Humanos"),
    ("finanzas", "Finanzas"),
    ("marketing", "Marketing"),
    ("operaciones", "Operaciones"),
];

const POSITION_KEYWORDS: &[(&str, &str)] = &[
    ("auxiliar", "Auxiliar"),
    ("analista", "Analista"),
    ("coordinador", "Coordinador"),
    ("gerente", "Gerente"),
    ("director", "Director"),
];

impl KeywordClassifier {
    pub fn new() -> Self {
        Self
    }

    /// 同步分类（供远程分类降级直接调用）
    pub fn classify_text(&self, question: &str) -> QueryIntent {
        let lower = question.to_lowercase();

        let asks_total = lower.contains("total")
            || (lower.contains("cuántos")
                && lower.contains("empleados")
                && !lower.contains("departamento")
                && !lower.contains("estado"));
        if asks_total {
            return QueryIntent::TotalEmployees;
        }

        if let Some(filter) = first_match(&lower, STATUS_KEYWORDS) {
            return QueryIntent::StatusCount(filter);
        }
        if let Some(filter) = first_match(&lower, DEPARTMENT_KEYWORDS) {
            return QueryIntent::DepartmentCount(filter);
        }
        if let Some(filter) = first_match(&lower, POSITION_KEYWORDS) {
            return QueryIntent::PositionCount(filter);
        }

        QueryIntent::Unknown
    }
}

fn first_match(lower: &str, table: &[(&str, &str)]) -> Option<String> {
    table
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, canonical)| canonical.to_string())
}

#[async_trait]
impl QueryClassifier for KeywordClassifier {
    async fn classify(&self, question: &str) -> QueryIntent {
        self.classify_text(question)
    }
}

// ==========================================
// RemoteLlmClassifier - 远程大模型分类
// ==========================================
#[derive(Debug, Clone)]
pub struct RemoteLlmConfig {
    /// 为空时不发起远程调用
    pub api_key: Option<String>,
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for RemoteLlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: DEFAULT_LLM_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
        }
    }
}

pub struct RemoteLlmClassifier {
    config: RemoteLlmConfig,
    client: reqwest::Client,
    fallback: KeywordClassifier,
}

impl RemoteLlmClassifier {
    pub fn new(config: RemoteLlmConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                warn!(error = %e, "HTTP 客户端构建失败，使用默认客户端");
                reqwest::Client::new()
            });

        Self {
            config,
            client,
            fallback: KeywordClassifier::new(),
        }
    }

    fn build_prompt(question: &str) -> String {
        format!(
            "Analyze this question about an employee management system and classify it.\n\
             Question: {question}\n\n\
             Return ONLY one of these categories:\n\
             - TOTAL_EMPLOYEES (questions about total count)\n\
             - STATUS_COUNT (questions about employee status like active, inactive, vacation)\n\
             - DEPARTMENT_COUNT (questions about employees in a department)\n\
             - POSITION_COUNT (questions about employees in a position/role)\n\
             - UNKNOWN (if you can't classify)\n\n\
             Also extract the relevant filter value if present (like department name, status, or position).\n\
             Format: CATEGORY|FILTER_VALUE\n\
             Example: DEPARTMENT_COUNT|Tecnología"
        )
    }

    /// 调用远程接口，返回模型输出文本
    async fn request_label(&self, api_key: &str, question: &str) -> Result<String, String> {
        let body = json!({
            "contents": [
                { "parts": [ { "text": Self::build_prompt(question) } ] }
            ]
        });

        let response = self
            .client
            .post(&self.config.endpoint)
            .query(&[("key", api_key)])
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("请求失败: {}", e))?;

        if !response.status().is_success() {
            return Err(format!("远程状态码: {}", response.status()));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| format!("响应解析失败: {}", e))?;

        extract_candidate_text(&payload).ok_or_else(|| "响应缺少 candidates 文本".to_string())
    }
}

/// 取 candidates[0].content.parts[0].text
fn extract_candidate_text(payload: &Value) -> Option<String> {
    payload
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[async_trait]
impl QueryClassifier for RemoteLlmClassifier {
    async fn classify(&self, question: &str) -> QueryIntent {
        let api_key = match self.config.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => key,
            _ => return self.fallback.classify_text(question),
        };

        match self.request_label(api_key, question).await {
            Ok(text) => match QueryIntent::parse(&text) {
                Some(intent) => {
                    debug!(label = %text.trim(), "远程分类成功");
                    intent
                }
                None => {
                    warn!(label = %text.trim(), "远程分类结果不可识别，降级为关键词分类");
                    self.fallback.classify_text(question)
                }
            },
            Err(reason) => {
                warn!(reason = %reason, "远程分类失败，降级为关键词分类");
                self.fallback.classify_text(question)
            }
        }
    }
}

/// 按配置选择分类器：有 API Key 时使用远程分类，否则本地关键词
pub fn build_classifier(config: RemoteLlmConfig) -> Arc<dyn QueryClassifier> {
    let has_key = config
        .api_key
        .as_deref()
        .map(|k| !k.trim().is_empty())
        .unwrap_or(false);

    if has_key {
        Arc::new(RemoteLlmClassifier::new(config))
    } else {
        Arc::new(KeywordClassifier::new())
    }
}
