// ==========================================
// TalentoPlus 人事管理系统 - 主入口
// ==========================================
// 用法: talento-plus [问题]
// 初始化数据库与种子数据，输出仪表盘统计；给出问题时同时输出问答结果
// ==========================================

use anyhow::Context;
use talento_plus::app::{get_default_db_path, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    talento_plus::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 人事管理系统", talento_plus::APP_NAME);
    tracing::info!("系统版本: {}", talento_plus::VERSION);
    tracing::info!("==================================================");

    let db_path = get_default_db_path();
    tracing::info!(db_path = %db_path, "使用数据库");

    let app_state = AppState::new(db_path)
        .map_err(anyhow::Error::msg)
        .context("无法初始化AppState")?;

    let summary = app_state.dashboard_api.summary()?;
    println!("{}", serde_json::to_string_pretty(&summary)?);

    let question = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if !question.trim().is_empty() {
        let answer = app_state.dashboard_api.ask(&question).await;
        println!("{}", serde_json::to_string_pretty(&answer)?);
    }

    Ok(())
}
