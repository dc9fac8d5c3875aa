use contracts::shared::report::{ReportRunRequest, ReportRunResponse};
use contracts::shared::report_filter::LinkSuggestion;

use crate::shared::api_utils::{get_json, post_json};

pub async fn run_report(request: &ReportRunRequest) -> Result<ReportRunResponse, String> {
    post_json("/api/reports/run", request).await
}

/// Варианты для поля Link
pub async fn search_link(doctype: &str, txt: &str) -> Result<Vec<LinkSuggestion>, String> {
    get_json(&format!(
        "/api/link/search?doctype={}&txt={}",
        urlencoding::encode(doctype),
        urlencoding::encode(txt)
    ))
    .await
}
