use axum::extract::{Query, RawQuery};
use axum::http::StatusCode;
use axum::response::Redirect;
use axum::Json;
use contracts::dashboards::find_report;
use contracts::shared::export::EXPORT_ENDPOINT;
use contracts::shared::report::{normalize_rows, ReportColumn, ReportRunRequest, ReportRunResponse};
use contracts::shared::report_filter::{LinkSearchQuery, LinkSuggestion};
use contracts::shared::rpc::RpcResponse;
use serde_json::{json, Value};

use crate::shared::erp::{self, ErpError};

const RUN_REPORT_METHOD: &str = "frappe.desk.query_report.run";
const SEARCH_LINK_METHOD: &str = "frappe.desk.search.search_link";
const LINK_PAGE_LENGTH: u32 = 20;

type ExcResponse = (StatusCode, Json<RpcResponse<()>>);

fn exc(status: StatusCode, message: impl Into<String>) -> ExcResponse {
    (status, Json(RpcResponse::exception(message)))
}

fn host_error(e: ErpError) -> ExcResponse {
    tracing::error!("ERP call failed: {}", e);
    match e {
        ErpError::Remote { message, .. } => exc(StatusCode::EXPECTATION_FAILED, message),
        other => exc(StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    }
}

/// POST /api/reports/run
pub async fn run_report(Json(request): Json<ReportRunRequest>) -> Result<Json<ReportRunResponse>, ExcResponse> {
    let report = match find_report(&request.report_code) {
        Some(Ok(report)) => report,
        Some(Err(e)) => {
            tracing::error!("Report {} has invalid filters: {}", request.report_code, e);
            return Err(exc(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()));
        }
        None => {
            return Err(exc(
                StatusCode::NOT_FOUND,
                format!("Unknown report: {}", request.report_code),
            ))
        }
    };

    let missing = report.filters.missing_required(&request.filters);
    if !missing.is_empty() {
        return Err(exc(
            StatusCode::EXPECTATION_FAILED,
            format!("Missing Filters: {}", missing.join(", ")),
        ));
    }

    // display-only значения тоже уходят в отчёт: по ним выбирается график
    let filters = report.filters.active_values(&request.filters);
    tracing::info!("Running report '{}' with {} filters", report.report_name, filters.len());

    let client = erp::client().map_err(host_error)?;
    let message = client
        .call_method(
            RUN_REPORT_METHOD,
            &json!({ "report_name": report.report_name, "filters": filters }),
        )
        .await
        .map_err(host_error)?;

    Ok(Json(parse_report_message(message)))
}

/// `message` метода run: `{columns, result}`; строки-массивы раскладываются по колонкам
fn parse_report_message(mut message: Value) -> ReportRunResponse {
    let columns: Vec<ReportColumn> = message
        .get_mut("columns")
        .map(Value::take)
        .and_then(|c| serde_json::from_value(c).ok())
        .unwrap_or_default();
    let rows: Vec<Value> = match message.get_mut("result").map(Value::take) {
        Some(Value::Array(rows)) => rows,
        _ => Vec::new(),
    };

    ReportRunResponse {
        result: normalize_rows(&columns, rows),
        columns,
    }
}

/// GET /api/link/search?doctype=&txt=
pub async fn search_link(Query(query): Query<LinkSearchQuery>) -> Result<Json<Vec<LinkSuggestion>>, ExcResponse> {
    if query.doctype.trim().is_empty() {
        return Err(exc(StatusCode::EXPECTATION_FAILED, "doctype is required"));
    }

    let client = erp::client().map_err(host_error)?;
    let message = client
        .call_method(
            SEARCH_LINK_METHOD,
            &json!({
                "doctype": query.doctype,
                "txt": query.txt,
                "page_length": LINK_PAGE_LENGTH,
            }),
        )
        .await
        .map_err(host_error)?;

    Ok(Json(serde_json::from_value(message).unwrap_or_default()))
}

/// GET /api/method/frappe.desk.query_report.export_query
///
/// Файл формирует ERP, браузер уходит туда с той же строкой запроса.
pub async fn export_query(RawQuery(query): RawQuery) -> Result<Redirect, ExcResponse> {
    let client = erp::client().map_err(host_error)?;
    let target = client.absolute_url(EXPORT_ENDPOINT, query.as_deref());
    tracing::info!("Export redirected to {}", target);
    Ok(Redirect::temporary(&target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report_message() {
        let parsed = parse_report_message(json!({
            "columns": [
                {"fieldname": "shipping_company", "label": "Shipping Company", "fieldtype": "Link"},
                "Orders:Int:80"
            ],
            "result": [["DHL", 4], {"shipping_company": "Aramex", "orders": 2}],
            "chart": {}
        }));
        assert_eq!(parsed.columns.len(), 2);
        assert_eq!(parsed.result.len(), 2);
        assert_eq!(parsed.result[0]["orders"], json!(4));
        assert_eq!(parsed.result[1]["shipping_company"], json!("Aramex"));
    }

    #[test]
    fn test_parse_empty_message() {
        let parsed = parse_report_message(Value::Null);
        assert!(parsed.columns.is_empty());
        assert!(parsed.result.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_report() {
        let err = run_report(Json(ReportRunRequest {
            report_code: "d999".into(),
            filters: Default::default(),
        }))
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_required_filters_rejected_before_host_call() {
        let err = run_report(Json(ReportRunRequest {
            report_code: "d411".into(),
            filters: Default::default(),
        }))
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::EXPECTATION_FAILED);
        assert_eq!(
            err.1 .0,
            RpcResponse::exception("Missing Filters: From Date, To Date")
        );
    }
}
