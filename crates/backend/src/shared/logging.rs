use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "info,hyper=warn,reqwest=warn";

/// Инициализация tracing: консоль (с цветами) и target/logs/backend.log (без цветов)
pub fn initialize() -> anyhow::Result<()> {
    let log_dir = std::path::Path::new("target").join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_dir.join("backend.log"))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::sync::Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    Ok(())
}

/// Размер с разделителями триад: 1234567 -> "1.234.567"
pub fn group_digits(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// Строка журнала запросов: время | длительность | размер | статус метод путь
fn request_line(status: u16, method: &str, path: &str, millis: u128, size: Option<usize>) -> String {
    let size = size.map(group_digits).unwrap_or_else(|| "error".to_string());
    // голубой для 2xx, коричневый для остального
    let color = if (200..300).contains(&status) { "36" } else { "33" };
    format!(
        "\x1b[{}m{}\x1b[0m | {:>5}ms | {:>12} | {} {:>6} {}",
        color,
        chrono::Local::now().format("%H:%M:%S"),
        millis,
        size,
        status,
        method,
        path
    )
}

/// Middleware: печатает каждый запрос с реальным размером тела ответа.
///
/// Редиректы и файлы из ServeDir тоже проходят через него.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();

    match to_bytes(body, usize::MAX).await {
        Ok(bytes) => {
            println!(
                "{}",
                request_line(
                    parts.status.as_u16(),
                    method.as_str(),
                    &path,
                    start.elapsed().as_millis(),
                    Some(bytes.len()),
                )
            );
            Response::from_parts(parts, Body::from(bytes))
        }
        Err(e) => {
            tracing::warn!("Failed to read response body for {} {}: {}", method, path, e);
            println!(
                "{}",
                request_line(
                    parts.status.as_u16(),
                    method.as_str(),
                    &path,
                    start.elapsed().as_millis(),
                    None,
                )
            );
            Response::from_parts(parts, Body::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1000), "1.000");
        assert_eq!(group_digits(1234567), "1.234.567");
    }

    #[test]
    fn test_request_line_marks_failures() {
        let line = request_line(417, "POST", "/api/method/x", 12, None);
        assert!(line.starts_with("\x1b[33m"));
        assert!(line.contains("error"));
        assert!(line.ends_with("/api/method/x"));

        let line = request_line(200, "GET", "/health", 1, Some(2));
        assert!(line.starts_with("\x1b[36m"));
    }
}
