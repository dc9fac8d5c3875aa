use contracts::usecases::u510_sync_customers_from_excel::UploadedFile;
use std::path::Path;

use super::error::SyncError;

/// Подкаталог публичных файлов для загрузок
pub const FILES_DIR: &str = "files";

/// Безопасное имя файла: только последний компонент пути,
/// символы вне `[A-Za-z0-9._-]` заменяются на `_`
pub fn sanitize_file_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "upload".to_string()
    } else {
        cleaned
    }
}

/// Имя, которого ещё нет в каталоге: при совпадении к имени добавляется
/// короткий суффикс
fn unique_name(dir: &Path, name: &str) -> String {
    if !dir.join(name).exists() {
        return name.to_string();
    }
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    let suffix = &suffix[..8];
    match name.rsplit_once('.') {
        Some((stem, ext)) => format!("{}-{}.{}", stem, suffix, ext),
        None => format!("{}-{}", name, suffix),
    }
}

/// Сохранить загруженный файл в `<public_dir>/files`
pub async fn save_upload(
    public_dir: &Path,
    original_name: &str,
    bytes: &[u8],
) -> Result<UploadedFile, SyncError> {
    if bytes.is_empty() {
        return Err(SyncError::EmptyUpload);
    }

    let dir = public_dir.join(FILES_DIR);
    tokio::fs::create_dir_all(&dir).await?;

    let file_name = unique_name(&dir, &sanitize_file_name(original_name));
    tokio::fs::write(dir.join(&file_name), bytes).await?;

    tracing::info!("Saved upload {} ({} bytes)", file_name, bytes.len());
    Ok(UploadedFile {
        file_url: format!("/{}/{}", FILES_DIR, file_name),
        file_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("orders_export.xlsx"), "orders_export.xlsx");
        assert_eq!(sanitize_file_name("C:\\Users\\me\\Orders May.csv"), "Orders_May.csv");
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name(".hidden"), "hidden");
        assert_eq!(sanitize_file_name(""), "upload");
    }

    #[tokio::test]
    async fn test_save_upload_keeps_existing_files() {
        let dir = tempfile::tempdir().unwrap();

        let first = save_upload(dir.path(), "orders.csv", b"Id\n1\n").await.unwrap();
        assert_eq!(first.file_url, "/files/orders.csv");
        assert_eq!(first.file_name, "orders.csv");

        let second = save_upload(dir.path(), "orders.csv", b"Id\n2\n").await.unwrap();
        assert_ne!(second.file_name, "orders.csv");
        assert!(second.file_name.starts_with("orders-") && second.file_name.ends_with(".csv"));

        let first_contents = std::fs::read_to_string(dir.path().join("files/orders.csv")).unwrap();
        assert_eq!(first_contents, "Id\n1\n");
    }

    #[tokio::test]
    async fn test_empty_upload_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            save_upload(dir.path(), "a.csv", b"").await,
            Err(SyncError::EmptyUpload)
        ));
    }
}
