//! Диалог импорта клиентов Shopify как конечный автомат.
//!
//! ```text
//! Idle -> Collecting -> Submitting -> Completed | Failed -> Idle
//! ```
//!
//! Сам HTTP-вызов выполняет вызывающая сторона между [`submit`] и
//! [`resolve`]; автомат отвечает за диалог, прогресс, блокировку формы
//! и итоговые уведомления.
//!
//! [`submit`]: CustomerImportWorkflow::submit
//! [`resolve`]: CustomerImportWorkflow::resolve

use thiserror::Error;

use super::request::SyncCustomersRequest;
use super::response::ImportResult;
use crate::shared::i18n::{tr, Translator};
use crate::shared::notice::{
    DialogField, DialogFieldType, DialogService, DialogSpec, Indicator, Notice, NoticeService,
};
use crate::shared::rpc::RpcResponse;

/// Сколько строк с ошибками показывать во втором уведомлении
pub const MAX_ERROR_DETAILS: usize = 10;

/// Имя поля с файлом в диалоге
pub const FILE_FIELD: &str = "file";

pub const ACCEPTED_EXTENSIONS: [&str; 2] = [".xlsx", ".csv"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportDialogState {
    Idle,
    /// Диалог открыт, ждём выбор файла
    Collecting,
    /// Запрос отправлен, форма заблокирована
    Submitting,
    Completed(ImportResult),
    Failed(String),
}

impl ImportDialogState {
    pub fn name(&self) -> &'static str {
        match self {
            ImportDialogState::Idle => "idle",
            ImportDialogState::Collecting => "collecting",
            ImportDialogState::Submitting => "submitting",
            ImportDialogState::Completed(_) => "completed",
            ImportDialogState::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportDialogError {
    #[error("Excel File (.xlsx or .csv) is required")]
    MissingFile,
    #[error("unsupported file '{0}', expected .xlsx or .csv")]
    UnsupportedFile(String),
    #[error("cannot {action} while the import dialog is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

pub struct CustomerImportWorkflow<T, N, D> {
    translator: T,
    notices: N,
    dialogs: D,
    state: ImportDialogState,
}

impl<T, N, D> CustomerImportWorkflow<T, N, D>
where
    T: Translator,
    N: NoticeService,
    D: DialogService,
{
    pub fn new(translator: T, notices: N, dialogs: D) -> Self {
        Self {
            translator,
            notices,
            dialogs,
            state: ImportDialogState::Idle,
        }
    }

    pub fn state(&self) -> &ImportDialogState {
        &self.state
    }

    pub fn dialog_spec(&self) -> DialogSpec {
        let t = &self.translator;
        DialogSpec {
            title: t.translate("Import Shopify Customer Data (Excel)"),
            fields: vec![DialogField {
                fieldname: FILE_FIELD.to_string(),
                fieldtype: DialogFieldType::Attach,
                label: t.translate("Excel File (.xlsx or .csv)"),
                required: true,
                accept: ACCEPTED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
            }],
            primary_action_label: t.translate("Upload & Sync"),
        }
    }

    /// Idle -> Collecting: открыть диалог выбора файла
    pub fn open(&mut self) -> Result<(), ImportDialogError> {
        self.expect_state("open", |s| matches!(s, ImportDialogState::Idle))?;
        let spec = self.dialog_spec();
        self.dialogs.open(&spec);
        self.state = ImportDialogState::Collecting;
        Ok(())
    }

    /// Collecting -> Submitting: скрыть диалог, показать прогресс,
    /// заблокировать форму. Возвращает запрос для отправки.
    ///
    /// Без файла запрос не формируется, диалог остаётся открытым.
    pub fn submit(&mut self, file_url: Option<&str>) -> Result<SyncCustomersRequest, ImportDialogError> {
        self.expect_state("submit", |s| matches!(s, ImportDialogState::Collecting))?;

        let file_url = file_url
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .ok_or(ImportDialogError::MissingFile)?;
        if !has_accepted_extension(file_url) {
            return Err(ImportDialogError::UnsupportedFile(file_url.to_string()));
        }

        self.dialogs.hide();
        self.notices.show_progress(
            &self.translator.translate("Syncing customers"),
            &self.translator.translate("Uploading file"),
        );
        self.dialogs.set_frozen(true);
        self.state = ImportDialogState::Submitting;

        Ok(SyncCustomersRequest {
            file_url: file_url.to_string(),
        })
    }

    /// Submitting -> Completed | Failed.
    ///
    /// `Err` во входе — сетевая ошибка или ответ, который не удалось
    /// разобрать; обрабатывается так же, как `exc` от сервера.
    pub fn resolve(
        &mut self,
        outcome: Result<RpcResponse<ImportResult>, String>,
    ) -> Result<&ImportDialogState, ImportDialogError> {
        self.expect_state("resolve", |s| matches!(s, ImportDialogState::Submitting))?;

        self.dialogs.set_frozen(false);
        self.notices.hide_progress();

        let outcome = outcome.and_then(RpcResponse::into_result);
        self.state = match outcome {
            Ok(result) => {
                self.notices
                    .msgprint(Notice::plain(summary_message(&self.translator, &result)));
                if let Some(details) = error_details(&result) {
                    self.notices.msgprint(
                        Notice::plain(details)
                            .with_title(self.translator.translate("Some rows failed"))
                            .with_indicator(Indicator::Orange),
                    );
                }
                ImportDialogState::Completed(result)
            }
            Err(exc) => {
                self.notices.msgprint(
                    Notice::plain(exc.clone())
                        .with_title(self.translator.translate("Error"))
                        .with_indicator(Indicator::Red),
                );
                ImportDialogState::Failed(exc)
            }
        };

        Ok(&self.state)
    }

    /// Completed | Failed -> Idle. Для повторного импорта диалог
    /// открывается заново.
    pub fn reset(&mut self) -> Result<(), ImportDialogError> {
        self.expect_state("reset", |s| {
            matches!(s, ImportDialogState::Completed(_) | ImportDialogState::Failed(_))
        })?;
        self.state = ImportDialogState::Idle;
        Ok(())
    }

    /// Закрытие диалога без отправки (Collecting -> Idle)
    pub fn cancel(&mut self) -> Result<(), ImportDialogError> {
        self.expect_state("cancel", |s| matches!(s, ImportDialogState::Collecting))?;
        self.dialogs.hide();
        self.state = ImportDialogState::Idle;
        Ok(())
    }

    fn expect_state(
        &self,
        action: &'static str,
        allowed: impl Fn(&ImportDialogState) -> bool,
    ) -> Result<(), ImportDialogError> {
        if allowed(&self.state) {
            Ok(())
        } else {
            Err(ImportDialogError::InvalidTransition {
                action,
                state: self.state.name(),
            })
        }
    }
}

/// "Sync complete. Updated N orders." [+ " Skipped M rows."]
pub fn summary_message(translator: &dyn Translator, result: &ImportResult) -> String {
    let mut msg = tr(
        translator,
        "Sync complete. Updated {0} orders.",
        &[result.updated.to_string()],
    );
    if result.skipped > 0 {
        msg.push(' ');
        msg.push_str(&tr(translator, "Skipped {0} rows.", &[result.skipped.to_string()]));
    }
    msg
}

/// Первые [`MAX_ERROR_DETAILS`] ошибок в виде "row: error", по строке на ошибку
pub fn error_details(result: &ImportResult) -> Option<String> {
    if !result.has_errors() {
        return None;
    }
    Some(
        result
            .errors
            .iter()
            .take(MAX_ERROR_DETAILS)
            .map(|e| format!("{}: {}", e.row, e.error))
            .collect::<Vec<_>>()
            .join("\n"),
    )
}

fn has_accepted_extension(file_url: &str) -> bool {
    let lower = file_url.to_lowercase();
    ACCEPTED_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::i18n::IdentityTranslator;
    use crate::shared::rpc::parse_envelope;
    use crate::usecases::u510_sync_customers_from_excel::RowError;
    use std::cell::RefCell;

    #[derive(Debug, Clone, PartialEq)]
    enum Event {
        DialogOpened(String),
        DialogHidden,
        Frozen(bool),
        ProgressShown(String, String),
        ProgressHidden,
        Notice(Notice),
    }

    #[derive(Default)]
    struct Recorder {
        events: RefCell<Vec<Event>>,
    }

    impl Recorder {
        fn notices(&self) -> Vec<Notice> {
            self.events
                .borrow()
                .iter()
                .filter_map(|e| match e {
                    Event::Notice(n) => Some(n.clone()),
                    _ => None,
                })
                .collect()
        }
    }

    impl NoticeService for Recorder {
        fn msgprint(&self, notice: Notice) {
            self.events.borrow_mut().push(Event::Notice(notice));
        }
        fn show_progress(&self, title: &str, description: &str) {
            self.events
                .borrow_mut()
                .push(Event::ProgressShown(title.into(), description.into()));
        }
        fn hide_progress(&self) {
            self.events.borrow_mut().push(Event::ProgressHidden);
        }
    }

    impl DialogService for Recorder {
        fn open(&self, spec: &DialogSpec) {
            self.events
                .borrow_mut()
                .push(Event::DialogOpened(spec.title.clone()));
        }
        fn hide(&self) {
            self.events.borrow_mut().push(Event::DialogHidden);
        }
        fn set_frozen(&self, frozen: bool) {
            self.events.borrow_mut().push(Event::Frozen(frozen));
        }
    }

    fn submitted(recorder: &Recorder) -> CustomerImportWorkflow<IdentityTranslator, &Recorder, &Recorder> {
        let mut wf = CustomerImportWorkflow::new(IdentityTranslator, recorder, recorder);
        wf.open().unwrap();
        wf.submit(Some("/files/orders.xlsx")).unwrap();
        wf
    }

    #[test]
    fn test_success_notice() {
        let rec = Recorder::default();
        let mut wf = submitted(&rec);
        let state = wf
            .resolve(Ok(RpcResponse::ok(ImportResult {
                updated: 5,
                skipped: 2,
                errors: vec![],
            })))
            .unwrap()
            .clone();

        assert!(matches!(state, ImportDialogState::Completed(_)));
        let notices = rec.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "Sync complete. Updated 5 orders. Skipped 2 rows.");
        assert_eq!(notices[0].indicator, None);
    }

    #[test]
    fn test_no_skipped_suffix_when_zero() {
        let msg = summary_message(
            &IdentityTranslator,
            &ImportResult {
                updated: 1,
                skipped: 0,
                errors: vec![],
            },
        );
        assert_eq!(msg, "Sync complete. Updated 1 orders.");
    }

    #[test]
    fn test_row_errors_get_second_notice() {
        let rec = Recorder::default();
        let mut wf = submitted(&rec);
        wf.resolve(Ok(RpcResponse::ok(ImportResult {
            updated: 3,
            skipped: 0,
            errors: vec![
                RowError { row: 2, error: "bad email".into() },
                RowError { row: 7, error: "dup".into() },
            ],
        })))
        .unwrap();

        let notices = rec.notices();
        assert_eq!(notices.len(), 2);
        assert_eq!(notices[0].message, "Sync complete. Updated 3 orders.");
        assert_eq!(notices[1].message, "2: bad email\n7: dup");
        assert_eq!(notices[1].title.as_deref(), Some("Some rows failed"));
        assert_eq!(notices[1].indicator, Some(Indicator::Orange));
    }

    #[test]
    fn test_error_details_capped_at_ten() {
        let result = ImportResult {
            updated: 0,
            skipped: 0,
            errors: (1..=15)
                .map(|row| RowError { row, error: "x".into() })
                .collect(),
        };
        let details = error_details(&result).unwrap();
        assert_eq!(details.lines().count(), MAX_ERROR_DETAILS);
        assert!(details.ends_with("10: x"));
    }

    #[test]
    fn test_exception_shows_error_only() {
        let rec = Recorder::default();
        let mut wf = submitted(&rec);
        let state = wf
            .resolve(Ok(RpcResponse::exception("Server error")))
            .unwrap()
            .clone();

        assert_eq!(state, ImportDialogState::Failed("Server error".into()));
        let notices = rec.notices();
        assert_eq!(notices.len(), 1);
        assert!(notices[0].message.contains("Server error"));
        assert_eq!(notices[0].indicator, Some(Indicator::Red));
        assert!(!notices.iter().any(|n| n.message.starts_with("Sync complete")));
    }

    #[test]
    fn test_transport_failure_is_failed_path() {
        let rec = Recorder::default();
        let mut wf = submitted(&rec);
        wf.resolve(Err("Request failed: connection refused".into()))
            .unwrap();
        assert!(matches!(wf.state(), ImportDialogState::Failed(_)));
        assert_eq!(rec.notices()[0].title.as_deref(), Some("Error"));
    }

    #[test]
    fn test_foreign_error_body_is_failed_path() {
        let rec = Recorder::default();
        let mut wf = submitted(&rec);
        let outcome = parse_envelope::<ImportResult>(502, r#"{"detail": "Bad Gateway"}"#);
        wf.resolve(outcome).unwrap();

        assert!(matches!(wf.state(), ImportDialogState::Failed(_)));
        let notices = rec.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].indicator, Some(Indicator::Red));
        assert!(notices[0].message.contains("Bad Gateway"));
        assert!(!notices.iter().any(|n| n.message.starts_with("Sync complete")));
    }

    #[test]
    fn test_submit_sequence() {
        let rec = Recorder::default();
        let mut wf = submitted(&rec);
        wf.resolve(Ok(RpcResponse::ok(ImportResult::default())))
            .unwrap();

        let events = rec.events.borrow().clone();
        assert_eq!(
            events[..5],
            [
                Event::DialogOpened("Import Shopify Customer Data (Excel)".into()),
                Event::DialogHidden,
                Event::ProgressShown("Syncing customers".into(), "Uploading file".into()),
                Event::Frozen(true),
                Event::Frozen(false),
            ]
        );
        assert_eq!(events[5], Event::ProgressHidden);
    }

    #[test]
    fn test_missing_file_blocks_submit() {
        let rec = Recorder::default();
        let mut wf = CustomerImportWorkflow::new(IdentityTranslator, &rec, &rec);
        wf.open().unwrap();

        assert_eq!(wf.submit(None), Err(ImportDialogError::MissingFile));
        assert_eq!(wf.submit(Some("  ")), Err(ImportDialogError::MissingFile));
        assert_eq!(
            wf.submit(Some("/files/orders.pdf")),
            Err(ImportDialogError::UnsupportedFile("/files/orders.pdf".into()))
        );
        assert_eq!(wf.state(), &ImportDialogState::Collecting);
        // диалог не закрывался, прогресс не показывался
        assert_eq!(rec.events.borrow().len(), 1);
    }

    #[test]
    fn test_back_to_idle_and_reopen() {
        let rec = Recorder::default();
        let mut wf = submitted(&rec);
        assert!(matches!(
            wf.open(),
            Err(ImportDialogError::InvalidTransition { action: "open", state: "submitting" })
        ));
        wf.resolve(Ok(RpcResponse::exception("boom"))).unwrap();
        wf.reset().unwrap();
        assert_eq!(wf.state(), &ImportDialogState::Idle);
        assert!(matches!(
            wf.reset(),
            Err(ImportDialogError::InvalidTransition { action: "reset", state: "idle" })
        ));
        wf.open().unwrap();
        assert_eq!(wf.state(), &ImportDialogState::Collecting);
        wf.cancel().unwrap();
        assert_eq!(wf.state(), &ImportDialogState::Idle);
    }

    #[test]
    fn test_accepts_uppercase_extension() {
        let rec = Recorder::default();
        let mut wf = CustomerImportWorkflow::new(IdentityTranslator, &rec, &rec);
        wf.open().unwrap();
        let req = wf.submit(Some("/files/Orders.CSV")).unwrap();
        assert_eq!(req.file_url, "/files/Orders.CSV");
    }
}
