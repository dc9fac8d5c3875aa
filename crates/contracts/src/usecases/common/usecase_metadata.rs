use crate::shared::rpc::method_url;

/// Описание UseCase: код, имена и серверный метод.
///
/// Backend регистрирует маршрут по `method_url()`, frontend берёт
/// `display_name()` для кнопки запуска.
pub trait UseCaseMetadata {
    /// Код вида "u510"
    fn usecase_index() -> &'static str;

    /// Техническое имя, например "sync_customers_from_excel"
    fn usecase_name() -> &'static str;

    /// Подпись кнопки или пункта меню
    fn display_name() -> &'static str;

    fn description() -> &'static str {
        ""
    }

    /// Полное имя серверного метода (dotted path)
    fn rpc_method() -> &'static str;

    /// Путь `/api/method/<rpc_method>`
    fn method_url() -> String {
        method_url(Self::rpc_method())
    }

    /// "u510_sync_customers_from_excel"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
