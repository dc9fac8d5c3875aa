//! Перевод пользовательских строк.
//!
//! Строки в коде пишутся на базовом (английском) языке и проходят через
//! [`Translator`] перед показом. Шаблоны используют позиционные
//! плейсхолдеры `{0}`, `{1}`, ...

pub trait Translator {
    fn translate(&self, text: &str) -> String;
}

impl<T: Translator + ?Sized> Translator for &T {
    fn translate(&self, text: &str) -> String {
        (**self).translate(text)
    }
}

/// Возвращает строку без изменений
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Подставляет аргументы в плейсхолдеры `{N}` за один проход слева
/// направо; текст аргументов повторно не разбирается. Плейсхолдер без
/// аргумента остаётся как есть.
pub fn format_message(template: &str, args: &[String]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let arg = after.find('}').and_then(|close| {
            let index: usize = after[..close].parse().ok()?;
            args.get(index).map(|arg| (arg, close))
        });
        match arg {
            Some((arg, close)) => {
                result.push_str(arg);
                rest = &after[close + 1..];
            }
            None => {
                result.push('{');
                rest = after;
            }
        }
    }
    result.push_str(rest);
    result
}

/// Аналог `__(template, [args])`: перевод, затем подстановка
pub fn tr(translator: &dyn Translator, template: &str, args: &[String]) -> String {
    format_message(&translator.translate(template), args)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        assert_eq!(
            format_message("Updated {0} of {1}", &["3".into(), "5".into()]),
            "Updated 3 of 5"
        );
        assert_eq!(format_message("No args", &[]), "No args");
    }

    #[test]
    fn test_arguments_are_not_reformatted() {
        assert_eq!(
            format_message("{0} and {1}", &["{1}".into(), "x".into()]),
            "{1} and x"
        );
        assert_eq!(format_message("{1}{0}", &["a".into(), "b".into()]), "ba");
    }

    #[test]
    fn test_unknown_placeholders_kept() {
        assert_eq!(format_message("{2} {x} {", &["a".into()]), "{2} {x} {");
        assert_eq!(format_message("{{0}}", &["a".into()]), "{a}");
    }

    struct Upper;

    impl Translator for Upper {
        fn translate(&self, text: &str) -> String {
            text.to_uppercase()
        }
    }

    #[test]
    fn test_tr_translates_before_substitution() {
        assert_eq!(tr(&Upper, "Skipped {0} rows.", &["b2".into()]), "SKIPPED b2 ROWS.");
        assert_eq!(tr(&IdentityTranslator, "Skipped {0} rows.", &["2".into()]), "Skipped 2 rows.");
    }
}
