//! Отметка переключателя режима отображения на панели фильтров.
//!
//! Поле выбора графика стоит в одном ряду с фильтрами, но данные не
//! фильтрует, поэтому после отрисовки панели его обёртка получает иконку
//! с подсказкой, акцентную границу слева и класс-маркер. Повторный вызов
//! ничего не меняет; если поля нет, тоже ничего не происходит.

use contracts::shared::i18n::Translator;
use wasm_bindgen::JsCast;

/// Класс-маркер обёртки (он же признак, что отметка уже есть)
pub const DISPLAY_MODE_CLASS: &str = "chart-switch-field";
/// Класс обёртки каждого фильтра на панели
pub const FILTER_WRAPPER_CLASS: &str = "report-filter";
pub const FILTER_LABEL_CLASS: &str = "report-filter__label";
pub const ICON_CLASS: &str = "chart-switch-icon text-muted";
pub const TOOLTIP: &str = "Display mode — does not filter data";

pub const WRAPPER_STYLES: [(&str, &str); 3] = [
    ("border-left", "3px solid var(--colorBrandForeground1)"),
    ("padding-left", "8px"),
    ("margin-top", "8px"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnnotationOutcome {
    Annotated,
    AlreadyAnnotated,
    ControlAbsent,
}

/// Операции над DOM панели фильтров, нужные для отметки
pub trait ControlsHost {
    type Wrapper;

    /// Обёртка контрола с `data-fieldname=<fieldname>`
    fn control_wrapper(&self, fieldname: &str) -> Option<Self::Wrapper>;
    fn has_class(&self, wrapper: &Self::Wrapper, class: &str) -> bool;
    fn add_class(&self, wrapper: &Self::Wrapper, class: &str);
    fn set_style(&self, wrapper: &Self::Wrapper, property: &str, value: &str);
    /// Иконка перед подписью поля
    fn prepend_icon(&self, wrapper: &Self::Wrapper, icon_class: &str, tooltip: &str);
}

pub fn annotate_display_mode<H: ControlsHost>(
    host: &H,
    translator: &dyn Translator,
    fieldname: &str,
) -> AnnotationOutcome {
    let Some(wrapper) = host.control_wrapper(fieldname) else {
        return AnnotationOutcome::ControlAbsent;
    };
    if host.has_class(&wrapper, DISPLAY_MODE_CLASS) {
        return AnnotationOutcome::AlreadyAnnotated;
    }

    host.add_class(&wrapper, DISPLAY_MODE_CLASS);
    host.prepend_icon(&wrapper, ICON_CLASS, &translator.translate(TOOLTIP));
    for (property, value) in WRAPPER_STYLES {
        host.set_style(&wrapper, property, value);
    }
    AnnotationOutcome::Annotated
}

/// Реализация поверх DOM: поиск внутри контейнера панели фильтров
pub struct DomControlsHost {
    root: web_sys::Element,
}

impl DomControlsHost {
    pub fn new(root: web_sys::Element) -> Self {
        Self { root }
    }
}

impl ControlsHost for DomControlsHost {
    type Wrapper = web_sys::HtmlElement;

    fn control_wrapper(&self, fieldname: &str) -> Option<Self::Wrapper> {
        let selector = format!("[data-fieldname=\"{}\"]", fieldname);
        let control = self.root.query_selector(&selector).ok().flatten()?;
        control
            .closest(&format!(".{}", FILTER_WRAPPER_CLASS))
            .ok()
            .flatten()?
            .dyn_into::<web_sys::HtmlElement>()
            .ok()
    }

    fn has_class(&self, wrapper: &Self::Wrapper, class: &str) -> bool {
        wrapper.class_list().contains(class)
    }

    fn add_class(&self, wrapper: &Self::Wrapper, class: &str) {
        let _ = wrapper.class_list().add_1(class);
    }

    fn set_style(&self, wrapper: &Self::Wrapper, property: &str, value: &str) {
        let _ = wrapper.style().set_property(property, value);
    }

    fn prepend_icon(&self, wrapper: &Self::Wrapper, icon_class: &str, tooltip: &str) {
        let Some(document) = wrapper.owner_document() else {
            return;
        };
        let Ok(icon) = document.create_element("span") else {
            return;
        };
        icon.set_class_name(icon_class);
        icon.set_text_content(Some("📈"));
        let _ = icon.set_attribute("title", tooltip);
        let _ = icon.set_attribute("style", "margin-right: 4px;");

        let label = wrapper
            .query_selector(&format!(".{}", FILTER_LABEL_CLASS))
            .ok()
            .flatten();
        match label.and_then(|l| l.parent_node().map(|p| (p, l))) {
            Some((parent, label)) => {
                let _ = parent.insert_before(&icon, Some(&label));
            }
            None => {
                let _ = wrapper.prepend_with_node_1(&icon);
            }
        }
    }
}
