use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Дата, вычисляемая при открытии отчёта
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DynamicDate {
    Today,
    /// Сегодня плюс N месяцев (N может быть отрицательным)
    MonthsFromToday(i32),
    MonthStart,
    MonthEnd,
}

impl DynamicDate {
    pub fn resolve(&self, today: NaiveDate) -> NaiveDate {
        match self {
            DynamicDate::Today => today,
            DynamicDate::MonthsFromToday(n) => add_months(today, *n),
            DynamicDate::MonthStart => today.with_day(1).unwrap_or(today),
            DynamicDate::MonthEnd => month_end(today),
        }
    }
}

/// Значение по умолчанию для фильтра
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterDefault {
    Value(String),
    Date(DynamicDate),
    /// Пользовательская настройка по ключу (например, "Company")
    UserDefault(String),
}

/// Окружение для вычисления значений по умолчанию
#[derive(Debug, Clone)]
pub struct DefaultsContext {
    pub today: NaiveDate,
    pub user_defaults: HashMap<String, String>,
}

impl DefaultsContext {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            user_defaults: HashMap::new(),
        }
    }

    pub fn with_user_default(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.user_defaults.insert(key.into(), value.into());
        self
    }
}

impl FilterDefault {
    /// Значение в виде строки; `None`, если пользовательская настройка не задана
    pub fn resolve(&self, ctx: &DefaultsContext) -> Option<String> {
        match self {
            FilterDefault::Value(v) => Some(v.clone()),
            FilterDefault::Date(d) => Some(d.resolve(ctx.today).format("%Y-%m-%d").to_string()),
            FilterDefault::UserDefault(key) => ctx.user_defaults.get(key).cloned(),
        }
    }
}

fn add_months(date: NaiveDate, n: i32) -> NaiveDate {
    let shifted = if n >= 0 {
        date.checked_add_months(Months::new(n as u32))
    } else {
        date.checked_sub_months(Months::new(n.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

fn month_end(date: NaiveDate) -> NaiveDate {
    date.with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_months_from_today_clamps_day() {
        assert_eq!(DynamicDate::MonthsFromToday(-1).resolve(d(2024, 3, 31)), d(2024, 2, 29));
        assert_eq!(DynamicDate::MonthsFromToday(-1).resolve(d(2024, 1, 15)), d(2023, 12, 15));
        assert_eq!(DynamicDate::MonthsFromToday(2).resolve(d(2024, 12, 1)), d(2025, 2, 1));
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(DynamicDate::MonthStart.resolve(d(2024, 2, 17)), d(2024, 2, 1));
        assert_eq!(DynamicDate::MonthEnd.resolve(d(2024, 2, 17)), d(2024, 2, 29));
        assert_eq!(DynamicDate::MonthEnd.resolve(d(2023, 12, 5)), d(2023, 12, 31));
    }

    #[test]
    fn test_user_default_missing() {
        let ctx = DefaultsContext::new(d(2024, 5, 1)).with_user_default("Company", "Acme");
        assert_eq!(
            FilterDefault::UserDefault("Company".into()).resolve(&ctx),
            Some("Acme".to_string())
        );
        assert_eq!(FilterDefault::UserDefault("Currency".into()).resolve(&ctx), None);
        assert_eq!(
            FilterDefault::Date(DynamicDate::Today).resolve(&ctx),
            Some("2024-05-01".to_string())
        );
    }
}
