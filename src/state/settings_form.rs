//! Text buffers behind the settings view.
//!
//! Every field is edited as text. Applying the form parses each buffer and
//! keeps the previous value for entries that are empty or do not parse.

use std::str::FromStr;
use rgallery::AppConfigs;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsForm {
    pub access_key: String,
    pub api_url: String,
    pub default_query: String,
    pub per_page: String,
    pub order_by: String,
    pub debounce_delay_ms: String,
    pub column_width: String,
    pub gap: String,
    pub lazy_load_offset: String,
    pub load_offset: String,
    /// Last validation problem, shown under the form
    pub error: Option<String>,
}

impl SettingsForm {
    /// Fills the buffers from the current configuration.
    pub fn from_configs(configs: &AppConfigs) -> Self {
        Self {
            access_key: configs.access_key.clone().unwrap_or_default(),
            api_url: configs.api_url.clone(),
            default_query: configs.search.default_query.clone(),
            per_page: configs.search.per_page.to_string(),
            order_by: configs.search.order_by.clone(),
            debounce_delay_ms: configs.search.debounce_delay_ms.to_string(),
            column_width: configs.grid.column_width.to_string(),
            gap: configs.grid.gap.to_string(),
            lazy_load_offset: configs.grid.lazy_load_offset.to_string(),
            load_offset: configs.grid.load_offset.to_string(),
            error: None,
        }
    }

    /// Builds the configuration the form describes on top of `current`.
    pub fn apply(&self, current: &AppConfigs) -> AppConfigs {
        let mut next = current.clone();

        if let Some(key) = non_empty(&self.access_key) {
            next.access_key = Some(key.to_string());
        }
        if let Some(url) = non_empty(&self.api_url) {
            next.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(query) = non_empty(&self.default_query) {
            next.search.default_query = query.to_string();
        }
        if let Some(order_by) = non_empty(&self.order_by) {
            next.search.order_by = order_by.to_string();
        }

        parse_into(&self.per_page, &mut next.search.per_page);
        parse_into(&self.debounce_delay_ms, &mut next.search.debounce_delay_ms);
        parse_into(&self.column_width, &mut next.grid.column_width);
        parse_into(&self.gap, &mut next.grid.gap);
        parse_into(&self.lazy_load_offset, &mut next.grid.lazy_load_offset);
        parse_into(&self.load_offset, &mut next.grid.load_offset);

        next
    }

    /// Restores the default configuration, keeping the credential and API URL.
    pub fn reset_to_defaults(&mut self, current: &AppConfigs) {
        let defaults = AppConfigs {
            access_key: current.access_key.clone(),
            api_url: current.api_url.clone(),
            ..AppConfigs::default()
        };
        *self = Self::from_configs(&defaults);
    }
}

fn non_empty(text: &str) -> Option<&str> {
    let trimmed = text.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

fn parse_into<T: FromStr>(text: &str, target: &mut T) {
    if let Some(value) = non_empty(text).and_then(|t| t.parse().ok()) {
        *target = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_keeps_configs() {
        let configs = AppConfigs {
            access_key: Some("key".into()),
            ..AppConfigs::default()
        };
        let form = SettingsForm::from_configs(&configs);
        assert_eq!(form.apply(&configs), configs);
    }

    #[test]
    fn test_empty_and_invalid_entries_keep_previous_values() {
        let configs = AppConfigs::default();
        let mut form = SettingsForm::from_configs(&configs);
        form.per_page = "".into();
        form.gap = "wide".into();
        form.column_width = " 300 ".into();
        form.default_query = "  mountains ".into();

        let next = form.apply(&configs);
        assert_eq!(next.search.per_page, 30);
        assert_eq!(next.grid.gap, 8.0);
        assert_eq!(next.grid.column_width, 300.0);
        assert_eq!(next.search.default_query, "mountains");
    }

    #[test]
    fn test_reset_keeps_credentials() {
        let mut configs = AppConfigs::default();
        configs.access_key = Some("secret".into());
        configs.grid.gap = 20.0;

        let mut form = SettingsForm::from_configs(&configs);
        form.reset_to_defaults(&configs);

        assert_eq!(form.access_key, "secret");
        assert_eq!(form.gap, "8");
    }
}
