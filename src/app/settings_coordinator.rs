//! Settings persistence coordination.
//!
//! Provides a typed API for persisting application settings to eframe's
//! storage. Values are stored as JSON strings.

use serde::{Deserialize, Serialize};
use rgallery::AppConfigs;

/// Storage key of the user's configuration overrides.
pub const CONFIGS_KEY: &str = "gallery_configs";

/// Coordinates settings persistence.
pub struct SettingsCoordinator;

impl SettingsCoordinator {
    /// Saves a setting to persistent storage.
    ///
    /// # Arguments
    /// * `storage` - The eframe storage interface (mutable)
    /// * `key` - The storage key for this setting
    /// * `value` - The value to serialize and save
    pub fn save_setting<T>(storage: &mut dyn eframe::Storage, key: &str, value: &T)
    where
        T: Serialize,
    {
        match serde_json::to_string(value) {
            Ok(json_str) => {
                storage.set_string(key, json_str);
                storage.flush();
            }
            Err(e) => log::warn!("Could not serialize setting '{}': {}", key, e),
        }
    }

    /// Attempts to load a setting, returning None if not found or invalid.
    pub fn try_load_setting<T>(storage: Option<&dyn eframe::Storage>, key: &str) -> Option<T>
    where
        T: for<'de> Deserialize<'de>,
    {
        let storage = storage?;
        let json_str = storage.get_string(key)?;
        match serde_json::from_str(&json_str) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring stored setting '{}': {}", key, e);
                None
            }
        }
    }

    /// Effective configuration: stored overrides layered on the environment.
    ///
    /// # Arguments
    /// * `storage` - The eframe storage interface
    /// * `env_configs` - Configuration built from defaults and environment variables
    pub fn load_configs(storage: Option<&dyn eframe::Storage>, env_configs: &AppConfigs) -> AppConfigs {
        match Self::try_load_setting::<AppConfigs>(storage, CONFIGS_KEY) {
            Some(stored) => env_configs.merged_with(stored),
            None => env_configs.clone(),
        }
    }

    /// Persists the configuration.
    ///
    /// A credential or API URL that came from the environment is not written to storage.
    pub fn save_configs(storage: &mut dyn eframe::Storage, configs: &AppConfigs, env_configs: &AppConfigs) {
        let mut stored = configs.clone();
        if stored.access_key == env_configs.access_key {
            stored.access_key = None;
        }
        if stored.api_url == env_configs.api_url {
            stored.api_url.clear();
        }
        Self::save_setting(storage, CONFIGS_KEY, &stored);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Simple mock storage for testing
    struct MockStorage {
        data: HashMap<String, String>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                data: HashMap::new(),
            }
        }
    }

    impl eframe::Storage for MockStorage {
        fn get_string(&self, key: &str) -> Option<String> {
            self.data.get(key).cloned()
        }

        fn set_string(&mut self, key: &str, value: String) {
            self.data.insert(key.to_string(), value);
        }

        fn flush(&mut self) {}
    }

    #[test]
    fn test_save_and_load_simple() {
        let mut storage = MockStorage::new();
        SettingsCoordinator::save_setting(&mut storage, "last_query", &"cats".to_string());

        let loaded: Option<String> = SettingsCoordinator::try_load_setting(Some(&storage), "last_query");
        assert_eq!(loaded.as_deref(), Some("cats"));
    }

    #[test]
    fn test_missing_setting() {
        let storage = MockStorage::new();
        let loaded: Option<String> = SettingsCoordinator::try_load_setting(Some(&storage), "missing_key");
        assert_eq!(loaded, None);

        let loaded: Option<u32> = SettingsCoordinator::try_load_setting(None, "missing_key");
        assert_eq!(loaded, None);
    }

    #[test]
    fn test_corrupt_value_is_ignored() {
        let mut storage = MockStorage::new();
        eframe::Storage::set_string(&mut storage, CONFIGS_KEY, "{not json".to_string());

        let env_configs = AppConfigs::default();
        assert_eq!(SettingsCoordinator::load_configs(Some(&storage), &env_configs), env_configs);
    }

    #[test]
    fn test_env_key_is_not_persisted() {
        let mut storage = MockStorage::new();
        let env_configs = AppConfigs {
            access_key: Some("from-env".into()),
            ..AppConfigs::default()
        };
        let mut configs = env_configs.clone();
        configs.grid.gap = 12.0;

        SettingsCoordinator::save_configs(&mut storage, &configs, &env_configs);
        let stored: Option<AppConfigs> = SettingsCoordinator::try_load_setting(Some(&storage), CONFIGS_KEY);
        let stored = stored.unwrap();
        assert_eq!(stored.access_key, None);
        assert_eq!(stored.grid.gap, 12.0);

        let loaded = SettingsCoordinator::load_configs(Some(&storage), &env_configs);
        assert_eq!(loaded.access_key.as_deref(), Some("from-env"));
        assert_eq!(loaded.grid.gap, 12.0);
    }

    #[test]
    fn test_typed_key_is_persisted() {
        let mut storage = MockStorage::new();
        let env_configs = AppConfigs::default();
        let configs = AppConfigs {
            access_key: Some("typed".into()),
            ..AppConfigs::default()
        };

        SettingsCoordinator::save_configs(&mut storage, &configs, &env_configs);
        let loaded = SettingsCoordinator::load_configs(Some(&storage), &env_configs);
        assert_eq!(loaded.access_key.as_deref(), Some("typed"));
    }

    #[test]
    fn test_env_api_url_wins_on_next_launch() {
        let mut storage = MockStorage::new();
        let first_env = AppConfigs::default();
        SettingsCoordinator::save_configs(&mut storage, &first_env, &first_env);

        let next_env = AppConfigs {
            api_url: "http://proxy.local".into(),
            ..AppConfigs::default()
        };
        let loaded = SettingsCoordinator::load_configs(Some(&storage), &next_env);
        assert_eq!(loaded.api_url, "http://proxy.local");
    }

    #[test]
    fn test_typed_api_url_is_persisted() {
        let mut storage = MockStorage::new();
        let env_configs = AppConfigs::default();
        let configs = AppConfigs {
            api_url: "http://mirror.local".into(),
            ..AppConfigs::default()
        };

        SettingsCoordinator::save_configs(&mut storage, &configs, &env_configs);
        let loaded = SettingsCoordinator::load_configs(Some(&storage), &env_configs);
        assert_eq!(loaded.api_url, "http://mirror.local");
    }
}
