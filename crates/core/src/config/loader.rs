//! Configuration file loader for the `.a2ui/` directory.
//!
//! The runtime reads a single optional file, `.a2ui/config.toml`. Missing
//! directories and files are not errors: they yield the defaults.

use crate::config::error::ConfigError;
use crate::config::error::ConfigResult;
use crate::config::models::RuntimeConfig;
use std::path::Path;

/// Name of the configuration directory under the project root.
pub const CONFIG_DIR: &str = ".a2ui";

/// Name of the configuration file inside [`CONFIG_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Loads the runtime configuration from `<root>/.a2ui/config.toml`.
///
/// # Arguments
///
/// * `root` - Directory containing the `.a2ui/` folder
///
/// # Returns
///
/// The parsed configuration, with defaults for absent keys. If the
/// directory or file is missing, returns `RuntimeConfig::default()`.
///
/// # Errors
///
/// Returns `ConfigError` if:
/// - The file exists but cannot be read
/// - The file is not valid TOML or has fields of the wrong type
/// - A value is out of range (e.g. `max-tree-depth = 0`)
///
/// # Example
///
/// ```rust,no_run
/// use a2ui_core::config::loader::load_config;
/// use std::path::Path;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let config = load_config(Path::new(".")).await?;
/// println!("Fallback catalog: {}", config.catalog_id);
/// # Ok(())
/// # }
/// ```
pub async fn load_config(root: &Path) -> ConfigResult<RuntimeConfig> {
    let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

    // If config.toml doesn't exist, return default
    if !config_path.exists() {
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        return Ok(RuntimeConfig::default());
    }

    let content = tokio::fs::read_to_string(&config_path)
        .await
        .map_err(|source| ConfigError::FileRead {
            path: config_path.clone(),
            source,
        })?;

    let config: RuntimeConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParse {
            path: config_path.clone(),
            source,
        })?;

    validate(&config_path, &config)?;
    Ok(config)
}

fn validate(path: &Path, config: &RuntimeConfig) -> ConfigResult<()> {
    if config.max_tree_depth == 0 {
        return Err(ConfigError::InvalidConfig {
            path: path.to_path_buf(),
            reason: "max-tree-depth must be greater than zero".to_string(),
        });
    }

    if config.catalog_id.trim().is_empty() {
        return Err(ConfigError::InvalidConfig {
            path: path.to_path_buf(),
            reason: "catalog-id must not be empty".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use a2ui_protocol::constants::STANDARD_CATALOG_ID;
    use std::fs;
    use tempfile::tempdir;

    fn write_config(root: &Path, content: &str) {
        let dir = root.join(CONFIG_DIR);
        fs::create_dir_all(&dir).expect("Failed to create .a2ui");
        fs::write(dir.join(CONFIG_FILE), content).expect("Failed to write config.toml");
    }

    #[tokio::test]
    async fn test_load_config_full() {
        let dir = tempdir().expect("Failed to create temp dir");
        write_config(
            dir.path(),
            r#"
catalog-id = "https://example.com/catalog.json"
report-path-conflicts = false
max-tree-depth = 8
"#,
        );

        let config = load_config(dir.path()).await.expect("Failed to load config");

        assert_eq!(config.catalog_id, "https://example.com/catalog.json");
        assert!(!config.report_path_conflicts);
        assert_eq!(config.max_tree_depth, 8);
    }

    #[tokio::test]
    async fn test_load_config_empty_directory() {
        let dir = tempdir().expect("Failed to create temp dir");

        // No .a2ui directory exists
        let config = load_config(dir.path())
            .await
            .expect("Should handle missing .a2ui");

        assert_eq!(config, RuntimeConfig::default());
        assert_eq!(config.catalog_id, STANDARD_CATALOG_ID);
        assert!(config.report_path_conflicts);
    }

    #[tokio::test]
    async fn test_load_config_partial() {
        let dir = tempdir().expect("Failed to create temp dir");
        write_config(dir.path(), "max-tree-depth = 3");

        let config = load_config(dir.path())
            .await
            .expect("Should handle partial config");

        assert_eq!(config.max_tree_depth, 3);
        assert_eq!(config.catalog_id, STANDARD_CATALOG_ID);
    }

    #[tokio::test]
    async fn test_load_config_invalid_toml() {
        let dir = tempdir().expect("Failed to create temp dir");
        write_config(dir.path(), "catalog-id = [invalid toml");

        let result = load_config(dir.path()).await;

        if let Err(ConfigError::TomlParse { path, .. }) = result {
            assert!(path.ends_with("config.toml"));
        } else {
            panic!("Expected TomlParse error");
        }
    }

    #[tokio::test]
    async fn test_load_config_wrong_type() {
        let dir = tempdir().expect("Failed to create temp dir");
        write_config(dir.path(), "report-path-conflicts = \"yes\"");

        let result = load_config(dir.path()).await;
        assert!(matches!(result, Err(ConfigError::TomlParse { .. })));
    }

    #[tokio::test]
    async fn test_load_config_zero_depth_is_invalid() {
        let dir = tempdir().expect("Failed to create temp dir");
        write_config(dir.path(), "max-tree-depth = 0");

        match load_config(dir.path()).await {
            Err(ConfigError::InvalidConfig { reason, .. }) => {
                assert!(reason.contains("max-tree-depth"));
            }
            other => panic!("Expected InvalidConfig error, got {other:?}"),
        }
    }
}
