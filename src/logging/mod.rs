//! Structured logging helpers
//!
//! Filter construction for the `tracing` subscriber, request ID generation,
//! and privacy-safe previews of query text.

pub mod fields;
pub mod middleware;

pub use fields::{query_preview, truncate_query};
pub use middleware::generate_request_id;

/// Build filter directives string from LoggingConfig
///
/// Constructs a tracing filter string that includes the base log level
/// and any component-specific log levels configured in the LoggingConfig.
///
/// # Returns
///
/// A filter string in the format: "base_level,dishpick::component1=level1,dishpick::component2=level2"
///
/// # Examples
///
/// ```
/// use dishpick::config::{LogFormat, LoggingConfig};
/// use dishpick::logging::build_filter_directives;
/// use std::collections::HashMap;
///
/// let mut component_levels = HashMap::new();
/// component_levels.insert("resolver".to_string(), "debug".to_string());
///
/// let config = LoggingConfig {
///     level: "info".to_string(),
///     format: LogFormat::Pretty,
///     component_levels: Some(component_levels),
///     enable_content_logging: false,
///     query_preview_chars: 100,
/// };
///
/// let filter_str = build_filter_directives(&config);
/// assert_eq!(filter_str, "info,dishpick::resolver=debug");
/// ```
pub fn build_filter_directives(config: &crate::config::LoggingConfig) -> String {
    let mut filter_str = config.level.clone();

    if let Some(component_levels) = &config.component_levels {
        let mut components: Vec<_> = component_levels.iter().collect();
        components.sort();
        for (component, level) in components {
            filter_str.push_str(&format!(",dishpick::{}={}", component, level));
        }
    }

    filter_str
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LoggingConfig;
    use std::collections::HashMap;

    #[test]
    fn test_filter_directives_base_level_only() {
        let config = LoggingConfig {
            level: "warn".to_string(),
            ..Default::default()
        };
        assert_eq!(build_filter_directives(&config), "warn");
    }

    #[test]
    fn test_filter_directives_sorted_components() {
        let mut levels = HashMap::new();
        levels.insert("selector".to_string(), "trace".to_string());
        levels.insert("agent".to_string(), "debug".to_string());
        let config = LoggingConfig {
            component_levels: Some(levels),
            ..Default::default()
        };
        assert_eq!(
            build_filter_directives(&config),
            "info,dishpick::agent=debug,dishpick::selector=trace"
        );
    }
}
