//! `Festival` — load rules once, then query dates.

use fest_core::errors::Result;
use fest_core::FestivalConfig;
use fest_resolver::FestivalResolver;
use fest_rules::RuleSet;
use tracing::{error, info};

/// Festival lookup built from a [`FestivalConfig`].
///
/// Construction reads the rule source; queries never touch the file system
/// again.  The value is `Send + Sync`.
#[derive(Debug, Clone)]
pub struct Festival {
    config: FestivalConfig,
    resolver: FestivalResolver,
}

impl Festival {
    /// Load the configured rule source and build a festival lookup.
    ///
    /// A missing or malformed rule file is logged and leaves the lookup with
    /// no rules, so every query returns an empty list.
    pub fn new(config: FestivalConfig) -> Self {
        let rules = match RuleSet::load(&config.rule_source_path) {
            Ok(rules) => rules,
            Err(e) => {
                error!(
                    path = %config.rule_source_path.display(),
                    error = %e,
                    "failed to load festival rules; continuing without rules"
                );
                RuleSet::new()
            }
        };
        Self::with_rules(config, rules)
    }

    /// Like [`Festival::new`], but fails if the rule source cannot be loaded.
    pub fn try_new(config: FestivalConfig) -> Result<Self> {
        let rules = RuleSet::load(&config.rule_source_path)?;
        Ok(Self::with_rules(config, rules))
    }

    /// Build a festival lookup from an in-memory rule set.
    ///
    /// `config.rule_source_path` is kept for reference but not read.
    pub fn with_rules(config: FestivalConfig, rules: RuleSet) -> Self {
        info!(
            rules = rules.len(),
            time_zone = %config.time_zone,
            "festival rules ready"
        );
        let resolver = FestivalResolver::with_chinese_calendar(rules, config.time_zone.clone());
        Self { config, resolver }
    }

    /// Return the configuration this lookup was built from.
    pub fn config(&self) -> &FestivalConfig {
        &self.config
    }

    /// Return the underlying resolver.
    pub fn resolver(&self) -> &FestivalResolver {
        &self.resolver
    }

    /// Return the festivals falling on `date` (`YYYY-MM-DD`), solar ones
    /// first.
    pub fn get_festivals(&self, date: &str) -> Vec<String> {
        self.resolver.resolve(date)
    }

    /// Return the festivals falling on today's date in the configured zone.
    pub fn today(&self) -> Vec<String> {
        self.resolver.resolve_today()
    }
}

impl Default for Festival {
    /// Load `./festival.json` in the local time zone.
    fn default() -> Self {
        Self::new(FestivalConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fest_core::Error;

    #[test]
    fn missing_rule_file_degrades_to_no_rules() {
        crate::logging::init_test();
        let config = FestivalConfig::new("/nonexistent/festival.json", "UTC");
        let festival = Festival::new(config.clone());
        assert!(festival.resolver().rules().is_empty());
        assert!(festival.get_festivals("2024-01-01").is_empty());
        assert!(matches!(Festival::try_new(config), Err(Error::RuleSource(_))));
    }

    #[test]
    fn keeps_config() {
        let config = FestivalConfig::new("rules.json", "Asia/Shanghai");
        let festival = Festival::with_rules(config.clone(), RuleSet::new());
        assert_eq!(festival.config(), &config);
        assert_eq!(festival.resolver().time_zone_name(), "Asia/Shanghai");
    }
}
