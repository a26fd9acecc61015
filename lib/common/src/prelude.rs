/// Namespace every toggle key lives under, e.g. `FeatureToggle:ValuesFeature`.
pub const TOGGLE_KEY_PREFIX: &str = "FeatureToggle";

/// Separator between the namespace and the toggle name in a lookup key.
pub const TOGGLE_KEY_SEPARATOR: char = ':';

/// Body returned in place of a gated resource while its toggle is off.
pub const FEATURE_DISABLED_MESSAGE: &str = "Resource unavailable - feature disabled";

pub const DEFAULT_API_LISTEN_PORT: u16 = 5000;

pub const ENV_PREFIX: &str = "FEATUREGATE";
pub const ENV_SEPARATOR: &str = "__";

/// Builds the configuration key for a toggle name.
pub fn toggle_key(name: &str) -> String {
    format!("{TOGGLE_KEY_PREFIX}{TOGGLE_KEY_SEPARATOR}{name}")
}
