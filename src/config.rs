//! Configuration loading: layers an optional file over `ScoringParameters`'s
//! defaults, with environment overrides (spec §6).

use config::{Config, ConfigError, Environment, File};

use crate::scoring::ScoringParameters;

/// Loads `ScoringParameters`, starting from [`ScoringParameters::default`]
/// and layering `path` (if given) and `SHIFT_ASSIGN_`-prefixed environment
/// variables on top. Nested fields such as `max_shift_preference.night` are
/// overridden as `SHIFT_ASSIGN_MAX_SHIFT_PREFERENCE_NIGHT`.
pub fn load_scoring_parameters(path: Option<&str>) -> Result<ScoringParameters, ConfigError> {
    let defaults = ScoringParameters::default();

    let mut builder = Config::builder().add_source(Config::try_from(&defaults)?);
    if let Some(path) = path {
        builder = builder.add_source(File::with_name(path).required(false));
    }
    builder = builder.add_source(Environment::with_prefix("SHIFT_ASSIGN").separator("_"));

    builder.build()?.try_deserialize()
}
