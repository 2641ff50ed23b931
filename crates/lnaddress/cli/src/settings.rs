use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use lnaddress_core::Config;
use serde::{Deserialize, Serialize};

use crate::args::Args;

const ENV_PREFIX: &str = "LNADDRESS_";

/// Settings that may come from the config file or the environment as well as from flags.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub log_level: String,
    pub user_agent: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            user_agent: None,
            request_timeout_secs: None,
        }
    }
}

/// The subset of flags that override file and environment values when given.
#[derive(Serialize)]
struct Overrides<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    log_level: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_agent: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_timeout_secs: Option<u64>,
}

impl Settings {
    /// Layers defaults, the TOML file at `args.config` if it exists, `LNADDRESS_*` variables and
    /// finally the explicit flags.
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config_file = std::fs::canonicalize(&args.config).ok();
        Self::figment(config_file.as_deref(), args).extract()
    }

    fn figment(config_file: Option<&Path>, args: &Args) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Settings::default()));
        if let Some(config_file) = config_file {
            figment = figment.merge(Toml::file(config_file));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .merge(Serialized::defaults(Overrides {
                log_level: args.log_level.as_deref(),
                user_agent: args.user_agent.as_deref(),
                request_timeout_secs: args.timeout,
            }))
    }

    pub fn client_config(&self) -> Config {
        Config {
            user_agent: self.user_agent.clone(),
            request_timeout_secs: self.request_timeout_secs,
        }
    }
}
