use std::fs::read_to_string;
use std::io::ErrorKind;
use clap::builder::BoolishValueParser;
use clap::Parser;
use log::warn;
use serde::Deserialize;
use crate::api::credentials::Credentials;
use crate::error::Error;
use crate::NAME;

pub const DEFAULT_CONFIG_PATH: &str = "config.yml";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Command line arguments. Every argument can also be set through its environment variable
#[derive(Parser, Debug, Clone, Default)]
#[command(name = NAME, version, about = "Read-only web interface for a docker registry")]
pub struct Args {
    /// Registry URL (with http:// or https://)
    #[arg(short, long, env = "REGISTRY_URL")]
    pub registry: Option<String>,

    /// Show a login page for registries which require basic auth
    #[arg(short = 'l', long = "login", env = "APP_ENABLE_LOGIN", num_args = 0..=1, default_missing_value = "true", value_parser = BoolishValueParser::new())]
    pub enable_login: Option<bool>,

    /// Username for registry basic auth
    #[arg(short, long, env = "REGISTRY_USERNAME")]
    pub username: Option<String>,

    /// Password for registry basic auth
    #[arg(short, long, env = "REGISTRY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// UI theme, one of 'light', 'dark' or 'auto'
    #[arg(long, env = "APP_THEME")]
    pub theme: Option<String>,

    #[arg(long, env = "APP_HOST")]
    pub host: Option<String>,

    #[arg(long, env = "APP_PORT")]
    pub port: Option<u16>,

    /// Path of the optional yaml configuration file
    #[arg(short, long, env = "CONFIG_PATH", default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,
}

/// Content of the static configuration file. All fields are optional and overridden by
/// command line arguments and environment variables
#[derive(Deserialize, Clone, Debug, Default, Eq, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    registry: Option<String>,
    enable_login: Option<bool>,
    username: Option<String>,
    password: Option<String>,
    theme: Option<String>,
    host: Option<String>,
    port: Option<u16>,
}

impl FileConfig {
    /// Parse the file at the given path. A missing file yields an empty configuration
    pub fn parse(path: &str) -> Result<Self, Error> {
        match read_to_string(path) {
            Ok(content) if content.trim().is_empty() => Ok(Self::default()),
            Ok(content) => serde_yaml::from_str(&content).map_err(|err| Error::ConfigParse(path.to_string(), err)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(Error::ConfigRead(path.to_string(), err)),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

impl Theme {
    pub const NAMES: [&'static str; 3] = ["light", "dark", "auto"];

    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            "auto" => Some(Theme::Auto),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Auto => "auto",
        }
    }

    /// The water.css stylesheet of the theme
    pub fn stylesheet(&self) -> &'static str {
        match self {
            Theme::Light => "light.min.css",
            Theme::Dark => "dark.min.css",
            Theme::Auto => "water.min.css",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    pub registry: String,
    pub enable_login: bool,
    /// Used for every registry request which doesn't carry credentials of its own
    pub credentials: Option<Credentials>,
    pub theme: Theme,
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load the configuration from the command line, the environment and the configuration file
    pub fn load() -> Result<Self, Error> {
        let args = Args::parse();
        let file = FileConfig::parse(&args.config)?;
        Self::merge(args, file)
    }

    /// Combine arguments and file content. Arguments take precedence
    pub fn merge(args: Args, file: FileConfig) -> Result<Self, Error> {
        let registry = args.registry.or(file.registry)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or(Error::MissingRegistryUrl)?;
        if !registry.starts_with("http://") && !registry.starts_with("https://") {
            return Err(Error::InvalidRegistryUrl(registry))
        }

        let theme = match args.theme.or(file.theme) {
            Some(name) => Theme::parse(&name).unwrap_or_else(|| {
                warn!("Theme '{name}' is not valid. Must be one of {}. Using default ({}) instead", Theme::NAMES.join(","), Theme::default().name());
                Theme::default()
            }),
            None => Theme::default(),
        };

        Ok(Self {
            registry,
            enable_login: args.enable_login.or(file.enable_login).unwrap_or(true),
            credentials: Credentials::from_parts(args.username.or(file.username), args.password.or(file.password)),
            theme,
            host: args.host.or(file.host).unwrap_or(String::from(DEFAULT_HOST)),
            port: args.port.or(file.port).unwrap_or(DEFAULT_PORT),
        })
    }

    /// Registry url without the scheme, used as the site name
    pub fn site(&self) -> String {
        self.registry
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .to_string()
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
