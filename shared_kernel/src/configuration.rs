use anyhow::Context;
use serde::de::DeserializeOwned;

const ENVIRONMENT_PREFIX: &str = "APP";

pub fn config<Settings: DeserializeOwned>() -> anyhow::Result<Settings> {
    let base_path = std::env::current_dir().context("Failed to determine the current directory")?;
    let configuration_directory = base_path.join("configuration");
    let file = if cfg!(test) { "test.yaml" } else { "base.yaml" };
    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join(file)))
        .add_source(environment())
        .build()
        .context("Failed to build configuration")?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize settings")
}

/// Builds settings from an inline yaml document. Environment overrides still apply.
pub fn config_from_yaml<Settings: DeserializeOwned>(yaml: &str) -> anyhow::Result<Settings> {
    config::Config::builder()
        .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
        .add_source(environment())
        .build()
        .context("Failed to build configuration from yaml")?
        .try_deserialize::<Settings>()
        .context("Failed to deserialize settings")
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENVIRONMENT_PREFIX)
        .prefix_separator("_")
        .separator("__")
}
