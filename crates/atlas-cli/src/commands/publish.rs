use anyhow::Context;
use atlas_client::AtlasClient;
use atlas_config::AtlasConfig;
use atlas_publisher::CsvPublisher;

use crate::cli::PublishArgs;
use crate::output::output;

/// Handle `atlas-publish publish`.
pub async fn handle(args: &PublishArgs, config: AtlasConfig, pretty: bool) -> anyhow::Result<()> {
    let config = apply_overrides(config, args);

    if !config.publisher.is_configured() {
        tracing::warn!("no entity or relation directory configured; nothing to publish");
    }

    let client = AtlasClient::new(&config.catalog)
        .with_context(|| format!("invalid Atlas endpoint '{}'", config.catalog.endpoint))?;
    tracing::info!(endpoint = client.base_url(), "publishing to Atlas");

    let publisher = CsvPublisher::new(client, config.publisher);
    let summary = publisher.publish().await?;
    output(&summary, pretty)
}

fn apply_overrides(mut config: AtlasConfig, args: &PublishArgs) -> AtlasConfig {
    if let Some(dir) = &args.entity_dir {
        config.publisher.entity_files_directory = Some(dir.clone());
    }
    if let Some(dir) = &args.relation_dir {
        config.publisher.relation_files_directory = Some(dir.clone());
    }
    if let Some(size) = args.batch_size {
        config.publisher.batch_size = Some(size);
    }
    if let Some(endpoint) = &args.endpoint {
        config.catalog.endpoint.clone_from(endpoint);
    }
    config
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn overrides_replace_config_values() {
        let mut config = AtlasConfig::default();
        config.publisher.batch_size = Some(100);
        config.publisher.relation_files_directory = Some(PathBuf::from("/from/file"));

        let args = PublishArgs {
            entity_dir: Some(PathBuf::from("/data/entities")),
            batch_size: Some(5),
            endpoint: Some("https://atlas:21443".to_string()),
            ..PublishArgs::default()
        };
        let config = apply_overrides(config, &args);

        assert_eq!(
            config.publisher.entity_files_directory,
            Some(PathBuf::from("/data/entities"))
        );
        assert_eq!(
            config.publisher.relation_files_directory,
            Some(PathBuf::from("/from/file"))
        );
        assert_eq!(config.publisher.batch_size, Some(5));
        assert_eq!(config.catalog.endpoint, "https://atlas:21443");
    }

    #[test]
    fn no_overrides_keeps_config() {
        let config = apply_overrides(AtlasConfig::default(), &PublishArgs::default());
        assert_eq!(config.publisher.batch_size, None);
        assert_eq!(config.catalog.endpoint, AtlasConfig::default().catalog.endpoint);
    }
}
