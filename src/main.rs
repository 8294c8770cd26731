use std::time::Duration;

use anyhow::Result;
use wximpact_core::Config;
use wximpact_layers::{FeatureClient, LayerRegistry, LayerSelection, LayerSpec};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize core
    wximpact_core::init()?;

    let (config, _validation) = Config::load_validated()?;
    tracing::info!("Loaded {} impact layers", config.layers.len());

    let specs: Vec<LayerSpec> = config
        .layers
        .iter()
        .map(|entry| LayerSpec {
            id: entry.id.as_str().into(),
            title: entry.title.clone(),
            sublayer: entry.sublayer,
        })
        .collect();
    let registry = LayerRegistry::new(specs)?;

    let client = FeatureClient::new(
        &config.service.base_url,
        Some(Duration::from_secs(config.service.timeout_secs)),
    )?;

    // All layers resolve concurrently; each label stands on its own.
    let labels = registry.resolve_all(&client).await;

    let selection = LayerSelection::new(registry.default_selection().clone());
    let visibility = selection.visibility(&registry.ids());

    println!("wximpact - Weather Impact Layers");
    println!("Service: {}", config.service.base_url);
    println!();

    for resolved in labels {
        let marker = if visibility.get(&resolved.id).copied().unwrap_or(false) {
            "*"
        } else {
            " "
        };
        // Failure policy lives here, not in the resolver: log the cause and
        // show a placeholder instead of a forecast window.
        match resolved.label {
            Ok(label) => println!(" {} {}  {}", marker, resolved.title, label),
            Err(e) => {
                tracing::warn!("valid time for layer {} unavailable: {}", resolved.id, e);
                println!(" {} {}  [{}]", marker, resolved.title, e.user_message());
            }
        }
    }

    Ok(())
}
