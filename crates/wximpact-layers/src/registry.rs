//! Ordered registry of impact layers and label resolution across them.

use crate::client::FeatureClient;
use crate::error::LayerError;
use crate::types::{LayerId, LayerSpec};
use crate::valid_time::resolve_valid_time;

/// One layer's resolved display label, or the failure the caller must decide
/// how to surface. No default text is ever substituted here.
#[derive(Debug)]
pub struct ResolvedLabel {
    pub id: LayerId,
    pub title: String,
    pub label: Result<String, LayerError>,
}

/// The set of layers this client knows about, in enumeration order.
///
/// Order is significant: it drives label presentation and the first entry is
/// the default-visible layer. Ids must be unique.
#[derive(Debug, Clone)]
pub struct LayerRegistry {
    layers: Vec<LayerSpec>,
}

impl LayerRegistry {
    pub fn new(layers: Vec<LayerSpec>) -> Result<Self, LayerError> {
        if layers.is_empty() {
            return Err(LayerError::EmptyRegistry);
        }
        for (i, layer) in layers.iter().enumerate() {
            if layers[..i].iter().any(|other| other.id == layer.id) {
                return Err(LayerError::DuplicateLayer(layer.id.to_string()));
            }
        }
        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[LayerSpec] {
        &self.layers
    }

    pub fn ids(&self) -> Vec<LayerId> {
        self.layers.iter().map(|l| l.id.clone()).collect()
    }

    pub fn get(&self, id: &LayerId) -> Option<&LayerSpec> {
        self.layers.iter().find(|l| &l.id == id)
    }

    /// The layer visible on startup: the first registry entry.
    pub fn default_selection(&self) -> &LayerId {
        // Non-empty is enforced at construction.
        &self.layers[0].id
    }

    /// Resolve every layer's valid-time label.
    ///
    /// Fetches run concurrently and independently; there is no ordering
    /// dependency between layers and no shared mutable state beyond the
    /// cloned client handle. Results come back in registry order, each
    /// carrying its own success or failure so the caller can attach labels
    /// (or placeholders) per layer.
    pub async fn resolve_all(&self, client: &FeatureClient) -> Vec<ResolvedLabel> {
        let handles: Vec<_> = self
            .layers
            .iter()
            .map(|spec| {
                let client = client.clone();
                let sublayer = spec.sublayer;
                tokio::spawn(async move {
                    resolve_valid_time(|| async move { client.fetch_valid_time(sublayer).await })
                        .await
                })
            })
            .collect();

        let mut resolved = Vec::with_capacity(handles.len());
        for (spec, handle) in self.layers.iter().zip(handles) {
            let label = match handle.await {
                Ok(label) => label,
                Err(e) => {
                    tracing::error!("label task for layer {} failed: {}", spec.id, e);
                    Err(LayerError::Task(e.to_string()))
                }
            };
            resolved.push(ResolvedLabel {
                id: spec.id.clone(),
                title: spec.title.clone(),
                label,
            });
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn spec(id: &str, title: &str, sublayer: u32) -> LayerSpec {
        LayerSpec {
            id: id.into(),
            title: title.to_string(),
            sublayer,
        }
    }

    fn impact_layers() -> Vec<LayerSpec> {
        vec![
            spec("days1to3", "Overall Impact (Days 1-3)", 0),
            spec("day1", "Overall Impact (Day 1)", 1),
            spec("day2", "Overall Impact (Day 2)", 2),
            spec("day3", "Overall Impact (Day 3)", 3),
        ]
    }

    fn mount_valid_time(sublayer: u32, raw: &str) -> Mock {
        Mock::given(method("GET"))
            .and(path(format!("/{sublayer}/query")))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "features": [{"attributes": {"valid_time": raw}}]
            })))
    }

    #[test]
    fn test_registry_preserves_order() {
        let registry = LayerRegistry::new(impact_layers()).unwrap();
        let ids: Vec<_> = registry.ids().iter().map(ToString::to_string).collect();
        assert_eq!(ids, ["days1to3", "day1", "day2", "day3"]);
        assert_eq!(registry.default_selection().as_str(), "days1to3");
    }

    #[test]
    fn test_registry_lookup() {
        let registry = LayerRegistry::new(impact_layers()).unwrap();
        let day2 = registry.get(&"day2".into()).unwrap();
        assert_eq!(day2.title, "Overall Impact (Day 2)");
        assert_eq!(day2.sublayer, 2);
        assert!(registry.get(&"day9".into()).is_none());
    }

    #[test]
    fn test_registry_rejects_empty() {
        let result = LayerRegistry::new(Vec::new());
        assert!(matches!(result, Err(LayerError::EmptyRegistry)));
    }

    #[test]
    fn test_registry_rejects_duplicate_ids() {
        let layers = vec![spec("day1", "Day 1", 1), spec("day1", "Day 1 again", 2)];
        let result = LayerRegistry::new(layers);
        assert!(matches!(result, Err(LayerError::DuplicateLayer(id)) if id == "day1"));
    }

    #[tokio::test]
    async fn test_resolve_all_returns_labels_in_registry_order() {
        let mock_server = MockServer::start().await;
        mount_valid_time(0, "00Z 01/15/24 - 08Z 01/17/24")
            .mount(&mock_server)
            .await;
        mount_valid_time(1, "00Z 01/15/24 - 00Z 01/16/24")
            .mount(&mock_server)
            .await;

        let registry = LayerRegistry::new(vec![
            spec("days1to3", "Overall Impact (Days 1-3)", 0),
            spec("day1", "Overall Impact (Day 1)", 1),
        ])
        .unwrap();
        let client = FeatureClient::new_with_base_url(&mock_server.uri());

        let resolved = registry.resolve_all(&client).await;

        assert_eq!(resolved.len(), 2);
        assert_eq!(resolved[0].id.as_str(), "days1to3");
        assert_eq!(
            resolved[0].label.as_deref().unwrap(),
            "Sun Jan 14 07:00PM ET \u{2013} Wed Jan 17 03:00AM ET"
        );
        assert_eq!(resolved[1].id.as_str(), "day1");
        assert_eq!(
            resolved[1].label.as_deref().unwrap(),
            "Sun Jan 14 07:00PM ET \u{2013} Mon Jan 15 07:00PM ET"
        );
    }

    #[tokio::test]
    async fn test_resolve_all_failures_stay_per_layer() {
        let mock_server = MockServer::start().await;
        mount_valid_time(0, "00Z 01/15/24 - 08Z 01/17/24")
            .mount(&mock_server)
            .await;
        // Sublayer 1 yields an empty feature set.
        Mock::given(method("GET"))
            .and(path("/1/query"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"features": []})),
            )
            .mount(&mock_server)
            .await;

        let registry = LayerRegistry::new(vec![
            spec("days1to3", "Overall Impact (Days 1-3)", 0),
            spec("day1", "Overall Impact (Day 1)", 1),
        ])
        .unwrap();
        let client = FeatureClient::new_with_base_url(&mock_server.uri());

        let resolved = registry.resolve_all(&client).await;

        assert!(resolved[0].label.is_ok());
        assert!(matches!(resolved[1].label, Err(LayerError::EmptyResult)));
    }
}
