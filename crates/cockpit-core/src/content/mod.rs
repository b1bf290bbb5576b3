//! Episode content bound to the dial position.

mod loader;

pub use loader::{EPISODES_URL, EpisodeLoader, FetchAttempt, FetchRequest, LoadStep};

use std::collections::BTreeMap;

use serde::Deserialize;

/// Shown until the episode catalog has been loaded.
pub const LOADING_PLACEHOLDER: &str = "Loading...";

#[derive(Debug)]
pub enum CatalogError {
    Malformed(serde_json::Error),
    InvalidIndex(String),
}

/// Ordered mapping from episode index to HTML fragment.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct EpisodeCatalog {
    fragments: BTreeMap<u16, String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCatalog {
    List(Vec<Option<String>>),
    Keyed(BTreeMap<String, String>),
}

impl EpisodeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse either a JSON array of fragments or an object keyed by index.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let raw: RawCatalog = serde_json::from_str(text).map_err(CatalogError::Malformed)?;

        let mut fragments = BTreeMap::new();
        match raw {
            RawCatalog::List(items) => {
                for (index, item) in items.into_iter().enumerate() {
                    let Some(html) = item else {
                        continue;
                    };
                    let index = u16::try_from(index)
                        .map_err(|_| CatalogError::InvalidIndex(index.to_string()))?;
                    fragments.insert(index, html);
                }
            }
            RawCatalog::Keyed(entries) => {
                for (key, html) in entries {
                    let index = key
                        .trim()
                        .parse::<u16>()
                        .map_err(|_| CatalogError::InvalidIndex(key.clone()))?;
                    fragments.insert(index, html);
                }
            }
        }

        Ok(Self { fragments })
    }

    pub fn get(&self, index: u16) -> Option<&str> {
        self.fragments.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(u16, S)> for EpisodeCatalog {
    fn from_iter<I: IntoIterator<Item = (u16, S)>>(entries: I) -> Self {
        Self {
            fragments: entries
                .into_iter()
                .map(|(index, html)| (index, html.into()))
                .collect(),
        }
    }
}

/// Content state behind the episode panel.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum EpisodeContent {
    #[default]
    Loading,
    Ready(EpisodeCatalog),
}

impl EpisodeContent {
    pub fn install(&mut self, catalog: EpisodeCatalog) {
        *self = Self::Ready(catalog);
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Fragment for `index`; the placeholder while loading, empty when absent.
    pub fn resolve(&self, index: u16) -> &str {
        match self {
            Self::Loading => LOADING_PLACEHOLDER,
            Self::Ready(catalog) => catalog.get(index).unwrap_or(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_state_shows_placeholder() {
        let content = EpisodeContent::default();
        assert_eq!(content.resolve(0), "Loading...");
        assert_eq!(content.resolve(146), "Loading...");
    }

    #[test]
    fn sparse_catalog_resolves_gaps_to_empty() {
        let mut content = EpisodeContent::default();
        content.install(EpisodeCatalog::from_iter([(0, "A"), (2, "B")]));
        assert_eq!(content.resolve(0), "A");
        assert_eq!(content.resolve(1), "");
        assert_eq!(content.resolve(2), "B");
        assert_eq!(content.resolve(146), "");
    }

    #[test]
    fn array_json_uses_positions() {
        let catalog = EpisodeCatalog::from_json(r#"["<p>zero</p>", null, "<p>two</p>"]"#).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0), Some("<p>zero</p>"));
        assert_eq!(catalog.get(1), None);
        assert_eq!(catalog.get(2), Some("<p>two</p>"));
    }

    #[test]
    fn keyed_json_parses_indices() {
        let catalog = EpisodeCatalog::from_json(r#"{"0": "A", "2": "B", "146": "last"}"#).unwrap();
        assert_eq!(catalog.get(2), Some("B"));
        assert_eq!(catalog.get(146), Some("last"));
    }

    #[test]
    fn keyed_json_rejects_non_numeric_keys() {
        let err = EpisodeCatalog::from_json(r#"{"pilot": "A"}"#).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidIndex(key) if key == "pilot"));
    }

    #[test]
    fn garbage_is_malformed() {
        assert!(matches!(
            EpisodeCatalog::from_json("export const episodes = {}"),
            Err(CatalogError::Malformed(_))
        ));
    }
}
