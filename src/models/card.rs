use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::config;

// ---------------------------------------------------------------------------
// ImageUris — Image variants published for a card or card face
// ---------------------------------------------------------------------------

/// Any subset of the image sizes the upstream API publishes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageUris {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub large: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub png: Option<String>,
}

impl ImageUris {
    /// Pick the image to display: `normal`, then `small`, `large`, `png`.
    pub fn preferred(&self) -> Option<&str> {
        self.normal
            .as_deref()
            .or(self.small.as_deref())
            .or(self.large.as_deref())
            .or(self.png.as_deref())
    }
}

// ---------------------------------------------------------------------------
// CardFace — One face of a multi-faced card
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardFace {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uris: Option<ImageUris>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ---------------------------------------------------------------------------
// Card — A card object as returned by the search API
// ---------------------------------------------------------------------------

/// A card as returned by the upstream search API.
///
/// Fields the crate does not interpret are kept in `extra`, so a card
/// serializes back to what the API sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_line: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uris: Option<ImageUris>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card_faces: Option<Vec<CardFace>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scryfall_uri: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Card {
    /// Image variants for the card.
    ///
    /// Multi-faced cards carry no top-level images; the first face that has
    /// any is used instead.
    pub fn images(&self) -> Option<&ImageUris> {
        self.image_uris.as_ref().or_else(|| {
            self.card_faces
                .as_ref()?
                .iter()
                .find_map(|face| face.image_uris.as_ref())
        })
    }

    /// The preferred image URL, if the card has any image.
    pub fn image_url(&self) -> Option<&str> {
        self.images().and_then(ImageUris::preferred)
    }

    /// Link to the card's detail page.
    ///
    /// Falls back to a web search for the card's name when the API did not
    /// provide a direct link.
    pub fn detail_url(&self) -> String {
        if let Some(uri) = &self.scryfall_uri {
            return uri.clone();
        }
        reqwest::Url::parse_with_params(config::SCRYFALL_WEB_SEARCH, &[("q", self.name.as_str())])
            .map(String::from)
            .unwrap_or_else(|_| config::SCRYFALL_WEB_SEARCH.to_string())
    }
}
