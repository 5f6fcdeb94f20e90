use serde::{Deserialize, Deserializer, Serialize};

/// A grid entry: a locally generated id paired with a direct image URL.
///
/// The id is only a lookup key for the metadata endpoint. It is drawn
/// independently of the URL, so the metadata it resolves to need not describe
/// the pictured image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub id: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

/// Body of `GET {base}/id/{id}/info`.
///
/// Only `author`, `width` and `height` are required. Picsum sends `id` as a
/// string, other hosts send a number; both are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageMetadata {
    #[serde(
        default,
        deserialize_with = "string_or_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    pub author: String,
    pub width: u32,
    pub height: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_url: Option<String>,
}

fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(Option::<Id>::deserialize(deserializer)?.map(|id| match id {
        Id::Text(text) => text,
        Id::Number(number) => number.to_string(),
    }))
}

/// Parameters a detail screen is entered with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailParams {
    pub id: String,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
}

impl From<&ImageRef> for DetailParams {
    fn from(image: &ImageRef) -> Self {
        Self {
            id: image.id.clone(),
            image_url: Some(image.image_url.clone()),
        }
    }
}
