use serde::{Deserialize, Deserializer};

/// One page of `/v1/search` results.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Page {
    #[serde(deserialize_with = "null_as_default")]
    pub total_results: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub page: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub per_page: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub photos: Vec<Photo>,
    pub next_page: Option<String>,
}

impl Page {
    /// The cursor to request next, `None` once the server stops sending one.
    pub fn next_cursor(&self) -> Option<&str> {
        self.next_page.as_deref().filter(|cursor| !cursor.is_empty())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Photo {
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub width: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub height: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub photographer: String,
    #[serde(deserialize_with = "null_as_default")]
    pub photographer_url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub photographer_id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub liked: bool,
    #[serde(deserialize_with = "null_as_default")]
    pub src: Src,
}

/// Pre-rendered variants of a photo, keyed by size name.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Src {
    #[serde(deserialize_with = "null_as_default")]
    pub original: String,
    #[serde(deserialize_with = "null_as_default")]
    pub large2x: String,
    #[serde(deserialize_with = "null_as_default")]
    pub large: String,
    #[serde(deserialize_with = "null_as_default")]
    pub medium: String,
    #[serde(deserialize_with = "null_as_default")]
    pub small: String,
    #[serde(deserialize_with = "null_as_default")]
    pub portrait: String,
    #[serde(deserialize_with = "null_as_default")]
    pub landscape: String,
    #[serde(deserialize_with = "null_as_default")]
    pub tiny: String,
}

/// Treats an explicit `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[cfg(test)]
mod tests {
    use super::Page;

    #[test]
    fn test_decode_full_page() {
        let body = r#"{
            "total_results": 2,
            "page": 1,
            "per_page": 80,
            "photos": [{
                "id": 3573351,
                "width": 3066,
                "height": 3968,
                "url": "https://www.pexels.com/photo/3573351/",
                "photographer": "Lukas Rodriguez",
                "photographer_url": "https://www.pexels.com/@lukas-rodriguez",
                "photographer_id": 1845331,
                "liked": false,
                "src": {
                    "original": "https://images.pexels.com/photos/3573351/a.png",
                    "large2x": "https://images.pexels.com/photos/3573351/a.png?auto=compress&dpr=2",
                    "large": "https://images.pexels.com/photos/3573351/a.png?h=650",
                    "medium": "https://images.pexels.com/photos/3573351/a.png?h=350",
                    "small": "https://images.pexels.com/photos/3573351/a.png?h=130",
                    "portrait": "https://images.pexels.com/photos/3573351/a.png?fit=crop&h=1200",
                    "landscape": "https://images.pexels.com/photos/3573351/a.png?fit=crop&h=627",
                    "tiny": "https://images.pexels.com/photos/3573351/a.png?h=200"
                }
            }],
            "next_page": "https://api.pexels.com/v1/search/?page=2&per_page=80&query=nature"
        }"#;

        let page: Page = serde_json::from_str(body).unwrap();

        assert_eq!(page.total_results, 2);
        assert_eq!(page.per_page, 80);
        assert_eq!(page.photos.len(), 1);
        assert_eq!(page.photos[0].photographer_id, 1845331);
        assert_eq!(
            page.photos[0].src.large2x,
            "https://images.pexels.com/photos/3573351/a.png?auto=compress&dpr=2"
        );
        assert_eq!(
            page.next_cursor(),
            Some("https://api.pexels.com/v1/search/?page=2&per_page=80&query=nature")
        );
    }

    #[test]
    fn test_terminal_cursor() {
        let empty: Page = serde_json::from_str(r#"{"photos": [], "next_page": ""}"#).unwrap();
        let null: Page = serde_json::from_str(r#"{"next_page": null}"#).unwrap();
        let absent: Page = serde_json::from_str(r#"{"total_results": 0}"#).unwrap();

        assert_eq!(empty.next_cursor(), None);
        assert_eq!(null.next_cursor(), None);
        assert_eq!(absent.next_cursor(), None);
    }

    #[test]
    fn test_sparse_photo_defaults() {
        let page: Page =
            serde_json::from_str(r#"{"photos": [{"src": {"large2x": "https://x/cats1.jpg"}}]}"#)
                .unwrap();

        assert_eq!(page.photos[0].id, 0);
        assert_eq!(page.photos[0].src.large2x, "https://x/cats1.jpg");
        assert!(page.photos[0].src.original.is_empty());
    }

    #[test]
    fn test_null_fields_default() {
        let body = r#"{
            "total_results": null,
            "page": null,
            "photos": [
                {
                    "id": null,
                    "photographer": null,
                    "liked": null,
                    "src": {"large2x": "https://x/a.jpg", "original": null}
                },
                {"src": null}
            ],
            "next_page": null
        }"#;

        let page: Page = serde_json::from_str(body).unwrap();

        assert_eq!(page.total_results, 0);
        assert_eq!(page.photos.len(), 2);
        assert_eq!(page.photos[0].photographer, "");
        assert!(!page.photos[0].liked);
        assert_eq!(page.photos[0].src.large2x, "https://x/a.jpg");
        assert!(page.photos[1].src.large2x.is_empty());
        assert_eq!(page.next_cursor(), None);

        let page: Page = serde_json::from_str(r#"{"photos": null}"#).unwrap();

        assert!(page.photos.is_empty());
    }
}
