//! Photo data model and the wire shapes returned by the photo search API.
//!
//! `Photo` is the immutable domain record used everywhere in the gallery.
//! The `Api*` types mirror the JSON payloads and are mapped into `Photo`
//! at the repository boundary, so nullable text fields never leak past it.

use serde::{Deserialize, Serialize};

/// Image URLs for one photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoUrls {
    /// Thumbnail-sized rendition used by the grid
    pub small: String,
    /// Full-resolution rendition used by the details view
    pub full: String,
}

/// The photographer that owns a photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotoOwner {
    pub name: String,
}

/// A single photo as shown by the gallery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Photo {
    pub id: String,
    pub urls: PhotoUrls,
    pub user: PhotoOwner,
    pub description: String,
    pub alt_description: String,
    /// ISO 8601 creation timestamp, kept verbatim
    pub created_at: String,
    /// Intrinsic width in pixels
    pub width: u32,
    /// Intrinsic height in pixels
    pub height: u32,
}

impl Photo {
    /// Width divided by height.
    ///
    /// Degenerate dimensions are treated as square so layout never divides by zero.
    pub fn aspect_ratio(&self) -> f32 {
        if self.width == 0 || self.height == 0 {
            1.0
        } else {
            self.width as f32 / self.height as f32
        }
    }

    /// Text used for captions and image alt text.
    pub fn caption(&self) -> &str {
        if !self.description.is_empty() {
            &self.description
        } else if !self.alt_description.is_empty() {
            &self.alt_description
        } else {
            "Photo"
        }
    }
}

/// Photo record as returned by the search and by-id endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiPhoto {
    pub id: String,
    pub urls: ApiPhotoUrls,
    pub user: ApiPhotoOwner,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub alt_description: Option<String>,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPhotoUrls {
    pub small: String,
    pub full: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiPhotoOwner {
    #[serde(default)]
    pub name: String,
}

/// Body of the search endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiSearchResponse {
    #[serde(default)]
    pub results: Vec<ApiPhoto>,
}

/// Body the provider sends alongside a non-success status.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub errors: Vec<String>,
}

impl From<ApiPhoto> for Photo {
    fn from(photo: ApiPhoto) -> Self {
        Self {
            id: photo.id,
            urls: PhotoUrls {
                small: photo.urls.small,
                full: photo.urls.full,
            },
            user: PhotoOwner {
                name: photo.user.name,
            },
            description: photo.description.unwrap_or_default(),
            alt_description: photo.alt_description.unwrap_or_default(),
            created_at: photo.created_at,
            width: photo.width,
            height: photo.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_photo_maps_null_text_to_empty() {
        let json = serde_json::json!({
            "id": "abc",
            "urls": { "small": "s.jpg", "full": "f.jpg", "raw": "r.jpg" },
            "user": { "name": "Ada", "username": "ada" },
            "description": null,
            "alt_description": "a cat on a mat",
            "created_at": "2023-01-01T00:00:00Z",
            "width": 4000,
            "height": 3000,
            "likes": 12
        });

        let api: ApiPhoto = serde_json::from_value(json).unwrap();
        let photo = Photo::from(api);

        assert_eq!(photo.id, "abc");
        assert_eq!(photo.urls.small, "s.jpg");
        assert_eq!(photo.user.name, "Ada");
        assert_eq!(photo.description, "");
        assert_eq!(photo.alt_description, "a cat on a mat");
        assert_eq!(photo.caption(), "a cat on a mat");
        assert_eq!((photo.width, photo.height), (4000, 3000));
    }

    #[test]
    fn test_aspect_ratio_guards_zero_height() {
        let mut photo = Photo::from(ApiPhoto {
            id: "x".into(),
            urls: ApiPhotoUrls { small: String::new(), full: String::new() },
            user: ApiPhotoOwner { name: String::new() },
            description: None,
            alt_description: None,
            created_at: String::new(),
            width: 300,
            height: 0,
        });
        assert_eq!(photo.aspect_ratio(), 1.0);

        photo.height = 200;
        assert_eq!(photo.aspect_ratio(), 1.5);
        assert_eq!(photo.caption(), "Photo");
    }

    #[test]
    fn test_error_body_defaults_when_missing() {
        let body: ApiErrorBody = serde_json::from_str("{}").unwrap();
        assert!(body.errors.is_empty());

        let body: ApiErrorBody = serde_json::from_str(r#"{"errors":["OAuth error: The access token is invalid"]}"#).unwrap();
        assert_eq!(body.errors, vec!["OAuth error: The access token is invalid".to_string()]);
    }
}
