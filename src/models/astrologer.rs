use bson::Document;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::store::StoreError;

/// An astrologer profile as stored and served.
#[derive(Clone, Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Astrologer {
    pub id: String,
    pub username: String,
    /// Spoken languages.
    pub language: Vec<String>,
    /// Specialty tags.
    pub expertise: Vec<String>,
    /// Years of experience.
    pub experience: u32,
    /// Consultation price.
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_pic: Option<String>,
    /// Excluded from listing responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Astrologer {
    pub fn from_doc(doc: Document) -> Result<Self, StoreError> {
        Ok(bson::from_document(doc)?)
    }
}

/// Body of create and update requests. Every field is optional at the wire
/// level; required-ness is enforced per operation by the service.
#[derive(Clone, Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AstrologerRequest {
    pub username: Option<String>,
    pub language: Option<Vec<String>>,
    pub expertise: Option<Vec<String>>,
    pub experience: Option<u32>,
    pub price: Option<f64>,
    /// A pre-uploaded image URL. A multipart file under the same field name
    /// takes precedence.
    pub profile_pic: Option<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_are_camel_case() {
        let astrologer = Astrologer {
            id: "a1".into(),
            username: "Ramesh".into(),
            language: vec!["Hindi".into()],
            expertise: vec!["Tarot".into()],
            experience: 4,
            price: 150.0,
            profile_pic: Some("https://media.test/p.png".into()),
            description: None,
            created_at: "2024-01-01T00:00:00Z".into(),
            updated_at: "2024-01-01T00:00:00Z".into(),
        };
        let json = serde_json::to_value(&astrologer).unwrap();
        assert_eq!(json["profilePic"], "https://media.test/p.png");
        assert_eq!(json["createdAt"], "2024-01-01T00:00:00Z");
        assert!(json.get("description").is_none());
    }

    #[test]
    fn from_doc_reads_store_documents() {
        let doc = bson::doc! {
            "id": "a1",
            "username": "Ramesh",
            "language": ["Hindi"],
            "expertise": ["Tarot"],
            "experience": 4_i64,
            "price": 150.0,
            "profilePic": "https://media.test/p.png",
            "createdAt": "2024-01-01T00:00:00Z",
            "updatedAt": "2024-01-01T00:00:00Z",
        };
        let astrologer = Astrologer::from_doc(doc).unwrap();
        assert_eq!(astrologer.username, "Ramesh");
        assert_eq!(astrologer.experience, 4);
        assert_eq!(astrologer.language, vec!["Hindi"]);
        assert!(astrologer.description.is_none());
    }
}
