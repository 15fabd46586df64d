use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::toc::{extract_headings_with, inject_anchors_with, TocItem, TocOptions};
use crate::utils::error::{BoxResult, KalemError};

/// A published article
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Unique key, derived from the title
    #[serde(alias = "id")]
    pub slug: String,
    pub title: String,
    pub description: String,
    /// Rendered HTML body
    #[serde(default, alias = "body")]
    pub content: String,
    #[serde(default)]
    pub hero_image: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_id: Option<u32>,
    pub pub_date: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTime<Utc>>,
}

impl Post {
    /// Outline of the post body. Recomputed on every call.
    pub fn toc(&self, options: &TocOptions) -> Vec<TocItem> {
        extract_headings_with(&self.content, options)
    }

    /// Post body with every heading carrying its anchor id
    pub fn anchored_content(&self, options: &TocOptions) -> String {
        inject_anchors_with(&self.content, options)
    }
}

/// Fields an admin supplies when creating or editing a post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub hero_image: String,
    #[serde(default)]
    pub alt_text: String,
    #[serde(default)]
    pub topic_id: Option<u32>,
}

impl PostDraft {
    /// Draft holding the current values of `post`, for partial edits
    pub fn from_post(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            description: post.description.clone(),
            content: post.content.clone(),
            hero_image: post.hero_image.clone(),
            alt_text: post.alt_text.clone(),
            topic_id: post.topic_id,
        }
    }

    /// Reject drafts without a title or description
    pub fn validate(&self) -> BoxResult<()> {
        if self.title.trim().is_empty() {
            return Err(KalemError::Validation("title is required".to_string()).into());
        }
        if self.description.trim().is_empty() {
            return Err(KalemError::Validation("description is required".to_string()).into());
        }
        Ok(())
    }

    pub(crate) fn into_post(self, slug: String, pub_date: DateTime<Utc>, updated: DateTime<Utc>) -> Post {
        Post {
            slug,
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            content: self.content,
            hero_image: self.hero_image,
            alt_text: self.alt_text,
            topic_id: self.topic_id,
            pub_date,
            updated_date: Some(updated),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(content: &str) -> Post {
        PostDraft {
            title: "Kira Hukuku".to_string(),
            description: "Kiracının hakları".to_string(),
            content: content.to_string(),
            ..PostDraft::default()
        }
        .into_post("kira-hukuku".to_string(), Utc::now(), Utc::now())
    }

    #[test]
    fn test_toc_follows_content() {
        let mut post = post("<h2>Giriş</h2><h3>Tahliye</h3>");
        let toc = post.toc(&TocOptions::default());
        assert_eq!(toc.len(), 2);
        assert_eq!(toc[1].anchor_id, "tahliye");

        post.content.push_str("<h2>Sonuç</h2>");
        assert_eq!(post.toc(&TocOptions::default()).len(), 3);
    }

    #[test]
    fn test_anchored_content() {
        let post = post("<h2>Giriş</h2>");
        assert_eq!(post.anchored_content(&TocOptions::default()), "<h2 id=\"giris\">Giriş</h2>");
    }

    #[test]
    fn test_draft_validation() {
        let draft = PostDraft {
            title: "  ".to_string(),
            description: "x".to_string(),
            ..PostDraft::default()
        };
        assert!(draft.validate().unwrap_err().to_string().contains("title"));

        let draft = PostDraft {
            title: "Başlık".to_string(),
            ..PostDraft::default()
        };
        assert!(draft.validate().unwrap_err().to_string().contains("description"));
    }

    #[test]
    fn test_reads_legacy_json_fields() {
        let json = r#"{
            "id": "bosanma-davasi",
            "title": "Boşanma Davası",
            "description": "Süreç",
            "body": "<h2>Giriş</h2>",
            "heroImage": "/assets/blog/bosanma-davasi.jpg",
            "pubDate": "2024-03-01T10:00:00Z"
        }"#;
        let post: Post = serde_json::from_str(json).unwrap();

        assert_eq!(post.slug, "bosanma-davasi");
        assert_eq!(post.content, "<h2>Giriş</h2>");
        assert_eq!(post.alt_text, "");
        assert_eq!(post.updated_date, None);
    }
}
