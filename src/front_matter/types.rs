use serde::{Deserialize, Serialize};

use crate::content::Post;

/// Front matter written at the top of an exported post
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FrontMatter {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Publication day, `YYYY-MM-DD`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pub_date: Option<String>,
    #[serde(default)]
    pub hero_image: String,
    #[serde(default)]
    pub alt_text: String,
}

impl From<&Post> for FrontMatter {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            description: post.description.clone(),
            pub_date: Some(post.pub_date.format("%Y-%m-%d").to_string()),
            hero_image: post.hero_image.clone(),
            alt_text: post.alt_text.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_from_post() {
        let post = Post {
            slug: "miras".to_string(),
            title: "Miras".to_string(),
            description: "Mirasçılık belgesi".to_string(),
            content: String::new(),
            hero_image: "/assets/blog/miras.jpg".to_string(),
            alt_text: "Terazi".to_string(),
            topic_id: None,
            pub_date: Utc.with_ymd_and_hms(2024, 2, 9, 15, 30, 0).unwrap(),
            updated_date: None,
        };

        let fm = FrontMatter::from(&post);
        assert_eq!(fm.pub_date.as_deref(), Some("2024-02-09"));
        assert_eq!(fm.hero_image, "/assets/blog/miras.jpg");
        assert_eq!(fm.alt_text, "Terazi");
    }

    #[test]
    fn test_yaml_keys_are_camel_case() {
        let fm: FrontMatter = serde_yaml::from_str(
            "title: Giriş\nheroImage: /a.jpg\naltText: resim\npubDate: \"2024-01-01\"\n",
        ).unwrap();
        assert_eq!(fm.hero_image, "/a.jpg");
        assert_eq!(fm.alt_text, "resim");
        assert_eq!(fm.description, "");
    }
}
