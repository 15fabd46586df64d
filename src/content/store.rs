use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::post::{Post, PostDraft};
use super::topic::{same_name, Topic, TopicDraft};
use crate::slug::{slugify, SlugLookup};
use crate::utils::error::{BoxResult, KalemError};
use crate::utils::fs;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    posts: Vec<Post>,
    #[serde(default)]
    topics: Vec<Topic>,
}

/// Older stores are a bare array of posts
#[derive(Deserialize)]
#[serde(untagged)]
enum StoreFile {
    Full(StoreData),
    Posts(Vec<Post>),
}

/// Posts and topics kept in a single JSON file
#[derive(Debug, Clone)]
pub struct PostStore {
    path: PathBuf,
    data: StoreData,
}

impl PostStore {
    /// Load the store at `path`; a missing file is an empty store
    pub fn open<P: AsRef<Path>>(path: P) -> BoxResult<Self> {
        let path = path.as_ref().to_path_buf();

        let data = if path.exists() {
            let raw = fs::read_file(&path)?;
            if raw.trim().is_empty() {
                StoreData::default()
            } else {
                match serde_json::from_str::<StoreFile>(&raw).map_err(|e| {
                    KalemError::Store(format!("Failed to parse {}: {}", path.display(), e))
                })? {
                    StoreFile::Full(data) => data,
                    StoreFile::Posts(posts) => StoreData { posts, topics: Vec::new() },
                }
            }
        } else {
            debug!("No store at {}, starting empty", path.display());
            StoreData::default()
        };

        info!("Loaded {} posts and {} topics from {}", data.posts.len(), data.topics.len(), path.display());
        Ok(Self { path, data })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the store back to disk as pretty JSON
    pub fn save(&self) -> BoxResult<()> {
        let json = serde_json::to_string_pretty(&self.data)
            .map_err(|e| KalemError::Store(format!("Failed to serialize store: {}", e)))?;
        fs::write_file(&self.path, &json)?;
        debug!("Saved store to {}", self.path.display());
        Ok(())
    }

    /// All posts, newest first
    pub fn list_posts(&self) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.data.posts.iter().collect();
        posts.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        posts
    }

    /// Find a post by slug, or by a title that slugifies to one
    pub fn get_post(&self, key: &str) -> Option<&Post> {
        self.find_post(key)
            .or_else(|| self.find_post(&slugify(key)))
    }

    fn find_post(&self, slug: &str) -> Option<&Post> {
        self.data.posts.iter().find(|post| post.slug == slug)
    }

    fn position(&self, slug: &str) -> BoxResult<usize> {
        self.data
            .posts
            .iter()
            .position(|post| post.slug == slug)
            .ok_or_else(|| KalemError::NotFound(format!("post '{}'", slug)).into())
    }

    /// Create a post under a fresh unique slug
    pub fn create_post(&mut self, draft: PostDraft) -> BoxResult<Post> {
        self.create_post_at(draft, Utc::now())
    }

    /// Create a post published at `now`
    pub fn create_post_at(&mut self, draft: PostDraft, now: DateTime<Utc>) -> BoxResult<Post> {
        draft.validate()?;
        self.check_topic(draft.topic_id)?;

        let slug = self.unique_slug(&draft.title);
        if self.exists(&slug) {
            return Err(KalemError::Store(format!("slug '{}' is already taken", slug)).into());
        }

        let post = draft.into_post(slug, now, now);
        info!("Created post '{}'", post.slug);
        self.data.posts.push(post.clone());
        Ok(post)
    }

    /// Replace the fields of the post keyed `slug`.
    ///
    /// The slug only changes when the title does.
    pub fn update_post(&mut self, slug: &str, draft: PostDraft) -> BoxResult<Post> {
        self.update_post_at(slug, draft, Utc::now())
    }

    pub fn update_post_at(&mut self, slug: &str, draft: PostDraft, now: DateTime<Utc>) -> BoxResult<Post> {
        draft.validate()?;
        self.check_topic(draft.topic_id)?;
        let index = self.position(slug)?;

        let new_slug = self.unique_slug_for_update(&draft.title, slug);
        if self.exists_excluding(&new_slug, slug) {
            return Err(KalemError::Store(format!("slug '{}' is already taken", new_slug)).into());
        }
        if new_slug != slug {
            info!("Post '{}' renamed to '{}'", slug, new_slug);
        }

        let pub_date = self.data.posts[index].pub_date;
        let post = draft.into_post(new_slug, pub_date, now);
        self.data.posts[index] = post.clone();
        Ok(post)
    }

    /// Remove a post and return it
    pub fn delete_post(&mut self, slug: &str) -> BoxResult<Post> {
        let index = self.position(slug)?;
        let post = self.data.posts.remove(index);
        info!("Deleted post '{}'", post.slug);
        Ok(post)
    }

    /// All topics, by name
    pub fn list_topics(&self) -> Vec<&Topic> {
        let mut topics: Vec<&Topic> = self.data.topics.iter().collect();
        topics.sort_by(|a, b| a.name.cmp(&b.name));
        topics
    }

    pub fn get_topic(&self, id: u32) -> Option<&Topic> {
        self.data.topics.iter().find(|topic| topic.id == id)
    }

    pub fn create_topic(&mut self, draft: TopicDraft) -> BoxResult<Topic> {
        draft.validate()?;
        self.check_topic_name(&draft.name, None)?;

        let id = self.data.topics.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let topic = draft.into_topic(id);
        info!("Created topic {} '{}'", topic.id, topic.name);
        self.data.topics.push(topic.clone());
        Ok(topic)
    }

    pub fn update_topic(&mut self, id: u32, draft: TopicDraft) -> BoxResult<Topic> {
        draft.validate()?;
        let index = self
            .data
            .topics
            .iter()
            .position(|topic| topic.id == id)
            .ok_or_else(|| KalemError::NotFound(format!("topic {}", id)))?;
        self.check_topic_name(&draft.name, Some(id))?;

        let topic = draft.into_topic(id);
        self.data.topics[index] = topic.clone();
        Ok(topic)
    }

    /// Remove a topic, detaching it from every post filed under it
    pub fn delete_topic(&mut self, id: u32) -> BoxResult<Topic> {
        let index = self
            .data
            .topics
            .iter()
            .position(|topic| topic.id == id)
            .ok_or_else(|| KalemError::NotFound(format!("topic {}", id)))?;

        for post in self.data.posts.iter_mut().filter(|p| p.topic_id == Some(id)) {
            debug!("Detaching post '{}' from topic {}", post.slug, id);
            post.topic_id = None;
        }

        Ok(self.data.topics.remove(index))
    }

    fn check_topic(&self, topic_id: Option<u32>) -> BoxResult<()> {
        match topic_id {
            Some(id) if self.get_topic(id).is_none() => {
                Err(KalemError::Validation(format!("unknown topic {}", id)).into())
            }
            _ => Ok(()),
        }
    }

    fn check_topic_name(&self, name: &str, except: Option<u32>) -> BoxResult<()> {
        let clash = self
            .data
            .topics
            .iter()
            .any(|topic| Some(topic.id) != except && same_name(&topic.name, name));
        if clash {
            return Err(KalemError::Validation(format!(
                "a topic named '{}' already exists", name.trim()
            )).into());
        }
        Ok(())
    }
}

impl SlugLookup for PostStore {
    fn exists(&self, slug: &str) -> bool {
        self.data.posts.iter().any(|post| post.slug == slug)
    }

    fn exists_excluding(&self, slug: &str, current_slug: &str) -> bool {
        self.data
            .posts
            .iter()
            .any(|post| post.slug == slug && post.slug != current_slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use tempfile::tempdir;

    fn draft(title: &str) -> PostDraft {
        PostDraft {
            title: title.to_string(),
            description: "Açıklama".to_string(),
            content: "<h2>Giriş</h2>".to_string(),
            ..PostDraft::default()
        }
    }

    fn topic(name: &str) -> TopicDraft {
        TopicDraft {
            name: name.to_string(),
            description: String::new(),
            color: "#1f2937".to_string(),
        }
    }

    fn empty_store() -> (tempfile::TempDir, PostStore) {
        let dir = tempdir().unwrap();
        let store = PostStore::open(dir.path().join("data/posts.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_create_assigns_unique_slugs() {
        let (_dir, mut store) = empty_store();

        assert_eq!(store.create_post(draft("Law 101")).unwrap().slug, "law-101");
        assert_eq!(store.create_post(draft("Law 101")).unwrap().slug, "law-101-1");
        assert_eq!(store.create_post(draft("LAW  101!")).unwrap().slug, "law-101-2");
        assert_eq!(store.list_posts().len(), 3);
    }

    #[test]
    fn test_create_validates() {
        let (_dir, mut store) = empty_store();
        let mut bad = draft("Başlık");
        bad.description = String::new();
        assert!(store.create_post(bad).is_err());

        let mut bad = draft("Başlık");
        bad.topic_id = Some(9);
        assert!(store.create_post(bad).unwrap_err().to_string().contains("unknown topic"));
    }

    #[test]
    fn test_update_keeps_slug_for_same_title() {
        let (_dir, mut store) = empty_store();
        store.create_post(draft("Same Title")).unwrap();

        let mut edit = draft("Same Title");
        edit.content = "<h2>Yeni</h2>".to_string();
        let post = store.update_post("same-title", edit).unwrap();

        assert_eq!(post.slug, "same-title");
        assert_eq!(store.get_post("same-title").unwrap().content, "<h2>Yeni</h2>");
    }

    #[test]
    fn test_update_renames_and_avoids_others() {
        let (_dir, mut store) = empty_store();
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        store.create_post_at(draft("Kira"), start).unwrap();
        store.create_post_at(draft("Tahliye"), start).unwrap();

        let post = store.update_post_at("tahliye", draft("Kira"), start + Duration::days(1)).unwrap();
        assert_eq!(post.slug, "kira-1");
        assert_eq!(post.pub_date, start);
        assert_eq!(post.updated_date, Some(start + Duration::days(1)));
        assert!(store.get_post("tahliye").is_none());
    }

    #[test]
    fn test_update_and_delete_unknown_post() {
        let (_dir, mut store) = empty_store();
        let err = store.update_post("yok", draft("Yok")).unwrap_err();
        assert_eq!(err.to_string(), "Not found: post 'yok'");
        assert!(store.delete_post("yok").is_err());
    }

    #[test]
    fn test_list_newest_first() {
        let (_dir, mut store) = empty_store();
        let day = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
        store.create_post_at(draft("Eski"), day).unwrap();
        store.create_post_at(draft("Yeni"), day + Duration::days(2)).unwrap();
        store.create_post_at(draft("Orta"), day + Duration::days(1)).unwrap();

        let slugs: Vec<&str> = store.list_posts().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["yeni", "orta", "eski"]);
    }

    #[test]
    fn test_get_post_by_title() {
        let (_dir, mut store) = empty_store();
        store.create_post(draft("İstanbul Şehri")).unwrap();
        assert!(store.get_post("istanbul-sehri").is_some());
        assert!(store.get_post("İstanbul Şehri").is_some());
    }

    #[test]
    fn test_save_and_reopen() {
        let (dir, mut store) = empty_store();
        let topic = store.create_topic(topic("Aile Hukuku")).unwrap();
        let mut with_topic = draft("Velayet");
        with_topic.topic_id = Some(topic.id);
        store.create_post(with_topic).unwrap();
        store.save().unwrap();

        let reopened = PostStore::open(dir.path().join("data/posts.json")).unwrap();
        assert_eq!(reopened.list_posts().len(), 1);
        assert_eq!(reopened.get_post("velayet").unwrap().topic_id, Some(topic.id));
        assert_eq!(reopened.list_topics()[0].name, "Aile Hukuku");
    }

    #[test]
    fn test_opens_legacy_post_array() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(
            &path,
            r#"[{"id":"giris","title":"Giriş","description":"d","pubDate":"2024-01-01T00:00:00Z"}]"#,
        ).unwrap();

        let store = PostStore::open(&path).unwrap();
        assert!(store.exists("giris"));
        assert!(store.list_topics().is_empty());
    }

    #[test]
    fn test_corrupt_store_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("posts.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(PostStore::open(&path).unwrap_err().to_string().starts_with("Store error"));
    }

    #[test]
    fn test_topics() {
        let (_dir, mut store) = empty_store();
        let ceza = store.create_topic(topic("Ceza Hukuku")).unwrap();
        let is = store.create_topic(topic("İş Hukuku")).unwrap();
        assert_eq!((ceza.id, is.id), (1, 2));

        assert!(store.create_topic(topic("ceza hukuku")).is_err());
        assert!(store.update_topic(is.id, topic("CEZA HUKUKU")).is_err());
        assert_eq!(store.update_topic(is.id, topic("İş ve Sosyal Güvenlik")).unwrap().name, "İş ve Sosyal Güvenlik");
        // Renaming a topic to its own name in another case is allowed
        assert!(store.update_topic(ceza.id, topic("CEZA HUKUKU")).is_ok());

        let mut filed = draft("Tutukluluk");
        filed.topic_id = Some(ceza.id);
        store.create_post(filed).unwrap();
        store.delete_topic(ceza.id).unwrap();
        assert_eq!(store.get_post("tutukluluk").unwrap().topic_id, None);
        assert!(store.delete_topic(ceza.id).is_err());
    }
}
