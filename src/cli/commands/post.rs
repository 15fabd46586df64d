use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, Utc};
use log::{info, warn};

use crate::cli::types::PostAction;
use crate::config::Config;
use crate::content::{Post, PostDraft, PostStore};
use crate::front_matter::{self, MarkdownSource};
use crate::markdown;
use crate::slug::slugify;
use crate::toc::{inject_anchors_with, Outline, TocOptions};
use crate::utils::date::format_date_tr;
use crate::utils::error::{BoxResult, KalemError};

/// Handle the post subcommands
pub fn handle_post_command(action: &PostAction, config: &Config) -> BoxResult<()> {
    let mut store = PostStore::open(config.store_path())?;
    let toc_options = config.toc.toc_options();

    match action {
        PostAction::List => {
            for post in store.list_posts() {
                println!("{}  {}  {}", format_date_tr(&post.pub_date), post.slug, post.title);
            }
        }
        PostAction::Show { slug, toc } => {
            let post = store
                .get_post(slug)
                .ok_or_else(|| KalemError::NotFound(format!("post '{}'", slug)))?;

            if *toc {
                let outline_options = config.toc.outline_options();
                let outline = Outline::build(&post.toc(&toc_options), outline_options.max_depth);
                println!("{}", outline.to_markdown(&outline_options));
            } else {
                println!("{}\n{}\n", post.title, post.description);
                println!("{}", post.anchored_content(&toc_options));
            }
        }
        PostAction::New { title, description, content, hero_image, alt_text, topic, no_export } => {
            let draft = PostDraft {
                title: title.clone(),
                description: description.clone(),
                content: read_body(content.as_deref(), &toc_options)?.unwrap_or_default(),
                hero_image: hero_image.clone(),
                alt_text: alt_text.clone(),
                topic_id: *topic,
            };

            let post = store.create_post(draft)?;
            store.save()?;
            if !*no_export {
                front_matter::export_post(config.content_path(), &post)?;
            }
            println!("{}", post.slug);
        }
        PostAction::Edit {
            slug,
            title,
            description,
            content,
            hero_image,
            alt_text,
            topic,
            no_topic,
            no_export,
        } => {
            let current = store
                .get_post(slug)
                .ok_or_else(|| KalemError::NotFound(format!("post '{}'", slug)))?;
            let old_slug = current.slug.clone();

            let mut draft = PostDraft::from_post(current);
            if let Some(title) = title {
                draft.title = title.clone();
            }
            if let Some(description) = description {
                draft.description = description.clone();
            }
            if let Some(body) = read_body(content.as_deref(), &toc_options)? {
                draft.content = body;
            }
            if let Some(hero_image) = hero_image {
                draft.hero_image = hero_image.clone();
            }
            if let Some(alt_text) = alt_text {
                draft.alt_text = alt_text.clone();
            }
            if topic.is_some() {
                draft.topic_id = *topic;
            }
            if *no_topic {
                draft.topic_id = None;
            }

            let post = store.update_post(&old_slug, draft)?;
            store.save()?;
            if !*no_export {
                mirror_update(&config.content_path(), &old_slug, &post)?;
            }
            println!("{}", post.slug);
        }
        PostAction::Delete { slug, keep_export } => {
            let key = store
                .get_post(slug)
                .map(|post| post.slug.clone())
                .ok_or_else(|| KalemError::NotFound(format!("post '{}'", slug)))?;

            let post = store.delete_post(&key)?;
            store.save()?;
            if !*keep_export {
                front_matter::remove_exported(config.content_path(), &post.slug)?;
            }
            println!("Deleted {}", post.slug);
        }
        PostAction::Import { dir } => {
            let dir = dir.clone().unwrap_or_else(|| config.content_path());
            let imported = import_sources(&mut store, front_matter::read_markdown_dir(&dir)?, &toc_options)?;
            store.save()?;
            println!("{} posts imported from {}", imported, dir.display());
        }
    }

    Ok(())
}

/// Load a body file as anchored HTML
fn read_body(file: Option<&Path>, options: &TocOptions) -> BoxResult<Option<String>> {
    match file {
        Some(file) => {
            let html = markdown::render_source(file)?;
            Ok(Some(inject_anchors_with(&html, options)))
        }
        None => Ok(None),
    }
}

/// Rewrite the markdown copy, dropping the old file when the slug changed
fn mirror_update(dir: &Path, old_slug: &str, post: &Post) -> BoxResult<PathBuf> {
    if old_slug != post.slug {
        front_matter::remove_exported(dir, old_slug)?;
    }
    front_matter::export_post(dir, post)
}

/// Create a post for each markdown source whose title is not stored yet
fn import_sources(store: &mut PostStore, sources: Vec<MarkdownSource>, options: &TocOptions) -> BoxResult<usize> {
    let mut imported = 0;

    for source in sources {
        let fm = source.front_matter;
        let title = if fm.title.trim().is_empty() {
            source
                .path
                .file_stem()
                .map(|stem| stem.to_string_lossy().replace('-', " "))
                .unwrap_or_default()
        } else {
            fm.title.clone()
        };

        if store.get_post(&slugify(&title)).is_some() {
            warn!("Skipping {}: '{}' already exists", source.path.display(), title);
            continue;
        }

        let description = if fm.description.trim().is_empty() { title.clone() } else { fm.description.clone() };
        let draft = PostDraft {
            title,
            description,
            content: inject_anchors_with(&markdown::markdown_to_html(&source.body), options),
            hero_image: fm.hero_image.clone(),
            alt_text: fm.alt_text.clone(),
            topic_id: None,
        };

        let pub_date = fm.pub_date.as_deref().and_then(parse_pub_date).unwrap_or_else(Utc::now);
        let post = store.create_post_at(draft, pub_date)?;
        info!("Imported {} as {}", source.path.display(), post.slug);
        imported += 1;
    }

    Ok(imported)
}

/// Accept `YYYY-MM-DD` or a full RFC 3339 timestamp
fn parse_pub_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
