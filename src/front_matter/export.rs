use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use walkdir::WalkDir;

use crate::content::Post;
use crate::front_matter::parser::{parse, render};
use crate::front_matter::types::FrontMatter;
use crate::utils::error::BoxResult;
use crate::utils::{fs, path};

/// A markdown file read back from the content directory
#[derive(Debug, Clone)]
pub struct MarkdownSource {
    pub path: PathBuf,
    pub front_matter: FrontMatter,
    pub body: String,
}

/// Where the markdown copy of `slug` lives
pub fn exported_path<P: AsRef<Path>>(dir: P, slug: &str) -> PathBuf {
    dir.as_ref().join(format!("{}.md", slug))
}

/// Write `<dir>/<slug>.md` for a post
pub fn export_post<P: AsRef<Path>>(dir: P, post: &Post) -> BoxResult<PathBuf> {
    let target = exported_path(&dir, &post.slug);
    let text = render(&FrontMatter::from(post), &post.content)?;
    fs::write_file(&target, &text)?;
    debug!("Exported {} to {}", post.slug, target.display());
    Ok(target)
}

/// Delete the markdown copy of `slug`, if there is one
pub fn remove_exported<P: AsRef<Path>>(dir: P, slug: &str) -> BoxResult<bool> {
    fs::remove_file_if_exists(exported_path(dir, slug))
}

/// Export every post, returning how many files were written
pub fn export_all<'a, P, I>(dir: P, posts: I) -> BoxResult<usize>
where
    P: AsRef<Path>,
    I: IntoIterator<Item = &'a Post>,
{
    let mut count = 0;
    for post in posts {
        export_post(&dir, post)?;
        count += 1;
    }
    info!("Exported {} posts to {}", count, dir.as_ref().display());
    Ok(count)
}

/// Read every markdown file under `dir`, sorted by path
pub fn read_markdown_dir<P: AsRef<Path>>(dir: P) -> BoxResult<Vec<MarkdownSource>> {
    let dir = dir.as_ref();
    if !dir.exists() {
        warn!("Content directory does not exist: {}", dir.display());
        return Ok(Vec::new());
    }

    let mut sources = Vec::new();
    for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
        let file = entry.path();
        if !file.is_file() || !path::is_markdown(file) {
            continue;
        }

        let (front_matter, body) = parse(&fs::read_file(file)?)?;
        sources.push(MarkdownSource {
            path: file.to_path_buf(),
            front_matter,
            body,
        });
    }

    sources.sort_by(|a, b| a.path.cmp(&b.path));
    debug!("Read {} markdown files from {}", sources.len(), dir.display());
    Ok(sources)
}
