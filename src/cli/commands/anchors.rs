use std::path::{Path, PathBuf};

use log::{debug, error, info};
use rayon::prelude::*;
use walkdir::WalkDir;

use crate::cli::types::Commands;
use crate::config::Config;
use crate::front_matter;
use crate::toc::{
    add_anchor_spans, inject_anchors_with, remove_toc, render_toc, replace_toc, IdPolicy, OutlineOptions,
    TocOptions,
};
use crate::utils::error::{BoxResult, KalemError};
use crate::utils::{fs, path};

/// Handle the anchors command
pub fn handle_anchors_command(command: &Commands, config: &Config) -> BoxResult<()> {
    if let Commands::Anchors { path: target, levels, overwrite, spans, toc, strip_toc, write } = command {
        let mut options = config.toc.toc_options();
        if let Some(levels) = levels {
            options.levels = *levels;
        }
        if *overwrite {
            options.id_policy = IdPolicy::Overwrite;
        }

        let outline_options = config.toc.outline_options();
        let block = match (*toc, *strip_toc) {
            (true, _) => TocBlock::Refresh(&outline_options),
            (_, true) => TocBlock::Strip,
            _ => TocBlock::Keep,
        };
        let job = AnchorJob { options: &options, spans: *spans, block };

        let files = collect_files(target)?;
        info!("Anchoring {} files", files.len());

        // Files are independent; each gets its own id registry
        let results: Vec<(PathBuf, Result<String, String>)> = files
            .par_iter()
            .map(|file| {
                let result = anchor_file(file, &job).map_err(|e| e.to_string());
                (file.clone(), result)
            })
            .collect();

        let mut failures = 0;
        let mut changed = 0;
        for (file, result) in results {
            match result {
                Ok(text) if *write => {
                    if fs::read_file(&file)? != text {
                        fs::write_file(&file, &text)?;
                        changed += 1;
                        debug!("Updated {}", file.display());
                    }
                }
                Ok(text) => {
                    if files.len() > 1 {
                        println!("==> {} <==", file.display());
                    }
                    println!("{}", text);
                }
                Err(e) => {
                    error!("Failed to anchor {}: {}", file.display(), e);
                    failures += 1;
                }
            }
        }

        if *write {
            println!("{} of {} files updated", changed, files.len());
        }
        if failures > 0 {
            return Err(KalemError::Generic(format!("{} files could not be processed", failures)).into());
        }
    }
    Ok(())
}

/// What to do with a table of contents block at the top of a document
#[derive(Debug, Clone, Copy)]
pub enum TocBlock<'a> {
    Keep,
    Refresh(&'a OutlineOptions),
    Strip,
}

/// Settings shared by every file of one anchors run
#[derive(Debug, Clone, Copy)]
pub struct AnchorJob<'a> {
    pub options: &'a TocOptions,
    pub spans: bool,
    pub block: TocBlock<'a>,
}

/// Anchor one HTML document according to `job`
pub fn anchor_document(html: &str, job: &AnchorJob<'_>) -> String {
    let mut anchored = inject_anchors_with(html, job.options);
    if job.spans {
        anchored = add_anchor_spans(&anchored, job.options);
    }

    match job.block {
        TocBlock::Keep => anchored,
        TocBlock::Refresh(outline) => replace_toc(&anchored, &render_toc(&anchored, job.options, outline)),
        TocBlock::Strip => remove_toc(&anchored),
    }
}

/// Anchor a file's contents. Markdown keeps its front matter untouched.
fn anchor_file(file: &Path, job: &AnchorJob<'_>) -> BoxResult<String> {
    let text = fs::read_file(file)?;

    if !path::is_markdown(file) {
        return Ok(anchor_document(&text, job));
    }

    match front_matter::split(&text)? {
        (Some(yaml), body) => Ok(format!("---\n{}---\n\n{}", yaml, anchor_document(body, job))),
        (None, body) => Ok(anchor_document(body, job)),
    }
}

/// A single file, or every content file below a directory
fn collect_files(target: &Path) -> BoxResult<Vec<PathBuf>> {
    if target.is_file() {
        return Ok(vec![target.to_path_buf()]);
    }
    if !target.is_dir() {
        return Err(KalemError::NotFound(target.display().to_string()).into());
    }

    let mut files: Vec<PathBuf> = WalkDir::new(target)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && path::is_content_file(e.path()))
        .map(|e| e.into_path())
        .collect();
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn job<'a>(options: &'a TocOptions, spans: bool, block: TocBlock<'static>) -> AnchorJob<'a> {
        AnchorJob { options, spans, block }
    }

    #[test]
    fn test_anchor_document() {
        let options = TocOptions::default();
        assert_eq!(
            anchor_document("<h2>Giriş</h2>", &job(&options, false, TocBlock::Keep)),
            "<h2 id=\"giris\">Giriş</h2>"
        );

        let with_spans = anchor_document("<h2>Giriş</h2>", &job(&options, true, TocBlock::Keep));
        assert!(with_spans.contains("<span class=\"toc-anchor\" id=\"anchor-giris\"></span>"));
    }

    #[test]
    fn test_toc_block_refresh_and_strip() {
        let options = TocOptions::default();
        let outline = OutlineOptions::default();
        let refresh = AnchorJob { options: &options, spans: false, block: TocBlock::Refresh(&outline) };

        let once = anchor_document("<h2>Giriş</h2>", &refresh);
        assert!(once.starts_with("<nav class=\"toc\">"));
        assert!(once.contains("<a href=\"#giris\">Giriş</a>"));
        assert!(once.ends_with("\n<h2 id=\"giris\">Giriş</h2>"));
        assert_eq!(anchor_document(&once, &refresh), once);

        let stripped = anchor_document(&once, &job(&options, false, TocBlock::Strip));
        assert_eq!(stripped, "<h2 id=\"giris\">Giriş</h2>");
    }

    #[test]
    fn test_anchor_markdown_keeps_front_matter() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("yazi.md");
        std::fs::write(&file, "---\ntitle: Yazı\n---\n\n<h2>Giriş</h2>").unwrap();

        let options = TocOptions::default();
        let text = anchor_file(&file, &job(&options, false, TocBlock::Keep)).unwrap();
        assert_eq!(text, "---\ntitle: Yazı\n---\n\n<h2 id=\"giris\">Giriş</h2>");
    }

    #[test]
    fn test_collect_files() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("alt")).unwrap();
        std::fs::write(dir.path().join("b.html"), "").unwrap();
        std::fs::write(dir.path().join("alt/a.md"), "").unwrap();
        std::fs::write(dir.path().join("image.png"), "").unwrap();

        let files = collect_files(dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("alt/a.md"), dir.path().join("b.html")]);

        assert!(collect_files(&dir.path().join("missing")).is_err());
    }
}
