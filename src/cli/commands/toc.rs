use log::info;

use crate::cli::types::{Commands, TocFormat};
use crate::config::Config;
use crate::markdown;
use crate::toc::{extract_headings_with, IdPolicy, Outline, OutlineOptions};
use crate::utils::error::{BoxResult, KalemError};

/// Handle the toc command
pub fn handle_toc_command(command: &Commands, config: &Config) -> BoxResult<()> {
    if let Commands::Toc { file, levels, numbered, max_depth, format, overwrite } = command {
        let html = markdown::render_source(file)?;

        let mut toc_options = config.toc.toc_options();
        if let Some(levels) = levels {
            toc_options.levels = *levels;
        }
        if *overwrite {
            toc_options.id_policy = IdPolicy::Overwrite;
        }

        let mut outline_options = config.toc.outline_options();
        outline_options.numbered |= *numbered;
        if let Some(depth) = max_depth {
            outline_options.max_depth = *depth;
        }

        let items = extract_headings_with(&html, &toc_options);
        info!("Found {} headings in {}", items.len(), file.display());

        let outline = Outline::build(&items, outline_options.max_depth);
        println!("{}", format_toc(&outline, *format, &outline_options)?);
    }
    Ok(())
}

/// Render an outline in the requested output format
pub fn format_toc(outline: &Outline, format: TocFormat, options: &OutlineOptions) -> BoxResult<String> {
    match format {
        TocFormat::Html => Ok(outline.to_html(options)),
        TocFormat::Markdown => Ok(outline.to_markdown(options)),
        TocFormat::Json => outline
            .to_json(options)
            .map_err(|e| KalemError::Generic(format!("Failed to serialize outline: {}", e)).into()),
    }
}
