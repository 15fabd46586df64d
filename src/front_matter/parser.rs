use crate::front_matter::types::FrontMatter;
use crate::utils::error::{BoxResult, KalemError};

const DELIMITER: &str = "---";

/// Check if content opens with a front matter delimiter line
pub fn has_front_matter(content: &str) -> bool {
    content
        .lines()
        .next()
        .map(|line| line.trim_end() == DELIMITER)
        .unwrap_or(false)
}

/// Split content into its raw YAML block and the body after it.
///
/// Content without front matter comes back whole with `None`.
pub fn split(content: &str) -> BoxResult<(Option<&str>, &str)> {
    if !has_front_matter(content) {
        return Ok((None, content));
    }

    let first_line = content.split_inclusive('\n').next().unwrap_or(content);
    let rest = &content[first_line.len()..];

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let yaml = &rest[..offset];
            let body = rest[offset + line.len()..].trim_start_matches(|c| c == '\r' || c == '\n');
            return Ok((Some(yaml), body));
        }
        offset += line.len();
    }

    Err(KalemError::FrontMatter("missing closing delimiter".to_string()).into())
}

/// Parse front matter and body. Missing or empty front matter yields defaults.
pub fn parse(content: &str) -> BoxResult<(FrontMatter, String)> {
    let (yaml, body) = split(content)?;

    let front_matter = match yaml {
        Some(yaml) if !yaml.trim().is_empty() => serde_yaml::from_str(yaml)
            .map_err(|e| KalemError::FrontMatter(format!("invalid YAML: {}", e)))?,
        _ => FrontMatter::default(),
    };

    Ok((front_matter, body.to_string()))
}

/// Render a front matter block followed by the body
pub fn render(front_matter: &FrontMatter, body: &str) -> BoxResult<String> {
    let yaml = serde_yaml::to_string(front_matter)
        .map_err(|e| KalemError::FrontMatter(format!("failed to serialize: {}", e)))?;
    Ok(format!("{}\n{}{}\n\n{}", DELIMITER, yaml, DELIMITER, body))
}
