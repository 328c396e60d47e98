use crate::color::{RESET_KEY, is_reset_key};
use crate::error::ValidationError;

/// Status text and raw color key extracted from a status command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStatus {
    pub status: String,
    pub color: String,
}

/// Split a status command into status text and color key.
///
/// With an explicit color the raw text is kept verbatim. Without one (or
/// when it is the reset sentinel) the first `word_count` words form the
/// status and the word after them, if any, is the color key.
pub fn parse_status(
    raw: &str,
    explicit_color: Option<&str>,
    word_count: u32,
) -> Result<ParsedStatus, ValidationError> {
    let required = word_count.max(1);
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    if tokens.len() < required as usize {
        return Err(ValidationError::InsufficientWords { required });
    }

    let explicit = explicit_color.filter(|color| !is_reset_key(color));

    if let Some(color) = explicit {
        return Ok(ParsedStatus {
            status: raw.to_string(),
            color: color.to_string(),
        });
    }

    let (words, rest) = tokens.split_at(required as usize);
    let color = rest
        .first()
        .map(|token| (*token).to_string())
        .unwrap_or_else(|| String::from(RESET_KEY));

    Ok(ParsedStatus {
        status: words.join(" "),
        color,
    })
}
