use crate::models::EventInput;

pub const TITLE_MAX_CHARS: usize = 100;
pub const DESCRIPTION_MAX_CHARS: usize = 500;

pub const TITLE_TOO_LONG: &str = "Título muito longo (máximo 100 caracteres).";
pub const DESCRIPTION_TOO_LONG: &str = "Descrição muito longa (máximo 500 caracteres).";

/// Checks an event payload before it is written.
///
/// Returns the first problem found: a missing required field (in the order
/// `title`, `start`, `end`), then the title length, then the description length.
/// Date ordering, color and `notifyTime` are deliberately left alone.
pub fn validate_event(input: &EventInput) -> Result<(), String> {
    let required = [
        ("title", input.title.as_deref()),
        ("start", input.start.as_deref()),
        ("end", input.end.as_deref()),
    ];
    for (field, value) in required {
        if value.map_or(true, |v| v.trim().is_empty()) {
            return Err(format!("Campo obrigatório ausente ou inválido: {}", field));
        }
    }

    if let Some(title) = &input.title {
        if title.chars().count() > TITLE_MAX_CHARS {
            return Err(TITLE_TOO_LONG.to_string());
        }
    }

    if let Some(description) = &input.description {
        if description.chars().count() > DESCRIPTION_MAX_CHARS {
            return Err(DESCRIPTION_TOO_LONG.to_string());
        }
    }

    Ok(())
}
