use serenity::all::{Colour, CreateEmbed};

// ============================================================================
// Color Palette
// ============================================================================

/// Case records - Amber
pub const CASE_COLOR: Colour = Colour::from_rgb(245, 158, 11);

/// Success color - Emerald green
pub const SUCCESS_COLOR: Colour = Colour::from_rgb(16, 185, 129);

/// Error color - Rose red
pub const ERROR_COLOR: Colour = Colour::from_rgb(244, 63, 94);

/// Info/neutral color - Slate
pub const INFO_COLOR: Colour = Colour::from_rgb(100, 116, 139);

// ============================================================================
// Embed Builders
// ============================================================================

/// Create a case embed
pub fn case_embed() -> CreateEmbed {
    CreateEmbed::new().color(CASE_COLOR)
}

/// Create a success embed
pub fn success_embed() -> CreateEmbed {
    CreateEmbed::new().color(SUCCESS_COLOR)
}

/// Create an error embed
pub fn error_embed() -> CreateEmbed {
    CreateEmbed::new().color(ERROR_COLOR)
}

/// Create an info/neutral embed
pub fn info_embed() -> CreateEmbed {
    CreateEmbed::new().color(INFO_COLOR)
}

// ============================================================================
// Text Helpers
// ============================================================================

/// Moderator/target field value: name on the first line, raw id below
pub fn identity_field(name: &str, id: u64) -> String {
    format!("__{}__\n`{}`", name, id)
}

/// Quote a reason block
pub fn quoted(text: &str) -> String {
    format!("> {}", text)
}
