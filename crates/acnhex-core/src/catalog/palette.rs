//! Color vocabulary used by variant colors and the filter panel swatches.

/// (color tag, CSS background)
pub const COLORS: [(&str, &str); 17] = [
    ("white", "#FFFFFF"),
    ("black", "#2D2D2D"),
    ("gray", "#808080"),
    ("red", "#E74C3C"),
    ("orange", "#E67E22"),
    ("yellow", "#F1C40F"),
    ("green", "#27AE60"),
    ("blue", "#3498DB"),
    ("aqua", "#00CED1"),
    ("purple", "#9B59B6"),
    ("pink", "#FF69B4"),
    ("brown", "#8B4513"),
    ("beige", "#D4B896"),
    ("colorful", "linear-gradient(135deg, #FF6B6B, #4ECDC4, #FFE66D)"),
    ("gold", "#FFD700"),
    ("silver", "#C0C0C0"),
    ("copper", "#B87333"),
];

pub fn is_color(tag: &str) -> bool {
    COLORS.iter().any(|(name, _)| *name == tag)
}

/// `background` CSS value for a color tag; unknown colors render gray.
pub fn swatch(tag: &str) -> &'static str {
    COLORS
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, css)| *css)
        .unwrap_or("#CCCCCC")
}
