//! Chip colors for tags.

use crate::tag::TagColor;

/// Chip palette as `(light, dark)` hex pairs, without the leading `#`.
pub const DEFAULT_TAG_COLORS: &[(&str, &str)] = &[
    ("2E7D32", "81C784"), // green
    ("1565C0", "64B5F6"), // blue
    ("6A1B9A", "BA68C8"), // violet
    ("C62828", "E57373"), // red
    ("EF6C00", "FFB74D"), // amber
    ("00838F", "4DD0E1"), // teal
    ("AD1457", "F06292"), // rose
    ("4E342E", "A1887F"), // brown
    ("37474F", "90A4AE"), // slate
];

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Color for a normalized tag. The same tag always lands on the same chip
/// color, across runs and machines.
pub fn default_tag_color(tag: &str) -> TagColor {
    let hash = tag
        .bytes()
        .fold(FNV_OFFSET, |acc, b| (acc ^ u64::from(b)).wrapping_mul(FNV_PRIME));
    let (light, dark) = DEFAULT_TAG_COLORS[(hash % DEFAULT_TAG_COLORS.len() as u64) as usize];
    TagColor {
        light: light.to_string(),
        dark: dark.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_tag_same_color() {
        assert_eq!(default_tag_color("rust"), default_tag_color("rust"));
    }

    #[test]
    fn color_comes_from_palette() {
        for tag in ["blog", "notes", "", "émincé"] {
            let color = default_tag_color(tag);
            assert!(DEFAULT_TAG_COLORS
                .iter()
                .any(|(light, dark)| color.light == *light && color.dark == *dark));
        }
    }
}
