//! Recipe scaling
//!
//! Rewrites the leading quantity of every bullet in a recipe's
//! "Ingredients" section. Everything else is emitted byte-for-byte.

use super::quantity::{format_quantity, leading_quantity};

/// Deepest heading level that opens or closes a section
const MAX_HEADING_LEVEL: usize = 4;

const INGREDIENTS_HEADING: &str = "ingredients";

/// Where the line cursor is relative to the Ingredients section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Outside,
    Inside,
}

/// What a line means for scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineRole {
    /// Heading that opens the Ingredients section
    IngredientsHeading,
    /// Any other heading
    Heading,
    /// Bullet inside the Ingredients section
    IngredientBullet,
    /// Everything else
    Text,
}

/// Line-by-line state machine tracking the Ingredients section
#[derive(Debug, Clone, Default)]
pub struct SectionTracker {
    state: Section,
}

impl SectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Section {
        self.state
    }

    /// Consume one line and report its role
    pub fn step(&mut self, line: &str) -> LineRole {
        if let Some(text) = heading_text(line) {
            if is_ingredients_heading(text) {
                self.state = Section::Inside;
                return LineRole::IngredientsHeading;
            }
            self.state = Section::Outside;
            return LineRole::Heading;
        }

        match self.state {
            Section::Inside if is_bullet(line) => LineRole::IngredientBullet,
            _ => LineRole::Text,
        }
    }
}

/// Text of a markdown heading with 1 to 4 leading `#`
pub fn heading_text(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let level = trimmed.bytes().take_while(|b| *b == b'#').count();
    if level == 0 || level > MAX_HEADING_LEVEL {
        return None;
    }
    Some(trimmed[level..].trim())
}

/// Whether heading text starts with "Ingredients" (any case)
pub fn is_ingredients_heading(text: &str) -> bool {
    text.get(..INGREDIENTS_HEADING.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(INGREDIENTS_HEADING))
}

fn is_bullet(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with('-') || trimmed.starts_with('*')
}

/// Split a bullet line into its marker prefix (indent, marker, spaces) and the rest
pub fn split_bullet(line: &str) -> Option<(&str, &str)> {
    let indent = line.len() - line.trim_start().len();
    let marker = line[indent..].chars().next()?;
    if marker != '-' && marker != '*' {
        return None;
    }

    let after_marker = &line[indent + 1..];
    let spacing = after_marker.len() - after_marker.trim_start().len();
    let prefix_len = indent + 1 + spacing;
    Some((&line[..prefix_len], &line[prefix_len..]))
}

/// Scale the leading quantity of a single bullet line
///
/// Lines without a parseable quantity come back unchanged.
pub fn scale_line(line: &str, factor: f64) -> String {
    let Some((prefix, rest)) = split_bullet(line) else {
        return line.to_string();
    };
    let Some(token) = leading_quantity(rest) else {
        return line.to_string();
    };
    let Some(value) = token.value() else {
        return line.to_string();
    };

    format!(
        "{}{}{}",
        prefix,
        format_quantity(value * factor),
        &rest[token.len..]
    )
}

/// Scale every ingredient quantity in a markdown recipe body
///
/// A factor of exactly 1 returns the input untouched.
pub fn scale(markdown: &str, factor: f64) -> String {
    if factor == 1.0 {
        return markdown.to_string();
    }

    let mut tracker = SectionTracker::new();
    markdown
        .split('\n')
        .map(|line| match tracker.step(line) {
            LineRole::IngredientBullet => scale_line(line, factor),
            _ => line.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scaling::quantity::parse_quantity;

    const RECIPE: &str = "# Pancakes\n\
        \n\
        Serves 2 people, takes 15 minutes.\n\
        \n\
        ## Ingredients\n\
        \n\
        - 1/2 cup flour\n\
        - 1 1/2 tsp sugar\n\
        - 2 eggs\n\
        * 1.5 cups milk\n\
        - Salt to taste\n\
        Mix well.\n\
        \n\
        ## Steps\n\
        \n\
        - 2 minutes per side\n";

    #[test]
    fn test_identity_at_factor_one() {
        assert_eq!(scale(RECIPE, 1.0), RECIPE);
        assert_eq!(scale("- 1/3 cup\r\n", 1.0), "- 1/3 cup\r\n");
    }

    #[test]
    fn test_scale_bullets() {
        assert_eq!(scale_line("- 1/2 cup flour", 2.0), "- 1 cup flour");
        assert_eq!(scale_line("- 1 1/2 tsp salt", 0.5), "- 3/4 tsp salt");
        assert_eq!(scale_line("- 2 cups stock", 2.0), "- 4 cups stock");
        assert_eq!(scale_line("  * 1.5 cups milk", 2.0), "  * 3 cups milk");
    }

    #[test]
    fn test_unparseable_lines_unchanged() {
        assert_eq!(scale_line("- Salt to taste", 2.0), "- Salt to taste");
        assert_eq!(scale_line("- 1/0 cup water", 2.0), "- 1/0 cup water");
        assert_eq!(scale_line("not a bullet 2", 2.0), "not a bullet 2");
        assert_eq!(scale_line("-", 2.0), "-");
    }

    #[test]
    fn test_scale_only_touches_ingredients_section() {
        let scaled = scale(RECIPE, 2.0);
        let lines: Vec<&str> = scaled.split('\n').collect();

        assert!(lines.contains(&"- 1 cup flour"));
        assert!(lines.contains(&"- 3 tsp sugar"));
        assert!(lines.contains(&"- 4 eggs"));
        assert!(lines.contains(&"* 3 cups milk"));
        assert!(lines.contains(&"- Salt to taste"));
        assert!(lines.contains(&"Serves 2 people, takes 15 minutes."));
        assert!(lines.contains(&"- 2 minutes per side"));
        assert!(scaled.ends_with('\n'));
    }

    #[test]
    fn test_scaled_quantities_reparse_close_to_product() {
        let cases = [
            ("1/2", 2.0),
            ("1 1/2", 0.5),
            ("3", 0.5),
            ("2/3", 2.0),
            ("1.25", 2.0),
            ("7", 0.5),
            ("1/3", 2.0),
        ];
        for (quantity, factor) in cases {
            let line = format!("- {} cup rice", quantity);
            let scaled = scale_line(&line, factor);
            let rest = scaled.trim_start_matches("- ");
            let token = leading_quantity(rest).unwrap();
            let reparsed = token.value().unwrap();
            let expected = parse_quantity(quantity).unwrap() * factor;
            assert!(
                (reparsed - expected).abs() < 0.1,
                "{} x {} gave {}",
                quantity,
                factor,
                scaled
            );
        }
    }

    #[test]
    fn test_heading_detection() {
        assert_eq!(heading_text("## Ingredients"), Some("Ingredients"));
        assert_eq!(heading_text("#### ingredients for sauce"), Some("ingredients for sauce"));
        assert_eq!(heading_text("##### Deep"), None);
        assert_eq!(heading_text("plain"), None);
        assert!(is_ingredients_heading("INGREDIENTS (serves 4)"));
        assert!(!is_ingredients_heading("Main ingredients"));
    }

    #[test]
    fn test_section_closes_at_any_heading() {
        let text = "### Ingredients\n- 1 apple\n#### Notes\n- 1 apple\n# Ingredients again\n- 1 apple";
        let scaled = scale(text, 2.0);
        assert_eq!(
            scaled,
            "### Ingredients\n- 2 apple\n#### Notes\n- 1 apple\n# Ingredients again\n- 2 apple"
        );
    }

    #[test]
    fn test_tracker_states() {
        let mut tracker = SectionTracker::new();
        assert_eq!(tracker.step("- 1 egg"), LineRole::Text);
        assert_eq!(tracker.step("## Ingredients"), LineRole::IngredientsHeading);
        assert_eq!(tracker.state(), Section::Inside);
        assert_eq!(tracker.step("  - 1 egg"), LineRole::IngredientBullet);
        assert_eq!(tracker.step("whisk"), LineRole::Text);
        assert_eq!(tracker.step("## Method"), LineRole::Heading);
        assert_eq!(tracker.state(), Section::Outside);
    }

    #[test]
    fn test_outside_lines_never_modified() {
        let text = "- 2 cups flour\n* 1/2 tsp salt\nSome 3 words";
        assert_eq!(scale(text, 2.0), text);
        assert_eq!(scale(text, 0.5), text);
    }
}
