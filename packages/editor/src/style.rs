//! # Inline Style Vocabulary
//!
//! The closed set of style names the editor assigns, and the table that
//! maps each name to the visual rule a renderer should apply.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Inline style names assigned by autoformatting and key commands
///
/// The legacy names accepted on input come from content written by the
/// previous web editor, which stored its custom styles under these keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StyleName {
    /// Extra-large bold text
    #[serde(alias = "BOLD_AND_LARGE")]
    Heading,

    /// Bold text
    #[serde(alias = "BOLD")]
    Strong,

    /// Colored text
    #[serde(alias = "RED_FONT_COLOR")]
    Accent,

    /// Underlined text
    #[serde(alias = "UNDERLINE")]
    EmphasisLine,
}

impl StyleName {
    pub const ALL: [StyleName; 4] = [
        StyleName::Heading,
        StyleName::Strong,
        StyleName::Accent,
        StyleName::EmphasisLine,
    ];

    /// Stable name used in the raw format and in logs
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleName::Heading => "HEADING",
            StyleName::Strong => "STRONG",
            StyleName::Accent => "ACCENT",
            StyleName::EmphasisLine => "EMPHASIS_LINE",
        }
    }
}

impl fmt::Display for StyleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum FontSize {
    #[default]
    Normal,
    XxxLarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
    Bolder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Black,
    Red,
}

/// Visual treatment for a style (or a composition of styles)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VisualRule {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    pub font_size: FontSize,
    pub font_weight: FontWeight,
    pub underline: bool,
}

impl VisualRule {
    /// Merge another rule on top of this one
    ///
    /// Order-independent: size and weight keep the strongest value,
    /// underline is sticky, and red always wins over black.
    pub fn compose(self, other: VisualRule) -> VisualRule {
        let color = match (self.color, other.color) {
            (Some(Color::Red), _) | (_, Some(Color::Red)) => Some(Color::Red),
            (Some(c), _) | (None, Some(c)) => Some(c),
            (None, None) => None,
        };

        VisualRule {
            color,
            font_size: self.font_size.max(other.font_size),
            font_weight: self.font_weight.max(other.font_weight),
            underline: self.underline || other.underline,
        }
    }
}

/// Fixed style name → visual rule table exposed to renderers
#[derive(Debug, Clone, PartialEq)]
pub struct StyleMap {
    rules: [(StyleName, VisualRule); 4],
}

impl StyleMap {
    pub fn new() -> Self {
        Self {
            rules: [
                (
                    StyleName::Heading,
                    VisualRule {
                        color: Some(Color::Black),
                        font_size: FontSize::XxxLarge,
                        font_weight: FontWeight::Bolder,
                        underline: false,
                    },
                ),
                (
                    StyleName::Strong,
                    VisualRule {
                        color: Some(Color::Black),
                        font_weight: FontWeight::Bold,
                        ..VisualRule::default()
                    },
                ),
                (
                    StyleName::Accent,
                    VisualRule {
                        color: Some(Color::Red),
                        ..VisualRule::default()
                    },
                ),
                (
                    StyleName::EmphasisLine,
                    VisualRule {
                        color: Some(Color::Black),
                        underline: true,
                        ..VisualRule::default()
                    },
                ),
            ],
        }
    }

    pub fn rule(&self, style: StyleName) -> VisualRule {
        self.rules
            .iter()
            .find(|(name, _)| *name == style)
            .map(|(_, rule)| *rule)
            .unwrap_or_default()
    }

    /// Compose the rules of every active style
    pub fn resolve<'a>(&self, styles: impl IntoIterator<Item = &'a StyleName>) -> VisualRule {
        styles
            .into_iter()
            .fold(VisualRule::default(), |acc, style| acc.compose(self.rule(*style)))
    }

    pub fn iter(&self) -> impl Iterator<Item = (StyleName, VisualRule)> + '_ {
        self.rules.iter().copied()
    }

    /// Serialize the table as a JSON object keyed by style name
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .rules
            .iter()
            .map(|(name, rule)| {
                (
                    name.as_str().to_string(),
                    serde_json::to_value(rule).unwrap_or(serde_json::Value::Null),
                )
            })
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

impl Default for StyleMap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_names_serialize_by_name() {
        let json = serde_json::to_string(&StyleName::EmphasisLine).unwrap();
        assert_eq!(json, "\"EMPHASIS_LINE\"");

        for style in StyleName::ALL {
            let json = serde_json::to_string(&style).unwrap();
            assert_eq!(json, format!("\"{}\"", style));
        }
    }

    #[test]
    fn test_legacy_style_names_are_accepted() {
        let legacy: Vec<StyleName> =
            serde_json::from_str(r#"["BOLD_AND_LARGE", "BOLD", "RED_FONT_COLOR", "UNDERLINE"]"#)
                .unwrap();
        assert_eq!(legacy, StyleName::ALL.to_vec());
    }

    #[test]
    fn test_unknown_style_is_rejected() {
        assert!(serde_json::from_str::<StyleName>("\"ITALIC\"").is_err());
    }

    #[test]
    fn test_style_map_table() {
        let map = StyleMap::new();

        let heading = map.rule(StyleName::Heading);
        assert_eq!(heading.font_size, FontSize::XxxLarge);
        assert_eq!(heading.font_weight, FontWeight::Bolder);
        assert_eq!(heading.color, Some(Color::Black));

        assert_eq!(map.rule(StyleName::Strong).font_weight, FontWeight::Bold);
        assert_eq!(map.rule(StyleName::Accent).color, Some(Color::Red));
        assert!(map.rule(StyleName::EmphasisLine).underline);
        assert_eq!(map.iter().count(), 4);
    }

    #[test]
    fn test_overlapping_styles_compose() {
        let map = StyleMap::new();

        let rule = map.resolve(&[StyleName::EmphasisLine, StyleName::Accent, StyleName::Strong]);
        assert_eq!(rule.color, Some(Color::Red));
        assert!(rule.underline);
        assert_eq!(rule.font_weight, FontWeight::Bold);

        // Order does not matter
        let reversed = map.resolve(&[StyleName::Strong, StyleName::Accent, StyleName::EmphasisLine]);
        assert_eq!(rule, reversed);

        assert_eq!(map.resolve(&[]), VisualRule::default());
    }

    #[test]
    fn test_style_map_json_keys() {
        let json = StyleMap::new().to_json();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 4);
        assert_eq!(obj["ACCENT"]["color"], "red");
        assert_eq!(obj["HEADING"]["fontSize"], "xxx-large");
        assert_eq!(obj["EMPHASIS_LINE"]["underline"], true);
    }
}
