use serde::{Deserialize, Serialize};

/// Chart-wide colors. Per-observation channels (line/label/number colors)
/// inherit `foreground` unless the configuration overrides them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: String,
    pub foreground: String,
    pub header_color: Option<String>,
    pub title_color: Option<String>,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: "white".to_string(),
            foreground: "#333".to_string(),
            header_color: None,
            title_color: None,
        }
    }
}

impl Theme {
    pub fn header_color(&self) -> &str {
        self.header_color.as_deref().unwrap_or(&self.foreground)
    }

    pub fn title_color(&self) -> &str {
        self.title_color.as_deref().unwrap_or(&self.foreground)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_and_title_fall_back_to_foreground() {
        let theme = Theme::default();
        assert_eq!(theme.header_color(), "#333");
        assert_eq!(theme.title_color(), "#333");

        let theme = Theme {
            title_color: Some("black".to_string()),
            ..Theme::default()
        };
        assert_eq!(theme.title_color(), "black");
        assert_eq!(theme.header_color(), "#333");
    }

    #[test]
    fn partial_json_fills_defaults() {
        let theme: Theme =
            serde_json::from_str(r##"{ "foreground": "#222" }"##).expect("theme json");
        assert_eq!(theme.foreground, "#222");
        assert_eq!(theme.background, "white");
        assert_eq!(theme.header_color(), "#222");
    }
}
