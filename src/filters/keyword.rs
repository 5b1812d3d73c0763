//! Keyword-based title filtering.

use super::{Filter, Titled};

/// Passes items whose title contains any of the keywords, ignoring case.
pub struct KeywordFilter {
    keywords: Vec<String>,
}

impl KeywordFilter {
    /// Creates a filter matching any of the given keywords.
    pub fn any(keywords: Vec<String>) -> Self {
        Self {
            keywords: keywords
                .into_iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }

    /// Creates a filter from a whitespace-separated phrase, one keyword per word.
    pub fn from_phrase(phrase: &str) -> Self {
        Self::any(phrase.split_whitespace().map(String::from).collect())
    }

    /// True when no usable keyword was given.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }
}

impl<T: Titled> Filter<T> for KeywordFilter {
    fn matches(&self, item: &T) -> bool {
        if self.keywords.is_empty() {
            return true;
        }

        let title = item.title().to_lowercase();
        self.keywords.iter().any(|k| title.contains(k.as_str()))
    }

    fn description(&self) -> String {
        if self.keywords.is_empty() {
            "Keywords: any".to_string()
        } else {
            format!("Title contains any of: {}", self.keywords.join(", "))
        }
    }
}
