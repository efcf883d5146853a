use chrono::DateTime;
use chrono::Utc;
use docsearch_utils_tokenizer::Tokenizer;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::Serialize;

#[allow(clippy::expect_used)]
static TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s)#([A-Za-z0-9_][A-Za-z0-9_/-]*)").expect("valid tag regex"));
#[allow(clippy::expect_used)]
static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^#{1,6}[ \t]+(.+)$").expect("valid header regex"));
#[allow(clippy::expect_used)]
static WIKI_LINK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\[([^\]|]+)(?:\|[^\]]*)?\]\]").expect("valid wiki link regex")
});
#[allow(clippy::expect_used)]
static MD_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]\(([^) \t\n]+)\)").expect("valid markdown link regex"));

/// Structural facts about one document, computed once and cached by the
/// content index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentRecord {
    pub path: String,
    pub content: String,
    /// Tokenized content, stop words removed
    pub words: Vec<String>,
    /// Whitespace-separated words in the raw content
    pub word_count: usize,
    /// `#tag` occurrences, without the `#`, first occurrence order
    pub tags: Vec<String>,
    /// `[[wiki]]` and `[text](target)` link targets
    pub links: Vec<String>,
    /// ATX header titles (`#` through `######`)
    pub headers: Vec<String>,
    /// `key: value` pairs from a leading `---` front-matter block
    pub metadata: IndexMap<String, String>,
    pub indexed_at: DateTime<Utc>,
}

impl DocumentRecord {
    pub fn analyze(
        path: impl Into<String>,
        content: impl Into<String>,
        tokenizer: &Tokenizer,
        indexed_at: DateTime<Utc>,
    ) -> Self {
        let content = content.into();

        let mut tags = Vec::new();
        for captures in TAG_RE.captures_iter(&content) {
            push_unique(&mut tags, &captures[1]);
        }

        let mut links = Vec::new();
        for captures in WIKI_LINK_RE.captures_iter(&content) {
            push_unique(&mut links, captures[1].trim());
        }
        for captures in MD_LINK_RE.captures_iter(&content) {
            push_unique(&mut links, &captures[1]);
        }

        let headers = HEADER_RE
            .captures_iter(&content)
            .map(|captures| captures[1].trim().trim_end_matches('#').trim_end().to_string())
            .filter(|header| !header.is_empty())
            .collect();

        Self {
            path: path.into(),
            words: tokenizer.tokenize(&content),
            word_count: content.split_whitespace().count(),
            tags,
            links,
            headers,
            metadata: front_matter(&content),
            content,
            indexed_at,
        }
    }
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}

fn front_matter(content: &str) -> IndexMap<String, String> {
    let mut lines = content.lines();
    if lines.next().map(str::trim_end) != Some("---") {
        return IndexMap::new();
    }

    let mut metadata = IndexMap::new();
    for line in lines {
        let line = line.trim_end();
        if line == "---" {
            return metadata;
        }
        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim();
            if !key.is_empty() {
                metadata.insert(key.to_string(), value.trim().to_string());
            }
        }
    }

    // Unterminated block: treat as ordinary content.
    IndexMap::new()
}
