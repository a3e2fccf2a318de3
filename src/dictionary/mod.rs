use std::collections::HashSet;
use std::path::Path;
use tokio::fs;
use anyhow::{Context, Result};

pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    /// Load a dictionary from a local path or an `http(s)://` URL
    pub async fn from_source(source: &str, client: &reqwest::Client) -> Result<Self> {
        if source.starts_with("http://") || source.starts_with("https://") {
            Self::fetch(client, source).await
        } else {
            Self::load(source).await
        }
    }

    /// Load dictionary from a file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read word list {}", path.display()))?;
        let dict = Self::parse(&content);

        tracing::info!("Loaded {} words into dictionary", dict.len());

        Ok(dict)
    }

    /// Download a newline-delimited word list
    pub async fn fetch(client: &reqwest::Client, url: &str) -> Result<Self> {
        let content = client
            .get(url)
            .send()
            .await
            .with_context(|| format!("failed to request word list {}", url))?
            .error_for_status()
            .with_context(|| format!("word list request to {} failed", url))?
            .text()
            .await
            .context("failed to read word list body")?;
        let dict = Self::parse(&content);

        tracing::info!("Fetched {} words into dictionary from {}", dict.len(), url);

        Ok(dict)
    }

    /// Parse a newline-delimited word list, skipping anything that is not a plain word
    pub fn parse(content: &str) -> Self {
        Self::from_words(content.lines())
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words
            .into_iter()
            .map(|word| word.as_ref().trim().to_uppercase())
            .filter(|word| !word.is_empty() && word.chars().all(|ch| ch.is_ascii_alphabetic()))
            .collect();

        Self { words }
    }

    /// Create an empty dictionary (used until the word list arrives)
    pub fn empty() -> Self {
        Self {
            words: HashSet::new(),
        }
    }

    /// Check if a word exists in the dictionary
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }

    /// Get the number of words in the dictionary
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if dictionary is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}
