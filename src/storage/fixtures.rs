//! Random article fixtures for local development

use crate::core::service::ArticleService;
use crate::entities::ArticleDraft;
use anyhow::Result;
use rand::Rng;
use rand::seq::SliceRandom;

/// Longest generated title, in characters
pub const TITLE_MAX_CHARS: usize = 50;

/// Longest generated body, in characters
pub const BODY_MAX_CHARS: usize = 255;

const WORDS: &[&str] = &[
    "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed", "do",
    "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna", "aliqua", "enim",
    "ad", "minim", "veniam", "quis", "nostrud", "exercitation", "ullamco", "laboris", "nisi",
    "aliquip", "ex", "ea", "commodo", "consequat", "duis", "aute", "irure", "in",
    "reprehenderit", "voluptate", "velit", "esse", "cillum", "fugiat", "nulla", "pariatur",
    "excepteur", "sint", "occaecat", "cupidatat", "non", "proident", "sunt", "culpa", "qui",
    "officia", "deserunt", "mollit", "anim", "id", "est", "laborum",
];

/// Generate sentence-shaped lorem text of at most `max_chars` characters
///
/// Always returns at least one word followed by a period.
pub fn lorem_text<R: Rng + ?Sized>(rng: &mut R, max_chars: usize) -> String {
    let mut text = String::new();
    let mut sentence_len = 0;

    loop {
        let word = WORDS.choose(rng).copied().unwrap_or("lorem");
        let separator = usize::from(!text.is_empty());
        // Keep one character for the closing period
        if !text.is_empty() && text.len() + separator + word.len() + 1 > max_chars {
            break;
        }

        if sentence_len == 0 {
            if !text.is_empty() {
                text.push(' ');
            }
            let mut chars = word.chars();
            if let Some(first) = chars.next() {
                text.extend(first.to_uppercase());
                text.push_str(chars.as_str());
            }
        } else {
            text.push(' ');
            text.push_str(word);
        }
        sentence_len += 1;

        if sentence_len >= rng.gen_range(4..=10) {
            text.push('.');
            sentence_len = 0;
        }
    }

    if !text.ends_with('.') {
        text.push('.');
    }
    text
}

/// Build one random draft within the article length limits
pub fn random_draft<R: Rng + ?Sized>(rng: &mut R) -> ArticleDraft {
    ArticleDraft {
        title: lorem_text(rng, TITLE_MAX_CHARS),
        body: lorem_text(rng, BODY_MAX_CHARS),
    }
}

/// Seed `count` random articles into `service`
pub async fn seed_articles(service: &dyn ArticleService, count: usize) -> Result<usize> {
    let drafts: Vec<ArticleDraft> = {
        let mut rng = rand::thread_rng();
        (0..count).map(|_| random_draft(&mut rng)).collect()
    };

    for draft in drafts {
        service.create(draft).await?;
    }

    tracing::info!(count, "seeded article fixtures");
    Ok(count)
}
