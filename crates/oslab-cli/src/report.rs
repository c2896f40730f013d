//! Read-only summaries over the record store.

use std::collections::HashMap;

use oslab_core::Platform;
use oslab_db::RecordStore;

/// Words this short are mostly stop words.
const MIN_WORD_CHARS: usize = 4;

/// Print mean sentiment per platform and the `top` most frequent words.
///
/// # Errors
///
/// Returns an error if a store query fails.
pub(crate) async fn print_report(
    store: &RecordStore,
    platform: Option<Platform>,
    top: usize,
) -> anyhow::Result<()> {
    let rows = store.sentiment_by_platform().await?;
    if rows.is_empty() {
        println!("No records stored yet.");
        return Ok(());
    }

    println!("## Average sentiment by platform\n");
    println!("| Platform | Records | Avg sentiment |");
    println!("|----------|---------|---------------|");
    for row in &rows {
        println!(
            "| {} | {} | {:+.3} |",
            row.platform, row.record_count, row.avg_sentiment
        );
    }

    let texts = store.list_texts(platform).await?;
    let scope = platform.map_or_else(|| "all platforms".to_string(), |p| p.to_string());
    println!("\n## Top {top} words ({scope})\n");
    for (word, count) in top_words(&texts, top) {
        println!("{count:>6}  {word}");
    }

    Ok(())
}

/// Print total and per-platform record counts.
///
/// # Errors
///
/// Returns an error if a store query fails.
pub(crate) async fn print_stats(store: &RecordStore) -> anyhow::Result<()> {
    let total = store.count_records().await?;
    println!("records: {total}");
    for row in store.sentiment_by_platform().await? {
        println!("  {:<14} {}", row.platform, row.record_count);
    }
    Ok(())
}

/// Most frequent lowercase words longer than three characters, ties broken
/// alphabetically.
pub(crate) fn top_words(texts: &[String], n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for text in texts {
        for word in text.split_whitespace() {
            let word = word.to_lowercase();
            if word.chars().count() >= MIN_WORD_CHARS {
                *counts.entry(word).or_default() += 1;
            }
        }
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_words_are_ignored_and_case_folded() {
        let texts = vec![
            "The Breach was big".to_string(),
            "another breach and the leak".to_string(),
        ];
        let words = top_words(&texts, 10);
        assert_eq!(words[0], ("breach".to_string(), 2));
        assert!(words.iter().all(|(w, _)| w.chars().count() > 3));
        assert!(!words.iter().any(|(w, _)| w == "the" || w == "was"));
    }

    #[test]
    fn ties_are_alphabetical_and_truncated() {
        let texts = vec!["zeta alpha mango".to_string()];
        let words = top_words(&texts, 2);
        assert_eq!(
            words,
            vec![("alpha".to_string(), 1), ("mango".to_string(), 1)]
        );
    }
}
