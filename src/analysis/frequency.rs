use serde::Serialize;
use std::collections::HashMap;

/// A distinct value and how many times it occurred.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Case-insensitive frequency count, most frequent first.
///
/// Values are lowercased before counting and empty strings are ignored.
/// The sort is stable, so equal counts keep first-seen order.
pub fn count_frequencies<I, S>(items: I) -> Vec<WordCount>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut counts: Vec<WordCount> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for item in items {
        let item = item.as_ref();
        if item.is_empty() {
            continue;
        }
        let word = item.to_lowercase();
        match index.get(&word) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(word.clone(), counts.len());
                counts.push(WordCount { word, count: 1 });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(counts: &[WordCount]) -> Vec<(&str, usize)> {
        counts.iter().map(|c| (c.word.as_str(), c.count)).collect()
    }

    #[test]
    fn test_case_insensitive_counts() {
        let counts = count_frequencies(["foo", "Foo", "bar"]);
        assert_eq!(pairs(&counts), vec![("foo", 2), ("bar", 1)]);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let counts = count_frequencies(["b", "a", "c", "a", "b"]);
        assert_eq!(pairs(&counts), vec![("b", 2), ("a", 2), ("c", 1)]);
    }

    #[test]
    fn test_skips_empty_strings() {
        let counts = count_frequencies(["", "x", ""]);
        assert_eq!(pairs(&counts), vec![("x", 1)]);
    }

    #[test]
    fn test_empty_input() {
        assert!(count_frequencies(Vec::<String>::new()).is_empty());
    }
}
