//! Ordering and de-duplication of filter option labels.
//!
//! Option lists are compared the way a shopper reads them: case and accents
//! do not matter, and runs of digits compare by value so size "9" sorts
//! before size "10".

use std::cmp::Ordering;
use std::collections::HashSet;

/// Trim, drop blanks, de-duplicate (first spelling wins) and sort.
///
/// De-duplication is exact; two spellings that only differ in case are both
/// kept and keep their relative order after sorting.
pub fn normalize_options<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out: Vec<String> = values
        .into_iter()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect();
    out.sort_by(|a, b| natural_cmp(a, b));
    out
}

/// Case- and accent-insensitive comparison with numeric runs compared by value.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = Chunks::new(a);
    let mut right = Chunks::new(b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) => {
                let ord = match (l, r) {
                    (Chunk::Digits(l), Chunk::Digits(r)) => cmp_digits(&l, &r),
                    (Chunk::Digits(_), Chunk::Char(_)) => Ordering::Less,
                    (Chunk::Char(_), Chunk::Digits(_)) => Ordering::Greater,
                    (Chunk::Char(l), Chunk::Char(r)) => l.cmp(&r),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}

fn cmp_digits(l: &str, r: &str) -> Ordering {
    let l = l.trim_start_matches('0');
    let r = r.trim_start_matches('0');
    l.len().cmp(&r.len()).then_with(|| l.cmp(r))
}

enum Chunk {
    Digits(String),
    Char(char),
}

struct Chunks<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
}

impl<'a> Chunks<'a> {
    fn new(s: &'a str) -> Self {
        Self {
            chars: s.chars().peekable(),
        }
    }
}

impl Iterator for Chunks<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Chunk> {
        let c = self.chars.next()?;
        if c.is_ascii_digit() {
            let mut digits = String::from(c);
            while let Some(d) = self.chars.next_if(char::is_ascii_digit) {
                digits.push(d);
            }
            return Some(Chunk::Digits(digits));
        }
        Some(Chunk::Char(fold(c)))
    }
}

/// Lowercase and strip the accents found in French and Spanish labels.
fn fold(c: char) -> char {
    let lower = c.to_lowercase().next().unwrap_or(c);
    match lower {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_runs_sort_by_value() {
        let sorted = normalize_options(["10", "9", "42.5", "42", "8"]);
        assert_eq!(sorted, vec!["8", "9", "10", "42", "42.5"]);
    }

    #[test]
    fn test_case_and_accent_insensitive() {
        assert_eq!(natural_cmp("écru", "Ecru"), Ordering::Equal);
        assert_eq!(natural_cmp("blue", "Red"), Ordering::Less);
        let sorted = normalize_options(["Vert", "blanc", "Écru"]);
        assert_eq!(sorted, vec!["blanc", "Écru", "Vert"]);
    }

    #[test]
    fn test_trim_dedupe_and_drop_blanks() {
        let sorted = normalize_options([" Nike", "Nike ", "", "   ", "Adidas"]);
        assert_eq!(sorted, vec!["Adidas", "Nike"]);
    }

    #[test]
    fn test_case_variants_are_kept_in_order() {
        let sorted = normalize_options(["red", "Blue", "Red"]);
        assert_eq!(sorted, vec!["Blue", "red", "Red"]);
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(natural_cmp("007", "7"), Ordering::Equal);
        assert_eq!(natural_cmp("A2", "A10"), Ordering::Less);
    }
}
