//! Subscript representation for einfunc patterns.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;

/// The ordered axis labels of a single tensor.
///
/// For example, in `b c h w, b w -> b h`, the subscripts are `b c h w`, `b w`
/// and `b h`. Labels are arbitrary whitespace-free tokens and may repeat
/// (`i i` selects a diagonal).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Subscript {
    labels: Vec<String>,
}

impl Subscript {
    /// Creates an empty subscript.
    pub fn new() -> Self {
        Self { labels: Vec::new() }
    }

    /// Parses a whitespace-separated group of labels.
    ///
    /// Runs of whitespace are collapsed, so `" one  two "` and `"one two"`
    /// produce the same subscript.
    pub fn parse(group: &str) -> Self {
        Self::from_labels(group.split_whitespace())
    }

    /// Creates a subscript from a list of labels.
    pub fn from_labels<S: AsRef<str>>(labels: impl IntoIterator<Item = S>) -> Self {
        Self {
            labels: labels.into_iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// Adds a label.
    pub fn push(&mut self, label: impl Into<String>) {
        self.labels.push(label.into());
    }

    /// Returns the number of labels, counting repeats.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns true if there are no labels (a scalar).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Returns an iterator over the labels in order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(String::as_str)
    }

    /// Returns the labels as a slice.
    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    /// Returns the distinct labels in first-appearance order.
    pub fn distinct(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.labels.len());
        for label in self.iter() {
            if !seen.contains(&label) {
                seen.push(label);
            }
        }
        seen
    }

    /// Checks if this subscript contains a label.
    pub fn contains(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Counts occurrences of a label.
    pub fn count(&self, label: &str) -> usize {
        self.labels.iter().filter(|l| *l == label).count()
    }

    /// Returns the position of a label (first occurrence).
    pub fn position(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Returns true if any label repeats (diagonal access).
    pub fn has_repeats(&self) -> bool {
        self.distinct().len() != self.labels.len()
    }
}

impl fmt::Display for Subscript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", label)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Subscript {
    type Item = &'a String;
    type IntoIter = core::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.labels.iter()
    }
}
