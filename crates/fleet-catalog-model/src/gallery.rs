use serde::{Deserialize, Serialize};

/// Cursor over an item's images with wrap-around navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Gallery {
    len: usize,
    index: usize,
}

impl Gallery {
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self { len, index: 0 }
    }

    /// Starts at `index`, wrapped into range.
    #[must_use]
    pub fn at(len: usize, index: usize) -> Self {
        let index = if len == 0 { 0 } else { index % len };
        Self { len, index }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Prev/next controls are only offered with more than one image.
    #[must_use]
    pub fn has_controls(&self) -> bool {
        self.len > 1
    }

    pub fn next(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    pub fn prev(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + self.len - 1) % self.len;
        }
        self.index
    }

    /// One-based `i / N` counter.
    #[must_use]
    pub fn counter(&self) -> String {
        if self.len == 0 {
            return "0 / 0".to_string();
        }
        format!("{} / {}", self.index + 1, self.len)
    }

    #[must_use]
    pub fn current<'a>(&self, images: &'a [String]) -> Option<&'a str> {
        images.get(self.index).map(String::as_str)
    }
}
