//! Jump label allocation.
//!
//! Labels are not a scarce resource: they are handed out in request order,
//! never reused, and never freed.

use std::fmt;

/// A symbolic jump target or function entry point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label(String);

impl Label {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Entry label of the function at `index` (`fn0`, `fn1`, ...).
    pub fn function(index: impl fmt::Display) -> Self {
        Self(format!("fn{index}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Hands out `L0`, `L1`, ... for one compilation.
#[derive(Debug, Default)]
pub struct LabelAllocator {
    next: u32,
}

impl LabelAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self) -> Label {
        let label = Label(format!("L{}", self.next));
        self.next += 1;
        label
    }

    /// Number of labels handed out so far.
    pub fn issued(&self) -> usize {
        self.next as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_in_request_order() {
        let mut labels = LabelAllocator::new();
        assert_eq!(labels.next().as_str(), "L0");
        assert_eq!(labels.next().as_str(), "L1");
        assert_eq!(labels.next().as_str(), "L2");
        assert_eq!(labels.issued(), 3);
    }

    #[test]
    fn function_labels() {
        assert_eq!(Label::function(0).as_str(), "fn0");
        assert_eq!(Label::function("12").to_string(), "fn12");
    }

    #[test]
    fn allocators_are_independent() {
        let mut a = LabelAllocator::new();
        let mut b = LabelAllocator::new();
        a.next();
        assert_eq!(b.next(), Label::new("L0"));
        assert_eq!(a.next(), Label::new("L1"));
    }
}
