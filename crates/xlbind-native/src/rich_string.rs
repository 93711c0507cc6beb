//! Rich strings

use crate::cell::RichRun;
use crate::error::{NativeError, Result};
use crate::handle::FontId;

/// Text made of runs, each with an optional font
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RichString {
    runs: Vec<RichRun>,
}

impl RichString {
    /// Empty rich string
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_runs(runs: Vec<RichRun>) -> Self {
        Self { runs }
    }

    pub(crate) fn runs(&self) -> &[RichRun] {
        &self.runs
    }

    /// Append a run
    pub fn add_text(&mut self, text: &str, font: Option<FontId>) {
        self.runs.push(RichRun {
            text: text.to_string(),
            font,
        });
    }

    /// Run at `index` with its font
    pub fn text(&self, index: i32) -> Result<(String, Option<FontId>)> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.runs.get(i))
            .map(|run| (run.text.clone(), run.font))
            .ok_or(NativeError::Index {
                what: "text run",
                index,
            })
    }

    /// Number of runs
    pub fn text_size(&self) -> i32 {
        self.runs.len() as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_runs_in_order() {
        let mut rich = RichString::new();
        rich.add_text("bold ", Some(FontId(1)));
        rich.add_text("plain", None);

        assert_eq!(rich.text_size(), 2);
        assert_eq!(rich.text(0).unwrap(), ("bold ".to_string(), Some(FontId(1))));
        assert_eq!(rich.text(1).unwrap(), ("plain".to_string(), None));
        assert!(rich.text(2).is_err());
        assert!(rich.text(-1).is_err());
    }
}
