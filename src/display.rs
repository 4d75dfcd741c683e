//! Text rendering of alignments, for debugging and snapshot tests.
//!
//! ```text
//! Barack Obama arrived in Paris
//!        ╰───╯System(resp-1)
//! ╰──────────╯ExactHead(m-obama)
//! ```

use std::fmt::{self, Write};

use unicode_width::UnicodeWidthChar;

use crate::{FillerAlignment, MentionAlignment, OffsetRange, SystemResponse};

/// Underlines labelled ranges beneath a window of document text.
///
/// Ranges are character offsets into `text`. Anything reaching outside the
/// window is clipped to it; ranges entirely outside are not drawn.
pub struct AlignmentDisplay<'a> {
    text: &'a str,
    window: Option<OffsetRange>,
    spans: Vec<(OffsetRange, String)>,
}

impl<'a> AlignmentDisplay<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            window: None,
            spans: Vec::new(),
        }
    }

    /// Show only `window` of the text.
    pub fn with_window(mut self, window: OffsetRange) -> Self {
        self.window = Some(window);
        self
    }

    pub fn include(&mut self, range: OffsetRange, label: impl Into<String>) -> &mut Self {
        self.spans.push((range, label.into()));
        self
    }

    pub fn include_response(&mut self, response: &SystemResponse) -> &mut Self {
        self.include(response.base_filler(), format!("System({})", response.id))
    }

    pub fn include_mentions(&mut self, alignments: &[MentionAlignment<'_>]) -> &mut Self {
        for alignment in alignments {
            self.include(
                alignment.mention.extent,
                format!("{:?}({})", alignment.rule, alignment.mention.id),
            );
        }
        self
    }

    pub fn include_fillers(&mut self, alignments: &[FillerAlignment<'_>]) -> &mut Self {
        for alignment in alignments {
            let filler = &alignment.argument.filler;
            self.include(filler.extent, format!("{:?}({})", alignment.rule, filler.id));
        }
        self
    }
}

impl fmt::Display for AlignmentDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let chars: Vec<char> = self.text.chars().collect();
        let window = self
            .window
            .unwrap_or_else(|| OffsetRange::new(0, chars.len()));
        let first = window.start().min(chars.len());
        let last = window.end().min(chars.len()).max(first);

        // display column of every character boundary in the window
        let mut columns = Vec::with_capacity(last - first + 1);
        let mut line = String::new();
        let mut width = 0;
        columns.push(width);
        for &c in &chars[first..last] {
            let c = if c.is_whitespace() { ' ' } else { c };
            line.push(c);
            width += c.width().unwrap_or(0);
            columns.push(width);
        }
        f.write_str(&line)?;

        let shown = OffsetRange::new(first, last);
        for (range, label) in &self.spans {
            let clipped = if range.is_empty() && shown.contains_offset(range.start()) {
                *range
            } else {
                match range.intersection(&shown) {
                    Some(clipped) => clipped,
                    None => continue,
                }
            };
            let start_col = columns[clipped.start() - first];
            let end_col = columns[clipped.end() - first];

            f.write_char('\n')?;
            for _ in 0..start_col {
                f.write_char(' ')?;
            }
            f.write_char('╰')?;
            for _ in (start_col + 1)..end_col.saturating_sub(1) {
                f.write_char('─')?;
            }
            if end_col - start_col > 1 {
                f.write_char('╯')?;
            }
            f.write_str(label)?;
        }

        Ok(())
    }
}
