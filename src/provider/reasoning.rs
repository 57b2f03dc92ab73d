//! Streaming reasoning-tag extraction.
//!
//! Reasoning-capable models interleave internal reasoning with visible
//! output, delimited by an XML-style tag pair (e.g. `<think>...</think>`).
//! The extractor is a small state machine fed one delta at a time; it
//! releases visible text, withholds tag content, and copes with tag
//! markers split across chunk boundaries by holding back any trailing
//! partial marker until the next delta resolves it.

/// Splits a delta stream into visible text and withheld reasoning.
#[derive(Debug)]
pub struct ReasoningExtractor {
    opening: String,
    closing: String,
    buffer: String,
    inside: bool,
    reasoning_chars: usize,
}

impl ReasoningExtractor {
    /// Create an extractor for the given tag name (e.g. `think`).
    pub fn new(tag: &str) -> Self {
        Self {
            opening: format!("<{tag}>"),
            closing: format!("</{tag}>"),
            buffer: String::new(),
            inside: false,
            reasoning_chars: 0,
        }
    }

    /// Feed one delta, returning the visible text it releases.
    ///
    /// The returned string may be empty (delta was entirely reasoning or a
    /// partial marker) or may span several context switches when a single
    /// delta contains whole tags.
    pub fn push(&mut self, delta: &str) -> String {
        self.buffer.push_str(delta);
        let mut visible = String::new();

        loop {
            let marker = if self.inside { &self.closing } else { &self.opening };

            match self.buffer.find(marker.as_str()) {
                Some(idx) => {
                    let before = &self.buffer[..idx];
                    if self.inside {
                        self.reasoning_chars += before.chars().count();
                    } else {
                        visible.push_str(before);
                    }
                    self.buffer.drain(..idx + marker.len());
                    self.inside = !self.inside;
                }
                None => {
                    // Release everything except a trailing partial marker.
                    let hold = partial_suffix_len(&self.buffer, marker);
                    let release_to = self.buffer.len() - hold;
                    let released = &self.buffer[..release_to];
                    if self.inside {
                        self.reasoning_chars += released.chars().count();
                    } else {
                        visible.push_str(released);
                    }
                    self.buffer.drain(..release_to);
                    break;
                }
            }
        }

        visible
    }

    /// Flush at end of stream, returning any remaining visible text.
    ///
    /// A held-back partial marker becomes visible text when the stream ends
    /// outside a tag; inside an unterminated tag, the remainder counts as
    /// reasoning and is withheld.
    pub fn finish(&mut self) -> String {
        if self.inside {
            self.reasoning_chars += self.buffer.chars().count();
            self.buffer.clear();
            String::new()
        } else {
            std::mem::take(&mut self.buffer)
        }
    }

    /// Characters withheld as reasoning so far.
    pub fn reasoning_chars(&self) -> usize {
        self.reasoning_chars
    }
}

/// Length of the longest strict prefix of `marker` that is a suffix of `s`.
///
/// Markers are ASCII, so byte slicing is safe on both sides.
fn partial_suffix_len(s: &str, marker: &str) -> usize {
    let max = marker.len().saturating_sub(1).min(s.len());
    for len in (1..=max).rev() {
        if s.ends_with(&marker[..len]) {
            return len;
        }
    }
    0
}
