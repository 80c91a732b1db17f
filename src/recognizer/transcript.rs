use std::fmt;

use super::label::GestureLabel;

/// Receives confirmed gestures.
pub trait TranscriptSink {
    fn on_gesture_confirmed(&mut self, label: GestureLabel);

    fn clear(&mut self) {}
}

/// Append-only list of confirmed gestures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transcript {
    labels: Vec<GestureLabel>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: GestureLabel) {
        self.labels.push(label);
    }

    /// Display strings joined by single spaces.
    pub fn text(&self) -> String {
        self.labels
            .iter()
            .map(|l| l.display())
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn labels(&self) -> &[GestureLabel] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }
}

impl TranscriptSink for Transcript {
    fn on_gesture_confirmed(&mut self, label: GestureLabel) {
        self.push(label);
    }

    fn clear(&mut self) {
        Transcript::clear(self);
    }
}

impl fmt::Display for Transcript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_space_joined() {
        let mut transcript = Transcript::new();
        assert_eq!(transcript.text(), "");

        transcript.on_gesture_confirmed(GestureLabel::Hello);
        assert_eq!(transcript.text(), "سڵاو");

        transcript.on_gesture_confirmed(GestureLabel::Yes);
        assert_eq!(
            transcript.text(),
            format!("{} {}", GestureLabel::Hello.display(), GestureLabel::Yes.display())
        );
        assert!(!transcript.text().starts_with(' '));
        assert!(!transcript.text().ends_with(' '));
        assert_eq!(transcript.to_string(), transcript.text());
    }

    #[test]
    fn test_clear() {
        let mut transcript = Transcript::new();
        transcript.push(GestureLabel::Stop);
        transcript.push(GestureLabel::Stop);
        assert_eq!(transcript.len(), 2);

        TranscriptSink::clear(&mut transcript);
        assert!(transcript.is_empty());
        assert_eq!(transcript.text(), "");
    }
}
