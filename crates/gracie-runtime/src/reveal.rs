//! Title reveal: lights the GRACIE acronym one letter at a time

pub const TITLE_LETTERS: [char; 6] = ['G', 'R', 'A', 'C', 'I', 'E'];

pub const TITLE_WORDS: [&str; 6] = [
    "Grandiose",
    "Relational",
    "Attribute",
    "Classification",
    "Intelligence",
    "Engine",
];

/// One letter of the title and its expansion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TitleLetter {
    pub letter: char,
    pub word: &'static str,
    pub lit: bool,
}

/// Timing of the reveal: a start delay, then one more letter per step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TitleReveal {
    pub start_delay: f32,
    pub step: f32,
}

impl Default for TitleReveal {
    fn default() -> Self {
        Self {
            start_delay: 6.7,
            step: 0.5,
        }
    }
}

impl TitleReveal {
    /// Index of the last lit letter, or None before the first step fires.
    /// Holds at the final letter once reached.
    pub fn active_index(&self, elapsed: f32) -> Option<usize> {
        if !elapsed.is_finite() || elapsed < self.start_delay || self.step <= 0.0 {
            return None;
        }
        let steps = ((elapsed - self.start_delay) / self.step).floor() as usize;
        if steps == 0 {
            None
        } else {
            Some((steps - 1).min(TITLE_LETTERS.len() - 1))
        }
    }

    pub fn is_complete(&self, elapsed: f32) -> bool {
        self.active_index(elapsed) == Some(TITLE_LETTERS.len() - 1)
    }

    pub fn letters(&self, elapsed: f32) -> Vec<TitleLetter> {
        let active = self.active_index(elapsed);
        TITLE_LETTERS
            .iter()
            .zip(TITLE_WORDS)
            .enumerate()
            .map(|(i, (&letter, word))| TitleLetter {
                letter,
                word,
                lit: active.map(|a| i <= a).unwrap_or(false),
            })
            .collect()
    }
}
