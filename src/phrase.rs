use crate::word_bank::WordBank;
use anyhow::{bail, Result};
use rand::seq::SliceRandom;
use rand::Rng;

/// Produces target phrases by sampling the word bank uniformly with
/// replacement. The random source is injected so seeded generators give
/// deterministic phrases in tests.
#[derive(Debug, Clone)]
pub struct PhraseGenerator {
    bank: WordBank,
}

impl PhraseGenerator {
    pub fn new(bank: WordBank) -> Result<Self> {
        if bank.words.is_empty() {
            bail!("word bank `{}` is empty", bank.name);
        }
        Ok(Self { bank })
    }

    pub fn bank(&self) -> &WordBank {
        &self.bank
    }

    /// A phrase of `word_count` random bank words joined by single spaces.
    /// `word_count` is always >= 1: it comes from the level, which is
    /// score / words-per-level + 1.
    pub fn generate<R: Rng>(&self, rng: &mut R, word_count: usize) -> String {
        let words: Vec<&str> = (0..word_count)
            // bank is non-empty, checked at construction
            .map(|_| self.bank.words.choose(rng).unwrap().as_str())
            .collect();

        words.join(" ")
    }
}
