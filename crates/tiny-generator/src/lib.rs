//! Identifier generators for tiny URL entries.

pub mod seq;

use rand::Rng;
use typed_builder::TypedBuilder;

pub use seq::SeqGenerator;

/// The 64 URL-safe characters generated identifiers are drawn from.
pub const ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Length of generated identifiers unless configured otherwise.
pub const DEFAULT_ID_LEN: usize = 5;

/// Trait for generating identifiers.
///
/// Implementations are pure generators that don't interact with storage, so
/// the generated identifiers are not guaranteed to be unique. Callers are
/// expected to detect collisions against the store and ask for another one.
pub trait Generator: Send + Sync + 'static {
    /// Generates a new identifier.
    fn generate(&self) -> String;
}

/// Generates identifiers of a fixed length, picking every character
/// uniformly at random from [`ALPHABET`].
#[derive(Debug, Clone, TypedBuilder)]
pub struct RandomGenerator {
    #[builder(default = DEFAULT_ID_LEN)]
    length: usize,
}

impl RandomGenerator {
    /// Creates a generator producing identifiers of `length` characters.
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Length of the identifiers this generator produces.
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for RandomGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_LEN)
    }
}

impl Generator for RandomGenerator {
    fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}
