//! Turns user supplied input into the sequence a run works on.

use rand::Rng;
use shared::domain::InputSource;

use crate::config::PlaybackConfig;

/// A normalized sequence plus whether it had to be randomized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedInput {
    pub values: Vec<i64>,
    pub randomized: bool,
}

pub fn resolve<R: Rng>(source: &InputSource, config: &PlaybackConfig, rng: &mut R) -> LoadedInput {
    let values = match source {
        InputSource::Text(text) => parse_sequence(text, config.max_len),
        InputSource::Values(values) => values.iter().copied().take(config.max_len).collect(),
        InputSource::Random => Vec::new(),
    };

    if values.is_empty() {
        return LoadedInput {
            values: random_sequence(config, rng),
            randomized: true,
        };
    }

    LoadedInput {
        values,
        randomized: false,
    }
}

/// Comma separated integers. Tokens without a leading integer are dropped.
pub fn parse_sequence(text: &str, max_len: usize) -> Vec<i64> {
    text.split(',')
        .filter_map(parse_leading_int)
        .take(max_len)
        .collect()
}

/// `" 12abc"` reads as 12 and `"3.7"` as 3; `"abc"` and overflowing tokens
/// yield nothing.
fn parse_leading_int(token: &str) -> Option<i64> {
    let token = token.trim();
    let (negative, digits) = match token.as_bytes().first() {
        Some(b'-') => (true, &token[1..]),
        Some(b'+') => (false, &token[1..]),
        _ => (false, token),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

pub fn random_sequence<R: Rng>(config: &PlaybackConfig, rng: &mut R) -> Vec<i64> {
    (0..config.random_len)
        .map(|_| rng.gen_range(config.random_min..=config.random_max))
        .collect()
}
