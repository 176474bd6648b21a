//! Production reply selector, backed by `rand`.

use rand::Rng;
use talkio_core::ReplySelector;

/// Uniform random pick from the reply variants.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelector;

impl ReplySelector for RandomSelector {
    fn pick<'a>(&self, options: &'a [&'a str]) -> &'a str {
        let mut rng = rand::rng();
        options[rng.random_range(0..options.len())]
    }
}
