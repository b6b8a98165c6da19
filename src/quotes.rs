//! Quotes shown beside the sign-in and sign-up forms.

use rand::Rng;

pub const CAMPUS_QUOTES: &[&str] = &[
    "A library is not merely a collection of books, but a gathering of minds across time.",
    "The only wealth that multiplies when given away is knowledge.",
    "Within these quiet walls, we find the loud ideas that change the world.",
    "We are wiser together than we ever could be alone.",
    "To share what you know is to light a candle in the minds of others.",
    "The library is a harbor in the noise, a place where curiosity finds its compass.",
    "Today\u{2019}s curiosity is the seed for tomorrow\u{2019}s discovery.",
    "Here, the wisdom of the past meets the architects of the future.",
    "Collective understanding is the foundation of a resilient community.",
    "Every page turned is a bridge built between two perspectives.",
];

/// Pick one quote at random.
pub fn random() -> &'static str {
    let index = rand::rng().random_range(0..CAMPUS_QUOTES.len());
    CAMPUS_QUOTES[index]
}
