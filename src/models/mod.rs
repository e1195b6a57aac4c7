pub mod card;
pub mod deck;
pub mod provider;

pub use card::*;
pub use deck::*;
pub use provider::*;
