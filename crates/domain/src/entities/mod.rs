pub mod pair;
pub mod token;

// Re-export for easier access
pub use pair::{PairQuery, PairSnapshot, ReservesSnapshot};
pub use token::TokenInfo;
