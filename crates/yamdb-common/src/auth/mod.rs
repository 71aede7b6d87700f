//! Authentication utilities

mod confirmation;
mod jwt;

pub use confirmation::ConfirmationCodes;
pub use jwt::{Claims, JwtService, TokenType};
