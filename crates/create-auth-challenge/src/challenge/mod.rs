//! One-time code challenge issuance.

mod issuer;

pub use issuer::ChallengeIssuer;
