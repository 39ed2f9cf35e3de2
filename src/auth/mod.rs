pub mod claims;

pub use claims::{decode_claims, GroupClaim, IdTokenClaims, ADMIN_GROUP};
