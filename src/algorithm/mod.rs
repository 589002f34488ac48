mod traits;

pub mod hmac;

pub use self::hmac::{Hmac, HmacHash, HmacKeySet};
pub use traits::{Algorithm, Resolver};
