use crate::error::Result;
use crate::token::Header;

/// Core algorithm trait that signature verifiers implement
///
/// The pipeline never inspects key material. It hands the algorithm the
/// exact signing input and the decoded signature, and returns whatever error
/// the algorithm produces.
pub trait Algorithm {
    /// The algorithm identifier as it appears in the `alg` header (e.g. "HS256")
    fn name(&self) -> &str;

    /// Verify a signature
    ///
    /// # Arguments
    /// * `signing_input` - The raw `header.claims` bytes of the token
    /// * `signature` - The Base64URL-decoded signature bytes, possibly empty
    ///
    /// Accepting or rejecting an empty signature is the algorithm's decision.
    fn verify(&self, signing_input: &[u8], signature: &[u8]) -> Result<()>;

    /// Expose the [`Resolver`] capability, if the algorithm has one
    ///
    /// Algorithms that select keys or variants from the header return
    /// `Some(self)`; the default is `None` and resolution is skipped.
    fn as_resolver(&mut self) -> Option<&mut dyn Resolver> {
        None
    }
}

/// Optional capability: configure an algorithm from a decoded header
///
/// Runs once per token, after the header is decoded and before any option
/// or signature check, so later steps observe the resolved state.
pub trait Resolver {
    fn resolve(&mut self, header: &Header) -> Result<()>;
}
