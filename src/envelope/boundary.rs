//! MIME boundary generation.

use rand::RngCore;

/// Number of random bytes behind each boundary.
const BOUNDARY_BYTES: usize = 16;

/// Produces the multipart boundary for one raw message build.
///
/// A boundary must not occur anywhere in the message it delimits.
pub trait BoundarySource {
    /// Return a fresh boundary token.
    fn next_boundary(&mut self) -> String;
}

/// Boundaries of 32 lowercase hex characters drawn from the thread-local RNG.
///
/// # Examples
///
/// ```
/// use integrations_aws_ses_query::envelope::{BoundarySource, RandomBoundary};
///
/// let boundary = RandomBoundary.next_boundary();
/// assert_eq!(boundary.len(), 32);
/// assert!(boundary.chars().all(|c| c.is_ascii_hexdigit()));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomBoundary;

impl BoundarySource for RandomBoundary {
    fn next_boundary(&mut self) -> String {
        let mut bytes = [0u8; BOUNDARY_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex::encode(bytes)
    }
}
