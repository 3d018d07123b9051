//! Trial-division primality test used for input validation

/// Check whether `p` is prime.
///
/// Plain trial division by odd candidates up to sqrt(p). The moduli this
/// crate can realistically solve for are tiny, so nothing faster is needed.
pub fn is_prime(p: i64) -> bool {
    if p < 2 {
        return false;
    }
    if p < 4 {
        return true;
    }
    if p % 2 == 0 {
        return false;
    }
    let mut d: i64 = 3;
    while d * d <= p {
        if p % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}
