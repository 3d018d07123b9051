//! Domain model: problem instances over the Boolean meet lattice

pub mod instance;
pub mod primes;

pub use instance::{InstanceError, ProblemInstance};
pub use primes::is_prime;
