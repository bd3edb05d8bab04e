// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Number theory underneath the cryptosystems.

mod generator;
mod modular;
mod primality;
mod prime;

pub use generator::{generate_generator, is_generator, BruteForce, Factored, GeneratorFinder};
pub use modular::{are_coprime, checked_power_mod, multiplicative_inverse, power_mod};
pub use primality::{estimate_k, is_probable_prime, miller_rabin};
pub use prime::{random_odd_number_nbits, random_prime, random_probable_prime, Candidates};
