//! Cache key derivation and result cache specs

mod capacity;
mod expiry;
mod keys;
