pub mod secure_rng;


pub use secure_rng::SecureRng;
