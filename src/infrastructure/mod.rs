pub mod keygen;
pub mod persistence;
pub mod search;
