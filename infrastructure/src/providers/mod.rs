//! Generation providers

pub mod local_stub;

pub use local_stub::LocalStubGenerator;
