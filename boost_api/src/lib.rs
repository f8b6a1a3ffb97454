pub mod client;
pub mod dto;
pub mod envelope;
pub mod interactor;
pub mod session;
