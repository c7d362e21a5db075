pub mod client;
pub mod mock;
pub mod types;

pub use client::CreemProvider;
pub use mock::MockCreemProvider;
