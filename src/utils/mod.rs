pub mod price;
pub mod webhook;
