pub mod aggregate;
pub mod dump;
pub mod error;
pub mod filter;
pub mod io;
pub mod model;
pub mod plot;
