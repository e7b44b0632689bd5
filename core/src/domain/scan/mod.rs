pub mod correction;
pub mod entities;
pub mod normalizer;
pub mod ports;
pub mod services;
pub mod session;
pub mod value_objects;

pub use entities::*;
pub use ports::*;
pub use value_objects::*;
