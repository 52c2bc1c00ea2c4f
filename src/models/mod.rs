pub mod estimates;
pub mod field;
pub mod recommendation;
pub mod request;
pub mod soil;
pub mod weather;

pub use estimates::*;
pub use field::*;
pub use recommendation::*;
pub use request::*;
pub use soil::*;
pub use weather::*;
