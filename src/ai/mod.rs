pub mod describe;
pub mod openai_compat;

pub use describe::*;
pub use openai_compat::*;
