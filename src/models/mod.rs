pub mod nvcf;
pub mod record;

pub use nvcf::*;
pub use record::*;
