pub mod buss;
pub mod nemhauser_trotter;

pub use buss::{buss_kernel, BussResult};
pub use nemhauser_trotter::{nemhauser_trotter_kernel, NtResult};
