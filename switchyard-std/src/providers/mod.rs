//! Standard [`ContextProvider`](switchyard_core::ContextProvider) implementations.

pub mod fixed;
pub mod func;
pub mod shared;

pub use fixed::FixedContext;
pub use func::FnContext;
pub use shared::SharedContext;
