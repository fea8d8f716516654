pub mod apply_ctx;
pub mod apply_flow;

pub use apply_ctx::ApplyCtx;
pub use apply_flow::ApplyFlow;
