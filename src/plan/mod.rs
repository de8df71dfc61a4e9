//! Pattern compilation: axis handles, compiled plans and the plan cache.

mod axis;
#[cfg(feature = "std")]
mod cache;
mod compiled;

pub use axis::{AxisHandle, AxisList, AxisRegistry};
#[cfg(feature = "std")]
pub use cache::{CacheStats, DEFAULT_CACHE_CAPACITY, PlanCache};
pub use compiled::{CompiledPlan, OutputPlan, compile_pattern};
