//! Reusable einfunc engine backed by a plan cache.

use alloc::sync::Arc;

use ndarray::ArrayD;

use super::config::EinfuncConfig;
use super::executor::einfunc_with_plan;
use super::output::{EinfuncOutput, IntoOutputs};
use crate::error::{EinfuncError, EinfuncResult};
use crate::plan::{AxisHandle, DEFAULT_CACHE_CAPACITY, PlanCache};
use crate::tensor::{BoundTensor, Element};

/// Runs einfunc calls through a shared plan cache.
///
/// Cloning an engine shares its cache.
#[derive(Debug, Clone)]
pub struct Einfunc {
    cache: Arc<PlanCache>,
    config: EinfuncConfig,
}

impl Default for Einfunc {
    fn default() -> Self {
        Self::new(EinfuncConfig::default())
    }
}

impl Einfunc {
    /// Creates an engine with a default-sized cache.
    pub fn new(config: EinfuncConfig) -> Self {
        Self::with_cache_capacity(config, DEFAULT_CACHE_CAPACITY)
    }

    /// Creates an engine whose cache holds at most `capacity` plans.
    ///
    /// A capacity of zero compiles on every call.
    pub fn with_cache_capacity(config: EinfuncConfig, capacity: usize) -> Self {
        Self::with_shared_cache(config, Arc::new(PlanCache::new(capacity)))
    }

    /// Creates an engine on an existing cache.
    pub fn with_shared_cache(config: EinfuncConfig, cache: Arc<PlanCache>) -> Self {
        Self { cache, config }
    }

    pub fn cache(&self) -> &Arc<PlanCache> {
        &self.cache
    }

    pub fn config(&self) -> &EinfuncConfig {
        &self.config
    }

    /// Runs `function` with the engine's default config.
    pub fn call<'a, A, F, R>(
        &self,
        tensors: &'a [ArrayD<A>],
        pattern: &str,
        function: F,
    ) -> EinfuncResult<EinfuncOutput<A>>
    where
        A: Element,
        F: Fn(&[BoundTensor<'a, A>], &[AxisHandle]) -> R,
        R: IntoOutputs<'a, A>,
    {
        self.call_with(tensors, pattern, function, &self.config)
    }

    /// Runs `function` with an explicit config.
    pub fn call_with<'a, A, F, R>(
        &self,
        tensors: &'a [ArrayD<A>],
        pattern: &str,
        function: F,
        config: &EinfuncConfig,
    ) -> EinfuncResult<EinfuncOutput<A>>
    where
        A: Element,
        F: Fn(&[BoundTensor<'a, A>], &[AxisHandle]) -> R,
        R: IntoOutputs<'a, A>,
    {
        if tensors.is_empty() {
            return Err(EinfuncError::TooFewArguments { got: 2 });
        }

        let plan = self.cache.get_or_compile(pattern, config.expose_handles)?;
        einfunc_with_plan(tensors, &plan, function, config)
    }
}
