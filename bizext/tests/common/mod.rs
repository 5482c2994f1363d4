#![allow(dead_code)]

use bizext::{
    BizScenario, BoxError, ExecutorConfig, Extension, ExtensionExecutor, ExtensionRegister,
    ExtensionRepository, testing::CallLog,
};
use std::sync::Arc;

// ============================================================================
// Capabilities
// ============================================================================

bizext::capability!(pub Say = "test.Say", str => String);

bizext::capability!(pub Quote = "test.Quote", u32 => Option<u32>);

// ============================================================================
// Extensions
// ============================================================================

pub struct SayA;

impl Extension<Say> for SayA {
    fn exec(&self, ctx: &str) -> Result<String, BoxError> {
        Ok(format!("A:{ctx}"))
    }
}

pub struct SayB;

impl Extension<Say> for SayB {
    fn exec(&self, ctx: &str) -> Result<String, BoxError> {
        Ok(format!("B:{ctx}"))
    }
}

/// Supports only contexts starting with `accept`, logging every call.
pub struct Picky<const N: usize> {
    pub accept: &'static str,
    pub log: CallLog,
}

impl<const N: usize> Extension<Say> for Picky<N> {
    fn support(&self, ctx: &str) -> bool {
        ctx.starts_with(self.accept)
    }

    fn exec(&self, ctx: &str) -> Result<String, BoxError> {
        self.log.record(format!("picky-{}", N));
        Ok(format!("{}:{ctx}", N))
    }
}

/// Returns `Some(ctx * N)` when `ctx` is divisible by `N`, `None` otherwise.
pub struct Multiple<const N: u32> {
    pub log: CallLog,
}

impl<const N: u32> Extension<Quote> for Multiple<N> {
    fn exec(&self, ctx: &u32) -> Result<Option<u32>, BoxError> {
        self.log.record(format!("multiple-{}", N));
        Ok((ctx % N == 0).then_some(ctx * N))
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub struct Fixture {
    pub repository: Arc<ExtensionRepository>,
    pub register: ExtensionRegister,
    pub executor: ExtensionExecutor,
}

pub fn fixture() -> Fixture {
    fixture_with(ExecutorConfig::default())
}

pub fn strict_fixture() -> Fixture {
    fixture_with(ExecutorConfig::strict())
}

fn fixture_with(config: ExecutorConfig) -> Fixture {
    let repository = Arc::new(ExtensionRepository::new());
    Fixture {
        register: ExtensionRegister::new(repository.clone()),
        executor: ExtensionExecutor::with_config(repository.clone(), config),
        repository,
    }
}

pub fn greet() -> BizScenario {
    BizScenario::of_use_case("test", "greet")
}
