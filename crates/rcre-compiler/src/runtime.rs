//! Runtime adapter interface.
//!
//! The embedder supplies a [`Runtime`]; the compiler calls into it once
//! per compiled object to materialize the callbacks it embeds. Callback
//! internals — including whether they dispatch synchronously — are the
//! runtime's concern; the compiler never invokes them.

use rcre_core::error::Result;
use rcre_match::Hits;

use crate::ast::NodeAddress;

/// Parameters for a match callback.
#[derive(Debug, Clone)]
pub struct MatchParams {
    pub address: NodeAddress,
    pub parent_address: Option<NodeAddress>,
    pub origin: bool,
}

/// Parameters for an assertion callback.
#[derive(Debug, Clone)]
pub struct AssertParams {
    pub address: NodeAddress,
    pub parent_address: Option<NodeAddress>,
    pub rule_id: String,
}

/// Invoked by the runtime when a matcher produces hits.
pub type CbMatch = Box<dyn Fn(&Hits) -> Result<()> + Send + Sync>;

/// Invoked by the runtime when an assertion fires.
pub type CbAssert = Box<dyn Fn() -> Result<()> + Send + Sync>;

/// Factory for the callbacks embedded into compiled objects.
pub trait Runtime {
    fn new_cb_match(&self, params: MatchParams) -> CbMatch;
    fn new_cb_assert(&self, params: AssertParams) -> CbAssert;
}

/// A runtime whose callbacks do nothing. Default for tests and for
/// compiles that only inspect the emitted objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRuntime;

impl Runtime for NoopRuntime {
    fn new_cb_match(&self, _params: MatchParams) -> CbMatch {
        Box::new(|_| Ok(()))
    }

    fn new_cb_assert(&self, _params: AssertParams) -> CbAssert {
        Box::new(|| Ok(()))
    }
}
