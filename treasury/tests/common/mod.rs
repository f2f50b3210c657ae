//! Shared fixtures: in-memory collaborators around a keeper.

#![allow(dead_code)]

use economics::{PriceTable, StakingPool, SupplyManager};
use treasury::{BlockContext, TreasuryConfig, TreasuryKeeper};
use treasury_storage::{KvStore, MemoryStore};

pub struct TestInput<S> {
    pub height: u64,
    pub prices: PriceTable,
    pub supply: SupplyManager,
    pub staking: StakingPool,
    pub keeper: TreasuryKeeper<S>,
}

pub fn create_test_input() -> TestInput<MemoryStore> {
    create_test_input_with(MemoryStore::new(), TreasuryConfig::default())
}

pub fn create_test_input_with<S: KvStore>(kv: S, config: TreasuryConfig) -> TestInput<S> {
    let _ = env_logger::builder().is_test(true).try_init();

    TestInput {
        height: 0,
        prices: PriceTable::new(),
        supply: SupplyManager::new(),
        staking: StakingPool::new(),
        keeper: TreasuryKeeper::new(kv, config).unwrap(),
    }
}

/// Split a test input into a block context and the keeper it drives.
pub fn ctx_and_keeper<S>(input: &mut TestInput<S>) -> (BlockContext<'_>, &mut TreasuryKeeper<S>) {
    let ctx = BlockContext::new(input.height, &input.prices, &input.supply, &input.staking);
    (ctx, &mut input.keeper)
}
