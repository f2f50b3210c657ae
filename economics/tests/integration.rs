use economics::constants::*;
use economics::*;
use rust_decimal::Decimal;

#[test]
fn test_collaborators_report_block_state() {
    let mut supply = SupplyManager::new();
    supply.mint(MICRO_LUNA_DENOM, 1_000 * MICRO_UNIT).unwrap();
    supply.burn(MICRO_LUNA_DENOM, 250 * MICRO_UNIT).unwrap();

    let mut prices = PriceTable::new();
    prices
        .set_exchange_rate(MICRO_LUNA_DENOM, Decimal::new(10, 0))
        .unwrap();

    let mut staking = StakingPool::new();
    staking.bond(400 * MICRO_UNIT).unwrap();

    let ledger: &dyn SupplyLedger = &supply;
    let oracle: &dyn ExchangeRateOracle = &prices;
    let view: &dyn StakingView = &staking;

    assert_eq!(ledger.total_supply(MICRO_LUNA_DENOM), 750 * MICRO_UNIT);
    assert_eq!(oracle.exchange_rate(MICRO_LUNA_DENOM), Some(Decimal::new(10, 0)));
    assert_eq!(oracle.exchange_rate(MICRO_SDR_DENOM), None);
    assert_eq!(view.total_bonded(), 400 * MICRO_UNIT);
}

#[test]
fn test_epoch_walk() {
    let bpe = 10;
    let boundaries: Vec<u64> = (0..=35)
        .filter(|h| is_epoch_boundary(*h, bpe).unwrap())
        .collect();
    assert_eq!(boundaries, vec![0, 10, 20, 30]);

    for height in boundaries {
        let epoch = epoch_of(height, bpe).unwrap();
        assert_eq!(first_height_of(epoch, bpe), Some(height));
    }
}

#[test]
fn test_coins_serialize_sorted() {
    let bag = Coins::from_coins(vec![
        Coin::new(MICRO_USD_DENOM, 2),
        Coin::new(MICRO_CNY_DENOM, 1),
    ])
    .unwrap();

    let json = serde_json::to_string(&bag).unwrap();
    assert_eq!(json, r#"{"ucny":1,"uusd":2}"#);

    let back: Coins = serde_json::from_str(&json).unwrap();
    assert_eq!(back, bag);
}
