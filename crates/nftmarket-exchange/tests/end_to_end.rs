//! Integration test: asset lifecycle through the exchange
//!
//! MINT → APPROVE → LIST → PURCHASE → WITHDRAW
//!
//! Amounts are in the smallest unit (wei), so a tenth of an ether is
//! `100_000_000_000_000_000`.

use nftmarket_custody::{AssetRegistry, InMemoryAssetRegistry, PaymentLedger};
use nftmarket_exchange::Exchange;
use nftmarket_types::*;
use rust_decimal::Decimal;

type Market = Exchange<InMemoryAssetRegistry, PaymentLedger>;

/// `n` thousandths of an ether, in wei.
fn milli_ether(n: i64) -> Decimal {
    Decimal::from(n) * Decimal::from(1_000_000_000_000_000_i64)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("nftmarket=debug")
        .try_init();
}

struct World {
    market: Market,
    operator: Address,
    dog: Address,
    doggy: Address,
}

fn world() -> World {
    init_tracing();
    let operator = Address::random();
    let config = MarketConfig::new(Address::random(), operator);
    World {
        market: Exchange::new(config, InMemoryAssetRegistry::new(), PaymentLedger::new())
            .unwrap(),
        operator,
        dog: Address::random(),
        doggy: Address::random(),
    }
}

impl World {
    fn mint_approved(&mut self, contract: Address, owner: Address) -> AssetKey {
        let exchange = self.market.address();
        let key = self.market.registry_mut().mint(contract, owner).unwrap();
        self.market
            .registry_mut()
            .approve(owner, &key, exchange)
            .unwrap();
        key
    }
}

#[test]
fn list_buy_withdraw_single_asset() {
    let mut w = world();
    let seller = Address::random();
    let buyer = Address::random();
    let price = milli_ether(100);

    // =====================================================================
    // LIST
    // =====================================================================
    let key = w.mint_approved(w.dog, seller);
    assert_eq!(key.token_id, TokenId(0));
    w.market.list_nft(seller, key, price).unwrap();

    let listing = w.market.listing(&key).unwrap();
    assert_eq!(listing.seller, seller);
    assert_eq!(listing.price, price);

    // =====================================================================
    // PURCHASE
    // =====================================================================
    let record = w.market.purchase_nft(buyer, key, price).unwrap();
    assert_eq!(record.asset, key);
    assert_eq!(record.seller, seller);
    assert_eq!(record.buyer, buyer);
    assert_eq!(w.market.registry().owner_of(&key), Some(buyer));
    assert_eq!(w.market.proceeds(seller), milli_ether(90));
    assert_eq!(w.market.revenue_pool(), milli_ether(10));

    // =====================================================================
    // WITHDRAW
    // =====================================================================
    assert_eq!(w.market.withdraw(seller).unwrap(), milli_ether(90));
    assert_eq!(w.market.withdraw_revenue(w.operator).unwrap(), milli_ether(10));
    assert_eq!(w.market.payments().balance(seller), milli_ether(90));
    assert_eq!(w.market.payments().balance(w.operator), milli_ether(10));
    assert_eq!(w.market.proceeds(seller), Decimal::ZERO);
    assert_eq!(w.market.revenue_pool(), Decimal::ZERO);
    w.market.verify_conservation().unwrap();

    // The buyer can relist what they bought.
    let exchange = w.market.address();
    w.market
        .registry_mut()
        .approve(buyer, &key, exchange)
        .unwrap();
    w.market.list_nft(buyer, key, milli_ether(200)).unwrap();
}

#[test]
fn proceeds_accumulate_across_contracts() {
    let mut w = world();
    let seller = Address::random();
    let buyer = Address::random();

    let dog = w.mint_approved(w.dog, seller);
    let doggy = w.mint_approved(w.doggy, seller);
    w.market.list_nft(seller, dog, milli_ether(100)).unwrap();
    w.market.list_nft(seller, doggy, milli_ether(100)).unwrap();
    assert_eq!(w.market.listings().listings_by(seller).len(), 2);

    w.market.purchase_nft(buyer, dog, milli_ether(100)).unwrap();
    w.market.purchase_nft(buyer, doggy, milli_ether(100)).unwrap();

    assert_eq!(w.market.proceeds(seller), milli_ether(180));
    assert_eq!(w.market.withdraw(seller).unwrap(), milli_ether(180));
    assert!(matches!(
        w.market.withdraw(seller),
        Err(MarketError::NoFunds(_))
    ));
    assert_eq!(w.market.revenue_pool(), milli_ether(20));
}

#[test]
fn share_update_applies_to_later_sales_only() {
    let mut w = world();
    let seller = Address::random();
    let buyer = Address::random();

    let first = w.mint_approved(w.dog, seller);
    w.market.list_nft(seller, first, milli_ether(100)).unwrap();
    w.market.purchase_nft(buyer, first, milli_ether(100)).unwrap();
    assert_eq!(w.market.revenue_pool(), milli_ether(10));

    w.market.update_share(w.operator, 30).unwrap();
    assert_eq!(w.market.share_percent().get(), 30);

    let second = w.mint_approved(w.dog, seller);
    w.market.list_nft(seller, second, milli_ether(160)).unwrap();
    w.market.purchase_nft(buyer, second, milli_ether(160)).unwrap();

    // 10 from the first sale, 30% of 160 from the second.
    assert_eq!(w.market.revenue_pool(), milli_ether(58));
    assert_eq!(w.market.proceeds(seller), milli_ether(90 + 112));
    assert_eq!(w.market.withdraw_revenue(w.operator).unwrap(), milli_ether(58));
    w.market.verify_conservation().unwrap();
}

#[test]
fn sold_items_ledger_grows_in_order() {
    let mut w = world();
    let seller = Address::random();
    let buyer = Address::random();
    assert!(w.market.sold_items().is_empty());

    let a = w.mint_approved(w.dog, seller);
    let b = w.mint_approved(w.doggy, seller);
    w.market.list_nft(seller, a, milli_ether(100)).unwrap();
    w.market.list_nft(seller, b, milli_ether(50)).unwrap();

    w.market.purchase_nft(buyer, a, milli_ether(100)).unwrap();
    assert_eq!(w.market.sold_items().len(), 1);

    // Overpayment is recorded as the sale price.
    w.market.purchase_nft(buyer, b, milli_ether(75)).unwrap();
    let items = w.market.sold_items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].asset, a);
    assert_eq!(items[0].sold_price, milli_ether(100));
    assert_eq!(items[0].sequence, 0);
    assert_eq!(items[1].asset, b);
    assert_eq!(items[1].sold_price, milli_ether(75));
    assert_eq!(items[1].sequence, 1);
    assert_ne!(items[0].sale_id, items[1].sale_id);
}

#[test]
fn events_follow_the_lifecycle() {
    let mut w = world();
    let seller = Address::random();
    let buyer = Address::random();
    let key = w.mint_approved(w.dog, seller);

    w.market.list_nft(seller, key, milli_ether(100)).unwrap();
    w.market.update_list_nft(seller, key, milli_ether(120)).unwrap();
    w.market.purchase_nft(buyer, key, milli_ether(120)).unwrap();
    w.market.withdraw(seller).unwrap();
    w.market.withdraw_revenue(w.operator).unwrap();

    let events = w.market.drain_events();
    assert_eq!(
        events,
        vec![
            MarketEvent::ItemListed {
                seller,
                asset: key,
                price: milli_ether(100)
            },
            MarketEvent::ItemListed {
                seller,
                asset: key,
                price: milli_ether(120)
            },
            MarketEvent::ItemTransferred { buyer, asset: key },
            MarketEvent::ProceedsWithdrawn {
                seller,
                amount: milli_ether(108)
            },
            MarketEvent::RevenueWithdrawn {
                operator: w.operator,
                amount: milli_ether(12)
            },
        ]
    );
    assert!(w.market.events().is_empty());
}

#[test]
fn unlist_emits_and_blocks_purchase() {
    let mut w = world();
    let seller = Address::random();
    let key = w.mint_approved(w.dog, seller);
    w.market.list_nft(seller, key, milli_ether(100)).unwrap();
    w.market.drain_events();

    w.market.unlist_nft(seller, key).unwrap();
    assert_eq!(
        w.market.drain_events(),
        vec![MarketEvent::ItemUnlisted { seller, asset: key }]
    );
    assert!(matches!(
        w.market.purchase_nft(Address::random(), key, milli_ether(100)),
        Err(MarketError::NotListed(_))
    ));
    assert_eq!(w.market.registry().owner_of(&key), Some(seller));
}

#[test]
fn seller_may_buy_own_listing() {
    let mut w = world();
    let seller = Address::random();
    let key = w.mint_approved(w.dog, seller);
    w.market.list_nft(seller, key, milli_ether(100)).unwrap();

    let record = w.market.purchase_nft(seller, key, milli_ether(100)).unwrap();
    assert_eq!(record.buyer, seller);
    assert_eq!(w.market.registry().owner_of(&key), Some(seller));
    assert_eq!(w.market.proceeds(seller), milli_ether(90));
    assert_eq!(w.market.revenue_pool(), milli_ether(10));
}

#[test]
fn config_round_trips_through_json() {
    let operator = Address::random();
    let exchange = Address::random();
    let json = format!(r#"{{"exchange":"{exchange}","operator":"{operator}"}}"#);
    let config = MarketConfig::from_json_str(&json).unwrap();
    assert_eq!(config.share_percent.get(), 10);

    let market = Exchange::new(config, InMemoryAssetRegistry::new(), PaymentLedger::new())
        .unwrap();
    assert_eq!(market.address(), exchange);
    assert_eq!(market.revenue().operator(), operator);
    assert_eq!(market.calculate_share(milli_ether(100)), milli_ether(10));

    let encoded = serde_json::to_string(market.config()).unwrap();
    assert!(encoded.contains(&exchange.to_string()));
}
