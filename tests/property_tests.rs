use proptest::prelude::*;
use rust_decimal::Decimal;

use storefront_rs::models::{validate_cart_quantity, Cart, Product};
use storefront_rs::repositories::{cart_to_records, CartRecord};

// Property-based test strategies
prop_compose! {
    fn arb_price()(cents in 1u32..100_000) -> Decimal {
        // prices as cents, exactly 2 decimal places
        Decimal::from_parts(cents, 0, 0, false, 2)
    }
}

prop_compose! {
    fn arb_product()(id in 1u32..20, price in arb_price()) -> Product {
        Product::new(id, format!("Product {}", id), price, "generated product", "p.jpg")
    }
}

prop_compose! {
    fn arb_quantity()(quantity in 1u32..100) -> u32 {
        quantity
    }
}

prop_compose! {
    fn arb_adds()(adds in prop::collection::vec((arb_product(), arb_quantity()), 0..12)) -> Vec<(Product, u32)> {
        adds
    }
}

proptest! {
    #[test]
    fn test_same_product_adds_merge_into_one_line(
        product in arb_product(),
        quantities in prop::collection::vec(arb_quantity(), 1..10)
    ) {
        let mut cart = Cart::new();
        for quantity in &quantities {
            cart.add_item(product.clone(), *quantity);
        }

        prop_assert_eq!(cart.items().len(), 1);
        prop_assert_eq!(cart.item_quantity(product.id), quantities.iter().sum::<u32>());
    }

    #[test]
    fn test_cart_invariants_hold_under_arbitrary_adds(adds in arb_adds()) {
        let mut cart = Cart::new();
        for (product, quantity) in &adds {
            cart.add_item(product.clone(), *quantity);
        }

        // every line has a positive quantity
        prop_assert!(cart.items().iter().all(|item| item.quantity >= 1));

        // no duplicate product ids
        let mut ids: Vec<u32> = cart.items().iter().map(|item| item.product.id).collect();
        ids.sort_unstable();
        ids.dedup();
        prop_assert_eq!(ids.len(), cart.items().len());

        // totals are the sums over the lines
        let expected_items: u32 = cart.items().iter().map(|item| item.quantity).sum();
        prop_assert_eq!(cart.total_items(), expected_items);

        let expected_price: Decimal = cart
            .items()
            .iter()
            .map(|item| item.product.price * Decimal::from(item.quantity))
            .sum();
        prop_assert_eq!(cart.total_price(), expected_price);
    }

    #[test]
    fn test_remove_drains_a_line_exactly(
        product in arb_product(),
        quantity in arb_quantity()
    ) {
        let mut cart = Cart::new();
        cart.add_item(product.clone(), quantity);

        for remaining in (0..quantity).rev() {
            cart.remove_item(product.id);
            prop_assert_eq!(cart.item_quantity(product.id), remaining);
        }
        prop_assert!(!cart.contains_item(product.id));

        // one extra removal is a no-op
        cart.remove_item(product.id);
        prop_assert!(cart.is_empty());
    }

    #[test]
    fn test_records_round_trip_preserves_ids_and_quantities(adds in arb_adds()) {
        let mut cart = Cart::new();
        for (product, quantity) in &adds {
            cart.add_item(product.clone(), *quantity);
        }

        let records = cart_to_records(&cart);

        // the records mirror the cart lines in order
        prop_assert_eq!(records.len(), cart.items().len());
        for (record, item) in records.iter().zip(cart.items()) {
            prop_assert_eq!(record.product_id, item.product.id);
            prop_assert_eq!(record.quantity, item.quantity);
        }

        // and survive serialization as-is
        let json = serde_json::to_string(&records).unwrap();
        let decoded: Vec<CartRecord> = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(decoded, records);
    }

    #[test]
    fn test_quantity_validation(quantity in any::<u32>()) {
        let result = validate_cart_quantity(quantity);

        if quantity > 0 && quantity <= 1000 {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(result.is_err());
        }
    }
}
