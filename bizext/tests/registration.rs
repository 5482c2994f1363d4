use bizext::{
    BizScenario, BoxError, Capability, ExtensionCoordinate, ExtensionError, ExtensionRegister,
    FnExtension, Registration, testing::StaticExtension,
};
use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    thread,
};

mod common;
use common::{Say, SayA, SayB, fixture, greet};

bizext::capability!(pub Shout = "test.Shout", str => String);

#[test]
fn test_coordinates_are_isolated() {
    let fx = fixture();
    let tmall = BizScenario::of_use_case("tmall", "greet");
    let taobao = BizScenario::of_use_case("taobao", "greet");

    fx.register.register_at::<Say, _>(SayA, &tmall, 0).unwrap();
    fx.register.register_at::<Say, _>(SayB, &taobao, 0).unwrap();
    fx.register
        .register_at::<Shout, _>(
            FnExtension::new(|s: &str| Ok::<_, BoxError>(s.to_uppercase())),
            &tmall,
            0,
        )
        .unwrap();

    let said = fx.executor.execute_all::<Say>(&tmall, "hi").unwrap();
    assert_eq!(said, ["A:hi"]);
    let said = fx.executor.execute_all::<Say>(&taobao, "hi").unwrap();
    assert_eq!(said, ["B:hi"]);
    let shouted = fx.executor.execute_all::<Shout>(&tmall, "hi").unwrap();
    assert_eq!(shouted, ["HI"]);
    assert!(fx.executor.execute_all::<Shout>(&taobao, "hi").unwrap().is_empty());

    assert_eq!(fx.repository.len(), 3);
    assert_eq!(fx.repository.extension_count(), 3);
}

#[test]
fn test_dotted_levels_do_not_share_registrations() {
    let fx = fixture();
    fx.register
        .register::<Say, _>(
            SayA,
            &Registration::new().with_biz_id("shop.eu").with_use_case("pay"),
        )
        .unwrap();

    let other = BizScenario::new("shop", "eu.pay", "x");
    assert_eq!(fx.executor.execute::<Say>(&other, "hi").unwrap(), None);
    assert!(fx.executor.execute_all::<Say>(&other, "hi").unwrap().is_empty());

    let own = BizScenario::new("shop.eu", "pay", "x");
    assert_ne!(own, other);
    let said = fx.executor.execute::<Say>(&own, "hi").unwrap();
    assert_eq!(said.as_deref(), Some("A:hi"));

    let parsed: BizScenario = own.to_string().parse().unwrap();
    assert_eq!(parsed.biz_id(), "shop.eu");
    let said = fx.executor.execute::<Say>(&parsed, "hi").unwrap();
    assert_eq!(said.as_deref(), Some("A:hi"));
}

#[test]
fn test_duplicate_rejected_within_coordinate() {
    let fx = fixture();
    let scenario = greet();
    fx.register.register_at::<Say, _>(SayA, &scenario, 0).unwrap();

    let err = fx
        .register
        .register_at::<Say, _>(SayA, &scenario, 10)
        .unwrap_err();
    match err {
        ExtensionError::DuplicateRegistration {
            coordinate,
            implementation,
        } => {
            assert_eq!(coordinate, ExtensionCoordinate::of(Say::ID, &scenario));
            assert!(implementation.ends_with("SayA"));
        }
        other => panic!("unexpected error: {other}"),
    }

    // The original registration is untouched.
    let all = fx.executor.execute_all::<Say>(&scenario, "hi").unwrap();
    assert_eq!(all, ["A:hi"]);
}

#[test]
fn test_same_type_allowed_across_coordinates() {
    let fx = fixture();
    fx.register
        .register_at::<Say, _>(SayA, &BizScenario::of_biz("one"), 0)
        .unwrap();
    fx.register
        .register_at::<Say, _>(SayA, &BizScenario::of_biz("two"), 0)
        .unwrap();
    fx.register
        .register_at::<Shout, _>(StaticExtension::<String>::new("x".into()), &greet(), 0)
        .unwrap();
    fx.register
        .register_at::<Say, _>(StaticExtension::<String>::new("x".into()), &greet(), 0)
        .unwrap();

    assert_eq!(fx.repository.len(), 4);
}

#[test]
fn test_ascending_order_with_stable_ties() {
    let fx = fixture();
    let scenario = greet();

    fx.register
        .register_at::<Say, _>(StaticExtension::<String, 1>::new("late".into()), &scenario, 10)
        .unwrap();
    fx.register
        .register_at::<Say, _>(StaticExtension::<String, 2>::new("tie-1".into()), &scenario, 5)
        .unwrap();
    fx.register
        .register_at::<Say, _>(StaticExtension::<String, 3>::new("early".into()), &scenario, -3)
        .unwrap();
    fx.register
        .register_at::<Say, _>(StaticExtension::<String, 4>::new("tie-2".into()), &scenario, 5)
        .unwrap();
    fx.register
        .register::<Say, _>(
            StaticExtension::<String, 5>::new("unordered".into()),
            &Registration::for_scenario(&scenario),
        )
        .unwrap();

    let all = fx.executor.execute_all::<Say>(&scenario, "hi").unwrap();
    assert_eq!(all, ["early", "tie-1", "tie-2", "late", "unordered"]);

    let orders: Vec<i32> = fx
        .repository
        .get(&ExtensionCoordinate::of(Say::ID, &scenario))
        .unwrap()
        .iter()
        .map(|entry| entry.order())
        .collect();
    assert_eq!(orders, [-3, 5, 5, 10, i32::MAX]);
}

#[test]
fn test_multi_scenario_registration_shares_instance() {
    let fx = fixture();
    let meta = Registration::new()
        .with_biz_ids(["tmall", "taobao"])
        .with_use_cases(["buy", "sell"])
        .with_order(1);

    fx.register
        .register_shared::<Say, _>(Arc::new(SayA), &meta)
        .unwrap();

    assert_eq!(fx.repository.len(), 4);
    for (biz, use_case) in [("tmall", "buy"), ("tmall", "sell"), ("taobao", "buy"), ("taobao", "sell")] {
        let scenario = BizScenario::of_use_case(biz, use_case);
        let said = fx.executor.execute::<Say>(&scenario, "hi").unwrap();
        assert_eq!(said.as_deref(), Some("A:hi"));
    }

    let a = fx
        .executor
        .locate::<Say>(&BizScenario::of_use_case("tmall", "buy"))
        .unwrap();
    let b = fx
        .executor
        .locate::<Say>(&BizScenario::of_use_case("taobao", "sell"))
        .unwrap();
    assert!(Arc::ptr_eq(&a[0], &b[0]));
}

#[test]
fn test_multi_scenario_registration_stops_at_first_duplicate() {
    let fx = fixture();
    fx.register
        .register_at::<Say, _>(SayA, &BizScenario::of_biz("b"), 0)
        .unwrap();

    let err = fx
        .register
        .register::<Say, _>(SayA, &Registration::new().with_biz_ids(["a", "b", "c"]))
        .unwrap_err();
    assert!(matches!(err, ExtensionError::DuplicateRegistration { .. }));

    let a = ExtensionCoordinate::of(Say::ID, &BizScenario::of_biz("a"));
    let c = ExtensionCoordinate::of(Say::ID, &BizScenario::of_biz("c"));
    assert!(fx.repository.contains(&a));
    assert!(!fx.repository.contains(&c));
}

/// Registers one `StaticExtension<_, TAG>` under 16 private coordinates and
/// the shared `hot` coordinate, then races for `SayA` at `contested`.
fn hammer<const TAG: usize>(
    register: &ExtensionRegister,
    hot: &BizScenario,
    contested: &BizScenario,
    accepted: &AtomicUsize,
) {
    for step in 0..16i32 {
        register
            .register_at::<Say, _>(
                StaticExtension::<String, TAG>::new(format!("{TAG}-{step}")),
                &BizScenario::of_biz(format!("w{TAG}-s{step}")),
                step,
            )
            .unwrap();
    }

    let order = (TAG as i32 * 7) % 5;
    register
        .register_at::<Say, _>(StaticExtension::<String, TAG>::new(format!("hot-{TAG}")), hot, order)
        .unwrap();

    match register.register_at::<Say, _>(SayA, contested, 0) {
        Ok(()) => {
            accepted.fetch_add(1, Ordering::SeqCst);
        }
        Err(ExtensionError::DuplicateRegistration { .. }) => {}
        Err(other) => panic!("worker {TAG}: {other}"),
    }
}

#[test]
fn test_concurrent_registration_keeps_lists_sorted() {
    let fx = fixture();
    let hot = greet();
    let contested = BizScenario::of_biz("contested");
    let accepted = AtomicUsize::new(0);
    let hot_coordinate = ExtensionCoordinate::of(Say::ID, &hot);

    thread::scope(|scope| {
        let (register, hot, contested, accepted) = (&fx.register, &hot, &contested, &accepted);
        scope.spawn(move || hammer::<0>(register, hot, contested, accepted));
        scope.spawn(move || hammer::<1>(register, hot, contested, accepted));
        scope.spawn(move || hammer::<2>(register, hot, contested, accepted));
        scope.spawn(move || hammer::<3>(register, hot, contested, accepted));
        scope.spawn(move || hammer::<4>(register, hot, contested, accepted));
        scope.spawn(move || hammer::<5>(register, hot, contested, accepted));
        scope.spawn(move || hammer::<6>(register, hot, contested, accepted));
        scope.spawn(move || hammer::<7>(register, hot, contested, accepted));

        for _ in 0..2 {
            let repository = &fx.repository;
            let coordinate = &hot_coordinate;
            scope.spawn(move || {
                for _ in 0..256 {
                    if let Some(list) = repository.find(coordinate) {
                        assert!(list.windows(2).all(|w| w[0].order() <= w[1].order()));
                    }
                }
            });
        }
    });

    let list = fx.repository.get(&hot_coordinate).unwrap();
    assert_eq!(list.len(), 8);
    assert!(list.windows(2).all(|w| w[0].order() <= w[1].order()));

    assert_eq!(accepted.load(Ordering::SeqCst), 1);
    // 8 workers x 16 private coordinates, plus `hot` and `contested`.
    assert_eq!(fx.repository.len(), 8 * 16 + 2);
}
