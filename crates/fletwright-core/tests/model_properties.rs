use fletwright_core::{ElementStore, ElementType, StyleKey, StyleMap, StyleValue};
use proptest::prelude::*;

fn style_value() -> impl Strategy<Value = StyleValue> {
    prop_oneof![
        any::<bool>().prop_map(StyleValue::Bool),
        (-1000.0f64..1000.0).prop_map(StyleValue::Number),
        "[a-z#0-9]{0,8}".prop_map(StyleValue::String),
    ]
}

fn style_map() -> impl Strategy<Value = StyleMap> {
    let key = prop_oneof![
        Just("color"),
        Just("backgroundColor"),
        Just("fontSize"),
        Just("fontWeight"),
        Just("borderRadius"),
        Just("shadow"),
        Just("opacity"),
    ];
    proptest::collection::vec((key, style_value()), 0..6).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(k, v)| (StyleKey::from_name(k), v))
            .collect()
    })
}

proptest! {
    #[test]
    fn merging_twice_equals_merging_once(base in style_map(), update in style_map()) {
        let mut once = base.clone();
        once.merge(&update);
        let mut twice = once.clone();
        twice.merge(&update);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn merge_keeps_untouched_keys(base in style_map(), update in style_map()) {
        let mut merged = base.clone();
        merged.merge(&update);
        for (key, value) in base.iter() {
            if update.get(key).is_none() {
                prop_assert_eq!(merged.get(key), Some(value));
            }
        }
        for (key, value) in update.iter() {
            prop_assert_eq!(merged.get(key), Some(value));
        }
    }

    #[test]
    fn store_updates_are_idempotent(update in style_map()) {
        let mut store = ElementStore::new();
        let id = store.create(ElementType::Button);
        store.update_styles(&id, update.clone()).unwrap();
        let once = store.find(&id).unwrap().clone();
        store.update_styles(&id, update).unwrap();
        prop_assert_eq!(store.find(&id).unwrap(), &once);
    }

    #[test]
    fn created_ids_are_unique(kinds in proptest::collection::vec(0usize..11, 0..40)) {
        let mut store = ElementStore::new();
        let mut ids = std::collections::HashSet::new();
        for k in kinds {
            let id = store.create(ElementType::KNOWN[k]);
            prop_assert!(ids.insert(id));
        }
    }
}
