use proptest::prelude::*;

use sprig_core::{ChildIndex, DerivationPath, PathTemplate};

const MAX_NORMAL: u32 = ChildIndex::HARDENED_OFFSET - 1;

fn child_index() -> impl Strategy<Value = ChildIndex> {
    prop_oneof![
        (0..=MAX_NORMAL).prop_map(ChildIndex::Normal),
        (0..=MAX_NORMAL).prop_map(ChildIndex::Hardened),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn rendered_paths_parse_back(indices in prop::collection::vec(child_index(), 0..8)) {
        let path = DerivationPath::new(indices);
        let parsed: DerivationPath = path.to_string().parse().unwrap();
        prop_assert_eq!(parsed, path);
    }

    #[test]
    fn bip44_template_puts_index_last(coin in 0..=MAX_NORMAL, index in 0..=MAX_NORMAL) {
        let template = PathTemplate::bip44(coin).unwrap();
        let path = template.path(index).unwrap();
        prop_assert_eq!(path.to_string(), format!("m/44'/{coin}'/0'/0/{index}"));
        prop_assert_eq!(path.last(), Some(ChildIndex::Normal(index)));
        prop_assert_eq!(template.coin_type(), Some(coin));
    }

    #[test]
    fn distinct_indices_give_distinct_paths(a in 0..=MAX_NORMAL, b in 0..=MAX_NORMAL) {
        prop_assume!(a != b);
        let template = PathTemplate::bip44(60).unwrap();
        prop_assert_ne!(template.path(a).unwrap(), template.path(b).unwrap());
    }

    #[test]
    fn out_of_range_indices_rejected(index in ChildIndex::HARDENED_OFFSET..=u32::MAX) {
        let template = PathTemplate::bip44(60).unwrap();
        prop_assert!(template.path(index).is_err());
    }
}
