use proptest::prelude::*;
use mivet_gate::rights::{self, caps};
use mivet_gate::types::Role;

fn any_role() -> impl Strategy<Value = Option<Role>> {
    prop_oneof![
        Just(None),
        Just(Some(Role::Administrator)),
        Just(Some(Role::Veterinarian)),
        Just(Some(Role::Receptionist)),
    ]
}

proptest! {
    /// For any mask, canonicalise(mask) should be a superset of mask (bitwise).
    #[test]
    fn prop_canonicalise_superset(mask in any::<u32>()) {
        let canon = rights::canonicalise(mask);
        prop_assert_eq!(mask & canon, mask);
    }

    /// EDIT_ACCOUNTS implies VIEW_ACCOUNTS after canonicalisation.
    #[test]
    fn prop_edit_implies_view(mask in any::<u32>()) {
        let canon = rights::canonicalise(mask | caps::EDIT_ACCOUNTS);
        prop_assert!((canon & caps::VIEW_ACCOUNTS) != 0);
    }

    /// Sufficient should be equivalent when `have` is first canonicalised.
    #[test]
    fn prop_sufficient_equivalence(have in any::<u32>(), need in any::<u32>()) {
        let s1 = rights::sufficient(have, need);
        let s2 = rights::sufficient(rights::canonicalise(have), need);
        prop_assert_eq!(s1, s2);
    }

    /// Role grants are already canonical and stay within the defined bits.
    #[test]
    fn prop_granted_is_canonical(role in any_role()) {
        let mask = rights::granted(role);
        prop_assert_eq!(rights::canonicalise(mask), mask);
        prop_assert_eq!(mask & !caps::ALL, 0);
    }

    /// Asking for less never fails where asking for more succeeds.
    #[test]
    fn prop_sufficient_is_monotone(role in any_role(), need in 0u32..=caps::ALL, drop in 0u32..=caps::ALL) {
        let have = rights::granted(role);
        if rights::sufficient(have, need) {
            prop_assert!(rights::sufficient(have, need & !drop));
        }
    }
}
