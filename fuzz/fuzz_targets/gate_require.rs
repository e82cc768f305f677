#![no_main]

// Harness: gate_require
// Focus: admission matches the normalized role list and every refusal redirects once.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mivet_gate::{
    access::{Denial, Gate},
    navigation::RecordingNavigator,
    storage::MemoryStorage,
    types::normalize_role,
};

#[derive(Arbitrary, Debug)]
struct Frame {
    role: String,
    allowed: Vec<String>,
    logged_in: bool,
}

fuzz_target!(|frame: Frame| {
    let storage = if frame.logged_in {
        let record = serde_json::json!({ "id": 1, "email": "f@clinica.mx", "roleName": frame.role });
        MemoryStorage::with_entry("veterinaryUser", &record.to_string())
    } else {
        MemoryStorage::new()
    };
    let gate = Gate::new(storage, RecordingNavigator::new());

    let role = normalize_role(&frame.role);
    let expected = frame.logged_in
        && (frame.allowed.is_empty()
            || (!role.is_empty() && frame.allowed.iter().any(|r| normalize_role(r) == role)));

    match gate.require_login(frame.allowed.as_slice()) {
        Ok(session) => {
            assert!(expected);
            assert_eq!(gate.navigator().redirect_count(), 0);
            assert_eq!(gate.current_user(), Some(session));
        }
        Err(denial) => {
            assert!(!expected);
            assert_eq!(gate.navigator().visits(), vec![denial.redirect()]);
            assert_eq!(denial == Denial::NoSession, !frame.logged_in);
            assert_eq!(gate.current_user(), None);
        }
    }
});
