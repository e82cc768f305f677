#![no_main]

// Harness: session_decode
// Focus: arbitrary stored text never panics and never yields a session without an id.

use libfuzzer_sys::fuzz_target;
use mivet_gate::{
    access::Gate,
    navigation::RecordingNavigator,
    storage::MemoryStorage,
    Session,
};

fuzz_target!(|data: &[u8]| {
    let Ok(raw) = std::str::from_utf8(data) else {
        return;
    };

    let decoded = Session::from_json(raw);
    let gate = Gate::new(MemoryStorage::with_entry("veterinaryUser", raw), RecordingNavigator::new());
    assert_eq!(gate.current_user(), decoded.as_ref().ok().cloned());

    if let Ok(session) = decoded {
        // Whatever was read must survive a write and a re-read.
        let again = Session::from_json(&session.to_json().unwrap()).unwrap();
        assert_eq!(again, session);
    }
});
