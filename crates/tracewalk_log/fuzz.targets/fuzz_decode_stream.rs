#![no_main]
use libfuzzer_sys::fuzz_target;
use tracewalk_log::{EventLog, FrameEncoder};

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes either load or fail with an error, never panic
    let Ok(log) = EventLog::load(data) else {
        return;
    };

    // Whatever loaded must survive a re-encode
    let mut encoder = FrameEncoder::new(Vec::new());
    for event in &log {
        encoder.encode(event).expect("re-encode");
    }
    let reloaded = EventLog::load(encoder.into_inner().as_slice()).expect("reload");
    assert_eq!(log, reloaded);
});
