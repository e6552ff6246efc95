#![no_main]
use libfuzzer_sys::fuzz_target;
use tracewalk_log::{EventKind, TraceEvent, decode_stream, encode};

fuzz_target!(|data: &[u8]| {
    // Build events from raw bytes: one kind byte, one line byte, then a path
    let events: Vec<TraceEvent> = data
        .chunks(8)
        .filter(|chunk| chunk.len() > 2)
        .map(|chunk| {
            let kind = EventKind::ALL[usize::from(chunk[0]) % EventKind::ALL.len()];
            let line = u32::from(chunk[1]) + 1;
            let path = String::from_utf8_lossy(&chunk[2..]).into_owned();
            TraceEvent::new(path, line, kind)
        })
        .collect();

    let mut bytes = Vec::new();
    for event in &events {
        bytes.extend(encode(event).expect("encode"));
    }
    assert_eq!(decode_stream(bytes.as_slice()).expect("decode"), events);
});
