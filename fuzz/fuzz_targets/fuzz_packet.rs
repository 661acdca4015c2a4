#![no_main]

use libfuzzer_sys::fuzz_target;
use rcon_protocol::Packet;

fuzz_target!(|data: &[u8]| {
    // Fuzz packet body decoding - test for panics, crashes, infinite loops
    let _ = Packet::decode(data);
});
