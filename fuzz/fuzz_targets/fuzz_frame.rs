#![no_main]

use bytes::BytesMut;
use libfuzzer_sys::fuzz_target;
use rcon_protocol::core::codec::FrameCodec;
use rcon_protocol::Packet;
use tokio_util::codec::Decoder;

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary stream bytes through the frame decoder until it stalls or errors
    let mut codec = FrameCodec;
    let mut buf = BytesMut::from(data);
    while let Ok(Some(body)) = codec.decode(&mut buf) {
        let _ = Packet::decode(&body);
    }
    let _ = codec.decode_eof(&mut buf);
});
