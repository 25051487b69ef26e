use std::{
    net::{SocketAddr, UdpSocket},
    str::FromStr,
};

use palette::{LinSrgb, Srgb};
use rosc::{encoder, OscMessage, OscPacket, OscType};

use crate::animator::ChainCanvas;

/// One DMX universe holds 512 channels, 3 per pixel.
const UNIVERSE_SIZE: usize = 512;
const MAX_PIXELS: usize = UNIVERSE_SIZE / 3;

/// Pushes frames to an OLA daemon as a DMX blob over OSC. This is the
/// hardware end of the canvas hand-off; a failed send is logged and
/// dropped, the next frame overwrites it anyway.
pub struct OlaOutput {
    sock: UdpSocket,
    target_addr: SocketAddr,
    buffer: Vec<u8>,
}

impl OlaOutput {
    pub fn new(target_addr: SocketAddr) -> Result<Self, String> {
        let our_addr = SocketAddr::from_str("0.0.0.0:0").unwrap();
        let sock = match UdpSocket::bind(our_addr) {
            Ok(sock) => sock,
            Err(error) => return Err(error.to_string()),
        };

        Ok(OlaOutput {
            sock,
            target_addr,
            buffer: vec![0; UNIVERSE_SIZE],
        })
    }

    fn set(&mut self, channel: usize, value: u8) {
        self.buffer[channel] = value;
    }

    fn set_rgb(&mut self, start_channel: usize, values: [u8; 3]) {
        for i in 0..3 {
            self.set(start_channel + i, values[i]);
        }
    }

    fn flush(&mut self) {
        let msg_buf = encoder::encode(&OscPacket::Message(OscMessage {
            addr: "/dmx/universe/0".to_string(),
            args: vec![OscType::Blob(Vec::clone(&self.buffer))],
        }))
        .unwrap();

        if let Err(error) = self.sock.send_to(&msg_buf, self.target_addr) {
            log::warn!("failed to push frame to OLA: {}", error);
        }
    }
}

impl ChainCanvas for OlaOutput {
    fn refresh(&mut self, frame: &[LinSrgb]) {
        for (i, value) in frame.iter().take(MAX_PIXELS).enumerate() {
            let encoded: Srgb<u8> = Srgb::from_linear(*value);
            self.set_rgb(i * 3, [encoded.red, encoded.green, encoded.blue]);
        }
        self.flush();
    }

    fn blackout(&mut self) {
        self.buffer.fill(0);
        self.flush();
    }
}
