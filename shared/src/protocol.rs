//! Wire protocol for the control channel.
//!
//! Every structured message is framed by a fixed-width ASCII length
//! header: 64 bytes, left-justified, space-padded, holding the decimal
//! byte count of the payload that immediately follows. Receivers read
//! exactly the header width, parse it, then read exactly that many more
//! bytes.
//!
//! Three payload codecs ride on top of the framing:
//! - handshake messages are bincode, so the full paddle object graph
//!   (including derived geometry) round-trips;
//! - per-tick state broadcasts are plain JSON arrays;
//! - per-tick input is a single unframed ASCII byte.

use crate::ball::Ball;
use crate::paddle::Paddle;
use crate::Direction;
use serde::{Deserialize, Serialize};
use std::io;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Width of the frame length header in bytes.
pub const HEADER_LEN: usize = 64;

/// First message of the handshake, sent once per peer: the match
/// parameters, the ball, and that peer's own paddle with its derived
/// geometry. A second frame follows carrying every other peer's paddle
/// in roster order excluding the recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Handshake {
    pub resolution: (u32, u32),
    pub tick_rate: u32,
    pub ball: Ball,
    pub paddle: Paddle,
}

/// Per-tick state broadcast, serialized as the JSON array
/// `[ball_position, own_coordinate, [other_coordinates]]` with the
/// other coordinates in roster order excluding the recipient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateFrame(pub (f32, f32), pub f32, pub Vec<f32>);

impl StateFrame {
    pub fn ball_position(&self) -> (f32, f32) {
        self.0
    }

    pub fn own_coordinate(&self) -> f32 {
        self.1
    }

    pub fn other_coordinates(&self) -> &[f32] {
        &self.2
    }
}

/// Renders the length header: decimal digits, left-justified, padded
/// with spaces to the full header width.
pub fn encode_header(payload_len: usize) -> [u8; HEADER_LEN] {
    let mut header = [b' '; HEADER_LEN];
    let digits = payload_len.to_string();
    header[..digits.len()].copy_from_slice(digits.as_bytes());
    header
}

/// Writes one framed message: header, then payload.
pub async fn write_frame<W>(writer: &mut W, payload: &[u8]) -> io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(&encode_header(payload.len())).await?;
    writer.write_all(payload).await?;
    Ok(())
}

/// Reads one framed message. A header that is not UTF-8 or does not
/// parse as a decimal length is `InvalidData`; a peer closing mid-frame
/// surfaces as `UnexpectedEof`. Both are fatal to that connection.
pub async fn read_frame<R>(reader: &mut R) -> io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut header = [0u8; HEADER_LEN];
    reader.read_exact(&mut header).await?;

    let text = std::str::from_utf8(&header)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    let payload_len: usize = text.trim_end().parse().map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("malformed frame header: {}", e),
        )
    })?;

    let mut payload = vec![0u8; payload_len];
    reader.read_exact(&mut payload).await?;
    Ok(payload)
}

/// Encodes a directional input as its wire byte: `'0'` toward the track
/// start, `'1'` hold, `'2'` toward the track end.
pub fn encode_direction(direction: Direction) -> u8 {
    (direction.clamp(-1, 1) + 1) as u8 + b'0'
}

/// Decodes an input byte, clamping anything out of range to a valid
/// direction. The clamp is the protocol's only input validation.
pub fn decode_direction(byte: u8) -> Direction {
    (byte as i32 - b'1' as i32).clamp(-1, 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Vec2;
    use tokio_test::block_on;

    fn sample_paddle() -> Paddle {
        Paddle::new(
            (Vec2::new(40.0, 0.0), Vec2::new(40.0, 400.0)),
            0.1,
            1.0,
            Vec2::new(200.0, 200.0),
        )
    }

    #[test]
    fn test_header_format() {
        let header = encode_header(13);
        assert_eq!(header.len(), HEADER_LEN);
        assert_eq!(&header[..2], b"13");
        assert!(header[2..].iter().all(|&b| b == b' '));
    }

    #[test]
    fn test_frame_roundtrip() {
        block_on(async {
            let (mut tx, mut rx) = tokio::io::duplex(1024);

            write_frame(&mut tx, b"hello world").await.unwrap();
            let payload = read_frame(&mut rx).await.unwrap();

            assert_eq!(payload, b"hello world");
        });
    }

    #[test]
    fn test_empty_frame_roundtrip() {
        block_on(async {
            let (mut tx, mut rx) = tokio::io::duplex(1024);

            write_frame(&mut tx, b"").await.unwrap();
            let payload = read_frame(&mut rx).await.unwrap();

            assert!(payload.is_empty());
        });
    }

    #[test]
    fn test_malformed_header_is_invalid_data() {
        block_on(async {
            let (mut tx, mut rx) = tokio::io::duplex(1024);

            let mut header = [b' '; HEADER_LEN];
            header[..4].copy_from_slice(b"abcd");
            tokio::io::AsyncWriteExt::write_all(&mut tx, &header)
                .await
                .unwrap();

            let err = read_frame(&mut rx).await.unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidData);
        });
    }

    #[test]
    fn test_peer_closing_mid_frame_is_unexpected_eof() {
        block_on(async {
            let (mut tx, mut rx) = tokio::io::duplex(1024);

            // Header promises ten bytes, connection drops after four.
            tokio::io::AsyncWriteExt::write_all(&mut tx, &encode_header(10))
                .await
                .unwrap();
            tokio::io::AsyncWriteExt::write_all(&mut tx, b"shor")
                .await
                .unwrap();
            drop(tx);

            let err = read_frame(&mut rx).await.unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
        });
    }

    #[test]
    fn test_handshake_roundtrips_full_paddle_geometry() {
        let handshake = Handshake {
            resolution: (400, 400),
            tick_rate: 60,
            ball: Ball::new(Vec2::new(200.0, 200.0), Vec2::new(-36.0, 108.0), 3.0),
            paddle: sample_paddle(),
        };

        let bytes = bincode::serialize(&handshake).unwrap();
        let decoded: Handshake = bincode::deserialize(&bytes).unwrap();

        assert_eq!(decoded, handshake);
        // The derived geometry must survive, not just the raw fields.
        assert_eq!(decoded.paddle.paddle_points(), handshake.paddle.paddle_points());
        assert_eq!(decoded.paddle.normal(), handshake.paddle.normal());
    }

    #[test]
    fn test_state_frame_json_shape() {
        let frame = StateFrame((200.0, 200.0), 0.5, vec![0.25]);
        let json = serde_json::to_string(&frame).unwrap();

        assert_eq!(json, "[[200.0,200.0],0.5,[0.25]]");

        let decoded: StateFrame = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, frame);
        assert_eq!(decoded.ball_position(), (200.0, 200.0));
        assert_eq!(decoded.own_coordinate(), 0.5);
        assert_eq!(decoded.other_coordinates(), &[0.25]);
    }

    #[test]
    fn test_direction_codec() {
        assert_eq!(decode_direction(b'0'), -1);
        assert_eq!(decode_direction(b'1'), 0);
        assert_eq!(decode_direction(b'2'), 1);

        assert_eq!(encode_direction(-1), b'0');
        assert_eq!(encode_direction(0), b'1');
        assert_eq!(encode_direction(1), b'2');

        for direction in [-1, 0, 1] {
            assert_eq!(decode_direction(encode_direction(direction)), direction);
        }
    }

    #[test]
    fn test_direction_decode_clamps_garbage() {
        assert_eq!(decode_direction(b'9'), 1);
        assert_eq!(decode_direction(b'\n'), -1);
        assert_eq!(decode_direction(0xff), 1);
    }
}
