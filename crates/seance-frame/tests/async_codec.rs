#![cfg(feature = "async")]

use futures_util::{SinkExt, StreamExt};
use seance_frame::{Frame, FrameCodec, FrameConfig, FrameError, BINARY, CLOSE, TEXT};
use tokio::io::AsyncWriteExt;
use tokio_util::codec::{FramedRead, FramedWrite};

#[tokio::test]
async fn framed_roundtrip_over_duplex() {
    // A small pipe forces every frame across many partial reads.
    let (client, server) = tokio::io::duplex(64);
    let mut sink = FramedWrite::new(client, FrameCodec::new());
    let mut stream = FramedRead::new(server, FrameCodec::new());

    let frames = vec![
        Frame::new(TEXT, 1, "hello"),
        Frame::new(BINARY, 2, vec![0xEE; 70_000]).with_mask(0x1357_9BDF),
        Frame::new(CLOSE, 0x8000_0003, "").with_response_to(2),
    ];

    let sender = {
        let frames = frames.clone();
        tokio::spawn(async move {
            for frame in frames {
                sink.send(frame).await.unwrap();
            }
        })
    };

    for expected in &frames {
        let frame = stream.next().await.unwrap().unwrap();
        assert_eq!(&frame, expected);
    }
    sender.await.unwrap();
    assert!(stream.next().await.is_none());
}

#[tokio::test]
async fn framed_read_surfaces_crc_mismatch() {
    let (mut client, server) = tokio::io::duplex(1024);
    let mut stream = FramedRead::new(server, FrameCodec::new());

    let mut wire = Frame::new(TEXT, 9, "tampered").to_bytes().to_vec();
    let last = wire.len() - 1;
    wire[last] ^= 0x01;
    client.write_all(&wire).await.unwrap();
    drop(client);

    let err = stream.next().await.unwrap().unwrap_err();
    assert!(matches!(err, FrameError::CrcMismatch { .. }));
}

#[tokio::test]
async fn framed_read_reports_truncated_frame() {
    let (mut client, server) = tokio::io::duplex(1024);
    let mut stream = FramedRead::new(server, FrameCodec::new());

    let wire = Frame::new(TEXT, 4, "cut short").to_bytes();
    client.write_all(&wire[..wire.len() - 3]).await.unwrap();
    drop(client);

    let err = stream.next().await.unwrap().unwrap_err();
    assert!(matches!(err, FrameError::ConnectionClosed));
}

#[tokio::test]
async fn framed_write_enforces_payload_limit() {
    let (client, _server) = tokio::io::duplex(64);
    let codec = FrameCodec::with_config(FrameConfig {
        max_payload_size: 8,
    });
    let mut sink = FramedWrite::new(client, codec);

    let err = sink
        .send(Frame::new(BINARY, 1, "more than eight"))
        .await
        .unwrap_err();
    assert!(matches!(err, FrameError::PayloadTooLarge { size: 15, max: 8 }));
}
