//! Property-Based Tests for the Smoke Client
//!
//! This module contains property-based tests using proptest to verify
//! invariants hold for random inputs across the protocol and framing
//! layers.
//!
//! # Test Strategies
//!
//! - **Message Serialization**: Round-trip validity - serializing and
//!   deserializing should preserve the original request structure
//! - **Framing**: A frame is only produced once a newline arrives, byte
//!   order is preserved across arbitrary chunking, and bytes after the
//!   newline stay buffered
//!
//! # Running the Tests
//!
//! ```bash
//! cargo test --lib rpc::proptests
//! ```

use bytes::{BufMut, BytesMut};
use proptest::prelude::*;

use crate::rpc::protocol::{RpcRequest, TxFilter, TxListParams};
use crate::rpc::transport::split_frame;

// Helper: Generate arbitrary tx_list parameters
fn arb_tx_list_params() -> impl Strategy<Value = TxListParams> {
    (
        prop::option::of(any::<u64>()),
        prop::option::of(any::<u64>()),
        prop::option::of(any::<u32>()),
        any::<u32>(),
        any::<u32>(),
    )
        .prop_map(|(asset_id, height, status, count, skip)| TxListParams {
            filter: TxFilter {
                asset_id,
                height,
                status,
            },
            count,
            skip,
        })
}

proptest! {
    /// Requests round-trip through serialization unchanged
    #[test]
    fn prop_request_serialization_roundtrip(
        id in 0u64..u64::MAX,
        params in arb_tx_list_params()
    ) {
        let original = RpcRequest::tx_list(id, params);
        let serialized = serde_json::to_string(&original).unwrap();
        let deserialized: RpcRequest<TxListParams> =
            serde_json::from_str(&serialized).unwrap();

        prop_assert_eq!(original, deserialized);
    }

    /// A serialized request never contains the frame terminator, so
    /// appending one `\n` always yields exactly one frame on the wire
    #[test]
    fn prop_serialized_request_is_frame_safe(
        id in 0u64..u64::MAX,
        params in arb_tx_list_params()
    ) {
        let request = RpcRequest::tx_list(id, params);
        let serialized = serde_json::to_string(&request).unwrap();

        prop_assert!(!serialized.contains('\n'));
    }

    /// No frame is produced until a newline has been accumulated, no
    /// matter how the payload is chunked
    #[test]
    fn prop_no_frame_without_newline(
        payload in prop::collection::vec(any::<u8>().prop_filter("no newline", |b| *b != b'\n'), 0..256),
        chunk_size in 1usize..32
    ) {
        let mut buf = BytesMut::new();
        for chunk in payload.chunks(chunk_size) {
            buf.put_slice(chunk);
            prop_assert!(split_frame(&mut buf).is_none());
        }
        prop_assert_eq!(&buf[..], &payload[..]);
    }

    /// Arbitrary chunking reconstructs the exact payload once the
    /// newline arrives, and trailing bytes stay buffered
    #[test]
    fn prop_chunked_accumulation_preserves_bytes(
        payload in prop::collection::vec(any::<u8>().prop_filter("no newline", |b| *b != b'\n'), 0..256),
        trailing in prop::collection::vec(any::<u8>(), 0..64),
        chunk_size in 1usize..32
    ) {
        let mut wire = payload.clone();
        wire.push(b'\n');
        wire.extend_from_slice(&trailing);

        let mut buf = BytesMut::new();
        let mut frame = None;
        for chunk in wire.chunks(chunk_size) {
            buf.put_slice(chunk);
            if frame.is_none() {
                frame = split_frame(&mut buf);
            }
        }

        let frame = frame.expect("newline was sent, a frame must appear");
        prop_assert_eq!(&frame[..], &payload[..]);
        prop_assert_eq!(&buf[..], &trailing[..]);
    }
}
