use std::hint::black_box;

use bytes::{Bytes, BytesMut};
use criterion::{criterion_group, criterion_main, Criterion};
use http::StatusCode;
use http1_wire::codec::{RequestDecoder, ResponseEncoder};
use http1_wire::protocol::{Frame, MessageHead, PayloadSize, ResponseHead, Version};
use tokio_util::codec::{Decoder, Encoder};

fn bench_request_decoder(c: &mut Criterion) {
    let request = b"GET / HTTP/1.1\r\nHost: localhost\r\n\r\n";

    c.bench_function("decode_simple_request", |b| {
        b.iter(|| {
            let mut decoder = RequestDecoder::new();
            let mut bytes = BytesMut::from(&request[..]);
            while let Some(frame) = decoder.decode(&mut bytes).unwrap() {
                black_box(frame);
            }
        });
    });
}

fn bench_chunked_decoder(c: &mut Criterion) {
    let request = b"POST /upload HTTP/1.1\r\nHost: localhost\r\n\
                    Transfer-Encoding: chunked\r\n\r\n\
                    4\r\nWiki\r\n5\r\npedia\r\n0\r\n\r\n";

    c.bench_function("decode_chunked_request", |b| {
        b.iter(|| {
            let mut decoder = RequestDecoder::new();
            let mut bytes = BytesMut::from(&request[..]);
            while let Some(frame) = decoder.decode(&mut bytes).unwrap() {
                black_box(frame);
            }
        });
    });
}

fn bench_response_encoder(c: &mut Criterion) {
    let mut response: ResponseHead = MessageHead::new(Version::HTTP_11, StatusCode::OK);
    response.set_content("Hello World!");

    c.bench_function("encode_simple_response", |b| {
        b.iter(|| {
            let mut encoder = ResponseEncoder::new();
            let mut bytes = BytesMut::new();
            let head = response.clone();
            let framing = PayloadSize::for_head(&head);
            encoder.encode(Frame::<_, Bytes>::Head((head, framing)), &mut bytes).unwrap();
            black_box(bytes);
        });
    });
}

criterion_group!(benches, bench_request_decoder, bench_chunked_decoder, bench_response_encoder);
criterion_main!(benches);
