use std::hint::black_box;

use bencher::Fixture;
use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput};
use http1_wire::codec::RequestDecoder;
use tokio_util::bytes::BytesMut;
use tokio_util::codec::Decoder;

static GET_SMALL: Fixture = Fixture::new("get_small", include_str!("../resources/request/get_small.txt"));
static GET_LARGE: Fixture = Fixture::new("get_large", include_str!("../resources/request/get_large.txt"));
static POST_CHUNKED: Fixture = Fixture::new("post_chunked", include_str!("../resources/request/post_chunked.txt"));

fn benchmark_request_decoder(criterion: &mut Criterion) {
    let fixtures = [GET_SMALL, GET_LARGE, POST_CHUNKED];
    let mut group = criterion.benchmark_group("request_decoder");

    for fixture in fixtures {
        group.throughput(Throughput::Bytes(fixture.wire_len()));
        group.bench_with_input(BenchmarkId::from_parameter(fixture.name()), &fixture, |b, fixture| {
            let mut decoder = RequestDecoder::new();
            b.iter_batched_ref(
                || BytesMut::from(fixture.content()),
                |bytes| {
                    while let Some(frame) = decoder.decode(bytes).expect("sample should be a valid request") {
                        black_box(frame);
                    }
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(decoder, benchmark_request_decoder);
criterion_main!(decoder);
