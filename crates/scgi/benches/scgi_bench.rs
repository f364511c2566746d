use std::hint::black_box;
use std::io::Cursor;

use bytes::BytesMut;
use criterion::{Criterion, criterion_group, criterion_main};
use micro_scgi::codec::HeaderDecoder;
use micro_scgi::connection::Request;
use tokio_util::codec::Decoder;
use tokio_util::sync::CancellationToken;

const SIMPLE_FRAME: &[u8] = b"70:CONTENT_LENGTH\x0027\0SCGI\x001\0REQUEST_METHOD\0POST\0REQUEST_URI\0/deepthought\0,";

fn bench_header_decoder(c: &mut Criterion) {
    c.bench_function("decode_simple_frame", |b| {
        b.iter(|| {
            let mut decoder = HeaderDecoder::new();
            let mut bytes = BytesMut::from(SIMPLE_FRAME);
            black_box(decoder.decode(&mut bytes).unwrap());
        });
    });
}

fn bench_request(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let cancel = CancellationToken::new();

    c.bench_function("read_simple_request", |b| {
        b.to_async(&runtime).iter(|| async {
            let mut request = Request::new();
            request.set_source(Cursor::new(SIMPLE_FRAME.to_vec()));
            black_box(request.read_headers(&cancel).await.unwrap().len());
        });
    });
}

criterion_group!(benches, bench_header_decoder, bench_request);
criterion_main!(benches);
