//! Compares the time spent creating random data with the time spent sorting it,
//! for increasingly large inputs.

use bottleneck::{Accumulator, BucketId};

const CREATE: BucketId = BucketId::new(0);
const SORT: BucketId = BucketId::new(1);

fn main() {
    let mut len = 1000_usize;

    while len <= 10_000_000 {
        let mut accumulator = Accumulator::builder()
            .bucket_names(&["create", "sort"])
            .build();

        accumulator.advance(CREATE);

        let mut state = 0x2545_f491_4f6c_dd1d_u64;
        let mut values = Vec::with_capacity(len);
        for _ in 0..len {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            values.push(state);
        }

        accumulator.advance(SORT);

        values.sort_unstable();

        let snapshot = accumulator.snapshot();
        println!(
            "array len is {len}, creating takes {:?}, sorting takes {:?}",
            snapshot[CREATE].duration(),
            snapshot[SORT].duration()
        );

        len = len.saturating_mul(10);
    }
}
