#![no_main]

use std::collections::VecDeque;

use libfuzzer_sys::fuzz_target;
use segbuf::{MemPool, PoolConfig, SegmentedBuffer};

// Drives random operation sequences and checks the buffer against a plain
// byte queue. Each input byte pair is (opcode, argument).
fuzz_target!(|data: &[u8]| {
    let Some((&chunk_size, ops)) = data.split_first() else {
        return;
    };
    let chunk_size = usize::from(chunk_size % 32) + 1;
    let pool = MemPool::new(
        PoolConfig::new(chunk_size)
            .unwrap()
            .with_max_chunks(256),
    )
    .unwrap();

    {
        let mut buf = SegmentedBuffer::new(&pool);
        let mut model: VecDeque<u8> = VecDeque::new();
        // write_at breaks the FIFO model; once used only structural checks apply
        let mut indexed = false;

        for pair in ops.chunks_exact(2) {
            let (op, arg) = (pair[0], pair[1]);
            match op % 5 {
                0 => {
                    let src: Vec<u8> = (0..arg).collect();
                    match buf.write(&src) {
                        Ok(n) => {
                            assert_eq!(n, src.len());
                            model.extend(&src);
                        }
                        Err(e) => model.extend(&src[..e.transferred]),
                    }
                }
                1 => {
                    let mut dst = vec![0u8; usize::from(arg)];
                    match buf.read(&mut dst) {
                        Ok(n) => {
                            if !indexed {
                                let expected: Vec<u8> = model.drain(..n).collect();
                                assert_eq!(&dst[..n], &expected[..]);
                            }
                        }
                        Err(e) => {
                            assert!(e.is_end_of_stream());
                            assert_eq!(buf.chunk_count(), 0);
                            model.clear();
                        }
                    }
                }
                2 => {
                    if let Ok(peeked) = buf.peek_all() {
                        assert!(peeked.len() <= buf.data_len());
                        if !indexed {
                            assert!(peeked.iter().eq(model.iter()));
                        }
                    }
                }
                3 => {
                    let src = vec![arg; usize::from(arg) % (chunk_size + 2)];
                    let index = usize::from(arg % 8);
                    match buf.write_at(&src, index) {
                        Ok(n) => {
                            assert_eq!(n, src.len());
                            if n > 0 {
                                indexed = true;
                                assert_eq!(buf.peek_at(index).unwrap().as_ref(), &src[..]);
                            }
                        }
                        Err(e) => assert!(src.len() > chunk_size || e.transferred == 0),
                    }
                }
                _ => {
                    buf.reset();
                    model.clear();
                    indexed = false;
                    assert_eq!(buf.chunk_count(), 0);
                }
            }

            if !indexed {
                assert_eq!(buf.data_len(), model.len());
            }
        }
    }

    assert_eq!(pool.stats().outstanding, 0);
});
