use std::fs;

use bwlzw::{
    compress, compress_block, compress_file, compress_file_with, decompress, decompress_block,
    decompress_file, LzwbError, Options, Pipeline,
};

/// Deterministic xorshift bytes.
fn pseudo_random(len: usize, seed: u64) -> Vec<u8> {
    let mut state = seed.wrapping_mul(0x9e37_79b9_7f4a_7c15) | 1;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            (state >> 24) as u8
        })
        .collect()
}

#[test]
fn two_mib_random_file_test() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("random.bin");
    let packed = dir.path().join("random.bin.lzwb");
    let restored = dir.path().join("random.out");

    let data = pseudo_random(2 * 1024 * 1024, 42);
    fs::write(&src, &data).unwrap();

    let opts = Options::new().block_size(512 * 1024);
    let stats = compress_file_with(&src, &packed, &opts).unwrap();
    assert_eq!(stats.blocks, 4);
    assert_eq!(stats.bytes_in, data.len() as u64);

    decompress_file(&packed, &restored).unwrap();
    assert_eq!(fs::read(&restored).unwrap(), data);
}

#[test]
fn partial_last_block_file_test() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("text.txt");
    let packed = dir.path().join("text.lzwb");
    let restored = dir.path().join("text.out");

    let mut data = b"She sells sea shells by the sea shore. ".repeat(2000);
    data.extend_from_slice(&pseudo_random(3333, 9));
    fs::write(&src, &data).unwrap();

    let opts = Options::new()
        .block_size(16 * 1024)
        .code_size(14)
        .pipeline(Pipeline::Bwt);
    let stats = compress_file_with(&src, &packed, &opts).unwrap();
    assert_eq!(stats.blocks, (data.len() + 16 * 1024 - 1) / (16 * 1024));
    assert!(stats.bytes_out < stats.bytes_in);

    decompress_file(&packed, &restored).unwrap();
    assert_eq!(fs::read(&restored).unwrap(), data);
}

#[test]
fn header_bytes_test() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("a");
    let packed = dir.path().join("a.lzwb");
    fs::write(&src, b"aaaa").unwrap();

    compress_file(&src, &packed, 9).unwrap();
    let bytes = fs::read(&packed).unwrap();
    assert_eq!(&bytes[..5], b"LZWM\x09");
    // One record for four bytes: length 4, then the primary index and payload length
    assert_eq!(&bytes[5..9], &4_u32.to_le_bytes());
    let payload_len = u32::from_le_bytes(bytes[13..17].try_into().unwrap()) as usize;
    assert_eq!(bytes.len(), 17 + payload_len);
}

#[test]
fn empty_file_test() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("empty");
    let packed = dir.path().join("empty.lzwb");
    let restored = dir.path().join("empty.out");
    fs::write(&src, b"").unwrap();

    compress_file(&src, &packed, 12).unwrap();
    assert_eq!(fs::read(&packed).unwrap().len(), 5);
    decompress_file(&packed, &restored).unwrap();
    assert!(fs::read(&restored).unwrap().is_empty());
}

#[test]
fn corrupt_file_leaves_no_output_test() {
    let dir = tempfile::tempdir().unwrap();
    let packed = dir.path().join("bad.lzwb");
    let restored = dir.path().join("bad.out");
    fs::write(&packed, b"NOPE\x0c").unwrap();

    assert!(matches!(
        decompress_file(&packed, &restored),
        Err(LzwbError::Format(_))
    ));
    assert!(!restored.exists());
}

#[test]
fn missing_input_test() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing");
    assert!(matches!(
        compress_file(&missing, dir.path().join("x.lzwb"), 12),
        Err(LzwbError::Io(_))
    ));
}

#[test]
fn bad_code_size_creates_nothing_test() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("in");
    let out = dir.path().join("in.lzwb");
    fs::write(&src, b"data").unwrap();
    assert!(matches!(
        compress_file(&src, &out, 17),
        Err(LzwbError::Configuration(_))
    ));
    assert!(!out.exists());
}

#[test]
fn in_memory_round_trip_test() {
    let mut all_bytes: Vec<u8> = (0..=255).collect();
    all_bytes.extend((0..=255).rev());
    let inputs = [
        Vec::new(),
        vec![0x42],
        b"aaaa".to_vec(),
        vec![0x00, 0xff, 0x00, 0x00, 0xff],
        all_bytes,
        pseudo_random(100_000, 77),
    ];
    for pipeline in [Pipeline::Bwt, Pipeline::BwtMtf] {
        for code_size in 9..=16 {
            let opts = Options::new()
                .code_size(code_size)
                .block_size(30_000)
                .pipeline(pipeline);
            for data in &inputs {
                let packed = compress(data, &opts).unwrap();
                assert_eq!(&decompress(&packed).unwrap(), data);
            }
        }
    }
}

#[test]
fn public_block_api_test() {
    let data = b"binary \x00\xff\x00\xff safe".to_vec();
    let (payload, meta) = compress_block(&data, 11, Pipeline::BwtMtf).unwrap();
    assert_eq!(meta.original_length as usize, data.len());
    assert_eq!(decompress_block(&payload, &meta).unwrap(), data);
}

#[test]
fn corrupted_payload_is_detected_test() {
    let data = b"abcabcabcabcabcabcabcabcabcabc".repeat(10);
    let opts = Options::new().code_size(9).pipeline(Pipeline::Bwt);
    let mut packed = compress(&data, &opts).unwrap();
    // Inflate the declared block length: the payload can no longer produce that many bytes
    packed[5] = packed[5].wrapping_add(100);
    assert!(decompress(&packed).is_err());
}
