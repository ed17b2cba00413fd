#![no_main]

use libfuzzer_sys::fuzz_target;
use loglogbeta::LogLogBeta;
use wyhash::wyhash;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let split_index = wyhash(data, 0) as usize % data.len();
    let (first_half, second_half) = data.split_at(split_index);

    let mut sketch1 = LogLogBeta::<14>::new();
    for chunk in first_half.chunks(4) {
        let before = sketch1.registers().to_vec();
        sketch1.insert(chunk);
        assert!(before.iter().zip(sketch1.registers()).all(|(b, a)| b <= a));
        assert!(!sketch1.is_empty());
    }

    let mut sketch2 = LogLogBeta::<14>::new();
    for chunk in second_half.chunks(4) {
        sketch2.insert(chunk);
    }

    let mut union1 = sketch1.clone();
    union1.merge(&sketch2);
    let mut union2 = sketch2.clone();
    union2.merge(&sketch1);
    assert_eq!(union1, union2);

    let bytes = union1.to_bytes().unwrap();
    assert_eq!(LogLogBeta::<14>::from_bytes(&bytes).unwrap(), union1);
});
