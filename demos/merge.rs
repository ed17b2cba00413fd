use loglogbeta::LogLogBeta;

fn main() {
    let mut sketch1 = LogLogBeta::<14>::new();
    for i in 0..10_000u32 {
        sketch1.insert(&i.to_le_bytes());
    }
    println!("sketch1 estimate = {}", sketch1.cardinality());

    let mut sketch2 = LogLogBeta::<14>::new();
    for i in 5_000..15_000u32 {
        sketch2.insert(&i.to_le_bytes());
    }
    println!("sketch2 estimate = {}", sketch2.cardinality());

    sketch1.merge(&sketch2);
    println!("merged estimate = {}", sketch1.cardinality());

    let bytes = sketch1.to_bytes().expect("encoding failed");
    let restored = LogLogBeta::<14>::from_bytes(&bytes).expect("decoding failed");
    println!(
        "restored estimate = {} ({} bytes)",
        restored.cardinality(),
        bytes.len()
    );
}
