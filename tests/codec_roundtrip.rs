use minutiae::lowlevel::{encoded_len, HEADER_LEN, RECORD_LEN};
use minutiae::{
    decode, encode, DecodeWarning, EncodeConfig, Grade, ImageDims, Minutia, MinutiaKind,
    MinutiaeError, Quality, Registry,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn random_minutia(rng: &mut StdRng, dims: ImageDims) -> Minutia {
    let kind = match rng.random_range(0..3) {
        0 => MinutiaKind::Other,
        1 => MinutiaKind::RidgeEnding,
        _ => MinutiaKind::Bifurcation,
    };
    let quality = if rng.random_bool(0.5) {
        Quality::Grade(Grade::ALL[rng.random_range(0..Grade::ALL.len())])
    } else {
        Quality::from_raw(rng.random_range(0..=100)).unwrap()
    };
    Minutia::new(
        kind,
        rng.random_range(0..dims.width()) as u16,
        rng.random_range(0..dims.height()) as u16,
        rng.random_range(0..360),
        quality,
    )
}

fn circular_diff(a: u16, b: u16) -> u16 {
    let d = a.abs_diff(b);
    d.min(360 - d)
}

fn registry_of(count: usize, dims: ImageDims) -> Registry {
    let mut registry = Registry::with_image(dims);
    for i in 0..count {
        let x = (i as u32 % dims.width()) as u16;
        registry
            .add(Minutia::new(
                MinutiaKind::RidgeEnding,
                x,
                0,
                0,
                Quality::default(),
            ))
            .unwrap();
    }
    registry
}

#[test]
fn single_ridge_ending_encodes_expected_record() {
    let dims = ImageDims::new(200, 300).unwrap();
    let mut registry = Registry::with_image(dims);
    registry
        .add(Minutia::new(
            MinutiaKind::RidgeEnding,
            100,
            150,
            90,
            Quality::Grade(Grade::NotSet),
        ))
        .unwrap();

    let bytes = encode(registry.minutiae(), dims, &EncodeConfig::default()).unwrap();
    assert_eq!(bytes.len(), 36);
    assert_eq!(bytes[27], 1);
    assert_eq!(&bytes[28..34], &[0x40, 0x64, 0x00, 0x96, 0x40, 0x00]);
}

#[test]
fn encode_count_limit_is_255() {
    let dims = ImageDims::new(500, 500).unwrap();

    let ok = registry_of(255, dims);
    let bytes = encode(ok.minutiae(), dims, &EncodeConfig::default()).unwrap();
    assert_eq!(bytes.len(), encoded_len(255));
    assert_eq!(bytes[27], 255);

    let too_many = registry_of(256, dims);
    let err = encode(too_many.minutiae(), dims, &EncodeConfig::default()).unwrap_err();
    assert_eq!(err, MinutiaeError::TooManyMinutiae { count: 256, max: 255 });
}

#[test]
fn decode_rejects_truncated_buffers() {
    let dims = ImageDims::new(100, 100).unwrap();
    let registry = registry_of(3, dims);
    let bytes = encode(registry.minutiae(), dims, &EncodeConfig::default()).unwrap();

    let short_header = decode(&bytes[..HEADER_LEN - 1]).unwrap_err();
    assert!(matches!(short_header, MinutiaeError::MalformedTemplate { .. }));

    let cut = HEADER_LEN + 3 * RECORD_LEN - 1;
    let short_records = decode(&bytes[..cut]).unwrap_err();
    assert!(matches!(short_records, MinutiaeError::MalformedTemplate { .. }));

    // The extension block length may be missing.
    let without_trailer = decode(&bytes[..HEADER_LEN + 3 * RECORD_LEN]).unwrap();
    assert_eq!(without_trailer.minutiae.len(), 3);
}

#[test]
fn decode_flags_reserved_kind_code() {
    let dims = ImageDims::new(100, 100).unwrap();
    let registry = registry_of(2, dims);
    let mut bytes = encode(registry.minutiae(), dims, &EncodeConfig::default()).unwrap();
    bytes[HEADER_LEN + RECORD_LEN] |= 0xC0;

    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded.minutiae[0].kind, MinutiaKind::RidgeEnding);
    assert_eq!(decoded.minutiae[1].kind, MinutiaKind::Bifurcation);
    assert_eq!(
        decoded.warnings,
        vec![DecodeWarning::ReservedKindCode { record: 1 }]
    );
}

#[test]
fn random_registries_survive_round_trip() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..50 {
        let dims = ImageDims::new(rng.random_range(1..=2000), rng.random_range(1..=2000)).unwrap();
        let count = rng.random_range(0..=255);
        let mut registry = Registry::with_image(dims);
        for _ in 0..count {
            registry.add(random_minutia(&mut rng, dims)).unwrap();
        }

        let bytes = encode(registry.minutiae(), dims, &EncodeConfig::default()).unwrap();
        assert_eq!(bytes.len(), encoded_len(count));
        let decoded = decode(&bytes).unwrap();
        assert!(decoded.warnings.is_empty());
        assert_eq!(decoded.header.image_dims(), Some(dims));
        assert_eq!(decoded.minutiae.len(), registry.len());

        for (original, restored) in registry.minutiae().zip(decoded.minutiae.iter()) {
            assert_eq!(original.kind, restored.kind);
            assert_eq!((original.x, original.y), (restored.x, restored.y));
            assert_eq!(original.quality, restored.quality);
            assert!(circular_diff(original.angle, restored.angle) <= 1);
        }

        let mut reloaded = Registry::with_image(dims);
        reloaded.load(decoded.minutiae).unwrap();
        assert_eq!(reloaded.len(), count);
    }
}

#[test]
fn encode_uses_configured_header_values() {
    let dims = ImageDims::new(10, 10).unwrap();
    let cfg = EncodeConfig {
        x_resolution: 394,
        y_resolution: 300,
        view_count: 2,
        finger_quality: 55,
    };
    let bytes = encode(std::iter::empty::<&Minutia>(), dims, &cfg).unwrap();
    let header = decode(&bytes).unwrap().header;
    assert_eq!(header.x_resolution, 394);
    assert_eq!(header.y_resolution, 300);
    assert_eq!(header.view_count, 2);
    assert_eq!(header.finger_quality, 55);
    assert_eq!(header.minutiae_count, 0);
}

#[test]
fn decode_flags_quality_above_one_hundred() {
    let dims = ImageDims::new(200, 300).unwrap();
    let registry = registry_of(1, dims);
    let mut bytes = encode(registry.minutiae(), dims, &EncodeConfig::default()).unwrap();
    bytes[HEADER_LEN + RECORD_LEN - 1] = 200;

    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded.minutiae[0].quality, Quality::Raw(100));
    assert_eq!(
        decoded.warnings,
        vec![DecodeWarning::QualityOutOfRange {
            record: 0,
            value: 200,
        }]
    );
}

#[test]
fn encode_rejects_minutiae_outside_header_dims() {
    let registry = registry_of(1, ImageDims::new(500, 500).unwrap());
    let mut far = Registry::new();
    far.add(Minutia::new(MinutiaKind::Bifurcation, 500, 900, 0, Quality::default()))
        .unwrap();
    let small = ImageDims::new(10, 10).unwrap();

    assert!(encode(registry.minutiae(), small, &EncodeConfig::default()).is_ok());
    let err = encode(far.minutiae(), small, &EncodeConfig::default()).unwrap_err();
    assert_eq!(
        err,
        MinutiaeError::OutOfBounds {
            x: 500,
            y: 900,
            width: 10,
            height: 10,
        }
    );
}
