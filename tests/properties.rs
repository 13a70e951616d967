use bvatar::{
    Bvatar, Digest, Discipline, RasterStyle, Termination, WalkConfig, derive_hue_sat, walk,
};

fn configs() -> Vec<WalkConfig> {
    let mut out = Vec::new();
    for bits in 1..=5 {
        for mirror in [false, true] {
            for king in [false, true] {
                for discipline in [Discipline::Cyclic, Discipline::Finite] {
                    out.push(WalkConfig {
                        bits,
                        mirror,
                        king,
                        discipline,
                    });
                }
            }
        }
    }
    out
}

fn digests() -> Vec<Digest> {
    (0..16)
        .map(|i| Digest::of(format!("property {i}").as_bytes()))
        .chain([
            Digest::from_bytes(vec![0u8; 20]).unwrap(),
            Digest::from_bytes(vec![0xFF; 20]).unwrap(),
        ])
        .collect()
}

#[test_log::test]
fn test_conservation_and_bounds() {
    for config in configs() {
        for digest in digests() {
            let atrium = walk(digest.as_bytes(), &config).unwrap();
            let cells = config.cell_count();
            assert_eq!(atrium.len(), cells);
            assert_eq!(atrium.total(), atrium.moves() as u64 + 1);
            assert!(atrium.moves() <= 2 * cells);
            assert!(atrium.max_count() >= 1);
            assert!(atrium.start() < cells);
            match atrium.termination() {
                Termination::Completed => assert_eq!(atrium.moves(), 2 * cells),
                Termination::Exhausted => {
                    assert_eq!(config.discipline, Discipline::Finite);
                    assert!(atrium.moves() < 2 * cells);
                }
            }
        }
    }
}

#[test]
fn test_deterministic_across_runs() {
    for config in configs() {
        for digest in digests() {
            assert_eq!(
                walk(digest.as_bytes(), &config).unwrap(),
                walk(digest.as_bytes(), &config).unwrap()
            );
        }
    }
}

#[test]
fn test_saturated_corners() {
    let config = WalkConfig {
        king: false,
        ..WalkConfig::default()
    };
    let zeros = walk(&[0u8; 20], &config).unwrap();
    assert_eq!(zeros.counts()[0], 129);
    assert_eq!(zeros.total(), 129);

    let ones = walk(&[0xFF; 20], &config).unwrap();
    assert_eq!(ones.counts()[63], 129);
    assert_eq!(ones.total(), 129);
}

#[test]
fn test_mirror_raster_symmetric() {
    let config = WalkConfig {
        mirror: true,
        ..WalkConfig::default()
    };
    for digest in digests() {
        let bvatar = Bvatar::new(digest, config).unwrap();
        for style in [
            RasterStyle::default(),
            RasterStyle {
                fill: true,
                saturation: 0.0,
                pixel_scale: 3,
                ..RasterStyle::default()
            },
        ] {
            let img = bvatar.image(&style).unwrap();
            let (width, height) = img.dimensions();
            for y in 0..height {
                for x in 0..width / 2 {
                    assert_eq!(img.get_pixel(x, y), img.get_pixel(width - 1 - x, y));
                }
            }
        }
    }
}

#[test]
fn test_hex_round_trip() {
    for i in 0..8 {
        let text = format!("round trip {i}");
        for config in [WalkConfig::default(), WalkConfig { mirror: true, bits: 4, ..WalkConfig::default() }] {
            let hashed = Bvatar::from_source(text.as_bytes(), config).unwrap();
            let direct = Bvatar::from_hex(&hashed.digest().to_hex(), config).unwrap();
            assert_eq!(hashed.atrium(), direct.atrium());
            assert_eq!(hashed.hue_sat(), direct.hue_sat());
        }
    }
}

#[test]
fn test_hue_independent_of_tail_bytes() {
    // Digests sharing a prefix still rehash to different colors.
    let mut hues = std::collections::HashSet::new();
    for tail in 0u8..16 {
        let mut bytes = vec![0xAB; 20];
        bytes[19] = tail;
        let digest = Digest::from_bytes(bytes).unwrap();
        hues.insert(derive_hue_sat(&digest).hue.to_bits());
        assert_eq!(derive_hue_sat(&digest), derive_hue_sat(&digest.clone()));
    }
    assert!(hues.len() > 1);
}
