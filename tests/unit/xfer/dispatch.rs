use super::*;

fn opts() -> DispatchOpts {
    DispatchOpts::default().with_legacy_non_separable_modes(false)
}

#[test]
fn table_rows_follow_enumeration_order() {
    for (i, e) in XFERMODES.iter().enumerate() {
        assert_eq!(e.mode.index(), i);
    }
}

#[test]
fn only_plus_overrides_coverage() {
    for e in &XFERMODES {
        assert_eq!(e.aa_override.is_some(), e.mode == BlendMode::Plus, "{}", e.mode);
    }
}

#[test]
fn capability_is_stable_within_a_process() {
    let first = platform_supports_batched();
    for _ in 0..8 {
        assert_eq!(platform_supports_batched(), first);
    }
}

#[test]
fn every_mode_dispatches_when_capable() {
    if !platform_supports_batched() {
        return;
    }
    for m in BlendMode::ALL {
        let p = dispatch(m, &opts()).unwrap();
        assert_eq!(p.mode(), m);
    }
    assert_eq!(supported_modes(&opts()), BlendMode::ALL.to_vec());
}

#[test]
fn legacy_option_withholds_only_non_separable_modes() {
    if !platform_supports_batched() {
        return;
    }
    let legacy = opts().with_legacy_non_separable_modes(true);
    for m in BlendMode::ALL {
        assert_eq!(is_supported(m, &legacy), !m.is_non_separable(), "{m}");
    }
    assert_eq!(supported_modes(&legacy).len(), BlendMode::COUNT - 4);
}

#[test]
fn mismatched_lengths_are_rejected_without_writing() {
    let Some(p) = dispatch(BlendMode::Src, &opts()) else {
        return;
    };
    let src = vec![[9, 9, 9, 9]; 3];
    let mut dst = vec![[1, 1, 1, 1]; 4];
    let err = p.process(&mut dst, &src, None).unwrap_err();
    assert!(err.to_string().contains("equal-length"));
    assert_eq!(dst, vec![[1, 1, 1, 1]; 4]);

    let src = vec![[9, 9, 9, 9]; 4];
    let err = p.process(&mut dst, &src, Some(&[255u8; 3][..])).unwrap_err();
    assert!(err.to_string().contains("coverage"));
    assert_eq!(dst, vec![[1, 1, 1, 1]; 4]);
}

#[test]
fn process_par_rejects_zero_chunks() {
    let Some(p) = dispatch(BlendMode::SrcOver, &opts()) else {
        return;
    };
    let mut dst = vec![[0; 4]; 4];
    assert!(p.process_par(&mut dst, &[[0; 4]; 4], None, 0).is_err());
}

#[test]
fn process_par_accepts_chunks_larger_than_the_buffer() {
    let Some(p) = dispatch(BlendMode::Src, &opts()) else {
        return;
    };
    let src = [[1, 1, 1, 1]; 5];
    let mut dst = vec![[0; 4]; 5];
    p.process_par(&mut dst, &src, None, usize::MAX).unwrap();
    assert_eq!(dst, src.to_vec());

    let mut dst = vec![[0; 4]; 5];
    p.process_par(&mut dst, &src, Some(&[255u8; 5][..]), usize::MAX - 3)
        .unwrap();
    assert_eq!(dst, src.to_vec());

    let mut empty: Vec<PremulRgba8> = Vec::new();
    p.process_par(&mut empty, &[], None, usize::MAX).unwrap();
}

#[test]
fn batch_entry_points_match_buffer_processing() {
    let Some(p) = dispatch(BlendMode::Screen, &opts()) else {
        return;
    };
    let s = [[200, 10, 0, 210], [0, 0, 0, 0], [50, 50, 50, 50], [255, 255, 255, 255]];
    let d = [[10, 20, 30, 40], [90, 0, 90, 100], [0, 0, 0, 0], [1, 2, 3, 4]];
    let aa = [0u8, 64, 200, 255];

    let mut out = d;
    p.process(&mut out, &s, None).unwrap();
    assert_eq!(
        out,
        p.xfer_batch(Px4::from_pixels(s), Px4::from_pixels(d)).to_pixels()
    );

    let mut out = d;
    p.process(&mut out, &s, Some(&aa[..])).unwrap();
    let batch = p.xfer_batch_aa(
        Px4::from_pixels(s),
        Px4::from_pixels(d),
        Px4::load_coverage(&aa),
    );
    assert_eq!(out, batch.to_pixels());
}
