use roomcast::math::{fit, FitError, FitRect};

#[test]
fn test_hd_content_into_wide_bounds() {
    // 1920/1080 = 1.778 is narrower than 100/50 = 2.0
    let rect = fit(1920.0, 1080.0, 100.0, 50.0).unwrap();
    assert_eq!(rect, FitRect { width: 89, height: 50 });
}

#[test]
fn test_four_by_three_into_square_bounds() {
    let rect = fit(400.0, 300.0, 200.0, 200.0).unwrap();
    assert_eq!(rect, FitRect { width: 200, height: 150 });
}

#[test]
fn test_tall_content_pins_width() {
    // 9:16 portrait into a landscape face
    let rect = fit(1080.0, 1920.0, 100.0, 50.0).unwrap();
    assert_eq!(rect.height, 50);
    assert!(rect.width <= 100);
}

#[test]
fn test_fit_is_order_sensitive_in_arguments() {
    let a = fit(1920.0, 1080.0, 100.0, 50.0).unwrap();
    let b = fit(1080.0, 1920.0, 100.0, 50.0).unwrap();
    assert_ne!(a, b, "swapping content axes should change the fit");
}

#[test]
fn test_fit_properties_hold_across_inputs() {
    let contents = [
        (1920.0, 1080.0),
        (1080.0, 1920.0),
        (640.0, 480.0),
        (1.0, 1.0),
        (3.0, 2.0),
        (2543.0, 311.0),
    ];
    let bounds = [(100.0, 50.0), (50.0, 100.0), (200.0, 200.0), (7.0, 3.0)];

    for &(cw, ch) in &contents {
        for &(bw, bh) in &bounds {
            let rect = fit(cw, ch, bw, bh).unwrap();
            let aspect = cw / ch;

            let width = rect.width as f32;
            let height = rect.height as f32;

            // One axis lands exactly on the bound, the other at or under it
            assert!(
                (width == bw && height <= bh) || (height == bh && width <= bw),
                "fit({},{},{},{}) = {:?} escapes the bounds",
                cw,
                ch,
                bw,
                bh,
                rect
            );

            // Aspect preserved to within one unit of rounding drift
            assert!(
                (width - height * aspect).abs() <= 1.0
                    || (height - width / aspect).abs() <= 1.0,
                "fit({},{},{},{}) = {:?} drifts from aspect {}",
                cw,
                ch,
                bw,
                bh,
                rect,
                aspect
            );
        }
    }
}

#[test]
fn test_degenerate_inputs_fail_fast() {
    assert!(matches!(
        fit(0.0, 1080.0, 100.0, 50.0),
        Err(FitError::InvalidDimension { .. })
    ));
    assert!(matches!(
        fit(1920.0, -1.0, 100.0, 50.0),
        Err(FitError::InvalidDimension { .. })
    ));
    assert!(matches!(
        fit(1920.0, 1080.0, 0.0, 50.0),
        Err(FitError::InvalidDimension { .. })
    ));
    assert!(matches!(
        fit(1920.0, 1080.0, 100.0, f32::NAN),
        Err(FitError::InvalidDimension { .. })
    ));
}
