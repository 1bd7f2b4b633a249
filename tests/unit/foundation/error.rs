use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        ScreenError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(ScreenError::media("x").to_string().contains("media error:"));
}

#[test]
fn capacity_overflow_names_pixel_and_capacity() {
    let err = ScreenError::CapacityOverflow {
        pixel: PixelPos::new(3, 7),
        runs_required: 730,
    };
    let msg = err.to_string();
    assert!(msg.contains("(3, 7)"));
    assert!(msg.contains("730"));
    assert!(msg.contains("729"));
}

#[test]
fn duration_out_of_range_reports_count() {
    let msg = ScreenError::DurationOutOfRange { count: 65 }.to_string();
    assert!(msg.contains("65"));
    assert!(msg.contains("1..=64"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = ScreenError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
