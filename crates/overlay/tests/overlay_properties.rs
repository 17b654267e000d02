use image::{Rgba, RgbaImage};
use overlaycast_overlay::{
    Color, OverlayGenerator, QrCodeConfig, WatermarkConfig, WatermarkImage, WatermarkPosition,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn qr_bitmap_is_data_area_plus_two_borders(
        width in 1u32..320,
        height in 1u32..320,
        border in 0u32..40,
    ) {
        let config = QrCodeConfig::new("https://example.com/overlay", width, height)
            .with_border(border);
        let bitmap = config.generate().unwrap();
        prop_assert_eq!(bitmap.dimensions(), (width + 2 * border, height + 2 * border));
    }

    #[test]
    fn watermark_bitmap_mirrors_every_row(width in 1u32..40, height in 1u32..40) {
        let original = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8, 255])
        });
        let config = WatermarkConfig::new(
            WatermarkImage::from_rgba(original.clone()),
            WatermarkPosition::BottomRight,
        );
        let bitmap = config.generate().unwrap();

        prop_assert_eq!(bitmap.dimensions(), (width, height));
        for (x, y, px) in bitmap.pixels().enumerate_pixels() {
            prop_assert_eq!(px, original.get_pixel(width - 1 - x, y));
        }
    }
}

#[test]
fn qr_quiet_zone_is_uniform_light() {
    let light = Color::rgb(255, 255, 240);
    let config = QrCodeConfig::new("quiet zone", 96, 96)
        .with_border(12)
        .with_colors(Color::rgb(10, 10, 60), light);
    let bitmap = config.generate().unwrap();
    let (w, h) = bitmap.dimensions();

    for (x, y, px) in bitmap.pixels().enumerate_pixels() {
        let in_border = x < 12 || y < 12 || x >= w - 12 || y >= h - 12;
        if in_border {
            assert_eq!(*px, light.to_rgba(), "border pixel ({x}, {y})");
        }
    }
}

#[test]
fn qr_data_area_uses_only_configured_colors() {
    let dark = Color::rgb(0, 0, 128);
    let light = Color::rgb(255, 255, 0);
    let config = QrCodeConfig::new("two colors", 64, 64).with_colors(dark, light);
    let bitmap = config.generate().unwrap();

    let mut saw_dark = false;
    for px in bitmap.pixels().pixels() {
        assert!(*px == dark.to_rgba() || *px == light.to_rgba());
        saw_dark |= *px == dark.to_rgba();
    }
    assert!(saw_dark);
}
