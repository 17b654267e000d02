use image::{Rgba, RgbaImage};
use overlaycast_compositor::{
    CompositorState, FrameCompositor, MediaProcessor, ProcessorConnector, VideoFrame,
    VideoPublisher,
};
use overlaycast_overlay::{
    Position, QrCodeConfig, WatermarkConfig, WatermarkImage, WatermarkPosition,
};
use proptest::prelude::*;

fn noise_frame(width: u32, height: u32, seed: u8, timestamp_us: i64) -> VideoFrame {
    let pixels = RgbaImage::from_fn(width, height, |x, y| {
        let v = (x as u8).wrapping_mul(31) ^ (y as u8).wrapping_mul(17) ^ seed;
        Rgba([v, v.wrapping_add(40), v.wrapping_add(80), 255])
    });
    VideoFrame::new(pixels, timestamp_us)
}

fn pass_through_compositor() -> FrameCompositor {
    // Text beyond QR capacity: generation fails and the compositor passes through.
    let mut compositor = FrameCompositor::qr_code(QrCodeConfig::new("#".repeat(4000), 64, 64));
    compositor.generate().unwrap();
    assert_eq!(compositor.state(), &CompositorState::PassThrough);
    compositor
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn every_input_frame_yields_one_output_with_its_timestamp(
        timestamps in proptest::collection::vec(any::<i64>(), 0..24),
        width in 1u32..48,
        height in 1u32..48,
    ) {
        let config = QrCodeConfig::new("https://example.com", 16, 16)
            .with_border(2)
            .with_position(Position::new(3, 3));
        let mut processor = MediaProcessor::with_compositor(FrameCompositor::qr_code(config));

        let outputs: Vec<VideoFrame> = timestamps
            .iter()
            .enumerate()
            .map(|(i, ts)| processor.process(noise_frame(width, height, i as u8, *ts)))
            .collect();

        prop_assert_eq!(outputs.len(), timestamps.len());
        for (out, ts) in outputs.iter().zip(&timestamps) {
            prop_assert_eq!(out.timestamp_us(), *ts);
            prop_assert_eq!(out.dimensions(), (width, height));
        }
        prop_assert_eq!(processor.stats().frames_in, timestamps.len() as u64);
        prop_assert_eq!(processor.stats().frames_out, timestamps.len() as u64);
    }

    #[test]
    fn pass_through_is_bit_identical(
        seeds in proptest::collection::vec(any::<u8>(), 1..12),
        width in 1u32..40,
        height in 1u32..40,
    ) {
        let mut compositor = pass_through_compositor();
        for (i, seed) in seeds.iter().enumerate() {
            let input = noise_frame(width, height, *seed, i as i64 * 33_333);
            let out = compositor.transform(input.clone());
            prop_assert_eq!(out, input);
        }
    }
}

#[test]
fn watermark_on_stream_is_mirrored_selection() {
    // Left half red, right half blue: the mirror puts blue on the left.
    let red = Rgba([255, 0, 0, 255]);
    let blue = Rgba([0, 0, 255, 255]);
    let selected = RgbaImage::from_fn(8, 4, |x, _| if x < 4 { red } else { blue });

    let mut compositor = FrameCompositor::watermark(WatermarkConfig::new(
        WatermarkImage::from_rgba(selected),
        WatermarkPosition::TopLeft,
    ));
    compositor.generate().unwrap();

    let out = compositor.transform(noise_frame(32, 32, 0, 0));
    assert_eq!(*out.pixels().get_pixel(0, 0), blue);
    assert_eq!(*out.pixels().get_pixel(3, 3), blue);
    assert_eq!(*out.pixels().get_pixel(4, 0), red);
    assert_eq!(*out.pixels().get_pixel(7, 3), red);
}

#[test]
fn translucent_watermark_blends_with_frame() {
    let half_white = Rgba([255, 255, 255, 128]);
    let mut compositor = FrameCompositor::watermark(WatermarkConfig::new(
        WatermarkImage::from_rgba(RgbaImage::from_pixel(4, 4, half_white)),
        WatermarkPosition::Center,
    ));
    compositor.generate().unwrap();

    let black = VideoFrame::new(RgbaImage::from_pixel(12, 12, Rgba([0, 0, 0, 255])), 0);
    let out = compositor.transform(black);
    let px = out.pixels().get_pixel(6, 6);
    assert!(px.0[0] > 100 && px.0[0] < 160, "blended value {:?}", px);
    assert_eq!(px.0[3], 255);
    assert_eq!(*out.pixels().get_pixel(0, 0), Rgba([0, 0, 0, 255]));
}

#[test]
fn publisher_stream_keeps_order_across_resolution_change() {
    let mut publisher = VideoPublisher::new();
    let compositor = FrameCompositor::qr_code(QrCodeConfig::new("order", 8, 8).with_border(1));
    publisher.set_video_processor_connector(Some(ProcessorConnector::new(
        MediaProcessor::with_compositor(compositor),
    )));

    let sizes = [(64, 48), (64, 48), (128, 96), (64, 48)];
    let stamps: Vec<i64> = sizes
        .iter()
        .enumerate()
        .map(|(i, (w, h))| publisher.publish(noise_frame(*w, *h, i as u8, i as i64 * 10)))
        .map(|frame| frame.timestamp_us())
        .collect();

    assert_eq!(stamps, vec![0, 10, 20, 30]);
    assert_eq!(publisher.frames_published(), 4);
}
