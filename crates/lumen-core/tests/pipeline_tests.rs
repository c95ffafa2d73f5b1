//! Tests for the frame stages around accumulation: surface capture,
//! compositing, debug introspection, and per-frame orchestration.

use glam::{Vec3, Vec4};
use lumen_core::frame::draw_frame;
use lumen_core::render::capture::{self, DIFFUSE_CLEAR, NORMAL_CLEAR};
use lumen_core::render::compositor;
use lumen_core::render::{NoOcclusion, OcclusionPass, Sprite};
use lumen_core::{
    EngineConfig, EngineError, FrameCounter, Image, Light, LightingEngine, Rect, RenderTarget,
    Resolution,
};

fn engine(size: u32) -> LightingEngine {
    LightingEngine::new(
        EngineConfig::default().with_resolution(Resolution::square(size).unwrap()),
    )
    .unwrap()
}

/// 2x2 image with a distinct opaque color per texel.
fn quad_image() -> Image {
    Image::new(
        2,
        2,
        vec![
            [255, 0, 0, 255],
            [0, 255, 0, 255],
            [0, 0, 255, 255],
            [255, 255, 255, 255],
        ],
    )
    .unwrap()
}

/// Occlusion pass that records how often it ran and darkens the frame.
#[derive(Default)]
struct RecordingOcclusion {
    calls: usize,
}

impl OcclusionPass for RecordingOcclusion {
    fn apply(&mut self, frame: &mut RenderTarget) {
        self.calls += 1;
        for p in frame.pixels_mut() {
            *p = (p.truncate() * 0.5).extend(p.w);
        }
    }
}

// ============================================================================
// Images and targets
// ============================================================================

mod target_tests {
    use super::*;

    #[test]
    fn image_rejects_bad_data() {
        assert_eq!(Image::new(0, 4, vec![]), Err(EngineError::EmptyImage));
        assert_eq!(
            Image::new(2, 2, vec![[0; 4]; 3]),
            Err(EngineError::ImageDataLength {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn image_from_rgba8_bytes() {
        let img = Image::from_rgba8(1, 2, &[255, 0, 0, 255, 0, 0, 255, 0]).unwrap();
        assert_eq!(img.texel(0, 0), Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(img.texel(0, 1), Vec4::new(0.0, 0.0, 1.0, 0.0));
    }

    #[test]
    fn resolution_validation() {
        assert!(Resolution::new(0, 10).is_err());
        assert!(Resolution::new(10, 100_000).is_err());
        assert_eq!(Resolution::new(640, 480).unwrap().extent(), 640.0);
    }

    #[test]
    fn rect_intersection() {
        let a = Rect::new(0, 0, 10, 10);
        assert_eq!(a.intersect(&Rect::new(5, -5, 10, 10)), Rect::new(5, 0, 5, 5));
        assert!(a.intersect(&Rect::new(20, 20, 4, 4)).is_empty());
        assert!(a.contains(9, 9));
        assert!(!a.contains(10, 0));
    }

    #[test]
    fn rect_edges_saturate() {
        assert_eq!(Rect::new(i32::MAX - 1, 0, 10, 1).right(), i32::MAX);
        assert_eq!(Rect::new(0, 1, 1, u32::MAX).bottom(), i32::MAX);
        assert_eq!(Rect::new(-5, -5, 10, 10).right(), 5);

        let huge = Rect::new(0, 0, u32::MAX, u32::MAX);
        assert_eq!(huge.intersect(&Rect::new(0, 0, 8, 8)), Rect::new(0, 0, 8, 8));
        let wide = Rect::new(1, 0, i32::MAX as u32, 16);
        assert_eq!(wide.intersect(&Rect::new(0, 0, 16, 16)), Rect::new(1, 0, 15, 16));
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut t = RenderTarget::new(4, 4);
        t.fill_rect(Rect::new(2, 2, 10, 10), Vec4::ONE);
        assert_eq!(t.get(3, 3), Vec4::ONE);
        assert_eq!(t.get(1, 1), Vec4::ZERO);
    }

    #[test]
    fn rgba8_quantisation_clamps() {
        let t = RenderTarget::filled(1, 1, Vec4::new(2.0, -1.0, 0.5, 1.0));
        assert_eq!(t.to_rgba8(), vec![255, 0, 128, 255]);
    }
}

// ============================================================================
// Surface capture
// ============================================================================

mod capture_tests {
    use super::*;

    #[test]
    fn clears_to_neutral_backgrounds() {
        let mut colormap = RenderTarget::filled(8, 8, Vec4::ONE);
        let mut normalmap = RenderTarget::filled(8, 8, Vec4::ZERO);
        let img = quad_image();
        capture::capture(
            &mut colormap,
            &mut normalmap,
            &[Sprite {
                diffuse: &img,
                normal: &img,
                placement: Rect::new(0, 0, 2, 2),
            }],
        )
        .unwrap();
        assert_eq!(colormap.get(7, 7), DIFFUSE_CLEAR);
        assert_eq!(normalmap.get(7, 7), NORMAL_CLEAR);
        assert_eq!(colormap.get(0, 0), Vec4::new(1.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn stretches_with_nearest_sampling() {
        let mut t = RenderTarget::new(4, 4);
        capture::draw_image(&mut t, &quad_image(), Rect::new(0, 0, 4, 4));
        assert_eq!(t.get(0, 0), Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(t.get(1, 1), Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(t.get(2, 0), Vec4::new(0.0, 1.0, 0.0, 1.0));
        assert_eq!(t.get(0, 3), Vec4::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(t.get(3, 3), Vec4::ONE);
    }

    #[test]
    fn transparent_texels_keep_background() {
        let mut t = RenderTarget::filled(2, 2, NORMAL_CLEAR);
        let clear = Image::solid(2, 2, [255, 0, 0, 0]).unwrap();
        capture::draw_image(&mut t, &clear, Rect::new(0, 0, 2, 2));
        assert_eq!(t.get(1, 1), NORMAL_CLEAR);
    }

    #[test]
    fn mismatched_images_are_rejected_without_writing() {
        let mut e = engine(8);
        let diffuse = Image::solid(4, 4, [255; 4]).unwrap();
        let normal = Image::solid(2, 4, [255; 4]).unwrap();
        let before = e.colormap().clone();
        let err = e
            .capture_sprite(&diffuse, &normal, Rect::new(0, 0, 4, 4))
            .unwrap_err();
        assert!(matches!(err, EngineError::ImageSizeMismatch { .. }));
        assert_eq!(e.colormap(), &before);

        let mut out = RenderTarget::new(8, 8);
        assert_eq!(
            e.render(&mut out, Rect::new(0, 0, 8, 8)),
            Err(EngineError::SurfacesNotCaptured)
        );
    }

    #[test]
    fn placement_outside_buffer_is_clipped() {
        let mut e = engine(4);
        let img = quad_image();
        e.capture(&[Sprite::at(&img, &img, 3, 3)]).unwrap();
        assert_eq!(e.colormap().get(3, 3), Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(e.colormap().get(2, 2), DIFFUSE_CLEAR);
    }

    #[test]
    fn later_sprites_draw_over_earlier() {
        let mut e = engine(2);
        let red = Image::solid(2, 2, [255, 0, 0, 255]).unwrap();
        let blue = Image::solid(1, 1, [0, 0, 255, 255]).unwrap();
        e.capture(&[Sprite::at(&red, &red, 0, 0), Sprite::at(&blue, &blue, 1, 1)])
            .unwrap();
        assert_eq!(e.colormap().get(0, 0), Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(e.colormap().get(1, 1), Vec4::new(0.0, 0.0, 1.0, 1.0));
    }
}

// ============================================================================
// Compositor
// ============================================================================

mod compositor_tests {
    use super::*;

    fn checker(size: u32) -> RenderTarget {
        let mut t = RenderTarget::new(size, size);
        for y in 0..size {
            for x in 0..size {
                let v = ((x + y) % 2) as f32;
                t.set(x, y, Vec4::new(v, v, v, 1.0));
            }
        }
        t
    }

    #[test]
    fn integer_upscale_has_no_blur() {
        let src = checker(4);
        let mut dest = RenderTarget::new(8, 8);
        compositor::draw(&src, &mut dest, Rect::new(0, 0, 8, 8));
        for y in 0..8 {
            for x in 0..8 {
                assert_eq!(dest.get(x, y), src.get(x / 2, y / 2));
            }
        }
    }

    #[test]
    fn same_size_copy_is_exact() {
        let src = checker(5);
        let mut dest = RenderTarget::new(5, 5);
        let bounds = dest.bounds();
        compositor::draw(&src, &mut dest, bounds);
        assert_eq!(dest, src);
    }

    #[test]
    fn blit_clips_to_destination() {
        let src = RenderTarget::filled(4, 4, Vec4::ONE);
        let mut dest = RenderTarget::new(4, 4);
        compositor::blit(&src, src.bounds(), &mut dest, Rect::new(2, 2, 4, 4));
        assert_eq!(dest.get(3, 3), Vec4::ONE);
        assert_eq!(dest.get(1, 1), Vec4::ZERO);
    }

    #[test]
    fn engine_draw_requires_composite() {
        let mut e = engine(4);
        let mut dest = RenderTarget::new(8, 8);
        assert_eq!(
            e.draw(&mut dest, Rect::new(0, 0, 8, 8)),
            Err(EngineError::CompositeNotRendered)
        );

        e.set_ambient(Vec3::ONE);
        let white = Image::solid(4, 4, [255; 4]).unwrap();
        e.capture_sprite(&white, &white, Rect::new(0, 0, 4, 4)).unwrap();
        e.accumulate(Rect::new(0, 0, 4, 4)).unwrap();
        e.draw(&mut dest, Rect::new(0, 0, 8, 8)).unwrap();
        assert_eq!(dest.get(7, 7), Vec4::ONE);
    }

    #[test]
    fn resize_recreates_buffers() {
        let mut e = engine(4);
        let white = Image::solid(4, 4, [255; 4]).unwrap();
        e.capture_sprite(&white, &white, Rect::new(0, 0, 4, 4)).unwrap();
        e.accumulate(Rect::new(0, 0, 4, 4)).unwrap();

        e.resize(Resolution::new(6, 3).unwrap()).unwrap();
        assert_eq!(e.composite().width(), 6);
        assert_eq!(e.normalmap().height(), 3);
        let mut dest = RenderTarget::new(6, 3);
        let bounds = dest.bounds();
        assert_eq!(
            e.draw(&mut dest, bounds),
            Err(EngineError::CompositeNotRendered)
        );
    }
}

// ============================================================================
// Debug introspection
// ============================================================================

mod debug_tests {
    use super::*;

    #[test]
    fn counter_publishes_once_per_second() {
        let mut c = FrameCounter::new();
        for _ in 0..3 {
            c.record_draw();
            c.tick(0.3);
        }
        assert_eq!(c.draw_rate(), 0);
        assert_eq!(c.draw_count(), 3);

        c.record_draw();
        c.tick(0.3);
        assert_eq!(c.draw_rate(), 4);
        assert_eq!(c.draw_count(), 0);
    }

    #[test]
    fn counter_survives_long_stall() {
        let mut c = FrameCounter::new();
        c.record_draw();
        c.tick(4.5);
        assert_eq!(c.draw_rate(), 1);
        c.record_draw();
        c.tick(0.1);
        assert_eq!(c.draw_rate(), 1);
        assert_eq!(c.draw_count(), 1);
    }

    #[test]
    fn counter_handles_extreme_elapsed() {
        let mut c = FrameCounter::new();
        c.record_draw();
        c.tick(f64::from(f32::MAX));
        assert_eq!(c.draw_rate(), 1);
        assert_eq!(c.draw_count(), 0);

        let before = c;
        c.tick(f64::INFINITY);
        c.tick(f64::NAN);
        c.tick(-1.0);
        assert_eq!(c, before);

        c.record_draw();
        c.record_draw();
        c.tick(1.5);
        assert_eq!(c.draw_rate(), 2);
    }

    #[test]
    fn debug_view_reports_counts() {
        let mut e = engine(4);
        e.add_light(Light::point(Vec3::ONE, Vec4::ONE, 1.0, 1.0));
        e.add_light(Light::point(Vec3::ONE, Vec4::ONE, 1.0, 1.0).with_enabled(false));
        let mut counter = FrameCounter::new();
        counter.record_draw();
        counter.tick(1.5);

        let view = e.debug_view(&counter);
        assert_eq!(view.light_count, 2);
        assert_eq!(view.enabled_lights, 1);
        assert_eq!(view.draw_rate, 1);
        assert_eq!(view.composite.width(), 4);
        let text = view.to_string();
        assert!(text.contains("FPS: 1"));
        assert!(text.contains("Lights: 2"));
    }

    #[test]
    fn debug_targets_leave_buffers_untouched() {
        let mut e = engine(8);
        let img = quad_image();
        e.capture(&[Sprite::at(&img, &img, 0, 0)]).unwrap();
        let colormap = e.colormap().clone();
        let normalmap = e.normalmap().clone();

        let mut dest = RenderTarget::new(32, 32);
        e.draw_debug_targets(&mut dest);

        assert_eq!(e.colormap(), &colormap);
        assert_eq!(e.normalmap(), &normalmap);
        // First thumbnail starts at the margin with the colormap's corner.
        assert_eq!(dest.get(4, 4), colormap.get(0, 0));
        // Second thumbnail holds the normalmap.
        assert_eq!(dest.get(4 + 8 + 4 + 7, 4 + 7), normalmap.get(7, 7));
    }
}

// ============================================================================
// Frame orchestration
// ============================================================================

mod frame_tests {
    use super::*;

    #[test]
    fn runs_stages_in_order_and_counts_frame() {
        let mut e = engine(8);
        e.set_ambient(Vec3::ONE);
        let white = Image::solid(8, 8, [255; 4]).unwrap();
        let sprites = [Sprite::at(&white, &white, 0, 0)];
        let mut occlusion = RecordingOcclusion::default();
        let mut frame = RenderTarget::new(8, 8);
        let mut counter = FrameCounter::new();

        draw_frame(&mut e, &sprites, &mut occlusion, &mut frame, &mut counter, false).unwrap();

        assert_eq!(occlusion.calls, 1);
        assert_eq!(counter.draw_count(), 1);
        // Occlusion runs after compositing, so it darkens the lit frame.
        assert_eq!(frame.get(3, 3), Vec4::new(0.5, 0.5, 0.5, 1.0));
    }

    #[test]
    fn failed_frame_is_not_counted() {
        let mut e = engine(8);
        let a = Image::solid(8, 8, [255; 4]).unwrap();
        let b = Image::solid(4, 4, [255; 4]).unwrap();
        let sprites = [Sprite {
            diffuse: &a,
            normal: &b,
            placement: Rect::new(0, 0, 8, 8),
        }];
        let mut frame = RenderTarget::new(8, 8);
        let mut counter = FrameCounter::new();
        let result = draw_frame(
            &mut e,
            &sprites,
            &mut NoOcclusion,
            &mut frame,
            &mut counter,
            false,
        );
        assert!(result.is_err());
        assert_eq!(counter.draw_count(), 0);
    }
}
