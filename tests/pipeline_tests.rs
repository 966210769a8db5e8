//! End-to-end rendering scenarios through the full pipeline.

use std::cell::Cell;

use approx::assert_relative_eq;
use softpipe::bench::{Clipper, TriangleSink};
use softpipe::colors::{self, pack_rgb, BLACK};
use softpipe::prelude::*;
use softpipe::render::CLEAR_DEPTH;

const FLOATS_PER_VERTEX: usize = 5;

/// x, y, z, w and one extra attribute.
fn vertex(x: f32, y: f32, z: f32, w: f32, attr: f32) -> [f32; FLOATS_PER_VERTEX] {
    [x, y, z, w, attr]
}

fn buffer(vertices: &[[f32; FLOATS_PER_VERTEX]]) -> Vec<f32> {
    vertices.iter().flatten().copied().collect()
}

/// Paints the extra attribute into the red channel.
fn attribute_as_red(input: &FragmentInput<'_>, _: &()) -> FragmentOutput {
    FragmentOutput::new(input.data[4], 0.0, 0.0)
}

fn covered_pixels(target: &RenderTarget) -> usize {
    target.color_buffer().iter().filter(|&&c| c != BLACK).count()
}

#[test]
fn constant_triangle_matches_analytic_footprint() {
    // Pixel space (-0.5, -0.5), (15.5, -0.5), (-0.5, 15.5): covered iff x + y <= 15.
    let data = buffer(&[
        vertex(-1.0, -1.0, 0.0, 1.0, 0.0),
        vertex(1.0, -1.0, 0.0, 1.0, 0.0),
        vertex(-1.0, 1.0, 0.0, 1.0, 0.0),
    ]);
    let pipeline = Pipeline::new((), PassthroughShader, ConstantShader::new(0.2, 0.4, 0.6));
    let mut target = RenderTarget::new(16, 16);
    pipeline.render(&mut target, &DrawCall::list(&data, FLOATS_PER_VERTEX));

    let expected: usize = (0..16).map(|y| 16 - y).sum();
    assert_eq!(covered_pixels(&target), expected);

    let color = pack_rgb([0.2, 0.4, 0.6]);
    for y in 0..16 {
        for x in 0..16 {
            let inside = x + y <= 15;
            assert_eq!(target.pixel(x, y) == color, inside, "pixel ({x}, {y})");
        }
    }
    assert_eq!(colors::unpack_rgb(color), [51, 102, 153]);
}

#[test]
fn triangle_outside_one_plane_changes_nothing() {
    let data = buffer(&[
        vertex(-0.5, -0.5, 1.5, 1.0, 1.0),
        vertex(0.5, -0.5, 1.2, 1.0, 1.0),
        vertex(0.0, 0.5, 3.0, 1.0, 1.0),
    ]);
    let pipeline = Pipeline::new((), PassthroughShader, ConstantShader::new(1.0, 1.0, 1.0));
    let mut target = RenderTarget::new(16, 16);
    pipeline.render(&mut target, &DrawCall::list(&data, FLOATS_PER_VERTEX));

    assert_eq!(covered_pixels(&target), 0);
    assert!(target.depth_buffer().iter().all(|&d| d == CLEAR_DEPTH));
}

#[test]
fn assembly_modes_produce_identical_images() {
    let a = vertex(-0.8, -0.6, 0.1, 1.0, 0.1);
    let b = vertex(0.7, -0.9, -0.2, 1.0, 0.9);
    let c = vertex(0.1, 0.8, 0.3, 1.0, 0.5);
    let data = buffer(&[a, b, c]);
    let pipeline = Pipeline::new((), PassthroughShader, attribute_as_red);

    let draws = [
        DrawCall::list(&data, FLOATS_PER_VERTEX),
        DrawCall::strip(&data, FLOATS_PER_VERTEX),
        DrawCall::fan(&data, FLOATS_PER_VERTEX),
        DrawCall::indexed(&data, FLOATS_PER_VERTEX, &[0, 1, 2]),
    ];
    let images: Vec<RenderTarget> = draws
        .iter()
        .map(|draw| {
            let mut target = RenderTarget::new(32, 32);
            pipeline.render(&mut target, draw);
            target
        })
        .collect();

    assert!(covered_pixels(&images[0]) > 0);
    for (draw, image) in draws.iter().zip(&images).skip(1) {
        assert_eq!(image.color_buffer(), images[0].color_buffer(), "{} mode", draw.mode());
        assert_eq!(image.depth_buffer(), images[0].depth_buffer(), "{} mode", draw.mode());
    }
}

#[test]
fn strip_matches_equivalent_list_and_indexed_quad() {
    let v = [
        vertex(-0.875, -0.875, 0.0, 1.0, 0.2),
        vertex(0.875, -0.875, 0.0, 1.0, 0.4),
        vertex(-0.875, 0.875, 0.0, 1.0, 0.6),
        vertex(0.875, 0.875, 0.0, 1.0, 0.8),
    ];
    let strip_data = buffer(&v);
    let list_data = buffer(&[v[0], v[1], v[2], v[1], v[2], v[3]]);
    let pipeline = Pipeline::new((), PassthroughShader, attribute_as_red);

    let render = |draw: DrawCall<'_>| {
        let mut target = RenderTarget::new(24, 24);
        pipeline.render(&mut target, &draw);
        target
    };
    let strip = render(DrawCall::strip(&strip_data, FLOATS_PER_VERTEX));
    let list = render(DrawCall::list(&list_data, FLOATS_PER_VERTEX));
    let indexed = render(DrawCall::indexed(&strip_data, FLOATS_PER_VERTEX, &[0, 1, 2, 1, 2, 3]));

    // Pixel space spans [1, 22] on both axes. The second strip triangle
    // winds the other way and is still filled.
    assert_eq!(covered_pixels(&strip), 22 * 22);
    assert_eq!(strip.color_buffer(), list.color_buffer());
    assert_eq!(strip.color_buffer(), indexed.color_buffer());
}

#[test]
fn depth_test_is_order_independent() {
    let near = [
        vertex(-0.9, -0.9, -0.4, 1.0, 0.25),
        vertex(0.6, -0.9, -0.4, 1.0, 0.25),
        vertex(-0.9, 0.6, -0.4, 1.0, 0.25),
    ];
    let far = [
        vertex(-0.6, -0.7, 0.5, 1.0, 1.0),
        vertex(0.9, -0.5, 0.5, 1.0, 1.0),
        vertex(0.0, 0.9, 0.5, 1.0, 1.0),
    ];
    let pipeline = Pipeline::new((), PassthroughShader, attribute_as_red)
        .with_interpolation(&[InterpolationRule::Smooth; FLOATS_PER_VERTEX]);

    let render = |first: &[[f32; FLOATS_PER_VERTEX]], second: &[[f32; FLOATS_PER_VERTEX]]| {
        let mut target = RenderTarget::new(32, 32);
        let first = buffer(first);
        let second = buffer(second);
        pipeline.render(&mut target, &DrawCall::list(&first, FLOATS_PER_VERTEX));
        pipeline.render(&mut target, &DrawCall::list(&second, FLOATS_PER_VERTEX));
        target
    };
    let near_first = render(&near, &far);
    let far_first = render(&far, &near);

    assert_eq!(near_first.color_buffer(), far_first.color_buffer());
    assert_eq!(near_first.depth_buffer(), far_first.depth_buffer());

    // Both colors survive somewhere, so the triangles really overlap partially.
    let reds: Vec<[u8; 3]> = near_first
        .color_buffer()
        .iter()
        .map(|&c| colors::unpack_rgb(c))
        .collect();
    assert!(reds.contains(&[64, 0, 0]));
    assert!(reds.contains(&[255, 0, 0]));
}

#[test]
fn flat_attribute_is_constant_and_taken_from_vertex_zero() {
    let data = buffer(&[
        vertex(-0.9, -0.9, 0.0, 1.0, 0.2),
        vertex(0.9, -0.5, 0.0, 2.0, 0.9),
        vertex(0.0, 0.9, 0.0, 1.5, 0.6),
    ]);
    let mut pipeline = Pipeline::new((), PassthroughShader, attribute_as_red);
    pipeline.set_interpolation(4, InterpolationRule::Flat);
    let mut target = RenderTarget::new(32, 32);
    pipeline.render(&mut target, &DrawCall::list(&data, FLOATS_PER_VERTEX));

    let expected = pack_rgb([0.2, 0.0, 0.0]);
    let painted: Vec<u32> = target
        .color_buffer()
        .iter()
        .copied()
        .filter(|&c| c != BLACK)
        .collect();
    assert!(!painted.is_empty());
    assert!(painted.iter().all(|&c| c == expected));
}

#[test]
fn smooth_and_noperspective_differ_under_perspective() {
    // On an 8 x 8 target the vertices project to (1, 1), (6.5, 1), (1, 6.5).
    // Pixel (3, 3) has screen weights (3/11, 4/11, 4/11).
    let data = buffer(&[
        vertex(-0.625, -0.625, 0.0, 1.0, 1.0),
        vertex(3.0, -2.5, 0.0, 4.0, 0.0),
        vertex(-2.5, 3.0, 0.0, 4.0, 0.0),
    ]);
    let red_at = |rule: InterpolationRule| {
        let pipeline = Pipeline::new((), PassthroughShader, attribute_as_red)
            .with_interpolation(&[rule; FLOATS_PER_VERTEX]);
        let mut target = RenderTarget::new(8, 8);
        pipeline.render(&mut target, &DrawCall::list(&data, FLOATS_PER_VERTEX));
        colors::unpack_rgb(target.pixel(3, 3))[0]
    };

    // 3/11 of full intensity.
    assert_eq!(red_at(InterpolationRule::NoPerspective), 70);
    // (3/11) / (3/11 + 2 * (4/11) / 4) = 0.6
    assert_eq!(red_at(InterpolationRule::Smooth), 153);
    assert_eq!(red_at(InterpolationRule::Flat), 255);
}

#[test]
fn out_of_range_fragment_colors_saturate() {
    let data = buffer(&[
        vertex(-1.0, -1.0, 0.0, 1.0, 0.0),
        vertex(1.0, -1.0, 0.0, 1.0, 0.0),
        vertex(-1.0, 1.0, 0.0, 1.0, 0.0),
    ]);
    let pipeline = Pipeline::new((), PassthroughShader, ConstantShader::new(1.7, -0.3, 0.5));
    let mut target = RenderTarget::new(4, 4);
    pipeline.render(&mut target, &DrawCall::list(&data, FLOATS_PER_VERTEX));
    assert_eq!(colors::unpack_rgb(target.pixel(0, 0)), [255, 0, 128]);
}

/// Counts invocations through the read-only uniform.
struct CountingShader;

impl VertexShader<Cell<usize>> for CountingShader {
    fn shade<'a>(&self, input: VertexInput<'a>, calls: &Cell<usize>) -> GeometryVertex<'a> {
        calls.set(calls.get() + 1);
        GeometryVertex::borrowed(Vec4::from_slice(input.data), input.data)
    }
}

#[test]
fn indexed_draw_shades_every_index_slot() {
    let data = buffer(&[
        vertex(-0.5, -0.5, 0.0, 1.0, 0.0),
        vertex(0.5, -0.5, 0.0, 1.0, 0.0),
        vertex(0.0, 0.5, 0.0, 1.0, 0.0),
    ]);
    let pipeline = Pipeline::new(Cell::new(0), CountingShader, ConstantShader::new(1.0, 1.0, 1.0));
    let mut target = RenderTarget::new(8, 8);
    pipeline.render(
        &mut target,
        &DrawCall::indexed(&data, FLOATS_PER_VERTEX, &[0, 1, 2, 0, 1, 2]),
    );
    assert_eq!(pipeline.uniform().get(), 6);
}

#[derive(Default)]
struct Collector {
    triangles: Vec<[Vec4; 3]>,
}

impl TriangleSink for Collector {
    fn accept(&mut self, triangle: [&GeometryVertex<'_>; 3]) {
        self.triangles.push(triangle.map(|v| v.position));
    }
}

#[test]
fn vertex_beyond_right_plane_is_clipped_onto_it() {
    let data = buffer(&[
        vertex(0.0, -0.5, 0.0, 1.0, 0.0),
        vertex(2.0, 0.0, 0.0, 1.0, 1.0),
        vertex(0.0, 0.5, 0.0, 1.0, 0.0),
    ]);
    let draw = DrawCall::list(&data, FLOATS_PER_VERTEX);
    let shaded: Vec<GeometryVertex<'_>> = (0..3)
        .map(|i| VertexShader::<()>::shade(&PassthroughShader, draw.vertex(i), &()))
        .collect();

    let rules = [InterpolationRule::Smooth; FLOATS_PER_VERTEX];
    let mut sink = Collector::default();
    Clipper::new(&rules).clip([&shaded[0], &shaded[1], &shaded[2]], &mut sink);

    // A and C inside, B outside: (C, A, CB) then (A, AB, CB).
    assert_eq!(sink.triangles.len(), 2);
    let [first, second] = [sink.triangles[0], sink.triangles[1]];
    assert_eq!(first[0], shaded[2].position);
    assert_eq!(first[1], shaded[0].position);
    assert_eq!(second[0], shaded[0].position);
    for p in [first[2], second[1], second[2]] {
        assert_relative_eq!(p.x, p.w, epsilon = 1e-6);
    }

    // Rendering keeps every fragment inside the target and fills the left edge.
    let pipeline = Pipeline::new((), PassthroughShader, ConstantShader::new(1.0, 1.0, 1.0));
    let mut target = RenderTarget::new(16, 16);
    pipeline.render(&mut target, &draw);
    assert_ne!(target.pixel(8, 8), BLACK);
    assert_ne!(target.pixel(15, 7), BLACK);
}
