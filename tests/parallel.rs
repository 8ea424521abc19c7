// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use juliapar::patches::{execute_patch, plan_patches};
use juliapar::{Domain, ImageBuffer, JuliaRenderer};
use num::Complex;

fn benchmark_renderer(size: i64) -> JuliaRenderer {
    JuliaRenderer::new(size, Domain::default(), Complex::new(-0.2, -0.65)).unwrap()
}

#[test]
fn worker_count_never_changes_the_image() {
    let renderer = benchmark_renderer(60);
    let reference = renderer.julia_single();
    for workers in 1..=8 {
        for &patch in &[1, 7, 20, 60, 61] {
            let rendered = renderer.julia(patch, workers).unwrap();
            assert_eq!(
                rendered.image, reference,
                "patch {} workers {} differs from the sequential image",
                patch, workers
            );
        }
    }
}

#[test]
fn many_more_patches_than_workers() {
    let renderer = benchmark_renderer(45);
    let rendered = renderer.julia(2, 3).unwrap();
    assert_eq!(rendered.image, renderer.julia_single());
}

#[test]
fn stitching_executed_patches_by_hand_gives_the_same_image() {
    let renderer = benchmark_renderer(23);
    let mut image = ImageBuffer::new(23);
    // Reverse order: completion order must not matter.
    for desc in plan_patches(23, 5).unwrap().iter().rev() {
        image.blit(&execute_patch(desc, 23, renderer.domain(), renderer.constant()));
    }
    assert_eq!(image, renderer.julia_single());
}

#[test]
fn renderers_with_different_constants_run_side_by_side() {
    let a = JuliaRenderer::new(30, Domain::default(), Complex::new(-0.8, 0.156)).unwrap();
    let b = JuliaRenderer::new(30, Domain::default(), Complex::new(0.285, 0.01)).unwrap();
    let (ra, rb) = crossbeam::scope(|s| {
        let ha = s.spawn(|_| a.julia(4, 2).unwrap());
        let hb = s.spawn(|_| b.julia(4, 2).unwrap());
        (ha.join().unwrap(), hb.join().unwrap())
    })
    .unwrap();
    assert_eq!(ra.image, a.julia_single());
    assert_eq!(rb.image, b.julia_single());
    assert_ne!(ra.image, rb.image);
}

#[test]
fn every_cell_is_a_ratio() {
    let image = benchmark_renderer(50).julia(8, 4).unwrap().image;
    for x in 0..50 {
        for y in 0..50 {
            let v = image[x][y];
            assert!(v >= 0.0 && v <= 1.0);
            assert_eq!((v * 300.0).round() / 300.0, v);
        }
    }
}

#[test]
fn invalid_configurations_produce_nothing() {
    assert!(JuliaRenderer::new(0, Domain::default(), Complex::new(0.0, 0.0))
        .unwrap_err()
        .is_configuration());
    let renderer = benchmark_renderer(10);
    assert!(renderer.julia(-1, 1).unwrap_err().is_configuration());
    assert!(renderer.julia(5, 0).unwrap_err().is_configuration());
    assert!(Domain::new(1.0, 1.0, 0.0, 1.0).unwrap_err().is_configuration());
}
